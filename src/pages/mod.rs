pub mod editor;
pub mod home;
pub mod not_found;

use leptos::callback::UnsyncCallback;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Moves the browser to a graph's own URL once it has been saved.
fn open_saved_graph() -> UnsyncCallback<String> {
	let navigate = use_navigate();
	UnsyncCallback::new(move |id: String| {
		navigate(
			&format!("/graph/{}", id),
			NavigateOptions {
				replace: true,
				..Default::default()
			},
		)
	})
}
