use leptos::prelude::*;

use super::open_saved_graph;
use crate::components::graph_editor::GraphEditor;

/// A fresh, unsaved graph.
#[component]
pub fn Home() -> impl IntoView {
	let on_save = open_saved_graph();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="fullscreen-editor">
				<GraphEditor on_save=on_save />
			</div>
		</ErrorBoundary>
	}
}
