use leptos::prelude::*;

use crate::session::Notice;

/// Toasts raised by the session; click one to dismiss it early.
#[component]
pub fn NoticeStack(notices: RwSignal<Vec<Notice>>) -> impl IntoView {
	view! {
		<div class="notice-stack">
			<For
				each=move || notices.get()
				key=|notice: &Notice| notice.id
				children=move |notice| {
					let id = notice.id;
					view! {
						<div
							class=format!("notice {}", notice.level.class())
							on:click=move |_| notices.update(|list| list.retain(|n| n.id != id))
						>
							{notice.message}
						</div>
					}
				}
			/>
		</div>
	}
}
