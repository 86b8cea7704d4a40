use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use super::open_saved_graph;
use crate::components::graph_editor::GraphEditor;

/// A stored graph, addressed by `/graph/:id`.
#[component]
pub fn GraphPage() -> impl IntoView {
	let params = use_params_map();
	let graph_id = Memo::new(move |_| params.with(|p| p.get("id")));

	view! {
		<div class="fullscreen-editor">
			// remount the editor whenever the id changes
			{move || {
				let id = graph_id.get();
				let on_save = open_saved_graph();
				view! { <GraphEditor graph_id=id on_save=on_save /> }
			}}
		</div>
	}
}
