use leptos::callback::{Callable, UnsyncCallback};
use leptos::prelude::*;

use super::component::EditorAction;
use crate::session::{Mode, SessionStatus};

#[component]
pub fn Toolbar(
	status: RwSignal<SessionStatus>,
	physics: RwSignal<bool>,
	on_action: UnsyncCallback<EditorAction>,
) -> impl IntoView {
	let modes = Mode::ALL
		.into_iter()
		.map(|mode| {
			view! {
				<button
					class="mode-button"
					class:active=move || status.with(|s| s.mode == mode)
					on:click=move |_| on_action.run(EditorAction::SetMode(mode))
				>
					{mode.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="graph-toolbar">
			<div class="toolbar-group">{modes}</div>
			<div class="toolbar-group">
				<button on:click=move |_| on_action.run(EditorAction::ToggleDirected)>
					{move || if status.with(|s| s.directed) { "Directed" } else { "Undirected" }}
				</button>
				<button on:click=move |_| on_action.run(EditorAction::ToggleWeighted)>
					{move || if status.with(|s| s.weighted) { "Weighted" } else { "Unweighted" }}
				</button>
				<button
					class:active=move || physics.get()
					on:click=move |_| on_action.run(EditorAction::TogglePhysics)
				>
					"Physics"
				</button>
			</div>
			<div class="toolbar-group">
				<button
					disabled=move || status.with(|s| s.selected_label.is_none())
					on:click=move |_| on_action.run(EditorAction::DeleteSelected)
				>
					"Delete vertex"
				</button>
				<button on:click=move |_| on_action.run(EditorAction::NewGraph)>"New graph"</button>
				<button
					class="primary"
					disabled=move || status.with(|s| s.is_loading)
					on:click=move |_| on_action.run(EditorAction::Save)
				>
					{move || if status.with(|s| s.is_loading) { "Working…" } else { "Save" }}
				</button>
			</div>
			<span class="toolbar-counts">
				{move || status.with(|s| format!("{} vertices, {} edges", s.node_count, s.edge_count))}
			</span>
		</div>
	}
}
