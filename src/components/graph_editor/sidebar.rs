use leptos::callback::{Callable, UnsyncCallback};
use leptos::prelude::*;

use super::component::EditorAction;
use crate::session::SessionStatus;

/// Property panel: graph name, templates for new elements and the selected vertex.
#[component]
pub fn Sidebar(status: RwSignal<SessionStatus>, on_action: UnsyncCallback<EditorAction>) -> impl IntoView {
	let nothing_selected = move || status.with(|s| s.selected_label.is_none());

	view! {
		<aside class="graph-sidebar">
			<section>
				<h3>"Graph"</h3>
				<label>
					"Name"
					<input
						type="text"
						prop:value=move || status.with(|s| s.graph_name.clone())
						on:change=move |ev| on_action.run(EditorAction::RenameGraph(event_target_value(&ev)))
					/>
				</label>
				<p class="hint">
					{move || {
						status
							.with(|s| match &s.source_label {
								Some(label) => format!("Edge from {}: pick the target vertex.", label),
								None => format!("Mode: {}", s.mode.label()),
							})
					}}
				</p>
			</section>

			<section>
				<h3>"New vertex"</h3>
				<label>
					"Label"
					<input
						type="text"
						placeholder="next free letter"
						prop:value=move || status.with(|s| s.node_label.clone())
						on:change=move |ev| on_action.run(EditorAction::NodeLabel(event_target_value(&ev)))
					/>
				</label>
				<label>
					"Color"
					<input
						type="color"
						prop:value=move || status.with(|s| s.node_color.clone())
						on:input=move |ev| on_action.run(EditorAction::NodeColor(event_target_value(&ev)))
					/>
				</label>
			</section>

			<section>
				<h3>"New edge"</h3>
				<label>
					"Weight"
					<input
						type="number"
						step="any"
						prop:value=move || status.with(|s| s.edge_weight.to_string())
						on:change=move |ev| {
							let weight = event_target_value(&ev).trim().parse().unwrap_or(f64::NAN);
							on_action.run(EditorAction::EdgeWeight(weight));
						}
					/>
				</label>
				<label>
					"Color"
					<input
						type="color"
						prop:value=move || status.with(|s| s.edge_color.clone())
						on:input=move |ev| on_action.run(EditorAction::EdgeColor(event_target_value(&ev)))
					/>
				</label>
			</section>

			<section class:muted=nothing_selected>
				<h3>"Selected vertex"</h3>
				<label>
					"Label"
					<input
						type="text"
						disabled=nothing_selected
						prop:value=move || status.with(|s| s.selected_label.clone().unwrap_or_default())
						on:change=move |ev| on_action.run(EditorAction::SelectedLabel(event_target_value(&ev)))
					/>
				</label>
				<label>
					"Color"
					<input
						type="color"
						disabled=nothing_selected
						prop:value=move || status.with(|s| s.selected_color.clone().unwrap_or_default())
						on:input=move |ev| on_action.run(EditorAction::SelectedColor(event_target_value(&ev)))
					/>
				</label>
			</section>
		</aside>
	}
}
