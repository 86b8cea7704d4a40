use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use leptos::callback::{Callable, UnsyncCallback};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::notices::NoticeStack;
use super::render::CanvasRenderer;
use super::sidebar::Sidebar;
use super::state::CanvasState;
use super::toolbar::Toolbar;
use crate::config::EditorConfig;
use crate::graph::Position;
use crate::layout::{ForceLayout, LayoutStrategy, StaticLayout};
use crate::render::RenderAdapter;
use crate::session::{EditorSession, Gesture, Mode, Notice, SessionHandle, SessionStatus};
use crate::store::HttpGraphStore;

/// Everything the toolbar and sidebar can ask of the editor.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorAction {
	SetMode(Mode),
	ToggleDirected,
	ToggleWeighted,
	TogglePhysics,
	DeleteSelected,
	Save,
	NewGraph,
	RenameGraph(String),
	NodeLabel(String),
	NodeColor(String),
	EdgeWeight(f64),
	EdgeColor(String),
	SelectedLabel(String),
	SelectedColor(String),
}

type Layout = Rc<RefCell<Box<dyn LayoutStrategy>>>;

fn dispatch(handle: &SessionHandle, layout: &Layout, gesture: Gesture) {
	if let Gesture::NodeDrag(id, position) = &gesture {
		layout.borrow_mut().pin(id, *position);
	}
	let outcome = handle.with_mut(|s| s.handle_gesture(gesture));
	debug!("gesture -> {:?}", outcome);
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((800.0, 600.0))
}

/// Interactive editor for one graph, loaded from the store when `graph_id`
/// is given. `on_save` receives the remote id after every successful save.
#[component]
pub fn GraphEditor(
	#[prop(default = None)] graph_id: Option<String>,
	#[prop(optional)] on_save: Option<UnsyncCallback<String>>,
) -> impl IntoView {
	let config = EditorConfig::from_env();
	let notice_ttl = Duration::from_millis(config.notice_ttl_ms);
	let handle = SessionHandle::new(EditorSession::new(&config));
	let store = Rc::new(HttpGraphStore::new(&config));
	let layout: Layout = Rc::new(RefCell::new(Box::new(StaticLayout)));
	let physics_on = Rc::new(Cell::new(false));

	let status = RwSignal::new(handle.with(|s| s.status()));
	let notices = RwSignal::new(Vec::<Notice>::new());
	let physics = RwSignal::new(false);

	let liveness = handle.liveness();
	on_cleanup(move || liveness.dispose());

	if let Some(id) = graph_id {
		let (handle, store) = (handle.clone(), store.clone());
		spawn_local(async move {
			if let Err(err) = handle.load_graph(&*store, &id).await {
				debug!("load of {} ended with {}", id, err);
			}
		});
	}

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let canvas_state = Rc::new(RefCell::new(CanvasState::new(800.0, 600.0)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (handle_init, layout_init, physics_init, canvas_init) = (
		handle.clone(),
		layout.clone(),
		physics_on.clone(),
		canvas_state.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		*canvas_init.borrow_mut() = CanvasState::new(w, h);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("canvas has no 2d context");
			return;
		};

		let (canvas_resize, element, handle_resize) =
			(canvas_init.clone(), canvas.clone(), handle_init.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			if !handle_resize.is_active() {
				return;
			}
			let (nw, nh) = parent_size(&element);
			element.set_width(nw as u32);
			element.set_height(nh as u32);
			canvas_resize.borrow_mut().resize(nw, nh);
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (handle_anim, layout_anim, physics_anim, canvas_anim, animate_inner) = (
			handle_init.clone(),
			layout_init.clone(),
			physics_init.clone(),
			canvas_init.clone(),
			animate.clone(),
		);
		*animate.borrow_mut() = Some(Closure::new(move || {
			if !handle_anim.is_active() {
				return;
			}
			if physics_anim.get() {
				let moved = handle_anim.with(|s| layout_anim.borrow_mut().step(&s.view(), 0.016));
				handle_anim.with_mut(|s| {
					for (id, position) in moved {
						s.move_node(&id, position);
					}
				});
			}
			handle_anim.with(|s| {
				let canvas = canvas_anim.borrow();
				CanvasRenderer { ctx: &ctx, canvas: &canvas }.render(&s.view());
			});

			let (current, fresh) = handle_anim.with_mut(|s| (s.status(), s.drain_notices()));
			if status.with_untracked(|s| *s != current) {
				status.set(current);
			}
			for notice in &fresh {
				let id = notice.id;
				set_timeout(
					move || {
						let _ = notices.try_update(|list| list.retain(|n| n.id != id));
					},
					notice_ttl,
				);
			}
			if !fresh.is_empty() {
				notices.update(|list| list.extend(fresh));
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (handle_md, canvas_md) = (handle.clone(), canvas_state.clone());
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		handle_md.with(|s| {
			let mut c = canvas_md.borrow_mut();
			let hit = c
				.node_at(s.graph(), x, y)
				.and_then(|id| s.graph().node(&id).map(|n| (id, n.position)));
			c.press(x, y, s.mode(), hit);
		});
	};

	let (handle_mm, layout_mm, canvas_mm) = (handle.clone(), layout.clone(), canvas_state.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let gesture = {
			let mut c = canvas_mm.borrow_mut();
			if c.dragging().is_none() {
				let hover = handle_mm.with(|s| c.node_at(s.graph(), x, y));
				c.hover = hover;
			}
			c.motion(x, y)
		};
		if let Some(gesture) = gesture {
			dispatch(&handle_mm, &layout_mm, gesture);
		}
	};

	let (handle_mu, layout_mu, canvas_mu) = (handle.clone(), layout.clone(), canvas_state.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let gesture = canvas_mu.borrow_mut().release(x, y);
		if let Some(gesture) = gesture {
			dispatch(&handle_mu, &layout_mu, gesture);
		}
	};

	let canvas_ml = canvas_state.clone();
	let on_mouseleave = move |_: MouseEvent| canvas_ml.borrow_mut().cancel();

	let canvas_wh = canvas_state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			canvas_wh.borrow_mut().zoom_at(x, y, ev.delta_y());
		}
	};

	let (handle_act, layout_act) = (handle.clone(), layout.clone());
	let on_action = UnsyncCallback::new(move |action: EditorAction| {
		debug!("action {:?}", action);
		match action {
			EditorAction::SetMode(mode) => {
				handle_act.with_mut(|s| s.handle_gesture(Gesture::ModeChange(mode)));
			}
			EditorAction::ToggleDirected => handle_act.with_mut(|s| s.toggle_directed()),
			EditorAction::ToggleWeighted => handle_act.with_mut(|s| s.toggle_weighted()),
			EditorAction::TogglePhysics => {
				let on = !physics_on.get();
				physics_on.set(on);
				physics.set(on);
				let next: Box<dyn LayoutStrategy> = if on {
					Box::new(ForceLayout::new())
				} else {
					Box::new(StaticLayout)
				};
				*layout_act.borrow_mut() = next;
			}
			EditorAction::DeleteSelected => {
				handle_act.with_mut(|s| s.remove_selected_node());
			}
			EditorAction::Save => {
				let (handle, store) = (handle_act.clone(), store.clone());
				spawn_local(async move {
					let saved = handle
						.save_graph(&*store, |id| {
							if let Some(cb) = on_save {
								cb.run(id.to_string());
							}
						})
						.await;
					if let Err(err) = saved {
						debug!("save ended with {}", err);
					}
				});
			}
			EditorAction::NewGraph => handle_act.with_mut(|s| s.reset_graph()),
			EditorAction::RenameGraph(name) => {
				handle_act.with_mut(|s| s.rename_graph(&name));
			}
			EditorAction::NodeLabel(label) => handle_act.with_mut(|s| s.set_pending_node_label(&label)),
			EditorAction::NodeColor(color) => handle_act.with_mut(|s| s.set_pending_node_color(&color)),
			EditorAction::EdgeWeight(weight) => {
				handle_act.with_mut(|s| s.set_pending_edge_weight(weight));
			}
			EditorAction::EdgeColor(color) => handle_act.with_mut(|s| s.set_pending_edge_color(&color)),
			EditorAction::SelectedLabel(label) => {
				handle_act.with_mut(|s| s.update_selected_node(Some(&label), None));
			}
			EditorAction::SelectedColor(color) => {
				handle_act.with_mut(|s| s.update_selected_node(None, Some(&color)));
			}
		}
		// Publish right away so inputs don't wait for the next frame.
		status.set(handle_act.with(|s| s.status()));
	});

	view! {
		<div class="graph-editor">
			<Toolbar status=status physics=physics on_action=on_action />
			<div class="graph-editor-body">
				<div class="graph-editor-canvas">
					<canvas
						node_ref=canvas_ref
						on:mousedown=on_mousedown
						on:mousemove=on_mousemove
						on:mouseup=on_mouseup
						on:mouseleave=on_mouseleave
						on:wheel=on_wheel
						style:display="block"
						style:cursor=move || status.with(|s| s.mode.cursor())
					/>
				</div>
				<Sidebar status=status on_action=on_action />
			</div>
			<NoticeStack notices=notices />
		</div>
	}
}
