use crate::graph::{Graph, NodeId, Position};
use crate::render::node_radius;
use crate::session::{Gesture, Mode};

/// Extra world-space radius accepted around a node when hit testing.
pub const HIT_SLOP: f64 = 4.0;
/// Screen pixels a press may travel before it stops being a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<NodeId>,
	pub node_start: Position,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A mouse press that has not been released yet.
#[derive(Clone, Debug)]
pub struct Press {
	pub start_x: f64,
	pub start_y: f64,
	pub node: Option<NodeId>,
	pub moved: bool,
}

/// Camera and pointer state owned by the canvas; never part of the session.
#[derive(Clone, Debug)]
pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub press: Option<Press>,
	pub hover: Option<NodeId>,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			press: None,
			hover: None,
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the screen point; later nodes are drawn on top.
	pub fn node_at(&self, graph: &Graph, sx: f64, sy: f64) -> Option<NodeId> {
		let p = self.screen_to_graph(sx, sy);
		graph
			.nodes()
			.iter()
			.rev()
			.find(|n| n.position.distance(&p) <= node_radius(n) + HIT_SLOP)
			.map(|n| n.id.clone())
	}

	/// Starts a press. Select mode drags nodes and pans on empty space;
	/// pan mode always pans.
	pub fn press(&mut self, sx: f64, sy: f64, mode: Mode, node: Option<(NodeId, Position)>) {
		let hit = node.as_ref().map(|(id, _)| id.clone());
		match (mode, node) {
			(Mode::Select, Some((id, position))) => {
				self.drag = DragState {
					node: Some(id),
					node_start: position,
				};
			}
			(Mode::Select, None) | (Mode::Pan, _) => {
				self.pan = PanState {
					active: true,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
			_ => {}
		}
		self.press = Some(Press {
			start_x: sx,
			start_y: sy,
			node: hit,
			moved: false,
		});
	}

	/// Pointer motion; returns a drag gesture once a node press has moved.
	pub fn motion(&mut self, sx: f64, sy: f64) -> Option<Gesture> {
		let press = self.press.as_mut()?;
		let (dx, dy) = (sx - press.start_x, sy - press.start_y);
		if !press.moved && dx.hypot(dy) > CLICK_SLOP {
			press.moved = true;
		}
		if !press.moved {
			return None;
		}
		if let Some(id) = &self.drag.node {
			let k = self.transform.k;
			let start = self.drag.node_start;
			return Some(Gesture::NodeDrag(
				id.clone(),
				Position::new(start.x + dx / k, start.y + dy / k),
			));
		}
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
		}
		None
	}

	/// Ends the press; a press that never moved becomes a click gesture.
	pub fn release(&mut self, sx: f64, sy: f64) -> Option<Gesture> {
		let press = self.press.take();
		self.drag = DragState::default();
		self.pan = PanState::default();
		let press = press.filter(|p| !p.moved)?;
		Some(match press.node {
			Some(id) => Gesture::NodeClick(id),
			None => Gesture::CanvasClick(self.screen_to_graph(sx, sy)),
		})
	}

	pub fn cancel(&mut self) {
		self.press = None;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = None;
	}

	pub fn dragging(&self) -> Option<&str> {
		self.drag.node.as_deref()
	}

	/// Zooms around the screen point, clamped to [0.1, 10].
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::EditorConfig;
	use crate::session::EditorSession;

	fn canvas() -> CanvasState {
		CanvasState::new(800.0, 600.0)
	}

	#[test]
	fn origin_sits_in_the_middle() {
		let c = canvas();
		assert_eq!(c.screen_to_graph(400.0, 300.0), Position::new(0.0, 0.0));
	}

	#[test]
	fn hit_testing_prefers_the_topmost_node() {
		let mut session = EditorSession::new(&EditorConfig::default());
		session.create_node(Position::new(0.0, 0.0), None);
		let top = session.create_node(Position::new(3.0, 0.0), None);
		let c = canvas();
		assert_eq!(c.node_at(session.graph(), 401.0, 300.0), Some(top));
		assert_eq!(c.node_at(session.graph(), 600.0, 300.0), None);
	}

	#[test]
	fn still_press_is_a_click() {
		let mut c = canvas();
		c.press(410.0, 300.0, Mode::AddNode, None);
		assert_eq!(c.motion(411.0, 301.0), None);
		assert_eq!(
			c.release(411.0, 301.0),
			Some(Gesture::CanvasClick(Position::new(11.0, 1.0)))
		);
	}

	#[test]
	fn moving_a_node_press_becomes_a_drag() {
		let mut c = canvas();
		c.press(400.0, 300.0, Mode::Select, Some(("n".into(), Position::new(0.0, 0.0))));
		assert_eq!(
			c.motion(420.0, 310.0),
			Some(Gesture::NodeDrag("n".into(), Position::new(20.0, 10.0)))
		);
		assert_eq!(c.release(420.0, 310.0), None);
		assert_eq!(c.dragging(), None);
	}

	#[test]
	fn pan_mode_moves_the_camera_not_nodes() {
		let mut c = canvas();
		c.press(400.0, 300.0, Mode::Pan, Some(("n".into(), Position::new(0.0, 0.0))));
		assert_eq!(c.motion(450.0, 320.0), None);
		assert_eq!((c.transform.x, c.transform.y), (450.0, 320.0));
		assert_eq!(c.release(450.0, 320.0), None);
	}

	#[test]
	fn zoom_keeps_the_cursor_fixed_and_clamps() {
		let mut c = canvas();
		let before = c.screen_to_graph(100.0, 100.0);
		c.zoom_at(100.0, 100.0, -1.0);
		let after = c.screen_to_graph(100.0, 100.0);
		assert!(before.distance(&after) < 1e-9);
		for _ in 0..100 {
			c.zoom_at(0.0, 0.0, 1.0);
		}
		assert!((c.transform.k - 0.1).abs() < 1e-12);
	}
}
