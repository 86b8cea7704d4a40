use super::Mode;
use crate::graph::{NodeId, Position};

/// User gestures forwarded by a rendering adapter, in graph coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
	/// Click on empty canvas.
	CanvasClick(Position),
	NodeClick(NodeId),
	/// Continuous drag of a node to a new position.
	NodeDrag(NodeId, Position),
	ModeChange(Mode),
}

/// What a gesture did to the session; adapters redraw on anything but `Ignored`.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
	Ignored,
	ModeChanged(Mode),
	SelectionChanged,
	/// First endpoint picked in add-edge mode.
	SourcePicked(NodeId),
	NodeCreated(NodeId),
	NodeMoved,
	EdgeCreated,
	EdgeRejected,
}

impl GestureOutcome {
	pub fn needs_redraw(&self) -> bool {
		!matches!(self, GestureOutcome::Ignored)
	}
}
