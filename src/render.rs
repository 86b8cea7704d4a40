//! Drawing contract between the session and whatever puts pixels on screen.
//!
//! Adapters only read a [`SessionView`]; changes travel back as
//! [`Gesture`](crate::session::Gesture)s.

use crate::graph::{EdgeKind, Node, Position};
use crate::session::SessionView;

/// Something that can draw a session snapshot.
pub trait RenderAdapter {
	fn render(&mut self, view: &SessionView<'_>);
}

/// How a node should stand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	Normal,
	Selected,
	/// First endpoint of an edge being drawn.
	Source,
}

pub fn emphasis(view: &SessionView<'_>, node: &Node) -> Emphasis {
	if view.source_node == Some(node.id.as_str()) {
		Emphasis::Source
	} else if view.selected_node == Some(node.id.as_str()) {
		Emphasis::Selected
	} else {
		Emphasis::Normal
	}
}

/// An edge resolved to endpoint coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSegment<'a> {
	pub from: Position,
	pub to: Position,
	/// Radius of the target node, so arrowheads stop at its rim.
	pub target_radius: f64,
	pub kind: EdgeKind,
	pub color: &'a str,
	pub label: Option<String>,
}

/// Drawn radius of a node in graph units.
pub fn node_radius(node: &Node) -> f64 {
	node.size * 0.6
}

pub fn edge_segments<'a>(view: &SessionView<'a>) -> impl Iterator<Item = EdgeSegment<'a>> + 'a {
	let graph = view.graph;
	graph.edges().iter().filter_map(move |edge| {
		let source = graph.node(&edge.source)?;
		let target = graph.node(&edge.target)?;
		Some(EdgeSegment {
			from: source.position,
			to: target.position,
			target_radius: node_radius(target),
			kind: edge.kind,
			color: &edge.color,
			label: edge.display_label(graph.is_weighted()),
		})
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::EditorConfig;
	use crate::session::{EditorSession, Mode};

	/// Adapter that only remembers what it was asked to draw.
	#[derive(Default)]
	struct Recorder {
		frames: Vec<(usize, usize, Vec<Emphasis>)>,
	}

	impl RenderAdapter for Recorder {
		fn render(&mut self, view: &SessionView<'_>) {
			let emphases = view.graph.nodes().iter().map(|n| emphasis(view, n)).collect();
			self.frames
				.push((view.graph.nodes().len(), edge_segments(view).count(), emphases));
		}
	}

	#[test]
	fn adapters_see_selection_and_source() {
		let mut session = EditorSession::new(&EditorConfig::default());
		let a = session.create_node(Position::new(0.0, 0.0), None);
		let b = session.create_node(Position::new(30.0, 0.0), None);
		session.create_edge(&a, &b, None);

		let mut recorder = Recorder::default();
		session.on_node_click(&b);
		recorder.render(&session.view());
		session.set_mode(Mode::AddEdge);
		session.on_node_click(&a);
		recorder.render(&session.view());

		assert_eq!(recorder.frames[0], (2, 1, vec![Emphasis::Normal, Emphasis::Selected]));
		assert_eq!(recorder.frames[1].2, vec![Emphasis::Source, Emphasis::Normal]);
	}

	#[test]
	fn segments_carry_weight_labels_only_when_weighted() {
		let mut session = EditorSession::new(&EditorConfig::default());
		let a = session.create_node(Position::new(0.0, 0.0), None);
		let b = session.create_node(Position::new(30.0, 40.0), None);
		session.create_edge(&a, &b, None);

		let view = session.view();
		let segment = edge_segments(&view).next().unwrap();
		assert_eq!(segment.from.distance(&segment.to), 50.0);
		assert_eq!(segment.kind, EdgeKind::Arrow);
		assert_eq!(segment.label.as_deref(), Some("1"));

		session.toggle_weighted();
		let view = session.view();
		assert_eq!(edge_segments(&view).next().unwrap().label, None);
	}
}
