//! Optional automatic layout, swappable behind [`LayoutStrategy`].
//!
//! Strategies only propose positions; the caller applies them through the
//! session so the graph keeps a single writer.

use std::collections::HashMap;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::graph::{NodeId, Position};
use crate::session::SessionView;

pub trait LayoutStrategy {
	/// Advances the layout by `dt` seconds and returns the nodes it moved.
	fn step(&mut self, view: &SessionView<'_>, dt: f32) -> Vec<(NodeId, Position)>;

	/// Holds a node where the user put it.
	fn pin(&mut self, _id: &str, _position: Position) {}
}

/// Leaves every node where it is.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticLayout;

impl LayoutStrategy for StaticLayout {
	fn step(&mut self, _view: &SessionView<'_>, _dt: f32) -> Vec<(NodeId, Position)> {
		Vec::new()
	}
}

/// Force-directed layout; the simulation is rebuilt whenever the graph's
/// structure changes.
pub struct ForceLayout {
	sim: ForceGraph<NodeId, ()>,
	revision: Option<u64>,
	pinned: HashMap<NodeId, Position>,
}

impl Default for ForceLayout {
	fn default() -> Self {
		Self {
			sim: ForceGraph::new(Self::parameters()),
			revision: None,
			pinned: HashMap::new(),
		}
	}
}

impl ForceLayout {
	pub fn new() -> Self {
		Self::default()
	}

	fn parameters() -> SimulationParameters {
		SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}

	fn rebuild(&mut self, view: &SessionView<'_>) {
		let graph = view.graph;
		self.pinned.retain(|id, _| graph.contains_node(id));
		let mut sim = ForceGraph::new(Self::parameters());
		let mut index = HashMap::new();
		for node in graph.nodes() {
			let pinned = self.pinned.get(&node.id);
			let position = pinned.copied().unwrap_or(node.position);
			let idx = sim.add_node(NodeData {
				x: position.x as f32,
				y: position.y as f32,
				mass: 10.0,
				is_anchor: pinned.is_some(),
				user_data: node.id.clone(),
			});
			index.insert(node.id.as_str(), idx);
		}
		for edge in graph.edges() {
			if let (Some(&src), Some(&tgt)) =
				(index.get(edge.source.as_str()), index.get(edge.target.as_str()))
			{
				sim.add_edge(src, tgt, EdgeData::default());
			}
		}
		debug!(
			"force layout rebuilt with {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);
		self.sim = sim;
		self.revision = Some(graph.revision());
	}
}

impl LayoutStrategy for ForceLayout {
	fn step(&mut self, view: &SessionView<'_>, dt: f32) -> Vec<(NodeId, Position)> {
		if self.revision != Some(view.graph.revision()) {
			self.rebuild(view);
		}
		self.sim.update(dt);
		let mut moved = Vec::new();
		self.sim.visit_nodes(|node| {
			if !node.data.is_anchor {
				moved.push((
					node.data.user_data.clone(),
					Position::new(node.x() as f64, node.y() as f64),
				));
			}
		});
		moved
	}

	fn pin(&mut self, id: &str, position: Position) {
		self.pinned.insert(id.to_string(), position);
		self.sim.visit_nodes_mut(|node| {
			if node.data.user_data == id {
				node.data.x = position.x as f32;
				node.data.y = position.y as f32;
				node.data.is_anchor = true;
			}
		});
	}
}
