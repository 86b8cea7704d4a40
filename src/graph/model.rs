use std::collections::HashSet;

use crate::error::GraphError;

/// Stable node identifier.
pub type NodeId = String;

/// A point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(&self, other: &Position) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

/// How an edge is drawn; mirrors the graph's directed flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
	Arrow,
	Line,
}

impl EdgeKind {
	pub fn for_directed(directed: bool) -> Self {
		if directed { Self::Arrow } else { Self::Line }
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub position: Position,
	pub label: String,
	pub color: String,
	pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: NodeId,
	pub target: NodeId,
	pub weight: f64,
	pub color: String,
	pub kind: EdgeKind,
}

impl Edge {
	/// Label shown next to the edge; only weighted graphs display one.
	pub fn display_label(&self, weighted: bool) -> Option<String> {
		weighted.then(|| format!("{}", self.weight))
	}

	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	fn joins(&self, source: &str, target: &str, directed: bool) -> bool {
		(self.source == source && self.target == target)
			|| (!directed && self.source == target && self.target == source)
	}
}

/// In-memory graph edited by a session.
///
/// Nodes and edges keep insertion order so drawing and saving are stable.
/// Self-loops and parallel edges are rejected on insertion. Switching to
/// undirected keeps opposite edges added while the graph was directed; see
/// [`Graph::reciprocal_pairs`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	directed: bool,
	weighted: bool,
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	revision: u64,
}

impl Graph {
	pub fn new(directed: bool, weighted: bool) -> Self {
		Self {
			directed,
			weighted,
			..Self::default()
		}
	}

	pub fn is_directed(&self) -> bool {
		self.directed
	}

	pub fn is_weighted(&self) -> bool {
		self.weighted
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Bumped on every structural change (nodes or edges added/removed).
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Keeps revisions monotonic when this graph replaces `previous`.
	pub(crate) fn succeed(&mut self, previous: &Graph) {
		self.revision = self.revision.max(previous.revision + 1);
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	pub fn node_by_label(&self, label: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.label == label)
	}

	pub fn labels(&self) -> impl Iterator<Item = &str> {
		self.nodes.iter().map(|n| n.label.as_str())
	}

	pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
		if self.contains_node(&node.id) {
			return Err(GraphError::DuplicateNode(node.id));
		}
		self.nodes.push(node);
		self.revision += 1;
		Ok(())
	}

	/// Removes a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &str) -> Result<(Node, Vec<Edge>), GraphError> {
		let idx = self
			.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		let node = self.nodes.remove(idx);
		let (dropped, kept): (Vec<Edge>, Vec<Edge>) =
			std::mem::take(&mut self.edges).into_iter().partition(|e| e.touches(id));
		self.edges = kept;
		self.revision += 1;
		Ok((node, dropped))
	}

	pub fn set_node_position(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
		let node = self
			.node_mut(id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		node.position = position;
		Ok(())
	}

	pub fn set_node_style(
		&mut self,
		id: &str,
		label: Option<String>,
		color: Option<String>,
	) -> Result<(), GraphError> {
		let node = self
			.node_mut(id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		if let Some(label) = label {
			node.label = label;
		}
		if let Some(color) = color {
			node.color = color;
		}
		Ok(())
	}

	/// Whether an edge joins `source` and `target`; symmetric when undirected.
	pub fn has_edge(&self, source: &str, target: &str) -> bool {
		self.edge(source, target).is_some()
	}

	pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
		self.edges
			.iter()
			.find(|e| e.joins(source, target, self.directed))
	}

	/// Inserts an edge; its kind is rewritten to match the directed flag.
	pub fn add_edge(&mut self, mut edge: Edge) -> Result<(), GraphError> {
		if edge.source == edge.target {
			return Err(GraphError::SelfLoop(edge.source));
		}
		for id in [&edge.source, &edge.target] {
			if !self.contains_node(id) {
				return Err(GraphError::UnknownNode(id.clone()));
			}
		}
		if self.has_edge(&edge.source, &edge.target) {
			return Err(GraphError::DuplicateEdge(edge.source, edge.target));
		}
		edge.kind = EdgeKind::for_directed(self.directed);
		self.edges.push(edge);
		self.revision += 1;
		Ok(())
	}

	pub fn remove_edge(&mut self, source: &str, target: &str) -> Option<Edge> {
		let idx = self
			.edges
			.iter()
			.position(|e| e.joins(source, target, self.directed))?;
		self.revision += 1;
		Some(self.edges.remove(idx))
	}

	pub fn incident_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		self.edges.iter().filter(move |e| e.touches(id))
	}

	/// Flips directedness and rewrites every edge's kind; the edge set is untouched.
	pub fn set_directed(&mut self, directed: bool) {
		self.directed = directed;
		let kind = EdgeKind::for_directed(directed);
		for edge in &mut self.edges {
			edge.kind = kind;
		}
	}

	/// Weights are kept when weighting is switched off, only their labels hide.
	pub fn set_weighted(&mut self, weighted: bool) {
		self.weighted = weighted;
	}

	/// Number of a->b / b->a edge pairs, which overlap once the graph is undirected.
	pub fn reciprocal_pairs(&self) -> usize {
		self.edges
			.iter()
			.filter(|e| {
				e.source < e.target
					&& self
						.edges
						.iter()
						.any(|r| r.source == e.target && r.target == e.source)
			})
			.count()
	}

	pub fn edge_pairs(&self) -> HashSet<(NodeId, NodeId)> {
		self.edges
			.iter()
			.map(|e| (e.source.clone(), e.target.clone()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> Node {
		Node {
			id: id.into(),
			position: Position::default(),
			label: id.into(),
			color: "#000".into(),
			size: 10.0,
		}
	}

	fn edge(source: &str, target: &str) -> Edge {
		Edge {
			source: source.into(),
			target: target.into(),
			weight: 1.0,
			color: "#777".into(),
			kind: EdgeKind::Line,
		}
	}

	fn triangle(directed: bool) -> Graph {
		let mut graph = Graph::new(directed, true);
		for id in ["a", "b", "c"] {
			graph.add_node(node(id)).unwrap();
		}
		graph.add_edge(edge("a", "b")).unwrap();
		graph.add_edge(edge("b", "c")).unwrap();
		graph.add_edge(edge("c", "a")).unwrap();
		graph
	}

	#[test]
	fn duplicate_node_ids_are_rejected() {
		let mut graph = Graph::new(true, false);
		graph.add_node(node("a")).unwrap();
		assert_eq!(
			graph.add_node(node("a")),
			Err(GraphError::DuplicateNode("a".into()))
		);
		assert_eq!(graph.nodes().len(), 1);
	}

	#[test]
	fn edge_kind_follows_directed_flag_on_insert() {
		let graph = triangle(true);
		assert!(graph.edges().iter().all(|e| e.kind == EdgeKind::Arrow));
	}

	#[test]
	fn edge_preconditions() {
		let mut graph = triangle(true);
		assert_eq!(
			graph.add_edge(edge("a", "a")),
			Err(GraphError::SelfLoop("a".into()))
		);
		assert_eq!(
			graph.add_edge(edge("a", "zz")),
			Err(GraphError::UnknownNode("zz".into()))
		);
		assert_eq!(
			graph.add_edge(edge("a", "b")),
			Err(GraphError::DuplicateEdge("a".into(), "b".into()))
		);
		// reverse direction is a different ordered pair
		assert!(graph.add_edge(edge("b", "a")).is_ok());
		assert_eq!(graph.edges().len(), 4);
	}

	#[test]
	fn undirected_duplicates_are_symmetric() {
		let mut graph = triangle(false);
		assert!(graph.has_edge("b", "a"));
		assert!(graph.add_edge(edge("b", "a")).is_err());
	}

	#[test]
	fn removing_a_node_cascades_to_its_edges() {
		let mut graph = triangle(true);
		let (removed, dropped) = graph.remove_node("a").unwrap();
		assert_eq!(removed.id, "a");
		assert_eq!(dropped.len(), 2);
		assert!(graph.edges().iter().all(|e| !e.touches("a")));
		assert_eq!(graph.edge_pairs().len(), 1);
	}

	#[test]
	fn toggling_directed_preserves_edge_set() {
		let mut graph = triangle(true);
		let before = graph.edge_pairs();
		graph.set_directed(false);
		assert!(graph.edges().iter().all(|e| e.kind == EdgeKind::Line));
		graph.set_directed(true);
		assert!(graph.edges().iter().all(|e| e.kind == EdgeKind::Arrow));
		assert_eq!(graph.edge_pairs(), before);
	}

	#[test]
	fn weight_labels_come_back_after_toggling() {
		let mut graph = triangle(true);
		graph.set_weighted(false);
		assert_eq!(graph.edges()[0].display_label(graph.is_weighted()), None);
		graph.set_weighted(true);
		assert_eq!(
			graph.edges()[0].display_label(graph.is_weighted()).as_deref(),
			Some("1")
		);
	}

	#[test]
	fn revision_tracks_structure_only() {
		let mut graph = triangle(true);
		let rev = graph.revision();
		graph
			.set_node_position("a", Position::new(3.0, 4.0))
			.unwrap();
		assert_eq!(graph.revision(), rev);
		graph.remove_edge("a", "b");
		assert!(graph.revision() > rev);
	}

	#[test]
	fn opposite_edges_are_counted_once_per_pair() {
		let mut graph = triangle(true);
		assert_eq!(graph.reciprocal_pairs(), 0);
		graph.add_edge(edge("b", "a")).unwrap();
		graph.add_edge(edge("a", "c")).unwrap();
		assert_eq!(graph.reciprocal_pairs(), 2);
		graph.set_directed(false);
		assert_eq!(graph.reciprocal_pairs(), 2);
		assert_eq!(graph.edges().len(), 5);
	}
}
