use log::debug;
use uuid::Uuid;

use super::notice::{Notice, NoticeLevel, Notices};
use super::{Gesture, GestureOutcome, IoOp, Mode};
use crate::config::EditorConfig;
use crate::error::{GraphError, LifecycleError};
use crate::graph::{Edge, EdgeKind, Graph, Node, NodeId, Position, next_free_label};

/// Template applied to newly created nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeProperties {
	/// One-shot label override; cleared after the next node is created.
	pub label: String,
	pub color: String,
}

/// Template applied to newly created edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeProperties {
	pub weight: f64,
	pub color: String,
}

/// Read-only snapshot handed to rendering adapters.
#[derive(Clone, Copy, Debug)]
pub struct SessionView<'a> {
	pub graph: &'a Graph,
	pub mode: Mode,
	pub selected_node: Option<&'a str>,
	pub source_node: Option<&'a str>,
	pub is_loading: bool,
}

/// Plain summary of the session for toolbars and panels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStatus {
	pub mode: Mode,
	pub selected_label: Option<String>,
	pub selected_color: Option<String>,
	pub source_label: Option<String>,
	pub is_loading: bool,
	pub directed: bool,
	pub weighted: bool,
	pub graph_name: String,
	pub remote_id: Option<String>,
	pub node_label: String,
	pub node_color: String,
	pub edge_weight: f64,
	pub edge_color: String,
	pub node_count: usize,
	pub edge_count: usize,
}

/// The live editing context for one open graph.
///
/// Owns the graph exclusively; every mutation goes through here.
#[derive(Debug)]
pub struct EditorSession {
	graph: Graph,
	mode: Mode,
	selected_node: Option<NodeId>,
	source_node: Option<NodeId>,
	node_props: NodeProperties,
	edge_props: EdgeProperties,
	in_flight: Option<IoOp>,
	graph_name: String,
	remote_id: Option<String>,
	notices: Notices,
	config: EditorConfig,
}

impl EditorSession {
	/// An empty session configured from `config`.
	pub fn new(config: &EditorConfig) -> Self {
		Self {
			graph: Graph::new(config.directed, config.weighted),
			mode: Mode::default(),
			selected_node: None,
			source_node: None,
			node_props: NodeProperties {
				label: String::new(),
				color: config.node_color.clone(),
			},
			edge_props: EdgeProperties {
				weight: config.edge_weight,
				color: config.edge_color.clone(),
			},
			in_flight: None,
			graph_name: config.graph_name.clone(),
			remote_id: None,
			notices: Notices::default(),
			config: config.clone(),
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn selected_node(&self) -> Option<&str> {
		self.selected_node.as_deref()
	}

	pub fn source_node(&self) -> Option<&str> {
		self.source_node.as_deref()
	}

	/// Advisory flag: true while a load or save is in flight.
	pub fn is_loading(&self) -> bool {
		self.in_flight.is_some()
	}

	pub fn graph_name(&self) -> &str {
		&self.graph_name
	}

	/// Id of the graph in the remote store, once loaded or saved.
	pub fn remote_id(&self) -> Option<&str> {
		self.remote_id.as_deref()
	}

	pub fn node_properties(&self) -> &NodeProperties {
		&self.node_props
	}

	pub fn edge_properties(&self) -> &EdgeProperties {
		&self.edge_props
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	pub fn view(&self) -> SessionView<'_> {
		SessionView {
			graph: &self.graph,
			mode: self.mode,
			selected_node: self.selected_node(),
			source_node: self.source_node(),
			is_loading: self.is_loading(),
		}
	}

	pub fn status(&self) -> SessionStatus {
		let label_of = |id: Option<&str>| {
			id.and_then(|id| self.graph.node(id))
				.map(|n| n.label.clone())
		};
		SessionStatus {
			mode: self.mode,
			selected_label: label_of(self.selected_node()),
			selected_color: self
				.selected_node()
				.and_then(|id| self.graph.node(id))
				.map(|n| n.color.clone()),
			source_label: label_of(self.source_node()),
			is_loading: self.is_loading(),
			directed: self.graph.is_directed(),
			weighted: self.graph.is_weighted(),
			graph_name: self.graph_name.clone(),
			remote_id: self.remote_id.clone(),
			node_label: self.node_props.label.clone(),
			node_color: self.node_props.color.clone(),
			edge_weight: self.edge_props.weight,
			edge_color: self.edge_props.color.clone(),
			node_count: self.graph.nodes().len(),
			edge_count: self.graph.edges().len(),
		}
	}

	pub fn pending_notices(&self) -> &[Notice] {
		self.notices.pending()
	}

	/// Hands queued notices to the UI.
	pub fn drain_notices(&mut self) -> Vec<Notice> {
		self.notices.drain()
	}

	pub(crate) fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
		self.notices.push(level, message);
	}

	/// Switches mode; always drops any selection or half-made edge.
	pub fn set_mode(&mut self, mode: Mode) {
		debug!("mode {} -> {}", self.mode, mode);
		self.mode = mode;
		self.selected_node = None;
		self.source_node = None;
	}

	pub fn handle_gesture(&mut self, gesture: Gesture) -> GestureOutcome {
		match gesture {
			Gesture::CanvasClick(position) => self.on_canvas_click(position),
			Gesture::NodeClick(id) => self.on_node_click(&id),
			Gesture::NodeDrag(id, position) => self.on_node_drag(&id, position),
			Gesture::ModeChange(mode) => {
				self.set_mode(mode);
				GestureOutcome::ModeChanged(mode)
			}
		}
	}

	pub fn on_canvas_click(&mut self, position: Position) -> GestureOutcome {
		match self.mode {
			Mode::Select => {
				self.selected_node = None;
				self.source_node = None;
				GestureOutcome::SelectionChanged
			}
			Mode::AddNode => GestureOutcome::NodeCreated(self.create_node(position, None)),
			Mode::AddEdge | Mode::Pan => GestureOutcome::Ignored,
		}
	}

	pub fn on_node_click(&mut self, id: &str) -> GestureOutcome {
		if !self.graph.contains_node(id) {
			return GestureOutcome::Ignored;
		}
		match self.mode {
			Mode::Select => {
				self.selected_node = Some(id.to_string());
				GestureOutcome::SelectionChanged
			}
			Mode::AddEdge => match self.source_node.take() {
				None => {
					self.source_node = Some(id.to_string());
					GestureOutcome::SourcePicked(id.to_string())
				}
				Some(source) if source == id => {
					self.notify(
						NoticeLevel::Warning,
						"Pick a different vertex: self-loops are not supported.",
					);
					self.source_node = Some(source);
					GestureOutcome::EdgeRejected
				}
				Some(source) => {
					if self.create_edge(&source, id, None) {
						GestureOutcome::EdgeCreated
					} else {
						GestureOutcome::EdgeRejected
					}
				}
			},
			Mode::AddNode | Mode::Pan => GestureOutcome::Ignored,
		}
	}

	/// Drag updates only apply in select mode.
	pub fn on_node_drag(&mut self, id: &str, position: Position) -> GestureOutcome {
		if self.mode != Mode::Select || !self.move_node(id, position) {
			return GestureOutcome::Ignored;
		}
		GestureOutcome::NodeMoved
	}

	/// Repositions a node regardless of mode (layout strategies use this).
	pub fn move_node(&mut self, id: &str, position: Position) -> bool {
		self.graph.set_node_position(id, position).is_ok()
	}

	/// Adds a node at `position` and returns its fresh id.
	///
	/// Label precedence: explicit override, then the pending one-shot label,
	/// then the next free letter label.
	pub fn create_node(&mut self, position: Position, props: Option<NodeProperties>) -> NodeId {
		let id = self.fresh_node_id();
		let explicit = props
			.as_ref()
			.map(|p| p.label.trim())
			.filter(|l| !l.is_empty())
			.or_else(|| Some(self.node_props.label.trim()).filter(|l| !l.is_empty()))
			.map(str::to_string);
		let label = explicit.unwrap_or_else(|| next_free_label(self.graph.labels()));
		let color = props
			.map(|p| p.color)
			.filter(|c| !c.is_empty())
			.unwrap_or_else(|| self.node_props.color.clone());

		let node = Node {
			id: id.clone(),
			position,
			label: label.clone(),
			color,
			size: self.config.node_size,
		};
		match self.graph.add_node(node) {
			Ok(()) => self.notify(NoticeLevel::Success, format!("Vertex {} added.", label)),
			Err(err) => self.notify(NoticeLevel::Error, format!("Could not add vertex: {}", err)),
		}
		self.node_props.label.clear();
		id
	}

	fn fresh_node_id(&self) -> NodeId {
		loop {
			let id = Uuid::new_v4().simple().to_string();
			if !self.graph.contains_node(&id) {
				return id;
			}
		}
	}

	/// Removes `id` if it is the selected node, along with its edges.
	pub fn remove_node(&mut self, id: &str) -> bool {
		if self.selected_node() != Some(id) {
			return false;
		}
		match self.graph.remove_node(id) {
			Ok((node, dropped)) => {
				debug!("removed {} with {} incident edge(s)", node.id, dropped.len());
				self.selected_node = None;
				if self.source_node() == Some(id) {
					self.source_node = None;
				}
				self.notify(NoticeLevel::Success, format!("Vertex {} removed.", node.label));
				true
			}
			Err(err) => {
				self.selected_node = None;
				self.notify(NoticeLevel::Error, format!("Could not remove vertex: {}", err));
				false
			}
		}
	}

	pub fn remove_selected_node(&mut self) -> bool {
		match self.selected_node.clone() {
			Some(id) => self.remove_node(&id),
			None => false,
		}
	}

	/// Connects `source` to `target`; returns whether an edge was inserted.
	pub fn create_edge(&mut self, source: &str, target: &str, props: Option<EdgeProperties>) -> bool {
		let props = props.unwrap_or_else(|| self.edge_props.clone());
		let edge = Edge {
			source: source.to_string(),
			target: target.to_string(),
			weight: props.weight,
			color: props.color,
			kind: EdgeKind::for_directed(self.graph.is_directed()),
		};
		match self.graph.add_edge(edge) {
			Ok(()) => {
				let label = |id: &str| {
					self.graph
						.node(id)
						.map(|n| n.label.clone())
						.unwrap_or_default()
				};
				let message = format!("Edge {} -> {} added.", label(source), label(target));
				self.notify(NoticeLevel::Success, message);
				true
			}
			Err(GraphError::DuplicateEdge(..)) => {
				self.notify(NoticeLevel::Warning, "This edge already exists.");
				false
			}
			Err(GraphError::SelfLoop(_)) => {
				self.notify(NoticeLevel::Warning, "Self-loops are not supported.");
				false
			}
			Err(err) => {
				self.notify(NoticeLevel::Warning, format!("Edge not added: {}", err));
				false
			}
		}
	}

	/// Flips directedness without touching edges. Opposite pairs that now
	/// overlap are reported, since only one of each survives a reload.
	pub fn toggle_directed(&mut self) {
		let directed = !self.graph.is_directed();
		self.graph.set_directed(directed);
		debug!("directed = {}", directed);
		let overlapping = self.graph.reciprocal_pairs();
		if !directed && overlapping > 0 {
			self.notify(
				NoticeLevel::Warning,
				format!(
					"{} pair(s) of opposite edges now overlap; only one edge of each pair is kept when the graph is reloaded.",
					overlapping
				),
			);
		}
	}

	pub fn toggle_weighted(&mut self) {
		let weighted = !self.graph.is_weighted();
		self.graph.set_weighted(weighted);
		debug!("weighted = {}", weighted);
	}

	pub fn rename_graph(&mut self, name: &str) -> bool {
		let name = name.trim();
		if name.is_empty() {
			self.notify(NoticeLevel::Warning, "The graph name cannot be empty.");
			return false;
		}
		self.graph_name = name.to_string();
		true
	}

	pub fn set_pending_node_label(&mut self, label: &str) {
		self.node_props.label = label.trim().to_string();
	}

	pub fn set_pending_node_color(&mut self, color: &str) {
		self.node_props.color = color.to_string();
	}

	pub fn set_pending_edge_weight(&mut self, weight: f64) -> bool {
		if !weight.is_finite() {
			self.notify(NoticeLevel::Warning, "Edge weight must be a number.");
			return false;
		}
		self.edge_props.weight = weight;
		true
	}

	pub fn set_pending_edge_color(&mut self, color: &str) {
		self.edge_props.color = color.to_string();
	}

	/// Relabels and/or recolors the selected node.
	pub fn update_selected_node(&mut self, label: Option<&str>, color: Option<&str>) -> bool {
		let Some(id) = self.selected_node.clone() else {
			return false;
		};
		let label = label.map(str::trim);
		if label == Some("") {
			self.notify(NoticeLevel::Warning, "A vertex label cannot be empty.");
			return false;
		}
		self.graph
			.set_node_style(&id, label.map(str::to_string), color.map(str::to_string))
			.is_ok()
	}

	/// Discards the current structure and starts a new, unsaved graph.
	pub fn reset_graph(&mut self) {
		let graph = Graph::new(self.graph.is_directed(), self.graph.is_weighted());
		let name = self.config.graph_name.clone();
		self.install_graph(graph, name, None);
	}

	pub(crate) fn install_graph(&mut self, mut graph: Graph, name: String, remote_id: Option<String>) {
		graph.succeed(&self.graph);
		self.graph = graph;
		self.graph_name = name;
		self.remote_id = remote_id;
		self.selected_node = None;
		self.source_node = None;
	}

	pub(crate) fn set_remote_id(&mut self, id: String) {
		self.remote_id = Some(id);
	}

	/// Claims the single load/save slot.
	pub(crate) fn begin_io(&mut self, op: IoOp) -> Result<(), LifecycleError> {
		if let Some(current) = self.in_flight {
			self.notify(
				NoticeLevel::Warning,
				format!("Please wait: a {} is already in progress.", current),
			);
			return Err(LifecycleError::Busy(current));
		}
		debug!("{} started", op);
		self.in_flight = Some(op);
		Ok(())
	}

	pub(crate) fn finish_io(&mut self) {
		if let Some(op) = self.in_flight.take() {
			debug!("{} finished", op);
		}
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn session() -> EditorSession {
		EditorSession::new(&EditorConfig::default())
	}

	fn at(x: f64, y: f64) -> Position {
		Position::new(x, y)
	}

	fn id_of(session: &EditorSession, label: &str) -> NodeId {
		session.graph().node_by_label(label).unwrap().id.clone()
	}

	#[test]
	fn starts_in_select_mode_with_nothing_pending() {
		let s = session();
		assert_eq!(s.mode(), Mode::Select);
		assert_eq!(s.selected_node(), None);
		assert_eq!(s.source_node(), None);
		assert!(!s.is_loading());
	}

	#[test]
	fn basic_editing_scenario() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		let b = s.create_node(at(10.0, 10.0), None);
		assert_eq!(s.graph().node(&a).unwrap().label, "a");
		assert_eq!(s.graph().node(&b).unwrap().label, "b");

		assert!(s.create_edge(&a, &b, None));
		assert_eq!(s.graph().edge_pairs().len(), 1);
		assert!(!s.create_edge(&a, &b, None));
		assert_eq!(s.graph().edge_pairs().len(), 1);
		assert_eq!(
			s.pending_notices().last().map(|n| n.level),
			Some(NoticeLevel::Warning)
		);

		s.set_mode(Mode::Select);
		s.on_node_click(&a);
		assert!(s.remove_selected_node());
		assert!(s.graph().edges().is_empty());
		let ids: Vec<_> = s.graph().nodes().iter().map(|n| n.id.clone()).collect();
		assert_eq!(ids, vec![b]);
	}

	#[test]
	fn self_loops_always_fail() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		for mode in Mode::ALL {
			s.set_mode(mode);
			assert!(!s.create_edge(&a, &a, None));
		}
		assert!(s.graph().edges().is_empty());
	}

	#[rstest]
	fn mode_changes_clear_selection(
		#[values(Mode::Select, Mode::AddNode, Mode::AddEdge, Mode::Pan)] from: Mode,
		#[values(Mode::Select, Mode::AddNode, Mode::AddEdge, Mode::Pan)] to: Mode,
	) {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		s.set_mode(from);
		match from {
			Mode::AddEdge => {
				s.on_node_click(&a);
				assert!(s.source_node().is_some());
			}
			Mode::Select => {
				s.on_node_click(&a);
				assert!(s.selected_node().is_some());
			}
			_ => {}
		}
		assert_eq!(s.handle_gesture(Gesture::ModeChange(to)), GestureOutcome::ModeChanged(to));
		assert_eq!(s.mode(), to);
		assert_eq!(s.selected_node(), None);
		assert_eq!(s.source_node(), None);
	}

	#[rstest]
	#[case(Mode::Select, 0)]
	#[case(Mode::AddNode, 1)]
	#[case(Mode::AddEdge, 0)]
	#[case(Mode::Pan, 0)]
	fn canvas_click_by_mode(#[case] mode: Mode, #[case] created: usize) {
		let mut s = session();
		s.set_mode(mode);
		s.handle_gesture(Gesture::CanvasClick(at(4.0, 2.0)));
		assert_eq!(s.graph().nodes().len(), created);
		if created == 1 {
			assert_eq!(s.graph().nodes()[0].position, at(4.0, 2.0));
		}
	}

	#[test]
	fn canvas_click_in_select_clears_selection() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		s.on_node_click(&a);
		assert_eq!(s.selected_node(), Some(a.as_str()));
		s.on_canvas_click(at(50.0, 50.0));
		assert_eq!(s.selected_node(), None);
	}

	#[test]
	fn add_edge_mode_uses_two_clicks() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		let b = s.create_node(at(1.0, 0.0), None);
		s.set_mode(Mode::AddEdge);

		assert_eq!(s.on_node_click(&a), GestureOutcome::SourcePicked(a.clone()));
		assert_eq!(s.on_node_click(&b), GestureOutcome::EdgeCreated);
		assert_eq!(s.source_node(), None);
		assert!(s.graph().has_edge(&a, &b));

		// a failed second click still returns to awaiting the first endpoint
		s.on_node_click(&a);
		assert_eq!(s.on_node_click(&b), GestureOutcome::EdgeRejected);
		assert_eq!(s.source_node(), None);
		assert_eq!(s.graph().edges().len(), 1);
	}

	#[test]
	fn clicking_the_source_twice_keeps_it_pending() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		s.set_mode(Mode::AddEdge);
		s.on_node_click(&a);
		assert_eq!(s.on_node_click(&a), GestureOutcome::EdgeRejected);
		assert_eq!(s.source_node(), Some(a.as_str()));
		assert!(s.graph().edges().is_empty());
	}

	#[test]
	fn node_clicks_are_ignored_while_adding_nodes_or_panning() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		for mode in [Mode::AddNode, Mode::Pan] {
			s.set_mode(mode);
			assert_eq!(s.on_node_click(&a), GestureOutcome::Ignored);
			assert_eq!(s.selected_node(), None);
		}
	}

	#[test]
	fn dragging_moves_nodes_only_in_select_mode() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		assert_eq!(s.on_node_drag(&a, at(5.0, 6.0)), GestureOutcome::NodeMoved);
		assert_eq!(s.graph().node(&a).unwrap().position, at(5.0, 6.0));
		assert_eq!(s.mode(), Mode::Select);

		s.set_mode(Mode::Pan);
		assert_eq!(s.on_node_drag(&a, at(9.0, 9.0)), GestureOutcome::Ignored);
		assert_eq!(s.graph().node(&a).unwrap().position, at(5.0, 6.0));
	}

	#[test]
	fn pending_label_is_used_once() {
		let mut s = session();
		s.set_pending_node_label("Start");
		s.create_node(at(0.0, 0.0), None);
		s.create_node(at(1.0, 0.0), None);
		let labels: Vec<_> = s.graph().labels().collect();
		assert_eq!(labels, vec!["Start", "a"]);
		assert_eq!(s.node_properties().label, "");
	}

	#[test]
	fn generated_labels_skip_user_supplied_ones() {
		let mut s = session();
		let props = NodeProperties {
			label: "b".into(),
			color: "#ff0000".into(),
		};
		let b = s.create_node(at(0.0, 0.0), Some(props));
		assert_eq!(s.graph().node(&b).unwrap().color, "#ff0000");
		s.create_node(at(1.0, 0.0), None);
		s.create_node(at(2.0, 0.0), None);
		let labels: Vec<_> = s.graph().labels().collect();
		assert_eq!(labels, vec!["b", "a", "c"]);
	}

	#[test]
	fn remove_requires_the_node_to_be_selected() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		let b = s.create_node(at(1.0, 0.0), None);
		assert!(!s.remove_node(&a));
		assert!(!s.remove_selected_node());
		s.on_node_click(&b);
		assert!(!s.remove_node(&a));
		assert!(s.remove_node(&b));
		assert_eq!(s.selected_node(), None);
		assert_eq!(s.graph().nodes().len(), 1);
	}

	#[test]
	fn removing_a_hub_clears_all_its_edges() {
		let mut s = session();
		for i in 0..5 {
			s.create_node(at(i as f64, 0.0), None);
		}
		let hub = id_of(&s, "a");
		for label in ["b", "c", "d", "e"] {
			let other = id_of(&s, label);
			assert!(s.create_edge(&hub, &other, None));
			assert!(s.create_edge(&other, &hub, None));
		}
		let (b, c) = (id_of(&s, "b"), id_of(&s, "c"));
		assert!(s.create_edge(&b, &c, None));
		s.on_node_click(&hub);
		s.remove_selected_node();
		assert_eq!(s.graph().edges().len(), 1);
		assert!(s.graph().edges().iter().all(|e| !e.touches(&hub)));
	}

	#[test]
	fn toggles_flip_flags_and_keep_edges() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		let b = s.create_node(at(1.0, 0.0), None);
		s.create_edge(&a, &b, None);
		let pairs = s.graph().edge_pairs();

		s.toggle_directed();
		assert!(!s.status().directed);
		assert_eq!(s.graph().edges()[0].kind, EdgeKind::Line);
		s.toggle_directed();
		assert_eq!(s.graph().edges()[0].kind, EdgeKind::Arrow);
		assert_eq!(s.graph().edge_pairs(), pairs);

		s.toggle_weighted();
		assert!(!s.status().weighted);
		assert_eq!(s.graph().edges()[0].weight, 1.0);
	}

	#[test]
	fn edge_template_is_applied() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		let b = s.create_node(at(1.0, 0.0), None);
		assert!(s.set_pending_edge_weight(2.5));
		assert!(!s.set_pending_edge_weight(f64::NAN));
		s.set_pending_edge_color("#00ff00");
		s.create_edge(&a, &b, None);
		let edge = s.graph().edge(&a, &b).unwrap();
		assert_eq!(edge.weight, 2.5);
		assert_eq!(edge.color, "#00ff00");
		assert_eq!(edge.display_label(true).as_deref(), Some("2.5"));
	}

	#[test]
	fn rename_rejects_blank_names() {
		let mut s = session();
		assert!(!s.rename_graph("   "));
		assert_eq!(s.graph_name(), EditorConfig::default().graph_name);
		assert!(s.rename_graph(" Petersen "));
		assert_eq!(s.graph_name(), "Petersen");
	}

	#[test]
	fn selected_node_can_be_restyled() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		assert!(!s.update_selected_node(Some("x"), None));
		s.on_node_click(&a);
		assert!(!s.update_selected_node(Some(" "), None));
		assert!(s.update_selected_node(Some("root"), Some("#123456")));
		let status = s.status();
		assert_eq!(status.selected_label.as_deref(), Some("root"));
		assert_eq!(status.selected_color.as_deref(), Some("#123456"));
	}

	#[test]
	fn only_one_io_at_a_time() {
		let mut s = session();
		s.begin_io(IoOp::Load).unwrap();
		assert!(s.is_loading());
		assert!(matches!(
			s.begin_io(IoOp::Save),
			Err(LifecycleError::Busy(IoOp::Load))
		));
		s.finish_io();
		assert!(!s.is_loading());
		assert!(s.begin_io(IoOp::Save).is_ok());
	}

	#[test]
	fn notices_drain_once() {
		let mut s = session();
		s.create_node(at(0.0, 0.0), None);
		let drained = s.drain_notices();
		assert_eq!(drained.len(), 1);
		assert_eq!(drained[0].level, NoticeLevel::Success);
		assert!(s.drain_notices().is_empty());
	}

	#[test]
	fn reset_starts_a_new_unsaved_graph() {
		let mut s = session();
		s.create_node(at(0.0, 0.0), None);
		s.set_remote_id("g1".into());
		let before = s.graph().revision();
		s.reset_graph();
		assert!(s.graph().nodes().is_empty());
		assert_eq!(s.remote_id(), None);
		assert!(s.graph().revision() > before);
	}

	#[test]
	fn undirecting_opposite_edges_warns() {
		let mut s = session();
		let a = s.create_node(at(0.0, 0.0), None);
		let b = s.create_node(at(1.0, 0.0), None);
		s.create_edge(&a, &b, None);
		s.create_edge(&b, &a, None);
		s.drain_notices();

		s.toggle_directed();
		let notices = s.drain_notices();
		assert_eq!(notices.len(), 1);
		assert_eq!(notices[0].level, NoticeLevel::Warning);
		assert_eq!(s.graph().edges().len(), 2);

		s.toggle_directed();
		assert!(s.drain_notices().is_empty());
	}
}
