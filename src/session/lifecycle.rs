use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use serde_json::Value;

use super::EditorSession;
use super::notice::NoticeLevel;
use crate::config::EditorConfig;
use crate::error::{LifecycleError, StoreError};
use crate::graph::{Edge, EdgeKind, Graph, Node, Position};
use crate::store::{
	Attributes, COLOR_ATTR, EdgeRecord, GraphRecord, GraphStore, LABEL_ATTR, LayoutRecord,
	MetadataUpdate, NewGraph, VertexRecord,
};

/// The two requests a session makes against the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOp {
	Load,
	Save,
}

impl fmt::Display for IoOp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			IoOp::Load => "load",
			IoOp::Save => "save",
		})
	}
}

/// Cleared when the view owning a session goes away.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
	fn default() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}
}

impl Liveness {
	pub fn is_active(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	pub fn dispose(&self) {
		self.0.store(false, Ordering::Release);
	}
}

/// What a successful load produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
	pub nodes: usize,
	pub edges: usize,
	/// Remote edges skipped because an endpoint was missing (or they were loops/duplicates).
	pub dropped_edges: usize,
}

/// Shared handle to a session: the single writer for UI callbacks and async I/O.
#[derive(Clone, Debug)]
pub struct SessionHandle {
	session: Rc<RefCell<EditorSession>>,
	liveness: Liveness,
}

/// Releases the load/save slot however the request ends.
struct InFlight<'a>(&'a SessionHandle);

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		if !self.0.liveness.is_active() {
			return;
		}
		if let Ok(mut session) = self.0.session.try_borrow_mut() {
			session.finish_io();
		}
	}
}

impl SessionHandle {
	pub fn new(session: EditorSession) -> Self {
		Self {
			session: Rc::new(RefCell::new(session)),
			liveness: Liveness::default(),
		}
	}

	pub fn with<R>(&self, f: impl FnOnce(&EditorSession) -> R) -> R {
		f(&self.session.borrow())
	}

	pub fn with_mut<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
		f(&mut self.session.borrow_mut())
	}

	pub fn liveness(&self) -> Liveness {
		self.liveness.clone()
	}

	pub fn is_active(&self) -> bool {
		self.liveness.is_active()
	}

	/// Marks the session as torn down; pending completions will not touch it.
	pub fn dispose(&self) {
		debug!("session disposed");
		self.liveness.dispose();
	}

	/// Replaces the graph with the stored graph `id`.
	///
	/// On a store failure the session falls back to an empty graph and the
	/// error is returned after the notice has been raised.
	pub async fn load_graph<S: GraphStore>(&self, store: &S, id: &str) -> Result<LoadReport, LifecycleError> {
		if !self.is_active() {
			return Err(LifecycleError::Disposed);
		}
		let config = {
			let mut session = self.session.borrow_mut();
			session.begin_io(IoOp::Load)?;
			session.config().clone()
		};
		let _io = InFlight(self);
		info!("loading graph {}", id);

		let fetched = fetch(store, id, &config).await;
		if !self.is_active() {
			debug!("dropping load result for {}", id);
			return Err(LifecycleError::Disposed);
		}

		let mut session = self.session.borrow_mut();
		match fetched {
			Ok((record, layout)) => {
				let (graph, report) = build_graph(&record, &layout, &config);
				if report.dropped_edges > 0 {
					warn!("graph {}: skipped {} malformed edge(s)", id, report.dropped_edges);
				}
				let name = Some(record.name)
					.filter(|n| !n.trim().is_empty())
					.unwrap_or_else(|| config.graph_name.clone());
				session.install_graph(graph, name, Some(id.to_string()));
				info!("graph {} loaded ({} nodes, {} edges)", id, report.nodes, report.edges);
				Ok(report)
			}
			Err(err) => {
				session.notify(NoticeLevel::Error, format!("Could not load the graph: {}", err));
				let graph = Graph::new(session.graph().is_directed(), session.graph().is_weighted());
				session.install_graph(graph, config.graph_name.clone(), None);
				Err(err.into())
			}
		}
	}

	/// Persists the whole graph; creates it remotely the first time.
	///
	/// `on_saved` receives the remote id after a successful save. A failure
	/// leaves the in-memory graph untouched.
	pub async fn save_graph<S: GraphStore>(
		&self,
		store: &S,
		on_saved: impl FnOnce(&str),
	) -> Result<String, LifecycleError> {
		if !self.is_active() {
			return Err(LifecycleError::Disposed);
		}
		let (payload, remote_id) = {
			let mut session = self.session.borrow_mut();
			session.begin_io(IoOp::Save)?;
			(serialize(&session), session.remote_id().map(str::to_string))
		};
		let _io = InFlight(self);
		info!(
			"saving graph {} ({} vertices, {} edges)",
			remote_id.as_deref().unwrap_or("<new>"),
			payload.vertices.len(),
			payload.edges.len()
		);

		let result = match remote_id {
			Some(id) => replace_remote(store, &id, &payload).await.map(|()| id),
			None => store.create_graph(&payload).await.map(|info| info.id),
		};
		if !self.is_active() {
			debug!("dropping save result");
			return Err(LifecycleError::Disposed);
		}

		let saved = {
			let mut session = self.session.borrow_mut();
			match result {
				Ok(id) => {
					session.set_remote_id(id.clone());
					session.notify(NoticeLevel::Success, "Graph saved.");
					Ok(id)
				}
				Err(err) => {
					session.notify(NoticeLevel::Error, format!("Could not save the graph: {}", err));
					Err(err)
				}
			}
		};
		let id = saved?;
		on_saved(&id);
		Ok(id)
	}
}

async fn fetch<S: GraphStore>(
	store: &S,
	id: &str,
	config: &EditorConfig,
) -> Result<(GraphRecord, LayoutRecord), StoreError> {
	let record = store.get_graph(id).await?;
	let layout = store
		.get_layout(id, &config.layout_algorithm, true)
		.await?;
	Ok((record, layout))
}

/// The store has no incremental diff, so the remote graph is replaced wholesale.
async fn replace_remote<S: GraphStore>(store: &S, id: &str, payload: &NewGraph) -> Result<(), StoreError> {
	let update = MetadataUpdate {
		name: Some(payload.name.clone()),
		directed: Some(payload.directed),
		weighted: Some(payload.weighted),
	};
	store.update_graph_metadata(id, &update).await?;

	let remote = store.get_graph(id).await?;
	for edge in &remote.edges {
		if let Err(err) = store.remove_edge(id, &edge.source, &edge.target).await {
			debug!("ignoring edge removal {}->{}: {}", edge.source, edge.target, err);
		}
	}
	for vertex in &remote.vertices {
		store.remove_vertex(id, &vertex.id).await?;
	}
	for vertex in &payload.vertices {
		store.add_vertex(id, vertex).await?;
	}
	for edge in &payload.edges {
		store.add_edge(id, edge).await?;
	}
	Ok(())
}

fn serialize(session: &EditorSession) -> NewGraph {
	let graph = session.graph();
	let vertices = graph
		.nodes()
		.iter()
		.map(|node| {
			let mut attributes = Attributes::new();
			attributes.insert(LABEL_ATTR.into(), Value::from(node.label.clone()));
			attributes.insert(COLOR_ATTR.into(), Value::from(node.color.clone()));
			VertexRecord {
				id: node.id.clone(),
				attributes,
			}
		})
		.collect();
	let edges = graph
		.edges()
		.iter()
		.map(|edge| {
			let mut attributes = Attributes::new();
			attributes.insert(COLOR_ATTR.into(), Value::from(edge.color.clone()));
			EdgeRecord {
				source: edge.source.clone(),
				target: edge.target.clone(),
				weight: Some(edge.weight),
				attributes,
			}
		})
		.collect();
	NewGraph {
		name: session.graph_name().to_string(),
		directed: graph.is_directed(),
		weighted: graph.is_weighted(),
		vertices,
		edges,
	}
}

fn string_attr(attributes: &Attributes, key: &str) -> Option<String> {
	attributes
		.get(key)
		.and_then(Value::as_str)
		.filter(|s| !s.is_empty())
		.map(str::to_string)
}

fn build_graph(record: &GraphRecord, layout: &LayoutRecord, config: &EditorConfig) -> (Graph, LoadReport) {
	let scale = config.layout_scale;
	let positions: HashMap<&str, Position> = layout
		.vertices
		.iter()
		.map(|v| (v.id.as_str(), Position::new(v.x * scale, v.y * scale)))
		.collect();
	let count = record.vertices.len().max(1) as f64;

	let mut graph = Graph::new(record.directed, record.weighted);
	for (i, vertex) in record.vertices.iter().enumerate() {
		let position = positions
			.get(vertex.id.as_str())
			.copied()
			.unwrap_or_else(|| {
				let angle = i as f64 * 2.0 * PI / count;
				Position::new(scale * angle.cos(), scale * angle.sin())
			});
		let node = Node {
			id: vertex.id.clone(),
			position,
			label: string_attr(&vertex.attributes, LABEL_ATTR).unwrap_or_else(|| vertex.id.clone()),
			color: string_attr(&vertex.attributes, COLOR_ATTR)
				.unwrap_or_else(|| config.node_color.clone()),
			size: config.loaded_node_size,
		};
		if let Err(err) = graph.add_node(node) {
			debug!("skipping vertex: {}", err);
		}
	}

	let mut dropped_edges = 0;
	for remote in &record.edges {
		let weight = remote
			.weight
			.or_else(|| remote.attributes.get("weight").and_then(Value::as_f64))
			.unwrap_or(config.edge_weight);
		let edge = Edge {
			source: remote.source.clone(),
			target: remote.target.clone(),
			weight,
			color: string_attr(&remote.attributes, COLOR_ATTR)
				.unwrap_or_else(|| config.edge_color.clone()),
			kind: EdgeKind::for_directed(graph.is_directed()),
		};
		if let Err(err) = graph.add_edge(edge) {
			debug!("skipping edge {}->{}: {}", remote.source, remote.target, err);
			dropped_edges += 1;
		}
	}

	let report = LoadReport {
		nodes: graph.nodes().len(),
		edges: graph.edges().len(),
		dropped_edges,
	};
	(graph, report)
}
