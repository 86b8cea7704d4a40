use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::f64::consts::PI;

use super::{
	EdgeRecord, GraphInfo, GraphRecord, GraphStore, LayoutRecord, LayoutVertex, MetadataUpdate,
	NewGraph, VertexRecord,
};
use crate::error::StoreError;

/// [`GraphStore`] kept in process memory.
///
/// Layouts place vertices on the unit circle, like a remote `circular` layout.
/// Setting it offline makes every call fail with a transport error.
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
	graphs: RefCell<BTreeMap<String, GraphRecord>>,
	next_id: Cell<u64>,
	offline: Cell<bool>,
}

impl InMemoryGraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `record` as is, keeping its id.
	pub fn insert(&self, record: GraphRecord) {
		self.graphs.borrow_mut().insert(record.id.clone(), record);
	}

	pub fn graph(&self, id: &str) -> Option<GraphRecord> {
		self.graphs.borrow().get(id).cloned()
	}

	pub fn len(&self) -> usize {
		self.graphs.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn set_offline(&self, offline: bool) {
		self.offline.set(offline);
	}

	fn online(&self) -> Result<(), StoreError> {
		if self.offline.get() {
			return Err(StoreError::Transport("store is offline".into()));
		}
		Ok(())
	}

	fn with_graph<T>(
		&self,
		id: &str,
		f: impl FnOnce(&mut GraphRecord) -> Result<T, StoreError>,
	) -> Result<T, StoreError> {
		self.online()?;
		let mut graphs = self.graphs.borrow_mut();
		let graph = graphs
			.get_mut(id)
			.ok_or_else(|| StoreError::NotFound(id.to_string()))?;
		f(graph)
	}
}

impl GraphStore for InMemoryGraphStore {
	async fn get_graph(&self, id: &str) -> Result<GraphRecord, StoreError> {
		self.with_graph(id, |g| Ok(g.clone()))
	}

	async fn get_layout(
		&self,
		id: &str,
		algorithm: &str,
		include_attributes: bool,
	) -> Result<LayoutRecord, StoreError> {
		self.with_graph(id, |g| {
			let n = g.vertices.len().max(1) as f64;
			let vertices = g
				.vertices
				.iter()
				.enumerate()
				.map(|(i, v)| {
					let angle = i as f64 * 2.0 * PI / n;
					LayoutVertex {
						id: v.id.clone(),
						x: angle.cos(),
						y: angle.sin(),
						attributes: if include_attributes {
							v.attributes.clone()
						} else {
							Default::default()
						},
					}
				})
				.collect();
			Ok(LayoutRecord {
				vertices,
				edges: g.edges.clone(),
				layout: algorithm.to_string(),
			})
		})
	}

	async fn create_graph(&self, graph: &NewGraph) -> Result<GraphInfo, StoreError> {
		self.online()?;
		let id = self.next_id.get() + 1;
		self.next_id.set(id);
		let record = GraphRecord {
			id: format!("g{}", id),
			name: graph.name.clone(),
			directed: graph.directed,
			weighted: graph.weighted,
			vertices: graph.vertices.clone(),
			edges: graph.edges.clone(),
		};
		let info = GraphInfo {
			id: record.id.clone(),
			name: record.name.clone(),
			directed: record.directed,
			weighted: record.weighted,
		};
		self.insert(record);
		Ok(info)
	}

	async fn update_graph_metadata(&self, id: &str, update: &MetadataUpdate) -> Result<(), StoreError> {
		self.with_graph(id, |g| {
			if let Some(name) = &update.name {
				g.name = name.clone();
			}
			if let Some(directed) = update.directed {
				g.directed = directed;
			}
			if let Some(weighted) = update.weighted {
				g.weighted = weighted;
			}
			Ok(())
		})
	}

	async fn add_vertex(&self, graph_id: &str, vertex: &VertexRecord) -> Result<(), StoreError> {
		self.with_graph(graph_id, |g| {
			if g.vertices.iter().any(|v| v.id == vertex.id) {
				return Err(StoreError::Status(400));
			}
			g.vertices.push(vertex.clone());
			Ok(())
		})
	}

	async fn remove_vertex(&self, graph_id: &str, vertex_id: &str) -> Result<(), StoreError> {
		self.with_graph(graph_id, |g| {
			let before = g.vertices.len();
			g.vertices.retain(|v| v.id != vertex_id);
			if g.vertices.len() == before {
				return Err(StoreError::NotFound(vertex_id.to_string()));
			}
			g.edges
				.retain(|e| e.source != vertex_id && e.target != vertex_id);
			Ok(())
		})
	}

	async fn add_edge(&self, graph_id: &str, edge: &EdgeRecord) -> Result<(), StoreError> {
		self.with_graph(graph_id, |g| {
			let known = |id: &str| g.vertices.iter().any(|v| v.id == id);
			if !known(&edge.source) || !known(&edge.target) {
				return Err(StoreError::Status(400));
			}
			g.edges.push(edge.clone());
			Ok(())
		})
	}

	async fn remove_edge(&self, graph_id: &str, source: &str, target: &str) -> Result<(), StoreError> {
		self.with_graph(graph_id, |g| {
			let idx = g
				.edges
				.iter()
				.position(|e| e.source == source && e.target == target)
				.ok_or_else(|| StoreError::NotFound(format!("{}->{}", source, target)))?;
			g.edges.remove(idx);
			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	use pollster::block_on;

	use super::*;

	fn vertex(id: &str) -> VertexRecord {
		VertexRecord {
			id: id.into(),
			..VertexRecord::default()
		}
	}

	fn edge(source: &str, target: &str) -> EdgeRecord {
		EdgeRecord {
			source: source.into(),
			target: target.into(),
			weight: Some(1.0),
			..EdgeRecord::default()
		}
	}

	#[test]
	fn created_graphs_get_fresh_ids() {
		let store = InMemoryGraphStore::new();
		let first = block_on(store.create_graph(&NewGraph::default())).unwrap();
		let second = block_on(store.create_graph(&NewGraph::default())).unwrap();
		assert_ne!(first.id, second.id);
		assert_eq!(store.len(), 2);
	}

	#[test]
	fn removing_a_vertex_drops_its_edges() {
		let store = InMemoryGraphStore::new();
		let info = block_on(store.create_graph(&NewGraph {
			vertices: vec![vertex("a"), vertex("b")],
			edges: vec![edge("a", "b")],
			..NewGraph::default()
		}))
		.unwrap();
		block_on(store.remove_vertex(&info.id, "a")).unwrap();
		let stored = store.graph(&info.id).unwrap();
		assert_eq!(stored.vertices.len(), 1);
		assert!(stored.edges.is_empty());
		assert!(matches!(
			block_on(store.remove_edge(&info.id, "a", "b")),
			Err(StoreError::NotFound(_))
		));
	}

	#[test]
	fn layout_covers_every_vertex() {
		let store = InMemoryGraphStore::new();
		store.insert(GraphRecord {
			id: "g".into(),
			vertices: vec![vertex("a"), vertex("b"), vertex("c")],
			..GraphRecord::default()
		});
		let layout = block_on(store.get_layout("g", "circular", true)).unwrap();
		assert_eq!(layout.vertices.len(), 3);
		assert!(
			layout
				.vertices
				.iter()
				.all(|v| (v.x.hypot(v.y) - 1.0).abs() < 1e-9)
		);
	}

	#[test]
	fn offline_store_fails_every_call() {
		let store = InMemoryGraphStore::new();
		store.set_offline(true);
		assert!(matches!(
			block_on(store.create_graph(&NewGraph::default())),
			Err(StoreError::Transport(_))
		));
		assert!(store.is_empty());
	}
}
