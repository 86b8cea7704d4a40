//! Contract with the remote graph store and its wire records.
//!
//! Field names follow the remote API, so the Rust names are mapped with
//! `serde(rename)`.

mod http;
mod memory;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use http::HttpGraphStore;
pub use memory::InMemoryGraphStore;

use crate::error::StoreError;

/// Free-form attribute bag attached to vertices and edges.
pub type Attributes = Map<String, Value>;

/// Attribute key holding a vertex's display label.
pub const LABEL_ATTR: &str = "label";
/// Attribute key holding a display color.
pub const COLOR_ATTR: &str = "cor";

/// Remote ids are untyped; integer ids (e.g. from imported graphs) are kept as text.
fn remote_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	match Value::deserialize(deserializer)? {
		Value::String(id) => Ok(id),
		Value::Number(id) => Ok(id.to_string()),
		other => Err(serde::de::Error::custom(format!(
			"expected a string or numeric id, found {}",
			other
		))),
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
	#[serde(deserialize_with = "remote_id")]
	pub id: String,
	#[serde(rename = "atributos", default)]
	pub attributes: Attributes,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	#[serde(rename = "origem", deserialize_with = "remote_id")]
	pub source: String,
	#[serde(rename = "destino", deserialize_with = "remote_id")]
	pub target: String,
	#[serde(rename = "peso", default, skip_serializing_if = "Option::is_none")]
	pub weight: Option<f64>,
	#[serde(rename = "atributos", default)]
	pub attributes: Attributes,
}

/// A stored graph with its full vertex and edge lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
	pub id: String,
	#[serde(rename = "nome", default)]
	pub name: String,
	#[serde(rename = "direcionado", default)]
	pub directed: bool,
	#[serde(rename = "ponderado", default)]
	pub weighted: bool,
	#[serde(default)]
	pub vertices: Vec<VertexRecord>,
	#[serde(rename = "arestas", default)]
	pub edges: Vec<EdgeRecord>,
}

/// Summary returned when a graph is created.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInfo {
	pub id: String,
	#[serde(rename = "nome", default)]
	pub name: String,
	#[serde(rename = "direcionado", default)]
	pub directed: bool,
	#[serde(rename = "ponderado", default)]
	pub weighted: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGraph {
	#[serde(rename = "nome")]
	pub name: String,
	#[serde(rename = "direcionado")]
	pub directed: bool,
	#[serde(rename = "ponderado")]
	pub weighted: bool,
	pub vertices: Vec<VertexRecord>,
	#[serde(rename = "arestas")]
	pub edges: Vec<EdgeRecord>,
}

/// Partial metadata update; `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataUpdate {
	#[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(rename = "direcionado", skip_serializing_if = "Option::is_none")]
	pub directed: Option<bool>,
	#[serde(rename = "ponderado", skip_serializing_if = "Option::is_none")]
	pub weighted: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutVertex {
	#[serde(deserialize_with = "remote_id")]
	pub id: String,
	pub x: f64,
	pub y: f64,
	#[serde(rename = "atributos", default)]
	pub attributes: Attributes,
}

/// Node positions computed by the store for one layout algorithm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
	#[serde(default)]
	pub vertices: Vec<LayoutVertex>,
	#[serde(rename = "arestas", default)]
	pub edges: Vec<EdgeRecord>,
	#[serde(default)]
	pub layout: String,
}

/// Operations the editing session needs from the remote store.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
	async fn get_graph(&self, id: &str) -> Result<GraphRecord, StoreError>;

	async fn get_layout(
		&self,
		id: &str,
		algorithm: &str,
		include_attributes: bool,
	) -> Result<LayoutRecord, StoreError>;

	async fn create_graph(&self, graph: &NewGraph) -> Result<GraphInfo, StoreError>;

	async fn update_graph_metadata(&self, id: &str, update: &MetadataUpdate) -> Result<(), StoreError>;

	async fn add_vertex(&self, graph_id: &str, vertex: &VertexRecord) -> Result<(), StoreError>;

	async fn remove_vertex(&self, graph_id: &str, vertex_id: &str) -> Result<(), StoreError>;

	async fn add_edge(&self, graph_id: &str, edge: &EdgeRecord) -> Result<(), StoreError>;

	async fn remove_edge(&self, graph_id: &str, source: &str, target: &str) -> Result<(), StoreError>;
}
