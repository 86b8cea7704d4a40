//! Error types shared by the graph model, the remote store and the session lifecycle.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

use crate::session::IoOp;

/// Structural violations rejected by [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("node `{0}` already exists")]
	DuplicateNode(String),
	#[error("node `{0}` does not exist")]
	UnknownNode(String),
	#[error("self-loops are not allowed (`{0}`)")]
	SelfLoop(String),
	#[error("edge `{0}` -> `{1}` already exists")]
	DuplicateEdge(String, String),
}

/// Failures talking to the remote graph store.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("request failed: {0}")]
	Transport(String),
	#[error("server responded with status {0}")]
	Status(u16),
	#[error("not found: {0}")]
	NotFound(String),
	#[error("malformed payload: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("browser window is unavailable")]
	NoWindow,
}

impl StoreError {
	pub(crate) fn from_js(value: JsValue) -> Self {
		let message = match value.dyn_ref::<js_sys::Error>() {
			Some(err) => String::from(err.message()),
			None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
		};
		Self::Transport(message)
	}
}

/// Outcome of a load/save that did not complete normally.
///
/// By the time one of these is returned the session has already raised a
/// notice and fallen back to a safe state.
#[derive(Debug, Error)]
pub enum LifecycleError {
	#[error("another {0} is already in flight")]
	Busy(IoOp),
	#[error("session was disposed before the request completed")]
	Disposed,
	#[error(transparent)]
	Store(#[from] StoreError),
}
