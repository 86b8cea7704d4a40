use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{
	EdgeRecord, GraphInfo, GraphRecord, GraphStore, LayoutRecord, MetadataUpdate, NewGraph,
	VertexRecord,
};
use crate::config::EditorConfig;
use crate::error::StoreError;

const SESSION_KEY: &str = "graph-session-id";
const API_PREFIX: &str = "/api/v1";

/// [`GraphStore`] backed by the graph REST API through the browser's `fetch`.
#[derive(Clone, Debug)]
pub struct HttpGraphStore {
	base_url: String,
	session_id: String,
}

impl HttpGraphStore {
	pub fn new(config: &EditorConfig) -> Self {
		Self {
			base_url: config.api_base_url.clone(),
			session_id: browser_session_id(),
		}
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}{}", self.base_url, API_PREFIX, path)
	}

	async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<String, StoreError> {
		let url = self.url(path);
		debug!("{} {}", method, url);

		let init = RequestInit::new();
		init.set_method(method);
		init.set_mode(RequestMode::Cors);
		if let Some(body) = body {
			init.set_body(&JsValue::from_str(&body));
		}
		let request = Request::new_with_str_and_init(&url, &init).map_err(StoreError::from_js)?;
		let headers = request.headers();
		headers
			.set("Content-Type", "application/json")
			.map_err(StoreError::from_js)?;
		headers
			.set("X-Session-ID", &self.session_id)
			.map_err(StoreError::from_js)?;

		let window = web_sys::window().ok_or(StoreError::NoWindow)?;
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(StoreError::from_js)?
			.dyn_into()
			.map_err(StoreError::from_js)?;

		match response.status() {
			404 => return Err(StoreError::NotFound(path.to_string())),
			status if !response.ok() => return Err(StoreError::Status(status)),
			_ => {}
		}
		let text = JsFuture::from(response.text().map_err(StoreError::from_js)?)
			.await
			.map_err(StoreError::from_js)?;
		Ok(text.as_string().unwrap_or_default())
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
		let text = self.send("GET", path, None).await?;
		Ok(serde_json::from_str(&text)?)
	}

	async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, StoreError> {
		let text = self.send("POST", path, Some(serde_json::to_string(body)?)).await?;
		Ok(serde_json::from_str(&text)?)
	}

	/// Sends a body and discards whatever comes back.
	async fn call<B: Serialize>(&self, method: &str, path: &str, body: Option<&B>) -> Result<(), StoreError> {
		let body = body.map(serde_json::to_string).transpose()?;
		self.send(method, path, body).await.map(|_| ())
	}
}

impl GraphStore for HttpGraphStore {
	async fn get_graph(&self, id: &str) -> Result<GraphRecord, StoreError> {
		self.get(&format!("/grafos/{}", segment(id))).await
	}

	async fn get_layout(
		&self,
		id: &str,
		algorithm: &str,
		include_attributes: bool,
	) -> Result<LayoutRecord, StoreError> {
		self.get(&format!(
			"/visualizacao/{}?layout={}&incluir_atributos={}",
			segment(id),
			segment(algorithm),
			include_attributes
		))
		.await
	}

	async fn create_graph(&self, graph: &NewGraph) -> Result<GraphInfo, StoreError> {
		self.post("/grafos/", graph).await
	}

	async fn update_graph_metadata(&self, id: &str, update: &MetadataUpdate) -> Result<(), StoreError> {
		self.call("PUT", &format!("/grafos/{}", segment(id)), Some(update)).await
	}

	async fn add_vertex(&self, graph_id: &str, vertex: &VertexRecord) -> Result<(), StoreError> {
		self.call("POST", &format!("/grafos/{}/vertices", segment(graph_id)), Some(vertex))
			.await
	}

	async fn remove_vertex(&self, graph_id: &str, vertex_id: &str) -> Result<(), StoreError> {
		self.call::<()>("DELETE", &format!("/grafos/{}/vertices/{}", segment(graph_id), segment(vertex_id)), None)
			.await
	}

	async fn add_edge(&self, graph_id: &str, edge: &EdgeRecord) -> Result<(), StoreError> {
		self.call("POST", &format!("/grafos/{}/arestas", segment(graph_id)), Some(edge))
			.await
	}

	async fn remove_edge(&self, graph_id: &str, source: &str, target: &str) -> Result<(), StoreError> {
		self.call::<()>(
			"DELETE",
			&format!(
				"/grafos/{}/arestas/{}/{}",
				segment(graph_id),
				segment(source),
				segment(target)
			),
			None,
		)
		.await
	}
}

/// Percent-encodes an id so it stays a single path segment.
fn segment(raw: &str) -> String {
	js_sys::encode_uri_component(raw).into()
}

/// Per-browser id the API uses to scope graphs, kept in local storage.
fn browser_session_id() -> String {
	let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
	if let Some(id) = storage
		.as_ref()
		.and_then(|s| s.get_item(SESSION_KEY).ok().flatten())
	{
		return id;
	}
	let id = Uuid::new_v4().to_string();
	if let Some(storage) = storage {
		let _ = storage.set_item(SESSION_KEY, &id);
	}
	id
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::wasm_bindgen_test;

	use super::*;

	fn store() -> HttpGraphStore {
		HttpGraphStore {
			base_url: "http://api".into(),
			session_id: "s".into(),
		}
	}

	#[wasm_bindgen_test]
	fn ids_stay_inside_their_path_segment() {
		assert_eq!(segment("a/b?c#d"), "a%2Fb%3Fc%23d");
		assert_eq!(segment("42"), "42");
		let url = store().url(&format!("/grafos/{}/vertices/{}", segment("g1"), segment("x/y")));
		assert_eq!(url, "http://api/api/v1/grafos/g1/vertices/x%2Fy");
	}
}

