//! Editor configuration.

/// Base URL used when `GRAPH_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://api-grafos:8010";

/// Tunables shared by the session, the store client and the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// Root of the remote graph API, without a trailing slash.
	pub api_base_url: String,
	/// Layout the store is asked for when a graph is loaded.
	pub layout_algorithm: String,
	/// Remote layouts live in [-1, 1]; loaded positions are multiplied by this.
	pub layout_scale: f64,
	pub node_color: String,
	pub edge_color: String,
	/// Size given to nodes created on the canvas.
	pub node_size: f64,
	/// Size given to nodes coming from the store.
	pub loaded_node_size: f64,
	pub edge_weight: f64,
	pub graph_name: String,
	pub directed: bool,
	pub weighted: bool,
	/// How long a notice stays on screen.
	pub notice_ttl_ms: u64,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			api_base_url: DEFAULT_API_URL.into(),
			layout_algorithm: "spring".into(),
			layout_scale: 250.0,
			node_color: "#1E88E5".into(),
			edge_color: "#757575".into(),
			node_size: 15.0,
			loaded_node_size: 10.0,
			edge_weight: 1.0,
			graph_name: "Visual graph".into(),
			directed: true,
			weighted: true,
			notice_ttl_ms: 4000,
		}
	}
}

impl EditorConfig {
	/// Defaults, with the API URL overridden by `GRAPH_API_URL` at compile time.
	pub fn from_env() -> Self {
		Self::default().with_api_url(option_env!("GRAPH_API_URL"))
	}

	fn with_api_url(mut self, url: Option<&str>) -> Self {
		if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
			self.api_base_url = url.trim_end_matches('/').to_string();
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_editor_palette() {
		let config = EditorConfig::default();
		assert_eq!(config.api_base_url, DEFAULT_API_URL);
		assert_eq!(config.layout_algorithm, "spring");
		assert_eq!(config.edge_weight, 1.0);
		assert!(config.directed && config.weighted);
	}

	#[test]
	fn api_url_override_drops_trailing_slash() {
		let config = EditorConfig::default().with_api_url(Some("https://graphs.test/ "));
		assert_eq!(config.api_base_url, "https://graphs.test");
	}

	#[test]
	fn blank_override_keeps_default() {
		let config = EditorConfig::default().with_api_url(Some("  "));
		assert_eq!(config.api_base_url, DEFAULT_API_URL);
	}
}
