use std::fmt;

/// Interaction intent governing how gestures are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
	#[default]
	Select,
	AddNode,
	AddEdge,
	Pan,
}

impl Mode {
	pub const ALL: [Mode; 4] = [Mode::Select, Mode::AddNode, Mode::AddEdge, Mode::Pan];

	/// Toolbar caption.
	pub fn label(self) -> &'static str {
		match self {
			Mode::Select => "Select",
			Mode::AddNode => "Add vertex",
			Mode::AddEdge => "Add edge",
			Mode::Pan => "Pan",
		}
	}

	/// Canvas cursor while the mode is active.
	pub fn cursor(self) -> &'static str {
		match self {
			Mode::Select => "default",
			Mode::AddNode => "copy",
			Mode::AddEdge => "crosshair",
			Mode::Pan => "grab",
		}
	}
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Mode::Select => "select",
			Mode::AddNode => "addNode",
			Mode::AddEdge => "addEdge",
			Mode::Pan => "pan",
		};
		f.write_str(name)
	}
}
