mod component;
mod notices;
mod render;
mod sidebar;
mod state;
mod toolbar;

pub use component::GraphEditor;
