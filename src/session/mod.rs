//! Editing session: interaction modes, selection, mutations and the
//! load/save lifecycle against the remote store.

mod gesture;
mod lifecycle;
mod mode;
mod notice;
mod state;

pub use gesture::{Gesture, GestureOutcome};
pub use lifecycle::{IoOp, Liveness, LoadReport, SessionHandle};
pub use mode::Mode;
pub use notice::{Notice, NoticeLevel};
pub use state::{EdgeProperties, EditorSession, NodeProperties, SessionStatus, SessionView};
