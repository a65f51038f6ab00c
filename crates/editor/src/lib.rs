//! Editing-surface state for ZephyrPad.
//! ZephyrPad 編輯介面的狀態核心。
//!
//! The surface owns the flat file map as the single source of truth; the
//! explorer tree is derived from it on every change, the active file feeds
//! the highlighter, and a run hands the whole project to the orchestrator.
//! Rendering (DOM, panels, modals) lives outside this crate.

mod explorer;
mod session;

pub use explorer::{parent_prefix, ExplorerState};
pub use session::{EditorError, PlaygroundSession};
