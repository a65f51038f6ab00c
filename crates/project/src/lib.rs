//! Flat-map project model and derived explorer tree for ZephyrPad.
//! ZephyrPad 的扁平路徑專案模型與衍生檔案總管樹。
//!
//! A project is a mapping from `/`-separated path strings to file entries;
//! the map is the single source of truth and the display tree is rebuilt
//! from it after every structural change.
//! 專案是以 `/` 分隔的路徑字串對應檔案內容的映射；該映射是唯一的資料來源，
//! 每次結構變動後都會重新由它建出顯示用的樹狀結構。

mod file;
mod project;
mod tree;

pub use file::{default_content, last_segment, Language, ProjectFile};
pub use project::Project;
pub use tree::{build_tree, TreeNode};
