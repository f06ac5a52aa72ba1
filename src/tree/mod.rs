//! Backup File Tree
//!
//! Hierarchical view over the flat list of files produced by a backup run.

pub mod builder;
pub mod collate;
pub mod node;
pub mod path;
pub mod view;

pub use builder::{build_tree, PathTreeBuilder};
pub use node::{DirectoryNode, FileNode, TreeNode};
pub use view::{DownloadHandler, RowKind, TreeView, ViewRow, DEFAULT_EXPAND_DEPTH};
