//! Backup Tree: file browsing and run monitoring for a backup console
//!
//! Builds a directory/file tree from the flat file list of a backup run,
//! previews naming-rule patterns and follows running backups until they
//! finish.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod naming;
pub mod poll;
pub mod run;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::ApiError;
pub use tree::{build_tree, PathTreeBuilder, TreeNode, TreeView};
pub use types::{FileId, FileRecord, RunId};
