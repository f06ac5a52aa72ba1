//! Tree node types

use crate::types::FileId;
use serde::{Deserialize, Serialize};

/// Directory node representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    pub path: String,
    pub children: Vec<TreeNode>, // directories first, then files, each sorted by name
}

/// File node representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    pub path: String,
    pub size_bytes: u64,
    pub file_id: FileId,
}

/// Node of a backup file tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Directory(DirectoryNode),
    File(FileNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory(d) => &d.name,
            TreeNode::File(f) => &f.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Directory(d) => &d.path,
            TreeNode::File(f) => &f.path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Directory(d) => &d.children,
            TreeNode::File(_) => &[],
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            TreeNode::File(f) => Some(f),
            TreeNode::Directory(_) => None,
        }
    }

    /// Look up a node by its tree path (`/a/b`).
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        if self.path() == path {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(path))
    }

    /// Number of file nodes in this subtree.
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::File(_) => 1,
            TreeNode::Directory(d) => d.children.iter().map(TreeNode::file_count).sum(),
        }
    }

    /// Sum of file sizes in this subtree.
    pub fn total_size(&self) -> u64 {
        match self {
            TreeNode::File(f) => f.size_bytes,
            TreeNode::Directory(d) => d.children.iter().map(TreeNode::total_size).sum(),
        }
    }
}
