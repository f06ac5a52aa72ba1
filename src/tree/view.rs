//! Headless tree view: expansion state, visible rows and download actions.
//!
//! Expansion state is kept per directory path so it survives a rebuild of the
//! tree from a fresh file list. Directories without an explicit state are
//! expanded when their depth is below the configured default depth.

use crate::tree::builder::build_tree;
use crate::tree::node::{FileNode, TreeNode};
use crate::types::{FileId, FileRecord};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Depth below which directories start expanded (root and its children).
pub const DEFAULT_EXPAND_DEPTH: usize = 2;

/// Receives download requests for file rows.
pub trait DownloadHandler {
    fn download(&mut self, file_id: FileId, path: &str);
}

impl<F> DownloadHandler for F
where
    F: FnMut(FileId, &str),
{
    fn download(&mut self, file_id: FileId, path: &str) {
        self(file_id, path)
    }
}

/// Row kind for a visible tree row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Directory { expanded: bool, child_count: usize },
    File { size_bytes: u64, file_id: FileId, downloadable: bool },
}

/// One visible line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub depth: usize,
    pub label: String,
    pub path: String,
    pub kind: RowKind,
}

/// Tree plus per-directory expansion state.
#[derive(Debug, Clone)]
pub struct TreeView {
    root: TreeNode,
    expand_depth: usize,
    root_label: String,
    overrides: HashMap<String, bool>,
}

impl TreeView {
    pub fn new(root: TreeNode) -> Self {
        Self {
            root,
            expand_depth: DEFAULT_EXPAND_DEPTH,
            root_label: "Root".to_string(),
            overrides: HashMap::new(),
        }
    }

    pub fn from_records(files: &[FileRecord]) -> Self {
        Self::new(build_tree(files))
    }

    pub fn with_expand_depth(mut self, depth: usize) -> Self {
        self.expand_depth = depth;
        self
    }

    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Replace the tree with one built from `files`, keeping the expansion
    /// state of directories that still exist.
    pub fn rebuild(&mut self, files: &[FileRecord]) {
        self.root = build_tree(files);
        let mut live = HashSet::new();
        collect_dir_paths(&self.root, &mut live);
        let before = self.overrides.len();
        self.overrides.retain(|path, _| live.contains(path.as_str()));
        debug!(
            files = files.len(),
            dropped_states = before - self.overrides.len(),
            "Rebuilt tree view"
        );
    }

    /// Whether the directory at `path` (found at `depth`) is expanded.
    pub fn is_expanded(&self, path: &str, depth: usize) -> bool {
        self.overrides
            .get(path)
            .copied()
            .unwrap_or(depth < self.expand_depth)
    }

    /// Flip a directory's expansion. Returns the new state, or `None` when no
    /// directory exists at `path`.
    pub fn toggle(&mut self, path: &str) -> Option<bool> {
        let depth = find_dir_depth(&self.root, path, 0)?;
        let expanded = !self.is_expanded(path, depth);
        self.overrides.insert(path.to_string(), expanded);
        Some(expanded)
    }

    /// Set a directory's expansion. Returns false when no directory exists at `path`.
    pub fn set_expanded(&mut self, path: &str, expanded: bool) -> bool {
        if find_dir_depth(&self.root, path, 0).is_none() {
            return false;
        }
        self.overrides.insert(path.to_string(), expanded);
        true
    }

    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, expanded: bool) {
        let mut paths = HashSet::new();
        collect_dir_paths(&self.root, &mut paths);
        self.overrides = paths
            .into_iter()
            .map(|p| (p.to_string(), expanded))
            .collect();
    }

    /// Visible rows in display order.
    pub fn rows(&self) -> Vec<ViewRow> {
        let mut rows = Vec::new();
        self.push_rows(&self.root, 0, &mut rows);
        rows
    }

    fn push_rows(&self, node: &TreeNode, depth: usize, rows: &mut Vec<ViewRow>) {
        match node {
            TreeNode::File(file) => rows.push(ViewRow {
                depth,
                label: file.name.clone(),
                path: file.path.clone(),
                kind: RowKind::File {
                    size_bytes: file.size_bytes,
                    file_id: file.file_id,
                    downloadable: file.file_id != 0,
                },
            }),
            TreeNode::Directory(dir) => {
                let expanded = self.is_expanded(&dir.path, depth);
                let label = if dir.path == "/" {
                    self.root_label.clone()
                } else {
                    dir.name.clone()
                };
                rows.push(ViewRow {
                    depth,
                    label,
                    path: dir.path.clone(),
                    kind: RowKind::Directory {
                        expanded,
                        child_count: dir.children.len(),
                    },
                });
                if expanded {
                    for child in &dir.children {
                        self.push_rows(child, depth + 1, rows);
                    }
                }
            }
        }
    }

    /// Trigger the download action of file `file_id` at `path`.
    ///
    /// Paths alone are not unique: a file may share its path with a directory
    /// or with other files. Returns false when no downloadable file matches.
    pub fn activate_download(
        &self,
        path: &str,
        file_id: FileId,
        handler: &mut dyn DownloadHandler,
    ) -> bool {
        if file_id == 0 || find_file(&self.root, path, file_id).is_none() {
            return false;
        }
        debug!(file_id, path, "Download requested");
        handler.download(file_id, path);
        true
    }

    /// Trigger the download action of a row returned by [`TreeView::rows`].
    pub fn activate_row(&self, row: &ViewRow, handler: &mut dyn DownloadHandler) -> bool {
        match row.kind {
            RowKind::File {
                file_id,
                downloadable: true,
                ..
            } => self.activate_download(&row.path, file_id, handler),
            _ => false,
        }
    }
}

fn find_file<'a>(node: &'a TreeNode, path: &str, file_id: FileId) -> Option<&'a FileNode> {
    match node {
        TreeNode::File(file) if file.path == path && file.file_id == file_id => Some(file),
        TreeNode::File(_) => None,
        TreeNode::Directory(dir) => dir
            .children
            .iter()
            .find_map(|child| find_file(child, path, file_id)),
    }
}

fn collect_dir_paths<'a>(node: &'a TreeNode, out: &mut HashSet<&'a str>) {
    if let TreeNode::Directory(dir) = node {
        out.insert(dir.path.as_str());
        for child in &dir.children {
            collect_dir_paths(child, out);
        }
    }
}

fn find_dir_depth(node: &TreeNode, path: &str, depth: usize) -> Option<usize> {
    match node {
        TreeNode::File(_) => None,
        TreeNode::Directory(dir) if dir.path == path => Some(depth),
        TreeNode::Directory(dir) => dir
            .children
            .iter()
            .find_map(|child| find_dir_depth(child, path, depth + 1)),
    }
}
