//! Tree Builder
//!
//! Converts a flat list of backup file records into a directory/file tree.
//! Nodes are collected in an arena with per-directory child index lists and a
//! `(parent, name)` lookup, then materialized into an owned [`TreeNode`] with
//! directories ordered before files and names in collation order.

use crate::tree::collate::compare_names;
use crate::tree::node::{DirectoryNode, FileNode, TreeNode};
use crate::tree::path;
use crate::types::{FileId, FileRecord};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

const ROOT: usize = 0;

#[derive(Debug)]
enum ArenaKind {
    Directory { children: Vec<usize> },
    File { size_bytes: u64, file_id: FileId },
}

#[derive(Debug)]
struct ArenaNode {
    name: String,
    path: String,
    kind: ArenaKind,
}

/// Incremental builder for a backup file tree.
///
/// Insertion never fails: records without a usable path are counted and
/// skipped.
#[derive(Debug)]
pub struct PathTreeBuilder {
    nodes: Vec<ArenaNode>,
    dirs: HashMap<(usize, String), usize>,
    inserted: usize,
    skipped: usize,
}

impl Default for PathTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTreeBuilder {
    pub fn new() -> Self {
        PathTreeBuilder {
            nodes: vec![ArenaNode {
                name: "/".to_string(),
                path: "/".to_string(),
                kind: ArenaKind::Directory {
                    children: Vec::new(),
                },
            }],
            dirs: HashMap::new(),
            inserted: 0,
            skipped: 0,
        }
    }

    /// Build a sorted tree from `files` in one pass.
    pub fn build(files: &[FileRecord]) -> TreeNode {
        let mut builder = Self::new();
        for record in files {
            builder.insert(record);
        }
        builder.finish()
    }

    /// Add one record. Returns false when the record has no usable path.
    pub fn insert(&mut self, record: &FileRecord) -> bool {
        let Some(source) = record.source_path() else {
            debug!(file_id = record.id, "Skipping file record without a path");
            self.skipped += 1;
            return false;
        };
        let normalized = path::normalize_separators(source);
        let parts = path::segments(&normalized);
        let Some((file_name, dir_parts)) = parts.split_last() else {
            debug!(file_id = record.id, path = source, "Skipping file record with empty path");
            self.skipped += 1;
            return false;
        };

        let dir = dir_parts
            .iter()
            .fold(ROOT, |parent, segment| self.ensure_dir(parent, segment));

        let file = self.push(ArenaNode {
            name: (*file_name).to_string(),
            path: path::from_segments(&parts),
            kind: ArenaKind::File {
                size_bytes: record.size(),
                file_id: record.id,
            },
        });
        self.attach(dir, file);
        self.inserted += 1;
        true
    }

    /// Number of records that produced a file node.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Number of records skipped for lack of a path.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Sort every directory and return the root node.
    pub fn finish(self) -> TreeNode {
        debug!(
            files = self.inserted,
            skipped = self.skipped,
            nodes = self.nodes.len(),
            "Built file tree"
        );
        let mut slots: Vec<Option<ArenaNode>> = self.nodes.into_iter().map(Some).collect();
        materialize(&mut slots, ROOT)
    }

    fn ensure_dir(&mut self, parent: usize, segment: &str) -> usize {
        let key = (parent, segment.to_string());
        if let Some(&existing) = self.dirs.get(&key) {
            return existing;
        }
        let dir = self.push(ArenaNode {
            name: segment.to_string(),
            path: path::join(&self.nodes[parent].path, segment),
            kind: ArenaKind::Directory {
                children: Vec::new(),
            },
        });
        self.attach(parent, dir);
        self.dirs.insert(key, dir);
        dir
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: usize, child: usize) {
        if let ArenaKind::Directory { children } = &mut self.nodes[parent].kind {
            children.push(child);
        }
    }
}

/// Build a sorted tree from a flat list of file records.
pub fn build_tree(files: &[FileRecord]) -> TreeNode {
    PathTreeBuilder::build(files)
}

fn materialize(slots: &mut [Option<ArenaNode>], index: usize) -> TreeNode {
    // Every index is referenced by exactly one parent, so each slot is taken once.
    let node = slots[index].take().unwrap_or_else(|| ArenaNode {
        name: String::new(),
        path: String::new(),
        kind: ArenaKind::Directory {
            children: Vec::new(),
        },
    });
    match node.kind {
        ArenaKind::File {
            size_bytes,
            file_id,
        } => TreeNode::File(FileNode {
            name: node.name,
            path: node.path,
            size_bytes,
            file_id,
        }),
        ArenaKind::Directory { children } => {
            let mut children: Vec<TreeNode> = children
                .into_iter()
                .map(|child| materialize(slots, child))
                .collect();
            children.sort_by(compare_nodes);
            TreeNode::Directory(DirectoryNode {
                name: node.name,
                path: node.path,
                children,
            })
        }
    }
}

/// Directories before files, then collation order by name. Files sharing a
/// path are ordered by id and size so the result never depends on input order.
fn compare_nodes(a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| compare_names(a.name(), b.name()))
        .then_with(|| match (a, b) {
            (TreeNode::File(fa), TreeNode::File(fb)) => fa
                .file_id
                .cmp(&fb.file_id)
                .then(fa.size_bytes.cmp(&fb.size_bytes)),
            _ => Ordering::Equal,
        })
}
