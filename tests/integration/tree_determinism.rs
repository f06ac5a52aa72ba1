use backup_tree::tree::{build_tree, path, TreeNode};
use backup_tree::FileRecord;
use proptest::prelude::*;

const SEGMENTS: &[&str] = &["a", "A", "b", "\u{e9}", "data", "1", "_x", "C:", ""];

fn path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(SEGMENTS), 0..5),
        prop::bool::ANY,
        prop::bool::ANY,
    )
        .prop_map(|(parts, backslash, padded)| {
            let sep = if backslash { "\\" } else { "/" };
            let joined = parts.join(sep);
            if padded {
                format!("  {}  ", joined)
            } else {
                joined
            }
        })
}

fn record_strategy() -> impl Strategy<Value = FileRecord> {
    (
        0u64..20,
        prop::option::of(path_strategy()),
        prop::option::of(path_strategy()),
        prop::option::of(0u64..1000),
    )
        .prop_map(|(id, local_path, remote_path, size_bytes)| FileRecord {
            id,
            local_path,
            remote_path,
            size_bytes,
            file_size: None,
        })
}

fn records_and_permutation() -> impl Strategy<Value = (Vec<FileRecord>, Vec<FileRecord>)> {
    prop::collection::vec(record_strategy(), 0..30)
        .prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle()))
}

fn usable(record: &FileRecord) -> bool {
    record
        .source_path()
        .map(|p| !path::segments(&path::normalize_separators(p)).is_empty())
        .unwrap_or(false)
}

fn check_dirs_first(node: &TreeNode) -> Result<(), TestCaseError> {
    let children = node.children();
    let first_file = children.iter().position(|c| !c.is_dir()).unwrap_or(children.len());
    prop_assert!(children[first_file..].iter().all(|c| !c.is_dir()));
    for c in children {
        check_dirs_first(c)?;
    }
    Ok(())
}

fn check_paths(node: &TreeNode) -> Result<(), TestCaseError> {
    for c in node.children() {
        prop_assert_eq!(c.path(), path::join(node.path(), c.name()));
        prop_assert!(!c.name().is_empty());
        prop_assert!(!c.name().contains('/'));
        check_paths(c)?;
    }
    Ok(())
}

fn check_unique_dirs(node: &TreeNode) -> Result<(), TestCaseError> {
    let dirs: Vec<&str> = node
        .children()
        .iter()
        .filter(|c| c.is_dir())
        .map(TreeNode::name)
        .collect();
    let mut deduped = dirs.clone();
    deduped.sort();
    deduped.dedup();
    prop_assert_eq!(deduped.len(), dirs.len());
    for c in node.children() {
        check_unique_dirs(c)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn build_is_repeatable((records, _shuffled) in records_and_permutation()) {
        prop_assert_eq!(build_tree(&records), build_tree(&records));
    }

    #[test]
    fn input_order_does_not_matter((records, shuffled) in records_and_permutation()) {
        prop_assert_eq!(build_tree(&records), build_tree(&shuffled));
    }

    #[test]
    fn directories_precede_files((records, _shuffled) in records_and_permutation()) {
        check_dirs_first(&build_tree(&records))?;
    }

    #[test]
    fn child_paths_extend_parent_paths((records, _shuffled) in records_and_permutation()) {
        let root = build_tree(&records);
        prop_assert_eq!(root.path(), "/");
        check_paths(&root)?;
    }

    #[test]
    fn directories_unique_per_parent((records, _shuffled) in records_and_permutation()) {
        check_unique_dirs(&build_tree(&records))?;
    }

    #[test]
    fn one_file_node_per_usable_record((records, _shuffled) in records_and_permutation()) {
        let expected = records.iter().filter(|r| usable(r)).count();
        prop_assert_eq!(build_tree(&records).file_count(), expected);
    }
}
