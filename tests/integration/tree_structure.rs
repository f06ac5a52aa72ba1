use backup_tree::tree::{build_tree, TreeNode};
use backup_tree::FileRecord;

fn child<'a>(node: &'a TreeNode, name: &str) -> &'a TreeNode {
    node.children()
        .iter()
        .find(|c| c.name() == name)
        .unwrap_or_else(|| panic!("no child {} under {}", name, node.path()))
}

fn names(node: &TreeNode) -> Vec<&str> {
    node.children().iter().map(TreeNode::name).collect()
}

#[test]
fn dump_and_nested_log_sort_directories_first() {
    let root = build_tree(&[
        FileRecord::remote(1, "db/dump.sql", 100),
        FileRecord::remote(2, "db/logs/out.log", 50),
    ]);

    let db = child(&root, "db");
    assert!(db.is_dir());
    assert_eq!(names(db), vec!["logs", "dump.sql"]);

    let out = child(child(db, "logs"), "out.log").as_file().unwrap();
    assert_eq!(out.file_id, 2);
    assert_eq!(out.size_bytes, 50);

    let dump = child(db, "dump.sql").as_file().unwrap();
    assert_eq!(dump.file_id, 1);
    assert_eq!(dump.size_bytes, 100);
}

#[test]
fn windows_local_path_becomes_unix_tree() {
    let root = build_tree(&[FileRecord::local(1, "C:\\data\\x.bin", 10)]);
    assert_eq!(names(&root), vec!["data"]);
    let file = child(child(&root, "data"), "x.bin").as_file().unwrap();
    assert_eq!(file.size_bytes, 10);
    assert_eq!(file.path, "/data/x.bin");
}

#[test]
fn records_without_paths_leave_root_empty() {
    let root = build_tree(&[
        FileRecord {
            id: 1,
            remote_path: Some(String::new()),
            local_path: Some(String::new()),
            ..FileRecord::default()
        },
        FileRecord {
            id: 2,
            remote_path: Some("  \t ".to_string()),
            ..FileRecord::default()
        },
        FileRecord {
            id: 3,
            ..FileRecord::default()
        },
    ]);
    assert!(root.children().is_empty());
    assert_eq!(root.path(), "/");
}

#[test]
fn shared_prefix_collapses_into_single_directories() {
    let root = build_tree(&[
        FileRecord::remote(1, "a/b/x.txt", 1),
        FileRecord::remote(2, "a/b/y.txt", 1),
    ]);
    assert_eq!(names(&root), vec!["a"]);
    let a = child(&root, "a");
    assert_eq!(names(a), vec!["b"]);
    assert_eq!(names(child(a, "b")), vec!["x.txt", "y.txt"]);
}

#[test]
fn files_in_one_directory_sorted_by_name() {
    let root = build_tree(&[
        FileRecord::remote(2, "a/2.txt", 1),
        FileRecord::remote(1, "a/1.txt", 1),
    ]);
    assert_eq!(names(child(&root, "a")), vec!["1.txt", "2.txt"]);
}

#[test]
fn local_path_wins_when_both_present() {
    let root = build_tree(&[FileRecord {
        id: 5,
        local_path: Some("/var/backups/site.tar".to_string()),
        remote_path: Some("s3/site.tar".to_string()),
        size_bytes: Some(9),
        file_size: None,
    }]);
    assert_eq!(names(&root), vec!["var"]);
    assert!(root.find("/var/backups/site.tar").is_some());
    assert!(root.find("/s3").is_none());
}

#[test]
fn redundant_separators_are_ignored() {
    let root = build_tree(&[
        FileRecord::remote(1, "//db///dump.sql/", 1),
        FileRecord::remote(2, "db\\\\other.sql", 1),
    ]);
    assert_eq!(names(&root), vec!["db"]);
    assert_eq!(names(child(&root, "db")), vec!["dump.sql", "other.sql"]);
    assert_eq!(root.find("/db/dump.sql").unwrap().path(), "/db/dump.sql");
}

#[test]
fn mixed_case_and_accented_names_use_collation_order() {
    let root = build_tree(&[
        FileRecord::remote(1, "Zeta.sql", 1),
        FileRecord::remote(2, "alpha.sql", 1),
        FileRecord::remote(3, "\u{e9}t\u{e9}.sql", 1),
        FileRecord::remote(4, "Beta/x", 1),
        FileRecord::remote(5, "archive/y", 1),
    ]);
    assert_eq!(
        names(&root),
        vec!["archive", "Beta", "alpha.sql", "\u{e9}t\u{e9}.sql", "Zeta.sql"]
    );
}
