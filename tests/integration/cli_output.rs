use backup_tree::config::AppConfig;
use backup_tree::tooling::cli::{CliContext, Commands, NameCommands};
use std::fs;
use tempfile::TempDir;

fn context() -> CliContext {
    CliContext::with_config(AppConfig::default())
}

fn write_input(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn tree_text_output_from_file_list() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "files.json",
        r#"[
            {"id": 1, "remote_path": "db/dump.sql", "size_bytes": 100},
            {"id": 2, "remote_path": "db/logs/out.log", "size_bytes": 50}
        ]"#,
    );
    let out = context()
        .execute(&Commands::Tree {
            input,
            format: "text".to_string(),
            expand_depth: None,
            expand_all: true,
            no_color: true,
        })
        .unwrap();
    assert_eq!(
        out,
        "v Root/\n  v db/\n    v logs/\n        out.log (50 B) #2\n      dump.sql (100 B) #1"
    );
}

#[test]
fn tree_json_output_from_run_record() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "run.json",
        r#"{"id": 3, "status": "completed",
            "backup_files": [{"id": 7, "local_path": "C:\\data\\x.bin", "size_bytes": 10}]}"#,
    );
    let out = context()
        .execute(&Commands::Tree {
            input,
            format: "json".to_string(),
            expand_depth: None,
            expand_all: false,
            no_color: true,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["type"], "directory");
    assert_eq!(value["path"], "/");
    let data = &value["children"][0];
    assert_eq!(data["name"], "data");
    let file = &data["children"][0];
    assert_eq!(file["type"], "file");
    assert_eq!(file["path"], "/data/x.bin");
    assert_eq!(file["file_id"], 7);
}

#[test]
fn unknown_output_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "files.json", "[]");
    let result = context().execute(&Commands::Tree {
        input,
        format: "yaml".to_string(),
        expand_depth: None,
        expand_all: false,
        no_color: true,
    });
    assert!(result.is_err());
}

#[test]
fn run_summary_shows_duration_and_size() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "run.json",
        r#"{"id": 12, "backup_profile_id": 4, "status": "success",
            "start_time": "2025-03-01T10:00:00Z", "end_time": "2025-03-01T11:01:05Z",
            "total_files": 3, "total_size_bytes": 3145728}"#,
    );
    let out = context()
        .execute(&Commands::Run {
            input,
            format: "text".to_string(),
        })
        .unwrap();
    assert!(out.contains("Success"));
    assert!(out.contains("1h 1m 5s"));
    assert!(out.contains("3.0 MB"));
}

#[test]
fn name_preview_uses_flags_over_config() {
    let out = context()
        .execute(&Commands::Name {
            command: NameCommands::Preview {
                pattern: "{SERVER_NAME}-{profile}".to_string(),
                server_name: Some("web01".to_string()),
                server_host: None,
                profile: None,
            },
        })
        .unwrap();
    assert_eq!(out, "web01-my_database");
}

#[test]
fn download_url_uses_api_base_path() {
    let out = context()
        .execute(&Commands::DownloadUrl {
            file_id: 42,
            path: "/db/dump.sql".to_string(),
        })
        .unwrap();
    assert_eq!(out, "/api/v1/backup-files/42/download\ndump.sql");
}
