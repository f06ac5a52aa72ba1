//! Format trees, runs and naming tokens as human-readable text.

use crate::naming::AVAILABLE_TOKENS;
use crate::run::{BackupRun, RunStatus};
use crate::tree::{RowKind, TreeView};
use crate::types::FileId;
use chrono::{DateTime, Datelike, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Human-readable byte size: `0 B`, `512 B`, `1.5 KB`, `2.0 MB`, `1.25 GB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        "0 B".to_string()
    } else if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}

/// Backends without a timestamp send the zero time; treat it as missing.
fn present(ts: Option<&DateTime<Utc>>) -> Option<&DateTime<Utc>> {
    ts.filter(|t| t.year() > 1)
}

/// Run duration as `1h 2m 3s`, `2m 3s` or `3s`.
///
/// Without an end time this is `Running...` for a running run and `-`
/// otherwise; without a start time it is always `-`.
pub fn format_duration(
    start: Option<&DateTime<Utc>>,
    end: Option<&DateTime<Utc>>,
    status: &RunStatus,
) -> String {
    let Some(start) = present(start) else {
        return "-".to_string();
    };
    match present(end) {
        Some(end) => {
            let seconds = (*end - *start).num_seconds().max(0);
            let minutes = seconds / 60;
            let hours = minutes / 60;
            if hours > 0 {
                format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
            } else if minutes > 0 {
                format!("{}m {}s", minutes, seconds % 60)
            } else {
                format!("{}s", seconds)
            }
        }
        None if status.is_active() => "Running...".to_string(),
        None => "-".to_string(),
    }
}

fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    present(ts)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Download URL of a backup file under the API base path.
pub fn download_url(base_path: &str, file_id: FileId) -> String {
    format!(
        "{}/backup-files/{}/download",
        base_path.trim_end_matches('/'),
        file_id
    )
}

/// Suggested local file name for a download: the last path segment.
pub fn download_file_name(path: &str) -> String {
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("download")
        .to_string()
}

/// Render the visible rows of a tree view as indented text.
pub fn format_tree_text(view: &TreeView, color: bool) -> String {
    let mut out = String::new();
    for row in view.rows() {
        let indent = "  ".repeat(row.depth);
        match row.kind {
            RowKind::Directory { expanded, .. } => {
                let marker = if expanded { "v" } else { ">" };
                let label = format!("{}/", row.label.trim_end_matches('/'));
                let label = if color {
                    label.bold().blue().to_string()
                } else {
                    label
                };
                out.push_str(&format!("{}{} {}\n", indent, marker, label));
            }
            RowKind::File {
                size_bytes,
                file_id,
                downloadable,
            } => {
                let size = format!("({})", format_size(size_bytes));
                let size = if color { size.dimmed().to_string() } else { size };
                let id = if downloadable {
                    format!(" #{}", file_id)
                } else {
                    String::new()
                };
                out.push_str(&format!("{}  {} {}{}\n", indent, row.label, size, id));
            }
        }
    }
    out
}

/// Format a run summary table.
pub fn format_run_summary(run: &BackupRun) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Run".to_string(), run.id.to_string()]);
    table.add_row(vec!["Profile".to_string(), run.backup_profile_id.to_string()]);
    table.add_row(vec!["Status".to_string(), run.status.label().to_string()]);
    table.add_row(vec![
        "Started".to_string(),
        format_timestamp(run.start_time.as_ref()),
    ]);
    table.add_row(vec![
        "Finished".to_string(),
        format_timestamp(run.end_time.as_ref()),
    ]);
    table.add_row(vec![
        "Duration".to_string(),
        format_duration(run.start_time.as_ref(), run.end_time.as_ref(), &run.status),
    ]);
    let files = run
        .total_files
        .unwrap_or_else(|| run.files().len() as u64);
    table.add_row(vec!["Files".to_string(), files.to_string()]);
    table.add_row(vec![
        "Size".to_string(),
        format_size(run.total_size_bytes.unwrap_or(0)),
    ]);
    if let Some(path) = run.local_backup_path.as_deref() {
        table.add_row(vec!["Local path".to_string(), path.to_string()]);
    }
    if let Some(err) = run.error_message.as_deref().filter(|e| !e.is_empty()) {
        table.add_row(vec!["Error".to_string(), err.to_string()]);
    }
    format!("{}\n", table)
}

/// Format the naming token catalogue.
pub fn format_token_catalogue() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Category", "Tokens"]);
    for group in AVAILABLE_TOKENS {
        table.add_row(vec![group.category.to_string(), group.tokens.join(" ")]);
    }
    format!("{}\n", table)
}
