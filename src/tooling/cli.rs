//! CLI Tooling
//!
//! Command-line interface over the file tree, run summaries and naming rule
//! previews. Commands read backend JSON exports and print text or JSON.

use crate::config::{AppConfig, ConfigLoader, MAX_EXPAND_DEPTH};
use crate::error::ApiError;
use crate::format::{
    download_file_name, download_url, format_run_summary, format_token_catalogue,
    format_tree_text,
};
use crate::logging::LoggingConfig;
use crate::naming::{preview_pattern, NamingContext};
use crate::run::BackupRun;
use crate::tree::{PathTreeBuilder, TreeView};
use crate::types::{FileId, FileRecord};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// backup-tree - browse backup run files and preview naming rules
#[derive(Parser)]
#[command(name = "backup-tree")]
#[command(about = "Browse backup run files as a tree and preview naming rules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the configured logging section.
    pub fn apply_log_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the files of a backup run as a tree
    Tree {
        /// JSON file with a file list or a run record ("-" for stdin)
        #[arg(long)]
        input: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Directories shallower than this start expanded
        #[arg(long)]
        expand_depth: Option<usize>,
        /// Expand every directory
        #[arg(long)]
        expand_all: bool,
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Summarize a backup run record
    Run {
        /// JSON file with a run record ("-" for stdin)
        #[arg(long)]
        input: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Naming rule tools
    Name {
        #[command(subcommand)]
        command: NameCommands,
    },
    /// Print the download URL and file name for a backup file
    DownloadUrl {
        /// Backup file id
        file_id: FileId,
        /// File path as shown in the tree
        path: String,
    },
}

#[derive(Subcommand)]
pub enum NameCommands {
    /// Translate a naming pattern with placeholder values
    Preview {
        /// Pattern, e.g. backup-{YYYY}-{MM}-{DD}
        pattern: String,
        /// Server name substituted for {SERVER_NAME}
        #[arg(long)]
        server_name: Option<String>,
        /// Server host substituted for {SERVER_HOST}
        #[arg(long)]
        server_host: Option<String>,
        /// Profile name substituted for {profile}
        #[arg(long)]
        profile: Option<String>,
    },
    /// List available naming tokens
    Tokens,
}

/// Decode backend JSON: either an array of file records or a run record
/// carrying `backup_files`.
pub fn parse_file_records(json: &str) -> Result<Vec<FileRecord>, ApiError> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    if value.get("backup_files").is_some() {
        let run: BackupRun = serde_json::from_value(value)?;
        return Ok(run.backup_files.unwrap_or_default());
    }
    Err(ApiError::InvalidInput(
        "expected an array of files or a run record with backup_files".to_string(),
    ))
}

fn read_input(path: &Path) -> Result<String, ApiError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// CLI context: resolved configuration plus command execution.
pub struct CliContext {
    config: AppConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::resolve(config_path.as_deref())?;
        Ok(Self { config })
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Execute a command and return its output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Tree {
                input,
                format,
                expand_depth,
                expand_all,
                no_color,
            } => {
                let records = parse_file_records(&read_input(input)?)?;
                let mut builder = PathTreeBuilder::new();
                for record in &records {
                    builder.insert(record);
                }
                info!(
                    files = builder.inserted(),
                    skipped = builder.skipped(),
                    "Loaded backup files"
                );
                let root = builder.finish();
                match format.as_str() {
                    "json" => Ok(serde_json::to_string_pretty(&root)?),
                    "text" => {
                        let depth = expand_depth.unwrap_or(self.config.tree.expand_depth);
                        if depth > MAX_EXPAND_DEPTH {
                            return Err(ApiError::InvalidInput(format!(
                                "expand depth must be at most {}, got {}",
                                MAX_EXPAND_DEPTH, depth
                            )));
                        }
                        let mut view = TreeView::new(root)
                            .with_expand_depth(depth)
                            .with_root_label(self.config.tree.root_label.clone());
                        if *expand_all {
                            view.expand_all();
                        }
                        let color = !*no_color && self.config.logging.color;
                        Ok(format_tree_text(&view, color).trim_end().to_string())
                    }
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Run { input, format } => {
                let run: BackupRun = serde_json::from_str(&read_input(input)?)?;
                debug!(run_id = run.id, status = %run.status, "Loaded backup run");
                match format.as_str() {
                    "json" => Ok(serde_json::to_string_pretty(&run)?),
                    "text" => Ok(format_run_summary(&run).trim_end().to_string()),
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Name { command } => match command {
                NameCommands::Preview {
                    pattern,
                    server_name,
                    server_host,
                    profile,
                } => {
                    let defaults = self.config.naming.preview_context();
                    let ctx = NamingContext {
                        server_name: server_name.clone().unwrap_or(defaults.server_name),
                        server_host: server_host.clone().unwrap_or(defaults.server_host),
                        profile_name: profile.clone().unwrap_or(defaults.profile_name),
                    };
                    Ok(preview_pattern(pattern, &ctx, &chrono::Local::now()))
                }
                NameCommands::Tokens => Ok(format_token_catalogue().trim_end().to_string()),
            },
            Commands::DownloadUrl { file_id, path } => Ok(format!(
                "{}\n{}",
                download_url(&self.config.api.base_path, *file_id),
                download_file_name(path)
            )),
        }
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::InvalidInput(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}
