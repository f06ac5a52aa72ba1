//! Integration tests for the backup file tree, naming rules, polling and CLI

mod cli_output;
mod naming_preview;
mod run_polling;
mod tree_determinism;
mod tree_structure;
