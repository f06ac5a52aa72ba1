use async_trait::async_trait;
use backup_tree::config::PollConfig;
use backup_tree::poll::{PollUpdate, RunPoller, RunSource};
use backup_tree::run::{BackupRun, BackupRunLog, RunStatus};
use backup_tree::tree::TreeView;
use backup_tree::{ApiError, FileRecord, RunId};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Run that finishes on the second status refresh and then reports two files.
struct FinishingRun {
    refreshes: AtomicUsize,
}

#[async_trait]
impl RunSource for FinishingRun {
    async fn fetch_run(&self, id: RunId) -> Result<BackupRun, ApiError> {
        let n = self.refreshes.fetch_add(1, Ordering::SeqCst);
        let status = if n == 0 {
            RunStatus::Running
        } else {
            RunStatus::Completed
        };
        Ok(BackupRun {
            id,
            status,
            total_files: Some(2),
            ..BackupRun::default()
        })
    }

    async fn fetch_files(&self, _id: RunId) -> Result<Vec<FileRecord>, ApiError> {
        Ok(vec![
            FileRecord::remote(1, "db/dump.sql", 100),
            FileRecord::remote(2, "db/logs/out.log", 50),
        ])
    }

    async fn fetch_logs(&self, _id: RunId) -> Result<Vec<BackupRunLog>, ApiError> {
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn finished_run_files_feed_the_tree_view() {
    let config = PollConfig {
        status_interval_ms: 1000,
        log_interval_ms: 500,
    };
    let poller = RunPoller::new(
        FinishingRun {
            refreshes: AtomicUsize::new(0),
        },
        &config,
    );
    let (tx, mut rx) = mpsc::channel(16);
    let initial = BackupRun {
        id: 9,
        status: RunStatus::Running,
        ..BackupRun::default()
    };

    let mut view = TreeView::from_records(&[]);
    let final_run = poller.watch(initial, 0, tx).await.unwrap();
    assert_eq!(final_run.status, RunStatus::Completed);
    assert_eq!(poller.source().refreshes.load(Ordering::SeqCst), 2);

    while let Some(update) = rx.recv().await {
        if let PollUpdate::Files(files) = update {
            view.rebuild(&files);
        }
    }
    assert_eq!(view.root().file_count(), 2);
    assert!(view.root().find("/db/logs/out.log").is_some());
}
