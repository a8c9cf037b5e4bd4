use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::aggregate::StatsSnapshot;
use crate::constants::{APP_NAME, SUMMARY_FILE_NAME};
use crate::utils::format_thousands;

/// A short text summary plus the full report as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub summary: String,
    pub attachment_name: String,
    pub attachment: String,
}

/// Outcome of one delivery attempt. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub ok: bool,
    pub description: Option<String>,
}

impl DeliveryStatus {
    pub fn delivered() -> Self {
        Self {
            ok: true,
            description: None,
        }
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            description: Some(description.into()),
        }
    }
}

/// Best-effort destination for run results. One attempt per call, no retry.
pub trait NotificationSink {
    fn deliver(&self, notification: &Notification) -> DeliveryStatus;
}

pub fn summary_message(stats: &StatsSnapshot) -> String {
    format!(
        "{} results\nAccounts: {}\nPrime (FA+STW): {}\nTotal V-Bucks: {}",
        APP_NAME,
        format_thousands(stats.total_records as u64),
        format_thousands(stats.prime_count as u64),
        format_thousands(stats.total_currency),
    )
}

/// Drops the summary and the attachment into a local outbox directory
/// for whatever relay picks them up.
#[derive(Debug, Clone)]
pub struct OutboxSink {
    directory: PathBuf,
}

impl OutboxSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn write_all(&self, notification: &Notification) -> std::io::Result<()> {
        fs::create_dir_all(&self.directory)?;
        fs::write(self.directory.join(SUMMARY_FILE_NAME), &notification.summary)?;
        fs::write(self.directory.join(&notification.attachment_name), &notification.attachment)?;
        Ok(())
    }
}

impl NotificationSink for OutboxSink {
    fn deliver(&self, notification: &Notification) -> DeliveryStatus {
        match self.write_all(notification) {
            Ok(()) => {
                debug!("Notification written to {}", self.directory.display());
                DeliveryStatus::delivered()
            }
            Err(e) => {
                warn!("Notification to {} failed: {}", self.directory.display(), e);
                DeliveryStatus::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    struct RecordingSink {
        seen: RefCell<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, notification: &Notification) -> DeliveryStatus {
            self.seen.borrow_mut().push(notification.clone());
            DeliveryStatus::delivered()
        }
    }

    fn notification() -> Notification {
        Notification {
            summary: "summary".to_string(),
            attachment_name: "Results.txt".to_string(),
            attachment: "a@b.com:pw | V-Bucks: 1\n".to_string(),
        }
    }

    #[test]
    fn test_summary_message() {
        let stats = StatsSnapshot {
            total_records: 1204,
            total_currency: 2_500_000,
            prime_count: 17,
            full_access_count: 300,
            save_mode_count: 40,
            total_items: 9000,
        };

        assert_eq!(
            summary_message(&stats),
            "Locker Sift results\nAccounts: 1,204\nPrime (FA+STW): 17\nTotal V-Bucks: 2,500,000"
        );
    }

    #[test]
    fn test_outbox_sink_writes_files() {
        let temp_dir = tempdir().unwrap();
        let outbox = temp_dir.path().join("outbox");
        let sink = OutboxSink::new(&outbox);

        let status = sink.deliver(&notification());

        assert_eq!(status, DeliveryStatus::delivered());
        assert_eq!(fs::read_to_string(outbox.join("summary.txt")).unwrap(), "summary");
        assert!(fs::read_to_string(outbox.join("Results.txt")).unwrap().starts_with("a@b.com:pw"));
    }

    #[test]
    fn test_outbox_sink_failure_is_a_status() {
        let temp_dir = tempdir().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        fs::write(&blocker, "file in the way").unwrap();

        let status = OutboxSink::new(&blocker).deliver(&notification());

        assert!(!status.ok);
        assert!(status.description.is_some());
    }

    #[test]
    fn test_sink_trait_object() {
        let sink = RecordingSink {
            seen: RefCell::new(Vec::new()),
        };
        let dyn_sink: &dyn NotificationSink = &sink;

        assert!(dyn_sink.deliver(&notification()).ok);
        assert_eq!(sink.seen.borrow().len(), 1);
    }
}
