//! Audit logger for append-only audit log
//!
//! Provides the AuditLogger struct that writes audit entries to a log file.
//! Each entry is written as a single JSON line and flushed immediately.

use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::{ExpenseError, ExpenseResult};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file
///
/// The log file uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one audit entry.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    /// Path to the audit log file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry as a JSON line and flush it
    pub async fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let mut json = serde_json::to_string(entry)
            .map_err(|e| ExpenseError::Json(format!("Failed to serialize audit entry: {}", e)))?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await
            .map_err(|e| ExpenseError::Io(format!("Failed to open audit log: {}", e)))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| ExpenseError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .await
            .map_err(|e| ExpenseError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries, oldest first
    pub async fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ExpenseError::Io(format!("Failed to open audit log: {}", e))),
        };

        let mut entries = Vec::new();
        for (line_num, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(line).map_err(|e| {
                ExpenseError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub async fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let all_entries = self.read_all().await?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::{Amount, Category, Expense, NewExpense};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn expense(description: &str) -> Expense {
        Expense::new(NewExpense::new(
            Amount::from_units(10),
            Category::Other,
            description,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();

        logger.log(&AuditEntry::create(&expense("Pens"))).await.unwrap();

        let entries = logger.read_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].label.as_deref(), Some("Pens"));
    }

    #[tokio::test]
    async fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::create(&expense(&format!("item {}", i)));
            logger.log(&entry).await.unwrap();
        }

        let recent = logger.read_recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].label.as_deref(), Some("item 7"));
        assert_eq!(recent[2].label.as_deref(), Some("item 9"));
    }

    #[tokio::test]
    async fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        let removed = expense("Old");
        logger.log(&AuditEntry::delete(&removed)).await.unwrap();

        let logger2 = AuditLogger::new(temp.path().join("audit.log"));
        let entries = logger2.read_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Delete);
        assert_eq!(entries[0].expense_id, removed.id.to_string());
    }
}
