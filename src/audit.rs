// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Audit logging for login attempts.
//!
//! Every login attempt, successful or not, is recorded to an append-only
//! JSONL store. Audit writes are best-effort: a storage failure is logged
//! to the operational channel and suppressed, never altering the HTTP
//! outcome of the login itself.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::normalize_email;

/// One immutable record of a login attempt.
///
/// Append-only; never updated or deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    /// Normalized email, or `"unknown"` when absent or empty.
    pub email: String,
    /// Whether the login attempt succeeded.
    pub success: bool,
    /// Internal failure reason; `None` on success.
    pub reason: Option<String>,
    /// Caller IP, if known.
    pub ip: Option<String>,
    /// Caller user agent, if known.
    pub user_agent: Option<String>,
    /// Server-side creation time.
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Create a record for a login attempt, normalizing the email and
    /// substituting `"unknown"` when it is absent or empty.
    pub fn new(email: Option<&str>, success: bool) -> Self {
        let email = email
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            email,
            success,
            reason: None,
            ip: None,
            user_agent: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the failure reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the caller IP.
    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip = ip;
        self
    }

    /// Set the caller user agent.
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Audit store errors.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A durable, append-only sink for audit records.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Record a login attempt, best-effort.
///
/// Storage failures are logged and swallowed; the caller's result is never
/// affected by the health of the audit pipeline.
pub fn record_login(sink: &dyn AuditSink, record: AuditRecord) {
    if let Err(e) = sink.append(&record) {
        tracing::warn!(error = %e, email = %record.email, "Failed to record login attempt");
    }
}

/// JSONL audit log on the local filesystem.
///
/// Records are appended to a daily `login-audit-YYYY-MM-DD.jsonl` file,
/// one JSON object per line.
pub struct JsonlAuditLog {
    dir: PathBuf,
}

impl JsonlAuditLog {
    /// Open the audit log rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn day_file(&self, date: &str) -> PathBuf {
        self.dir.join(format!("login-audit-{date}.jsonl"))
    }

    /// Read back all records for a given `YYYY-MM-DD` date.
    pub fn read_day(&self, date: &str) -> Result<Vec<AuditRecord>, AuditError> {
        let content = std::fs::read_to_string(self.day_file(date))?;

        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(line)?);
        }
        Ok(records)
    }
}

impl AuditSink for JsonlAuditLog {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let date = record.timestamp.format("%Y-%m-%d").to_string();
        let line = serde_json::to_string(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.day_file(&date))?;

        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// In-memory sink for asserting on recorded attempts.
    #[derive(Default)]
    pub struct MemoryAuditLog {
        records: Mutex<Vec<AuditRecord>>,
    }

    impl MemoryAuditLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn records(&self) -> Vec<AuditRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    impl AuditSink for MemoryAuditLog {
        fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    /// Sink that always fails, for audit-isolation tests.
    pub struct FailingAuditLog;

    impl AuditSink for FailingAuditLog {
        fn append(&self, _record: &AuditRecord) -> Result<(), AuditError> {
            Err(AuditError::Io(std::io::Error::other(
                "audit store unavailable",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FailingAuditLog;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_record_normalizes_email() {
        let record = AuditRecord::new(Some("  Bob@ZoftwareHub.com "), true);
        assert_eq!(record.email, "bob@zoftwarehub.com");
        assert!(record.success);
        assert_eq!(record.reason, None);
    }

    #[test]
    fn missing_or_empty_email_becomes_unknown() {
        assert_eq!(AuditRecord::new(None, false).email, "unknown");
        assert_eq!(AuditRecord::new(Some("   "), false).email, "unknown");
    }

    #[test]
    fn builder_setters_populate_context() {
        let record = AuditRecord::new(Some("bob@zoftwarehub.com"), false)
            .with_reason("Invalid credentials")
            .with_ip(Some("10.0.0.7".to_string()))
            .with_user_agent(Some("curl/8.5".to_string()));

        assert_eq!(record.reason.as_deref(), Some("Invalid credentials"));
        assert_eq!(record.ip.as_deref(), Some("10.0.0.7"));
        assert_eq!(record.user_agent.as_deref(), Some("curl/8.5"));
    }

    #[test]
    fn append_and_read_back_day_file() {
        let temp = TempDir::new().unwrap();
        let log = JsonlAuditLog::open(temp.path()).unwrap();

        let first = AuditRecord::new(Some("bob@zoftwarehub.com"), true);
        let second = AuditRecord::new(Some("eve@gmail.com"), false)
            .with_reason("Only @zoftwarehub.com emails are allowed");

        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let records = log.read_day(&today).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "bob@zoftwarehub.com");
        assert!(records[0].success);
        assert!(!records[1].success);
        assert!(records[1]
            .reason
            .as_deref()
            .unwrap()
            .contains("@zoftwarehub.com"));
    }

    #[test]
    fn record_login_swallows_sink_failure() {
        // Must not panic or propagate.
        record_login(
            &FailingAuditLog,
            AuditRecord::new(Some("bob@zoftwarehub.com"), true),
        );
    }
}
