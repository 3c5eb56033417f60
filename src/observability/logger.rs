//! Structured JSON logger
//!
//! One log line = one event. Fields are emitted in deterministic
//! (alphabetical) order so log output is stable across runs. Writes are
//! synchronous and unbuffered.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Recoverable issues (partial deletion failures, orphaned blobs)
    Warn,
    /// Operation failures
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured event logger
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        if severity >= Severity::Warn {
            let _ = writeln!(io::stderr(), "{}", line);
        } else {
            let _ = writeln!(io::stdout(), "{}", line);
        }
    }

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        // BTreeMap keeps field order deterministic; event and severity are
        // inserted under fixed keys so they always appear.
        let mut map = BTreeMap::new();
        for (key, value) in fields {
            map.insert((*key).to_string(), (*value).to_string());
        }
        map.insert("event".to_string(), event.to_string());
        map.insert("severity".to_string(), severity.as_str().to_string());

        serde_json::to_string(&map).unwrap_or_else(|_| {
            format!("{{\"event\":\"{}\",\"severity\":\"{}\"}}", event, severity)
        })
    }
}
