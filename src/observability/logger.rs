//! Structured JSON logger for stratadb
//!
//! - One log line = one event
//! - Deterministic key ordering (event, then severity, then fields
//!   sorted alphabetically)
//! - Synchronous writes, no buffering
//! - WARN and below go to stdout, ERROR and above to stderr

use std::fmt;
use std::io::{self, Write};

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger.
///
/// Lines are built by hand rather than through a serializer so that key
/// ordering is deterministic and logging never allocates an intermediate
/// value tree.
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields.
    pub fn log(severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if severity >= Severity::Error {
            Self::emit(severity, event, fields, &mut io::stderr());
        } else {
            Self::emit(severity, event, fields, &mut io::stdout());
        }
    }

    /// Log at TRACE level
    pub fn trace(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    fn emit<W: Write>(severity: Severity, event: Event, fields: &[(&str, &str)], writer: &mut W) {
        let mut line = String::with_capacity(128);

        line.push_str("{\"event\":\"");
        line.push_str(event.as_str());
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted {
            line.push_str(",\"");
            escape_into(&mut line, key);
            line.push_str("\":\"");
            escape_into(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");

        // One write_all per line keeps concurrent log lines intact
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

/// Escape a string for embedding in a JSON string literal.
fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
pub fn capture_log(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::emit(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}
