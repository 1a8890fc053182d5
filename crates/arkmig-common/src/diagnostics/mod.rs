//! Diagnostic types and message lookup for the migration engine.
//!
//! Message templates live in `data.rs`, keyed by numeric code. Each template
//! carries a default severity; rules report a code plus arguments and the
//! dispatcher attaches the source location.

use serde::{Deserialize, Serialize};
use std::fmt;

mod collector;
mod data;
pub use collector::DiagnosticCollector;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

use crate::position::SourceLocation;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic severity. Ordered so that `Error` compares greatest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// A deterministic policy decision recorded for traceability.
    Info,
    /// Migrated, but approximately or with dropped information.
    Warning,
    /// Not migrated; the output needs manual review.
    Error,
}

impl DiagnosticSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticSeverity::Info => "info",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Error => "error",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A migration advisory attached to a source position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: u32,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        severity: DiagnosticSeverity,
        code: u32,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            file: location.file,
            line: location.line,
            column: location.column,
            message: message.into(),
        }
    }

    /// Build a diagnostic from the message table.
    ///
    /// Unknown codes produce an error-severity diagnostic whose message is
    /// the arguments joined by spaces, so a missing table entry is still
    /// visible in the report.
    #[must_use]
    pub fn from_code(code: u32, location: SourceLocation, args: &[&str]) -> Self {
        match get_diagnostic_message(code) {
            Some(def) => Self::new(
                def.severity,
                code,
                location,
                format_message(def.message, args),
            ),
            None => Self::new(DiagnosticSeverity::Error, code, location, args.join(" ")),
        }
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} - {} AM{}: {}",
            self.file, self.line, self.column, self.severity, self.code, self.message
        )
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, default severity and template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub severity: DiagnosticSeverity,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the default severity for a diagnostic code.
#[must_use]
pub fn get_diagnostic_severity(code: u32) -> Option<DiagnosticSeverity> {
    get_diagnostic_message(code).map(|m| m.severity)
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
