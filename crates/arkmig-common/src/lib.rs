//! Common types and utilities for the arkmig migration engine.
//!
//! This crate provides foundational types used across all arkmig crates:
//! - Source positions and byte spans (`Position`, `Span`, `LineMap`)
//! - Migration diagnostics (`Diagnostic`, `DiagnosticSeverity`, the code table)
//! - The append-only `DiagnosticCollector`
//! - Engine limits and thresholds

// Diagnostics - advisory records, message table, collector
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, DiagnosticMessage, DiagnosticSeverity, diagnostic_codes,
    format_message,
};

// Centralized limits and thresholds
pub mod limits;

// Position/Span types for source locations
pub mod position;
pub use position::{LineMap, Position, SourceLocation, Span};

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
