//! Append-only diagnostic collector.
//!
//! One collector exists per migrated file. There is no API to remove or
//! rewrite a recorded diagnostic; consumers take the whole list at the end.

use super::{Diagnostic, DiagnosticSeverity};
use crate::position::{Position, SourceLocation};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    file: String,
    diagnostics: Vec<Diagnostic>,
    /// Count per severity, kept in step with `diagnostics`
    counts: FxHashMap<DiagnosticSeverity, usize>,
}

impl DiagnosticCollector {
    pub fn new(file: impl Into<String>) -> Self {
        DiagnosticCollector {
            file: file.into(),
            diagnostics: Vec::new(),
            counts: FxHashMap::default(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        *self.counts.entry(diagnostic.severity).or_default() += 1;
        self.diagnostics.push(diagnostic);
    }

    /// Record a table diagnostic at `position` in this collector's file.
    pub fn report(&mut self, code: u32, position: Position, args: &[&str]) {
        let location = SourceLocation::new(self.file.clone(), position);
        self.push(Diagnostic::from_code(code, location, args));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.counts.get(&severity).copied().unwrap_or(0)
    }

    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticSeverity::Error) > 0
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn with_code(&self, code: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Extend<Diagnostic> for DiagnosticCollector {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}
