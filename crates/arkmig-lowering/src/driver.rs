//! Parallel migration of many files.
//!
//! Files are independent: each gets its own resolver, plan and context, and
//! the rule registry is shared read-only. Cancellation is checked before a
//! file starts, never inside one.

use crate::dispatch::{MigrationError, MigrationResult, migrate_with};
use crate::options::MigrationOptions;
use crate::registry::RuleRegistry;
use arkmig_java::{SourceUnit, SymbolTable};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info_span, warn};

/// Shared flag that stops files from starting once set.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    Migrated(MigrationResult),
    /// The rule registry failed while this file was migrated.
    Failed { file: String, error: MigrationError },
    /// The run was cancelled before this file started.
    Cancelled { file: String },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Migrated(result) => &result.file,
            FileOutcome::Failed { file, .. } | FileOutcome::Cancelled { file } => file,
        }
    }

    pub fn result(&self) -> Option<&MigrationResult> {
        match self {
            FileOutcome::Migrated(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FileOutcome::Cancelled { .. })
    }
}

/// Migrate `units` in parallel with the standard registry. Outcomes are in
/// input order.
///
/// A registry that fails to build stops the run before any file. A registry
/// error during a file cancels the files not yet started.
pub fn migrate_files(
    units: &[SourceUnit],
    symbols: &SymbolTable,
    options: &MigrationOptions,
    token: &CancellationToken,
) -> Result<Vec<FileOutcome>, MigrationError> {
    let registry = RuleRegistry::standard()?;
    Ok(migrate_files_with(registry, units, symbols, options, token))
}

pub fn migrate_files_with(
    registry: &RuleRegistry,
    units: &[SourceUnit],
    symbols: &SymbolTable,
    options: &MigrationOptions,
    token: &CancellationToken,
) -> Vec<FileOutcome> {
    let _span = info_span!("migrate_files", files = units.len()).entered();
    units
        .par_iter()
        .map(|unit| {
            if token.is_cancelled() {
                return FileOutcome::Cancelled {
                    file: unit.file_name().to_string(),
                };
            }
            match migrate_with(registry, unit, symbols, options) {
                Ok(result) => FileOutcome::Migrated(result),
                Err(error) => {
                    warn!(file = unit.file_name(), %error, "migration aborted, cancelling remaining files");
                    token.cancel();
                    FileOutcome::Failed {
                        file: unit.file_name().to_string(),
                        error,
                    }
                }
            }
        })
        .collect()
}
