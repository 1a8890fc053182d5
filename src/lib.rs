//! arkmig: rule-based structural migration of Java source trees to ArkTS.
//!
//! The engine lives in the member crates; this package re-exports them and
//! hosts the `arkmig` command-line driver.
//!
//! - [`common`] - positions, diagnostics and limits
//! - [`java`] - the input tree, types and symbol table
//! - [`arkts`] - the target tree and reference printer
//! - [`resolver`] - type lookup and hierarchy queries over one file
//! - [`lowering`] - rule registry, dispatcher and construct rules

pub use arkmig_arkts as arkts;
pub use arkmig_common as common;
pub use arkmig_java as java;
pub use arkmig_lowering as lowering;
pub use arkmig_resolver as resolver;

pub use arkmig_lowering::{
    CancellationToken, FileOutcome, MigrationOptions, MigrationResult, migrate, migrate_files,
};

pub mod cli;
pub mod tracing_config;
