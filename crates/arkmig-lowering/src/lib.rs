//! Structural lowering of Java source trees to ArkTS target trees.
//!
//! # Architecture
//!
//! A migration run over one file has three phases:
//!
//! 1. **Resolve**: `arkmig_resolver::TypeResolver` overlays the file's own
//!    declarations on the front end's symbol table.
//! 2. **Plan**: `MigrationPlan` makes every file-wide decision up front:
//!    companion class names, inline-vs-hoist for private interface methods,
//!    overload renames per hierarchy component, hoisted nested type names and
//!    default-method forwarders. Rules only read it.
//! 3. **Dispatch**: `LowerCx::lower` walks the tree. For each node it asks the
//!    `RuleRegistry` for the single best-matching rule, applies it and splices
//!    the result into the output. Nodes without a rule become placeholders
//!    that keep the original text, with an error diagnostic.
//!
//! The standard registry is built once per process from `STANDARD_RULES` and
//! shared read-only between files migrated in parallel by `driver`.

pub mod context;
pub mod dispatch;
pub mod driver;
pub mod options;
pub mod plan;
pub mod registry;
pub mod rules;

pub use context::LowerCx;
pub use dispatch::{MigrationError, MigrationResult, MigrationStats, migrate, migrate_with};
pub use driver::{CancellationToken, FileOutcome, migrate_files, migrate_files_with};
pub use options::{MigrationOptions, NestedTypePolicy, PrivateMethodStrategy};
pub use plan::MigrationPlan;
pub use registry::{RegistryBuilder, RegistryError, RuleEntry, RuleRegistry, Specificity};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod registry_tests;

#[cfg(test)]
#[path = "../tests/plan_tests.rs"]
mod plan_tests;

#[cfg(test)]
#[path = "../tests/control_flow_tests.rs"]
mod control_flow_tests;

#[cfg(test)]
#[path = "../tests/interface_tests.rs"]
mod interface_tests;

#[cfg(test)]
#[path = "../tests/intersection_tests.rs"]
mod intersection_tests;

#[cfg(test)]
#[path = "../tests/call_tests.rs"]
mod call_tests;

#[cfg(test)]
#[path = "../tests/dispatch_tests.rs"]
mod dispatch_tests;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
