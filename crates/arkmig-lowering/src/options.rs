//! Migration options.

use arkmig_common::limits::MAX_LOWERING_DEPTH;
use serde::{Deserialize, Serialize};

/// How private instance methods of an interface are migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivateMethodStrategy {
    /// Inline when every private method of the interface qualifies, else hoist.
    #[default]
    Auto,
    /// Inline every method that qualifies; hoist the rest.
    Inline,
    Hoist,
}

/// Where nested type declarations end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedTypePolicy {
    /// Move to top level as `Outer_Inner`.
    #[default]
    Hoist,
    /// Keep nested; only for targets that support nesting.
    Preserve,
}

/// Knobs describing the target and the migration policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MigrationOptions {
    pub private_methods: PrivateMethodStrategy,
    pub nested_types: NestedTypePolicy,
    /// The target supports method overloading; no renames.
    pub target_overloading: bool,
    /// The target allows a single supertype per declaration; extra
    /// interfaces are flattened into a merged contract.
    pub single_supertype: bool,
    /// The target accepts intersection constraints on type parameters.
    pub intersection_bounds: bool,
    /// Nesting limit for the dispatcher.
    pub max_depth: u32,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        MigrationOptions {
            private_methods: PrivateMethodStrategy::Auto,
            nested_types: NestedTypePolicy::Hoist,
            target_overloading: false,
            single_supertype: false,
            intersection_bounds: false,
            max_depth: MAX_LOWERING_DEPTH,
        }
    }
}
