//! Centralized limits and thresholds for the migration engine.
//!
//! These prevent stack overflow when lowering pathologically nested trees
//! and bound the work done by the planning passes.

/// Maximum nesting depth the dispatcher descends before it stops lowering
/// and substitutes a passthrough placeholder for the rest of the subtree.
///
/// # Java example
///
/// ```java
/// // Deeply nested conditionals / parenthesized expressions:
/// int x = ((((((((((((1 + 2) + 3) /* ... 500 levels ... */))))))));
/// ```
pub const MAX_LOWERING_DEPTH: u32 = 500;

/// Maximum number of supertypes followed when walking a type hierarchy.
///
/// Guards hierarchy walks against cycles in malformed symbol tables.
pub const MAX_HIERARCHY_WALK: usize = 256;

/// Maximum numeric suffix tried when allocating a unique synthesized name
/// (`FooCompanion`, `FooCompanion1`, ...).
pub const MAX_NAME_SUFFIX: u32 = 10_000;
