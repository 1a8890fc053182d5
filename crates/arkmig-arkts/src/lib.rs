//! ArkTS output boundary of the migration engine.
//!
//! Lowering rules produce an owned `TargetNode` tree. The tree never refers
//! back into the Java source arena, so it can be sent across threads and
//! outlive the input. `ArkTsPrinter` renders a tree to ArkTS text; it is the
//! reference printer used by tests, benchmarks and the CLI.

pub mod node;
pub use node::{Modifier, Param, PlaceholderFlavor, TargetNode, TargetType, TypeParam, VarKind};

pub mod printer;
mod printer_helpers;
pub use printer::ArkTsPrinter;

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod printer_tests;
