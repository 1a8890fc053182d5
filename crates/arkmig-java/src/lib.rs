//! Java source tree for the arkmig migration engine.
//!
//! The tree is produced by an external Java front end (or loaded from its
//! JSON interchange form) and is read-only for the engine:
//! - `node` - `NodeIndex`, the closed `SyntaxKind` set and per-kind `NodeData`
//! - `unit` - `SourceUnit`, a validated arena for one file
//! - `types` - `JavaType` annotations and primitive types
//! - `modifiers` - declaration modifier flags
//! - `symbols` - the front end's symbol table, plus the JDK subset the
//!   engine knows about
//! - `builder` - incremental tree construction for front ends and tests

pub mod builder;
pub mod modifiers;
pub mod node;
pub mod symbols;
pub mod types;
pub mod unit;

pub use builder::TreeBuilder;
pub use modifiers::Modifiers;
pub use node::{
    AssignOp, BinaryOp, LiteralKind, NodeData, NodeIndex, SyntaxKind, UnaryOp,
};
pub use symbols::{FieldSymbol, MethodSymbol, SymbolTable, TypeSymbol, TypeSymbolKind};
pub use types::{JavaType, PrimitiveType};
pub use unit::{SourceNode, SourceUnit, TreeError};

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

#[cfg(test)]
#[path = "../tests/unit_tests.rs"]
mod unit_tests;
#[cfg(test)]
#[path = "../tests/symbols_tests.rs"]
mod symbols_tests;
