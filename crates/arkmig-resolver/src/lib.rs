//! Type Resolver for the migration engine.
//!
//! Answers the questions rule predicates ask about a Java node: its static
//! type, whether a name denotes a local, a field or a type, what category a
//! type falls into (class, interface, library type), which methods a receiver
//! offers and which overload a call selects.
//!
//! The resolver works from the symbol table handed over by the front end,
//! overlaid with symbols derived from the declarations of the file being
//! migrated. Resolved-type annotations on nodes always win over inference.

mod declared;
pub mod hierarchy;
pub mod resolver;
pub mod scope;

pub use hierarchy::{ComponentMap, HierarchyComponents};
pub use resolver::{
    CallResolution, NameBinding, OverloadChoice, ResolveError, ResolvedMethod, TypeCategory,
    TypeResolver,
};
pub use scope::Scopes;

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod hierarchy_tests;
