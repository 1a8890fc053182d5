//! Rule Registry.
//!
//! Maps a Java construct kind to its candidate rules. Candidates are ranked
//! by specificity class, then by explicit priority; `resolve` returns the
//! first applicable candidate. Two applicable candidates of the same rank are
//! a configuration error.

use crate::context::LowerCx;
use crate::rules::STANDARD_RULES;
use arkmig_arkts::TargetNode;
use arkmig_java::{NodeIndex, SyntaxKind};
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// What a rule's predicate looks at. Later variants outrank earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    /// Applies to every node of the kind.
    Kind,
    /// Tests resolved types or the enclosing declaration.
    Type,
    /// Tests modifier combinations.
    Modifiers,
}

pub type Predicate = fn(&LowerCx<'_>, NodeIndex) -> bool;
pub type RuleFn = fn(&mut LowerCx<'_>, NodeIndex) -> Vec<TargetNode>;

/// One registered transformation.
#[derive(Clone, Copy)]
pub struct RuleEntry {
    /// Stable name, used in statistics and logs.
    pub name: &'static str,
    pub kind: SyntaxKind,
    pub specificity: Specificity,
    /// Tie-breaker within a specificity class; higher wins.
    pub priority: i16,
    pub predicate: Predicate,
    pub rule: RuleFn,
}

impl RuleEntry {
    pub const fn new(
        name: &'static str,
        kind: SyntaxKind,
        specificity: Specificity,
        priority: i16,
        predicate: Predicate,
        rule: RuleFn,
    ) -> Self {
        RuleEntry {
            name,
            kind,
            specificity,
            priority,
            predicate,
            rule,
        }
    }

    fn rank(&self) -> (Specificity, i16) {
        (self.specificity, self.priority)
    }
}

impl std::fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("specificity", &self.specificity)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no rule applies to {kind} node {node}")]
    NoRule { kind: SyntaxKind, node: NodeIndex },
    #[error("rules '{first}' and '{second}' both apply to {kind} node {node} with equal rank")]
    Ambiguous {
        kind: SyntaxKind,
        node: NodeIndex,
        first: &'static str,
        second: &'static str,
    },
    #[error("rule name '{name}' is registered twice")]
    DuplicateName { name: &'static str },
    #[error("rules '{first}' and '{second}' have the same kind, rank and predicate")]
    DuplicateCandidate {
        first: &'static str,
        second: &'static str,
    },
    #[error("the rule registry is poisoned by an earlier ambiguity")]
    Poisoned,
}

/// Collects rules and validates them into a `RuleRegistry`.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<RuleEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: RuleEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn register_all(&mut self, entries: &[RuleEntry]) -> &mut Self {
        self.entries.extend_from_slice(entries);
        self
    }

    /// Validate and freeze. Rejects duplicate names and candidates that
    /// share kind, rank and predicate.
    pub fn build(self) -> Result<RuleRegistry, RegistryError> {
        let mut names: FxHashSet<&'static str> = FxHashSet::default();
        let mut by_kind: FxHashMap<SyntaxKind, Vec<RuleEntry>> = FxHashMap::default();
        for entry in self.entries {
            if !names.insert(entry.name) {
                return Err(RegistryError::DuplicateName { name: entry.name });
            }
            let candidates = by_kind.entry(entry.kind).or_default();
            if let Some(existing) = candidates.iter().find(|c| {
                c.rank() == entry.rank() && std::ptr::fn_addr_eq(c.predicate, entry.predicate)
            }) {
                return Err(RegistryError::DuplicateCandidate {
                    first: existing.name,
                    second: entry.name,
                });
            }
            candidates.push(entry);
        }
        for candidates in by_kind.values_mut() {
            // Stable: registration order is kept among equal ranks
            candidates.sort_by(|a, b| b.rank().cmp(&a.rank()));
        }
        Ok(RuleRegistry {
            by_kind,
            rule_count: names.len(),
            poisoned: AtomicBool::new(false),
        })
    }
}

/// Immutable rule table, shared read-only across files.
pub struct RuleRegistry {
    by_kind: FxHashMap<SyntaxKind, Vec<RuleEntry>>,
    rule_count: usize,
    poisoned: AtomicBool,
}

static STANDARD: Lazy<Result<RuleRegistry, RegistryError>> = Lazy::new(|| {
    let mut builder = RegistryBuilder::new();
    builder.register_all(STANDARD_RULES);
    builder.build()
});

impl RuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The process-wide registry built from `STANDARD_RULES`.
    pub fn standard() -> Result<&'static RuleRegistry, RegistryError> {
        STANDARD.as_ref().map_err(Clone::clone)
    }

    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Candidates for a kind, best first.
    pub fn rules_for(&self, kind: SyntaxKind) -> &[RuleEntry] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::Acquire)
    }

    /// The single best-matching rule for `node`.
    pub fn resolve(&self, cx: &LowerCx<'_>, node: NodeIndex) -> Result<&RuleEntry, RegistryError> {
        if self.is_poisoned() {
            return Err(RegistryError::Poisoned);
        }
        let kind = cx.unit().kind(node);
        let candidates = self.rules_for(kind);
        let Some(pos) = candidates.iter().position(|c| (c.predicate)(cx, node)) else {
            return Err(RegistryError::NoRule { kind, node });
        };
        let chosen = &candidates[pos];
        if let Some(rival) = candidates[pos + 1..]
            .iter()
            .take_while(|c| c.rank() == chosen.rank())
            .find(|c| (c.predicate)(cx, node))
        {
            let err = RegistryError::Ambiguous {
                kind,
                node,
                first: chosen.name,
                second: rival.name,
            };
            if !self.poisoned.swap(true, Ordering::AcqRel) {
                tracing::error!(%err, file = cx.unit().file_name(), "rule registry poisoned");
            }
            return Err(err);
        }
        tracing::trace!(rule = chosen.name, %node, "rule selected");
        Ok(chosen)
    }
}
