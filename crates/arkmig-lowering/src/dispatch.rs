//! Node Dispatcher.
//!
//! `LowerCx::lower` is the single entry point rules use to lower a child.
//! It guards nesting depth, asks the registry for the best rule, records
//! coverage and statistics, and turns a missing rule into a placeholder plus
//! an error diagnostic so the rest of the file still migrates.

use crate::context::LowerCx;
use crate::options::MigrationOptions;
use crate::plan::MigrationPlan;
use crate::registry::{RegistryError, RuleRegistry};
use arkmig_arkts::{ArkTsPrinter, TargetNode};
use arkmig_common::{Diagnostic, DiagnosticSeverity, diagnostic_codes};
use arkmig_java::{NodeIndex, SourceUnit, SymbolTable};
use arkmig_resolver::TypeResolver;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info_span, warn};

/// Counters for one migrated file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    pub total_nodes: usize,
    pub visited: usize,
    pub placeholders: usize,
    /// Applications per rule name, in first-use order.
    pub rule_applications: IndexMap<&'static str, u32>,
}

impl MigrationStats {
    pub fn is_complete(&self) -> bool {
        self.visited == self.total_nodes
    }
}

/// The migrated form of one file.
#[derive(Debug, Clone)]
pub struct MigrationResult {
    pub file: String,
    /// Always a `TargetNode::Module`.
    pub module: TargetNode,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: MigrationStats,
}

impl MigrationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn with_code(&self, code: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    /// ArkTS text of the module.
    pub fn render(&self) -> String {
        ArkTsPrinter::emit_to_string(&self.module)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl<'a> LowerCx<'a> {
    /// Lower one source node with its best-matching rule.
    pub fn lower(&mut self, idx: NodeIndex) -> Vec<TargetNode> {
        if self.fatal.is_some() {
            return vec![self.placeholder(idx)];
        }
        if self.depth >= self.options().max_depth {
            let limit = self.options().max_depth.to_string();
            self.report(idx, diagnostic_codes::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[&limit]);
            return vec![self.placeholder(idx)];
        }

        let registry = self.registry;
        let entry = match registry.resolve(self, idx) {
            Ok(entry) => *entry,
            Err(RegistryError::NoRule { kind, node }) => {
                debug!(%node, %kind, "no applicable rule");
                self.report(idx, diagnostic_codes::NO_APPLICABLE_RULE, &[kind.describe()]);
                return vec![self.placeholder(idx)];
            }
            Err(err) => {
                self.fatal.get_or_insert(err);
                return vec![self.placeholder(idx)];
            }
        };

        self.mark_visited(idx);
        self.depth += 1;
        let lowered = (entry.rule)(self, idx);
        self.depth -= 1;
        *self.stats.rule_applications.entry(entry.name).or_insert(0) += 1;
        debug!(rule = entry.name, node = %idx, produced = lowered.len(), "rule applied");
        lowered
    }
}

/// Migrate one file with the standard rule registry.
pub fn migrate(
    unit: &SourceUnit,
    symbols: &SymbolTable,
    options: &MigrationOptions,
) -> Result<MigrationResult, MigrationError> {
    let registry = RuleRegistry::standard()?;
    migrate_with(registry, unit, symbols, options)
}

/// Migrate one file with an explicit registry.
pub fn migrate_with(
    registry: &RuleRegistry,
    unit: &SourceUnit,
    symbols: &SymbolTable,
    options: &MigrationOptions,
) -> Result<MigrationResult, MigrationError> {
    let span = info_span!("migrate", file = unit.file_name(), nodes = unit.len());
    let _enter = span.enter();

    let resolver = TypeResolver::new(unit, symbols);
    let plan = MigrationPlan::build(&resolver, options);
    let mut cx = LowerCx::new(unit, &resolver, &plan, options, registry);
    let lowered = cx.lower(unit.root());
    let (diagnostics, stats, fatal) = cx.finish();
    if let Some(err) = fatal {
        return Err(err.into());
    }
    if !stats.is_complete() {
        warn!(
            visited = stats.visited,
            total = stats.total_nodes,
            "source nodes left unvisited"
        );
    }

    let module = match <[TargetNode; 1]>::try_from(lowered) {
        Ok([module @ TargetNode::Module(_)]) => module,
        Ok([other]) => TargetNode::Module(vec![other]),
        Err(items) => TargetNode::Module(items),
    };
    Ok(MigrationResult {
        file: unit.file_name().to_string(),
        module,
        diagnostics,
        stats,
    })
}
