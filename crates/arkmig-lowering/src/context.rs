//! Lowering context.
//!
//! `LowerCx` carries everything a rule may read or write while one file is
//! migrated. File-wide state (visited set, diagnostics, statistics, hoisted
//! declarations) lives directly on the context; state that belongs to one
//! top-level declaration is grouped in `DeclState` and reset between them.

use crate::dispatch::MigrationStats;
use crate::options::MigrationOptions;
use crate::plan::MigrationPlan;
use crate::registry::{RegistryError, RuleRegistry};
use arkmig_arkts::{PlaceholderFlavor, TargetNode, TargetType};
use arkmig_common::limits::MAX_NAME_SUFFIX;
use arkmig_common::{Diagnostic, DiagnosticCollector, diagnostic_codes};
use arkmig_java::{JavaType, NodeData, NodeIndex, SourceUnit};
use arkmig_resolver::{Scopes, TypeResolver};
use fixedbitset::FixedBitSet;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// One type declaration being lowered.
#[derive(Debug, Default)]
pub struct TypeFrame {
    pub decl: Option<NodeIndex>,
    /// Members moved to the declaration's companion class.
    pub companion_members: Vec<TargetNode>,
}

/// State scoped to one top-level declaration.
#[derive(Debug, Default)]
pub(crate) struct DeclState {
    pub(crate) scopes: Scopes,
    pub(crate) type_frames: Vec<TypeFrame>,
    /// Synthesized declarations emitted after the current top-level one.
    pub(crate) auxiliaries: Vec<TargetNode>,
    /// Parameter name to lowered argument, innermost last.
    pub(crate) inline_bindings: Vec<FxHashMap<String, TargetNode>>,
    /// Receiver name replacing `this` in bodies moved to a companion.
    pub(crate) self_receiver: Option<String>,
    /// Statements to emit before the statement being lowered. `None`
    /// marks a context where nothing may be inserted.
    pub(crate) preludes: Vec<Option<Vec<TargetNode>>>,
    /// Expression whose value is discarded by its statement.
    pub(crate) discarded: Option<NodeIndex>,
    pub(crate) allocated: FxHashSet<String>,
}

pub struct LowerCx<'a> {
    unit: &'a SourceUnit,
    resolver: &'a TypeResolver<'a>,
    plan: &'a MigrationPlan,
    options: &'a MigrationOptions,
    pub(crate) registry: &'a RuleRegistry,
    diagnostics: DiagnosticCollector,
    visited: FixedBitSet,
    pub(crate) stats: MigrationStats,
    pub(crate) depth: u32,
    pub(crate) fatal: Option<RegistryError>,
    /// Nested declarations moved to top level, in completion order.
    hoisted: Vec<TargetNode>,
    pub(crate) decl: DeclState,
}

impl<'a> LowerCx<'a> {
    pub fn new(
        unit: &'a SourceUnit,
        resolver: &'a TypeResolver<'a>,
        plan: &'a MigrationPlan,
        options: &'a MigrationOptions,
        registry: &'a RuleRegistry,
    ) -> Self {
        let mut decl = DeclState::default();
        decl.scopes = Scopes::new();
        LowerCx {
            unit,
            resolver,
            plan,
            options,
            registry,
            diagnostics: DiagnosticCollector::new(unit.file_name()),
            visited: FixedBitSet::with_capacity(unit.len()),
            stats: MigrationStats {
                total_nodes: unit.len(),
                ..MigrationStats::default()
            },
            depth: 0,
            fatal: None,
            hoisted: Vec::new(),
            decl,
        }
    }

    #[inline]
    pub fn unit(&self) -> &'a SourceUnit {
        self.unit
    }

    #[inline]
    pub fn resolver(&self) -> &'a TypeResolver<'a> {
        self.resolver
    }

    #[inline]
    pub fn plan(&self) -> &'a MigrationPlan {
        self.plan
    }

    #[inline]
    pub fn options(&self) -> &'a MigrationOptions {
        self.options
    }

    pub fn stats(&self) -> &MigrationStats {
        &self.stats
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    /// Record a diagnostic at the position of `at`.
    pub fn report(&mut self, at: NodeIndex, code: u32, args: &[&str]) {
        self.diagnostics.report(code, self.unit.position(at), args);
    }

    // =========================================================================
    // Coverage
    // =========================================================================

    /// Mark one node visited. Returns false for a second visit.
    pub(crate) fn mark_visited(&mut self, idx: NodeIndex) -> bool {
        let i = idx.index();
        if i >= self.visited.len() {
            return false;
        }
        if self.visited.contains(i) {
            debug!(node = %idx, kind = %self.unit.kind(idx), "node visited twice");
            return false;
        }
        self.visited.insert(i);
        self.stats.visited += 1;
        true
    }

    pub fn is_visited(&self, idx: NodeIndex) -> bool {
        self.visited.contains(idx.index())
    }

    /// Mark a node consumed by the current rule without dispatching it.
    pub fn claim(&mut self, idx: NodeIndex) {
        self.mark_visited(idx);
    }

    /// Mark a node and everything below it consumed.
    pub fn claim_subtree(&mut self, idx: NodeIndex) {
        for node in self.unit.subtree(idx) {
            if !self.is_visited(node) {
                self.mark_visited(node);
            }
        }
    }

    pub(crate) fn unvisited_count(&self) -> usize {
        self.unit.len() - self.visited.count_ones(..)
    }

    /// Keep the original text of `idx` in the output and claim its subtree.
    pub fn placeholder(&mut self, idx: NodeIndex) -> TargetNode {
        let flavor = self.flavor_of(idx);
        self.placeholder_as(idx, flavor)
    }

    pub fn placeholder_as(&mut self, idx: NodeIndex, flavor: PlaceholderFlavor) -> TargetNode {
        self.claim_subtree(idx);
        self.stats.placeholders += 1;
        let text = self.unit.text_of(idx).trim();
        let text = if text.is_empty() {
            self.unit.kind(idx).describe()
        } else {
            text
        };
        TargetNode::placeholder(text, flavor)
    }

    /// Placeholder flavor that keeps the output well formed where `idx` sits.
    pub fn flavor_of(&self, idx: NodeIndex) -> PlaceholderFlavor {
        let kind = self.unit.kind(idx);
        if kind.is_expression() {
            PlaceholderFlavor::Expression
        } else if kind.is_statement() {
            PlaceholderFlavor::Statement
        } else {
            PlaceholderFlavor::Member
        }
    }

    // =========================================================================
    // Lowering helpers
    // =========================================================================

    /// Lower an expression to exactly one node. A rule producing anything
    /// else leaves the original text behind with an error.
    pub fn lower_expr(&mut self, idx: NodeIndex) -> TargetNode {
        match <[TargetNode; 1]>::try_from(self.lower(idx)) {
            Ok([node]) => node,
            Err(nodes) => {
                let kind = self.unit.kind(idx);
                debug!(node = %idx, %kind, produced = nodes.len(), "expression did not lower to one node");
                self.report(idx, diagnostic_codes::NO_APPLICABLE_RULE, &[kind.describe()]);
                self.placeholder_as(idx, PlaceholderFlavor::Expression)
            }
        }
    }

    /// Lower an expression whose value its statement throws away.
    pub fn lower_discarded(&mut self, idx: NodeIndex) -> TargetNode {
        let previous = self.decl.discarded.replace(idx);
        let lowered = self.lower_expr(idx);
        self.decl.discarded = previous;
        lowered
    }

    pub fn is_discarded(&self, idx: NodeIndex) -> bool {
        self.decl.discarded == Some(idx)
    }

    /// Lower a type node.
    pub fn lower_type(&mut self, idx: NodeIndex) -> TargetType {
        let lowered = self.lower(idx);
        match lowered.as_slice() {
            [TargetNode::Type(ty)] => ty.clone(),
            _ => TargetType::object(),
        }
    }

    /// Lower a statement list, inserting each statement's preludes before it.
    pub fn lower_stmts(&mut self, stmts: &[NodeIndex]) -> Vec<TargetNode> {
        let mut out = Vec::with_capacity(stmts.len());
        for &stmt in stmts {
            self.decl.preludes.push(Some(Vec::new()));
            let lowered = self.lower(stmt);
            let prelude = self.decl.preludes.pop().flatten().unwrap_or_default();
            out.extend(prelude);
            out.extend(lowered);
        }
        out
    }

    /// Statements of a body block, in a fresh scope. The block itself is
    /// consumed here.
    pub fn lower_body(&mut self, block: NodeIndex) -> Vec<TargetNode> {
        self.claim(block);
        let stmts = match self.unit.data(block) {
            NodeData::Block { statements } => statements.as_slice(),
            _ => std::slice::from_ref(&block),
        };
        self.with_scope(|cx| cx.lower_stmts(stmts))
    }

    /// A branch or loop body, always as a block.
    pub fn lower_embedded(&mut self, stmt: NodeIndex) -> TargetNode {
        if matches!(self.unit.data(stmt), NodeData::Block { .. }) {
            let mut lowered = self.lower(stmt);
            if lowered.len() == 1 {
                if let Some(node @ TargetNode::Block(_)) = lowered.pop() {
                    return node;
                }
            }
            return TargetNode::Block(lowered);
        }
        let stmts = self.with_scope(|cx| cx.lower_stmts(&[stmt]));
        TargetNode::Block(stmts)
    }

    /// Run `f` where preludes cannot be inserted (loop conditions, the
    /// conditionally evaluated side of `&&`, `||` and `?:`).
    pub fn no_prelude<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.decl.preludes.push(None);
        let result = f(self);
        self.decl.preludes.pop();
        result
    }

    pub fn can_prelude(&self) -> bool {
        matches!(self.decl.preludes.last(), Some(Some(_)))
    }

    /// Queue a statement before the current one. Returns false where that
    /// is not possible.
    pub fn push_prelude(&mut self, stmt: TargetNode) -> bool {
        match self.decl.preludes.last_mut() {
            Some(Some(buffer)) => {
                buffer.push(stmt);
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Scopes and receivers
    // =========================================================================

    pub fn scopes(&self) -> &Scopes {
        &self.decl.scopes
    }

    pub fn declare(&mut self, name: &str, ty: JavaType) {
        self.decl.scopes.declare(name, ty);
    }

    pub fn with_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.decl.scopes.push();
        let result = f(self);
        self.decl.scopes.pop();
        result
    }

    /// `this`, or the explicit receiver of a body moved to a companion.
    pub fn receiver(&self) -> TargetNode {
        match &self.decl.self_receiver {
            Some(name) => TargetNode::id(name.as_str()),
            None => TargetNode::This,
        }
    }

    /// Run `f` with `this` rewritten to `name`.
    pub fn with_self_receiver<R>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.decl.self_receiver.replace(name.to_string());
        let result = f(self);
        self.decl.self_receiver = previous;
        result
    }

    pub fn inline_binding(&self, name: &str) -> Option<&TargetNode> {
        self.decl.inline_bindings.last()?.get(name)
    }

    /// Run `f` with parameter names bound to already lowered arguments and
    /// no caller locals in scope.
    pub fn with_inline_bindings<R>(
        &mut self,
        bindings: FxHashMap<String, TargetNode>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.decl.inline_bindings.push(bindings);
        let caller_scopes = std::mem::replace(&mut self.decl.scopes, Scopes::new());
        let result = f(self);
        self.decl.scopes = caller_scopes;
        self.decl.inline_bindings.pop();
        result
    }

    /// An identifier unused in the file and in this declaration.
    pub fn fresh_name(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 1u32;
        while (self.plan.is_taken(&candidate) || self.decl.allocated.contains(&candidate))
            && n < MAX_NAME_SUFFIX
        {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.decl.allocated.insert(candidate.clone());
        candidate
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Reset per-declaration state before a top-level declaration.
    pub(crate) fn begin_declaration(&mut self) {
        self.decl = DeclState {
            scopes: Scopes::new(),
            ..DeclState::default()
        };
    }

    pub fn push_type_frame(&mut self, decl: NodeIndex) {
        self.decl.type_frames.push(TypeFrame {
            decl: Some(decl),
            companion_members: Vec::new(),
        });
    }

    pub fn pop_type_frame(&mut self) -> TypeFrame {
        self.decl.type_frames.pop().unwrap_or_default()
    }

    /// Add a member to the companion of the innermost type being lowered.
    pub fn add_companion_member(&mut self, member: TargetNode) {
        if let Some(frame) = self.decl.type_frames.last_mut() {
            frame.companion_members.push(member);
        }
    }

    pub fn add_auxiliary(&mut self, decl: TargetNode) {
        self.decl.auxiliaries.push(decl);
    }

    pub fn take_auxiliaries(&mut self) -> Vec<TargetNode> {
        std::mem::take(&mut self.decl.auxiliaries)
    }

    pub fn hoist(&mut self, decls: Vec<TargetNode>) {
        self.hoisted.extend(decls);
    }

    pub fn take_hoisted(&mut self) -> Vec<TargetNode> {
        std::mem::take(&mut self.hoisted)
    }

    /// Close the run: coverage check, then hand over the diagnostics.
    pub(crate) fn finish(mut self) -> (Vec<Diagnostic>, MigrationStats, Option<RegistryError>) {
        let unvisited = self.unvisited_count();
        if unvisited > 0 && self.fatal.is_none() {
            let count = unvisited.to_string();
            let root = self.unit.root();
            self.report(root, diagnostic_codes::SOURCE_NODES_NOT_VISITED, &[&count]);
        }
        (self.diagnostics.into_vec(), self.stats, self.fatal)
    }
}
