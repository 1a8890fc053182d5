//! Migration Plan.
//!
//! File-wide decisions made before any rule runs. Rules only read the plan,
//! so every rewrite that has to agree across declarations and call sites
//! (overload renames, hoisted type names, companion classes, inlined helpers)
//! is decided once, in source order, and stays deterministic.

use crate::options::{MigrationOptions, NestedTypePolicy, PrivateMethodStrategy};
use arkmig_common::limits::MAX_NAME_SUFFIX;
use arkmig_java::{BinaryOp, JavaType, MethodSymbol, Modifiers, NodeData, NodeIndex, SourceUnit, SyntaxKind, UnaryOp};
use arkmig_java::symbols::is_library_name;
use arkmig_resolver::TypeResolver;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// A method identified by declaring type, name and declared parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    pub owner: String,
    pub name: String,
    pub params: Vec<JavaType>,
}

impl MethodKey {
    pub fn new(owner: &str, name: &str, params: &[JavaType]) -> Self {
        MethodKey {
            owner: owner.to_string(),
            name: name.to_string(),
            params: params.to_vec(),
        }
    }
}

/// A synthesized method in a class that inherits a default method from an
/// interface declared in the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct Forwarder {
    /// Qualified interface name.
    pub interface: String,
    pub companion: String,
    /// The default method declaration in the interface.
    pub method: NodeIndex,
    /// Target name of the method, after overload renaming.
    pub name: String,
}

/// A default method inherited from an interface declared outside the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDefault {
    pub interface: String,
    pub method: String,
}

/// How the private instance methods of one interface were migrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrivateCounts {
    pub inlined: usize,
    pub hoisted: usize,
}

#[derive(Debug, Default)]
pub struct MigrationPlan {
    taken: FxHashSet<String>,
    decl_names: FxHashMap<NodeIndex, String>,
    type_names: FxHashMap<String, String>,
    hoisted: FxHashSet<NodeIndex>,
    companions: IndexMap<NodeIndex, String>,
    companions_by_type: FxHashMap<String, String>,
    inline_methods: FxHashSet<NodeIndex>,
    private_counts: FxHashMap<NodeIndex, PrivateCounts>,
    method_decls: FxHashMap<MethodKey, NodeIndex>,
    renames: IndexMap<MethodKey, String>,
    forwarders: FxHashMap<NodeIndex, Vec<Forwarder>>,
    external_defaults: FxHashMap<NodeIndex, Vec<ExternalDefault>>,
    contracts: FxHashMap<NodeIndex, String>,
    bound_interfaces: FxHashMap<NodeIndex, String>,
}

impl MigrationPlan {
    pub fn build(resolver: &TypeResolver<'_>, options: &MigrationOptions) -> Self {
        let mut plan = MigrationPlan::default();
        let unit = resolver.unit();
        plan.collect_taken(unit);
        plan.assign_type_names(resolver, options);
        plan.collect_method_decls(resolver);
        plan.choose_private_strategy(resolver, options);
        plan.assign_companions(resolver);
        if !options.target_overloading {
            plan.assign_renames(resolver);
        }
        plan.collect_forwarders(resolver);
        if options.single_supertype {
            plan.assign_contracts(resolver);
        }
        plan.assign_bound_interfaces(resolver);
        debug!(
            companions = plan.companions.len(),
            renames = plan.renames.len(),
            inlined = plan.inline_methods.len(),
            hoisted = plan.hoisted.len(),
            "migration plan built"
        );
        plan
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether an identifier already occurs in the file or was synthesized.
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Target name of a type declaration.
    pub fn type_name(&self, decl: NodeIndex) -> Option<&str> {
        self.decl_names.get(&decl).map(String::as_str)
    }

    /// Target name of an in-file type, by qualified name.
    pub fn target_type_name(&self, qualified: &str) -> Option<&str> {
        self.type_names.get(qualified).map(String::as_str)
    }

    pub fn is_hoisted(&self, decl: NodeIndex) -> bool {
        self.hoisted.contains(&decl)
    }

    pub fn companion_of(&self, interface: NodeIndex) -> Option<&str> {
        self.companions.get(&interface).map(String::as_str)
    }

    /// Companion of an in-file interface, by qualified name.
    pub fn companion_named(&self, qualified: &str) -> Option<&str> {
        self.companions_by_type.get(qualified).map(String::as_str)
    }

    pub fn companions(&self) -> impl Iterator<Item = (NodeIndex, &str)> {
        self.companions.iter().map(|(&d, n)| (d, n.as_str()))
    }

    pub fn is_inlined(&self, method: NodeIndex) -> bool {
        self.inline_methods.contains(&method)
    }

    pub fn private_counts(&self, interface: NodeIndex) -> PrivateCounts {
        self.private_counts
            .get(&interface)
            .copied()
            .unwrap_or_default()
    }

    /// Declaration node of an in-file method.
    pub fn method_decl(&self, owner: &str, method: &MethodSymbol) -> Option<NodeIndex> {
        self.method_decls
            .get(&MethodKey::new(owner, &method.name, &method.params))
            .copied()
    }

    /// New name of a renamed overload, if it was renamed.
    pub fn renamed(&self, owner: &str, name: &str, params: &[JavaType]) -> Option<&str> {
        self.renames
            .get(&MethodKey::new(owner, name, params))
            .map(String::as_str)
    }

    /// Target name of a method: its rename, or the declared name.
    pub fn method_name<'s>(&'s self, owner: &str, name: &'s str, params: &[JavaType]) -> &'s str {
        self.renamed(owner, name, params).unwrap_or(name)
    }

    pub fn renames(&self) -> impl Iterator<Item = (&MethodKey, &str)> {
        self.renames.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn forwarders(&self, class: NodeIndex) -> &[Forwarder] {
        self.forwarders.get(&class).map_or(&[], Vec::as_slice)
    }

    pub fn external_defaults(&self, class: NodeIndex) -> &[ExternalDefault] {
        self.external_defaults.get(&class).map_or(&[], Vec::as_slice)
    }

    /// Merged contract of a class implementing several interfaces.
    pub fn contract_of(&self, class: NodeIndex) -> Option<&str> {
        self.contracts.get(&class).map(String::as_str)
    }

    /// Auxiliary interface aggregating the extra bounds of a type parameter.
    pub fn bound_interface(&self, type_param: NodeIndex) -> Option<&str> {
        self.bound_interfaces.get(&type_param).map(String::as_str)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Reserve `base`, or `base1`, `base2`, ... when it is taken.
    fn unique(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 1u32;
        while self.taken.contains(&candidate) && n < MAX_NAME_SUFFIX {
            candidate = format!("{base}{n}");
            n += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }

    fn collect_taken(&mut self, unit: &SourceUnit) {
        for (_, node) in unit.iter() {
            match &node.data {
                NodeData::FieldAccess { name, .. } | NodeData::MethodCall { name, .. } => {
                    self.taken.insert(name.clone());
                }
                NodeData::ClassType { name, .. } => {
                    self.taken.extend(name.split('.').map(str::to_string));
                }
                data => {
                    if let Some(name) = data.name() {
                        self.taken.insert(name.to_string());
                    }
                }
            }
        }
    }

    fn assign_type_names(&mut self, resolver: &TypeResolver<'_>, options: &MigrationOptions) {
        let unit = resolver.unit();
        let declared: Vec<(String, NodeIndex)> = resolver
            .declared_types()
            .map(|(q, d)| (q.to_string(), d))
            .collect();
        // Outer declarations come first, so their target names are known
        for (qualified, decl) in declared {
            let simple = unit.data(decl).name().unwrap_or_default().to_string();
            let target = match resolver.enclosing_type(decl) {
                Some(outer) if options.nested_types == NestedTypePolicy::Hoist => {
                    let outer_name = self.type_name(outer).unwrap_or_default().to_string();
                    self.hoisted.insert(decl);
                    self.unique(&format!("{outer_name}_{simple}"))
                }
                _ => simple,
            };
            self.decl_names.insert(decl, target.clone());
            self.type_names.insert(qualified, target);
        }
    }

    fn collect_method_decls(&mut self, resolver: &TypeResolver<'_>) {
        let unit = resolver.unit();
        for (qualified, decl) in resolver.declared_types() {
            let Some(symbol) = resolver.symbol(qualified) else {
                continue;
            };
            let methods = unit
                .data(decl)
                .members()
                .iter()
                .copied()
                .filter(|&m| unit.kind(m) == SyntaxKind::MethodDeclaration);
            for (method, node) in symbol.methods.iter().zip(methods) {
                self.method_decls
                    .insert(MethodKey::new(qualified, &method.name, &method.params), node);
            }
        }
    }

    fn choose_private_strategy(&mut self, resolver: &TypeResolver<'_>, options: &MigrationOptions) {
        let unit = resolver.unit();
        let interfaces: Vec<NodeIndex> = resolver
            .declared_types()
            .map(|(_, d)| d)
            .filter(|&d| resolver.is_interface_decl(d))
            .collect();
        for iface in interfaces {
            let private: Vec<NodeIndex> = unit
                .data(iface)
                .members()
                .iter()
                .copied()
                .filter(|&m| is_private_instance_method(unit, m))
                .collect();
            if private.is_empty() {
                continue;
            }
            let inlinable: Vec<NodeIndex> = private
                .iter()
                .copied()
                .filter(|&m| is_inlinable(resolver, iface, m))
                .collect();
            let inline: Vec<NodeIndex> = match options.private_methods {
                PrivateMethodStrategy::Auto if inlinable.len() == private.len() => inlinable,
                PrivateMethodStrategy::Auto | PrivateMethodStrategy::Hoist => Vec::new(),
                PrivateMethodStrategy::Inline => inlinable,
            };
            let counts = PrivateCounts {
                inlined: inline.len(),
                hoisted: private.len() - inline.len(),
            };
            debug!(
                interface = unit.data(iface).name().unwrap_or_default(),
                inlined = counts.inlined,
                hoisted = counts.hoisted,
                "private method strategy"
            );
            self.inline_methods.extend(inline);
            self.private_counts.insert(iface, counts);
        }
    }

    fn assign_companions(&mut self, resolver: &TypeResolver<'_>) {
        let unit = resolver.unit();
        let interfaces: Vec<(String, NodeIndex)> = resolver
            .declared_types()
            .filter(|&(_, d)| resolver.is_interface_decl(d))
            .map(|(q, d)| (q.to_string(), d))
            .collect();
        for (qualified, iface) in interfaces {
            let needs_companion = unit.data(iface).members().iter().any(|&m| {
                match unit.data(m) {
                    NodeData::FieldDeclaration { .. } => true,
                    NodeData::MethodDeclaration {
                        modifiers, body, ..
                    } => {
                        modifiers.is_static()
                            || (body.is_some() && !self.inline_methods.contains(&m))
                    }
                    _ => false,
                }
            });
            if !needs_companion {
                continue;
            }
            let base = format!("{}Companion", self.type_name(iface).unwrap_or_default());
            let companion = self.unique(&base);
            self.companions_by_type.insert(qualified, companion.clone());
            self.companions.insert(iface, companion);
        }
    }

    /// Rename overloads sharing a name within a hierarchy component.
    ///
    /// Signatures declared outside the file, or overriding a library
    /// method, keep their name. Otherwise the zero-parameter signature keeps
    /// the base name and every other one gets a parameter-type suffix.
    fn assign_renames(&mut self, resolver: &TypeResolver<'_>) {
        let components: Vec<Vec<String>> = resolver
            .components()
            .iter()
            .map(|(_, members)| members.to_vec())
            .collect();
        for members in components {
            let mut by_name: IndexMap<String, IndexMap<Vec<JavaType>, bool>> = IndexMap::new();
            for owner in &members {
                let Some(symbol) = resolver.symbol(owner) else {
                    continue;
                };
                let in_file = resolver.is_declared_in_file(owner);
                for method in &symbol.methods {
                    let fixed = !in_file || overrides_library(resolver, owner, method);
                    let fixed_flag = by_name
                        .entry(method.name.clone())
                        .or_default()
                        .entry(method.params.clone())
                        .or_insert(false);
                    *fixed_flag |= fixed;
                }
            }

            for (name, signatures) in by_name {
                if signatures.len() < 2 {
                    continue;
                }
                let any_fixed = signatures.values().any(|&fixed| fixed);
                let base_holder = if any_fixed {
                    None
                } else {
                    signatures.keys().find(|p| p.is_empty()).cloned()
                };
                for (params, fixed) in signatures {
                    if fixed || base_holder.as_ref() == Some(&params) {
                        continue;
                    }
                    let suffix = if params.is_empty() {
                        "void".to_string()
                    } else {
                        params
                            .iter()
                            .map(JavaType::identifier_fragment)
                            .collect::<Vec<_>>()
                            .join("_")
                    };
                    let new_name = self.unique(&format!("{name}_{suffix}"));
                    for owner in &members {
                        let declares = resolver.is_declared_in_file(owner)
                            && resolver.symbol(owner).is_some_and(|s| {
                                s.methods_named(&name).any(|m| m.params == params)
                            });
                        if declares {
                            self.renames
                                .insert(MethodKey::new(owner, &name, &params), new_name.clone());
                        }
                    }
                }
            }
        }
    }

    fn collect_forwarders(&mut self, resolver: &TypeResolver<'_>) {
        let classes: Vec<(String, NodeIndex)> = resolver
            .declared_types()
            .filter(|&(_, d)| !resolver.is_interface_decl(d))
            .map(|(q, d)| (q.to_string(), d))
            .collect();
        for (qualified, class) in classes {
            let closure = match resolver.supertypes_closure(&qualified) {
                Ok(closure) => closure,
                Err(err) => {
                    debug!(%err, class = %qualified, "skipping default method forwarders");
                    continue;
                }
            };
            let class_type = resolver.type_of_decl(class);
            let superclass = resolver
                .symbol(&qualified)
                .and_then(|s| s.superclass.as_ref())
                .and_then(|t| t.class_name())
                .filter(|name| resolver.is_declared_in_file(name))
                .map(str::to_string);
            let inherited_from_super = |iface: &str| {
                superclass.as_deref().is_some_and(|sup| {
                    resolver
                        .supertypes_closure(sup)
                        .is_ok_and(|c| c.iter().any(|t| t == iface))
                })
            };

            for iface in closure.iter().filter(|t| resolver.is_interface(t)) {
                if inherited_from_super(iface) {
                    continue;
                }
                let Some(symbol) = resolver.symbol(iface) else {
                    continue;
                };
                for method in symbol.methods.iter().filter(|m| is_default_method(m)) {
                    let provider = resolver
                        .methods_of(&class_type, &method.name)
                        .into_iter()
                        .find(|c| c.declared.same_params(method));
                    if provider.is_none_or(|p| p.owner != *iface) {
                        continue;
                    }
                    if resolver.is_declared_in_file(iface) {
                        let Some(decl) = self.method_decl(iface, method) else {
                            continue;
                        };
                        let forwarder = Forwarder {
                            interface: iface.clone(),
                            companion: self.companion_named(iface).unwrap_or_default().to_string(),
                            method: decl,
                            name: self
                                .method_name(iface, &method.name, &method.params)
                                .to_string(),
                        };
                        self.forwarders.entry(class).or_default().push(forwarder);
                    } else {
                        self.external_defaults
                            .entry(class)
                            .or_default()
                            .push(ExternalDefault {
                                interface: iface.clone(),
                                method: method.name.clone(),
                            });
                    }
                }
            }
        }
    }

    fn assign_contracts(&mut self, resolver: &TypeResolver<'_>) {
        let unit = resolver.unit();
        let classes: Vec<NodeIndex> = resolver
            .declared_types()
            .map(|(_, d)| d)
            .filter(|&d| {
                matches!(unit.data(d), NodeData::ClassDeclaration { implements, .. } if implements.len() > 1)
            })
            .collect();
        for class in classes {
            let base = format!("{}Contract", self.type_name(class).unwrap_or_default());
            let contract = self.unique(&base);
            self.contracts.insert(class, contract);
        }
    }

    fn assign_bound_interfaces(&mut self, resolver: &TypeResolver<'_>) {
        let unit = resolver.unit();
        let params: Vec<NodeIndex> = unit
            .iter()
            .filter(|(_, node)| {
                matches!(&node.data, NodeData::TypeParameter { bounds, .. } if bounds.len() > 2)
            })
            .map(|(idx, _)| idx)
            .collect();
        for param in params {
            let Some(owner) = unit.parent(param) else {
                continue;
            };
            let owner_name = match unit.data(owner) {
                NodeData::MethodDeclaration { name, .. } => {
                    let outer = resolver
                        .enclosing_type(owner)
                        .and_then(|t| self.type_name(t))
                        .unwrap_or_default();
                    format!("{outer}_{name}")
                }
                _ => self.type_name(owner).unwrap_or_default().to_string(),
            };
            let param_name = unit.data(param).name().unwrap_or_default();
            let aux = self.unique(&format!("{owner_name}_{param_name}Bounds"));
            self.bound_interfaces.insert(param, aux);
        }
    }
}

fn is_default_method(method: &MethodSymbol) -> bool {
    method.has_body && !method.is_static() && !method.modifiers.is_private()
}

fn is_private_instance_method(unit: &SourceUnit, member: NodeIndex) -> bool {
    matches!(
        unit.data(member),
        NodeData::MethodDeclaration { modifiers, body: Some(_), .. }
            if modifiers.contains(Modifiers::PRIVATE) && !modifiers.is_static()
    )
}

fn overrides_library(resolver: &TypeResolver<'_>, owner: &str, method: &MethodSymbol) -> bool {
    let receiver = match resolver.declaration_of(owner) {
        Some(decl) => resolver.type_of_decl(decl),
        None => JavaType::class(owner),
    };
    resolver.ancestry(&receiver).iter().skip(1).any(|ty| {
        let Some(symbol) = ty.class_name().filter(|n| is_library_name(n)).and_then(|n| resolver.symbol(n)) else {
            return false;
        };
        let args: Vec<JavaType> = if ty.type_args().len() == symbol.type_params.len() {
            ty.type_args().to_vec()
        } else {
            vec![JavaType::object(); symbol.type_params.len()]
        };
        symbol.methods_named(&method.name).any(|m| {
            m.params.len() == method.params.len()
                && m.params
                    .iter()
                    .zip(&method.params)
                    .all(|(p, q)| p.substitute(&symbol.type_params, &args) == *q)
        })
    })
}

/// The expression a single-statement method body reduces to.
pub(crate) fn inline_body(unit: &SourceUnit, method: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
    let NodeData::MethodDeclaration {
        body: Some(body), ..
    } = unit.data(method)
    else {
        return None;
    };
    let NodeData::Block { statements } = unit.data(*body) else {
        return None;
    };
    let [stmt] = statements.as_slice() else {
        return None;
    };
    match unit.data(*stmt) {
        NodeData::ReturnStatement { value: Some(value) } => Some((*stmt, *value)),
        NodeData::ExpressionStatement { expression } => Some((*stmt, *expression)),
        _ => None,
    }
}

fn is_inlinable(resolver: &TypeResolver<'_>, iface: NodeIndex, method: NodeIndex) -> bool {
    let unit = resolver.unit();
    let NodeData::MethodDeclaration { name, params, .. } = unit.data(method) else {
        return false;
    };
    let Some((stmt, value)) = inline_body(unit, method) else {
        return false;
    };

    // Another overload with the same arity would make call sites ambiguous
    let same_arity = unit
        .data(iface)
        .members()
        .iter()
        .filter(|&&m| {
            matches!(unit.data(m), NodeData::MethodDeclaration { name: n, params: p, .. }
                if n == name && p.len() == params.len())
        })
        .count();
    if same_arity != 1 {
        return false;
    }

    let call_sites: Vec<NodeIndex> = unit
        .subtree(iface)
        .into_iter()
        .filter(|&n| resolver.enclosing_type(n) == Some(iface))
        .filter(|&n| match unit.data(n) {
            NodeData::MethodCall {
                target,
                name: call_name,
                args,
                ..
            } => {
                call_name == name
                    && args.len() == params.len()
                    && target.is_none_or(|t| unit.kind(t) == SyntaxKind::This)
            }
            _ => false,
        })
        .collect();
    let [call] = call_sites.as_slice() else {
        return false;
    };
    let call = *call;
    if unit.is_within(call, method)
        || unit
            .ancestors(call)
            .any(|a| unit.kind(a) == SyntaxKind::InitializerBlock)
    {
        return false;
    }
    // A void body can only replace a call whose value is unused
    if unit.kind(stmt) == SyntaxKind::ExpressionStatement
        && unit.parent(call).map(|p| unit.kind(p)) != Some(SyntaxKind::ExpressionStatement)
    {
        return false;
    }

    let NodeData::MethodCall { args, .. } = unit.data(call) else {
        return false;
    };
    let body_names: Vec<&str> = unit
        .subtree(value)
        .into_iter()
        .filter_map(|n| match unit.data(n) {
            NodeData::Name { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    let used_once = params.iter().zip(args.iter()).all(|(&param, &arg)| {
        let param_name = unit.data(param).name().unwrap_or_default();
        match body_names.iter().filter(|&&n| n == param_name).count() {
            0 => is_pure(unit, arg),
            1 => true,
            _ => false,
        }
    });
    used_once && keeps_argument_order(unit, value, params, args)
}

/// Whether substituting the arguments into `value` evaluates the impure ones
/// exactly as the call would: once each, in declaration order, and before
/// any other side effect of the body.
fn keeps_argument_order(unit: &SourceUnit, value: NodeIndex, params: &[NodeIndex], args: &[NodeIndex]) -> bool {
    let impure: Vec<&str> = params
        .iter()
        .zip(args)
        .filter(|&(_, &arg)| !is_pure(unit, arg))
        .map(|(&param, _)| unit.data(param).name().unwrap_or_default())
        .collect();
    if impure.is_empty() {
        return true;
    }
    let order = unit.subtree(value);
    let uses: Vec<(usize, NodeIndex)> = order
        .iter()
        .enumerate()
        .filter(|&(_, &n)| matches!(unit.data(n), NodeData::Name { name } if impure.contains(&name.as_str())))
        .map(|(pos, &n)| (pos, n))
        .collect();
    let in_declaration_order = uses.len() == impure.len()
        && uses.iter().zip(&impure).all(|(&(_, n), &param)| {
            matches!(unit.data(n), NodeData::Name { name } if name == param)
        });
    if !in_declaration_order || uses.iter().any(|&(_, n)| is_conditional_operand(unit, n, value)) {
        return false;
    }
    let Some(&(last_pos, last_use)) = uses.last() else {
        return true;
    };
    order[..last_pos]
        .iter()
        .filter(|&&n| has_side_effect(unit.data(n)))
        .all(|&n| unit.is_within(last_use, n))
}

/// Whether `expr` sits in an operand that may not be evaluated at all.
fn is_conditional_operand(unit: &SourceUnit, expr: NodeIndex, root: NodeIndex) -> bool {
    let mut child = expr;
    for ancestor in unit.ancestors(expr) {
        if child == root {
            break;
        }
        let skipped = match unit.data(ancestor) {
            NodeData::Binary {
                op: BinaryOp::And | BinaryOp::Or,
                right,
                ..
            } => *right == child,
            NodeData::Conditional { condition, .. } => *condition != child,
            _ => false,
        };
        if skipped {
            return true;
        }
        child = ancestor;
    }
    false
}

fn has_side_effect(data: &NodeData) -> bool {
    match data {
        NodeData::MethodCall { .. } | NodeData::ObjectCreation { .. } | NodeData::Assignment { .. } => true,
        NodeData::Unary { op, .. } => matches!(
            op,
            UnaryOp::PreIncrement | UnaryOp::PreDecrement | UnaryOp::PostIncrement | UnaryOp::PostDecrement
        ),
        _ => false,
    }
}

/// Expressions that can be dropped without losing a side effect.
pub(crate) fn is_pure(unit: &SourceUnit, expr: NodeIndex) -> bool {
    match unit.data(expr) {
        NodeData::Literal { .. } | NodeData::Name { .. } | NodeData::This {} => true,
        NodeData::FieldAccess { target, .. } => is_pure(unit, *target),
        NodeData::Parenthesized { expression } => is_pure(unit, *expression),
        NodeData::ArrayCreation {
            dims, initializer, ..
        } => {
            dims.iter().all(|&d| is_pure(unit, d))
                && initializer.is_none_or(|i| is_pure(unit, i))
        }
        NodeData::ArrayInitializer { elements } => elements.iter().all(|&e| is_pure(unit, e)),
        _ => false,
    }
}
