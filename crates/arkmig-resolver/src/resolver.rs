//! The Type Resolver.

use crate::declared::{self, DeclaredTypes};
use crate::hierarchy::{ComponentMap, HierarchyComponents};
use crate::scope::Scopes;
use arkmig_common::limits::MAX_HIERARCHY_WALK;
use arkmig_java::symbols::is_library_name;
use arkmig_java::types::simple_name;
use arkmig_java::{
    BinaryOp, FieldSymbol, JavaType, LiteralKind, MethodSymbol, NodeData, NodeIndex,
    PrimitiveType, SourceUnit, SymbolTable, SyntaxKind, TypeSymbol, UnaryOp,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("cannot resolve type '{name}'")]
    UnknownType { name: String },
    #[error("type '{name}' is its own supertype")]
    CyclicHierarchy { name: String },
    #[error("supertype walk from '{name}' exceeded {limit} types")]
    HierarchyTooDeep { name: String, limit: usize },
    #[error("node {node} ({kind}) is not a type")]
    NotAType { node: NodeIndex, kind: SyntaxKind },
}

/// Coarse classification of a static type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Primitive,
    Class,
    Interface,
    Array,
    TypeVariable,
    Intersection,
    Null,
    Unknown,
}

/// What a simple name denotes at a given point.
#[derive(Debug, Clone, PartialEq)]
pub enum NameBinding {
    Local(JavaType),
    Field {
        owner: String,
        ty: JavaType,
        is_static: bool,
    },
    Type(String),
    Unknown,
}

/// Result of overload selection, indexing into the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadChoice {
    /// Selected by arity and argument types.
    Exact(usize),
    /// Not decidable; the first arity match.
    Fallback(usize),
    NoCandidate,
}

impl OverloadChoice {
    pub fn index(self) -> Option<usize> {
        match self {
            OverloadChoice::Exact(i) | OverloadChoice::Fallback(i) => Some(i),
            OverloadChoice::NoCandidate => None,
        }
    }
}

/// A method found on a receiver type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMethod {
    /// Qualified name of the declaring type.
    pub owner: String,
    /// The method as declared.
    pub declared: MethodSymbol,
    /// Parameter types with the receiver's type arguments applied.
    pub params: Vec<JavaType>,
    pub return_type: JavaType,
}

/// Everything known about one method call.
#[derive(Debug, Clone)]
pub struct CallResolution {
    pub receiver: JavaType,
    /// The receiver is a type name (`Math.abs`, `Iface.helper`).
    pub static_receiver: bool,
    pub candidates: Vec<ResolvedMethod>,
    pub choice: OverloadChoice,
}

impl CallResolution {
    pub fn selected(&self) -> Option<&ResolvedMethod> {
        self.choice.index().and_then(|i| self.candidates.get(i))
    }
}

pub struct TypeResolver<'a> {
    unit: &'a SourceUnit,
    symbols: SymbolTable,
    package: Option<String>,
    imports: Vec<String>,
    declared: DeclaredTypes,
    components: ComponentMap,
}

impl<'a> TypeResolver<'a> {
    /// Build a resolver for `unit`. `base` is the front end's symbol table
    /// (normally including the JDK model); the file's own declarations are
    /// overlaid on top of it.
    pub fn new(unit: &'a SourceUnit, base: &SymbolTable) -> Self {
        let (package, imports) = match unit.data(unit.root()) {
            NodeData::CompilationUnit {
                package, imports, ..
            } => (package.clone(), imports.clone()),
            _ => (None, Vec::new()),
        };
        let declared = declared::collect(unit, package.as_deref());
        let mut resolver = TypeResolver {
            unit,
            symbols: base.clone(),
            package,
            imports,
            declared,
            components: ComponentMap::default(),
        };
        let overlay: Vec<TypeSymbol> = resolver
            .declared
            .decls
            .values()
            .filter_map(|&decl| declared::build_symbol(&resolver, decl))
            .collect();
        for symbol in overlay {
            resolver.symbols.insert(symbol);
        }
        resolver.components = resolver.build_components();
        resolver
    }

    pub fn unit(&self) -> &'a SourceUnit {
        self.unit
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn symbol(&self, name: &str) -> Option<&TypeSymbol> {
        self.symbols.get(name)
    }

    // =========================================================================
    // Declarations of this file
    // =========================================================================

    pub fn qualified_name(&self, decl: NodeIndex) -> Option<&str> {
        self.declared.names.get(&decl).map(String::as_str)
    }

    pub fn declaration_of(&self, name: &str) -> Option<NodeIndex> {
        self.declared.decls.get(name).copied()
    }

    pub fn is_declared_in_file(&self, name: &str) -> bool {
        self.declared.decls.contains_key(name)
    }

    /// Declared types in source order, outer before inner.
    pub fn declared_types(&self) -> impl Iterator<Item = (&str, NodeIndex)> {
        self.declared.decls.iter().map(|(n, &d)| (n.as_str(), d))
    }

    pub fn components(&self) -> &ComponentMap {
        &self.components
    }

    /// Type declarations enclosing `at`, innermost first. Includes `at`
    /// itself when it is a type declaration.
    pub fn enclosing_types(&self, at: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::once(at)
            .chain(self.unit.ancestors(at))
            .filter(|&n| self.unit.kind(n).is_type_declaration())
    }

    /// Nearest type declaration strictly above `at`.
    pub fn enclosing_type(&self, at: NodeIndex) -> Option<NodeIndex> {
        self.unit
            .ancestors(at)
            .find(|&n| self.unit.kind(n).is_type_declaration())
    }

    /// Nearest method or constructor containing `at`, within its type.
    pub fn enclosing_method(&self, at: NodeIndex) -> Option<NodeIndex> {
        for n in std::iter::once(at).chain(self.unit.ancestors(at)) {
            match self.unit.kind(n) {
                SyntaxKind::MethodDeclaration | SyntaxKind::ConstructorDeclaration => {
                    return Some(n);
                }
                k if k.is_type_declaration() => return None,
                _ => {}
            }
        }
        None
    }

    pub fn is_interface_decl(&self, decl: NodeIndex) -> bool {
        self.unit.kind(decl) == SyntaxKind::InterfaceDeclaration
    }

    /// `Outer<T>` for a declaration, with its own type parameters as
    /// arguments.
    pub fn type_of_decl(&self, decl: NodeIndex) -> JavaType {
        let Some(name) = self.qualified_name(decl) else {
            return JavaType::Unknown;
        };
        let args = self
            .symbol(name)
            .map(|s| {
                s.type_params
                    .iter()
                    .map(|p| JavaType::type_variable(p.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        JavaType::generic(name, args)
    }

    // =========================================================================
    // Type names
    // =========================================================================

    fn is_known_type(&self, name: &str) -> bool {
        self.declared.decls.contains_key(name) || self.symbols.contains(name)
    }

    /// Whether `name` is a type parameter visible at `at`.
    pub fn is_type_variable(&self, name: &str, at: NodeIndex) -> bool {
        std::iter::once(at)
            .chain(self.unit.ancestors(at))
            .any(|n| match self.unit.data(n) {
                NodeData::ClassDeclaration { type_params, .. }
                | NodeData::InterfaceDeclaration { type_params, .. }
                | NodeData::MethodDeclaration { type_params, .. } => type_params
                    .iter()
                    .any(|&p| self.unit.data(p).name() == Some(name)),
                _ => false,
            })
    }

    /// Canonicalize a type name as written at `at` to its qualified form.
    ///
    /// Lookup order: enclosing types and their member types, member types
    /// inherited from in-file supertypes, top-level types of the file,
    /// single-type imports, `java.lang`, on-demand imports, the file's
    /// package, and finally the name taken as already qualified.
    pub fn canonical_type_name(&self, name: &str, at: NodeIndex) -> Result<String, ResolveError> {
        let Some((head, rest)) = name.split_once('.') else {
            return self.canonical_simple_name(name, at);
        };
        if self.is_known_type(name) {
            return Ok(name.to_string());
        }
        if let Ok(head) = self.canonical_simple_name(head, at) {
            let candidate = format!("{head}.{rest}");
            if self.is_known_type(&candidate) {
                return Ok(candidate);
            }
        }
        Err(ResolveError::UnknownType {
            name: name.to_string(),
        })
    }

    fn canonical_simple_name(&self, name: &str, at: NodeIndex) -> Result<String, ResolveError> {
        for decl in self.enclosing_types(at) {
            if let Some(found) = self.member_type_named(decl, name) {
                return Ok(found);
            }
            // Member types inherited from supertypes declared in this file
            let inherited = self
                .qualified_name(decl)
                .and_then(|q| self.symbol(q))
                .map(|s| s.supertypes().filter_map(|t| t.class_name()).collect::<Vec<_>>())
                .unwrap_or_default();
            for sup in inherited {
                if let Some(sup_decl) = self.declaration_of(sup)
                    && let Some(found) = self.member_type_named(sup_decl, name)
                {
                    return Ok(found);
                }
            }
        }

        if let NodeData::CompilationUnit { types, .. } = self.unit.data(self.unit.root()) {
            for &decl in types {
                if self.unit.data(decl).name() == Some(name)
                    && let Some(q) = self.qualified_name(decl)
                {
                    return Ok(q.to_string());
                }
            }
        }

        for import in &self.imports {
            if !import.ends_with(".*") && simple_name(import) == name {
                return Ok(import.clone());
            }
        }

        let lang = format!("java.lang.{name}");
        if self.symbols.contains(&lang) {
            return Ok(lang);
        }

        for import in &self.imports {
            if let Some(prefix) = import.strip_suffix(".*") {
                let candidate = format!("{prefix}.{name}");
                if self.symbols.contains(&candidate) {
                    return Ok(candidate);
                }
            }
        }

        if let Some(package) = &self.package {
            let candidate = format!("{package}.{name}");
            if self.symbols.contains(&candidate) {
                return Ok(candidate);
            }
        }

        if self.symbols.contains(name) {
            return Ok(name.to_string());
        }

        Err(ResolveError::UnknownType {
            name: name.to_string(),
        })
    }

    /// `decl` itself or one of its member types, when named `name`.
    fn member_type_named(&self, decl: NodeIndex, name: &str) -> Option<String> {
        if self.unit.data(decl).name() == Some(name) {
            return self.qualified_name(decl).map(str::to_string);
        }
        self.unit
            .data(decl)
            .members()
            .iter()
            .find(|&&m| {
                self.unit.kind(m).is_type_declaration() && self.unit.data(m).name() == Some(name)
            })
            .and_then(|&m| self.qualified_name(m))
            .map(str::to_string)
    }

    // =========================================================================
    // Type nodes
    // =========================================================================

    /// The Java type a type node denotes. Unresolvable class names keep the
    /// name as written.
    pub fn type_from_node(&self, idx: NodeIndex) -> JavaType {
        match self.unit.data(idx) {
            NodeData::PrimitiveType { primitive } => JavaType::primitive(*primitive),
            NodeData::ClassType { name, args } => {
                if !name.contains('.') && self.is_type_variable(name, idx) {
                    return JavaType::type_variable(name.as_str());
                }
                let args = args.iter().map(|&a| self.type_from_node(a)).collect();
                match self.canonical_type_name(name, idx) {
                    Ok(qualified) => JavaType::generic(qualified, args),
                    Err(err) => {
                        debug!(%err, node = %idx, "keeping unresolved type name");
                        JavaType::generic(name.as_str(), args)
                    }
                }
            }
            NodeData::ArrayType { element } => JavaType::array(self.type_from_node(*element)),
            NodeData::IntersectionType { bounds } => JavaType::Intersection {
                bounds: bounds.iter().map(|&b| self.type_from_node(b)).collect(),
            },
            _ => self
                .unit
                .resolved_type(idx)
                .cloned()
                .unwrap_or(JavaType::Unknown),
        }
    }

    /// Like `type_from_node`, but fails for nodes that are not types.
    pub fn resolve_type_node(&self, idx: NodeIndex) -> Result<JavaType, ResolveError> {
        let kind = self.unit.kind(idx);
        if !kind.is_type() {
            return Err(ResolveError::NotAType { node: idx, kind });
        }
        Ok(self.type_from_node(idx))
    }

    /// Declared type of a field or local declarator, C-style dims included.
    pub fn declarator_type(&self, declarator: NodeIndex) -> JavaType {
        let dims = match self.unit.data(declarator) {
            NodeData::VariableDeclarator { dims, .. } => *dims,
            _ => 0,
        };
        let base = match self.unit.parent(declarator).map(|p| self.unit.data(p)) {
            Some(
                NodeData::FieldDeclaration { ty, .. } | NodeData::LocalVariableDeclaration { ty, .. },
            ) => self.type_from_node(*ty),
            _ => JavaType::Unknown,
        };
        (0..dims).fold(base, |ty, _| JavaType::array(ty))
    }

    /// Declared type of a parameter; varargs parameters are arrays.
    pub fn param_type(&self, param: NodeIndex) -> JavaType {
        match self.unit.data(param) {
            NodeData::Parameter { ty, varargs, .. } => {
                let ty = self.type_from_node(*ty);
                if *varargs { JavaType::array(ty) } else { ty }
            }
            _ => JavaType::Unknown,
        }
    }

    /// Bounds of a type parameter declaration, resolved.
    pub fn type_param_bounds(&self, type_param: NodeIndex) -> Vec<JavaType> {
        match self.unit.data(type_param) {
            NodeData::TypeParameter { bounds, .. } => {
                bounds.iter().map(|&b| self.type_from_node(b)).collect()
            }
            _ => Vec::new(),
        }
    }

    // =========================================================================
    // Categories and subtyping
    // =========================================================================

    pub fn category(&self, ty: &JavaType) -> TypeCategory {
        match ty {
            JavaType::Primitive { .. } => TypeCategory::Primitive,
            JavaType::Class { name, .. } => match self.symbol(name) {
                Some(symbol) if symbol.is_interface() => TypeCategory::Interface,
                _ => TypeCategory::Class,
            },
            JavaType::Array { .. } => TypeCategory::Array,
            JavaType::TypeVariable { .. } => TypeCategory::TypeVariable,
            JavaType::Intersection { .. } => TypeCategory::Intersection,
            JavaType::Null => TypeCategory::Null,
            JavaType::Unknown => TypeCategory::Unknown,
        }
    }

    pub fn is_interface(&self, name: &str) -> bool {
        self.symbol(name).is_some_and(TypeSymbol::is_interface)
    }

    pub fn is_library_type(&self, ty: &JavaType) -> bool {
        ty.class_name().is_some_and(is_library_name)
    }

    /// `ty` and all its supertypes, breadth-first, with type arguments
    /// propagated. Raw references bind type parameters to `Object`.
    pub fn ancestry(&self, ty: &JavaType) -> Vec<JavaType> {
        let mut out = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut queue: VecDeque<JavaType> = VecDeque::from([ty.clone()]);
        while let Some(current) = queue.pop_front() {
            let Some(name) = current.class_name() else {
                continue;
            };
            if !seen.insert(name.to_string()) {
                continue;
            }
            if out.len() >= MAX_HIERARCHY_WALK {
                debug!(from = %ty, limit = MAX_HIERARCHY_WALK, "supertype walk truncated");
                break;
            }
            if let Some(symbol) = self.symbol(name) {
                let args = effective_args(symbol, current.type_args());
                for sup in symbol.supertypes() {
                    queue.push_back(sup.substitute(&symbol.type_params, &args));
                }
            }
            out.push(current);
        }
        out
    }

    /// Transitive supertype names of `name`, nearest first.
    pub fn supertypes_closure(&self, name: &str) -> Result<Vec<String>, ResolveError> {
        let mut out: Vec<String> = Vec::new();
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::from([name]);
        while let Some(current) = queue.pop_front() {
            let Some(symbol) = self.symbol(current) else {
                continue;
            };
            for sup in symbol.supertypes().filter_map(JavaType::class_name) {
                if sup == name {
                    return Err(ResolveError::CyclicHierarchy {
                        name: name.to_string(),
                    });
                }
                if seen.insert(sup) {
                    if out.len() >= MAX_HIERARCHY_WALK {
                        return Err(ResolveError::HierarchyTooDeep {
                            name: name.to_string(),
                            limit: MAX_HIERARCHY_WALK,
                        });
                    }
                    out.push(sup.to_string());
                    queue.push_back(sup);
                }
            }
        }
        Ok(out)
    }

    /// Java subtyping, including covariant reference arrays.
    pub fn is_subtype(&self, sub: &JavaType, sup: &JavaType) -> bool {
        if sub == sup {
            return true;
        }
        match (sub, sup) {
            (JavaType::Unknown, _) | (_, JavaType::Unknown) => false,
            (JavaType::Null, _) => sup.is_reference(),
            (_, JavaType::Class { name, .. }) if name == "java.lang.Object" => sub.is_reference(),
            (JavaType::Primitive { primitive: a }, JavaType::Primitive { primitive: b }) => {
                a.widens_to(*b)
            }
            (JavaType::Array { element: a }, JavaType::Array { element: b }) => {
                if a.is_reference() && b.is_reference() {
                    self.is_subtype(a, b)
                } else {
                    a == b
                }
            }
            (JavaType::Intersection { bounds }, _) => bounds.iter().any(|b| self.is_subtype(b, sup)),
            (_, JavaType::Intersection { bounds }) => bounds.iter().all(|b| self.is_subtype(sub, b)),
            (JavaType::Class { name: a, .. }, JavaType::Class { name: b, .. }) => {
                a == b
                    || self
                        .ancestry(sub)
                        .iter()
                        .any(|t| t.class_name() == Some(b.as_str()))
            }
            _ => false,
        }
    }

    /// Assignment compatibility with boxing and unboxing. Unknown types are
    /// assumed compatible.
    pub fn is_assignable(&self, from: &JavaType, to: &JavaType) -> bool {
        if from.is_unknown() || to.is_unknown() {
            return true;
        }
        match (from.as_primitive(), to.as_primitive()) {
            (Some(a), Some(b)) => a.widens_to(b),
            (Some(p), None) => boxed_name(p)
                .is_some_and(|boxed| self.is_subtype(&JavaType::class(boxed), to)),
            (None, Some(p)) => unboxed(from).is_some_and(|u| u.widens_to(p)),
            (None, None) => self.is_subtype(from, to),
        }
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Methods named `name` visible on `receiver`, most derived first.
    /// Overridden signatures are reported once.
    pub fn methods_of(&self, receiver: &JavaType, name: &str) -> Vec<ResolvedMethod> {
        let roots: Vec<JavaType> = match receiver {
            JavaType::Intersection { bounds } => bounds.clone(),
            JavaType::Array { .. } | JavaType::TypeVariable { .. } => vec![JavaType::object()],
            other => vec![other.clone()],
        };
        let mut out: Vec<ResolvedMethod> = Vec::new();
        for root in roots {
            for ty in self.ancestry(&root) {
                let Some(owner) = ty.class_name() else {
                    continue;
                };
                let Some(symbol) = self.symbol(owner) else {
                    continue;
                };
                let args = effective_args(symbol, ty.type_args());
                for method in symbol.methods_named(name) {
                    let params: Vec<JavaType> = method
                        .params
                        .iter()
                        .map(|p| p.substitute(&symbol.type_params, &args))
                        .collect();
                    if out.iter().any(|m| m.params == params) {
                        continue;
                    }
                    out.push(ResolvedMethod {
                        owner: owner.to_string(),
                        declared: method.clone(),
                        params,
                        return_type: method.return_type.substitute(&symbol.type_params, &args),
                    });
                }
            }
        }
        out
    }

    /// A field named `name` on `receiver` or its supertypes, with the
    /// declaring type and the substituted field type.
    pub fn field_of(&self, receiver: &JavaType, name: &str) -> Option<(String, FieldSymbol, JavaType)> {
        for ty in self.ancestry(receiver) {
            let Some(owner) = ty.class_name() else {
                continue;
            };
            let Some(symbol) = self.symbol(owner) else {
                continue;
            };
            if let Some(field) = symbol.field(name) {
                let args = effective_args(symbol, ty.type_args());
                let field_ty = field.ty.substitute(&symbol.type_params, &args);
                return Some((owner.to_string(), field.clone(), field_ty));
            }
        }
        None
    }

    /// Pick the overload a call with `args` selects.
    ///
    /// Arity first; among several arity matches, the unique applicable one,
    /// else the most specific applicable one. Anything else falls back to
    /// the first arity match.
    pub fn select_overload(&self, candidates: &[ResolvedMethod], args: &[JavaType]) -> OverloadChoice {
        let by_arity: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, m)| arity_matches(m, args.len()))
            .map(|(i, _)| i)
            .collect();
        let Some(&first) = by_arity.first() else {
            return OverloadChoice::NoCandidate;
        };
        if by_arity.len() == 1 {
            return OverloadChoice::Exact(first);
        }
        let applicable: Vec<usize> = by_arity
            .iter()
            .copied()
            .filter(|&i| {
                let params = &candidates[i].params;
                args.iter()
                    .zip(params.iter())
                    .all(|(arg, param)| self.is_assignable(arg, param))
            })
            .collect();
        match applicable.as_slice() {
            [] => OverloadChoice::Fallback(first),
            [only] => OverloadChoice::Exact(*only),
            many => {
                let most_specific = many.iter().copied().find(|&i| {
                    many.iter().all(|&j| {
                        i == j
                            || candidates[i]
                                .params
                                .iter()
                                .zip(candidates[j].params.iter())
                                .all(|(a, b)| self.is_assignable(a, b))
                    })
                });
                // Unknown argument types make every candidate look applicable
                match most_specific {
                    Some(i) if args.iter().all(|a| !a.is_unknown()) => OverloadChoice::Exact(i),
                    _ => OverloadChoice::Fallback(first),
                }
            }
        }
    }

    // =========================================================================
    // Names and expressions
    // =========================================================================

    /// What `name` denotes at `at`: a local, a field of an enclosing type
    /// (inherited ones included), or a type.
    pub fn resolve_name(&self, name: &str, at: NodeIndex, scopes: &Scopes) -> NameBinding {
        if let Some(ty) = scopes.lookup(name) {
            return NameBinding::Local(ty.clone());
        }
        for decl in self.enclosing_types(at) {
            let decl_type = self.type_of_decl(decl);
            if let Some((owner, field, ty)) = self.field_of(&decl_type, name) {
                return NameBinding::Field {
                    owner,
                    ty,
                    is_static: field.modifiers.is_static(),
                };
            }
        }
        match self.canonical_type_name(name, at) {
            Ok(qualified) => NameBinding::Type(qualified),
            Err(_) => NameBinding::Unknown,
        }
    }

    /// `a.b.c` for a chain of names and field accesses.
    pub fn dotted_name(&self, expr: NodeIndex) -> Option<String> {
        match self.unit.data(expr) {
            NodeData::Name { name } => Some(name.clone()),
            NodeData::FieldAccess { target, name } => {
                self.dotted_name(*target).map(|t| format!("{t}.{name}"))
            }
            _ => None,
        }
    }

    /// The qualified type an expression names when used as a static
    /// receiver (`Math`, `Outer.Inner`, `java.util.List`).
    pub fn static_type_reference(&self, expr: NodeIndex, scopes: &Scopes) -> Option<String> {
        match self.unit.data(expr) {
            NodeData::Name { name } => match self.resolve_name(name, expr, scopes) {
                NameBinding::Type(q) => Some(q),
                _ => None,
            },
            NodeData::FieldAccess { target, .. } => {
                // A value on the left makes this a field access
                if self.static_type_reference(*target, scopes).is_none()
                    && self.head_is_value(*target, scopes)
                {
                    return None;
                }
                let dotted = self.dotted_name(expr)?;
                self.canonical_type_name(&dotted, expr).ok()
            }
            _ => None,
        }
    }

    fn head_is_value(&self, expr: NodeIndex, scopes: &Scopes) -> bool {
        match self.unit.data(expr) {
            NodeData::Name { name } => matches!(
                self.resolve_name(name, expr, scopes),
                NameBinding::Local(_) | NameBinding::Field { .. }
            ),
            NodeData::FieldAccess { target, .. } => self.head_is_value(*target, scopes),
            _ => true,
        }
    }

    /// Resolve the receiver and overload of a method call.
    pub fn resolve_call(&self, call: NodeIndex, scopes: &Scopes) -> Option<CallResolution> {
        let NodeData::MethodCall {
            target, name, args, ..
        } = self.unit.data(call)
        else {
            return None;
        };
        let arg_types: Vec<JavaType> = args.iter().map(|&a| self.type_of(a, scopes)).collect();

        let (receiver, static_receiver, candidates) = match target {
            Some(target) => {
                let (receiver, is_static) = match self.static_type_reference(*target, scopes) {
                    Some(q) => (JavaType::class(q), true),
                    None => (self.type_of(*target, scopes), false),
                };
                let candidates = self.methods_of(&receiver, name);
                (receiver, is_static, candidates)
            }
            None => {
                // Unqualified: innermost enclosing type that has the method
                let mut found = (JavaType::Unknown, false, Vec::new());
                for decl in self.enclosing_types(call) {
                    let decl_type = self.type_of_decl(decl);
                    let candidates = self.methods_of(&decl_type, name);
                    if !candidates.is_empty() {
                        found = (decl_type, false, candidates);
                        break;
                    }
                }
                found
            }
        };
        let choice = self.select_overload(&candidates, &arg_types);
        Some(CallResolution {
            receiver,
            static_receiver,
            candidates,
            choice,
        })
    }

    /// Static type of an expression. Front-end annotations win.
    pub fn type_of(&self, expr: NodeIndex, scopes: &Scopes) -> JavaType {
        if let Some(ty) = self.unit.resolved_type(expr) {
            return ty.clone();
        }
        match self.unit.data(expr) {
            NodeData::Literal { literal, .. } => literal_type(*literal),
            NodeData::Name { name } => match self.resolve_name(name, expr, scopes) {
                NameBinding::Local(ty) | NameBinding::Field { ty, .. } => ty,
                NameBinding::Type(q) => JavaType::class(q),
                NameBinding::Unknown => JavaType::Unknown,
            },
            NodeData::This {} => self
                .enclosing_type(expr)
                .map_or(JavaType::Unknown, |d| self.type_of_decl(d)),
            NodeData::FieldAccess { target, name } => {
                if let Some(q) = self.static_type_reference(expr, scopes) {
                    return JavaType::class(q);
                }
                let receiver = match self.static_type_reference(*target, scopes) {
                    Some(q) => JavaType::class(q),
                    None => self.type_of(*target, scopes),
                };
                if matches!(receiver, JavaType::Array { .. }) && name == "length" {
                    return JavaType::primitive(PrimitiveType::Int);
                }
                self.field_of(&receiver, name)
                    .map_or(JavaType::Unknown, |(_, _, ty)| ty)
            }
            NodeData::MethodCall { args, .. } => {
                let Some(resolution) = self.resolve_call(expr, scopes) else {
                    return JavaType::Unknown;
                };
                let Some(method) = resolution.selected() else {
                    return JavaType::Unknown;
                };
                let arg_types: Vec<JavaType> =
                    args.iter().map(|&a| self.type_of(a, scopes)).collect();
                infer_return_type(method, &arg_types)
            }
            NodeData::ObjectCreation { ty, .. } => self.type_from_node(*ty),
            NodeData::ArrayCreation {
                element,
                dims,
                extra_dims,
                ..
            } => {
                let levels = dims.len() as u32 + extra_dims;
                (0..levels.max(1)).fold(self.type_from_node(*element), |t, _| JavaType::array(t))
            }
            NodeData::ArrayAccess { array, .. } => self
                .type_of(*array, scopes)
                .element_type()
                .cloned()
                .unwrap_or(JavaType::Unknown),
            NodeData::Assignment { target, .. } => self.type_of(*target, scopes),
            NodeData::Binary { op, left, right } => {
                let left = self.type_of(*left, scopes);
                let right = self.type_of(*right, scopes);
                binary_type(*op, &left, &right)
            }
            NodeData::Unary { op, operand } => {
                let operand = self.type_of(*operand, scopes);
                match op {
                    UnaryOp::Not => JavaType::primitive(PrimitiveType::Boolean),
                    UnaryOp::Plus | UnaryOp::Minus | UnaryOp::BitNot => {
                        numeric_promotion(&[&operand]).map_or(operand, JavaType::primitive)
                    }
                    _ => operand,
                }
            }
            NodeData::Conditional {
                then_value,
                else_value,
                ..
            } => {
                let then_type = self.type_of(*then_value, scopes);
                if matches!(then_type, JavaType::Null | JavaType::Unknown) {
                    self.type_of(*else_value, scopes)
                } else {
                    then_type
                }
            }
            NodeData::Cast { ty, .. } => self.type_from_node(*ty),
            NodeData::InstanceOf { .. } => JavaType::primitive(PrimitiveType::Boolean),
            NodeData::Parenthesized { expression } => self.type_of(*expression, scopes),
            _ => JavaType::Unknown,
        }
    }

    fn build_components(&self) -> ComponentMap {
        let mut components = HierarchyComponents::new();
        for (name, _) in self.declared_types() {
            components.add(name);
            let Some(symbol) = self.symbol(name) else {
                continue;
            };
            for sup in symbol.supertypes().filter_map(JavaType::class_name) {
                // Library types never join components; they would tie every
                // user type together through `Object`.
                if self.is_declared_in_file(sup) || (!is_library_name(sup) && self.symbols.contains(sup)) {
                    components.link(name, sup);
                }
            }
        }
        components.finish()
    }
}

fn effective_args(symbol: &TypeSymbol, args: &[JavaType]) -> Vec<JavaType> {
    if args.len() == symbol.type_params.len() {
        args.to_vec()
    } else {
        // Raw reference
        vec![JavaType::object(); symbol.type_params.len()]
    }
}

fn arity_matches(method: &ResolvedMethod, arity: usize) -> bool {
    if method.declared.varargs {
        arity + 1 >= method.params.len()
    } else {
        method.params.len() == arity
    }
}

/// Return type with the method's own type parameters inferred from the
/// argument types; uninferred ones become `Object`.
fn infer_return_type(method: &ResolvedMethod, args: &[JavaType]) -> JavaType {
    let type_params = &method.declared.type_params;
    if type_params.is_empty() {
        return method.return_type.clone();
    }
    let mut bindings: FxHashMap<String, JavaType> = FxHashMap::default();
    for (param, arg) in method.params.iter().zip(args) {
        bind_type_params(param, arg, type_params, &mut bindings);
    }
    let values: Vec<JavaType> = type_params
        .iter()
        .map(|p| bindings.get(p).cloned().unwrap_or_else(JavaType::object))
        .collect();
    method.return_type.substitute(type_params, &values)
}

fn bind_type_params(
    param: &JavaType,
    arg: &JavaType,
    type_params: &[String],
    out: &mut FxHashMap<String, JavaType>,
) {
    match (param, arg) {
        (JavaType::TypeVariable { name }, arg)
            if type_params.contains(name) && !matches!(arg, JavaType::Null | JavaType::Unknown) =>
        {
            out.entry(name.clone()).or_insert_with(|| arg.clone());
        }
        (JavaType::Array { element: p }, JavaType::Array { element: a }) => {
            bind_type_params(p, a, type_params, out);
        }
        (JavaType::Class { args: p, .. }, JavaType::Class { args: a, .. }) => {
            for (p, a) in p.iter().zip(a) {
                bind_type_params(p, a, type_params, out);
            }
        }
        _ => {}
    }
}

fn literal_type(literal: LiteralKind) -> JavaType {
    match literal {
        LiteralKind::Int => JavaType::primitive(PrimitiveType::Int),
        LiteralKind::Long => JavaType::primitive(PrimitiveType::Long),
        LiteralKind::Float => JavaType::primitive(PrimitiveType::Float),
        LiteralKind::Double => JavaType::primitive(PrimitiveType::Double),
        LiteralKind::Char => JavaType::primitive(PrimitiveType::Char),
        LiteralKind::Boolean => JavaType::primitive(PrimitiveType::Boolean),
        LiteralKind::String => JavaType::string(),
        LiteralKind::Null => JavaType::Null,
    }
}

/// Boxed class of a primitive.
pub fn boxed_name(primitive: PrimitiveType) -> Option<&'static str> {
    Some(match primitive {
        PrimitiveType::Boolean => "java.lang.Boolean",
        PrimitiveType::Byte => "java.lang.Byte",
        PrimitiveType::Short => "java.lang.Short",
        PrimitiveType::Char => "java.lang.Character",
        PrimitiveType::Int => "java.lang.Integer",
        PrimitiveType::Long => "java.lang.Long",
        PrimitiveType::Float => "java.lang.Float",
        PrimitiveType::Double => "java.lang.Double",
        PrimitiveType::Void => return None,
    })
}

/// Primitive of a boxed class type.
pub fn unboxed(ty: &JavaType) -> Option<PrimitiveType> {
    if let Some(p) = ty.as_primitive() {
        return Some(p);
    }
    let primitive = match ty.class_name()? {
        "java.lang.Boolean" => PrimitiveType::Boolean,
        "java.lang.Byte" => PrimitiveType::Byte,
        "java.lang.Short" => PrimitiveType::Short,
        "java.lang.Character" => PrimitiveType::Char,
        "java.lang.Integer" => PrimitiveType::Int,
        "java.lang.Long" => PrimitiveType::Long,
        "java.lang.Float" => PrimitiveType::Float,
        "java.lang.Double" => PrimitiveType::Double,
        _ => return None,
    };
    Some(primitive)
}

/// Binary numeric promotion (JLS 5.6.2).
fn numeric_promotion(operands: &[&JavaType]) -> Option<PrimitiveType> {
    let mut result = PrimitiveType::Int;
    for operand in operands {
        let p = unboxed(operand).filter(|p| p.is_numeric())?;
        result = match (result, p) {
            (_, PrimitiveType::Double) | (PrimitiveType::Double, _) => PrimitiveType::Double,
            (_, PrimitiveType::Float) | (PrimitiveType::Float, _) => PrimitiveType::Float,
            (_, PrimitiveType::Long) | (PrimitiveType::Long, _) => PrimitiveType::Long,
            _ => PrimitiveType::Int,
        };
    }
    Some(result)
}

fn binary_type(op: BinaryOp, left: &JavaType, right: &JavaType) -> JavaType {
    let boolean = JavaType::primitive(PrimitiveType::Boolean);
    if op.is_comparison() || op.is_short_circuit() {
        return boolean;
    }
    match op {
        BinaryOp::Add if is_string(left) || is_string(right) => JavaType::string(),
        BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor
            if unboxed(left) == Some(PrimitiveType::Boolean) =>
        {
            boolean
        }
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::UShr => {
            numeric_promotion(&[left]).map_or(JavaType::Unknown, JavaType::primitive)
        }
        _ => numeric_promotion(&[left, right]).map_or(JavaType::Unknown, JavaType::primitive),
    }
}

fn is_string(ty: &JavaType) -> bool {
    ty.class_name() == Some("java.lang.String")
}
