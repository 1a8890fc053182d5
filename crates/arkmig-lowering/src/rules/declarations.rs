//! Declaration lowering: compilation units, classes and class members.
//!
//! Interface declarations and their members live in `interfaces`; the
//! helpers shared by both (modifier mapping, type parameters, nested type
//! placement, supertype flattening) are here.

use super::statements::lower_initializer;
use super::types::{display_type, map_type, primary_bound};
use crate::context::LowerCx;
use arkmig_arkts::{Modifier, Param, PlaceholderFlavor, TargetNode, TargetType, TypeParam};
use arkmig_common::diagnostic_codes;
use arkmig_java::symbols::is_library_name;
use arkmig_java::types::simple_name;
use arkmig_java::{JavaType, MethodSymbol, Modifiers, NodeData, NodeIndex};
use arkmig_resolver::TypeResolver;
use tracing::debug;

// =============================================================================
// Compilation unit
// =============================================================================

pub(crate) fn lower_compilation_unit(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::CompilationUnit {
        package,
        imports,
        types,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let mut items = Vec::with_capacity(imports.len() + types.len());
    for import in imports {
        if let Some(item) = lower_import(cx, idx, package.as_deref(), import) {
            items.push(item);
        }
    }
    for &decl in types {
        cx.begin_declaration();
        items.extend(cx.lower(decl));
        items.extend(cx.take_auxiliaries());
        items.extend(cx.take_hoisted());
    }
    vec![TargetNode::Module(items)]
}

/// Library imports disappear: the types they name map to ArkTS built-ins.
fn lower_import(
    cx: &mut LowerCx<'_>,
    unit_node: NodeIndex,
    package: Option<&str>,
    import: &str,
) -> Option<TargetNode> {
    if is_library_name(import) {
        return None;
    }
    if import.ends_with(".*") {
        cx.report(unit_node, diagnostic_codes::NO_APPLICABLE_RULE, &["wildcard import"]);
        cx.stats.placeholders += 1;
        return Some(TargetNode::placeholder(
            format!("import {import};"),
            PlaceholderFlavor::Member,
        ));
    }
    Some(TargetNode::Import {
        names: vec![simple_name(import).to_string()],
        module: module_path(package, import),
    })
}

/// Module specifier of an imported type, relative to the importing package.
fn module_path(package: Option<&str>, import: &str) -> String {
    let from: Vec<&str> = package.map_or_else(Vec::new, |p| p.split('.').collect());
    let to: Vec<&str> = import.split('.').collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let rest = to[common..].join("/");
    match from.len() - common {
        0 => format!("./{rest}"),
        ups => format!("{}{rest}", "../".repeat(ups)),
    }
}

// =============================================================================
// Shared declaration helpers
// =============================================================================

/// `export` for public types that end up at top level.
pub(crate) fn type_modifiers(cx: &LowerCx<'_>, decl: NodeIndex, modifiers: Modifiers) -> Vec<Modifier> {
    let top_level = cx.resolver().enclosing_type(decl).is_none() || cx.plan().is_hoisted(decl);
    if top_level && modifiers.contains(Modifiers::PUBLIC) {
        vec![Modifier::Export]
    } else {
        Vec::new()
    }
}

/// One warning per modifier ArkTS cannot express.
pub(crate) fn report_dropped_modifiers(
    cx: &mut LowerCx<'_>,
    at: NodeIndex,
    modifiers: Modifiers,
    subject: &str,
) {
    for keyword in (modifiers & Modifiers::DROPPABLE).keywords() {
        cx.report(at, diagnostic_codes::MODIFIER_DROPPED, &[keyword, subject]);
    }
}

fn member_modifiers(modifiers: Modifiers) -> Vec<Modifier> {
    let mut out = Vec::new();
    if modifiers.contains(Modifiers::PRIVATE) {
        out.push(Modifier::Private);
    } else if modifiers.contains(Modifiers::PROTECTED) {
        out.push(Modifier::Protected);
    }
    if modifiers.is_static() {
        out.push(Modifier::Static);
    }
    out
}

pub(crate) fn lower_type_params(cx: &mut LowerCx<'_>, params: &[NodeIndex]) -> Vec<TypeParam> {
    params
        .iter()
        .flat_map(|&p| cx.lower(p))
        .filter_map(|node| match node {
            TargetNode::TypeParameter(param) => Some(param),
            _ => None,
        })
        .collect()
}

pub(crate) fn lower_params(cx: &mut LowerCx<'_>, params: &[NodeIndex]) -> Vec<Param> {
    params
        .iter()
        .flat_map(|&p| cx.lower(p))
        .filter_map(|node| match node {
            TargetNode::Parameter(param) => Some(param),
            _ => None,
        })
        .collect()
}

/// Return the lowered declaration in place, or move it to top level when
/// the plan hoists it.
pub(crate) fn place_type(cx: &mut LowerCx<'_>, decl: NodeIndex, lowered: Vec<TargetNode>) -> Vec<TargetNode> {
    if !cx.plan().is_hoisted(decl) {
        return lowered;
    }
    let source = cx
        .resolver()
        .qualified_name(decl)
        .map(|q| nested_path(cx, q))
        .unwrap_or_default();
    let target = cx.plan().type_name(decl).unwrap_or_default().to_string();
    cx.report(decl, diagnostic_codes::NESTED_TYPE_HOISTED, &[&source, &target]);
    cx.hoist(lowered);
    Vec::new()
}

/// `Outer.Inner` without the package prefix.
fn nested_path(cx: &LowerCx<'_>, qualified: &str) -> String {
    match cx.resolver().package() {
        Some(package) => qualified
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(qualified)
            .to_string(),
        None => qualified.to_string(),
    }
}

/// Type of the enclosing declaration's view of `interface`, for substituting
/// interface type parameters in inherited signatures.
fn supertype_view(resolver: &TypeResolver<'_>, decl: NodeIndex, interface: &str) -> (Vec<String>, Vec<JavaType>) {
    let params = resolver
        .symbol(interface)
        .map(|s| s.type_params.clone())
        .unwrap_or_default();
    let args = resolver
        .ancestry(&resolver.type_of_decl(decl))
        .into_iter()
        .find(|t| t.class_name() == Some(interface))
        .map(|t| t.type_args().to_vec())
        .unwrap_or_default();
    (params, args)
}

/// An abstract method inherited through a supertype, with the supertype's
/// type arguments applied.
struct ContractMethod {
    owner: String,
    symbol: MethodSymbol,
    params: Vec<JavaType>,
    return_type: JavaType,
}

fn contract_methods(resolver: &TypeResolver<'_>, supertype: &JavaType) -> Vec<ContractMethod> {
    let mut out = Vec::new();
    for ty in resolver.ancestry(supertype) {
        let Some(name) = ty.class_name().filter(|n| resolver.is_interface(n)) else {
            continue;
        };
        let Some(symbol) = resolver.symbol(name) else {
            continue;
        };
        let args = ty.type_args();
        for method in symbol
            .methods
            .iter()
            .filter(|m| !m.is_static() && !m.modifiers.is_private())
        {
            let subst = |t: &JavaType| {
                if args.is_empty() {
                    t.clone()
                } else {
                    t.substitute(&symbol.type_params, args)
                }
            };
            out.push(ContractMethod {
                owner: name.to_string(),
                symbol: method.clone(),
                params: method.params.iter().map(subst).collect(),
                return_type: subst(&method.return_type),
            });
        }
    }
    out
}

/// Parameter names of a method: from its declaration when it is in the
/// file, else positional.
fn param_names(cx: &LowerCx<'_>, owner: &str, method: &MethodSymbol) -> Vec<String> {
    let declared = cx
        .plan()
        .method_decl(owner, method)
        .and_then(|decl| match cx.unit().data(decl) {
            NodeData::MethodDeclaration { params, .. } => Some(params),
            _ => None,
        });
    match declared {
        Some(params) => params
            .iter()
            .map(|&p| cx.unit().data(p).name().unwrap_or_default().to_string())
            .collect(),
        None => (0..method.params.len()).map(|i| format!("arg{i}")).collect(),
    }
}

fn contract_name(cx: &LowerCx<'_>, method: &ContractMethod) -> String {
    cx.plan()
        .method_name(&method.owner, &method.symbol.name, &method.symbol.params)
        .to_string()
}

fn contract_signature(cx: &LowerCx<'_>, method: &ContractMethod) -> TargetNode {
    let names = param_names(cx, &method.owner, &method.symbol);
    let last = method.params.len().saturating_sub(1);
    let params = names
        .into_iter()
        .zip(&method.params)
        .enumerate()
        .map(|(i, (name, ty))| {
            let ty = map_type(cx, ty);
            if method.symbol.varargs && i == last {
                Param::rest(name, ty)
            } else {
                Param::new(name, ty)
            }
        })
        .collect();
    TargetNode::Method {
        modifiers: Vec::new(),
        name: contract_name(cx, method),
        type_params: method
            .symbol
            .type_params
            .iter()
            .map(|t| TypeParam::new(t.as_str(), None))
            .collect(),
        params,
        return_type: map_type(cx, &method.return_type),
        body: None,
    }
}

/// Copy the members of every supertype after the first into `into`, for
/// targets that allow a single supertype. The first declaration of a name
/// wins; each copied member and each collision is reported.
pub(crate) fn flatten_supertypes(
    cx: &mut LowerCx<'_>,
    at: NodeIndex,
    into: &str,
    first: &JavaType,
    rest: &[JavaType],
) -> Vec<TargetNode> {
    let resolver = cx.resolver();
    let mut merged: Vec<(String, Vec<JavaType>)> = contract_methods(resolver, first)
        .iter()
        .map(|m| (contract_name(cx, m), m.params.clone()))
        .collect();
    let mut members = Vec::new();
    for supertype in rest {
        let from = display_type(supertype);
        for method in contract_methods(resolver, supertype) {
            let name = contract_name(cx, &method);
            if merged.iter().any(|(n, p)| *n == name && *p == method.params) {
                continue;
            }
            if merged.iter().any(|(n, _)| *n == name) {
                cx.report(at, diagnostic_codes::CAPABILITY_MEMBER_COLLISION, &[&name, &from, into]);
                continue;
            }
            cx.report(at, diagnostic_codes::SUPERTYPE_MEMBER_FLATTENED, &[&name, &from, into]);
            members.push(contract_signature(cx, &method));
            merged.push((name, method.params));
        }
    }
    members
}

// =============================================================================
// Classes
// =============================================================================

pub(crate) fn lower_class(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ClassDeclaration {
        name,
        modifiers,
        type_params,
        extends,
        implements,
        members,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let target_name = cx.plan().type_name(idx).unwrap_or(name).to_string();
    cx.push_type_frame(idx);

    let mut target_modifiers = type_modifiers(cx, idx, *modifiers);
    if modifiers.contains(Modifiers::ABSTRACT) {
        target_modifiers.push(Modifier::Abstract);
    }
    if modifiers.is_final() {
        target_modifiers.push(Modifier::Final);
    }
    report_dropped_modifiers(cx, idx, *modifiers, name);

    let type_params = lower_type_params(cx, type_params);
    let extends = extends.map(|e| cx.lower_type(e));
    let mut interfaces: Vec<TargetType> = implements.iter().map(|&i| cx.lower_type(i)).collect();
    if let Some(contract) = cx.plan().contract_of(idx) {
        let exported = target_modifiers.contains(&Modifier::Export);
        interfaces = vec![merged_contract(cx, idx, implements, contract, &type_params, exported)];
    }

    let mut body = cx.with_scope(|cx| {
        members
            .iter()
            .flat_map(|&m| cx.lower(m))
            .collect::<Vec<_>>()
    });
    body.extend(default_forwarders(cx, idx, &target_name));
    report_external_defaults(cx, idx, &target_name);
    cx.pop_type_frame();

    let class = TargetNode::Class {
        modifiers: target_modifiers,
        name: target_name,
        type_params,
        extends,
        implements: interfaces,
        members: body,
    };
    place_type(cx, idx, vec![class])
}

/// Synthesize `<Class>Contract extends I1 { members of I2.. }` and return
/// the reference the class implements instead of its interface list.
fn merged_contract(
    cx: &mut LowerCx<'_>,
    class: NodeIndex,
    implements: &[NodeIndex],
    contract: &str,
    type_params: &[TypeParam],
    exported: bool,
) -> TargetType {
    let resolver = cx.resolver();
    let supertypes: Vec<JavaType> = implements.iter().map(|&i| resolver.type_from_node(i)).collect();
    let Some((first, rest)) = supertypes.split_first() else {
        return TargetType::named(contract);
    };
    let members = flatten_supertypes(cx, class, contract, first, rest);
    debug!(contract, flattened = members.len(), "merged contract");
    cx.add_auxiliary(TargetNode::Interface {
        modifiers: if exported { vec![Modifier::Export] } else { Vec::new() },
        name: contract.to_string(),
        type_params: type_params.to_vec(),
        extends: vec![map_type(cx, first)],
        members,
    });
    let args = type_params
        .iter()
        .map(|p| TargetType::named(p.name.as_str()))
        .collect();
    TargetType::generic(contract, args)
}

/// `m(a) { return IfaceCompanion.m(this, a); }` for every default method
/// the class inherits without overriding it.
fn default_forwarders(cx: &mut LowerCx<'_>, class: NodeIndex, class_name: &str) -> Vec<TargetNode> {
    let unit = cx.unit();
    let resolver = cx.resolver();
    let mut out = Vec::new();
    for forwarder in cx.plan().forwarders(class) {
        let NodeData::MethodDeclaration {
            name,
            type_params,
            params,
            return_type,
            ..
        } = unit.data(forwarder.method)
        else {
            continue;
        };
        let (iface_params, iface_args) = supertype_view(resolver, class, &forwarder.interface);
        let subst = |ty: JavaType| {
            if iface_args.is_empty() {
                ty
            } else {
                ty.substitute(&iface_params, &iface_args)
            }
        };

        let mut target_params = Vec::with_capacity(params.len());
        let mut arguments = vec![TargetNode::This];
        for &param in params {
            let NodeData::Parameter { name, varargs, .. } = unit.data(param) else {
                continue;
            };
            let ty = map_type(cx, &subst(resolver.param_type(param)));
            target_params.push(if *varargs {
                Param::rest(name.as_str(), ty)
            } else {
                Param::new(name.as_str(), ty)
            });
            arguments.push(TargetNode::id(name.as_str()));
        }
        let method_type_params = type_params
            .iter()
            .map(|&p| {
                let bounds = resolver.type_param_bounds(p);
                let constraint = bounds
                    .get(primary_bound(resolver, &bounds))
                    .map(|b| map_type(cx, &subst(b.clone())));
                TypeParam::new(unit.data(p).name().unwrap_or_default(), constraint)
            })
            .collect();

        let returned = subst(resolver.type_from_node(*return_type));
        let call = TargetNode::method_call(
            TargetNode::id(forwarder.companion.as_str()),
            forwarder.name.as_str(),
            arguments,
        );
        let statement = if returned.is_void() {
            TargetNode::expr_stmt(call)
        } else {
            TargetNode::ret(Some(call))
        };
        let iface_name = simple_name(&forwarder.interface).to_string();
        cx.report(
            class,
            diagnostic_codes::DEFAULT_METHOD_FORWARDER_ADDED,
            &[class_name, name, &iface_name],
        );
        out.push(TargetNode::Method {
            modifiers: Vec::new(),
            name: forwarder.name.clone(),
            type_params: method_type_params,
            params: target_params,
            return_type: map_type(cx, &returned),
            body: Some(vec![statement]),
        });
    }
    out
}

fn report_external_defaults(cx: &mut LowerCx<'_>, class: NodeIndex, class_name: &str) {
    for external in cx.plan().external_defaults(class) {
        let iface_name = simple_name(&external.interface).to_string();
        cx.report(
            class,
            diagnostic_codes::EXTERNAL_DEFAULT_METHOD,
            &[class_name, &external.method, &iface_name],
        );
    }
}

// =============================================================================
// Class members
// =============================================================================

/// Qualified name of the type declaring `member`.
fn owner_of(cx: &LowerCx<'_>, member: NodeIndex) -> String {
    cx.resolver()
        .enclosing_type(member)
        .and_then(|t| cx.resolver().qualified_name(t))
        .unwrap_or_default()
        .to_string()
}

/// Target name of a method declaration after overload renaming. Reports the
/// rename once, at the declaration.
pub(crate) fn declared_method_name(cx: &mut LowerCx<'_>, method: NodeIndex) -> String {
    let NodeData::MethodDeclaration { name, params, .. } = cx.unit().data(method) else {
        return String::new();
    };
    let owner = owner_of(cx, method);
    let param_types: Vec<JavaType> = params.iter().map(|&p| cx.resolver().param_type(p)).collect();
    match cx.plan().renamed(&owner, name, &param_types) {
        Some(renamed) => {
            let renamed = renamed.to_string();
            cx.report(method, diagnostic_codes::OVERLOAD_RENAMED, &[name, &renamed]);
            renamed
        }
        None => name.clone(),
    }
}

pub(crate) fn is_native(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    cx.unit().data(idx).modifiers().contains(Modifiers::NATIVE)
}

pub(crate) fn lower_native_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let name = cx.unit().data(idx).name().unwrap_or_default();
    cx.report(idx, diagnostic_codes::NATIVE_METHOD_NOT_SUPPORTED, &[name]);
    vec![cx.placeholder_as(idx, PlaceholderFlavor::Member)]
}

pub(crate) fn lower_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::MethodDeclaration {
        name,
        modifiers,
        type_params,
        params,
        return_type,
        body,
        ..
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let target_name = declared_method_name(cx, idx);
    let mut target_modifiers = member_modifiers(*modifiers);
    if modifiers.contains(Modifiers::ABSTRACT) {
        target_modifiers.push(Modifier::Abstract);
    }
    report_dropped_modifiers(cx, idx, *modifiers, name);

    cx.with_scope(|cx| {
        let type_params = lower_type_params(cx, type_params);
        let params = lower_params(cx, params);
        let return_type = cx.lower_type(*return_type);
        let body = body.map(|b| cx.lower_body(b));
        vec![TargetNode::Method {
            modifiers: target_modifiers,
            name: target_name,
            type_params,
            params,
            return_type,
            body,
        }]
    })
}

pub(crate) fn lower_constructor(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ConstructorDeclaration {
        name,
        modifiers,
        params,
        body,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let mut target_modifiers = member_modifiers(*modifiers);
    target_modifiers.retain(|m| *m != Modifier::Static);
    report_dropped_modifiers(cx, idx, *modifiers, name);
    cx.with_scope(|cx| {
        let params = lower_params(cx, params);
        let body = cx.lower_body(*body);
        vec![TargetNode::Constructor {
            modifiers: target_modifiers,
            params,
            body,
        }]
    })
}

pub(crate) fn lower_field(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::FieldDeclaration {
        modifiers,
        ty,
        declarators,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    cx.lower_type(*ty);
    let mut target_modifiers = member_modifiers(*modifiers);
    if modifiers.is_final() {
        target_modifiers.push(Modifier::Readonly);
    }

    let mut out = Vec::with_capacity(declarators.len());
    for &declarator in declarators {
        cx.claim(declarator);
        let NodeData::VariableDeclarator { name, init, .. } = cx.unit().data(declarator) else {
            continue;
        };
        report_dropped_modifiers(cx, idx, *modifiers, name);
        let declared = cx.resolver().declarator_type(declarator);
        let initializer = init.map(|init| lower_initializer(cx, init, &declared));
        out.push(TargetNode::Property {
            modifiers: target_modifiers.clone(),
            name: name.clone(),
            ty: map_type(cx, &declared),
            initializer: initializer.map(Box::new),
        });
    }
    out
}

pub(crate) fn is_class_static_initializer(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    matches!(cx.unit().data(idx), NodeData::InitializerBlock { is_static: true, .. })
        && !super::in_interface(cx, idx)
}

pub(crate) fn lower_static_initializer(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::InitializerBlock { body, .. } = cx.unit().data(idx) else {
        return Vec::new();
    };
    vec![TargetNode::StaticBlock(cx.lower_body(*body))]
}

pub(crate) fn lower_parameter(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Parameter {
        name, ty, varargs, ..
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    cx.lower_type(*ty);
    let declared = cx.resolver().param_type(idx);
    let mapped = map_type(cx, &declared);
    cx.declare(name, declared);
    let param = if *varargs {
        Param::rest(name.as_str(), mapped)
    } else {
        Param::new(name.as_str(), mapped)
    };
    vec![TargetNode::Parameter(param)]
}

// =============================================================================
// Type parameters
// =============================================================================

pub(crate) fn lower_type_parameter(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::TypeParameter { name, bounds } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let constraint = bounds.first().map(|&b| cx.lower_type(b));
    vec![TargetNode::TypeParameter(TypeParam::new(name.as_str(), constraint))]
}

pub(crate) fn has_several_bounds(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    matches!(cx.unit().data(idx), NodeData::TypeParameter { bounds, .. } if bounds.len() >= 2)
}

/// `<T extends A & B & C>`. The primary bound stays the constraint; two or
/// more remaining bounds are aggregated into an auxiliary interface.
pub(crate) fn lower_bounded_type_parameter(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::TypeParameter { name, bounds } = cx.unit().data(idx) else {
        return Vec::new();
    };
    for &bound in bounds {
        cx.claim_subtree(bound);
    }
    let resolver = cx.resolver();
    let resolved: Vec<JavaType> = bounds.iter().map(|&b| resolver.type_from_node(b)).collect();
    let primary = primary_bound(resolver, &resolved);
    let kept = resolved.get(primary).cloned().unwrap_or_else(JavaType::object);
    let remaining: Vec<JavaType> = resolved
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != primary)
        .map(|(_, b)| b.clone())
        .collect();

    let (extra_type, extra_label) = match cx.plan().bound_interface(idx) {
        Some(aux) => {
            let listed = quoted_list(&remaining);
            cx.report(idx, diagnostic_codes::INTERSECTION_BOUND_AGGREGATED, &[&listed, name, aux]);
            let extends = remaining.iter().map(|b| map_type(cx, b)).collect();
            cx.add_auxiliary(TargetNode::Interface {
                modifiers: Vec::new(),
                name: aux.to_string(),
                type_params: Vec::new(),
                extends,
                members: Vec::new(),
            });
            (TargetType::named(aux), format!("'{aux}'"))
        }
        None => {
            let single = remaining.first().cloned().unwrap_or_else(JavaType::object);
            (map_type(cx, &single), quoted_list(&remaining))
        }
    };

    let primary_type = map_type(cx, &kept);
    let constraint = if cx.options().intersection_bounds {
        TargetType::Intersection(vec![primary_type, extra_type])
    } else {
        let kept_name = display_type(&kept);
        cx.report(
            idx,
            diagnostic_codes::INTERSECTION_BOUND_NOT_APPLIED,
            &[name, &kept_name, &extra_label],
        );
        primary_type
    };
    vec![TargetNode::TypeParameter(TypeParam::new(name.as_str(), Some(constraint)))]
}

fn quoted_list(types: &[JavaType]) -> String {
    types
        .iter()
        .map(|t| format!("'{}'", display_type(t)))
        .collect::<Vec<_>>()
        .join(", ")
}
