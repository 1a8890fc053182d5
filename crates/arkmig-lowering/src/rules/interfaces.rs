//! Interface lowering.
//!
//! An ArkTS interface holds signatures only. Everything else a Java
//! interface may declare moves to a companion class named by the plan:
//! constants become `static readonly` properties, static methods stay
//! static, and default or hoisted private bodies become static methods that
//! take the receiver as an explicit first parameter. Inlined private
//! helpers leave no declaration behind; their single expression is lowered
//! at the call site.

use super::declarations::{
    declared_method_name, flatten_supertypes, lower_params, lower_type_params, place_type,
    report_dropped_modifiers, type_modifiers,
};
use super::in_interface;
use super::statements::lower_initializer as lower_field_initializer;
use super::types::{map_type, primary_bound};
use crate::context::LowerCx;
use arkmig_arkts::{Modifier, Param, PlaceholderFlavor, TargetNode, TargetType, TypeParam};
use arkmig_common::diagnostic_codes;
use arkmig_java::{JavaType, Modifiers, NodeData, NodeIndex};
use tracing::debug;

pub(crate) fn lower_interface(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::InterfaceDeclaration {
        name,
        modifiers,
        type_params,
        extends,
        members,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let target_name = cx.plan().type_name(idx).unwrap_or(name).to_string();
    cx.push_type_frame(idx);

    let target_modifiers = type_modifiers(cx, idx, *modifiers);
    report_dropped_modifiers(cx, idx, *modifiers, name);

    let type_params = lower_type_params(cx, type_params);
    let mut supertypes: Vec<TargetType> = extends.iter().map(|&e| cx.lower_type(e)).collect();
    let mut body = Vec::new();
    if cx.options().single_supertype && supertypes.len() > 1 {
        let resolver = cx.resolver();
        let resolved: Vec<JavaType> = extends.iter().map(|&e| resolver.type_from_node(e)).collect();
        if let Some((first, rest)) = resolved.split_first() {
            body.extend(flatten_supertypes(cx, idx, &target_name, first, rest));
        }
        supertypes.truncate(1);
    }

    body.extend(cx.with_scope(|cx| {
        members
            .iter()
            .flat_map(|&m| cx.lower(m))
            .collect::<Vec<_>>()
    }));
    let frame = cx.pop_type_frame();

    let exported = target_modifiers.contains(&Modifier::Export);
    let mut lowered = vec![TargetNode::Interface {
        modifiers: target_modifiers,
        name: target_name.clone(),
        type_params,
        extends: supertypes,
        members: body,
    }];

    if let Some(companion) = cx.plan().companion_of(idx) {
        let companion = companion.to_string();
        cx.report(
            idx,
            diagnostic_codes::INTERFACE_MEMBERS_MOVED_TO_COMPANION,
            &[&target_name, &companion],
        );
        let counts = cx.plan().private_counts(idx);
        if counts.hoisted > 0 {
            cx.report(idx, diagnostic_codes::PRIVATE_METHODS_HOISTED, &[&target_name, &companion]);
        }
        debug!(interface = %target_name, %companion, members = frame.companion_members.len(), "companion class");
        lowered.push(TargetNode::Class {
            modifiers: if exported { vec![Modifier::Export] } else { Vec::new() },
            name: companion,
            type_params: Vec::new(),
            extends: None,
            implements: Vec::new(),
            members: frame.companion_members,
        });
    }
    if cx.plan().private_counts(idx).inlined > 0 {
        cx.report(idx, diagnostic_codes::PRIVATE_METHODS_INLINED, &[&target_name]);
    }
    place_type(cx, idx, lowered)
}

// =============================================================================
// Predicates
// =============================================================================

fn method_modifiers(cx: &LowerCx<'_>, idx: NodeIndex) -> Option<(Modifiers, bool)> {
    match cx.unit().data(idx) {
        NodeData::MethodDeclaration {
            modifiers, body, ..
        } => Some((*modifiers, body.is_some())),
        _ => None,
    }
}

pub(crate) fn is_static_method(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    in_interface(cx, idx) && method_modifiers(cx, idx).is_some_and(|(m, _)| m.is_static())
}

pub(crate) fn is_private_method(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    in_interface(cx, idx)
        && method_modifiers(cx, idx)
            .is_some_and(|(m, has_body)| has_body && m.is_private() && !m.is_static())
}

pub(crate) fn is_default_method(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    in_interface(cx, idx)
        && method_modifiers(cx, idx)
            .is_some_and(|(m, has_body)| has_body && !m.is_private() && !m.is_static())
}

// =============================================================================
// Members
// =============================================================================

/// Name of the explicit receiver parameter, avoiding identifiers of the file.
fn self_param_name(cx: &LowerCx<'_>) -> String {
    let mut name = String::from("self");
    while cx.plan().is_taken(&name) {
        name.insert(0, '_');
    }
    name
}

/// Type parameters of the enclosing interface, for static methods that
/// take its instances.
fn interface_type_params(cx: &LowerCx<'_>, iface: NodeIndex) -> Vec<TypeParam> {
    let unit = cx.unit();
    let resolver = cx.resolver();
    let NodeData::InterfaceDeclaration { type_params, .. } = unit.data(iface) else {
        return Vec::new();
    };
    type_params
        .iter()
        .map(|&p| {
            let bounds = resolver.type_param_bounds(p);
            let constraint = bounds
                .get(primary_bound(resolver, &bounds))
                .map(|b| map_type(cx, b));
            TypeParam::new(unit.data(p).name().unwrap_or_default(), constraint)
        })
        .collect()
}

fn receiver_type(cx: &LowerCx<'_>, iface: NodeIndex, type_params: &[TypeParam]) -> TargetType {
    let name = cx.plan().type_name(iface).unwrap_or_default();
    let args = type_params
        .iter()
        .map(|p| TargetType::named(p.name.as_str()))
        .collect();
    TargetType::generic(name, args)
}

/// A lowered interface method: its signature parts and, when it had one,
/// its body lowered with `this` bound to an explicit receiver.
struct LoweredMethod {
    name: String,
    type_params: Vec<TypeParam>,
    params: Vec<Param>,
    return_type: TargetType,
    body: Option<Vec<TargetNode>>,
}

fn lower_interface_method(
    cx: &mut LowerCx<'_>,
    idx: NodeIndex,
    receiver: Option<&str>,
) -> Option<LoweredMethod> {
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
        return None;
    };
    let target_name = declared_method_name(cx, idx);
    report_dropped_modifiers(cx, idx, *modifiers, name);
    Some(cx.with_scope(|cx| {
        let type_params = lower_type_params(cx, type_params);
        let params = lower_params(cx, params);
        let return_type = cx.lower_type(*return_type);
        let body = body.map(|b| match receiver {
            Some(receiver) => cx.with_self_receiver(receiver, |cx| cx.lower_body(b)),
            None => cx.lower_body(b),
        });
        LoweredMethod {
            name: target_name,
            type_params,
            params,
            return_type,
            body,
        }
    }))
}

/// Static companion method taking the interface instance first.
fn companion_instance_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Option<LoweredMethod> {
    let iface = cx.resolver().enclosing_type(idx)?;
    let receiver = self_param_name(cx);
    let mut method = lower_interface_method(cx, idx, Some(&receiver))?;
    let mut type_params = interface_type_params(cx, iface);
    let self_type = receiver_type(cx, iface, &type_params);
    type_params.append(&mut method.type_params);
    method.type_params = type_params;
    method.params.insert(0, Param::new(receiver, self_type));
    Some(method)
}

fn add_static(cx: &mut LowerCx<'_>, method: LoweredMethod) {
    cx.add_companion_member(TargetNode::Method {
        modifiers: vec![Modifier::Static],
        name: method.name,
        type_params: method.type_params,
        params: method.params,
        return_type: method.return_type,
        body: Some(method.body.unwrap_or_default()),
    });
}

pub(crate) fn lower_abstract_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let Some(method) = lower_interface_method(cx, idx, None) else {
        return Vec::new();
    };
    vec![TargetNode::Method {
        modifiers: Vec::new(),
        name: method.name,
        type_params: method.type_params,
        params: method.params,
        return_type: method.return_type,
        body: None,
    }]
}

/// Static interface methods move to the companion unchanged.
pub(crate) fn lower_static_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    if let Some(method) = lower_interface_method(cx, idx, None) {
        add_static(cx, method);
    }
    Vec::new()
}

/// The signature stays in the interface; the body moves to the companion.
pub(crate) fn lower_default_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let Some(method) = companion_instance_method(cx, idx) else {
        return Vec::new();
    };
    // Interface type parameters and the receiver come first in the
    // companion form only
    let own_type_params = method
        .type_params
        .iter()
        .skip(interface_type_params_len(cx, idx))
        .cloned()
        .collect();
    let signature = TargetNode::Method {
        modifiers: Vec::new(),
        name: method.name.clone(),
        type_params: own_type_params,
        params: method.params[1..].to_vec(),
        return_type: method.return_type.clone(),
        body: None,
    };
    add_static(cx, method);
    vec![signature]
}

fn interface_type_params_len(cx: &LowerCx<'_>, method: NodeIndex) -> usize {
    cx.resolver()
        .enclosing_type(method)
        .and_then(|iface| match cx.unit().data(iface) {
            NodeData::InterfaceDeclaration { type_params, .. } => Some(type_params.len()),
            _ => None,
        })
        .unwrap_or(0)
}

/// Inlined helpers vanish here; hoisted ones become companion methods.
pub(crate) fn lower_private_method(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    if !cx.plan().is_inlined(idx) {
        if let Some(method) = companion_instance_method(cx, idx) {
            add_static(cx, method);
        }
        return Vec::new();
    }
    // The body expression is lowered at the call site
    let NodeData::MethodDeclaration {
        type_params,
        params,
        return_type,
        body,
        ..
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    for &node in type_params.iter().chain(params).chain([return_type]) {
        cx.claim_subtree(node);
    }
    if let Some(body) = body {
        cx.claim(*body);
        if let NodeData::Block { statements } = cx.unit().data(*body) {
            for &stmt in statements {
                cx.claim(stmt);
            }
        }
    }
    Vec::new()
}

/// Interface fields are implicitly `static final`: companion constants.
pub(crate) fn lower_constant(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::FieldDeclaration {
        modifiers,
        ty,
        declarators,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    cx.lower_type(*ty);
    for &declarator in declarators {
        cx.claim(declarator);
        let NodeData::VariableDeclarator { name, init, .. } = cx.unit().data(declarator) else {
            continue;
        };
        report_dropped_modifiers(cx, idx, *modifiers, name);
        let declared = cx.resolver().declarator_type(declarator);
        let initializer = init.map(|init| lower_field_initializer(cx, init, &declared));
        let ty = map_type(cx, &declared);
        cx.add_companion_member(TargetNode::Property {
            modifiers: vec![Modifier::Static, Modifier::Readonly],
            name: name.clone(),
            ty,
            initializer: initializer.map(Box::new),
        });
    }
    Vec::new()
}

/// Interfaces cannot run code on construction.
pub(crate) fn lower_initializer(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let iface = cx
        .resolver()
        .enclosing_type(idx)
        .and_then(|d| cx.plan().type_name(d))
        .unwrap_or_default()
        .to_string();
    cx.report(idx, diagnostic_codes::INTERFACE_INITIALIZER_NOT_SUPPORTED, &[&iface]);
    vec![cx.placeholder_as(idx, PlaceholderFlavor::Member)]
}
