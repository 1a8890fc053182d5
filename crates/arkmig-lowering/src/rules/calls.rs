//! Method call lowering for calls into code declared in the file.
//!
//! Library receivers are handled by `library`; the rules here cover plain
//! virtual and static calls, calls into interface companions, and inlined
//! private interface helpers.

use super::expressions::parenthesize_if_needed;
use super::types::{coerce_array, type_reference};
use crate::context::LowerCx;
use crate::plan::inline_body;
use arkmig_arkts::TargetNode;
use arkmig_common::diagnostic_codes;
use arkmig_java::{NodeData, NodeIndex, SyntaxKind};
use arkmig_resolver::{CallResolution, OverloadChoice, ResolvedMethod};
use rustc_hash::FxHashMap;

fn resolve(cx: &LowerCx<'_>, idx: NodeIndex) -> Option<CallResolution> {
    cx.resolver().resolve_call(idx, cx.scopes())
}

pub(crate) fn is_library_call(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    resolve(cx, idx).is_some_and(|res| cx.resolver().is_library_type(&res.receiver))
}

/// Declaration of the inlined private method an unqualified or `this.`
/// call targets.
fn inlined_target(cx: &LowerCx<'_>, idx: NodeIndex) -> Option<NodeIndex> {
    let NodeData::MethodCall { target, .. } = cx.unit().data(idx) else {
        return None;
    };
    if target.is_some_and(|t| cx.unit().kind(t) != SyntaxKind::This) {
        return None;
    }
    let res = resolve(cx, idx)?;
    let method = res.selected()?;
    let decl = cx.plan().method_decl(&method.owner, &method.declared)?;
    cx.plan().is_inlined(decl).then_some(decl)
}

pub(crate) fn is_inlined_call(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    inlined_target(cx, idx).is_some()
}

/// Replace the call with the helper's single expression, parameters bound
/// to the lowered arguments.
pub(crate) fn lower_inlined_call(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let unit = cx.unit();
    let NodeData::MethodCall { target, args, .. } = unit.data(idx) else {
        return Vec::new();
    };
    let Some((decl, (_, value))) =
        inlined_target(cx, idx).and_then(|d| inline_body(unit, d).map(|body| (d, body)))
    else {
        return vec![cx.placeholder(idx)];
    };
    let NodeData::MethodDeclaration { params, .. } = unit.data(decl) else {
        return vec![cx.placeholder(idx)];
    };
    if let Some(target) = target {
        cx.claim(*target);
    }

    let referenced: Vec<&str> = unit
        .subtree(value)
        .into_iter()
        .filter_map(|n| match unit.data(n) {
            NodeData::Name { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    let mut bindings = FxHashMap::default();
    for (&param, &arg) in params.iter().zip(args) {
        let name = unit.data(param).name().unwrap_or_default();
        if referenced.contains(&name) {
            bindings.insert(name.to_string(), cx.lower_expr(arg));
        } else {
            // Pure by construction of the plan
            cx.claim_subtree(arg);
        }
    }

    let discarded = cx.is_discarded(idx);
    let lowered = cx.with_inline_bindings(bindings, |cx| {
        if discarded {
            cx.lower_discarded(value)
        } else {
            cx.lower_expr(value)
        }
    });
    vec![parenthesize_if_needed(cx, idx, lowered)]
}

/// The companion and method of a static or hoisted private interface method.
fn companion_target(cx: &LowerCx<'_>, idx: NodeIndex) -> Option<(String, ResolvedMethod)> {
    let res = resolve(cx, idx)?;
    let method = res.selected()?;
    let companion = cx.plan().companion_named(&method.owner)?;
    let declared = &method.declared;
    let eligible = declared.is_static()
        || (declared.modifiers.is_private()
            && cx
                .plan()
                .method_decl(&method.owner, declared)
                .is_some_and(|d| !cx.plan().is_inlined(d)));
    eligible.then(|| (companion.to_string(), method.clone()))
}

pub(crate) fn is_companion_call(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    companion_target(cx, idx).is_some()
}

/// `Iface.helper(a)` becomes `IfaceCompanion.helper(a)`; a hoisted private
/// method receives its receiver as first argument.
pub(crate) fn lower_companion_call(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::MethodCall { target, name, args, .. } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let Some((companion, method)) = companion_target(cx, idx) else {
        return vec![cx.placeholder(idx)];
    };
    let mut arguments = Vec::with_capacity(args.len() + 1);
    if method.declared.is_static() {
        if let Some(target) = target {
            cx.claim_subtree(*target);
        }
    } else {
        let receiver = match target {
            None => cx.receiver(),
            Some(t) if cx.unit().kind(*t) == SyntaxKind::This => {
                cx.claim(*t);
                cx.receiver()
            }
            Some(t) => cx.lower_expr(*t),
        };
        arguments.push(receiver);
    }
    arguments.extend(lower_arguments(cx, args, Some(&method)));
    let method_name = cx
        .plan()
        .method_name(&method.owner, name, &method.declared.params)
        .to_string();
    vec![TargetNode::method_call(
        TargetNode::id(companion),
        method_name,
        arguments,
    )]
}

pub(crate) fn lower_method_call(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::MethodCall {
        target,
        name,
        type_args,
        args,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let res = resolve(cx, idx);
    let selected = res.as_ref().and_then(CallResolution::selected).cloned();

    let object = match target {
        None => match &selected {
            Some(m) if m.declared.is_static() => type_reference(cx, &m.owner),
            _ => cx.receiver(),
        },
        Some(t) if res.as_ref().is_some_and(|r| r.static_receiver) => {
            cx.claim_subtree(*t);
            let owner = res
                .as_ref()
                .and_then(|r| r.receiver.class_name())
                .unwrap_or_default();
            type_reference(cx, owner)
        }
        Some(t) => cx.lower_expr(*t),
    };

    let method_name = match &selected {
        Some(m) if cx.resolver().is_declared_in_file(&m.owner) => cx
            .plan()
            .method_name(&m.owner, name, &m.declared.params)
            .to_string(),
        _ => name.clone(),
    };
    let fallback = res
        .as_ref()
        .is_some_and(|r| matches!(r.choice, OverloadChoice::Fallback(_)));
    if let Some(m) = selected.as_ref().filter(|_| fallback) {
        let signature = m.declared.signature();
        cx.report(idx, diagnostic_codes::OVERLOAD_NOT_RESOLVED, &[name, &signature]);
    }

    let type_args = type_args.iter().map(|&t| cx.lower_type(t)).collect();
    let arguments = lower_arguments(cx, args, selected.as_ref());
    vec![TargetNode::Call {
        callee: Box::new(TargetNode::prop(object, method_name)),
        type_args,
        arguments,
    }]
}

/// Lower call arguments, casting arrays passed where the selected overload
/// expects a different element type.
pub(crate) fn lower_arguments(
    cx: &mut LowerCx<'_>,
    args: &[NodeIndex],
    method: Option<&ResolvedMethod>,
) -> Vec<TargetNode> {
    args.iter()
        .enumerate()
        .map(|(i, &arg)| {
            let lowered = cx.lower_expr(arg);
            let param = method.and_then(|m| {
                let is_rest = m.declared.varargs && i + 1 >= m.params.len();
                if is_rest { None } else { m.params.get(i) }
            });
            match param {
                Some(param) => {
                    let actual = cx.resolver().type_of(arg, cx.scopes());
                    coerce_array(cx, arg, lowered, &actual, param)
                }
                None => lowered,
            }
        })
        .collect()
}
