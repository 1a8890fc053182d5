//! Expression lowering.

use super::needs_parens;
use super::types::{
    Collection, coerce_array, collection_of, display_type, is_intersection_node, map_type,
    primary_bound, type_reference,
};
use crate::context::LowerCx;
use crate::plan::is_pure;
use arkmig_arkts::{TargetNode, TargetType};
use arkmig_common::diagnostic_codes;
use arkmig_java::types::simple_name;
use arkmig_java::{AssignOp, JavaType, LiteralKind, NodeData, NodeIndex};
use arkmig_resolver::NameBinding;

pub(crate) fn lower_literal(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Literal { literal, value } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let node = match literal {
        LiteralKind::Int => TargetNode::number(value.as_str()),
        LiteralKind::Long => TargetNode::number(value.trim_end_matches(['L', 'l'])),
        // ArkTS keeps the `f` suffix for float literals
        LiteralKind::Float => TargetNode::number(value.as_str()),
        LiteralKind::Double => {
            let is_hex = value.starts_with("0x") || value.starts_with("0X");
            if is_hex {
                TargetNode::number(value.as_str())
            } else {
                TargetNode::number(value.trim_end_matches(['d', 'D']))
            }
        }
        LiteralKind::Char => TargetNode::CharLiteral(value.clone()),
        LiteralKind::String => TargetNode::string(value.as_str()),
        LiteralKind::Boolean => TargetNode::BooleanLiteral(value == "true"),
        LiteralKind::Null => TargetNode::NullLiteral,
    };
    vec![node]
}

pub(crate) fn lower_name(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Name { name } = cx.unit().data(idx) else {
        return Vec::new();
    };
    if let Some(bound) = cx.inline_binding(name) {
        return vec![bound.clone()];
    }
    let node = match cx.resolver().resolve_name(name, idx, cx.scopes()) {
        NameBinding::Local(_) | NameBinding::Unknown => TargetNode::id(name.as_str()),
        NameBinding::Field {
            owner, is_static, ..
        } => field_reference(cx, &owner, is_static, name),
        NameBinding::Type(qualified) => type_reference(cx, &qualified),
    };
    vec![node]
}

/// An unqualified field: interface constants live on the companion.
fn field_reference(cx: &LowerCx<'_>, owner: &str, is_static: bool, name: &str) -> TargetNode {
    let object = match cx.plan().companion_named(owner) {
        Some(companion) => TargetNode::id(companion),
        None if is_static => type_reference(cx, owner),
        None => cx.receiver(),
    };
    TargetNode::prop(object, name)
}

pub(crate) fn lower_field_access(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::FieldAccess { target, name } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let resolver = cx.resolver();
    // `Outer.Inner` naming a type
    if let Some(qualified) = resolver.static_type_reference(idx, cx.scopes()) {
        cx.claim_subtree(*target);
        return vec![type_reference(cx, &qualified)];
    }
    // `Type.FIELD`
    if let Some(qualified) = resolver.static_type_reference(*target, cx.scopes()) {
        cx.claim_subtree(*target);
        let owner = resolver
            .field_of(&JavaType::class(qualified.as_str()), name)
            .map_or(qualified, |(owner, ..)| owner);
        let object = match cx.plan().companion_named(&owner) {
            Some(companion) => TargetNode::id(companion),
            None => type_reference(cx, &owner),
        };
        return vec![TargetNode::prop(object, name.as_str())];
    }
    let object = cx.lower_expr(*target);
    vec![TargetNode::prop(object, name.as_str())]
}

pub(crate) fn lower_this(cx: &mut LowerCx<'_>, _idx: NodeIndex) -> Vec<TargetNode> {
    vec![cx.receiver()]
}

pub(crate) fn lower_object_creation(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ObjectCreation { ty, args } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let created = cx.resolver().type_from_node(*ty);
    let class_name = created.class_name().unwrap_or_default().to_string();

    if let Some(collection) = collection_of(&class_name) {
        return vec![lower_collection_creation(cx, idx, collection, *ty, args)];
    }
    let is_library = cx.resolver().is_library_type(&created);
    if is_library && class_name != "java.lang.Object" {
        return vec![unmapped_constructor(cx, idx, &class_name, args.len())];
    }

    let class = cx.lower_type(*ty);
    let arguments = args.iter().map(|&a| cx.lower_expr(a)).collect();
    vec![TargetNode::New { class, arguments }]
}

fn lower_collection_creation(
    cx: &mut LowerCx<'_>,
    idx: NodeIndex,
    collection: Collection,
    ty: NodeIndex,
    args: &[NodeIndex],
) -> TargetNode {
    let resolver = cx.resolver();
    let class_name = resolver
        .type_from_node(ty)
        .class_name()
        .unwrap_or_default()
        .to_string();
    match args {
        [] => {
            let class = cx.lower_type(ty);
            TargetNode::New {
                class,
                arguments: Vec::new(),
            }
        }
        [arg] => {
            let arg_type = resolver.type_of(*arg, cx.scopes());
            if arg_type.as_primitive().is_some_and(|p| p.is_numeric()) {
                let pure = is_pure(cx.unit(), *arg);
                if !pure && !cx.can_prelude() {
                    return unmapped_constructor(cx, idx, &class_name, 1);
                }
                let class = cx.lower_type(ty);
                if pure {
                    cx.claim_subtree(*arg);
                } else {
                    // Keep the side effects of the capacity expression
                    let capacity = cx.lower_expr(*arg);
                    cx.push_prelude(TargetNode::expr_stmt(capacity));
                }
                let source = format!("new {}(int)", simple_name(&class_name));
                let target = format!("new {class}()");
                cx.report(
                    idx,
                    diagnostic_codes::APPROXIMATE_API_MAPPING,
                    &[&source, &target, "the initial capacity is dropped"],
                );
                return TargetNode::New {
                    class,
                    arguments: Vec::new(),
                };
            }
            let class = cx.lower_type(ty);
            let source = cx.lower_expr(*arg);
            match collection {
                Collection::List => {
                    let element = match &class {
                        TargetType::Named { args, .. } => args.first().cloned(),
                        _ => None,
                    }
                    .unwrap_or_else(TargetType::object);
                    TargetNode::Call {
                        callee: Box::new(TargetNode::prop(TargetNode::id("Array"), "from")),
                        type_args: vec![element],
                        arguments: vec![source],
                    }
                }
                Collection::Map | Collection::Set => TargetNode::New {
                    class,
                    arguments: vec![source],
                },
            }
        }
        _ => unmapped_constructor(cx, idx, &class_name, args.len()),
    }
}

fn unmapped_constructor(cx: &mut LowerCx<'_>, idx: NodeIndex, class_name: &str, arity: usize) -> TargetNode {
    let arity = arity.to_string();
    cx.report(
        idx,
        diagnostic_codes::LIBRARY_CALL_NOT_MAPPED,
        &[simple_name(class_name), "new", &arity],
    );
    cx.placeholder(idx)
}

pub(crate) fn lower_array_creation(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ArrayCreation {
        element,
        dims,
        extra_dims,
        initializer,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let element = cx.lower_type(*element);
    if let Some(initializer) = initializer {
        return vec![cx.lower_expr(*initializer)];
    }
    let dims = dims.iter().map(|&d| cx.lower_expr(d)).collect();
    vec![TargetNode::NewArray {
        element,
        dims,
        extra_dims: *extra_dims,
    }]
}

pub(crate) fn lower_array_initializer(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ArrayInitializer { elements } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let elements = elements.iter().map(|&e| cx.lower_expr(e)).collect();
    vec![TargetNode::ArrayLiteral(elements)]
}

pub(crate) fn lower_array_access(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ArrayAccess { array, index } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let array = cx.lower_expr(*array);
    let index = cx.lower_expr(*index);
    vec![TargetNode::elem(array, index)]
}

pub(crate) fn lower_assignment(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Assignment { op, target, value } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let lowered_target = cx.lower_expr(*target);
    let mut lowered_value = cx.lower_expr(*value);
    if *op == AssignOp::Assign {
        let resolver = cx.resolver();
        let from = resolver.type_of(*value, cx.scopes());
        let to = resolver.type_of(*target, cx.scopes());
        lowered_value = coerce_array(cx, *value, lowered_value, &from, &to);
    }
    let node = TargetNode::Assign {
        target: Box::new(lowered_target),
        operator: op.as_str(),
        value: Box::new(lowered_value),
    };
    vec![parenthesize_if_needed(cx, idx, node)]
}

pub(crate) fn lower_binary(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Binary { op, left, right } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let left = cx.lower_expr(*left);
    let right = if op.is_short_circuit() {
        cx.no_prelude(|cx| cx.lower_expr(*right))
    } else {
        cx.lower_expr(*right)
    };
    vec![TargetNode::binary(left, op.as_str(), right)]
}

pub(crate) fn lower_unary(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Unary { op, operand } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let operand = Box::new(cx.lower_expr(*operand));
    let node = if op.is_prefix() {
        TargetNode::PrefixUnary {
            operator: op.as_str(),
            operand,
        }
    } else {
        TargetNode::PostfixUnary {
            operand,
            operator: op.as_str(),
        }
    };
    vec![node]
}

pub(crate) fn lower_conditional(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Conditional {
        condition,
        then_value,
        else_value,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let condition = cx.lower_expr(*condition);
    let when_true = cx.no_prelude(|cx| cx.lower_expr(*then_value));
    let when_false = cx.no_prelude(|cx| cx.lower_expr(*else_value));
    vec![TargetNode::Conditional {
        condition: Box::new(condition),
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    }]
}

pub(crate) fn lower_cast(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Cast { ty, expression } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let ty = cx.lower_type(*ty);
    let expression = cx.lower_expr(*expression);
    let node = TargetNode::as_cast(expression, ty);
    vec![parenthesize_if_needed(cx, idx, node)]
}

pub(crate) fn is_intersection_cast(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    match cx.unit().data(idx) {
        NodeData::Cast { ty, .. } => is_intersection_node(cx, *ty),
        _ => false,
    }
}

/// `(A & B) x` becomes `x as A`: casts cannot name an intersection.
pub(crate) fn lower_intersection_cast(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Cast { ty, expression } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let cast_type = cx.resolver().type_from_node(*ty);
    cx.claim_subtree(*ty);
    let target = match &cast_type {
        JavaType::Intersection { bounds } => {
            let primary = primary_bound(cx.resolver(), bounds);
            let dropped: Vec<String> = bounds
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != primary)
                .map(|(_, b)| format!("'{}'", display_type(b)))
                .collect();
            let narrowed = bounds.get(primary).cloned().unwrap_or_else(JavaType::object);
            let written = display_type(&cast_type);
            let kept = display_type(&narrowed);
            let dropped = dropped.join(", ");
            cx.report(
                idx,
                diagnostic_codes::INTERSECTION_CAST_NARROWED,
                &[&written, &kept, &dropped],
            );
            map_type(cx, &narrowed)
        }
        other => map_type(cx, other),
    };
    let expression = cx.lower_expr(*expression);
    let node = TargetNode::as_cast(expression, target);
    vec![parenthesize_if_needed(cx, idx, node)]
}

pub(crate) fn lower_instance_of(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::InstanceOf { expression, ty } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let expression = cx.lower_expr(*expression);
    let ty = cx.lower_type(*ty);
    let node = TargetNode::InstanceOf {
        expression: Box::new(expression),
        ty,
    };
    vec![parenthesize_if_needed(cx, idx, node)]
}

pub(crate) fn lower_parenthesized(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Parenthesized { expression } = cx.unit().data(idx) else {
        return Vec::new();
    };
    match cx.lower_expr(*expression) {
        node @ TargetNode::Parenthesized(_) => vec![node],
        node => vec![node.paren()],
    }
}

/// Parenthesize a replacement whose operator binds looser than its parent.
pub(crate) fn parenthesize_if_needed(cx: &LowerCx<'_>, idx: NodeIndex, node: TargetNode) -> TargetNode {
    let loose = matches!(
        node,
        TargetNode::Binary { .. }
            | TargetNode::Conditional { .. }
            | TargetNode::Assign { .. }
            | TargetNode::As { .. }
            | TargetNode::InstanceOf { .. }
    );
    if loose && needs_parens(cx, idx) {
        node.paren()
    } else {
        node
    }
}
