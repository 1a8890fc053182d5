//! Library call mapping.
//!
//! Calls whose receiver is a JDK type are rewritten through a fixed table
//! keyed by receiver family, method name and arity. A mapper inspects the
//! call before lowering anything and returns `None` when the call shape has
//! no faithful equivalent; the rule then keeps the original text and reports
//! it.

use super::expressions::parenthesize_if_needed;
use super::types::map_type;
use crate::context::LowerCx;
use crate::plan::is_pure;
use arkmig_arkts::{TargetNode, TargetType};
use arkmig_common::diagnostic_codes;
use arkmig_java::types::simple_name;
use arkmig_java::{AssignOp, JavaType, NodeData, NodeIndex, PrimitiveType, SourceUnit, SyntaxKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    List,
    Map,
    Set,
    String,
    PrintStream,
    Math,
    Runnable,
    /// Members every reference type inherits from `Object`
    Object,
}

/// One call being mapped.
struct LibraryCall<'a> {
    call: NodeIndex,
    name: &'a str,
    target: Option<NodeIndex>,
    args: &'a [NodeIndex],
    receiver: JavaType,
}

type Mapper = fn(&mut LowerCx<'_>, &LibraryCall<'_>) -> Option<TargetNode>;

#[rustfmt::skip]
const TABLE: &[(Family, &str, usize, Mapper)] = &[
    (Family::List, "add", 1, list_add),
    (Family::List, "add", 2, list_insert),
    (Family::List, "get", 1, list_get),
    (Family::List, "set", 2, list_set),
    (Family::List, "size", 0, length),
    (Family::List, "isEmpty", 0, length_is_zero),
    (Family::List, "contains", 1, includes),
    (Family::List, "indexOf", 1, same_name),
    (Family::List, "remove", 1, list_remove_at),
    (Family::List, "clear", 0, list_clear),
    (Family::List, "toArray", 0, list_to_array),
    (Family::List, "toArray", 1, list_to_array),
    (Family::Map, "get", 1, same_name),
    (Family::Map, "put", 2, map_put),
    (Family::Map, "containsKey", 1, has),
    (Family::Map, "remove", 1, discarded_delete),
    (Family::Map, "size", 0, size),
    (Family::Map, "isEmpty", 0, size_is_zero),
    (Family::Map, "clear", 0, same_name),
    (Family::Set, "add", 1, discarded_same_name),
    (Family::Set, "contains", 1, has),
    (Family::Set, "remove", 1, delete),
    (Family::Set, "size", 0, size),
    (Family::Set, "isEmpty", 0, size_is_zero),
    (Family::Set, "clear", 0, same_name),
    (Family::String, "length", 0, length),
    (Family::String, "isEmpty", 0, length_is_zero),
    (Family::String, "charAt", 1, same_name),
    (Family::String, "equals", 1, string_equals),
    (Family::String, "contains", 1, includes),
    (Family::String, "compareTo", 1, string_compare),
    (Family::String, "substring", 1, same_name),
    (Family::String, "substring", 2, same_name),
    (Family::String, "indexOf", 1, same_name),
    (Family::String, "startsWith", 1, same_name),
    (Family::String, "endsWith", 1, same_name),
    (Family::String, "toUpperCase", 0, same_name),
    (Family::String, "toLowerCase", 0, same_name),
    (Family::String, "trim", 0, same_name),
    (Family::String, "concat", 1, same_name),
    (Family::PrintStream, "println", 0, console_println),
    (Family::PrintStream, "println", 1, console_println),
    (Family::PrintStream, "print", 1, console_print),
    (Family::Runnable, "run", 0, same_name),
    (Family::Object, "toString", 0, same_name),
];

const MATH_FUNCTIONS: &[&str] = &[
    "abs", "max", "min", "sqrt", "pow", "floor", "ceil", "round", "random", "sin", "cos", "tan",
    "log", "exp",
];

pub(crate) fn lower_library_call(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::MethodCall {
        target, name, args, ..
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let Some(res) = cx.resolver().resolve_call(idx, cx.scopes()) else {
        return vec![cx.placeholder(idx)];
    };
    let call = LibraryCall {
        call: idx,
        name,
        target: *target,
        args,
        receiver: res.receiver,
    };
    let family = family_of(cx, &call);

    let mapper = if family == Family::Math && MATH_FUNCTIONS.contains(&name.as_str()) {
        Some(math_function as Mapper)
    } else {
        TABLE
            .iter()
            .find(|(f, method, arity, _)| *f == family && method == name && *arity == args.len())
            .map(|&(.., mapper)| mapper)
    };
    if let Some(node) = mapper.and_then(|mapper| mapper(cx, &call)) {
        return vec![parenthesize_if_needed(cx, idx, node)];
    }

    let type_name = call
        .receiver
        .class_name()
        .map_or_else(|| call.receiver.to_string(), |n| simple_name(n).to_string());
    let arity = args.len().to_string();
    cx.report(
        idx,
        diagnostic_codes::LIBRARY_CALL_NOT_MAPPED,
        &[&type_name, name, &arity],
    );
    vec![cx.placeholder(idx)]
}

fn family_of(cx: &LowerCx<'_>, call: &LibraryCall<'_>) -> Family {
    let resolver = cx.resolver();
    let ancestry: Vec<String> = resolver
        .ancestry(&call.receiver)
        .iter()
        .filter_map(|t| t.class_name().map(str::to_string))
        .collect();
    let extends = |name: &str| ancestry.iter().any(|a| a == name);

    if extends("java.util.Set") {
        Family::Set
    } else if extends("java.util.List") || extends("java.util.Collection") {
        Family::List
    } else if extends("java.util.Map") {
        Family::Map
    } else if extends("java.lang.String") {
        Family::String
    } else if extends("java.io.PrintStream") && stream_name(cx, call).is_some() {
        Family::PrintStream
    } else if call.receiver.class_name() == Some("java.lang.Math") {
        Family::Math
    } else if extends("java.lang.Runnable") {
        Family::Runnable
    } else {
        Family::Object
    }
}

/// `out` or `err` for calls on `System.out` and `System.err`.
fn stream_name(cx: &LowerCx<'_>, call: &LibraryCall<'_>) -> Option<&'static str> {
    let dotted = call.target.and_then(|t| cx.resolver().dotted_name(t))?;
    match dotted.as_str() {
        "System.out" | "java.lang.System.out" => Some("out"),
        "System.err" | "java.lang.System.err" => Some("err"),
        _ => None,
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn receiver(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> TargetNode {
    match call.target {
        Some(target) => cx.lower_expr(target),
        None => cx.receiver(),
    }
}

fn arguments(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Vec<TargetNode> {
    call.args.iter().map(|&a| cx.lower_expr(a)).collect()
}

fn method(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>, name: &str) -> TargetNode {
    let object = receiver(cx, call);
    let args = arguments(cx, call);
    TargetNode::method_call(object, name, args)
}


fn receiver_is_pure(cx: &LowerCx<'_>, call: &LibraryCall<'_>) -> bool {
    call.target.is_none_or(|t| is_pure(cx.unit(), t))
}

/// Whether nothing in the enclosing statement is evaluated before `call`:
/// the first declarator's initializer, a `return` value, or the right-hand
/// side of a plain assignment to a local.
fn leads_statement(unit: &SourceUnit, call: NodeIndex) -> bool {
    let mut node = call;
    let mut parent = unit.parent(node);
    while let Some(p) = parent {
        if !matches!(unit.data(p), NodeData::Parenthesized { .. }) {
            break;
        }
        node = p;
        parent = unit.parent(p);
    }
    let Some(parent) = parent else {
        return false;
    };
    match unit.data(parent) {
        NodeData::VariableDeclarator { init, .. } => {
            *init == Some(node)
                && unit.parent(parent).is_some_and(|decl| match unit.data(decl) {
                    NodeData::LocalVariableDeclaration { declarators, .. } => {
                        declarators.first() == Some(&parent)
                    }
                    _ => false,
                })
        }
        NodeData::ReturnStatement { value } => *value == Some(node),
        NodeData::Assignment {
            op: AssignOp::Assign,
            target,
            value,
        } => {
            *value == node
                && matches!(unit.data(*target), NodeData::Name { .. })
                && unit
                    .parent(parent)
                    .is_some_and(|s| unit.kind(s) == SyntaxKind::ExpressionStatement)
        }
        _ => false,
    }
}

/// The previous value may be read into a statement prelude without moving
/// it ahead of anything Java would evaluate first.
fn can_keep_previous(cx: &LowerCx<'_>, call: &LibraryCall<'_>, slot: NodeIndex) -> bool {
    cx.can_prelude()
        && leads_statement(cx.unit(), call.call)
        && receiver_is_pure(cx, call)
        && is_pure(cx.unit(), slot)
}

fn approximate(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>, target: &str, reason: &str) {
    let source = format!("{}.{}", receiver_label(call), call.name);
    cx.report(
        call.call,
        diagnostic_codes::APPROXIMATE_API_MAPPING,
        &[&source, target, reason],
    );
}

fn receiver_label(call: &LibraryCall<'_>) -> String {
    call.receiver
        .class_name()
        .map_or_else(|| call.receiver.to_string(), |n| simple_name(n).to_string())
}

fn is_int_typed(cx: &LowerCx<'_>, expr: NodeIndex) -> bool {
    matches!(
        cx.resolver().type_of(expr, cx.scopes()).as_primitive(),
        Some(PrimitiveType::Int | PrimitiveType::Short | PrimitiveType::Byte | PrimitiveType::Char)
    )
}

// =============================================================================
// Mappers
// =============================================================================

fn same_name(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    Some(method(cx, call, call.name))
}

fn discarded_same_name(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    if !cx.is_discarded(call.call) {
        return None;
    }
    same_name(cx, call)
}

fn length(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    Some(TargetNode::prop(receiver(cx, call), "length"))
}

fn length_is_zero(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let length = TargetNode::prop(receiver(cx, call), "length");
    Some(TargetNode::binary(length, "==", TargetNode::number("0")))
}

fn size(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    Some(TargetNode::prop(receiver(cx, call), "size"))
}

fn size_is_zero(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let size = TargetNode::prop(receiver(cx, call), "size");
    Some(TargetNode::binary(size, "==", TargetNode::number("0")))
}

fn includes(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    Some(method(cx, call, "includes"))
}

fn has(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    Some(method(cx, call, "has"))
}

fn delete(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    Some(method(cx, call, "delete"))
}

/// `Map.remove` returns the removed value; `Map.delete` only a flag.
fn discarded_delete(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    if !cx.is_discarded(call.call) {
        return None;
    }
    delete(cx, call)
}

/// `list.add(x)` returns `true`; `push` returns the new length.
fn list_add(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let push = method(cx, call, "push");
    if cx.is_discarded(call.call) {
        Some(push)
    } else {
        Some(TargetNode::binary(push, ">", TargetNode::number("0")))
    }
}

fn list_insert(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let object = receiver(cx, call);
    let mut args = arguments(cx, call);
    args.insert(1, TargetNode::number("0"));
    Some(TargetNode::method_call(object, "splice", args))
}

fn list_get(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let object = receiver(cx, call);
    let index = cx.lower_expr(call.args[0]);
    Some(TargetNode::elem(object, index))
}

/// `list.set(i, x)`. Used for its value at the head of a statement, the
/// replaced element is kept in a temporary declared before the statement;
/// anywhere else it becomes `splice(i, 1, x)[0]`.
fn list_set(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let [index, value] = call.args else {
        return None;
    };
    if cx.is_discarded(call.call) {
        let object = receiver(cx, call);
        let index = cx.lower_expr(*index);
        let value = cx.lower_expr(*value);
        return Some(TargetNode::assign(TargetNode::elem(object, index), value));
    }
    let replayable = can_keep_previous(cx, call, *index);
    let object = receiver(cx, call);
    let index = cx.lower_expr(*index);
    let value = cx.lower_expr(*value);
    if replayable {
        let temp = cx.fresh_name("__prev");
        let slot = TargetNode::elem(object, index);
        cx.push_prelude(TargetNode::const_decl(temp.as_str(), None, slot.clone()));
        cx.push_prelude(TargetNode::expr_stmt(TargetNode::assign(slot, value)));
        cx.report(call.call, diagnostic_codes::PREVIOUS_VALUE_TEMPORARY, &["set", &temp]);
        return Some(TargetNode::id(temp));
    }
    let splice = TargetNode::method_call(object, "splice", vec![index, TargetNode::number("1"), value]);
    Some(TargetNode::elem(splice, TargetNode::number("0")))
}

/// Only the `remove(int)` overload; `remove(Object)` has no direct equivalent.
fn list_remove_at(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    if !is_int_typed(cx, call.args[0]) {
        return None;
    }
    let object = receiver(cx, call);
    let index = cx.lower_expr(call.args[0]);
    let splice = TargetNode::method_call(object, "splice", vec![index, TargetNode::number("1")]);
    Some(TargetNode::elem(splice, TargetNode::number("0")))
}

fn list_clear(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let object = receiver(cx, call);
    Some(TargetNode::method_call(object, "splice", vec![TargetNode::number("0")]))
}

/// `list.toArray(new T[0])` becomes `Array.from<T>(list)`; the hint array
/// only supplies the element type.
fn list_to_array(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let element = match call.args.first() {
        Some(&hint) => {
            let hint_type = cx.resolver().type_of(hint, cx.scopes());
            hint_type
                .element_type()
                .map_or_else(TargetType::object, |e| map_type(cx, e))
        }
        None => TargetType::object(),
    };
    let object = receiver(cx, call);
    if let Some(&hint) = call.args.first() {
        if cx.unit().kind(hint) != SyntaxKind::ArrayCreation {
            cx.report(hint, diagnostic_codes::TO_ARRAY_HINT_NOT_FRESH, &[]);
        }
        cx.claim_subtree(hint);
    }
    Some(TargetNode::Call {
        callee: Box::new(TargetNode::prop(TargetNode::id("Array"), "from")),
        type_args: vec![element],
        arguments: vec![object],
    })
}

/// `map.put(k, v)` returns the previous value; `Map.set` returns the map.
fn map_put(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let [key, value] = call.args else {
        return None;
    };
    if cx.is_discarded(call.call) {
        return Some(method(cx, call, "set"));
    }
    if !can_keep_previous(cx, call, *key) {
        return None;
    }
    let object = receiver(cx, call);
    let key = cx.lower_expr(*key);
    let value = cx.lower_expr(*value);
    let temp = cx.fresh_name("__prev");
    let previous = TargetNode::method_call(object.clone(), "get", vec![key.clone()]);
    cx.push_prelude(TargetNode::const_decl(temp.as_str(), None, previous));
    cx.push_prelude(TargetNode::expr_stmt(TargetNode::method_call(object, "set", vec![key, value])));
    cx.report(call.call, diagnostic_codes::PREVIOUS_VALUE_TEMPORARY, &["put", &temp]);
    Some(TargetNode::id(temp))
}

fn string_equals(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let object = receiver(cx, call);
    let other = cx.lower_expr(call.args[0]);
    Some(TargetNode::binary(object, "==", other))
}

fn string_compare(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    approximate(
        cx,
        call,
        "localeCompare",
        "the result is only guaranteed to agree in sign",
    );
    Some(method(cx, call, "localeCompare"))
}

fn console_println(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let stream = stream_name(cx, call)?;
    let function = if stream == "err" { "error" } else { "log" };
    console(cx, call, function)
}

/// `print` has no newline-free console counterpart.
fn console_print(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    let stream = stream_name(cx, call)?;
    let function = if stream == "err" { "error" } else { "log" };
    let target = format!("console.{function}");
    approximate(cx, call, &target, "a line break is appended");
    console(cx, call, function)
}

fn console(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>, function: &str) -> Option<TargetNode> {
    if let Some(target) = call.target {
        cx.claim_subtree(target);
    }
    let args = arguments(cx, call);
    Some(TargetNode::method_call(TargetNode::id("console"), function, args))
}

fn math_function(cx: &mut LowerCx<'_>, call: &LibraryCall<'_>) -> Option<TargetNode> {
    if let Some(target) = call.target {
        cx.claim_subtree(target);
    }
    let name = call.name;
    let args = arguments(cx, call);
    Some(TargetNode::method_call(TargetNode::id("Math"), name, args))
}
