//! Type lowering: Java types to ArkTS types.

use crate::context::LowerCx;
use arkmig_arkts::{TargetNode, TargetType};
use arkmig_common::diagnostic_codes;
use arkmig_java::types::simple_name;
use arkmig_java::{JavaType, NodeData, NodeIndex, PrimitiveType};
use arkmig_resolver::{TypeCategory, TypeResolver};

/// Java collection families with a native ArkTS counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Collection {
    List,
    Map,
    Set,
}

impl Collection {
    fn target_name(self) -> &'static str {
        match self {
            Collection::List => "Array",
            Collection::Map => "Map",
            Collection::Set => "Set",
        }
    }

    fn arity(self) -> usize {
        match self {
            Collection::Map => 2,
            Collection::List | Collection::Set => 1,
        }
    }
}

const COLLECTION_TYPES: &[(&str, Collection)] = &[
    ("java.util.List", Collection::List),
    ("java.util.ArrayList", Collection::List),
    ("java.util.LinkedList", Collection::List),
    ("java.util.Collection", Collection::List),
    ("java.util.Map", Collection::Map),
    ("java.util.HashMap", Collection::Map),
    ("java.util.LinkedHashMap", Collection::Map),
    ("java.util.TreeMap", Collection::Map),
    ("java.util.Set", Collection::Set),
    ("java.util.HashSet", Collection::Set),
];

const BOXED_TYPES: &[(&str, &str)] = &[
    ("java.lang.Integer", "Int"),
    ("java.lang.Long", "Long"),
    ("java.lang.Short", "Short"),
    ("java.lang.Byte", "Byte"),
    ("java.lang.Float", "Float"),
    ("java.lang.Double", "Double"),
    ("java.lang.Character", "Char"),
    ("java.lang.Boolean", "Boolean"),
    ("java.lang.Number", "Number"),
];

pub(crate) fn collection_of(name: &str) -> Option<Collection> {
    COLLECTION_TYPES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, c)| c)
}

/// A generic collection type written without type arguments.
pub(crate) fn is_raw_collection(ty: &JavaType) -> bool {
    match ty {
        JavaType::Class { name, args } => args.is_empty() && collection_of(name).is_some(),
        JavaType::Array { element } => is_raw_collection(element),
        _ => false,
    }
}

/// Index of the bound an intersection narrows to: the first class bound,
/// else the first bound.
pub(crate) fn primary_bound(resolver: &TypeResolver<'_>, bounds: &[JavaType]) -> usize {
    bounds
        .iter()
        .position(|b| resolver.category(b) == TypeCategory::Class)
        .unwrap_or(0)
}

/// Short form of a Java type for diagnostics: `List<String>`, `int[]`.
pub(crate) fn display_type(ty: &JavaType) -> String {
    match ty {
        JavaType::Class { name, args } if !args.is_empty() => {
            let args: Vec<String> = args.iter().map(display_type).collect();
            format!("{}<{}>", simple_name(name), args.join(", "))
        }
        JavaType::Class { name, .. } => simple_name(name).to_string(),
        JavaType::Array { element } => format!("{}[]", display_type(element)),
        JavaType::Intersection { bounds } => bounds
            .iter()
            .map(display_type)
            .collect::<Vec<_>>()
            .join(" & "),
        other => other.to_string(),
    }
}

pub(crate) fn map_type(cx: &LowerCx<'_>, ty: &JavaType) -> TargetType {
    match ty {
        JavaType::Primitive { primitive } => match primitive {
            PrimitiveType::Void => TargetType::Void,
            p => TargetType::named(p.keyword()),
        },
        JavaType::Class { name, args } => map_class(cx, name, args),
        JavaType::Array { element } => TargetType::array(map_type(cx, element)),
        JavaType::TypeVariable { name } => TargetType::named(name.as_str()),
        JavaType::Intersection { bounds } if cx.options().intersection_bounds => {
            TargetType::Intersection(bounds.iter().map(|b| map_type(cx, b)).collect())
        }
        JavaType::Intersection { bounds } => {
            let primary = primary_bound(cx.resolver(), bounds);
            bounds
                .get(primary)
                .map_or_else(TargetType::object, |b| map_type(cx, b))
        }
        JavaType::Null | JavaType::Unknown => TargetType::object(),
    }
}

fn map_class(cx: &LowerCx<'_>, name: &str, args: &[JavaType]) -> TargetType {
    match name {
        "java.lang.String" => return TargetType::named("string"),
        "java.lang.Object" => return TargetType::object(),
        _ => {}
    }
    if let Some(&(_, boxed)) = BOXED_TYPES.iter().find(|(n, _)| *n == name) {
        return TargetType::named(boxed);
    }
    if let Some(collection) = collection_of(name) {
        let mapped = if args.len() == collection.arity() {
            args.iter().map(|a| map_type(cx, a)).collect()
        } else {
            vec![TargetType::object(); collection.arity()]
        };
        return TargetType::generic(collection.target_name(), mapped);
    }
    let args = args.iter().map(|a| map_type(cx, a)).collect();
    match cx.plan().target_type_name(name) {
        Some(target) => TargetType::generic(target, args),
        None => TargetType::generic(simple_name(name), args),
    }
}

/// Target name of a type used as an expression (`Outer.Inner.CONST`).
pub(crate) fn type_reference(cx: &LowerCx<'_>, qualified: &str) -> TargetNode {
    let name = cx
        .plan()
        .target_type_name(qualified)
        .unwrap_or_else(|| simple_name(qualified));
    TargetNode::id(name)
}

/// Add an explicit cast where a reference array flows into an array of a
/// different element type.
pub(crate) fn coerce_array(
    cx: &mut LowerCx<'_>,
    at: NodeIndex,
    value: TargetNode,
    from: &JavaType,
    to: &JavaType,
) -> TargetNode {
    let (Some(from_element), Some(to_element)) = (from.element_type(), to.element_type()) else {
        return value;
    };
    if from == to
        || !from_element.is_reference()
        || !to_element.is_reference()
        || !cx.resolver().is_subtype(from, to)
    {
        return value;
    }
    let from_name = display_type(from_element);
    let to_name = display_type(to_element);
    cx.report(at, diagnostic_codes::ARRAY_COVARIANCE_CAST, &[&from_name, &to_name]);
    TargetNode::as_cast(value, map_type(cx, to))
}

// =============================================================================
// Rules
// =============================================================================

/// Primitive, class and array type nodes.
pub(crate) fn lower_type_node(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let ty = cx.resolver().type_from_node(idx);
    cx.claim_subtree(idx);
    let mapped = map_type(cx, &ty);
    if is_raw_collection(&ty) {
        let raw = display_type(&ty);
        let migrated = mapped.to_string();
        cx.report(idx, diagnostic_codes::RAW_TYPE_MIGRATED, &[&raw, &migrated]);
    }
    vec![TargetNode::Type(mapped)]
}

pub(crate) fn lower_intersection_type(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let ty = cx.resolver().type_from_node(idx);
    cx.claim_subtree(idx);
    vec![TargetNode::Type(map_type(cx, &ty))]
}

pub(crate) fn is_intersection_node(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    matches!(cx.unit().data(idx), NodeData::IntersectionType { .. })
}
