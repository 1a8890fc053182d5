//! Construct lowering rules.
//!
//! `STANDARD_RULES` is the declarative table the standard registry is built
//! from. Each entry names the construct kind it lowers, how specific its
//! predicate is, and a priority among rules of the same specificity.

mod calls;
mod declarations;
mod expressions;
mod interfaces;
mod library;
mod statements;
mod types;

use crate::context::LowerCx;
use crate::registry::{RuleEntry, Specificity};
use arkmig_java::{NodeData, NodeIndex, SyntaxKind};

use Specificity::{Kind, Modifiers, Type};
use SyntaxKind as K;

#[rustfmt::skip]
pub static STANDARD_RULES: &[RuleEntry] = &[
    // Declarations
    RuleEntry::new("compilation_unit", K::CompilationUnit, Kind, 0, always, declarations::lower_compilation_unit),
    RuleEntry::new("class_declaration", K::ClassDeclaration, Kind, 0, always, declarations::lower_class),
    RuleEntry::new("interface_declaration", K::InterfaceDeclaration, Kind, 0, always, interfaces::lower_interface),
    RuleEntry::new("native_method", K::MethodDeclaration, Modifiers, 40, declarations::is_native, declarations::lower_native_method),
    RuleEntry::new("interface_static_method", K::MethodDeclaration, Modifiers, 30, interfaces::is_static_method, interfaces::lower_static_method),
    RuleEntry::new("interface_private_method", K::MethodDeclaration, Modifiers, 20, interfaces::is_private_method, interfaces::lower_private_method),
    RuleEntry::new("interface_default_method", K::MethodDeclaration, Modifiers, 10, interfaces::is_default_method, interfaces::lower_default_method),
    RuleEntry::new("interface_abstract_method", K::MethodDeclaration, Type, 0, in_interface, interfaces::lower_abstract_method),
    RuleEntry::new("method_declaration", K::MethodDeclaration, Kind, 0, always, declarations::lower_method),
    RuleEntry::new("constructor", K::ConstructorDeclaration, Kind, 0, always, declarations::lower_constructor),
    RuleEntry::new("interface_constant", K::FieldDeclaration, Type, 0, in_interface, interfaces::lower_constant),
    RuleEntry::new("field_declaration", K::FieldDeclaration, Kind, 0, always, declarations::lower_field),
    RuleEntry::new("interface_initializer", K::InitializerBlock, Type, 10, in_interface, interfaces::lower_initializer),
    RuleEntry::new("static_initializer", K::InitializerBlock, Modifiers, 0, declarations::is_class_static_initializer, declarations::lower_static_initializer),
    RuleEntry::new("parameter", K::Parameter, Kind, 0, always, declarations::lower_parameter),
    RuleEntry::new("bounded_type_parameter", K::TypeParameter, Type, 0, declarations::has_several_bounds, declarations::lower_bounded_type_parameter),
    RuleEntry::new("type_parameter", K::TypeParameter, Kind, 0, always, declarations::lower_type_parameter),
    // Types
    RuleEntry::new("primitive_type", K::PrimitiveType, Kind, 0, always, types::lower_type_node),
    RuleEntry::new("class_type", K::ClassType, Kind, 0, always, types::lower_type_node),
    RuleEntry::new("array_type", K::ArrayType, Kind, 0, always, types::lower_type_node),
    RuleEntry::new("intersection_type", K::IntersectionType, Kind, 0, types::is_intersection_node, types::lower_intersection_type),
    // Statements
    RuleEntry::new("block", K::Block, Kind, 0, always, statements::lower_block),
    RuleEntry::new("local_variable", K::LocalVariableDeclaration, Kind, 0, always, statements::lower_local_variable),
    RuleEntry::new("expression_statement", K::ExpressionStatement, Kind, 0, always, statements::lower_expression_statement),
    RuleEntry::new("if_statement", K::IfStatement, Kind, 0, always, statements::lower_if),
    RuleEntry::new("while_statement", K::WhileStatement, Kind, 0, always, statements::lower_while),
    RuleEntry::new("do_statement", K::DoStatement, Kind, 0, always, statements::lower_do),
    RuleEntry::new("for_statement", K::ForStatement, Kind, 0, always, statements::lower_for),
    RuleEntry::new("for_each_statement", K::ForEachStatement, Kind, 0, always, statements::lower_for_each),
    RuleEntry::new("switch_statement", K::SwitchStatement, Kind, 0, always, statements::lower_switch),
    RuleEntry::new("switch_case", K::SwitchCase, Kind, 0, always, statements::lower_switch_case),
    RuleEntry::new("return_statement", K::ReturnStatement, Kind, 0, always, statements::lower_return),
    RuleEntry::new("break_statement", K::BreakStatement, Kind, 0, always, statements::lower_break),
    RuleEntry::new("continue_statement", K::ContinueStatement, Kind, 0, always, statements::lower_continue),
    RuleEntry::new("throw_statement", K::ThrowStatement, Kind, 0, always, statements::lower_throw),
    RuleEntry::new("empty_statement", K::EmptyStatement, Kind, 0, always, statements::lower_empty),
    RuleEntry::new("labeled_statement", K::LabeledStatement, Kind, 0, always, statements::lower_labeled),
    // Expressions
    RuleEntry::new("literal", K::Literal, Kind, 0, always, expressions::lower_literal),
    RuleEntry::new("name", K::Name, Kind, 0, always, expressions::lower_name),
    RuleEntry::new("field_access", K::FieldAccess, Kind, 0, always, expressions::lower_field_access),
    RuleEntry::new("this", K::This, Kind, 0, always, expressions::lower_this),
    RuleEntry::new("object_creation", K::ObjectCreation, Kind, 0, always, expressions::lower_object_creation),
    RuleEntry::new("array_creation", K::ArrayCreation, Kind, 0, always, expressions::lower_array_creation),
    RuleEntry::new("array_initializer", K::ArrayInitializer, Kind, 0, always, expressions::lower_array_initializer),
    RuleEntry::new("array_access", K::ArrayAccess, Kind, 0, always, expressions::lower_array_access),
    RuleEntry::new("assignment", K::Assignment, Kind, 0, always, expressions::lower_assignment),
    RuleEntry::new("binary", K::Binary, Kind, 0, always, expressions::lower_binary),
    RuleEntry::new("unary", K::Unary, Kind, 0, always, expressions::lower_unary),
    RuleEntry::new("conditional", K::Conditional, Kind, 0, always, expressions::lower_conditional),
    RuleEntry::new("intersection_cast", K::Cast, Type, 0, expressions::is_intersection_cast, expressions::lower_intersection_cast),
    RuleEntry::new("cast", K::Cast, Kind, 0, always, expressions::lower_cast),
    RuleEntry::new("instance_of", K::InstanceOf, Kind, 0, always, expressions::lower_instance_of),
    RuleEntry::new("parenthesized", K::Parenthesized, Kind, 0, always, expressions::lower_parenthesized),
    // Calls
    RuleEntry::new("library_call", K::MethodCall, Type, 20, calls::is_library_call, library::lower_library_call),
    RuleEntry::new("inline_private_call", K::MethodCall, Type, 10, calls::is_inlined_call, calls::lower_inlined_call),
    RuleEntry::new("companion_call", K::MethodCall, Type, 5, calls::is_companion_call, calls::lower_companion_call),
    RuleEntry::new("method_call", K::MethodCall, Kind, 0, always, calls::lower_method_call),
];

pub(crate) fn always(_cx: &LowerCx<'_>, _idx: NodeIndex) -> bool {
    true
}

/// The node is a member of an interface.
pub(crate) fn in_interface(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    cx.resolver()
        .enclosing_type(idx)
        .is_some_and(|decl| cx.resolver().is_interface_decl(decl))
}

/// Whether a replacement for `idx` with lower precedence than a call or
/// member access has to be parenthesized where `idx` sits.
pub(crate) fn needs_parens(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    let unit = cx.unit();
    let Some(parent) = unit.parent(idx) else {
        return false;
    };
    match unit.data(parent) {
        NodeData::Binary { .. }
        | NodeData::Unary { .. }
        | NodeData::Cast { .. }
        | NodeData::InstanceOf { .. }
        | NodeData::FieldAccess { .. }
        | NodeData::ArrayAccess { .. }
        | NodeData::Conditional { .. } => true,
        NodeData::MethodCall { target, .. } => *target == Some(idx),
        _ => false,
    }
}
