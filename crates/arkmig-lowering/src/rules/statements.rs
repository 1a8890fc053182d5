//! Control-flow lowering.
//!
//! Every branch and loop body comes out as an explicit block, so the
//! binding of a dangling `else` is fixed by structure rather than by the
//! printer. `else if` chains stay chains: the else branch holds the nested
//! `If` node itself.

use super::types::{coerce_array, map_type};
use crate::context::LowerCx;
use arkmig_arkts::{TargetNode, VarKind};
use arkmig_java::{JavaType, Modifiers, NodeData, NodeIndex, SyntaxKind};

pub(crate) fn lower_block(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::Block { statements } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let stmts = cx.with_scope(|cx| cx.lower_stmts(statements));
    vec![TargetNode::Block(stmts)]
}

pub(crate) fn lower_local_variable(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::LocalVariableDeclaration {
        modifiers,
        ty,
        declarators,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    // Claims the type subtree and reports raw collections once
    cx.lower_type(*ty);
    let is_final = modifiers.contains(Modifiers::FINAL);

    let mut out = Vec::with_capacity(declarators.len());
    for &declarator in declarators {
        cx.claim(declarator);
        let NodeData::VariableDeclarator { name, init, .. } = cx.unit().data(declarator) else {
            continue;
        };
        let declared = cx.resolver().declarator_type(declarator);
        let initializer = init.map(|init| lower_initializer(cx, init, &declared));
        let kind = if is_final && initializer.is_some() {
            VarKind::Const
        } else {
            VarKind::Let
        };
        cx.declare(name, declared.clone());
        out.push(TargetNode::VarDecl {
            kind,
            name: name.clone(),
            ty: Some(map_type(cx, &declared)),
            initializer: initializer.map(Box::new),
        });
    }
    out
}

/// Lower the initializer of a declarator of type `declared`.
pub(crate) fn lower_initializer(
    cx: &mut LowerCx<'_>,
    init: NodeIndex,
    declared: &JavaType,
) -> TargetNode {
    let value = cx.lower_expr(init);
    let value_type = cx.resolver().type_of(init, cx.scopes());
    coerce_array(cx, init, value, &value_type, declared)
}

pub(crate) fn lower_expression_statement(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ExpressionStatement { expression } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let expr = cx.lower_discarded(*expression);
    vec![TargetNode::expr_stmt(expr)]
}

pub(crate) fn lower_if(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::IfStatement {
        condition,
        then_branch,
        else_branch,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let condition = cx.lower_expr(*condition);
    let then_branch = cx.lower_embedded(*then_branch);
    let else_branch = else_branch.map(|els| {
        if cx.unit().kind(els) == SyntaxKind::IfStatement {
            // Preludes of the nested condition need a block around the chain
            let mut lowered = cx.with_scope(|cx| cx.lower_stmts(&[els]));
            match lowered.as_slice() {
                [TargetNode::If { .. }] => lowered.pop().unwrap_or(TargetNode::Empty),
                _ => TargetNode::Block(lowered),
            }
        } else {
            cx.lower_embedded(els)
        }
    });
    vec![TargetNode::If {
        condition: Box::new(condition),
        then_branch: Box::new(then_branch),
        else_branch: else_branch.map(Box::new),
    }]
}

pub(crate) fn lower_while(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::WhileStatement { condition, body } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let condition = cx.no_prelude(|cx| cx.lower_expr(*condition));
    let body = cx.lower_embedded(*body);
    vec![TargetNode::While {
        condition: Box::new(condition),
        body: Box::new(body),
    }]
}

pub(crate) fn lower_do(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::DoStatement { body, condition } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let body = cx.lower_embedded(*body);
    let condition = cx.no_prelude(|cx| cx.lower_expr(*condition));
    vec![TargetNode::DoWhile {
        body: Box::new(body),
        condition: Box::new(condition),
    }]
}

pub(crate) fn lower_for(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ForStatement {
        init,
        condition,
        update,
        body,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    cx.with_scope(|cx| {
        let init: Vec<TargetNode> = cx.no_prelude(|cx| {
            init.iter()
                .flat_map(|&node| for_clause(cx, node))
                .collect()
        });
        let condition = condition.map(|c| cx.no_prelude(|cx| cx.lower_expr(c)));
        let update: Vec<TargetNode> = cx.no_prelude(|cx| {
            update
                .iter()
                .flat_map(|&node| for_clause(cx, node))
                .collect()
        });
        let body = cx.lower_embedded(*body);
        vec![TargetNode::For {
            init,
            condition: condition.map(Box::new),
            update,
            body: Box::new(body),
        }]
    })
}

/// An init or update entry: a declaration, a statement or a bare expression.
fn for_clause(cx: &mut LowerCx<'_>, node: NodeIndex) -> Vec<TargetNode> {
    if cx.unit().kind(node).is_expression() {
        vec![TargetNode::expr_stmt(cx.lower_discarded(node))]
    } else {
        cx.lower(node)
    }
}

pub(crate) fn lower_for_each(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ForEachStatement {
        variable,
        iterable,
        body,
    } = cx.unit().data(idx)
    else {
        return Vec::new();
    };
    let (name, modifiers) = match cx.unit().data(*variable) {
        NodeData::Parameter {
            name, modifiers, ..
        } => (name.clone(), *modifiers),
        _ => return vec![cx.placeholder(idx)],
    };
    let element = cx.resolver().param_type(*variable);
    cx.claim_subtree(*variable);
    let iterable = cx.lower_expr(*iterable);
    let kind = if modifiers.is_final() {
        VarKind::Const
    } else {
        VarKind::Let
    };
    let body = cx.with_scope(|cx| {
        cx.declare(&name, element);
        cx.lower_embedded(*body)
    });
    vec![TargetNode::ForOf {
        kind,
        name,
        iterable: Box::new(iterable),
        body: Box::new(body),
    }]
}

pub(crate) fn lower_switch(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::SwitchStatement { selector, cases } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let discriminant = cx.lower_expr(*selector);
    // One scope for the whole switch body, as in Java
    let cases = cx.with_scope(|cx| cases.iter().flat_map(|&c| cx.lower(c)).collect());
    vec![TargetNode::Switch {
        discriminant: Box::new(discriminant),
        cases,
    }]
}

pub(crate) fn lower_switch_case(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::SwitchCase { labels, statements } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let tests = labels.iter().map(|&l| cx.lower_expr(l)).collect();
    let statements = cx.lower_stmts(statements);
    vec![TargetNode::Case { tests, statements }]
}

pub(crate) fn lower_return(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ReturnStatement { value } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let value = value.map(|v| {
        let lowered = cx.lower_expr(v);
        match declared_return_type(cx, idx) {
            Some(declared) => {
                let actual = cx.resolver().type_of(v, cx.scopes());
                coerce_array(cx, v, lowered, &actual, &declared)
            }
            None => lowered,
        }
    });
    vec![TargetNode::ret(value)]
}

fn declared_return_type(cx: &LowerCx<'_>, at: NodeIndex) -> Option<JavaType> {
    let method = cx.resolver().enclosing_method(at)?;
    match cx.unit().data(method) {
        NodeData::MethodDeclaration { return_type, .. } => {
            Some(cx.resolver().type_from_node(*return_type))
        }
        _ => None,
    }
}

pub(crate) fn lower_break(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    match cx.unit().data(idx) {
        NodeData::BreakStatement { label } => vec![TargetNode::Break(label.clone())],
        _ => Vec::new(),
    }
}

pub(crate) fn lower_continue(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    match cx.unit().data(idx) {
        NodeData::ContinueStatement { label } => vec![TargetNode::Continue(label.clone())],
        _ => Vec::new(),
    }
}

pub(crate) fn lower_throw(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::ThrowStatement { value } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let value = cx.lower_expr(*value);
    vec![TargetNode::Throw(Box::new(value))]
}

pub(crate) fn lower_empty(_cx: &mut LowerCx<'_>, _idx: NodeIndex) -> Vec<TargetNode> {
    vec![TargetNode::Empty]
}

pub(crate) fn lower_labeled(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::LabeledStatement { label, body } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let mut lowered = cx.lower(*body);
    let body = match lowered.len() {
        1 => lowered.pop().unwrap_or(TargetNode::Empty),
        _ => TargetNode::Block(lowered),
    };
    vec![TargetNode::Labeled {
        label: label.clone(),
        body: Box::new(body),
    }]
}
