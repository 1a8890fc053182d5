use super::*;
use crate::test_support::{Evaluator, Value, codes, decl, member, method_body, run};
use arkmig_arkts::{ArkTsPrinter, TargetNode, VarKind};
use arkmig_java::builder::TreeBuilder;
use arkmig_java::{AssignOp, BinaryOp, Modifiers, PrimitiveType, SourceUnit, UnaryOp, fixtures};

fn test_body(result: &MigrationResult) -> &[TargetNode] {
    method_body(member(decl(result, "IfTest"), "Test"))
}

fn assign(name: &str, value: &str) -> TargetNode {
    TargetNode::expr_stmt(TargetNode::assign(TargetNode::id(name), TargetNode::number(value)))
}

#[test]
fn test_if_statements_migrate_without_diagnostics() {
    let result = run(&fixtures::if_statements());
    assert!(codes(&result).is_empty(), "{}", result.render());
    assert!(result.stats.is_complete());
    assert_eq!(result.stats.placeholders, 0);
    assert_eq!(result.stats.rule_applications.get("if_statement"), Some(&15));
}

#[test]
fn test_boolean_local_keeps_initializer() {
    let result = run(&fixtures::if_statements());
    let TargetNode::VarDecl {
        kind,
        name,
        initializer,
        ..
    } = &test_body(&result)[0]
    else {
        panic!("expected a declaration");
    };
    assert_eq!(*kind, VarKind::Let);
    assert_eq!(name, "t");
    assert_eq!(initializer.as_deref(), Some(&TargetNode::BooleanLiteral(true)));
}

#[test]
fn test_multi_declarator_local_splits() {
    let result = run(&fixtures::if_statements());
    let names: Vec<&str> = test_body(&result)
        .iter()
        .filter_map(|s| match s {
            TargetNode::VarDecl { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, ["t", "a", "b", "p"]);
}

#[test]
fn test_branches_become_blocks() {
    let result = run(&fixtures::if_statements());
    // if( t ) a = 2; else a = 3;
    let expected = TargetNode::If {
        condition: Box::new(TargetNode::id("t")),
        then_branch: Box::new(TargetNode::block(vec![assign("a", "2")])),
        else_branch: Some(Box::new(TargetNode::block(vec![assign("a", "3")]))),
    };
    assert!(test_body(&result).contains(&expected));
}

#[test]
fn test_dangling_else_binds_to_inner_if() {
    let result = run(&fixtures::if_statements());
    let inner = TargetNode::If {
        condition: Box::new(TargetNode::id("p")),
        then_branch: Box::new(TargetNode::block(vec![assign("a", "11")])),
        else_branch: Some(Box::new(TargetNode::block(vec![assign("a", "12")]))),
    };
    let expected = TargetNode::If {
        condition: Box::new(TargetNode::id("t")),
        then_branch: Box::new(TargetNode::block(vec![inner])),
        else_branch: None,
    };
    assert!(test_body(&result).contains(&expected));
}

#[test]
fn test_else_if_chain_stays_a_chain() {
    let result = run(&fixtures::if_statements());
    // if( t ) a = 13; else if ( p ) { a = 14; }
    let expected = TargetNode::If {
        condition: Box::new(TargetNode::id("t")),
        then_branch: Box::new(TargetNode::block(vec![assign("a", "13")])),
        else_branch: Some(Box::new(TargetNode::If {
            condition: Box::new(TargetNode::id("p")),
            then_branch: Box::new(TargetNode::block(vec![assign("a", "14")])),
            else_branch: None,
        })),
    };
    assert!(test_body(&result).contains(&expected));
}

#[test]
fn test_lowered_body_preserves_branch_semantics() {
    let result = run(&fixtures::if_statements());
    let mut eval = Evaluator::default();
    eval.run(test_body(&result));
    // The last statement decides: t holds and p does not
    assert_eq!(eval.get("a"), Value::Int(19));
    assert_eq!(eval.get("b"), Value::Int(106));
    assert_eq!(eval.get("p"), Value::Bool(false));
}

#[test]
fn test_printed_chain_has_no_bare_else_statement() {
    let result = run(&fixtures::if_statements());
    let text = ArkTsPrinter::emit_to_string(&result.module);
    assert!(text.contains("} else if (p) {"), "{text}");
    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("} else ") {
            assert!(rest.starts_with('{') || rest.starts_with("if ("), "{line}");
        }
    }
}

// =============================================================================
// Loops, switch and labels
// =============================================================================

const LOOPS_JAVA: &str = r#"class Loops {
    static int sum(int[] xs) {
        int total = 0;
        for (int i = 0; i < 3; i++) total += i;
        for (int x : xs) { total += x; }
        while (total > 100) total -= 10;
        do total++; while (total < 5);
        switch (total) {
            case 1: case 2: total = 0; break;
            default: total = 1;
        }
        outer: for (;;) break outer;
        return total;
    }
}
"#;

fn loops() -> SourceUnit {
    let mut b = TreeBuilder::new("Loops.java", LOOPS_JAVA);
    let mut stmts = Vec::new();

    let int = b.primitive(PrimitiveType::Int);
    let zero = b.int(0);
    stmts.push(b.local_var(int, "total", Some(zero)));

    // for (int i = 0; i < 3; i++) total += i;
    let int = b.primitive(PrimitiveType::Int);
    let zero = b.int(0);
    let init = b.local_var(int, "i", Some(zero));
    let i = b.name("i");
    let three = b.int(3);
    let cond = b.binary(BinaryOp::Lt, i, three);
    let i = b.name("i");
    let update = b.unary(UnaryOp::PostIncrement, i);
    let total = b.name("total");
    let i = b.name("i");
    let add = b.assign_op(AssignOp::Add, total, i);
    let body = b.expr_stmt(add);
    stmts.push(b.for_stmt(vec![init], Some(cond), vec![update], body));

    // for (int x : xs) { total += x; }
    let int = b.primitive(PrimitiveType::Int);
    let x = b.param(int, "x");
    let xs = b.name("xs");
    let total = b.name("total");
    let x_ref = b.name("x");
    let add = b.assign_op(AssignOp::Add, total, x_ref);
    let add = b.expr_stmt(add);
    let body = b.block(vec![add]);
    stmts.push(b.for_each(x, xs, body));

    // while (total > 100) total -= 10;
    let total = b.name("total");
    let hundred = b.int(100);
    let cond = b.binary(BinaryOp::Gt, total, hundred);
    let total = b.name("total");
    let ten = b.int(10);
    let sub = b.assign_op(AssignOp::Sub, total, ten);
    let body = b.expr_stmt(sub);
    stmts.push(b.while_stmt(cond, body));

    // do total++; while (total < 5);
    let total = b.name("total");
    let inc = b.unary(UnaryOp::PostIncrement, total);
    let body = b.expr_stmt(inc);
    let total = b.name("total");
    let five = b.int(5);
    let cond = b.binary(BinaryOp::Lt, total, five);
    stmts.push(b.do_stmt(body, cond));

    // switch (total) { case 1: case 2: total = 0; break; default: total = 1; }
    let selector = b.name("total");
    let one = b.int(1);
    let two = b.int(2);
    let zero = b.int(0);
    let reset = b.assign_stmt("total", zero);
    let brk = b.brk(None);
    let first = b.case(vec![one, two], vec![reset, brk]);
    let one = b.int(1);
    let set = b.assign_stmt("total", one);
    let fallback = b.case(vec![], vec![set]);
    stmts.push(b.switch_stmt(selector, vec![first, fallback]));

    // outer: for (;;) break outer;
    let brk = b.brk(Some("outer"));
    let forever = b.for_stmt(vec![], None, vec![], brk);
    stmts.push(b.labeled("outer", forever));

    let total = b.name("total");
    stmts.push(b.ret(Some(total)));

    let int = b.primitive(PrimitiveType::Int);
    let array = b.array_type(int);
    let xs = b.param(array, "xs");
    let body = b.block(stmts);
    let int = b.primitive(PrimitiveType::Int);
    let method = b.method(Modifiers::STATIC, "sum", vec![xs], int, Some(body));
    let class = b.class_decl(Modifiers::empty(), "Loops", None, vec![], vec![method]);
    let root = b.compilation_unit(None, &[], vec![class]);
    b.finish(root).expect("valid tree")
}

fn loops_body(result: &MigrationResult) -> &[TargetNode] {
    method_body(member(decl(result, "Loops"), "sum"))
}

#[test]
fn test_loops_migrate_without_diagnostics() {
    let result = run(&loops());
    assert!(result.diagnostics.is_empty(), "{}", result.render());
    assert!(result.stats.is_complete());
    assert_eq!(result.stats.placeholders, 0);
    assert_eq!(loops_body(&result).len(), 8);
}

#[test]
fn test_loop_bodies_become_blocks() {
    let result = run(&loops());
    let body = loops_body(&result);

    let TargetNode::For {
        init,
        condition,
        update,
        body: for_body,
    } = &body[1]
    else {
        panic!("expected a for loop, got {:?}", body[1]);
    };
    assert!(matches!(init.as_slice(), [TargetNode::VarDecl { name, .. }] if name == "i"));
    assert!(condition.is_some());
    assert_eq!(update.len(), 1);
    assert!(matches!(for_body.as_ref(), TargetNode::Block(stmts) if stmts.len() == 1));

    for stmt in &body[3..5] {
        let loop_body = match stmt {
            TargetNode::While { body, .. } | TargetNode::DoWhile { body, .. } => body,
            other => panic!("expected a loop, got {other:?}"),
        };
        assert!(matches!(loop_body.as_ref(), TargetNode::Block(stmts) if stmts.len() == 1));
    }
}

#[test]
fn test_enhanced_for_becomes_for_of() {
    let result = run(&loops());
    let TargetNode::ForOf {
        kind,
        name,
        iterable,
        body,
    } = &loops_body(&result)[2]
    else {
        panic!("expected a for-of loop");
    };
    assert_eq!(*kind, VarKind::Let);
    assert_eq!(name, "x");
    assert_eq!(iterable.as_ref(), &TargetNode::id("xs"));
    assert!(matches!(body.as_ref(), TargetNode::Block(stmts) if stmts.len() == 1));
}

#[test]
fn test_switch_keeps_grouped_labels_and_default() {
    let result = run(&loops());
    let TargetNode::Switch {
        discriminant,
        cases,
    } = &loops_body(&result)[5]
    else {
        panic!("expected a switch");
    };
    assert_eq!(discriminant.as_ref(), &TargetNode::id("total"));
    assert_eq!(cases.len(), 2);
    let TargetNode::Case { tests, statements } = &cases[0] else {
        panic!("expected a case");
    };
    assert_eq!(tests, &[TargetNode::number("1"), TargetNode::number("2")]);
    assert_eq!(statements, &[assign("total", "0"), TargetNode::Break(None)]);
    let TargetNode::Case { tests, statements } = &cases[1] else {
        panic!("expected a default case");
    };
    assert!(tests.is_empty());
    assert_eq!(statements, &[assign("total", "1")]);

    let text = ArkTsPrinter::emit_to_string(&result.module);
    assert!(text.contains("default:"), "{text}");
}

#[test]
fn test_labeled_break_keeps_its_label() {
    let result = run(&loops());
    let TargetNode::Labeled { label, body } = &loops_body(&result)[6] else {
        panic!("expected a labeled statement");
    };
    assert_eq!(label, "outer");
    let TargetNode::For {
        init,
        condition: None,
        update,
        body,
    } = body.as_ref()
    else {
        panic!("expected an endless for loop, got {body:?}");
    };
    assert!(init.is_empty() && update.is_empty());
    assert_eq!(
        body.as_ref(),
        &TargetNode::Block(vec![TargetNode::Break(Some("outer".to_string()))])
    );
}
