use super::*;
use crate::rules::STANDARD_RULES;
use crate::test_support::find_node;
use arkmig_arkts::TargetNode;
use arkmig_common::diagnostic_codes;
use arkmig_java::{NodeData, NodeIndex, SymbolTable, SyntaxKind, fixtures};
use arkmig_resolver::TypeResolver;

fn lower_root(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let NodeData::CompilationUnit { types, .. } = cx.unit().data(idx) else {
        return Vec::new();
    };
    let items = types.iter().flat_map(|&t| cx.lower(t)).collect();
    vec![TargetNode::Module(items)]
}

fn any_node(_cx: &LowerCx<'_>, _idx: NodeIndex) -> bool {
    true
}

fn is_root(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    cx.unit().parent(idx).is_none()
}

fn is_unit_kind(cx: &LowerCx<'_>, idx: NodeIndex) -> bool {
    cx.unit().kind(idx) == SyntaxKind::CompilationUnit
}

fn root_entry(name: &'static str, predicate: fn(&LowerCx<'_>, NodeIndex) -> bool) -> RuleEntry {
    RuleEntry::new(name, SyntaxKind::CompilationUnit, Specificity::Kind, 0, predicate, lower_root)
}

#[test]
fn test_standard_registry_builds() {
    let registry = RuleRegistry::standard().expect("standard rules are consistent");
    assert_eq!(registry.len(), STANDARD_RULES.len());
    assert!(!registry.is_empty());
    assert!(!registry.is_poisoned());
}

#[test]
fn test_candidates_ranked_by_specificity_then_priority() {
    let registry = RuleRegistry::standard().expect("standard registry");
    let names: Vec<&str> = registry
        .rules_for(SyntaxKind::MethodDeclaration)
        .iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(
        names,
        [
            "native_method",
            "interface_static_method",
            "interface_private_method",
            "interface_default_method",
            "interface_abstract_method",
            "method_declaration",
        ]
    );
    let calls: Vec<&str> = registry
        .rules_for(SyntaxKind::MethodCall)
        .iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(
        calls,
        ["library_call", "inline_private_call", "companion_call", "method_call"]
    );
}

#[test]
fn test_resolve_picks_interface_member_rules() {
    let unit = fixtures::test_interface();
    let symbols = SymbolTable::jdk();
    let options = MigrationOptions::default();
    let resolver = TypeResolver::new(&unit, &symbols);
    let plan = MigrationPlan::build(&resolver, &options);
    let registry = RuleRegistry::standard().expect("standard registry");
    let cx = LowerCx::new(&unit, &resolver, &plan, &options, registry);

    let method = |name: &str, pred: fn(&arkmig_java::Modifiers) -> bool| {
        find_node(&unit, |d| {
            matches!(d, NodeData::MethodDeclaration { name: n, modifiers, .. } if n == name && pred(modifiers))
        })
    };
    let cases = [
        (method("foo", |m| m.is_static()), "interface_static_method"),
        (method("foo", |m| m.is_private()), "interface_private_method"),
        (method("foo", |m| m.is_empty()), "interface_abstract_method"),
        (
            find_node(&unit, |d| matches!(d, NodeData::FieldDeclaration { .. })),
            "interface_constant",
        ),
        (
            find_node(&unit, |d| matches!(d, NodeData::InitializerBlock { .. })),
            "interface_initializer",
        ),
    ];
    for (node, expected) in cases {
        let entry = registry.resolve(&cx, node).expect("a rule applies");
        assert_eq!(entry.name, expected);
    }
}

#[test]
fn test_duplicate_name_rejected() {
    let mut builder = RuleRegistry::builder();
    builder
        .register(root_entry("root", any_node))
        .register(root_entry("root", is_root));
    assert!(matches!(
        builder.build(),
        Err(RegistryError::DuplicateName { name: "root" })
    ));
}

#[test]
fn test_duplicate_candidate_rejected() {
    let mut builder = RuleRegistry::builder();
    builder
        .register(root_entry("first", any_node))
        .register(root_entry("second", any_node));
    assert_eq!(
        builder.build().err(),
        Some(RegistryError::DuplicateCandidate {
            first: "first",
            second: "second",
        })
    );
}

#[test]
fn test_missing_rule_yields_placeholder_and_error() {
    let mut builder = RuleRegistry::builder();
    builder.register(root_entry("root", any_node));
    let registry = builder.build().expect("one rule");

    let unit = fixtures::if_statements();
    let result = migrate_with(&registry, &unit, &SymbolTable::jdk(), &MigrationOptions::default())
        .expect("a missing rule is not fatal");
    let TargetNode::Module(items) = &result.module else {
        panic!("expected a module");
    };
    assert_eq!(items.len(), 1);
    assert!(items[0].is_placeholder());
    let errors: Vec<_> = result.with_code(diagnostic_codes::NO_APPLICABLE_RULE).collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_error());
    // The placeholder accounts for the whole class
    assert!(result.stats.is_complete());
    assert_eq!(result.stats.placeholders, 1);
}

/// Lowers only the first literal of the file, as an expression.
fn lower_first_literal(cx: &mut LowerCx<'_>, idx: NodeIndex) -> Vec<TargetNode> {
    let unit = cx.unit();
    let literal = unit
        .subtree(idx)
        .into_iter()
        .find(|&n| unit.kind(n) == SyntaxKind::Literal);
    let items = literal.map(|l| cx.lower_expr(l)).into_iter().collect();
    cx.claim_subtree(idx);
    vec![TargetNode::Module(items)]
}

fn lower_to_nothing(_cx: &mut LowerCx<'_>, _idx: NodeIndex) -> Vec<TargetNode> {
    Vec::new()
}

#[test]
fn test_expression_rule_without_result_is_reported() {
    let mut builder = RuleRegistry::builder();
    builder
        .register(RuleEntry::new(
            "first_literal",
            SyntaxKind::CompilationUnit,
            Specificity::Kind,
            0,
            any_node,
            lower_first_literal,
        ))
        .register(RuleEntry::new(
            "empty_literal",
            SyntaxKind::Literal,
            Specificity::Kind,
            0,
            any_node,
            lower_to_nothing,
        ));
    let registry = builder.build().expect("two kinds");

    let unit = fixtures::if_statements();
    let result = migrate_with(&registry, &unit, &SymbolTable::jdk(), &MigrationOptions::default())
        .expect("an empty expression is not fatal");
    let TargetNode::Module(items) = &result.module else {
        panic!("expected a module");
    };
    assert_eq!(items.len(), 1);
    assert!(items[0].is_placeholder());
    let errors: Vec<_> = result.with_code(diagnostic_codes::NO_APPLICABLE_RULE).collect();
    assert_eq!(errors.len(), 1, "{}", result.render());
    assert!(errors[0].message.contains("literal"), "{}", errors[0].message);
    assert_eq!(result.stats.rule_applications.get("empty_literal"), Some(&1));
}

#[test]
fn test_ambiguity_aborts_and_poisons() {
    let mut builder = RuleRegistry::builder();
    builder
        .register(root_entry("by_parent", is_root))
        .register(root_entry("by_kind", is_unit_kind));
    let registry = builder.build().expect("distinct predicates build");

    let unit = fixtures::if_statements();
    let symbols = SymbolTable::jdk();
    let options = MigrationOptions::default();
    let err = migrate_with(&registry, &unit, &symbols, &options).expect_err("ambiguous");
    assert!(matches!(
        err,
        MigrationError::Registry(RegistryError::Ambiguous {
            kind: SyntaxKind::CompilationUnit,
            first: "by_parent",
            second: "by_kind",
            ..
        })
    ));
    assert!(registry.is_poisoned());

    let err = migrate_with(&registry, &unit, &symbols, &options).expect_err("poisoned");
    assert!(matches!(err, MigrationError::Registry(RegistryError::Poisoned)));
}

#[test]
fn test_higher_priority_wins_without_ambiguity() {
    let mut builder = RuleRegistry::builder();
    builder
        .register(root_entry("plain", any_node))
        .register(RuleEntry::new(
            "preferred",
            SyntaxKind::CompilationUnit,
            Specificity::Kind,
            5,
            is_root,
            lower_root,
        ));
    let registry = builder.build().expect("different ranks");
    let names: Vec<&str> = registry
        .rules_for(SyntaxKind::CompilationUnit)
        .iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["preferred", "plain"]);

    let unit = fixtures::if_statements();
    let result = migrate_with(&registry, &unit, &SymbolTable::jdk(), &MigrationOptions::default())
        .expect("no ambiguity");
    assert_eq!(result.stats.rule_applications.get("preferred"), Some(&1));
    assert!(!registry.is_poisoned());
}
