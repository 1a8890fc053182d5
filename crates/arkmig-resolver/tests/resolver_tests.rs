use super::*;
use crate::resolver::ResolvedMethod;
use arkmig_java::fixtures;
use arkmig_java::{
    JavaType, MethodSymbol, Modifiers, NodeData, NodeIndex, PrimitiveType, SourceUnit, SymbolTable,
};

fn find(unit: &SourceUnit, pred: impl Fn(&NodeData) -> bool) -> NodeIndex {
    unit.iter()
        .find(|(_, node)| pred(&node.data))
        .map(|(idx, _)| idx)
        .expect("fixture contains the node")
}

fn call_named(unit: &SourceUnit, name: &str) -> NodeIndex {
    find(unit, |d| matches!(d, NodeData::MethodCall { name: n, .. } if n == name))
}

fn type_decl(unit: &SourceUnit, name: &str) -> NodeIndex {
    find(unit, |d| d.kind().is_type_declaration() && d.name() == Some(name))
}

fn int() -> JavaType {
    JavaType::primitive(PrimitiveType::Int)
}

const TESTS_PKG: &str = "com.ohos.migrator.tests.java";
const TEST_PKG: &str = "com.ohos.migrator.test.java";

#[test]
fn test_declared_types_are_qualified() {
    let unit = fixtures::interface_nested();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let names: Vec<&str> = resolver.declared_types().map(|(n, _)| n).collect();
    assert_eq!(
        names,
        vec![
            format!("{TESTS_PKG}.Test"),
            format!("{TESTS_PKG}.Test.A"),
            format!("{TESTS_PKG}.Test.dummy"),
            format!("{TESTS_PKG}.Test.innerInterface"),
            format!("{TESTS_PKG}.Test.inner_A"),
            format!("{TESTS_PKG}.TestClass"),
            format!("{TESTS_PKG}.TestClass.constants"),
        ]
    );
}

#[test]
fn test_dotted_member_type_resolves_through_outer() {
    let unit = fixtures::interface_nested();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let test_class = resolver
        .symbol(&format!("{TESTS_PKG}.TestClass"))
        .expect("TestClass symbol");
    let interfaces: Vec<&str> = test_class
        .interfaces
        .iter()
        .filter_map(JavaType::class_name)
        .collect();
    assert_eq!(
        interfaces,
        vec![
            format!("{TESTS_PKG}.Test.innerInterface"),
            format!("{TESTS_PKG}.Test.inner_A"),
        ]
    );
    assert_eq!(test_class.superclass, Some(JavaType::object()));
}

#[test]
fn test_simple_names_follow_lookup_order() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let method = find(&unit, |d| d.kind() == arkmig_java::SyntaxKind::MethodDeclaration);

    // single-type import
    assert_eq!(
        resolver.canonical_type_name("List", method).as_deref(),
        Ok("java.util.List")
    );
    // java.lang
    assert_eq!(
        resolver.canonical_type_name("Number", method).as_deref(),
        Ok("java.lang.Number")
    );
    // top-level type of the file
    assert_eq!(
        resolver.canonical_type_name("CallExpressiontRules1", method),
        Ok(format!("{TEST_PKG}.CallExpressiontRules1"))
    );
    // not imported
    assert_eq!(
        resolver.canonical_type_name("HashMap", method),
        Err(ResolveError::UnknownType {
            name: "HashMap".to_string()
        })
    );
}

#[test]
fn test_unresolved_type_keeps_written_name() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::new());
    let number = find(&unit, |d| matches!(d, NodeData::ClassType { name, .. } if name == "Number"));
    assert_eq!(resolver.type_from_node(number), JavaType::class("Number"));
}

#[test]
fn test_interface_members_get_implicit_modifiers() {
    let unit = fixtures::test_interface();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let symbol = resolver
        .symbol(&format!("{TESTS_PKG}.test_interface"))
        .expect("test_interface symbol");
    assert!(symbol.is_interface());
    assert_eq!(symbol.superclass, None);

    let field = symbol.field("i").expect("field i");
    assert!(field.modifiers.contains(Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL));
    assert_eq!(field.ty, int());

    let foos: Vec<&MethodSymbol> = symbol.methods_named("foo").collect();
    assert_eq!(foos.len(), 4);
    assert!(foos[0].modifiers.contains(Modifiers::PUBLIC | Modifiers::ABSTRACT));
    assert!(!foos[0].has_body);
    assert!(foos[1].modifiers.contains(Modifiers::PUBLIC | Modifiers::STATIC));
    assert!(!foos[1].modifiers.contains(Modifiers::DEFAULT));
    assert_eq!(foos[2].modifiers, Modifiers::PRIVATE);
    assert_eq!(foos[3].params, vec![JavaType::string()]);
}

#[test]
fn test_type_of_raw_list_calls() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let mut scopes = Scopes::new();
    scopes.declare("lst", JavaType::class("java.util.List"));

    let to_array = call_named(&unit, "toArray");
    let resolution = resolver.resolve_call(to_array, &scopes).expect("call resolves");
    assert!(!resolution.static_receiver);
    assert!(matches!(resolution.choice, OverloadChoice::Exact(_)));
    let selected = resolution.selected().expect("selected overload");
    assert_eq!(selected.owner, "java.util.List");
    assert_eq!(selected.declared.type_params, vec!["T".to_string()]);
    // The array argument fixes T
    assert_eq!(
        resolver.type_of(to_array, &scopes),
        JavaType::array(JavaType::class("java.lang.Number"))
    );

    // Raw receiver: E is Object
    let set = call_named(&unit, "set");
    let resolution = resolver.resolve_call(set, &scopes).expect("call resolves");
    let selected = resolution.selected().expect("selected overload");
    assert_eq!(selected.params, vec![int(), JavaType::object()]);
}

#[test]
fn test_field_receiver_and_overload_of_println() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let mut scopes = Scopes::new();
    scopes.declare("d", JavaType::array(JavaType::class("java.lang.Number")));

    let println = call_named(&unit, "println");
    let resolution = resolver.resolve_call(println, &scopes).expect("call resolves");
    assert_eq!(resolution.receiver, JavaType::class("java.io.PrintStream"));
    assert!(!resolution.static_receiver);
    assert!(matches!(resolution.choice, OverloadChoice::Exact(_)));
    let selected = resolution.selected().expect("selected overload");
    assert_eq!(selected.params, vec![JavaType::object()]);
}

#[test]
fn test_resolve_name_kinds() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let mut scopes = Scopes::new();
    scopes.declare("lst", JavaType::class("java.util.List"));
    let at = call_named(&unit, "println");

    assert_eq!(
        resolver.resolve_name("lst", at, &scopes),
        NameBinding::Local(JavaType::class("java.util.List"))
    );
    assert_eq!(
        resolver.resolve_name("System", at, &scopes),
        NameBinding::Type("java.lang.System".to_string())
    );
    assert_eq!(resolver.resolve_name("nothing", at, &scopes), NameBinding::Unknown);
}

#[test]
fn test_interface_constant_is_a_static_field() {
    let unit = fixtures::test_interface();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let call = call_named(&unit, "foo");
    match resolver.resolve_name("pi", call, &Scopes::new()) {
        NameBinding::Field { owner, ty, is_static } => {
            assert_eq!(owner, format!("{TESTS_PKG}.test_interface"));
            assert_eq!(ty, JavaType::primitive(PrimitiveType::Double));
            assert!(is_static);
        }
        other => panic!("expected a field, got {other:?}"),
    }
}

#[test]
fn test_unqualified_call_selects_by_argument_type() {
    let unit = fixtures::test_interface();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let call = call_named(&unit, "foo");
    let resolution = resolver.resolve_call(call, &Scopes::new()).expect("call resolves");
    assert_eq!(
        resolution.receiver,
        JavaType::class(format!("{TESTS_PKG}.iface_C"))
    );
    // foo(double) from iface_C plus four from test_interface and one from iface_FP
    assert_eq!(resolution.candidates.len(), 6);
    let selected = resolution.selected().expect("selected overload");
    assert_eq!(selected.owner, format!("{TESTS_PKG}.iface_C"));
    assert_eq!(selected.params, vec![JavaType::primitive(PrimitiveType::Double)]);
}

#[test]
fn test_intersection_cast_and_bounds() {
    let unit = fixtures::intersection_type();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let something = JavaType::class(format!("{TEST_PKG}.Something"));
    let runnable = JavaType::class("java.lang.Runnable");

    let cast = find(&unit, |d| matches!(d, NodeData::Cast { .. }));
    let cast_type = resolver.type_of(cast, &Scopes::new());
    assert_eq!(
        cast_type,
        JavaType::Intersection {
            bounds: vec![runnable.clone(), something.clone()]
        }
    );
    assert_eq!(resolver.category(&cast_type), TypeCategory::Intersection);

    let type_param = find(&unit, |d| matches!(d, NodeData::TypeParameter { .. }));
    assert_eq!(
        resolver.type_param_bounds(type_param),
        vec![JavaType::string(), runnable.clone(), something.clone()]
    );
    let class = type_decl(&unit, "intersection_type");
    assert!(resolver.is_type_variable("T", class));
    assert!(!resolver.is_type_variable("U", class));
    assert_eq!(
        resolver.type_of_decl(class),
        JavaType::generic(
            format!("{TEST_PKG}.intersection_type"),
            vec![JavaType::type_variable("T")]
        )
    );

    let aux = JavaType::class(format!("{TEST_PKG}.auxilliary"));
    assert!(resolver.is_subtype(&aux, &runnable));
    assert!(resolver.is_subtype(&aux, &cast_type));
    assert!(!resolver.is_subtype(&runnable, &aux));
    assert_eq!(resolver.category(&something), TypeCategory::Interface);
    assert_eq!(resolver.category(&aux), TypeCategory::Class);
    assert!(resolver.is_library_type(&runnable));
    assert!(!resolver.is_library_type(&aux));
}

#[test]
fn test_assignability_with_boxing() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let integer = JavaType::class("java.lang.Integer");
    let number = JavaType::class("java.lang.Number");
    let long = JavaType::primitive(PrimitiveType::Long);

    assert!(resolver.is_assignable(&int(), &long));
    assert!(!resolver.is_assignable(&long, &int()));
    assert!(resolver.is_assignable(&int(), &integer));
    assert!(resolver.is_assignable(&int(), &number));
    assert!(resolver.is_assignable(&integer, &long));
    assert!(resolver.is_assignable(&JavaType::Null, &number));
    assert!(!resolver.is_assignable(&JavaType::string(), &number));
    assert!(resolver.is_subtype(
        &JavaType::array(integer.clone()),
        &JavaType::array(number.clone())
    ));
    assert!(!resolver.is_subtype(&JavaType::array(int()), &JavaType::array(long)));
}

#[test]
fn test_ancestry_substitutes_type_arguments() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let list = JavaType::generic("java.util.ArrayList", vec![JavaType::string()]);
    let ancestry = resolver.ancestry(&list);
    assert_eq!(ancestry.first(), Some(&list));
    assert!(ancestry.contains(&JavaType::generic(
        "java.util.List",
        vec![JavaType::string()]
    )));
    assert!(ancestry.contains(&JavaType::object()));

    let closure = resolver
        .supertypes_closure("java.util.ArrayList")
        .expect("acyclic");
    assert!(closure.iter().any(|n| n == "java.util.Collection"));
}

#[test]
fn test_cyclic_hierarchy_is_reported() {
    let unit = fixtures::call_rules();
    let mut base = SymbolTable::jdk();
    let mut a = arkmig_java::TypeSymbol::new("p.A", arkmig_java::TypeSymbolKind::Class);
    a.superclass = Some(JavaType::class("p.B"));
    let mut b = arkmig_java::TypeSymbol::new("p.B", arkmig_java::TypeSymbolKind::Class);
    b.superclass = Some(JavaType::class("p.A"));
    base.insert(a);
    base.insert(b);
    let resolver = TypeResolver::new(&unit, &base);
    assert_eq!(
        resolver.supertypes_closure("p.A"),
        Err(ResolveError::CyclicHierarchy {
            name: "p.A".to_string()
        })
    );
    // The walk itself terminates
    assert_eq!(resolver.ancestry(&JavaType::class("p.A")).len(), 2);
}

fn candidate(params: Vec<JavaType>) -> ResolvedMethod {
    ResolvedMethod {
        owner: "p.C".to_string(),
        declared: MethodSymbol::new("m", params.clone(), JavaType::void()),
        params,
        return_type: JavaType::void(),
    }
}

#[test]
fn test_select_overload_rules() {
    let unit = fixtures::call_rules();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let long = JavaType::primitive(PrimitiveType::Long);
    let candidates = vec![
        candidate(vec![]),
        candidate(vec![long.clone()]),
        candidate(vec![int()]),
        candidate(vec![JavaType::string()]),
    ];

    assert_eq!(resolver.select_overload(&candidates, &[]), OverloadChoice::Exact(0));
    // int and long both apply; int is more specific
    assert_eq!(
        resolver.select_overload(&candidates, &[int()]),
        OverloadChoice::Exact(2)
    );
    assert_eq!(
        resolver.select_overload(&candidates, &[JavaType::string()]),
        OverloadChoice::Exact(3)
    );
    // Unknown argument: first arity match
    assert_eq!(
        resolver.select_overload(&candidates, &[JavaType::Unknown]),
        OverloadChoice::Fallback(1)
    );
    assert_eq!(
        resolver.select_overload(&candidates, &[int(), int()]),
        OverloadChoice::NoCandidate
    );
}

#[test]
fn test_enclosing_queries() {
    let unit = fixtures::interface_nested();
    let resolver = TypeResolver::new(&unit, &SymbolTable::jdk());
    let ret = find(&unit, |d| {
        matches!(d, NodeData::ReturnStatement { .. })
    });
    let method = resolver.enclosing_method(ret).expect("inside a method");
    assert_eq!(unit.data(method).name(), Some("Innermethod"));
    let owner = resolver.enclosing_type(ret).expect("inside a type");
    assert_eq!(
        resolver.qualified_name(owner),
        Some(format!("{TESTS_PKG}.TestClass").as_str())
    );
    assert!(resolver.enclosing_method(owner).is_none());
}
