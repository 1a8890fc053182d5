use super::*;
use crate::fixtures;
use arkmig_common::position::{Position, Span};

fn leaf_unit(nodes: Vec<SourceNode>, root: u32) -> Result<SourceUnit, TreeError> {
    SourceUnit::new("T.java", "", nodes, NodeIndex(root))
}

fn cu(types: Vec<NodeIndex>) -> SourceNode {
    SourceNode::new(NodeData::CompilationUnit {
        package: None,
        imports: Vec::new(),
        types,
    })
}

fn empty_class(name: &str) -> SourceNode {
    SourceNode::new(NodeData::ClassDeclaration {
        name: name.to_string(),
        modifiers: Modifiers::empty(),
        type_params: Vec::new(),
        extends: None,
        implements: Vec::new(),
        members: Vec::new(),
    })
}

#[test]
fn test_valid_unit_links_parents() {
    let unit = leaf_unit(vec![empty_class("A"), cu(vec![NodeIndex(0)])], 1).expect("valid tree");
    assert_eq!(unit.len(), 2);
    assert_eq!(unit.parent(NodeIndex(0)), Some(NodeIndex(1)));
    assert_eq!(unit.parent(NodeIndex(1)), None);
    assert_eq!(unit.ancestors(NodeIndex(0)).collect::<Vec<_>>(), vec![NodeIndex(1)]);
}

#[test]
fn test_rejects_out_of_range_child() {
    let err = leaf_unit(vec![cu(vec![NodeIndex(7)])], 0).unwrap_err();
    assert!(matches!(err, TreeError::ChildOutOfRange { child: NodeIndex(7), .. }));
}

#[test]
fn test_rejects_shared_child() {
    let mut b = TreeBuilder::new("T.java", "");
    let shared = b.int(1);
    let s1 = b.expr_stmt(shared);
    let s2 = b.expr_stmt(shared);
    let block = b.block(vec![s1, s2]);
    let init = b.initializer(true, block);
    let class = b.class_decl(Modifiers::empty(), "A", None, vec![], vec![init]);
    let root = b.compilation_unit(None, &[], vec![class]);
    let err = b.finish(root).unwrap_err();
    assert!(matches!(err, TreeError::SharedChild { child, .. } if child == shared));
}

#[test]
fn test_rejects_root_with_parent() {
    let err = leaf_unit(vec![cu(vec![NodeIndex(0)])], 0).unwrap_err();
    assert!(matches!(err, TreeError::RootHasParent { .. }));
}

#[test]
fn test_rejects_non_compilation_unit_root() {
    let err = leaf_unit(vec![empty_class("A")], 0).unwrap_err();
    assert!(matches!(
        err,
        TreeError::RootNotCompilationUnit {
            kind: SyntaxKind::ClassDeclaration
        }
    ));
}

#[test]
fn test_rejects_detached_nodes() {
    let err = leaf_unit(vec![empty_class("Lost"), cu(vec![])], 1).unwrap_err();
    assert!(matches!(
        err,
        TreeError::DetachedNodes {
            count: 1,
            first: NodeIndex(0)
        }
    ));
}

#[test]
fn test_rejects_root_out_of_range() {
    let err = leaf_unit(vec![cu(vec![])], 3).unwrap_err();
    assert!(matches!(err, TreeError::RootOutOfRange { len: 1, .. }));
}

#[test]
fn test_children_follow_source_order() {
    let unit = fixtures::call_rules();
    let NodeData::CompilationUnit { types, .. } = unit.data(unit.root()) else {
        panic!("root is a compilation unit");
    };
    let class = types[0];
    let method = unit.data(class).members()[0];
    let NodeData::MethodDeclaration { return_type, body, .. } = unit.data(method) else {
        panic!("expected a method");
    };
    let children = unit.data(method).children();
    assert_eq!(children.first(), Some(return_type));
    assert_eq!(children.last(), body.as_ref());
}

#[test]
fn test_subtree_is_preorder() {
    let unit = fixtures::if_statements();
    let subtree = unit.subtree(unit.root());
    assert_eq!(subtree.len(), unit.len());
    assert_eq!(subtree[0], unit.root());
    for (i, &idx) in subtree.iter().enumerate().skip(1) {
        let parent = unit.parent(idx).expect("non-root node has a parent");
        let parent_pos = subtree.iter().position(|&n| n == parent).expect("parent in subtree");
        assert!(parent_pos < i, "parent must precede child in pre-order");
    }
}

#[test]
fn test_builder_locates_spans_and_positions() {
    let unit = fixtures::test_interface();
    let init = unit
        .iter()
        .find(|(_, n)| n.kind() == SyntaxKind::InitializerBlock)
        .map(|(idx, _)| idx)
        .expect("fixture has an initializer block");
    assert_eq!(unit.text_of(init), "{ foo(2.5); }");
    let pos = unit.position(init);
    assert_eq!(pos.line, 24);
    assert_eq!(pos.column, 5);
}

#[test]
fn test_unlocated_parent_inherits_child_span() {
    let text = "class A { void m() { x = 1; } }";
    let mut b = TreeBuilder::new("A.java", text);
    let one = b.int(1);
    let stmt = b.assign_stmt("x", one);
    b.locate(stmt, "x = 1;");
    let body = b.block(vec![stmt]);
    let ret = b.void();
    let method = b.method(Modifiers::empty(), "m", vec![], ret, Some(body));
    let class = b.class_decl(Modifiers::empty(), "A", None, vec![], vec![method]);
    let root = b.compilation_unit(None, &[], vec![class]);
    let unit = b.finish(root).expect("valid tree");

    assert_eq!(unit.text_of(body), "x = 1;");
    assert_eq!(unit.position(method), Position::new(1, 22));
    assert_eq!(unit.node(one).span, Span::EMPTY);
    assert!(unit.position(one).is_unknown());
}

#[test]
fn test_json_round_trip_preserves_tree() {
    let unit = fixtures::intersection_type();
    let json = unit.to_json(false).expect("serialize unit");
    let loaded = SourceUnit::from_json(&json).expect("reload unit");
    assert_eq!(loaded.len(), unit.len());
    assert_eq!(loaded.root(), unit.root());
    assert_eq!(loaded.file_name(), "intersection-type.java");
    for (idx, node) in unit.iter() {
        assert_eq!(loaded.node(idx), node);
        assert_eq!(loaded.parent(idx), unit.parent(idx));
    }
}

#[test]
fn test_json_node_shape() {
    let json = r#"{
        "fileName": "A.java",
        "text": "class A {}",
        "root": 1,
        "nodes": [
            { "kind": "ClassDeclaration", "name": "A", "members": [],
              "span": { "start": 0, "end": 10 }, "pos": { "line": 1, "column": 1 } },
            { "kind": "CompilationUnit", "types": [0] }
        ]
    }"#;
    let unit = SourceUnit::from_json(json).expect("valid unit");
    assert_eq!(unit.kind(NodeIndex(0)), SyntaxKind::ClassDeclaration);
    assert_eq!(unit.text_of(NodeIndex(0)), "class A {}");
    assert_eq!(unit.data(NodeIndex(0)).modifiers(), Modifiers::empty());
}

#[test]
fn test_json_validation_errors_surface() {
    let json = r#"{ "fileName": "A.java", "root": 0,
        "nodes": [ { "kind": "CompilationUnit", "types": [4] } ] }"#;
    let err = SourceUnit::from_json(json).unwrap_err();
    assert!(err.to_string().contains("refers to child #4"));
}

#[test]
fn test_java_type_display_and_fragments() {
    let list = JavaType::generic("java.util.List", vec![JavaType::string()]);
    assert_eq!(list.to_string(), "List<String>");
    assert_eq!(list.identifier_fragment(), "List");
    let arr = JavaType::array(JavaType::primitive(PrimitiveType::Int));
    assert_eq!(arr.to_string(), "int[]");
    assert_eq!(arr.identifier_fragment(), "intArr");
    let inter = JavaType::Intersection {
        bounds: vec![JavaType::class("java.lang.Runnable"), JavaType::class("Something")],
    };
    assert_eq!(inter.to_string(), "Runnable & Something");
}

#[test]
fn test_primitive_widening() {
    use PrimitiveType::*;
    assert!(Int.widens_to(Long));
    assert!(Int.widens_to(Double));
    assert!(Char.widens_to(Int));
    assert!(!Char.widens_to(Short));
    assert!(!Short.widens_to(Char));
    assert!(!Double.widens_to(Int));
    assert!(!Boolean.widens_to(Int));
}

#[test]
fn test_type_substitution() {
    let e = JavaType::type_variable("E");
    let list_e = JavaType::generic("java.util.List", vec![e.clone()]);
    let params = vec!["E".to_string()];
    let args = vec![JavaType::string()];
    assert_eq!(e.substitute(&params, &args), JavaType::string());
    assert_eq!(
        list_e.substitute(&params, &args),
        JavaType::generic("java.util.List", vec![JavaType::string()])
    );
}

#[test]
fn test_modifier_keywords() {
    let mods = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::STRICTFP;
    assert_eq!(mods.keywords(), vec!["public", "static", "strictfp"]);
    assert_eq!(
        (mods & Modifiers::DROPPABLE).keywords(),
        vec!["strictfp"]
    );
}

#[test]
fn test_every_fixture_is_valid() {
    for unit in fixtures::all() {
        assert!(!unit.is_empty(), "{} is empty", unit.file_name());
        assert_eq!(unit.kind(unit.root()), SyntaxKind::CompilationUnit);
    }
}
