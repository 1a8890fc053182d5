use super::*;
use crate::symbols::is_library_name;

#[test]
fn test_jdk_table_has_collection_hierarchy() {
    let jdk = SymbolTable::jdk();
    let array_list = jdk.get("java.util.ArrayList").expect("ArrayList known");
    assert_eq!(array_list.kind, TypeSymbolKind::Class);
    assert_eq!(array_list.type_params, vec!["E".to_string()]);
    assert_eq!(
        array_list.interfaces,
        vec![JavaType::generic(
            "java.util.List",
            vec![JavaType::type_variable("E")]
        )]
    );

    let list = jdk.get("java.util.List").expect("List known");
    assert!(list.is_interface());
    assert!(list.is_library());
    assert_eq!(list.methods_named("add").count(), 2);
    assert_eq!(list.methods_named("toArray").count(), 2);
}

#[test]
fn test_jdk_system_out_is_print_stream() {
    let jdk = SymbolTable::jdk();
    let system = jdk.get("java.lang.System").expect("System known");
    let out = system.field("out").expect("System.out known");
    assert!(out.modifiers.is_static());
    assert_eq!(out.ty, JavaType::class("java.io.PrintStream"));
    let stream = jdk.get("java.io.PrintStream").expect("PrintStream known");
    assert!(stream.methods_named("println").any(|m| m.arity() == 0));
}

#[test]
fn test_every_class_but_object_has_superclass() {
    let jdk = SymbolTable::jdk();
    for symbol in jdk.iter().filter(|s| s.kind == TypeSymbolKind::Class) {
        if symbol.name == "java.lang.Object" {
            assert!(symbol.superclass.is_none());
        } else {
            assert!(symbol.superclass.is_some(), "{} lacks a superclass", symbol.name);
        }
    }
}

#[test]
fn test_library_names() {
    assert!(is_library_name("java.util.List"));
    assert!(is_library_name("javax.swing.JFrame"));
    assert!(!is_library_name("javafx.scene.Node"));
    assert!(!is_library_name("com.example.java.Thing"));
}

#[test]
fn test_symbol_table_json_round_trip() {
    let mut table = SymbolTable::new();
    let mut shape = TypeSymbol::new("com.example.Shape", TypeSymbolKind::Interface);
    shape.methods.push(
        MethodSymbol::new("area", vec![], JavaType::primitive(PrimitiveType::Double))
            .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
    );
    table.insert(shape);

    let json = serde_json::to_string(&table).expect("serialize table");
    assert!(json.starts_with("{\"types\":["));
    let loaded = SymbolTable::from_json(&json).expect("reload table");
    assert_eq!(loaded, table);
    assert_eq!(
        loaded
            .get("com.example.Shape")
            .map(|s| s.simple_name()),
        Some("Shape")
    );
}

#[test]
fn test_merge_replaces_by_name() {
    let mut base = SymbolTable::jdk();
    let before = base.len();
    let mut overlay = SymbolTable::new();
    let mut custom = TypeSymbol::new("java.lang.Runnable", TypeSymbolKind::Interface);
    custom.fields.push(FieldSymbol::new(
        "MARKER",
        Modifiers::STATIC,
        JavaType::primitive(PrimitiveType::Int),
    ));
    overlay.insert(custom);
    base.merge(&overlay);
    assert_eq!(base.len(), before);
    let runnable = base.get("java.lang.Runnable").expect("Runnable known");
    assert!(runnable.methods.is_empty());
    assert!(runnable.field("MARKER").is_some());
}

#[test]
fn test_method_signature_text() {
    let method = MethodSymbol::new(
        "foo",
        vec![JavaType::primitive(PrimitiveType::Int), JavaType::string()],
        JavaType::void(),
    );
    assert_eq!(method.signature(), "foo(int, String)");
}
