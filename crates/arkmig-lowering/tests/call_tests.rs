use super::*;
use crate::test_support::{Evaluator, Value, all_nodes, decl, member, method_body, run};
use arkmig_arkts::{ArkTsPrinter, TargetNode, TargetType};
use arkmig_common::{DiagnosticSeverity, diagnostic_codes};
use arkmig_java::builder::TreeBuilder;
use arkmig_java::{BinaryOp, Modifiers, PrimitiveType, SourceUnit, fixtures};

fn call_rules_body(result: &MigrationResult) -> &[TargetNode] {
    method_body(member(decl(result, "CallExpressiontRules1"), "Test"))
}

#[test]
fn test_call_rules_fixture_is_fully_mapped() {
    let result = run(&fixtures::call_rules());
    assert!(!result.has_errors(), "{}", result.render());
    assert!(result.stats.is_complete());
    assert_eq!(result.stats.placeholders, 0);
    let raw: Vec<_> = result.with_code(diagnostic_codes::RAW_TYPE_MIGRATED).collect();
    assert_eq!(raw.len(), 2);
    assert!(raw.iter().all(|d| d.severity == DiagnosticSeverity::Info));
}

#[test]
fn test_discarded_add_becomes_push() {
    let result = run(&fixtures::call_rules());
    let body = call_rules_body(&result);
    for (i, value) in [(1, "1"), (2, "2")] {
        assert_eq!(
            body[i],
            TargetNode::expr_stmt(TargetNode::method_call(
                TargetNode::id("lst"),
                "push",
                vec![TargetNode::number(value)],
            ))
        );
    }
}

#[test]
fn test_discarded_set_becomes_element_assignment() {
    let result = run(&fixtures::call_rules());
    let expected = TargetNode::expr_stmt(TargetNode::assign(
        TargetNode::elem(TargetNode::id("lst"), TargetNode::number("0")),
        TargetNode::string("test value"),
    ));
    assert_eq!(call_rules_body(&result)[3], expected);
}

#[test]
fn test_to_array_uses_hint_element_type() {
    let result = run(&fixtures::call_rules());
    let TargetNode::VarDecl {
        name,
        ty,
        initializer: Some(init),
        ..
    } = &call_rules_body(&result)[4]
    else {
        panic!("expected a declaration");
    };
    assert_eq!(name, "d");
    assert_eq!(ty, &Some(TargetType::array(TargetType::named("Number"))));
    let expected = TargetNode::Call {
        callee: Box::new(TargetNode::prop(TargetNode::id("Array"), "from")),
        type_args: vec![TargetType::named("Number")],
        arguments: vec![TargetNode::id("lst")],
    };
    assert_eq!(init.as_ref(), &expected);
    assert!(result.with_code(diagnostic_codes::TO_ARRAY_HINT_NOT_FRESH).next().is_none());
}

#[test]
fn test_println_becomes_console_log() {
    let result = run(&fixtures::call_rules());
    let expected = TargetNode::expr_stmt(TargetNode::method_call(
        TargetNode::id("console"),
        "log",
        vec![TargetNode::id("d")],
    ));
    assert_eq!(call_rules_body(&result)[5], expected);
}

#[test]
fn test_call_rules_print() {
    let result = run(&fixtures::call_rules());
    let text = ArkTsPrinter::emit_to_string(&result.module);
    assert!(text.contains("lst.push(1);"), "{text}");
    assert!(text.contains("lst[0] = \"test value\";"), "{text}");
    assert!(text.contains("Array.from<Number>(lst)"), "{text}");
    assert!(text.contains("console.log(d);"), "{text}");
    assert!(!text.contains("import"), "{text}");
}

// =============================================================================
// Calls whose value is used
// =============================================================================

const LISTS_JAVA: &str = r#"import java.util.ArrayList;
import java.util.List;

class Lists {
    static void run() {
        List lst = new ArrayList();
        lst.add("a");
        Object prev = lst.set(0, "v");
        int n = lst.size();
        boolean ok = lst.add("b");
        long now = System.currentTimeMillis();
        int m = Math.max(1, 2);
        String s = "x";
        boolean same = s.equals("y");
    }
}
"#;

fn lists() -> SourceUnit {
    let mut b = TreeBuilder::new("Lists.java", LISTS_JAVA);
    let mut stmts = Vec::new();

    let list_type = b.class_type("List");
    let array_list = b.class_type("ArrayList");
    let creation = b.new_object(array_list, vec![]);
    stmts.push(b.local_var(list_type, "lst", Some(creation)));

    let recv = b.name("lst");
    let a = b.string("a");
    let add = b.call(Some(recv), "add", vec![a]);
    stmts.push(b.expr_stmt(add));

    let object = b.class_type("Object");
    let recv = b.name("lst");
    let zero = b.int(0);
    let v = b.string("v");
    let set = b.call(Some(recv), "set", vec![zero, v]);
    stmts.push(b.local_var(object, "prev", Some(set)));

    let int = b.primitive(PrimitiveType::Int);
    let recv = b.name("lst");
    let size = b.call(Some(recv), "size", vec![]);
    stmts.push(b.local_var(int, "n", Some(size)));

    let boolean = b.primitive(PrimitiveType::Boolean);
    let recv = b.name("lst");
    let value = b.string("b");
    let add = b.call(Some(recv), "add", vec![value]);
    stmts.push(b.local_var(boolean, "ok", Some(add)));

    let long = b.primitive(PrimitiveType::Long);
    let system = b.name("System");
    let millis = b.call(Some(system), "currentTimeMillis", vec![]);
    b.locate(millis, "System.currentTimeMillis()");
    stmts.push(b.local_var(long, "now", Some(millis)));

    let int = b.primitive(PrimitiveType::Int);
    let math = b.name("Math");
    let one = b.int(1);
    let two = b.int(2);
    let max = b.call(Some(math), "max", vec![one, two]);
    stmts.push(b.local_var(int, "m", Some(max)));

    let string = b.class_type("String");
    let x = b.string("x");
    stmts.push(b.local_var(string, "s", Some(x)));

    let boolean = b.primitive(PrimitiveType::Boolean);
    let recv = b.name("s");
    let y = b.string("y");
    let equals = b.call(Some(recv), "equals", vec![y]);
    stmts.push(b.local_var(boolean, "same", Some(equals)));

    let body = b.block(stmts);
    let ret = b.void();
    let method = b.method(Modifiers::STATIC, "run", vec![], ret, Some(body));
    let class = b.class_decl(Modifiers::empty(), "Lists", None, vec![], vec![method]);
    let root = b.compilation_unit(None, &["java.util.ArrayList", "java.util.List"], vec![class]);
    b.finish(root).expect("valid tree")
}

fn initializer_of<'r>(body: &'r [TargetNode], var: &str) -> &'r TargetNode {
    body.iter()
        .find_map(|stmt| match stmt {
            TargetNode::VarDecl {
                name,
                initializer: Some(init),
                ..
            } if name == var => Some(init.as_ref()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no declaration of '{var}'"))
}

fn lists_body(result: &MigrationResult) -> &[TargetNode] {
    method_body(member(decl(result, "Lists"), "run"))
}

#[test]
fn test_used_set_keeps_previous_value_in_temporary() {
    let result = run(&lists());
    let body = lists_body(&result);
    let slot = TargetNode::elem(TargetNode::id("lst"), TargetNode::number("0"));
    assert_eq!(body[2], TargetNode::const_decl("__prev", None, slot.clone()));
    assert_eq!(
        body[3],
        TargetNode::expr_stmt(TargetNode::assign(slot, TargetNode::string("v")))
    );
    assert_eq!(initializer_of(body, "prev"), &TargetNode::id("__prev"));
    assert_eq!(
        result.with_code(diagnostic_codes::PREVIOUS_VALUE_TEMPORARY).count(),
        1
    );
}

#[test]
fn test_used_set_evaluates_like_java() {
    let result = run(&lists());
    let body = lists_body(&result);
    let mut eval = Evaluator::default();
    eval.run(&body[..5]);
    assert_eq!(eval.get("prev"), Value::Str("a".to_string()));
    assert_eq!(eval.get("lst"), Value::List(vec![Value::Str("v".to_string())]));
}

#[test]
fn test_used_add_compares_new_length() {
    let result = run(&lists());
    let push = TargetNode::method_call(TargetNode::id("lst"), "push", vec![TargetNode::string("b")]);
    assert_eq!(
        initializer_of(lists_body(&result), "ok"),
        &TargetNode::binary(push, ">", TargetNode::number("0"))
    );
}

#[test]
fn test_size_and_equals_map_to_operators() {
    let result = run(&lists());
    let body = lists_body(&result);
    assert_eq!(
        initializer_of(body, "n"),
        &TargetNode::prop(TargetNode::id("lst"), "length")
    );
    assert_eq!(
        initializer_of(body, "same"),
        &TargetNode::binary(TargetNode::id("s"), "==", TargetNode::string("y"))
    );
}

#[test]
fn test_math_functions_keep_their_names() {
    let result = run(&lists());
    let expected = TargetNode::method_call(
        TargetNode::id("Math"),
        "max",
        vec![TargetNode::number("1"), TargetNode::number("2")],
    );
    assert_eq!(initializer_of(lists_body(&result), "m"), &expected);
}

#[test]
fn test_unmapped_library_call_kept_verbatim() {
    let result = run(&lists());
    let unmapped: Vec<_> = result
        .with_code(diagnostic_codes::LIBRARY_CALL_NOT_MAPPED)
        .collect();
    assert_eq!(unmapped.len(), 1, "{}", result.render());
    assert!(unmapped[0].is_error());
    assert!(unmapped[0].message.contains("'System.currentTimeMillis'"));

    let init = initializer_of(lists_body(&result), "now");
    let TargetNode::Placeholder { text, .. } = init else {
        panic!("expected a placeholder, got {init:?}");
    };
    assert_eq!(text, "System.currentTimeMillis()");
    // Verbatim passthrough still accounts for the whole call
    assert!(result.stats.is_complete());
}

// =============================================================================
// Maps, strings and streams
// =============================================================================

const APIS_JAVA: &str = r#"import java.util.ArrayList;
import java.util.HashMap;
import java.util.List;
import java.util.Map;

class Apis {
    static void run() {
        List<String> names = new ArrayList<String>();
        Map<String, String> ages = new HashMap<String, String>();
        String s = "abc";
        names.add(0, "first");
        ages.put("a", "b");
        boolean known = ages.containsKey("a");
        int len = s.length();
        char c = s.charAt(0);
        System.out.print(len);
        System.err.println(c);
    }
}
"#;

fn apis() -> SourceUnit {
    let mut b = TreeBuilder::new("Apis.java", APIS_JAVA);
    let mut stmts = Vec::new();

    let string = b.class_type("String");
    let list_type = b.generic_type("List", vec![string]);
    let string = b.class_type("String");
    let array_list = b.generic_type("ArrayList", vec![string]);
    let creation = b.new_object(array_list, vec![]);
    stmts.push(b.local_var(list_type, "names", Some(creation)));

    let key = b.class_type("String");
    let value = b.class_type("String");
    let map_type = b.generic_type("Map", vec![key, value]);
    let key = b.class_type("String");
    let value = b.class_type("String");
    let hash_map = b.generic_type("HashMap", vec![key, value]);
    let creation = b.new_object(hash_map, vec![]);
    stmts.push(b.local_var(map_type, "ages", Some(creation)));

    let string = b.class_type("String");
    let abc = b.string("abc");
    stmts.push(b.local_var(string, "s", Some(abc)));

    let recv = b.name("names");
    let zero = b.int(0);
    let first = b.string("first");
    let insert = b.call(Some(recv), "add", vec![zero, first]);
    stmts.push(b.expr_stmt(insert));

    let recv = b.name("ages");
    let a = b.string("a");
    let value = b.string("b");
    let put = b.call(Some(recv), "put", vec![a, value]);
    stmts.push(b.expr_stmt(put));

    let boolean = b.primitive(PrimitiveType::Boolean);
    let recv = b.name("ages");
    let a = b.string("a");
    let contains = b.call(Some(recv), "containsKey", vec![a]);
    stmts.push(b.local_var(boolean, "known", Some(contains)));

    let int = b.primitive(PrimitiveType::Int);
    let recv = b.name("s");
    let length = b.call(Some(recv), "length", vec![]);
    stmts.push(b.local_var(int, "len", Some(length)));

    let char_type = b.primitive(PrimitiveType::Char);
    let recv = b.name("s");
    let zero = b.int(0);
    let char_at = b.call(Some(recv), "charAt", vec![zero]);
    stmts.push(b.local_var(char_type, "c", Some(char_at)));

    let system = b.name("System");
    let out = b.field(system, "out");
    let len = b.name("len");
    let print = b.call(Some(out), "print", vec![len]);
    b.locate(print, "System.out.print(len)");
    stmts.push(b.expr_stmt(print));

    let system = b.name("System");
    let err = b.field(system, "err");
    let c = b.name("c");
    let println = b.call(Some(err), "println", vec![c]);
    stmts.push(b.expr_stmt(println));

    let body = b.block(stmts);
    let ret = b.void();
    let method = b.method(Modifiers::STATIC, "run", vec![], ret, Some(body));
    let class = b.class_decl(Modifiers::empty(), "Apis", None, vec![], vec![method]);
    let imports = [
        "java.util.ArrayList",
        "java.util.HashMap",
        "java.util.List",
        "java.util.Map",
    ];
    let root = b.compilation_unit(None, &imports, vec![class]);
    b.finish(root).expect("valid tree")
}

fn apis_body(result: &MigrationResult) -> &[TargetNode] {
    method_body(member(decl(result, "Apis"), "run"))
}

#[test]
fn test_insert_at_index_becomes_splice() {
    let result = run(&apis());
    assert!(!result.has_errors(), "{}", result.render());
    let expected = TargetNode::expr_stmt(TargetNode::method_call(
        TargetNode::id("names"),
        "splice",
        vec![
            TargetNode::number("0"),
            TargetNode::number("0"),
            TargetNode::string("first"),
        ],
    ));
    assert_eq!(apis_body(&result)[3], expected);
}

#[test]
fn test_map_calls_use_map_methods() {
    let result = run(&apis());
    let body = apis_body(&result);
    let expected = TargetNode::expr_stmt(TargetNode::method_call(
        TargetNode::id("ages"),
        "set",
        vec![TargetNode::string("a"), TargetNode::string("b")],
    ));
    assert_eq!(body[4], expected);
    assert_eq!(
        initializer_of(body, "known"),
        &TargetNode::method_call(TargetNode::id("ages"), "has", vec![TargetNode::string("a")])
    );
    // A discarded put needs no temporary
    assert!(result.with_code(diagnostic_codes::PREVIOUS_VALUE_TEMPORARY).next().is_none());
}

#[test]
fn test_string_length_is_a_property() {
    let result = run(&apis());
    let body = apis_body(&result);
    assert_eq!(
        initializer_of(body, "len"),
        &TargetNode::prop(TargetNode::id("s"), "length")
    );
    assert_eq!(
        initializer_of(body, "c"),
        &TargetNode::method_call(TargetNode::id("s"), "charAt", vec![TargetNode::number("0")])
    );
}

#[test]
fn test_print_is_flagged_approximate() {
    let result = run(&apis());
    let body = apis_body(&result);
    assert_eq!(
        body[8],
        TargetNode::expr_stmt(TargetNode::method_call(
            TargetNode::id("console"),
            "log",
            vec![TargetNode::id("len")],
        ))
    );
    let approximate: Vec<_> = result
        .with_code(diagnostic_codes::APPROXIMATE_API_MAPPING)
        .collect();
    assert_eq!(approximate.len(), 1, "{}", result.render());
    assert_eq!(approximate[0].severity, DiagnosticSeverity::Warning);
    assert!(approximate[0].message.contains("'PrintStream.print'"));
    assert!(approximate[0].message.contains("'console.log'"));
}

#[test]
fn test_standard_error_goes_to_console_error() {
    let result = run(&apis());
    assert_eq!(
        apis_body(&result)[9],
        TargetNode::expr_stmt(TargetNode::method_call(
            TargetNode::id("console"),
            "error",
            vec![TargetNode::id("c")],
        ))
    );
}

// =============================================================================
// Previous values outside the head of a statement
// =============================================================================

const SLOTS_JAVA: &str = r#"import java.util.ArrayList;
import java.util.HashMap;
import java.util.List;
import java.util.Map;

class Slots {
    static void run() {
        List<String> lst = new ArrayList<String>();
        lst.add("a");
        String s = lst.get(0) + lst.set(0, "v");
        Map<String, String> m = new HashMap<String, String>();
        String old = m.put("k", "x");
        String both = old + m.put("k", "y");
        while (lst.set(0, "w") == null) {
        }
        String[] hint = new String[0];
        String[] copy = lst.toArray(hint);
    }
}
"#;

fn slots() -> SourceUnit {
    let mut b = TreeBuilder::new("Slots.java", SLOTS_JAVA);
    let mut stmts = Vec::new();

    let string = b.class_type("String");
    let list_type = b.generic_type("List", vec![string]);
    let string = b.class_type("String");
    let array_list = b.generic_type("ArrayList", vec![string]);
    let creation = b.new_object(array_list, vec![]);
    stmts.push(b.local_var(list_type, "lst", Some(creation)));

    let recv = b.name("lst");
    let a = b.string("a");
    let add = b.call(Some(recv), "add", vec![a]);
    stmts.push(b.expr_stmt(add));

    let string = b.class_type("String");
    let recv = b.name("lst");
    let zero = b.int(0);
    let get = b.call(Some(recv), "get", vec![zero]);
    let recv = b.name("lst");
    let zero = b.int(0);
    let v = b.string("v");
    let set = b.call(Some(recv), "set", vec![zero, v]);
    let concat = b.binary(BinaryOp::Add, get, set);
    stmts.push(b.local_var(string, "s", Some(concat)));

    let key = b.class_type("String");
    let value = b.class_type("String");
    let map_type = b.generic_type("Map", vec![key, value]);
    let key = b.class_type("String");
    let value = b.class_type("String");
    let hash_map = b.generic_type("HashMap", vec![key, value]);
    let creation = b.new_object(hash_map, vec![]);
    stmts.push(b.local_var(map_type, "m", Some(creation)));

    let string = b.class_type("String");
    let recv = b.name("m");
    let k = b.string("k");
    let x = b.string("x");
    let put = b.call(Some(recv), "put", vec![k, x]);
    stmts.push(b.local_var(string, "old", Some(put)));

    let string = b.class_type("String");
    let old = b.name("old");
    let recv = b.name("m");
    let k = b.string("k");
    let y = b.string("y");
    let put = b.call(Some(recv), "put", vec![k, y]);
    b.locate(put, "m.put(\"k\", \"y\")");
    let concat = b.binary(BinaryOp::Add, old, put);
    stmts.push(b.local_var(string, "both", Some(concat)));

    let recv = b.name("lst");
    let zero = b.int(0);
    let w = b.string("w");
    let set = b.call(Some(recv), "set", vec![zero, w]);
    let null = b.null();
    let condition = b.binary(BinaryOp::Eq, set, null);
    let body = b.block(vec![]);
    stmts.push(b.while_stmt(condition, body));

    let string = b.class_type("String");
    let array = b.array_type(string);
    let string = b.class_type("String");
    let zero = b.int(0);
    let fresh = b.new_array(string, vec![zero]);
    stmts.push(b.local_var(array, "hint", Some(fresh)));

    let string = b.class_type("String");
    let array = b.array_type(string);
    let recv = b.name("lst");
    let hint = b.name("hint");
    b.locate(hint, "hint);");
    let to_array = b.call(Some(recv), "toArray", vec![hint]);
    stmts.push(b.local_var(array, "copy", Some(to_array)));

    let body = b.block(stmts);
    let ret = b.void();
    let method = b.method(Modifiers::STATIC, "run", vec![], ret, Some(body));
    let class = b.class_decl(Modifiers::empty(), "Slots", None, vec![], vec![method]);
    let imports = [
        "java.util.ArrayList",
        "java.util.HashMap",
        "java.util.List",
        "java.util.Map",
    ];
    let root = b.compilation_unit(None, &imports, vec![class]);
    b.finish(root).expect("valid tree")
}

fn slots_body(result: &MigrationResult) -> &[TargetNode] {
    method_body(member(decl(result, "Slots"), "run"))
}

fn splice_of(value: &str) -> TargetNode {
    let splice = TargetNode::method_call(
        TargetNode::id("lst"),
        "splice",
        vec![
            TargetNode::number("0"),
            TargetNode::number("1"),
            TargetNode::string(value),
        ],
    );
    TargetNode::elem(splice, TargetNode::number("0"))
}

#[test]
fn test_set_after_other_operands_uses_splice() {
    let result = run(&slots());
    let body = slots_body(&result);
    assert_eq!(body.len(), 11, "{}", result.render());
    let get = TargetNode::elem(TargetNode::id("lst"), TargetNode::number("0"));
    assert_eq!(
        initializer_of(body, "s"),
        &TargetNode::binary(get, "+", splice_of("v"))
    );
}

#[test]
fn test_set_after_other_operands_evaluates_like_java() {
    let result = run(&slots());
    let mut eval = Evaluator::default();
    eval.run(&slots_body(&result)[..3]);
    assert_eq!(eval.get("s"), Value::Str("aa".to_string()));
    assert_eq!(eval.get("lst"), Value::List(vec![Value::Str("v".to_string())]));
}

#[test]
fn test_set_in_loop_condition_uses_splice() {
    let result = run(&slots());
    let TargetNode::While { condition, .. } = &slots_body(&result)[8] else {
        panic!("expected a while loop");
    };
    assert!(all_nodes(condition).contains(&&splice_of("w")));
}

#[test]
fn test_used_put_keeps_previous_value_in_temporary() {
    let result = run(&slots());
    let body = slots_body(&result);
    let previous = TargetNode::method_call(TargetNode::id("m"), "get", vec![TargetNode::string("k")]);
    assert_eq!(body[4], TargetNode::const_decl("__prev", None, previous));
    assert_eq!(
        body[5],
        TargetNode::expr_stmt(TargetNode::method_call(
            TargetNode::id("m"),
            "set",
            vec![TargetNode::string("k"), TargetNode::string("x")],
        ))
    );
    assert_eq!(initializer_of(body, "old"), &TargetNode::id("__prev"));
    let kept: Vec<_> = result
        .with_code(diagnostic_codes::PREVIOUS_VALUE_TEMPORARY)
        .collect();
    assert_eq!(kept.len(), 1, "{}", result.render());
}

#[test]
fn test_put_after_other_operands_is_not_mapped() {
    let result = run(&slots());
    let unmapped: Vec<_> = result
        .with_code(diagnostic_codes::LIBRARY_CALL_NOT_MAPPED)
        .collect();
    assert_eq!(unmapped.len(), 1, "{}", result.render());
    assert_eq!(unmapped[0].severity, DiagnosticSeverity::Error);
    let TargetNode::Binary { right, .. } = initializer_of(slots_body(&result), "both") else {
        panic!("expected a concatenation");
    };
    assert!(matches!(right.as_ref(), TargetNode::Placeholder { .. }));
}

#[test]
fn test_to_array_with_named_hint_is_reported() {
    let result = run(&slots());
    let hints: Vec<_> = result
        .with_code(diagnostic_codes::TO_ARRAY_HINT_NOT_FRESH)
        .collect();
    assert_eq!(hints.len(), 1, "{}", result.render());
    assert_eq!(
        initializer_of(slots_body(&result), "copy"),
        &TargetNode::Call {
            callee: Box::new(TargetNode::prop(TargetNode::id("Array"), "from")),
            type_args: vec![TargetType::named("string")],
            arguments: vec![TargetNode::id("lst")],
        }
    );
}
