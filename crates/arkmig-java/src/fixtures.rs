//! Ready-made source trees for tests and benchmarks.
//!
//! Each fixture pairs a small Java file with the tree a front end would
//! produce for it. Spans are attached to the nodes diagnostics point at, so
//! positions and verbatim passthrough behave as they do for real input.

use crate::builder::TreeBuilder;
use crate::modifiers::Modifiers;
use crate::node::NodeIndex;
use crate::types::PrimitiveType;
use crate::unit::SourceUnit;

pub const IF_JAVA: &str = r#"package com.ohos.migrator.test.java;

class IfTest {

    public void Test() {
        boolean t = true;
        int a, b;

        if( t ) a = 1;

        if( t ) a = 2; else a = 3;

        if( t ) {
            a = 4; b = 100;
        }

        if( t ) {
            a = 5; b = 101;
        } else {
            a = 6; b = 102;
        }

        if( t ) a = 7; else { a = 8; b = 103; }

        if( t ) { a = 9; b = 104; } else a = 10;

        boolean p = false;

        if( t ) if ( p ) a = 11; else a = 12;

        if( t ) a = 13; else if ( p ) { a = 14; }

        if( t ) a = 15; else { if( p ) a = 16; else a = 17; }

        if( t ) { if( p ) { a = 18; b = 105; } else { a = 19; b = 106; } } else if (p) a = 20; else a = 21;
    }
}
"#;

pub const TEST_INTERFACE_JAVA: &str = r#"package com.ohos.migrator.tests.java;

interface test_interface {
    int i = 10;
    double pi = 3.1416;

    void foo();

    static void foo(int i) {}

    private void foo(boolean b) {}

    public void foo(String s);
}

strictfp interface iface_FP {
    void foo(float f);
}


interface iface_C extends test_interface, iface_FP {
    public void foo(double d);

    { foo(2.5); }
}
"#;

pub const INTERFACE_NESTED_JAVA: &str = r#"package com.ohos.migrator.tests.java;

interface Test {
    void Outtermethod();

    public class A {
        int i;
    }

    abstract interface dummy {
        void getI();
    }


    interface innerInterface {
        public int Innermethod();
    }

    public interface inner_A {
        double coeff();
    }
}


class TestClass implements Test.innerInterface, Test.inner_A {
    @Override
    public int Innermethod() {
        return 37037;
    }

    @Override
    public double coeff() {
        return 3.14;
    }

    public interface constants {
        public double Pi();
        static double E() { return 2.7828; };
    }

}
"#;

pub const INTERSECTION_JAVA: &str = r#"package com.ohos.migrator.test.java;

class intersection_type<T extends String & Runnable & Something> {
    public void bar(auxilliary arg) {
        Runnable r = (Runnable & Something)arg;
        r.run();

        Something s = (Something & Runnable)arg;
        s.foo();
    }
}

class auxilliary implements Runnable, Something {
    public void run() { }
    public void foo() { }
}

interface Something {
    void foo();
}
"#;

pub const CALL_RULES_JAVA: &str = r#"package com.ohos.migrator.test.java;

import java.util.ArrayList;
import java.util.List;

class CallExpressiontRules1 {
    public static void Test() {
        List lst = new ArrayList();
        lst.add(1);
        lst.add(2);

        lst.set(0, "test value");

        Number d[] = lst.toArray(new Number[0]);

        System.out.println(d);
    }
}
"#;

/// `name = value;` located by its text.
fn set_int(b: &mut TreeBuilder, name: &str, value: i64) -> NodeIndex {
    let literal = b.int(value);
    let stmt = b.assign_stmt(name, literal);
    b.locate(stmt, &format!("{name} = {value};"))
}

/// `if( t ) ...` style condition on a boolean local.
fn flag(b: &mut TreeBuilder, name: &str) -> NodeIndex {
    b.name(name)
}

/// `if.java`: plain, chained and dangling-else `if` statements.
pub fn if_statements() -> SourceUnit {
    let mut b = TreeBuilder::new("if.java", IF_JAVA);
    let mut stmts = Vec::new();

    let boolean = b.primitive(PrimitiveType::Boolean);
    let init = b.boolean(true);
    let decl_t = b.local_var(boolean, "t", Some(init));
    stmts.push(b.locate(decl_t, "boolean t = true;"));

    let int = b.primitive(PrimitiveType::Int);
    let da = b.declarator("a", None);
    let db = b.declarator("b", None);
    let decl_ab = b.local(int, vec![da, db]);
    stmts.push(b.locate(decl_ab, "int a, b;"));

    // if( t ) a = 1;
    let c = flag(&mut b, "t");
    let then = set_int(&mut b, "a", 1);
    stmts.push(b.if_stmt(c, then, None));

    // if( t ) a = 2; else a = 3;
    let c = flag(&mut b, "t");
    let then = set_int(&mut b, "a", 2);
    let els = set_int(&mut b, "a", 3);
    stmts.push(b.if_stmt(c, then, Some(els)));

    // if( t ) { a = 4; b = 100; }
    let c = flag(&mut b, "t");
    let s1 = set_int(&mut b, "a", 4);
    let s2 = set_int(&mut b, "b", 100);
    let then = b.block(vec![s1, s2]);
    stmts.push(b.if_stmt(c, then, None));

    // if( t ) { a = 5; b = 101; } else { a = 6; b = 102; }
    let c = flag(&mut b, "t");
    let s1 = set_int(&mut b, "a", 5);
    let s2 = set_int(&mut b, "b", 101);
    let then = b.block(vec![s1, s2]);
    let s1 = set_int(&mut b, "a", 6);
    let s2 = set_int(&mut b, "b", 102);
    let els = b.block(vec![s1, s2]);
    stmts.push(b.if_stmt(c, then, Some(els)));

    // if( t ) a = 7; else { a = 8; b = 103; }
    let c = flag(&mut b, "t");
    let then = set_int(&mut b, "a", 7);
    let s1 = set_int(&mut b, "a", 8);
    let s2 = set_int(&mut b, "b", 103);
    let els = b.block(vec![s1, s2]);
    stmts.push(b.if_stmt(c, then, Some(els)));

    // if( t ) { a = 9; b = 104; } else a = 10;
    let c = flag(&mut b, "t");
    let s1 = set_int(&mut b, "a", 9);
    let s2 = set_int(&mut b, "b", 104);
    let then = b.block(vec![s1, s2]);
    let els = set_int(&mut b, "a", 10);
    stmts.push(b.if_stmt(c, then, Some(els)));

    let boolean = b.primitive(PrimitiveType::Boolean);
    let init = b.boolean(false);
    let decl_p = b.local_var(boolean, "p", Some(init));
    stmts.push(b.locate(decl_p, "boolean p = false;"));

    // if( t ) if ( p ) a = 11; else a = 12;
    let c = flag(&mut b, "t");
    let inner_c = flag(&mut b, "p");
    let inner_then = set_int(&mut b, "a", 11);
    let inner_else = set_int(&mut b, "a", 12);
    let inner = b.if_stmt(inner_c, inner_then, Some(inner_else));
    stmts.push(b.if_stmt(c, inner, None));

    // if( t ) a = 13; else if ( p ) { a = 14; }
    let c = flag(&mut b, "t");
    let then = set_int(&mut b, "a", 13);
    let inner_c = flag(&mut b, "p");
    let s1 = set_int(&mut b, "a", 14);
    let inner_then = b.block(vec![s1]);
    let els = b.if_stmt(inner_c, inner_then, None);
    stmts.push(b.if_stmt(c, then, Some(els)));

    // if( t ) a = 15; else { if( p ) a = 16; else a = 17; }
    let c = flag(&mut b, "t");
    let then = set_int(&mut b, "a", 15);
    let inner_c = flag(&mut b, "p");
    let inner_then = set_int(&mut b, "a", 16);
    let inner_else = set_int(&mut b, "a", 17);
    let inner = b.if_stmt(inner_c, inner_then, Some(inner_else));
    let els = b.block(vec![inner]);
    stmts.push(b.if_stmt(c, then, Some(els)));

    // if( t ) { if( p ) { a = 18; b = 105; } else { a = 19; b = 106; } }
    // else if (p) a = 20; else a = 21;
    let c = flag(&mut b, "t");
    let inner_c = flag(&mut b, "p");
    let s1 = set_int(&mut b, "a", 18);
    let s2 = set_int(&mut b, "b", 105);
    let inner_then = b.block(vec![s1, s2]);
    let s1 = set_int(&mut b, "a", 19);
    let s2 = set_int(&mut b, "b", 106);
    let inner_else = b.block(vec![s1, s2]);
    let inner = b.if_stmt(inner_c, inner_then, Some(inner_else));
    let then = b.block(vec![inner]);
    let else_c = flag(&mut b, "p");
    let else_then = set_int(&mut b, "a", 20);
    let else_else = set_int(&mut b, "a", 21);
    let els = b.if_stmt(else_c, else_then, Some(else_else));
    stmts.push(b.if_stmt(c, then, Some(els)));

    let body = b.block(stmts);
    let ret = b.void();
    let method = b.method(Modifiers::PUBLIC, "Test", vec![], ret, Some(body));
    b.locate(method, "public void Test()");
    let class = b.class_decl(Modifiers::empty(), "IfTest", None, vec![], vec![method]);
    b.locate(class, "class IfTest");
    let root = b.compilation_unit(Some("com.ohos.migrator.test.java"), &[], vec![class]);
    b.finish(root).expect("if.java fixture is a valid tree")
}

/// `test_interface.java`: interface constants, static/private/abstract
/// overloads, `strictfp`, multiple extension and an initializer block.
pub fn test_interface() -> SourceUnit {
    let mut b = TreeBuilder::new("test_interface.java", TEST_INTERFACE_JAVA);

    // interface test_interface
    let int = b.primitive(PrimitiveType::Int);
    let ten = b.int(10);
    let field_i = b.field_decl(Modifiers::empty(), int, "i", Some(ten));
    b.locate(field_i, "int i = 10;");
    let double = b.primitive(PrimitiveType::Double);
    let pi_value = b.double("3.1416");
    let field_pi = b.field_decl(Modifiers::empty(), double, "pi", Some(pi_value));
    b.locate(field_pi, "double pi = 3.1416;");

    let ret = b.void();
    let foo = b.method(Modifiers::empty(), "foo", vec![], ret, None);
    b.locate(foo, "void foo();");

    let int = b.primitive(PrimitiveType::Int);
    let param = b.param(int, "i");
    let ret = b.void();
    let body = b.block(vec![]);
    let foo_int = b.method(Modifiers::STATIC, "foo", vec![param], ret, Some(body));
    b.locate(foo_int, "static void foo(int i) {}");

    let boolean = b.primitive(PrimitiveType::Boolean);
    let param = b.param(boolean, "b");
    let ret = b.void();
    let body = b.block(vec![]);
    let foo_boolean = b.method(Modifiers::PRIVATE, "foo", vec![param], ret, Some(body));
    b.locate(foo_boolean, "private void foo(boolean b) {}");

    let string = b.class_type("String");
    let param = b.param(string, "s");
    let ret = b.void();
    let foo_string = b.method(Modifiers::PUBLIC, "foo", vec![param], ret, None);
    b.locate(foo_string, "public void foo(String s);");

    let test_interface = b.interface_decl(
        Modifiers::empty(),
        "test_interface",
        vec![],
        vec![field_i, field_pi, foo, foo_int, foo_boolean, foo_string],
    );
    b.locate(test_interface, "interface test_interface");

    // strictfp interface iface_FP
    let float = b.primitive(PrimitiveType::Float);
    let param = b.param(float, "f");
    let ret = b.void();
    let foo_float = b.method(Modifiers::empty(), "foo", vec![param], ret, None);
    b.locate(foo_float, "void foo(float f);");
    let iface_fp = b.interface_decl(Modifiers::STRICTFP, "iface_FP", vec![], vec![foo_float]);
    b.locate(iface_fp, "strictfp interface iface_FP");

    // interface iface_C extends test_interface, iface_FP
    let double = b.primitive(PrimitiveType::Double);
    let param = b.param(double, "d");
    let ret = b.void();
    let foo_double = b.method(Modifiers::PUBLIC, "foo", vec![param], ret, None);
    b.locate(foo_double, "public void foo(double d);");

    let arg = b.double("2.5");
    let call = b.call(None, "foo", vec![arg]);
    let stmt = b.expr_stmt(call);
    b.locate(stmt, "foo(2.5);");
    let block = b.block(vec![stmt]);
    b.locate(block, "{ foo(2.5); }");
    let init_block = b.initializer(false, block);
    b.locate(init_block, "{ foo(2.5); }");

    let ext1 = b.class_type("test_interface");
    b.locate_after(ext1, "test_interface", "extends");
    let ext2 = b.class_type("iface_FP");
    b.locate_after(ext2, "iface_FP", "extends");
    let iface_c = b.interface_decl(
        Modifiers::empty(),
        "iface_C",
        vec![ext1, ext2],
        vec![foo_double, init_block],
    );
    b.locate(iface_c, "interface iface_C");

    let root = b.compilation_unit(
        Some("com.ohos.migrator.tests.java"),
        &[],
        vec![test_interface, iface_fp, iface_c],
    );
    b.finish(root).expect("test_interface.java fixture is a valid tree")
}

/// `interface_nested.java`: types nested in an interface and in a class.
pub fn interface_nested() -> SourceUnit {
    let mut b = TreeBuilder::new("interface_nested.java", INTERFACE_NESTED_JAVA);

    // interface Test
    let ret = b.void();
    let outter = b.method(Modifiers::empty(), "Outtermethod", vec![], ret, None);
    b.locate(outter, "void Outtermethod();");

    let int = b.primitive(PrimitiveType::Int);
    let field_i = b.field_decl(Modifiers::empty(), int, "i", None);
    b.locate(field_i, "int i;");
    let class_a = b.class_decl(Modifiers::PUBLIC, "A", None, vec![], vec![field_i]);
    b.locate(class_a, "public class A");

    let ret = b.void();
    let get_i = b.method(Modifiers::empty(), "getI", vec![], ret, None);
    b.locate(get_i, "void getI();");
    let dummy = b.interface_decl(Modifiers::ABSTRACT, "dummy", vec![], vec![get_i]);
    b.locate(dummy, "abstract interface dummy");

    let int = b.primitive(PrimitiveType::Int);
    let inner_method = b.method(Modifiers::PUBLIC, "Innermethod", vec![], int, None);
    b.locate(inner_method, "public int Innermethod();");
    let inner_interface = b.interface_decl(Modifiers::empty(), "innerInterface", vec![], vec![inner_method]);
    b.locate(inner_interface, "interface innerInterface");

    let double = b.primitive(PrimitiveType::Double);
    let coeff = b.method(Modifiers::empty(), "coeff", vec![], double, None);
    b.locate(coeff, "double coeff();");
    let inner_a = b.interface_decl(Modifiers::PUBLIC, "inner_A", vec![], vec![coeff]);
    b.locate(inner_a, "public interface inner_A");

    let test = b.interface_decl(
        Modifiers::empty(),
        "Test",
        vec![],
        vec![outter, class_a, dummy, inner_interface, inner_a],
    );
    b.locate(test, "interface Test");

    // class TestClass implements Test.innerInterface, Test.inner_A
    let impl1 = b.class_type("Test.innerInterface");
    b.locate(impl1, "Test.innerInterface");
    let impl2 = b.class_type("Test.inner_A");
    b.locate(impl2, "Test.inner_A");

    let int = b.primitive(PrimitiveType::Int);
    let value = b.int(37037);
    let ret_stmt = b.ret(Some(value));
    b.locate(ret_stmt, "return 37037;");
    let body = b.block(vec![ret_stmt]);
    let innermethod_impl = b.method(Modifiers::PUBLIC, "Innermethod", vec![], int, Some(body));
    b.annotate(innermethod_impl, "Override");
    b.locate(innermethod_impl, "public int Innermethod() {");

    let double = b.primitive(PrimitiveType::Double);
    let value = b.double("3.14");
    let ret_stmt = b.ret(Some(value));
    b.locate(ret_stmt, "return 3.14;");
    let body = b.block(vec![ret_stmt]);
    let coeff_impl = b.method(Modifiers::PUBLIC, "coeff", vec![], double, Some(body));
    b.annotate(coeff_impl, "Override");
    b.locate(coeff_impl, "public double coeff() {");

    let double = b.primitive(PrimitiveType::Double);
    let pi = b.method(Modifiers::PUBLIC, "Pi", vec![], double, None);
    b.locate(pi, "public double Pi();");
    let double = b.primitive(PrimitiveType::Double);
    let value = b.double("2.7828");
    let ret_stmt = b.ret(Some(value));
    b.locate(ret_stmt, "return 2.7828;");
    let body = b.block(vec![ret_stmt]);
    let e = b.method(Modifiers::STATIC, "E", vec![], double, Some(body));
    b.locate(e, "static double E()");
    let constants = b.interface_decl(Modifiers::PUBLIC, "constants", vec![], vec![pi, e]);
    b.locate(constants, "public interface constants");

    let test_class = b.class_decl(
        Modifiers::empty(),
        "TestClass",
        None,
        vec![impl1, impl2],
        vec![innermethod_impl, coeff_impl, constants],
    );
    b.locate(test_class, "class TestClass");

    let root = b.compilation_unit(Some("com.ohos.migrator.tests.java"), &[], vec![test, test_class]);
    b.finish(root).expect("interface_nested.java fixture is a valid tree")
}

/// `intersection-type.java`: intersection casts and an intersection bound.
pub fn intersection_type() -> SourceUnit {
    let mut b = TreeBuilder::new("intersection-type.java", INTERSECTION_JAVA);

    // class intersection_type<T extends String & Runnable & Something>
    let bound_string = b.class_type("String");
    b.locate(bound_string, "String");
    let bound_runnable = b.class_type("Runnable");
    b.locate(bound_runnable, "Runnable");
    let bound_something = b.class_type("Something");
    b.locate(bound_something, "Something");
    let type_param = b.type_param("T", vec![bound_string, bound_runnable, bound_something]);
    b.locate(type_param, "T extends String & Runnable & Something");

    let aux_type = b.class_type("auxilliary");
    let param = b.param(aux_type, "arg");
    b.locate(param, "auxilliary arg");

    // Runnable r = (Runnable & Something)arg;
    let var_type = b.class_type("Runnable");
    let cast_b1 = b.class_type("Runnable");
    let cast_b2 = b.class_type("Something");
    let inter = b.intersection_type(vec![cast_b1, cast_b2]);
    b.locate(inter, "Runnable & Something)");
    let operand = b.name("arg");
    let cast = b.cast(inter, operand);
    b.locate(cast, "(Runnable & Something)arg");
    let decl_r = b.local_var(var_type, "r", Some(cast));
    b.locate(decl_r, "Runnable r = (Runnable & Something)arg;");

    let recv = b.name("r");
    let call = b.call(Some(recv), "run", vec![]);
    let run_stmt = b.expr_stmt(call);
    b.locate(run_stmt, "r.run();");

    // Something s = (Something & Runnable)arg;
    let var_type = b.class_type("Something");
    let cast_b1 = b.class_type("Something");
    let cast_b2 = b.class_type("Runnable");
    let inter = b.intersection_type(vec![cast_b1, cast_b2]);
    b.locate(inter, "Something & Runnable)");
    let operand = b.name("arg");
    let cast = b.cast(inter, operand);
    b.locate(cast, "(Something & Runnable)arg");
    let decl_s = b.local_var(var_type, "s", Some(cast));
    b.locate(decl_s, "Something s = (Something & Runnable)arg;");

    let recv = b.name("s");
    let call = b.call(Some(recv), "foo", vec![]);
    let foo_stmt = b.expr_stmt(call);
    b.locate(foo_stmt, "s.foo();");

    let body = b.block(vec![decl_r, run_stmt, decl_s, foo_stmt]);
    let ret = b.void();
    let bar = b.method(Modifiers::PUBLIC, "bar", vec![param], ret, Some(body));
    b.locate(bar, "public void bar(auxilliary arg)");
    let class = b.class_decl(Modifiers::empty(), "intersection_type", None, vec![], vec![bar]);
    b.with_type_params(class, vec![type_param]);
    b.locate(class, "class intersection_type");

    // class auxilliary implements Runnable, Something
    let impl1 = b.class_type("Runnable");
    b.locate_after(impl1, "Runnable", "implements");
    let impl2 = b.class_type("Something");
    b.locate_after(impl2, "Something", "implements");
    let ret = b.void();
    let body = b.block(vec![]);
    let run = b.method(Modifiers::PUBLIC, "run", vec![], ret, Some(body));
    b.locate(run, "public void run() { }");
    let ret = b.void();
    let body = b.block(vec![]);
    let foo = b.method(Modifiers::PUBLIC, "foo", vec![], ret, Some(body));
    b.locate(foo, "public void foo() { }");
    let auxilliary = b.class_decl(Modifiers::empty(), "auxilliary", None, vec![impl1, impl2], vec![run, foo]);
    b.locate(auxilliary, "class auxilliary");

    // interface Something
    let ret = b.void();
    let foo_sig = b.method(Modifiers::empty(), "foo", vec![], ret, None);
    b.locate(foo_sig, "void foo();");
    let something = b.interface_decl(Modifiers::empty(), "Something", vec![], vec![foo_sig]);
    b.locate(something, "interface Something");

    let root = b.compilation_unit(
        Some("com.ohos.migrator.test.java"),
        &[],
        vec![class, auxilliary, something],
    );
    b.finish(root).expect("intersection-type.java fixture is a valid tree")
}

/// `CallExpressionRules2.java`: `List` and `PrintStream` calls.
pub fn call_rules() -> SourceUnit {
    let mut b = TreeBuilder::new("CallExpressionRules2.java", CALL_RULES_JAVA);
    let mut stmts = Vec::new();

    // List lst = new ArrayList();
    let list_type = b.class_type("List");
    b.locate(list_type, "List lst");
    let array_list = b.class_type("ArrayList");
    b.locate(array_list, "ArrayList()");
    let creation = b.new_object(array_list, vec![]);
    b.locate(creation, "new ArrayList()");
    let decl = b.local_var(list_type, "lst", Some(creation));
    stmts.push(b.locate(decl, "List lst = new ArrayList();"));

    // lst.add(1); lst.add(2);
    for value in [1, 2] {
        let recv = b.name("lst");
        let arg = b.int(value);
        let call = b.call(Some(recv), "add", vec![arg]);
        let stmt = b.expr_stmt(call);
        stmts.push(b.locate(stmt, &format!("lst.add({value});")));
    }

    // lst.set(0, "test value");
    let recv = b.name("lst");
    let index = b.int(0);
    let value = b.string("test value");
    let call = b.call(Some(recv), "set", vec![index, value]);
    b.locate(call, "lst.set(0, \"test value\")");
    let stmt = b.expr_stmt(call);
    stmts.push(b.locate(stmt, "lst.set(0, \"test value\");"));

    // Number d[] = lst.toArray(new Number[0]);
    let number = b.class_type("Number");
    let recv = b.name("lst");
    let element = b.class_type("Number");
    let zero = b.int(0);
    let hint = b.new_array(element, vec![zero]);
    b.locate(hint, "new Number[0]");
    let call = b.call(Some(recv), "toArray", vec![hint]);
    b.locate(call, "lst.toArray(new Number[0])");
    let declarator = b.add(crate::node::NodeData::VariableDeclarator {
        name: "d".to_string(),
        dims: 1,
        init: Some(call),
    });
    let decl = b.local(number, vec![declarator]);
    stmts.push(b.locate(decl, "Number d[] = lst.toArray(new Number[0]);"));

    // System.out.println(d);
    let system = b.name("System");
    let out = b.field(system, "out");
    let arg = b.name("d");
    let call = b.call(Some(out), "println", vec![arg]);
    b.locate(call, "System.out.println(d)");
    let stmt = b.expr_stmt(call);
    stmts.push(b.locate(stmt, "System.out.println(d);"));

    let body = b.block(stmts);
    let ret = b.void();
    let method = b.method(Modifiers::PUBLIC | Modifiers::STATIC, "Test", vec![], ret, Some(body));
    b.locate(method, "public static void Test()");
    let class = b.class_decl(Modifiers::empty(), "CallExpressiontRules1", None, vec![], vec![method]);
    b.locate(class, "class CallExpressiontRules1");
    let root = b.compilation_unit(
        Some("com.ohos.migrator.test.java"),
        &["java.util.ArrayList", "java.util.List"],
        vec![class],
    );
    b.finish(root).expect("CallExpressionRules2.java fixture is a valid tree")
}

/// Every fixture, in a stable order.
pub fn all() -> Vec<SourceUnit> {
    vec![
        if_statements(),
        test_interface(),
        interface_nested(),
        intersection_type(),
        call_rules(),
    ]
}
