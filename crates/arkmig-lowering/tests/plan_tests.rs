use super::*;
use crate::plan::PrivateCounts;
use crate::test_support::find_node;
use arkmig_java::builder::TreeBuilder;
use arkmig_java::{JavaType, Modifiers, NodeData, PrimitiveType, SourceUnit, SymbolTable, fixtures};
use arkmig_resolver::TypeResolver;

fn plan_for(unit: &SourceUnit, options: &MigrationOptions) -> MigrationPlan {
    let symbols = SymbolTable::jdk();
    let resolver = TypeResolver::new(unit, &symbols);
    MigrationPlan::build(&resolver, options)
}

fn type_decl(unit: &SourceUnit, name: &str) -> arkmig_java::NodeIndex {
    find_node(unit, |d| {
        matches!(
            d,
            NodeData::ClassDeclaration { name: n, .. } | NodeData::InterfaceDeclaration { name: n, .. }
                if n == name
        )
    })
}

const TEST_PKG: &str = "com.ohos.migrator.tests.java";

#[test]
fn test_companion_only_where_needed() {
    let unit = fixtures::test_interface();
    let plan = plan_for(&unit, &MigrationOptions::default());
    assert_eq!(
        plan.companion_of(type_decl(&unit, "test_interface")),
        Some("test_interfaceCompanion")
    );
    assert_eq!(plan.companion_of(type_decl(&unit, "iface_FP")), None);
    assert_eq!(plan.companion_of(type_decl(&unit, "iface_C")), None);
    assert_eq!(plan.companions().count(), 1);
    assert_eq!(
        plan.companion_named(&format!("{TEST_PKG}.test_interface")),
        Some("test_interfaceCompanion")
    );
}

#[test]
fn test_empty_private_body_is_hoisted() {
    let unit = fixtures::test_interface();
    let plan = plan_for(&unit, &MigrationOptions::default());
    assert_eq!(
        plan.private_counts(type_decl(&unit, "test_interface")),
        PrivateCounts {
            inlined: 0,
            hoisted: 1,
        }
    );
    assert_eq!(plan.private_counts(type_decl(&unit, "iface_FP")), PrivateCounts::default());
}

#[test]
fn test_overload_renames_follow_parameter_types() {
    let unit = fixtures::test_interface();
    let plan = plan_for(&unit, &MigrationOptions::default());
    let owner = format!("{TEST_PKG}.test_interface");
    let int = JavaType::primitive(PrimitiveType::Int);
    assert_eq!(plan.method_name(&owner, "foo", &[]), "foo");
    assert_eq!(plan.method_name(&owner, "foo", &[int]), "foo_int");
    assert_eq!(plan.method_name(&owner, "foo", &[JavaType::string()]), "foo_String");

    let iface_c = format!("{TEST_PKG}.iface_C");
    let double = JavaType::primitive(PrimitiveType::Double);
    assert_eq!(plan.renamed(&iface_c, "foo", &[double]), Some("foo_double"));
    assert_eq!(plan.renames().count(), 5);
}

#[test]
fn test_overloading_target_has_no_renames() {
    let unit = fixtures::test_interface();
    let options = MigrationOptions {
        target_overloading: true,
        ..MigrationOptions::default()
    };
    let plan = plan_for(&unit, &options);
    assert_eq!(plan.renames().count(), 0);
}

#[test]
fn test_hoisted_names_join_outer_and_inner() {
    let unit = fixtures::interface_nested();
    let plan = plan_for(&unit, &MigrationOptions::default());
    let a = type_decl(&unit, "A");
    assert!(plan.is_hoisted(a));
    assert_eq!(plan.type_name(a), Some("Test_A"));
    assert!(!plan.is_hoisted(type_decl(&unit, "Test")));
    assert_eq!(
        plan.target_type_name(&format!("{TEST_PKG}.TestClass.constants")),
        Some("TestClass_constants")
    );
    assert_eq!(
        plan.companion_of(type_decl(&unit, "constants")),
        Some("TestClass_constantsCompanion")
    );
}

#[test]
fn test_bounds_interface_named_after_owner() {
    let unit = fixtures::intersection_type();
    let plan = plan_for(&unit, &MigrationOptions::default());
    let param = find_node(&unit, |d| matches!(d, NodeData::TypeParameter { .. }));
    assert_eq!(plan.bound_interface(param), Some("intersection_type_TBounds"));
}

#[test]
fn test_contracts_only_for_single_supertype_targets() {
    let unit = fixtures::intersection_type();
    let aux = type_decl(&unit, "auxilliary");
    assert_eq!(plan_for(&unit, &MigrationOptions::default()).contract_of(aux), None);

    let options = MigrationOptions {
        single_supertype: true,
        ..MigrationOptions::default()
    };
    assert_eq!(plan_for(&unit, &options).contract_of(aux), Some("auxilliaryContract"));
}

const CLASH_JAVA: &str = r#"interface Units {
    int SCALE = 10;
}

class UnitsCompanion {}
"#;

fn clash() -> SourceUnit {
    let mut b = TreeBuilder::new("Units.java", CLASH_JAVA);
    let int = b.primitive(PrimitiveType::Int);
    let ten = b.int(10);
    let field = b.field_decl(Modifiers::empty(), int, "SCALE", Some(ten));
    let units = b.interface_decl(Modifiers::empty(), "Units", vec![], vec![field]);
    let existing = b.class_decl(Modifiers::empty(), "UnitsCompanion", None, vec![], vec![]);
    let root = b.compilation_unit(None, &[], vec![units, existing]);
    b.finish(root).expect("valid tree")
}

#[test]
fn test_synthesized_names_avoid_file_identifiers() {
    let unit = clash();
    let plan = plan_for(&unit, &MigrationOptions::default());
    assert!(plan.is_taken("UnitsCompanion"));
    assert_eq!(plan.companion_of(type_decl(&unit, "Units")), Some("UnitsCompanion1"));
    assert!(plan.is_taken("UnitsCompanion1"));
}

#[test]
fn test_plan_is_deterministic() {
    let unit = fixtures::test_interface();
    let options = MigrationOptions::default();
    let first: Vec<(String, String)> = plan_for(&unit, &options)
        .renames()
        .map(|(k, v)| (format!("{}.{}", k.owner, k.name), v.to_string()))
        .collect();
    for _ in 0..4 {
        let again: Vec<(String, String)> = plan_for(&unit, &options)
            .renames()
            .map(|(k, v)| (format!("{}.{}", k.owner, k.name), v.to_string()))
            .collect();
        assert_eq!(first, again);
    }
}
