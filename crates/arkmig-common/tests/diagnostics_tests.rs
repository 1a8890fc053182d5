use super::*;
use crate::position::Position;

fn loc(line: u32, column: u32) -> SourceLocation {
    SourceLocation::new("Test.java", Position::new(line, column))
}

#[test]
fn test_format_message_replaces_placeholders() {
    assert_eq!(
        format_message("Overloaded method '{0}' was renamed to '{1}'.", &["foo", "foo_int"]),
        "Overloaded method 'foo' was renamed to 'foo_int'."
    );
    assert_eq!(format_message("no args", &["unused"]), "no args");
}

#[test]
fn test_every_code_has_exactly_one_message() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total, "duplicate diagnostic codes in table");
}

#[test]
fn test_from_code_uses_table_severity() {
    let diag = Diagnostic::from_code(
        diagnostic_codes::INTERSECTION_CAST_NARROWED,
        loc(3, 22),
        &["Runnable & Something", "Runnable", "Something"],
    );
    assert_eq!(diag.severity, DiagnosticSeverity::Warning);
    assert_eq!(diag.line, 3);
    assert_eq!(diag.column, 22);
    assert!(diag.message.contains("dropped bound(s): Something"));
}

#[test]
fn test_from_unknown_code_is_error() {
    let diag = Diagnostic::from_code(9999, loc(1, 1), &["mystery", "code"]);
    assert!(diag.is_error());
    assert_eq!(diag.message, "mystery code");
}

#[test]
fn test_severity_ordering() {
    assert!(DiagnosticSeverity::Error > DiagnosticSeverity::Warning);
    assert!(DiagnosticSeverity::Warning > DiagnosticSeverity::Info);
}

#[test]
fn test_diagnostic_json_shape() {
    let diag = Diagnostic::from_code(diagnostic_codes::NO_APPLICABLE_RULE, loc(7, 2), &["try"]);
    let json = serde_json::to_value(&diag).expect("serialize diagnostic");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["code"], 1001);
    assert_eq!(json["file"], "Test.java");
    assert_eq!(json["line"], 7);
    assert_eq!(json["column"], 2);
    assert!(json["message"].as_str().is_some_and(|m| m.contains("try")));
}

#[test]
fn test_collector_is_append_only_and_counts() {
    let mut collector = DiagnosticCollector::new("Test.java");
    collector.report(
        diagnostic_codes::OVERLOAD_RENAMED,
        Position::new(4, 5),
        &["foo(int)", "foo_int"],
    );
    collector.report(
        diagnostic_codes::INTERFACE_INITIALIZER_NOT_SUPPORTED,
        Position::new(9, 5),
        &["iface_C"],
    );
    collector.report(
        diagnostic_codes::OVERLOAD_RENAMED,
        Position::new(5, 5),
        &["foo(String)", "foo_String"],
    );

    assert_eq!(collector.len(), 3);
    assert_eq!(collector.count(DiagnosticSeverity::Info), 2);
    assert_eq!(collector.count(DiagnosticSeverity::Error), 1);
    assert!(collector.has_errors());
    assert_eq!(
        collector.with_code(diagnostic_codes::OVERLOAD_RENAMED).count(),
        2
    );

    // Insertion order is preserved
    let lines: Vec<u32> = collector.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![4, 9, 5]);
    assert!(collector.iter().all(|d| d.file == "Test.java"));
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::from_code(diagnostic_codes::RAW_TYPE_MIGRATED, loc(2, 9), &["List", "Array<Object>"]);
    assert_eq!(
        diag.to_string(),
        "Test.java:2:9 - info AM3005: Raw type 'List' was migrated as 'Array<Object>'."
    );
}
