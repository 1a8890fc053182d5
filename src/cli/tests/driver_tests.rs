use clap::Parser;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::args::CliArgs;
use super::driver::{
    EXIT_DIAGNOSTICS, EXIT_FAILURES, EXIT_SUCCESS, FileStatus, discover_inputs, load_symbols,
    output_path, resolve_run_options, run,
};
use arkmig_common::DiagnosticSeverity;
use arkmig_java::{SourceUnit, SymbolTable, fixtures};
use arkmig_lowering::PrivateMethodStrategy;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn write_unit(dir: &Path, name: &str, unit: &SourceUnit) -> PathBuf {
    write_file(dir, name, &unit.to_json(false).expect("unit serializes"))
}

fn args(list: &[&str]) -> CliArgs {
    let mut argv = vec!["arkmig"];
    argv.extend_from_slice(list);
    CliArgs::try_parse_from(argv).expect("args parse")
}

#[test]
fn discovers_json_units_recursively() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_file(root, "units/b.json", "{}");
    write_file(root, "units/a.json", "{}");
    write_file(root, "units/nested/c.json", "{}");
    write_file(root, "units/arkmig.json", "{}");
    write_file(root, "units/notes.txt", "");
    let single = write_file(root, "single.json", "{}");

    let found = discover_inputs(&[root.join("units"), single.clone(), root.join("units/a.json")])
        .expect("inputs exist");
    assert_eq!(
        found,
        vec![
            root.join("units/a.json"),
            root.join("units/b.json"),
            root.join("units/nested/c.json"),
            single,
        ]
    );
}

#[test]
fn missing_input_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let err = discover_inputs(&[temp.path().join("nope")]).expect_err("missing");
    assert!(err.to_string().contains("input not found"));
}

#[test]
fn output_path_stays_inside_out_dir() {
    let out = Path::new("/out");
    assert_eq!(
        output_path(Some(out), Path::new("/in/x.json"), "pkg/Foo.java"),
        PathBuf::from("/out/pkg/Foo.ets")
    );
    assert_eq!(
        output_path(Some(out), Path::new("/in/x.json"), "../../etc/Foo.java"),
        PathBuf::from("/out/etc/Foo.ets")
    );
    assert_eq!(
        output_path(None, Path::new("/in/x.json"), "Foo.java"),
        PathBuf::from("/in/x.ets")
    );
}

#[test]
fn load_symbols_merges_over_jdk() {
    let temp = TempDir::new().expect("temp dir");
    let jdk = SymbolTable::jdk();
    assert_eq!(load_symbols(None).expect("built-in").len(), jdk.len());

    let path = write_file(
        temp.path(),
        "symbols.json",
        r#"{ "types": [] }"#,
    );
    assert_eq!(load_symbols(Some(&path)).expect("empty table").len(), jdk.len());

    let bad = write_file(temp.path(), "bad.json", "[1, 2]");
    assert!(load_symbols(Some(&bad)).is_err());
}

#[test]
fn run_migrates_and_writes_outputs() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_unit(root, "units/if.json", &fixtures::if_statements());
    write_unit(root, "units/calls.json", &fixtures::call_rules());

    let report = run(&args(&["--out-dir", "ets", "units"]), root).expect("run succeeds");
    assert_eq!(report.files.len(), 2);
    assert!(report.files.iter().all(|f| f.status == FileStatus::Migrated));
    // Discovery order is sorted by path
    assert_eq!(report.files[0].file, "CallExpressionRules2.java");
    assert_eq!(report.files[1].file, "if.java");
    assert_eq!(report.count(DiagnosticSeverity::Error), 0);
    assert_eq!(report.exit_code(), EXIT_SUCCESS);

    let if_out = root.join("ets/if.ets");
    assert_eq!(report.files[1].output.as_deref(), Some(if_out.as_path()));
    let text = std::fs::read_to_string(&if_out).expect("output written");
    assert!(text.contains("class IfTest"), "{text}");
    assert!(root.join("ets/CallExpressionRules2.ets").is_file());
    assert!(report.sources.contains_key("if.java"));
}

#[test]
fn run_without_out_dir_writes_next_to_input() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_unit(root, "if.json", &fixtures::if_statements());

    let report = run(&args(&["if.json"]), root).expect("run succeeds");
    assert_eq!(report.files[0].output.as_deref(), Some(root.join("if.ets").as_path()));
    assert!(root.join("if.ets").is_file());
}

#[test]
fn no_emit_only_reports() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_unit(root, "units/iface.json", &fixtures::test_interface());

    let report = run(&args(&["--no-emit", "--out-dir", "ets", "units"]), root)
        .expect("run succeeds");
    assert!(report.files[0].output.is_none());
    assert!(!root.join("ets").exists());
    // The interface initializer block is an error, but the file still migrates
    assert_eq!(report.files[0].status, FileStatus::Migrated);
    assert!(report.count(DiagnosticSeverity::Error) >= 1);
    assert_eq!(report.exit_code(), EXIT_DIAGNOSTICS);
}

#[test]
fn unreadable_input_does_not_stop_the_run() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_file(root, "units/a_bad.json", r#"{ "fileName": "Bad.java" }"#);
    write_unit(root, "units/b_if.json", &fixtures::if_statements());

    let report = run(&args(&["--no-emit", "units"]), root).expect("run succeeds");
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].status, FileStatus::Unreadable);
    assert!(report.files[0].error.as_deref().is_some_and(|e| e.contains("a_bad.json")));
    assert_eq!(report.files[1].status, FileStatus::Migrated);
    assert_eq!(report.exit_code(), EXIT_FAILURES);
}

#[test]
fn config_in_working_directory_is_applied() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_file(
        root,
        "arkmig.json",
        r#"{ "outDir": "from-config", "migration": { "privateMethods": "hoist" } }"#,
    );
    write_unit(root, "if.json", &fixtures::if_statements());

    let (config, options) = resolve_run_options(&args(&["if.json"]), root).expect("config loads");
    assert_eq!(options.private_methods, PrivateMethodStrategy::Hoist);
    assert_eq!(config.out_dir_path(), Some(root.join("from-config")));

    let report = run(&args(&["if.json"]), root).expect("run succeeds");
    assert!(root.join("from-config/if.ets").is_file());
    assert_eq!(report.exit_code(), EXIT_SUCCESS);
}

#[test]
fn invalid_config_stops_before_any_file() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    write_file(root, "arkmig.json", r#"{ "migration": { "nestedTypes": "flatten" } }"#);
    write_unit(root, "if.json", &fixtures::if_statements());

    assert!(run(&args(&["if.json"]), root).is_err());
    assert!(!root.join("if.ets").exists());
}

#[test]
fn jobs_limit_gives_same_results() {
    let temp = TempDir::new().expect("temp dir");
    let root = temp.path();
    for (i, unit) in fixtures::all().iter().enumerate() {
        write_unit(root, &format!("units/{i}.json"), unit);
    }

    let single = run(&args(&["--no-emit", "-j", "1", "units"]), root).expect("one thread");
    let many = run(&args(&["--no-emit", "units"]), root).expect("default threads");
    assert_eq!(single.files.len(), fixtures::all().len());
    for (a, b) in single.files.iter().zip(&many.files) {
        assert_eq!(a.file, b.file);
        assert_eq!(a.diagnostics, b.diagnostics);
    }
}
