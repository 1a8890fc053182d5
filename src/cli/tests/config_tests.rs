use clap::Parser;
use std::path::Path;
use tempfile::TempDir;

use super::args::CliArgs;
use super::config::{
    CONFIG_FILE_NAME, ConfigError, apply_args, find_config, load_config, parse_config,
    resolve_options,
};
use arkmig_lowering::{MigrationOptions, NestedTypePolicy, PrivateMethodStrategy};

fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("failed to write test file");
}

#[test]
fn empty_config_keeps_defaults() {
    let config = parse_config("{}").expect("empty object parses");
    assert!(config.migration.is_none());
    assert_eq!(
        resolve_options(&config).expect("defaults"),
        MigrationOptions::default()
    );
}

#[test]
fn migration_section_overrides_defaults() {
    let config = parse_config(
        r#"{
          "migration": {
            "privateMethods": "Hoist",
            "nestedTypes": "preserve",
            "targetOverloading": true,
            "singleSupertype": "yes",
            "intersectionBounds": "false",
            "maxDepth": 32
          }
        }"#,
    )
    .expect("config parses");
    let options = resolve_options(&config).expect("valid values");

    assert_eq!(options.private_methods, PrivateMethodStrategy::Hoist);
    assert_eq!(options.nested_types, NestedTypePolicy::Preserve);
    assert!(options.target_overloading);
    assert!(options.single_supertype);
    assert!(!options.intersection_bounds);
    assert_eq!(options.max_depth, 32);
}

#[test]
fn rejects_unknown_strategy() {
    let config = parse_config(r#"{ "migration": { "privateMethods": "sometimes" } }"#)
        .expect("strings parse");
    let err = resolve_options(&config).expect_err("unknown strategy");
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "privateMethods",
            ..
        }
    ));
    assert!(err.to_string().contains("'sometimes'"));
}

#[test]
fn rejects_bad_boolean_and_zero_depth() {
    let err = parse_config(r#"{ "migration": { "singleSupertype": "maybe" } }"#)
        .expect_err("not a boolean");
    assert!(matches!(err, ConfigError::Json(_)));

    let config = parse_config(r#"{ "migration": { "maxDepth": 0 } }"#).expect("parses");
    assert!(matches!(resolve_options(&config), Err(ConfigError::ZeroDepth)));
}

#[test]
fn command_line_wins_over_file() {
    let config = parse_config(
        r#"{ "migration": { "privateMethods": "inline", "maxDepth": 32 } }"#,
    )
    .expect("config parses");
    let mut options = resolve_options(&config).expect("valid values");

    let args = CliArgs::try_parse_from([
        "arkmig",
        "--private-methods",
        "hoist",
        "--intersection-bounds",
        "a.json",
    ])
    .expect("args parse");
    apply_args(&mut options, &args).expect("valid overrides");

    assert_eq!(options.private_methods, PrivateMethodStrategy::Hoist);
    assert!(options.intersection_bounds);
    assert_eq!(options.max_depth, 32);

    let args = CliArgs::try_parse_from(["arkmig", "--max-depth", "0", "a.json"]).expect("parses");
    assert!(matches!(
        apply_args(&mut options, &args),
        Err(ConfigError::ZeroDepth)
    ));
}

#[test]
fn load_config_resolves_paths_against_its_directory() {
    let temp = TempDir::new().expect("temp dir");
    let conf_dir = temp.path().join("conf");
    std::fs::create_dir_all(&conf_dir).expect("create conf dir");
    write_file(
        &conf_dir,
        CONFIG_FILE_NAME,
        r#"{ "symbols": "symbols.json", "outDir": "../ets" }"#,
    );

    let config = load_config(&conf_dir.join(CONFIG_FILE_NAME)).expect("config loads");
    assert_eq!(config.symbols_path(), Some(conf_dir.join("symbols.json")));
    assert_eq!(config.out_dir_path(), Some(conf_dir.join("../ets")));
}

#[test]
fn load_config_reports_missing_file() {
    let temp = TempDir::new().expect("temp dir");
    let err = load_config(&temp.path().join("missing.json")).expect_err("no such file");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn find_config_prefers_explicit_path() {
    let temp = TempDir::new().expect("temp dir");
    assert_eq!(find_config(None, temp.path()), None);

    write_file(temp.path(), CONFIG_FILE_NAME, "{}");
    assert_eq!(
        find_config(None, temp.path()),
        Some(temp.path().join(CONFIG_FILE_NAME))
    );

    let explicit = Path::new("other.json");
    assert_eq!(
        find_config(Some(explicit), temp.path()),
        Some(explicit.to_path_buf())
    );
}
