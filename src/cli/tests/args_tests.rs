use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, ColorMode, NestedTypes, OutputFormat, PrivateMethods};
use arkmig_lowering::{NestedTypePolicy, PrivateMethodStrategy};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["arkmig", "units"]).expect("default args should parse");

    assert_eq!(args.inputs, vec![PathBuf::from("units")]);
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.color, ColorMode::Auto);
    assert!(args.config.is_none());
    assert!(args.symbols.is_none());
    assert!(args.out_dir.is_none());
    assert!(args.jobs.is_none());
    assert!(args.private_methods.is_none());
    assert!(!args.no_emit);
    assert!(!args.pretty);
    assert!(!args.target_overloading);
}

#[test]
fn requires_an_input() {
    assert!(CliArgs::try_parse_from(["arkmig"]).is_err());
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "arkmig",
        "--out-dir",
        "ets",
        "--config",
        "conf/arkmig.json",
        "--symbols",
        "symbols.json",
        "--format",
        "json",
        "--pretty",
        "-j",
        "4",
        "--no-emit",
        "--color",
        "never",
        "a.json",
        "more",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("ets")));
    assert_eq!(
        args.config.as_deref(),
        Some(std::path::Path::new("conf/arkmig.json"))
    );
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.pretty);
    assert_eq!(args.jobs, Some(4));
    assert!(args.no_emit);
    assert_eq!(args.color, ColorMode::Never);
    assert_eq!(
        args.inputs,
        vec![PathBuf::from("a.json"), PathBuf::from("more")]
    );
}

#[test]
fn parses_policy_flags() {
    let args = CliArgs::try_parse_from([
        "arkmig",
        "--private-methods",
        "hoist",
        "--nested-types",
        "preserve",
        "--single-supertype",
        "--max-depth",
        "64",
        "a.json",
    ])
    .expect("policy args should parse");

    assert_eq!(args.private_methods, Some(PrivateMethods::Hoist));
    assert_eq!(args.nested_types, Some(NestedTypes::Preserve));
    assert!(args.single_supertype);
    assert!(!args.intersection_bounds);
    assert_eq!(args.max_depth, Some(64));

    assert_eq!(
        PrivateMethodStrategy::from(PrivateMethods::Hoist),
        PrivateMethodStrategy::Hoist
    );
    assert_eq!(
        NestedTypePolicy::from(NestedTypes::Preserve),
        NestedTypePolicy::Preserve
    );
}

#[test]
fn rejects_unknown_policy() {
    let result = CliArgs::try_parse_from(["arkmig", "--private-methods", "inline-all", "a.json"]);
    assert!(result.is_err());
}
