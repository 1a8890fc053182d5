use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use arkmig_lowering::{NestedTypePolicy, PrivateMethodStrategy};

/// CLI arguments for the arkmig binary.
#[derive(Parser, Debug)]
#[command(
    name = "arkmig",
    version,
    about = "Rule-based structural migration of Java source trees to ArkTS"
)]
pub struct CliArgs {
    /// Source-unit JSON files, or directories searched for them.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Symbol table JSON from the front end, merged over the built-in JDK subset.
    #[arg(long)]
    pub symbols: Option<PathBuf>,

    /// Path to an arkmig.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Directory for migrated .ets files.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Worker threads for per-file parallelism (default: one per core).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Report diagnostics without writing migrated files.
    #[arg(long = "no-emit", alias = "noEmit")]
    pub no_emit: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// When to colour text output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    // ==================== Migration Policies ====================
    /// How private interface methods are migrated.
    #[arg(long = "private-methods", value_enum)]
    pub private_methods: Option<PrivateMethods>,

    /// Where nested type declarations end up.
    #[arg(long = "nested-types", value_enum)]
    pub nested_types: Option<NestedTypes>,

    /// The target supports method overloading; skip overload renames.
    #[arg(long = "target-overloading")]
    pub target_overloading: bool,

    /// The target allows one supertype per declaration.
    #[arg(long = "single-supertype")]
    pub single_supertype: bool,

    /// The target accepts intersection constraints on type parameters.
    #[arg(long = "intersection-bounds")]
    pub intersection_bounds: bool,

    /// Nesting limit for the dispatcher.
    #[arg(long = "max-depth")]
    pub max_depth: Option<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrivateMethods {
    Auto,
    Inline,
    Hoist,
}

impl From<PrivateMethods> for PrivateMethodStrategy {
    fn from(value: PrivateMethods) -> Self {
        match value {
            PrivateMethods::Auto => PrivateMethodStrategy::Auto,
            PrivateMethods::Inline => PrivateMethodStrategy::Inline,
            PrivateMethods::Hoist => PrivateMethodStrategy::Hoist,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NestedTypes {
    Hoist,
    Preserve,
}

impl From<NestedTypes> for NestedTypePolicy {
    fn from(value: NestedTypes) -> Self {
        match value {
            NestedTypes::Hoist => NestedTypePolicy::Hoist,
            NestedTypes::Preserve => NestedTypePolicy::Preserve,
        }
    }
}
