//! One `arkmig` run: discover inputs, load them, migrate in parallel, write
//! `.ets` outputs and collect per-file reports.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, info_span, warn};
use walkdir::WalkDir;

use super::args::CliArgs;
use super::config::{
    ArkmigConfig, CONFIG_FILE_NAME, apply_args, find_config, load_config, resolve_options,
};
use arkmig_common::{Diagnostic, DiagnosticSeverity};
use arkmig_java::{SourceUnit, SymbolTable};
use arkmig_lowering::{
    CancellationToken, FileOutcome, MigrationOptions, MigrationStats, migrate_files,
};

/// Every file produced output and no diagnostic is an error.
pub const EXIT_SUCCESS: i32 = 0;
/// All files were migrated, some with error diagnostics.
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// Some input could not be read or migrated at all.
pub const EXIT_FAILURES: i32 = 2;

const OUTPUT_EXTENSION: &str = "ets";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Migrated,
    /// The input was not a readable, valid source unit.
    Unreadable,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Java file name recorded in the unit, or the input path when unreadable.
    pub file: String,
    pub input: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<MigrationStats>,
}

#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Source text by file name, for diagnostic snippets.
    #[serde(skip)]
    pub sources: HashMap<String, String>,
}

impl RunReport {
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics().filter(|d| d.severity == severity).count()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files.iter().flat_map(|f| f.diagnostics.iter())
    }

    pub fn with_status(&self, status: FileStatus) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| f.status == status)
    }

    pub fn exit_code(&self) -> i32 {
        if self.files.iter().any(|f| f.status != FileStatus::Migrated) {
            EXIT_FAILURES
        } else if self.count(DiagnosticSeverity::Error) > 0 {
            EXIT_DIAGNOSTICS
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Expand directories into the `.json` units below them, sorted by path.
/// Explicit file arguments are kept as given. Duplicates are dropped.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input not found: {}", input.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_unit_file(path) {
                continue;
            }
            found.push(path.to_path_buf());
        }
        found.sort();
        debug!(dir = %input.display(), count = found.len(), "discovered inputs");
        files.extend(found);
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
    Ok(files)
}

fn is_unit_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
        && path.file_name().is_some_and(|name| name != CONFIG_FILE_NAME)
}

/// Built-in JDK symbols, overlaid with the front end's table when given.
pub fn load_symbols(path: Option<&Path>) -> Result<SymbolTable> {
    let mut symbols = SymbolTable::jdk();
    if let Some(path) = path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read symbol table {}", path.display()))?;
        let table = SymbolTable::from_json(&text)
            .with_context(|| format!("invalid symbol table {}", path.display()))?;
        info!(path = %path.display(), types = table.len(), "loaded symbol table");
        symbols.merge(&table);
    }
    Ok(symbols)
}

fn load_unit(path: &Path) -> Result<SourceUnit> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SourceUnit::from_json(&text).with_context(|| format!("invalid source unit {}", path.display()))
}

/// Where the migrated text of `file_name` goes.
///
/// With an output directory the unit's own relative file name is kept, minus
/// any root or `..` components. Without one the output sits next to the input.
pub fn output_path(out_dir: Option<&Path>, input: &Path, file_name: &str) -> PathBuf {
    match out_dir {
        Some(dir) => {
            let relative: PathBuf = Path::new(file_name)
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect();
            dir.join(relative).with_extension(OUTPUT_EXTENSION)
        }
        None => input.with_extension(OUTPUT_EXTENSION),
    }
}

/// Resolve configuration and options for a run started in `cwd`.
pub fn resolve_run_options(
    args: &CliArgs,
    cwd: &Path,
) -> Result<(ArkmigConfig, MigrationOptions)> {
    let config = match find_config(args.config.as_deref(), cwd) {
        Some(path) => load_config(&cwd.join(&path))
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ArkmigConfig::default(),
    };
    let mut options = resolve_options(&config)?;
    apply_args(&mut options, args)?;
    Ok((config, options))
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunReport> {
    let _span = info_span!("arkmig_run").entered();
    let (config, options) = resolve_run_options(args, cwd)?;
    debug!(?options, "resolved migration options");

    let symbols_path = args
        .symbols
        .as_ref()
        .map(|p| cwd.join(p))
        .or_else(|| config.symbols_path().map(|p| cwd.join(p)));
    let symbols = load_symbols(symbols_path.as_deref())?;

    let out_dir = if args.no_emit {
        None
    } else {
        args.out_dir
            .as_ref()
            .map(|p| cwd.join(p))
            .or_else(|| config.out_dir_path().map(|p| cwd.join(p)))
    };

    let inputs: Vec<PathBuf> = args.inputs.iter().map(|p| cwd.join(p)).collect();
    let paths = discover_inputs(&inputs)?;
    info!(files = paths.len(), "migrating");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.unwrap_or(0))
        .build()
        .context("failed to start worker pool")?;

    let token = CancellationToken::new();
    let (loaded, outcomes) = pool.install(|| -> Result<_> {
        let loaded: Vec<(PathBuf, Result<SourceUnit>)> = paths
            .par_iter()
            .map(|path| (path.clone(), load_unit(path)))
            .collect();
        let units: Vec<SourceUnit> = loaded
            .iter()
            .filter_map(|(_, unit)| unit.as_ref().ok().cloned())
            .collect();
        let outcomes = migrate_files(&units, &symbols, &options, &token)?;
        Ok((loaded, outcomes))
    })?;

    let mut report = RunReport::default();
    let mut outcomes = outcomes.into_iter();
    for (input, unit) in loaded {
        let unit = match unit {
            Ok(unit) => unit,
            Err(error) => {
                warn!(input = %input.display(), %error, "skipping unreadable input");
                report.files.push(FileReport {
                    file: input.display().to_string(),
                    input,
                    status: FileStatus::Unreadable,
                    output: None,
                    error: Some(format!("{error:#}")),
                    diagnostics: Vec::new(),
                    stats: None,
                });
                continue;
            }
        };
        let Some(outcome) = outcomes.next() else {
            bail!("missing migration outcome for {}", input.display());
        };
        report
            .sources
            .insert(unit.file_name().to_string(), unit.text().to_string());

        let file_report = match outcome {
            FileOutcome::Migrated(result) => {
                let output = if args.no_emit {
                    None
                } else {
                    let path = output_path(out_dir.as_deref(), &input, &result.file);
                    write_output(&path, &result.render())?;
                    Some(path)
                };
                FileReport {
                    file: result.file,
                    input,
                    status: FileStatus::Migrated,
                    output,
                    error: None,
                    diagnostics: result.diagnostics,
                    stats: Some(result.stats),
                }
            }
            FileOutcome::Failed { file, error } => FileReport {
                file,
                input,
                status: FileStatus::Failed,
                output: None,
                error: Some(error.to_string()),
                diagnostics: Vec::new(),
                stats: None,
            },
            FileOutcome::Cancelled { file } => FileReport {
                file,
                input,
                status: FileStatus::Cancelled,
                output: None,
                error: None,
                diagnostics: Vec::new(),
                stats: None,
            },
        };
        report.files.push(file_report);
    }
    Ok(report)
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "wrote output");
    Ok(())
}
