//! `arkmig.json` loading and option resolution.
//!
//! ```json
//! {
//!   "symbols": "build/symbols.json",
//!   "outDir": "ets",
//!   "migration": {
//!     "privateMethods": "hoist",
//!     "nestedTypes": "hoist",
//!     "targetOverloading": false,
//!     "singleSupertype": "true",
//!     "maxDepth": 256
//!   }
//! }
//! ```
//!
//! Paths are relative to the directory holding the file. Command-line flags
//! override file values.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::args::CliArgs;
use arkmig_lowering::{MigrationOptions, NestedTypePolicy, PrivateMethodStrategy};

pub const CONFIG_FILE_NAME: &str = "arkmig.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value '{value}' for '{key}'; expected one of: {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("'maxDepth' must be at least 1")]
    ZeroDepth,
}

/// Accepts `true` as well as `"true"`, the way hand-edited configs tend to
/// spell booleans.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArkmigConfig {
    #[serde(default)]
    pub symbols: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub migration: Option<MigrationConfig>,
    /// Directory the file was loaded from; relative paths resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    #[serde(default)]
    pub private_methods: Option<String>,
    #[serde(default)]
    pub nested_types: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub target_overloading: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub single_supertype: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub intersection_bounds: Option<bool>,
    #[serde(default)]
    pub max_depth: Option<u32>,
}

pub fn parse_config(text: &str) -> Result<ArkmigConfig, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_config(path: &Path) -> Result<ArkmigConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text)?;
    config.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

/// The explicit `--config` file, else `arkmig.json` in `cwd` when present.
pub fn find_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

impl ArkmigConfig {
    pub fn symbols_path(&self) -> Option<PathBuf> {
        self.symbols.as_deref().map(|p| self.resolve_path(p))
    }

    pub fn out_dir_path(&self) -> Option<PathBuf> {
        self.out_dir.as_deref().map(|p| self.resolve_path(p))
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path),
            None => PathBuf::from(path),
        }
    }
}

/// Defaults overlaid with the file's `migration` section.
pub fn resolve_options(config: &ArkmigConfig) -> Result<MigrationOptions, ConfigError> {
    let mut options = MigrationOptions::default();
    let Some(migration) = &config.migration else {
        return Ok(options);
    };

    if let Some(value) = &migration.private_methods {
        options.private_methods = match value.trim().to_lowercase().as_str() {
            "auto" => PrivateMethodStrategy::Auto,
            "inline" => PrivateMethodStrategy::Inline,
            "hoist" => PrivateMethodStrategy::Hoist,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "privateMethods",
                    value: value.clone(),
                    expected: "auto, inline, hoist",
                });
            }
        };
    }
    if let Some(value) = &migration.nested_types {
        options.nested_types = match value.trim().to_lowercase().as_str() {
            "hoist" => NestedTypePolicy::Hoist,
            "preserve" => NestedTypePolicy::Preserve,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "nestedTypes",
                    value: value.clone(),
                    expected: "hoist, preserve",
                });
            }
        };
    }
    if let Some(flag) = migration.target_overloading {
        options.target_overloading = flag;
    }
    if let Some(flag) = migration.single_supertype {
        options.single_supertype = flag;
    }
    if let Some(flag) = migration.intersection_bounds {
        options.intersection_bounds = flag;
    }
    if let Some(depth) = migration.max_depth {
        if depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        options.max_depth = depth;
    }
    Ok(options)
}

/// Command-line flags win over the configuration file. Boolean flags can
/// only switch a capability on.
pub fn apply_args(options: &mut MigrationOptions, args: &CliArgs) -> Result<(), ConfigError> {
    if let Some(strategy) = args.private_methods {
        options.private_methods = strategy.into();
    }
    if let Some(policy) = args.nested_types {
        options.nested_types = policy.into();
    }
    options.target_overloading |= args.target_overloading;
    options.single_supertype |= args.single_supertype;
    options.intersection_bounds |= args.intersection_bounds;
    if let Some(depth) = args.max_depth {
        if depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        options.max_depth = depth;
    }
    Ok(())
}
