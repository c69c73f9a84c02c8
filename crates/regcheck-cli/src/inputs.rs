//! Command-line inputs: registry arguments and configuration loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use regcheck_ingest::load_registry;
use regcheck_model::{MatchConfig, RegistryMatrix, Thresholds};

/// A `--registry` value: `PATH` or `LABEL=PATH`.
///
/// The label names the source in `SOURCE` / `MIN_source`; without one the
/// file stem is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryArg {
    pub label: Option<String>,
    pub path: PathBuf,
}

impl FromStr for RegistryArg {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err("registry path is empty".to_string());
        }
        match value.split_once('=') {
            Some((label, path)) if !label.trim().is_empty() => {
                let path = path.trim();
                if path.is_empty() {
                    return Err(format!("registry '{}' has no path", label.trim()));
                }
                Ok(Self {
                    label: Some(label.trim().to_string()),
                    path: PathBuf::from(path),
                })
            }
            _ => Ok(Self {
                label: None,
                path: PathBuf::from(value),
            }),
        }
    }
}

impl fmt::Display for RegistryArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}={}", self.path.display()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Reads every registry matrix, in argument order.
pub fn load_sources(args: &[RegistryArg]) -> Result<Vec<RegistryMatrix>> {
    args.iter()
        .map(|arg| {
            load_registry(&arg.path, arg.label.as_deref())
                .with_context(|| format!("load registry {arg}"))
        })
        .collect()
}

/// Loads a JSON configuration file, or the defaults when `path` is `None`.
/// Missing keys keep their default values.
pub fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: MatchConfig =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}

/// Applies `--alta` / `--baja` on top of the configured thresholds.
pub fn apply_threshold_overrides(
    config: MatchConfig,
    alta: Option<f64>,
    baja: Option<f64>,
) -> Result<MatchConfig> {
    if alta.is_none() && baja.is_none() {
        return Ok(config);
    }
    let current = config.thresholds;
    let thresholds = Thresholds::new(alta.unwrap_or(current.alta), baja.unwrap_or(current.baja))
        .context("invalid --alta/--baja")?;
    Ok(config.with_thresholds(thresholds))
}
