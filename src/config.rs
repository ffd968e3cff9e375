use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::output::OutputFormat;
use crate::sweep::{default_r_lock_values, ParameterSweep, DEFAULT_A_VALUES};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sweep: SweepConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    pub n_values: Vec<i64>,
    pub a_values: Vec<f64>,
    pub r_lock_values: Vec<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_values: vec![4, 7, 11],
            a_values: DEFAULT_A_VALUES.to_vec(),
            r_lock_values: default_r_lock_values(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Decimal places for table and CSV output
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 6,
        }
    }
}

/// Sweep overrides coming from the command line. `None` keeps the config value.
#[derive(Debug, Clone, Default)]
pub struct SweepArgs {
    pub n_values: Option<Vec<i64>>,
    pub a_values: Option<Vec<f64>>,
    pub r_lock_values: Option<Vec<f64>>,
    pub format: Option<OutputFormat>,
    pub precision: Option<usize>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/recursive-field/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("recursive-field").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file is missing, logs a warning on parse errors.
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_if_present(&Self::default_path()?)
    }

    /// Like [`load`](Self::load) but a missing or unparsable file gives None
    pub fn load_if_present(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                None
            }
        }
    }

    /// Write the config template to the XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# recursive-field configuration

[sweep]
# Indices to evaluate (must be positive)
n_values = [4, 7, 11]
# Scale factors a in r = a * sqrt(n)
a_values = [3.0]
# Reference radii for phi_ratio and delta_r (omit for [sqrt(3)])
# r_lock_values = [1.7320508075688772, 2.23606797749979]

[output]
# Output format: "table", "csv" or "json"
format = "table"
# Decimal places for table and csv output
precision = 6
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &SweepArgs) {
        if let Some(ref n) = args.n_values {
            self.sweep.n_values = n.clone();
        }
        if let Some(ref a) = args.a_values {
            self.sweep.a_values = a.clone();
        }
        if let Some(ref r) = args.r_lock_values {
            self.sweep.r_lock_values = r.clone();
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(precision) = args.precision {
            self.output.precision = precision;
        }
    }

    pub fn to_sweep(&self) -> ParameterSweep {
        ParameterSweep::new(
            self.sweep.n_values.clone(),
            Some(self.sweep.a_values.clone()),
            Some(self.sweep.r_lock_values.clone()),
        )
    }
}

/// Longest range `parse_index_list` will expand.
pub const MAX_RANGE_LEN: i128 = 10_000_000;

/// Parse an index list such as `"1..5,8,13"`. Ranges are inclusive.
pub fn parse_index_list(s: &str) -> Result<Vec<i64>, String> {
    let mut values = Vec::new();
    for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.split_once("..") {
            Some((start, end)) => {
                let start = parse_index(start, token)?;
                let end = parse_index(end.trim_start_matches('='), token)?;
                if start > end {
                    return Err(format!("Empty index range '{}'", token));
                }
                if end as i128 - start as i128 >= MAX_RANGE_LEN {
                    return Err(format!("Index range '{}' too large", token));
                }
                values.extend(start..=end);
            }
            None => values.push(parse_index(token, token)?),
        }
    }
    if values.is_empty() {
        return Err(format!("No indices in '{}'", s));
    }
    Ok(values)
}

fn parse_index(s: &str, token: &str) -> Result<i64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("Invalid index '{}' in '{}'", s.trim(), token))
}
