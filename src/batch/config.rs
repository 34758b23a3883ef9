use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    pub inputs: Vec<InputConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "default_precision")]
    pub precision: f64,
    pub max_probes: Option<usize>,
    /// Use the R-tree distance engine
    #[serde(default = "default_indexed")]
    pub indexed: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            max_probes: None,
            indexed: default_indexed(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub name: String,
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    /// Overrides the global precision
    pub precision: Option<f64>,
}

pub fn default_precision() -> f64 {
    0.001
}

fn default_indexed() -> bool {
    true
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl InputConfig {
    pub fn precision(&self, global: &GlobalConfig) -> f64 {
        self.precision.unwrap_or(global.precision)
    }
}
