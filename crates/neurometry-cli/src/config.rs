//! TOML configuration deserialisation for extraction jobs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use neurometry_core::TypeFilter;
use neurometry_features::{ExtractOptions, Feature};
use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub morphology: MorphologyConfig,
    #[serde(default)]
    pub extraction: ExtractOptions,
    /// Features to extract. Empty means every built-in over all neurites.
    #[serde(default, rename = "feature")]
    pub features: Vec<FeatureConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the morphology comes from.
#[derive(Debug, Deserialize)]
pub struct MorphologyConfig {
    /// `.swc` or `.json` file. Relative paths resolve against the job file.
    pub file: PathBuf,
}

/// A single feature request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureConfig {
    pub name: String,
    /// Branch type to select, or "all" (default).
    #[serde(default)]
    pub neurite_type: TypeFilter,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to also save results as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

impl JobConfig {
    /// The configured feature requests, or every built-in when none are given.
    pub fn requests(&self) -> Vec<FeatureConfig> {
        if !self.features.is_empty() {
            return self.features.clone();
        }
        Feature::ALL
            .iter()
            .map(|f| FeatureConfig { name: f.name().to_string(), neurite_type: TypeFilter::All })
            .collect()
    }

    /// The morphology path, resolved against the directory holding the job file.
    pub fn morphology_path(&self, job_dir: &Path) -> PathBuf {
        if self.morphology.file.is_absolute() {
            self.morphology.file.clone()
        } else {
            job_dir.join(&self.morphology.file)
        }
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Reading job file {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)
        .with_context(|| format!("Parsing job file {}", path.display()))?;
    Ok(config)
}
