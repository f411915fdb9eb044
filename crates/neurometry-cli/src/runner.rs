//! Job runner: loads the morphology, evaluates features, writes results.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use neurometry_core::{Morphology, MorphologyRecord, TypeFilter};
use neurometry_features::ExtractOptions;
use neurometry_geometry::parsers::swc::read_swc;

use crate::config::{FeatureConfig, JobConfig};

/// Values of one requested feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureValues {
    pub name: String,
    pub neurite_type: TypeFilter,
    pub values: Vec<f64>,
}

/// Results from a job run.
#[derive(Debug, Serialize)]
pub struct JobOutput {
    pub morphology: String,
    pub features: Vec<FeatureValues>,
}

/// Load a morphology from `.swc` or `.json` (a serialised [`MorphologyRecord`]).
pub fn load_morphology(path: &Path) -> Result<Morphology> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let morphology = match extension.as_str() {
        "swc" => read_swc(path).with_context(|| format!("Reading {}", path.display()))?,
        "json" => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?;
            let mut record: MorphologyRecord = serde_json::from_str(&content)
                .with_context(|| format!("Parsing {}", path.display()))?;
            if record.name.is_empty() {
                record.name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
            }
            Morphology::try_from(record).with_context(|| format!("Building {}", path.display()))?
        }
        other => anyhow::bail!(
            "Unsupported morphology format '{}' for {}. Expected .swc or .json",
            other,
            path.display()
        ),
    };
    log::info!(
        "Loaded '{}': {} neurite(s), {} section(s)",
        morphology.name(),
        morphology.neurites().len(),
        morphology.section_count()
    );
    Ok(morphology)
}

/// Evaluate every requested feature against `morphology`.
pub fn extract_features(
    morphology: &Morphology,
    requests: &[FeatureConfig],
    options: &ExtractOptions,
) -> Result<Vec<FeatureValues>> {
    requests
        .iter()
        .map(|req| -> Result<FeatureValues> {
            let values =
                neurometry_features::get_with(&req.name, morphology, req.neurite_type, options)
                    .with_context(|| format!("Feature '{}' ({})", req.name, req.neurite_type))?;
            println!("  {:<32} {:<16} {} value(s)", req.name, req.neurite_type, values.len());
            Ok(FeatureValues {
                name: req.name.clone(),
                neurite_type: req.neurite_type,
                values,
            })
        })
        .collect()
}

/// Run a full job. Relative morphology paths resolve against `job_dir`.
pub fn run_job(job: &JobConfig, job_dir: &Path) -> Result<JobOutput> {
    let path = job.morphology_path(job_dir);
    let morphology = load_morphology(&path)?;
    let requests = job.requests();
    println!("Extracting {} feature(s) from '{}'", requests.len(), morphology.name());
    let features = extract_features(&morphology, &requests, &job.extraction)?;
    Ok(JobOutput {
        morphology: morphology.name().to_string(),
        features,
    })
}

/// Write results as long-form CSV, one row per value, with a metadata header.
pub fn write_features_csv(output: &JobOutput, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Neurometry feature extraction")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# morphology: {}", output.morphology)?;
    writeln!(file, "# degenerate_geometry: {:?}", job.extraction.degenerate_geometry)?;
    writeln!(file, "#")?;
    writeln!(file, "feature,neurite_type,index,value")?;

    for feature in &output.features {
        for (i, v) in feature.values.iter().enumerate() {
            writeln!(file, "{},{},{},{}", feature.name, feature.neurite_type, i, v)?;
        }
    }

    println!("Features written to: {}", path.display());
    Ok(())
}

/// Write results to a JSON file.
pub fn write_features_json(output: &JobOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(output)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Features (JSON) written to: {}", path.display());
    Ok(())
}
