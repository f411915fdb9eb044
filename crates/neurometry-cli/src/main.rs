//! Neurometry command-line interface.
//!
//! Extract morphometrics from `.swc` or `.json` morphologies:
//! ```sh
//! neurometry run job.toml
//! neurometry get cell.swc section_lengths -t axon
//! neurometry validate cell.swc
//! neurometry features
//! ```

mod config;
mod runner;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use neurometry_core::TypeFilter;
use neurometry_features::{ExtractOptions, Feature};

#[derive(Parser)]
#[command(name = "neurometry")]
#[command(about = "Neurometry: neuron morphology feature extraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a feature extraction job from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a single feature of a morphology, one value per line.
    Get {
        /// `.swc` or `.json` morphology file.
        morphology: PathBuf,
        /// Feature name, e.g. `section_lengths`.
        feature: String,
        /// Neurite type to select: all, axon, basal_dendrite, apical_dendrite...
        #[arg(short = 't', long = "neurite-type", default_value = "all")]
        neurite_type: TypeFilter,
        /// Fail on degenerate geometry instead of skipping it.
        #[arg(long)]
        abort_on_degenerate: bool,
    },
    /// Load a morphology and print a summary.
    Validate {
        /// `.swc` or `.json` morphology file.
        morphology: PathBuf,
    },
    /// List the built-in features.
    Features,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Neurometry");
            println!("==========");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let job_dir = config.parent().unwrap_or_else(|| Path::new("."));
            let result = runner::run_job(&job, job_dir)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            runner::write_features_csv(&result, &out_dir.join("features.csv"), &job)?;
            if job.output.save_json {
                runner::write_features_json(&result, &out_dir.join("features.json"))?;
            }

            println!("Extraction complete.");
            Ok(())
        }
        Commands::Get { morphology, feature, neurite_type, abort_on_degenerate } => {
            let m = runner::load_morphology(&morphology)?;
            let options = if abort_on_degenerate {
                ExtractOptions::abort_on_degenerate()
            } else {
                ExtractOptions::default()
            };
            for v in neurometry_features::get_with(&feature, &m, neurite_type, &options)? {
                println!("{}", v);
            }
            Ok(())
        }
        Commands::Validate { morphology } => {
            let m = runner::load_morphology(&morphology)?;
            let soma = m.soma();
            let [x, y, z] = soma.center();
            println!("Morphology '{}' is valid", m.name());
            println!("  soma: centre ({:.3}, {:.3}, {:.3}), radius {:.3}", x, y, z, soma.radius());
            for (i, n) in m.neurites().iter().enumerate() {
                println!(
                    "  neurite {}: {}, {} section(s), {} leaf section(s)",
                    i,
                    n.branch_type(),
                    n.len(),
                    n.leaves().count()
                );
            }
            Ok(())
        }
        Commands::Features => {
            println!("Built-in features:");
            for f in Feature::ALL {
                println!("  {:<32} [{}] {}", f.name(), f.level(), f.description());
            }
            Ok(())
        }
    }
}
