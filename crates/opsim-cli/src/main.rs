//! OpSim command-line interface.
//!
//! Build optical property tables from TOML job files:
//! ```sh
//! opsim build job.toml
//! opsim validate job.toml
//! opsim materials
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use opsim_optics::catalog;

#[derive(Parser)]
#[command(name = "opsim")]
#[command(about = "OpSim: optical property tables for photon transport")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every material in a job file and write its tables.
    Build {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build a job file's materials without writing anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the built-in materials.
    Materials,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { config, output } => {
            println!("OpSim table builder");
            println!("===================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let built = runner::build_job(&job, base_dir(&config))?;
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_csv {
                for material in built.registry.iter() {
                    runner::write_tables_csv(material.optical(), &out_dir)?;
                }
                for surface in &built.surfaces {
                    runner::write_tables_csv(surface, &out_dir)?;
                }
                println!("Tables written to: {}", out_dir.display());
            }

            if job.output.save_json {
                let materials: Vec<_> = built.registry.iter().cloned().collect();
                runner::write_json(&materials, &built.surfaces, &out_dir.join("tables.json"))?;
            }

            println!("Done.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let built = runner::build_job(&job, base_dir(&config))?;
            println!(
                "Configuration is valid: {} ({} materials, {} surfaces)",
                config.display(),
                built.registry.len(),
                built.surfaces.len()
            );
            Ok(())
        }
        Commands::Materials => {
            println!("Built-in materials:");
            println!();
            for name in catalog::NAMES {
                let Some(spec) = catalog::by_name(name) else {
                    continue;
                };
                let spec = spec?;
                let keys: Vec<String> = spec.properties.keys().map(|k| k.to_string()).collect();
                println!(
                    "  {:<18} {:>10.4e} g/cm3  {:<6}  {}",
                    spec.name,
                    spec.density,
                    spec.state,
                    if keys.is_empty() { "-".to_string() } else { keys.join(", ") }
                );
            }
            println!();
            println!("Built-in optical surfaces:");
            println!("  PHOTOSENSOR_OPSURF  REFLECTIVITY, EFFICIENCY");
            Ok(())
        }
    }
}

fn base_dir(config: &Path) -> &Path {
    config.parent().unwrap_or_else(|| Path::new("."))
}
