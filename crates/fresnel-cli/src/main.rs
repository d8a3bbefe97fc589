//! Fresnel command-line interface.
//!
//! Compose printable zone plate and sieve pages from TOML job files:
//! ```sh
//! fresnel-cli render job.toml
//! fresnel-cli render job.toml --mode grid --seed 42 -o out/
//! fresnel-cli validate job.toml
//! fresnel-cli zones job.toml
//! fresnel-cli presets
//! ```

mod config;
mod runner;
mod svg;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fresnel-cli")]
#[command(about = "Fresnel: printable zone plates, zone sieves and photon sieves")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a page from a TOML job file.
    Render {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for the sieve ring phases (overrides config file setting).
        #[arg(long)]
        seed: Option<u64>,
        /// Layout mode: GRID, PLATE, SIEVE or PHOTON (overrides config file setting).
        #[arg(long)]
        mode: Option<String>,
    },
    /// Validate a job file and its element parameters without rendering.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Print the zone radius table and effective f-stops for a job.
    Zones {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the built-in element presets.
    Presets,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            output,
            seed,
            mode,
        } => {
            println!("Fresnel page composer");
            println!("=====================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::render_job(&job, &runner::Overrides { mode, seed })?;
            println!(
                "Mode: {} (requested '{}'), seed {}, next row {}",
                result.composed.mode, result.requested_mode, result.seed, result.composed.next_row
            );

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_json {
                runner::write_page_json(&result, &out_dir.join("page.json"))?;
            }
            if job.output.save_svg {
                svg::write_svg(&result.composed.page, &out_dir.join("page.svg"))?;
            }

            println!(
                "Page complete: {} primitives.",
                result.composed.page.primitives.len()
            );
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            runner::resolve_spec(&job)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Zones { config } => {
            let job = config::load_config(&config)?;
            let spec = runner::resolve_spec(&job)?;
            print!("{}", runner::zone_report(&spec));
            Ok(())
        }
        Commands::Presets => {
            println!("Available presets:");
            println!();
            for preset in &config::PRESETS {
                println!("  {:<12} {}", preset.name, preset.summary);
                println!(
                    "  {:<12} f={}mm, {} rings, λ={}mm, punch {}mm, {}x, {}",
                    "",
                    preset.focal_length,
                    preset.rings,
                    preset.wavelength,
                    preset.punch_diameter,
                    preset.magnification,
                    preset.mode
                );
            }
            Ok(())
        }
    }
}
