//! AdLens CLI binary.
//!
//! Provides command-line interface for the AdLens advertising analytics
//! pipeline.

use adlens::pipeline::{PipelineConfig, run_advanced, run_analysis};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "adlens")]
#[command(about = "AdLens: Advertising campaign performance analytics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute KPIs, monthly trend charts, and a linear ROMI model
    Analyze {
        /// Path to the campaign dataset CSV
        #[arg(long, default_value = "ads_data.csv")]
        data: PathBuf,

        /// Directory for generated charts, tables, and summaries
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Day-of-week breakdown and random forest ROMI model
    Advanced {
        /// Path to the campaign dataset CSV
        #[arg(long, default_value = "ads_data.csv")]
        data: PathBuf,

        /// Directory for generated charts, tables, and summaries
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { data, out } => analyze(data, out)?,
        Commands::Advanced { data, out } => advanced(data, out)?,
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

fn analyze(data: PathBuf, out: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::new(&data, &out);

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", "CAMPAIGN PERFORMANCE ANALYSIS");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Dataset: {}", data.display());
    println!("Output:  {}\n", out.display());

    let pb = spinner("Running analysis pipeline...");
    let outcome = match run_analysis(&config) {
        Ok(o) => {
            pb.finish_with_message(format!("Processed {} records", o.n_records));
            o
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    println!();
    println!("Platforms analyzed:      {}", outcome.platform_rows.len());
    println!("Linear model R-squared:  {:.4}", outcome.r_squared);

    println!("\nGenerated files:");
    for file in &outcome.files {
        println!("  {}", file.display());
    }

    println!("\nAnalysis complete.");

    Ok(())
}

fn advanced(data: PathBuf, out: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::new(&data, &out);

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", "ADVANCED CAMPAIGN ANALYSIS");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Dataset: {}", data.display());
    println!("Output:  {}\n", out.display());

    let pb = spinner("Running advanced pipeline...");
    let outcome = match run_advanced(&config) {
        Ok(o) => {
            pb.finish_with_message(format!("Processed {} records", o.n_records));
            o
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    println!();
    println!(
        "Day/platform rows:         {}",
        outcome.day_platform_rows.len()
    );
    println!("Random forest R-squared:   {:.4}", outcome.r_squared);

    println!("\nFeature importance ranking:");
    for (name, weight) in &outcome.importances {
        println!("  {:<14} {:.4}", name, weight);
    }

    println!("\nGenerated files:");
    for file in &outcome.files {
        println!("  {}", file.display());
    }

    println!("\nAdvanced analysis complete.");

    Ok(())
}
