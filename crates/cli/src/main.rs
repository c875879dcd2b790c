//! Command line entry point for the storyboard generator.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storyboard_core::markdown_to_steps;

#[derive(Parser)]
#[command(name = "storyboard")]
#[command(about = "Generate a narration script from a markdown document")]
#[command(version)]
struct Cli {
    /// Markdown document to generate a script for
    #[arg(long)]
    filename: PathBuf,
    /// Output directory for all the artifacts
    #[arg(long)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    fs::create_dir_all(&cli.output_dir).context("could not create output directory")?;

    let contents = fs::read_to_string(&cli.filename)
        .with_context(|| format!("could not open {}", cli.filename.display()))?;

    let steps = markdown_to_steps(&contents).context("could not convert markdown to steps")?;

    for (index, step) in steps.iter().enumerate() {
        step.build()
            .with_context(|| format!("could not build step {index}"))?;
    }

    let output_path = cli.output_dir.join("script.json");
    let file = File::create(&output_path)
        .with_context(|| format!("could not create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &steps).context("could not encode script JSON")?;
    writer.flush().context("could not write script file")?;

    info!(steps = steps.len(), path = %output_path.display(), "script written");

    Ok(())
}
