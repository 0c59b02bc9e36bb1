use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use unsharp_core::config::FilterConfig;
use unsharp_core::io::image_io::{load_rgb, save_rgb};

#[derive(Args)]
pub struct RunArgs {
    /// Batch config file (TOML)
    pub config: PathBuf,

    /// Override the input path from the config
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Override the output path from the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read {}", args.config.display()))?;
    let mut config: FilterConfig = toml::from_str(&text)
        .with_context(|| format!("Invalid config {}", args.config.display()))?;

    if let Some(ref input) = args.input {
        config.input = input.clone();
    }
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    config.validate()?;

    crate::summary::print_run_summary(&config);

    let registry = config.registry();
    let mut img = load_rgb(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    let pb = ProgressBar::new(config.steps.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:16} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    for step in &config.steps {
        pb.set_message(step.clone());
        registry.apply(step, &mut img)?;
        info!(step = %step, "Preset applied");
        pb.inc(1);
    }
    pb.finish_with_message("Done");

    save_rgb(&img, &config.output)?;
    println!("\nOutput saved to {}", config.output.display());

    Ok(())
}
