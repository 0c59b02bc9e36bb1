use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use unsharp_core::filters::box_blur::BlendRounding;
use unsharp_core::filters::unsharp_mask::{unsharp_mask_with_progress, UnsharpOutcome, UnsharpParams};
use unsharp_core::io::image_io::{load_rgb, save_rgb};

#[derive(Clone, Copy, ValueEnum)]
pub enum RoundingArg {
    /// Exact integer blend, truncated toward the destination value
    TowardDestination,
    /// Whole-percent floating point blend, truncated
    Legacy,
}

impl From<RoundingArg> for BlendRounding {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::TowardDestination => BlendRounding::TowardDestination,
            RoundingArg::Legacy => BlendRounding::Legacy,
        }
    }
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Input image file (PNG, TIFF, JPEG, BMP)
    pub file: PathBuf,

    /// TOML file with amount/radius/threshold; flags below override it
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Sharpening strength, percent-like (clamped to 500)
    #[arg(long)]
    pub amount: Option<f32>,

    /// Blur radius (clamped to 50, two blur iterations per unit)
    #[arg(long)]
    pub radius: Option<f32>,

    /// Minimum channel difference to sharpen (0-255)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Blend rounding rule
    #[arg(long, value_enum)]
    pub rounding: Option<RoundingArg>,

    /// Output file path
    #[arg(short, long, default_value = "sharpened.png")]
    pub output: PathBuf,
}

pub fn run(args: &ApplyArgs) -> Result<()> {
    let params = build_params(args)?;

    let mut img = load_rgb(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!("Loaded {}x{} image", img.width(), img.height());

    crate::summary::print_unsharp_summary(&params);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Blurring [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let outcome = unsharp_mask_with_progress(&mut img, &params, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;
    pb.finish_and_clear();

    match outcome {
        UnsharpOutcome::Skipped(reason) => println!("Nothing to do: {}", reason),
        UnsharpOutcome::Applied { iterations, stats } => println!(
            "Sharpened with {} blur iterations, {} pixels changed",
            iterations, stats.pixels_written
        ),
    }

    save_rgb(&img, &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}

fn build_params(args: &ApplyArgs) -> Result<UnsharpParams> {
    let mut params = if let Some(ref path) = args.params {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str::<UnsharpParams>(&text)
            .with_context(|| format!("Invalid parameter file {}", path.display()))?
    } else {
        UnsharpParams::default()
    };

    if let Some(amount) = args.amount {
        params.amount = amount;
    }
    if let Some(radius) = args.radius {
        params.radius = radius;
    }
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if let Some(rounding) = args.rounding {
        params.rounding = rounding.into();
    }

    Ok(params)
}
