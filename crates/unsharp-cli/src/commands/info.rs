use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use unsharp_core::io::image_io::image_info;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let info = image_info(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Color type:  {}", info.color_type);

    let scratch_mb = (info.width as f64 * info.height as f64 * 3.0 * 4.0) / (1024.0 * 1024.0);
    println!("Scratch:     {:.1} MB (four RGB8 canvases)", scratch_mb);

    Ok(())
}
