mod cli;

use ddsforge::{
    batch::{BatchConverter, BatchEvent},
    config::{self, Config},
};
use ddsforge_tools::{locate_encoder, resolve_shim, shim_required, TexconvEncoder};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set; logs go to stderr, progress to stdout
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "ddsforge=info,ddsforge_tools=info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Checked before the config is read so a missing input always exits 0.
    if !cli.input.is_dir() {
        println!("The input folder '{}' does not exist.", cli.input.display());
        return Ok(());
    }

    let config = config::load_config_or_default(cli.config.as_deref())?;

    convert_folder(&cli.input, &cli.output, &config)
}

fn convert_folder(input: &Path, output: &Path, config: &Config) -> Result<()> {
    let texconv = locate_encoder(config.tools.texconv_path.as_deref())?;
    let shim = if shim_required(config.tools.use_wine) {
        Some(resolve_shim(config.tools.wine_path.as_deref())?)
    } else {
        None
    };

    tracing::debug!("Using texconv at {:?} (shim: {:?})", texconv, shim);

    let converter = BatchConverter::new(Arc::new(TexconvEncoder::new(texconv, shim)))
        .with_staging_dir(&config.staging_dir)
        .with_progress_callback(Box::new(print_progress));

    let report = converter.run(input, output)?;
    if report.is_empty() {
        tracing::info!("No PNG files found in {:?}", input);
    }

    println!("Processing complete.");
    Ok(())
}

fn print_progress(event: BatchEvent<'_>) {
    match event {
        BatchEvent::Converting(job) => println!(
            "Converting {} -> {}...",
            job.display_name(),
            job.destination_path.display()
        ),
        BatchEvent::OutputMissing(job) => {
            println!("Failed to find output DDS for {}", job.display_name())
        }
        BatchEvent::Converted(_) | BatchEvent::Failed(..) => {}
    }
}
