use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ddsforge")]
#[command(author, version, about = "Compress images in a folder using texconv")]
pub struct Cli {
    /// Input folder containing PNG images
    #[arg(short, long, required = true)]
    pub input: PathBuf,

    /// Output folder for DDS compressed images
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
