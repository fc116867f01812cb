// decant-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use decant_core::config::DEFAULT_TRANSCODE_TIMEOUT_SECS;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "decant: convert iOS media (HEIC/HEIF, MOV/M4V) to PNG and MP4",
    long_about = "Converts HEIC/HEIF images to PNG via libheif and MOV/M4V videos to MP4 \
                  (H.264 + AAC) via ffmpeg. Inputs can be listed explicitly, scanned from \
                  a directory, or both; output lands in one folder per run.",
    after_help = "Examples:\n  \
        decant photo.heic                      Convert a single file\n  \
        decant *.heic                          Convert all HEIC files in the shell glob\n  \
        decant -d ~/Photos                     Convert everything under a directory\n  \
        decant -d ~/Photos -o ~/Converted      Pick the output directory\n  \
        decant --check                         Verify dependency availability"
)]
pub struct Cli {
    /// Files to convert (wildcards are expanded by the shell)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Directory to scan for convertible media
    #[arg(short = 'd', long = "directory", value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Output directory (default: Converted_<timestamp> in the working directory)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Recurse into subdirectories when scanning (pass `-r=false` to scan
    /// only the top level)
    #[arg(
        short = 'r',
        long,
        value_name = "BOOL",
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true,
        action = clap::ArgAction::Set
    )]
    pub recursive: bool,

    /// Number of parallel conversions (bounded worker pool; 1 = sequential)
    #[arg(
        short = 'j',
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(1..=32)
    )]
    pub jobs: u8,

    /// Per-file wall-clock timeout for video transcodes, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TRANSCODE_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Verify that external dependencies are available and exit without
    /// converting anything
    #[arg(long)]
    pub check: bool,
}
