use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use avif_converter::core::{ConfigOverrides, Scheduling};

#[derive(Parser)]
#[command(name = "avif-converter")]
#[command(author, version, about = "Batch-convert images to AVIF locally")]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./avif-converter.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single image to AVIF
    Convert {
        /// Input image path
        input: PathBuf,

        /// Output AVIF path
        output: PathBuf,

        /// Compression quality (1-100) [default: 80]
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Encoding speed (1-10) [default: 6]
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        speed: Option<u8>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert every matching image in a directory tree to AVIF
    Batch {
        /// Input directory
        input_dir: PathBuf,

        /// Output directory; subdirectories are mirrored
        output_dir: PathBuf,

        /// Compression quality (1-100) [default: 80]
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Encoding speed (1-10) [default: 6]
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        speed: Option<u8>,

        /// File glob relative to the input directory [default: **/*.{jpg,jpeg,png,webp,gif}]
        #[arg(short, long)]
        pattern: Option<String>,

        /// Maximum number of concurrent conversions [default: 4]
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        concurrent: Option<u64>,

        /// How concurrency is bounded [default: pooled]
        #[arg(long, value_enum)]
        schedule: Option<ScheduleArg>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 2 when any file failed to convert
        #[arg(long)]
        strict: bool,
    },

    /// List supported image formats
    Formats {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dimensions, channels and size of an image
    Info {
        /// Image to inspect
        image: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScheduleArg {
    /// Start a new conversion whenever a slot frees
    Pooled,
    /// Run fixed-size chunks, waiting for each to finish
    Chunked,
}

impl From<ScheduleArg> for Scheduling {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::Pooled => Scheduling::Pooled,
            ScheduleArg::Chunked => Scheduling::Chunked,
        }
    }
}

impl Commands {
    /// Config values this subcommand overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Commands::Convert { quality, speed, .. } => ConfigOverrides {
                quality: *quality,
                speed: *speed,
                ..ConfigOverrides::default()
            },
            Commands::Batch {
                quality,
                speed,
                pattern,
                concurrent,
                schedule,
                ..
            } => ConfigOverrides {
                quality: *quality,
                speed: *speed,
                pattern: pattern.clone(),
                concurrency: concurrent.map(|c| usize::try_from(c).unwrap_or(usize::MAX)),
                scheduling: schedule.map(Scheduling::from),
            },
            Commands::Formats { .. } | Commands::Info { .. } => ConfigOverrides::default(),
        }
    }
}
