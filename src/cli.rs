use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use parsal::sections::{DEFAULT_RAW_TEXT_PUBLISHERS, DEFAULT_SIMILARITY_THRESHOLD};

#[derive(Parser, Debug)]
#[command(
    name = "parsal",
    version,
    about = "Section segmentation and reconciliation for scientific articles"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Segment(SegmentArgs),
    Merge(MergeArgs),
    Load(LoadArgs),
    CleanAbstract(CleanAbstractArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    #[arg(long)]
    pub structured: PathBuf,

    #[arg(long)]
    pub raw: PathBuf,

    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    #[arg(long)]
    pub article_id: String,

    #[arg(long)]
    pub publisher: String,

    #[arg(long)]
    pub structured: Option<PathBuf>,

    #[arg(long)]
    pub legacy_dir: Option<PathBuf>,

    #[arg(long)]
    pub raw: Option<PathBuf>,

    #[arg(long = "raw-text-publisher")]
    pub raw_text_publishers: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f64,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value = ".cache/parsal")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

impl LoadArgs {
    /// Publishers whose raw text is segmented; the built-in list unless
    /// overridden on the command line.
    pub fn raw_text_publishers(&self) -> Vec<String> {
        if self.raw_text_publishers.is_empty() {
            DEFAULT_RAW_TEXT_PUBLISHERS
                .iter()
                .map(|publisher| publisher.to_string())
                .collect()
        } else {
            self.raw_text_publishers.clone()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CleanAbstractArgs {
    #[arg(long)]
    pub input: PathBuf,
}
