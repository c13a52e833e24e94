pub mod extract;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docintel_core::ExportFormat;

#[derive(Parser)]
#[command(
    name = "docintel",
    about = "Pull names, contacts, dates and other fields out of PDF and TXT documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured fields from one or more documents
    Extract(ExtractArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Document path(s); the extension picks the format (pdf or txt)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Output format: json, csv, xml or text
    #[arg(short, long, default_value = "json")]
    pub format: ExportFormat,
    /// Print per-field counts to stderr
    #[arg(long)]
    pub stats: bool,
    /// Directory holding model.onnx, tokenizer.json and config.json
    #[arg(long, env = "DOCINTEL_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,
    /// Skip entity recognition; name, organization and location stay empty
    #[arg(long)]
    pub skip_ner: bool,
}
