use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "docqa", version, about = "Ask questions answered only from your own documents")]
pub struct Cli {
    /// Directory holding config.toml; relative paths in the config resolve against it.
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign a domain, category and file type to a document.
    Classify(ClassifyArgs),
    /// Classify, chunk and store every readable file under a directory.
    Ingest(IngestArgs),
    /// Answer a question from the stored chunks.
    Ask(AskArgs),
    /// Stored chunk count and generation runtime reachability.
    Status,
    /// Remove every chunk of one file from the store.
    Remove(RemoveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// File to classify; its name is used as a signal too.
    pub path: Option<PathBuf>,

    /// Classify this text instead of reading a file.
    #[arg(long)]
    pub text: Option<String>,

    /// Filename to score alongside `--text`.
    #[arg(long)]
    pub filename: Option<String>,

    /// Print per-domain evidence.
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    pub dir: PathBuf,

    /// Stop after this many files.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    pub query: String,

    /// Candidates requested from the store before reranking.
    #[arg(long)]
    pub pool: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    pub path: PathBuf,
}
