use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "promptdex")]
#[command(about = "Prompt library lookup and search", version)]
pub struct Cli {
    /// Library root; falls back to PROMPTDEX_ROOT, then layout discovery.
    #[arg(long)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve one prompt and print its record as JSON.
    Show(NameArg),
    /// Resolve one prompt and print just its body.
    Read(NameArg),
    /// Search the library with weighted field matching.
    Search(SearchArgs),
    /// List indexed prompts, optionally by category.
    Ls(ListArgs),
    /// Totals and the per-category breakdown.
    Stats,
    /// Join several resolved prompts into one text blob.
    Compose(ComposeArgs),
}

#[derive(Debug, Args)]
pub struct NameArg {
    /// Prompt name, id, or alias.
    pub name: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Names to resolve; unresolved names are skipped.
    #[arg(required = true)]
    pub names: Vec<String>,
}
