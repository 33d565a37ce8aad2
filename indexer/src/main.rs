use anyhow::Result;
use clap::{Parser, Subcommand};
use findex_core::persist::{save_index, IndexPaths};
use findex_core::{Analyzer, IndexStore, Indexer};
use findex_crawler::collect_documents;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "findex-indexer")]
#[command(about = "Build a full-text index over a directory of text and HTML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a corpus directory and build a fresh index
    Build {
        /// Corpus root directory (.txt and .html files, searched recursively)
        #[arg(long)]
        input: PathBuf,
        /// Output index directory
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_index(&input, &output),
    }
}

// A rebuild always starts from an empty store; there is no in-place update
// of an existing index.
fn build_index(input: &Path, output: &Path) -> Result<()> {
    let analyzer = Analyzer::new();
    let mut store = IndexStore::new();

    let mut indexer = Indexer::new(&mut store, &analyzer);
    let indexed = indexer.index_corpus(collect_documents(input))?;
    tracing::info!(indexed, terms = store.term_count(), "corpus ingested");

    let paths = IndexPaths::new(output);
    save_index(&paths, &store)?;
    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}
