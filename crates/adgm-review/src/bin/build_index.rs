//! Offline corpus index build
//!
//! Run with: cargo run -p adgm-review --bin build-index -- --corpus-dir corpus/

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adgm_review::config::ReviewConfig;
use adgm_review::corpus::CorpusIndexer;
use adgm_review::providers::OpenAiClient;

#[derive(Parser, Debug)]
#[command(name = "build-index", about = "Build the citation index from a reference corpus")]
struct Args {
    /// Directory of .pdf / .txt reference documents
    #[arg(long, default_value = "corpus")]
    corpus_dir: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the output vector store path
    #[arg(long)]
    index_path: Option<PathBuf>,

    /// Override the output metadata sidecar path
    #[arg(long)]
    meta_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adgm_review=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReviewConfig::load(path)?,
        None => ReviewConfig::default(),
    };
    if let Some(index_path) = args.index_path {
        config.index.index_path = index_path;
    }
    if let Some(meta_path) = args.meta_path {
        config.index.meta_path = meta_path;
    }

    tracing::info!("Embedding model: {}", config.embeddings.model);
    tracing::info!("Chunk size: {} (overlap {})", config.chunking.chunk_size, config.chunking.overlap);

    let client = Arc::new(OpenAiClient::from_env(
        config.embeddings.clone(),
        config.llm.clone(),
    )?);

    let indexer = CorpusIndexer::new(client, &config.chunking, &config.embeddings);
    let index = indexer.build(&args.corpus_dir).await?;
    index.save(&config.index.index_path, &config.index.meta_path)?;

    println!(
        "Indexed {} chunks (dimension {}) -> {}",
        index.len(),
        index.dimension(),
        config.index.index_path.display()
    );

    Ok(())
}
