use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use docqa_classify::Classifier;
use docqa_core::config::{resolve_with_base, Config, Settings};
use docqa_core::data_processor::{ChunkingConfig, DataProcessor};
use docqa_core::traits::{RelevanceScorer, TextGenerator, VectorStore};
use docqa_embed::{get_default_embedder, get_default_scorer};
use docqa_llm::OllamaClient;
use docqa_pipeline::{AnswerPipeline, PipelineConfig};
use docqa_vector::LanceVectorStore;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod ingest;

use cli::{AskArgs, ClassifyArgs, Cli, Commands, IngestArgs, RemoveArgs};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Config::load_from(&cli.config_dir)?.settings()?;

    match cli.command {
        Commands::Classify(args) => classify(args),
        Commands::Ingest(args) => ingest(&cli.config_dir, &settings, args).await,
        Commands::Ask(args) => ask(&cli.config_dir, &settings, args).await,
        Commands::Status => status(&cli.config_dir, &settings).await,
        Commands::Remove(args) => remove(&cli.config_dir, &settings, args).await,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_store(base: &Path, settings: &Settings) -> Result<LanceVectorStore> {
    let embed_dir = settings.models.embed_dir.as_deref().map(|d| resolve_with_base(base, d));
    let embedder = get_default_embedder(embed_dir.as_deref())?;
    LanceVectorStore::new(&resolve_with_base(base, &settings.store.path), &settings.store.table, embedder).await
}

fn classify(args: ClassifyArgs) -> Result<()> {
    let (text, filename) = match &args.path {
        Some(path) => {
            let bytes = fs::read(path)?;
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            (Some(String::from_utf8_lossy(&bytes).into_owned()), args.filename.clone().or(name))
        }
        None => (args.text.clone(), args.filename.clone()),
    };
    let classifier = Classifier::default();
    let result = classifier.classify_checked(text.as_deref(), filename.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Domain:     {}", result.domain);
        println!("Category:   {}", result.category);
        println!("File type:  {}", result.file_extension);
        println!("Confidence: {}%", result.confidence);
    }
    if args.explain {
        println!("\nEvidence:");
        let text = text.as_deref().unwrap_or("");
        let filename = filename.as_deref().unwrap_or("");
        for (domain, e) in classifier.explain(text, filename) {
            if e.score > 0.0 {
                println!("  {domain:<14} {:>6.1}  strong {:>2}  weak {:>2}", e.score, e.strong_hits, e.weak_hits);
            }
        }
    }
    Ok(())
}

async fn ingest(base: &Path, settings: &Settings, args: IngestArgs) -> Result<()> {
    if !args.dir.is_dir() {
        bail!("{} is not a directory", args.dir.display());
    }
    let store = open_store(base, settings).await?;
    let processor = DataProcessor::with_config(ChunkingConfig {
        max_tokens: settings.ingest.max_tokens,
        overlap_percent: settings.ingest.overlap_percent,
    });
    println!("Ingesting from {}", args.dir.display());
    let report = ingest::ingest_dir(&store, &Classifier::default(), &processor, &args.dir, args.limit).await?;
    println!("✅ Ingested {} files ({} chunks)", report.files, report.chunks);
    if report.replaced > 0 {
        println!("♻️  Replaced {} previously stored chunks", report.replaced);
    }
    if report.skipped > 0 {
        println!("⚠️  Skipped {} files (no readable text, or storing failed; see log)", report.skipped);
    }
    Ok(())
}

async fn ask(base: &Path, settings: &Settings, args: AskArgs) -> Result<()> {
    let store = open_store(base, settings).await?;
    let generator = OllamaClient::from_settings(&settings.llm)?;
    let rerank_dir = settings.models.rerank_dir.as_deref().map(|d| resolve_with_base(base, d));
    let scorer: Option<Arc<dyn RelevanceScorer>> = match get_default_scorer(rerank_dir.as_deref()) {
        Ok(s) => Some(Arc::from(s)),
        Err(e) => {
            warn!(error = %e, "cross-encoder unavailable, answers use similarity order");
            None
        }
    };

    let config = PipelineConfig::from_settings(settings);
    let pool = args.pool.unwrap_or(config.candidate_pool);
    let pipeline = AnswerPipeline::new(store, generator, scorer, config);
    let result = pipeline.answer_with_pool(&args.query, pool).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    println!("{}", result.answer);
    if !result.source_snippets.is_empty() {
        println!("\nSources:");
        for s in &result.source_snippets {
            println!("  [{}] {} ({}, {}%)", s.id, s.filename, s.category, s.relevance_pct);
            println!("      {}", s.text.replace('\n', " "));
        }
    }
    Ok(())
}

async fn status(base: &Path, settings: &Settings) -> Result<()> {
    let store = open_store(base, settings).await?;
    let generator = OllamaClient::from_settings(&settings.llm)?;
    println!("Store:  {} (table {})", resolve_with_base(base, &settings.store.path).display(), store.table_name());
    println!("Chunks: {}", store.count().await?);
    let state = if generator.is_available().await { "✅ reachable" } else { "❌ not reachable" };
    println!("Ollama: {} at {} (model {})", state, settings.llm.base_url, generator.model());
    Ok(())
}

async fn remove(base: &Path, settings: &Settings, args: RemoveArgs) -> Result<()> {
    let store = open_store(base, settings).await?;
    let removed = store.delete_by_filepath(&ingest::store_key(&args.path)).await?;
    println!("🗑️  Removed {} chunks for {}", removed, args.path.display());
    Ok(())
}
