//! # newsdesk CLI
//!
//! Command-line interface for the newsdesk research tool.
//!
//! ## Subcommands
//!
//! - `process`: fetch up to three article URLs, chunk and embed their text,
//!   and save the resulting index to a store file
//! - `ask`: answer one question against the persisted index
//! - `interactive`: answer questions in a loop, with in-session reprocessing
//!
//! Processing reports progress per stage; a failing URL is reported and
//! skipped rather than aborting the run. An existing store file is only
//! overwritten when explicitly confirmed (`--force`, or the prompt in
//! interactive mode).

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use newsdesk::fetcher::{self, FetcherConfig};
use newsdesk::index::{VectorIndex, load_index, save_index};
use newsdesk::model::{Client, GeminiClient};
use newsdesk::processor::{self, ProcessorConfig};
use newsdesk::search::{RagAnswer, ResearchSession, SearchOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Most URLs accepted per processing run
const MAX_URLS: usize = 3;

#[derive(Parser)]
#[command(author, version, about = "Research news articles with retrieval augmented generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and index news article URLs
    Process(ProcessArgs),

    /// Ask a question about the indexed articles
    Ask(AskArgs),

    /// Answer questions in a loop
    Interactive(InteractiveArgs),
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Article URLs to index (up to 3)
    #[arg(required = true, num_args = 1..=3)]
    urls: Vec<String>,

    /// Maximum chunk size in characters
    #[arg(short, long, default_value = "1000")]
    chunk_size: usize,

    /// Cap on raw document length in characters (0 disables the cap)
    #[arg(long, default_value = "10000")]
    max_document_length: usize,

    /// Store file path
    #[arg(short, long, default_value = "news_index.json")]
    store: PathBuf,

    /// Overwrite an existing store file
    #[arg(short, long)]
    force: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[derive(Args, Debug)]
struct AskArgs {
    /// The question to answer
    #[arg(required = true)]
    question: String,

    /// Store file path
    #[arg(short, long, default_value = "news_index.json")]
    store: PathBuf,

    /// Number of passages to retrieve
    #[arg(short, long, default_value = "5")]
    limit: usize,

    /// Maximum context length in characters
    #[arg(long, default_value = "2000")]
    max_context: usize,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Completion model to use
    #[arg(short, long, default_value = "gemini-2.0-flash")]
    model: String,
}

#[derive(Args, Debug)]
struct InteractiveArgs {
    /// Store file path
    #[arg(short, long, default_value = "news_index.json")]
    store: PathBuf,

    /// Number of passages to retrieve
    #[arg(short, long, default_value = "5")]
    limit: usize,

    /// Maximum context length in characters
    #[arg(long, default_value = "2000")]
    max_context: usize,

    /// Completion model to use
    #[arg(short, long, default_value = "gemini-2.0-flash")]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Process(args) => process_command(args).await,
        Commands::Ask(args) => ask_command(args).await,
        Commands::Interactive(args) => interactive_command(args).await,
    }
}

async fn process_command(args: ProcessArgs) -> Result<()> {
    let client = Client::new_gemini_from_env();
    let fetcher_config = FetcherConfig::builder().timeout_secs(args.timeout).build();
    let processor_config = ProcessorConfig::builder()
        .max_chunk_size(args.chunk_size)
        .max_document_length((args.max_document_length > 0).then_some(args.max_document_length))
        .build();

    println!("Fetching {} URL(s)...", args.urls.len());
    let progress = ProgressBar::new(args.urls.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut documents = Vec::new();
    let mut failures = Vec::new();
    for url in &args.urls {
        progress.set_message(url.clone());
        match fetcher::fetch_document(url, &fetcher_config).await {
            Ok(document) => documents.push(document),
            Err(error) => failures.push((url.clone(), error)),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    for (url, error) in &failures {
        println!("Failed to fetch {url}: {error}");
    }
    println!("Fetched {} of {} articles.", documents.len(), args.urls.len());

    println!("Splitting and embedding...");
    let chunks = processor::process_documents(&client, &documents, &processor_config).await?;
    println!("Embedded {} chunks.", chunks.len());

    let index = VectorIndex::from_chunks(chunks)?;

    if save_index(&index, &args.store, args.force).await? {
        println!(
            "Saved index of {} chunks to {}.",
            index.len(),
            args.store.display()
        );
    } else {
        println!(
            "{} already exists; pass --force to overwrite it.",
            args.store.display()
        );
    }

    Ok(())
}

async fn ask_command(args: AskArgs) -> Result<()> {
    let index = load_index(&args.store).await?;
    let client = Client::new_gemini_from_env_with_model(&args.model);
    let options = SearchOptions {
        limit: args.limit,
        max_context_length: args.max_context,
    };

    let result = newsdesk::search::answer_question(&client, &index, &args.question, &options).await?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_answer(&result),
    }

    Ok(())
}

async fn interactive_command(args: InteractiveArgs) -> Result<()> {
    let client = Client::new_gemini_from_env_with_model(&args.model);
    let options = SearchOptions {
        limit: args.limit,
        max_context_length: args.max_context,
    };
    let fetcher_config = FetcherConfig::default();
    let processor_config = ProcessorConfig::default();

    let mut session = match load_index(&args.store).await {
        Ok(index) => {
            println!("Loaded {} chunks from {}.", index.len(), args.store.display());
            Some(ResearchSession::new(client.clone(), index))
        }
        Err(error) => {
            println!("No index loaded ({error}).");
            None
        }
    };

    println!("Type a question, /process <url> [url...], or /quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" {
            break;
        }

        if let Some(rest) = input.strip_prefix("/process") {
            let urls: Vec<String> = rest.split_whitespace().map(String::from).collect();
            if urls.is_empty() || urls.len() > MAX_URLS {
                println!("Provide between 1 and {MAX_URLS} URLs.");
                continue;
            }

            let index = match build_index(&client, &urls, &fetcher_config, &processor_config).await
            {
                Ok(index) => index,
                Err(error) => {
                    println!("Processing failed: {error}");
                    continue;
                }
            };

            let mut overwrite = false;
            if tokio::fs::try_exists(&args.store).await? {
                print!("Overwrite {}? [y/N] ", args.store.display());
                std::io::stdout().flush()?;
                overwrite = matches!(
                    lines.next_line().await?,
                    Some(reply) if reply.trim().eq_ignore_ascii_case("y")
                );
            }
            if save_index(&index, &args.store, overwrite).await? {
                println!("Saved {} chunks to {}.", index.len(), args.store.display());
            } else {
                println!("Keeping the existing store file; the new index lives in this session only.");
            }

            if let Some(existing) = &mut session {
                existing.replace_index(index);
            } else {
                session = Some(ResearchSession::new(client.clone(), index));
            }
            println!("Index ready.");
            continue;
        }

        let Some(session) = session.as_ref() else {
            println!("No index loaded; use /process first.");
            continue;
        };
        match session.ask(input, &options).await {
            Ok(result) => print_answer(&result),
            Err(error) => println!("Could not answer: {error}"),
        }
    }

    Ok(())
}

/// Fetch, chunk, embed, and build an index from a set of URLs.
async fn build_index(
    client: &GeminiClient,
    urls: &[String],
    fetcher_config: &FetcherConfig,
    processor_config: &ProcessorConfig,
) -> Result<VectorIndex> {
    println!("Fetching {} URL(s)...", urls.len());
    let (documents, failures) = fetcher::fetch_documents(urls, fetcher_config).await;
    for failure in &failures {
        println!("Failed to fetch {}: {}", failure.url, failure.error);
    }
    println!("Fetched {} of {} articles.", documents.len(), urls.len());

    println!("Splitting and embedding...");
    let chunks = processor::process_documents(client, &documents, processor_config).await?;
    println!("Embedded {} chunks.", chunks.len());

    Ok(VectorIndex::from_chunks(chunks)?)
}

fn print_answer(result: &RagAnswer) {
    println!("\nAnswer:");
    println!("{}", result.answer);
    println!("\nSources:");
    for (i, source) in result.sources.iter().enumerate() {
        println!(
            "{}. {} (distance {:.3})",
            i + 1,
            source.metadata.source_url,
            source.distance
        );
        println!("   {}", source.text);
    }
}
