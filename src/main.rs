use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use craft_prep::corpus;

#[derive(Parser, Debug)]
#[command(name = "craft-prep")]
#[command(about = "Annotation-preserving text preprocessing for CRAFT articles")]
#[command(version)]
struct Args {
    /// Directory holding the deposited corpus files
    data_dir: PathBuf,

    /// Article source id, e.g. 11532192
    source_id: String,

    /// Skip citation removal
    #[arg(long)]
    keep_citations: bool,

    /// Skip whitespace collapsing
    #[arg(long)]
    keep_whitespace: bool,

    /// Write cleaned text and realigned annotations
    #[arg(long)]
    write: bool,

    /// Output directory for --write (defaults to the data directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Structured JSON logging, same surface as the library's tracing calls
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting craft-prep");
    info!(?args, "Parsed CLI arguments");

    // Validate the data directory early to fail with a clear error
    if !args.data_dir.exists() {
        anyhow::bail!("Data directory does not exist: {}", args.data_dir.display());
    }
    if !args.data_dir.is_dir() {
        anyhow::bail!("Data path is not a directory: {}", args.data_dir.display());
    }

    let mut article = corpus::load_article(&args.data_dir, &args.source_id)?;

    println!(
        "craft-prep v{} - loaded article {}",
        env!("CARGO_PKG_VERSION"),
        args.source_id
    );
    println!("  text: {} bytes", article.original_text.len());
    println!("  annotations: {}", article.annotations.len());

    let chunks = article.split_chunks()?;
    println!("  newline-delimited chunks: {}", chunks.len());

    if !args.keep_citations {
        let before = article.current_text().len();
        article.remove_citations()?;
        let removed = before - article.current_text().len();
        info!("Citation removal dropped {} bytes", removed);
        println!("  citation removal: {removed} bytes removed");
    }

    if !args.keep_whitespace {
        let before = article.current_text().len();
        article.remove_multiple_whitespaces()?;
        let removed = before - article.current_text().len();
        info!("Whitespace collapse dropped {} bytes", removed);
        println!("  whitespace collapse: {removed} bytes removed");
    }

    if args.write {
        let out_dir = args.out_dir.unwrap_or_else(|| args.data_dir.clone());
        fs::create_dir_all(&out_dir)?;
        let text_path = out_dir.join(format!("{}.clean.txt", args.source_id));
        let annot_path = out_dir.join(format!("{}.clean.json", args.source_id));
        fs::write(&text_path, article.current_text())?;
        fs::write(&annot_path, serde_json::to_string_pretty(&article.annotations)?)?;
        info!("Wrote cleaned article to {}", text_path.display());
        println!("  wrote: {}", text_path.display());
        println!("  wrote: {}", annot_path.display());
    }

    Ok(())
}
