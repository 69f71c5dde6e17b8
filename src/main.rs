use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use poe_goblin::index::ItemIndex;
use poe_goblin::models::{ItemRecord, Language, ParseOutcome, ParsedItem};
use poe_goblin::parser::parse_clipboard;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "poe-goblin")]
#[command(about = "Parse Path of Exile item text and resolve it for price lookups")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse copied item text into structured data
    Parse(ParseArgs),
    /// Parse item text and resolve the item against the name dictionary
    Lookup(LookupArgs),
    /// Parse every item dump in a directory
    Batch(BatchArgs),
}

#[derive(Args)]
struct ParseArgs {
    /// File containing the copied item text (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LookupArgs {
    /// Market catalog JSON (array of items)
    #[arg(long)]
    catalog: PathBuf,

    /// Japanese name mapping JSON (English name -> Japanese name)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// File containing the copied item text (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Directory of saved item dumps, one item per file
    #[arg(short, long)]
    dir: PathBuf,

    /// Write a CSV report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    item: &'a ParsedItem,
    record: Option<&'a ItemRecord>,
    matched_language: Option<Language>,
}

/// Reads item text; `None` when the bytes are not UTF-8.
fn read_input(input: Option<&PathBuf>) -> Result<Option<String>> {
    let bytes = match input {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read item text: {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read item text from stdin")?;
            buf
        }
    };
    Ok(String::from_utf8(bytes).ok())
}

fn parse_input(input: Option<&PathBuf>) -> Result<ParseOutcome> {
    let text = read_input(input)?;
    let outcome = parse_clipboard(text.as_deref());
    if let ParseOutcome::Invalid { reason, raw_text } = &outcome {
        warn!(reason = %reason, length = raw_text.len(), "Could not recognize item text");
        println!("could not recognize item text: {}", reason);
    }
    Ok(outcome)
}

fn run_parse(args: ParseArgs) -> Result<()> {
    let outcome = parse_input(args.input.as_ref())?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize item")?
        );
    } else if let Some(item) = outcome.item() {
        println!("{}", item);
    }
    Ok(())
}

fn run_lookup(args: LookupArgs) -> Result<()> {
    let index = ItemIndex::load(&args.catalog, args.mapping.as_deref())?;
    let outcome = parse_input(args.input.as_ref())?;
    let Some(item) = outcome.item() else {
        return Ok(());
    };

    let resolved = index.resolve(&item.item_name, item.language);
    if resolved.is_none() {
        warn!(name = %item.item_name, "Item not found in dictionary");
    }

    if args.json {
        let output = LookupOutput {
            item,
            record: resolved.map(|r| r.record),
            matched_language: resolved.map(|r| r.matched_language),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize lookup")?
        );
        return Ok(());
    }

    println!("{}", item);
    println!();
    match resolved {
        Some(r) => {
            println!("Item ID:   {}", r.record.id);
            println!("English:   {}", r.record.canonical_name);
            if let Some(ja) = index.name_in(r.record.id, Language::Japanese) {
                println!("Japanese:  {}", ja);
            }
            println!("Type:      {}", r.record.item_type);
            println!("Category:  {}", r.record.category);
            println!("Matched:   {}", r.matched_language);
        }
        None => println!("Not found in dictionary: {}", item.item_name),
    }
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let start = Instant::now();
    let stats = poe_goblin::batch::run_batch(&args.dir, args.report.as_deref())?;
    let duration = start.elapsed();

    println!();
    println!("=== Summary ===");
    println!("Parse time:     {:.2}s", duration.as_secs_f64());
    println!("Files parsed:   {}", stats.inputs());
    println!("Valid items:    {}", stats.valid());
    println!("Empty input:    {}", stats.empty_input());
    println!("Name not found: {}", stats.name_not_found());
    println!("Mods collected: {}", stats.mods());
    if let Some(report) = &args.report {
        println!("Report:         {}", report.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let result = match cli.command {
        Commands::Parse(args) => run_parse(args),
        Commands::Lookup(args) => run_lookup(args),
        Commands::Batch(args) => run_batch(args),
    };

    match result {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
