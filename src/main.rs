use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use segment_translator::{DictStore, DictionaryEntry, SearchEngine, parser, resolve_escapes};

#[derive(Parser)]
#[command(name = "segtrans", about = "Maintenance shell for the segment translator engine")]
struct Cli {
    /// SQLite database path, overriding DATABASE_URL
    #[arg(long)]
    database: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a csv dictionary source into the store
    Import { csv: PathBuf },
    /// Look up one headword
    Query { word: String },
    /// Tokenize a sentence and translate every candidate word
    Search {
        sentence: String,
        #[arg(long)]
        show_ignored: bool,
    },
    /// Flip the ignored flag of an entry
    Toggle { id: i32 },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let database_url = cli
        .database
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqldict.db".into());

    let store = DictStore::open(&database_url)
        .with_context(|| format!("opening dictionary store at {database_url}"))?;

    match cli.command {
        Command::Import { csv } => {
            let records =
                parser::read_csv(&csv).with_context(|| format!("reading {}", csv.display()))?;
            let count = store.bulk_import(&records)?;
            println!("imported {count} records");
        }
        Command::Query { word } => match store.lookup(&word)? {
            Some(entry) => print_entry(&entry),
            None => println!("no entry for {word}"),
        },
        Command::Search {
            sentence,
            show_ignored,
        } => {
            let engine = SearchEngine::new(store);
            let outcome = engine.search(&sentence, show_ignored)?;
            for row in &outcome.rows {
                println!("{}  {}", row.word, row.phonetic);
                for line in row.translation.lines() {
                    println!("  {line}");
                }
                for form in &row.exchange {
                    println!("  {form}");
                }
            }
            if !outcome.unknown.is_empty() {
                println!("unknown: {}", outcome.unknown.join(", "));
            }
        }
        Command::Toggle { id } => {
            let engine = SearchEngine::new(store);
            let ignored = engine.toggle_ignored(id)?;
            println!("entry {id} ignored: {ignored}");
        }
    }
    Ok(())
}

fn print_entry(entry: &DictionaryEntry) {
    println!("word: {}", entry.word);
    println!("phonetic: {}", entry.phonetic);
    println!("translation:");
    for line in resolve_escapes(&entry.translation).lines() {
        println!("  {line}");
    }
    println!("exchange: {}", entry.exchange);
    println!("definition:");
    for line in resolve_escapes(&entry.definition).lines() {
        println!("  {line}");
    }
    println!("ignored: {}", entry.ignored);
}
