use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_docwriter_config::Config;
use markdown_docwriter_engine::{
    Converter, ConverterOptions, Document, FontSpec, MarkdownWriter, MemoryStore, TablePlacement,
    TypedBlock, locate_and_fill, ops::BatchUpdateRequest, split_blocks,
};
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

/// Document id used for dry runs against the in-memory store.
const DRY_RUN_DOCUMENT_ID: &str = "dry-run";

#[derive(Parser)]
#[command(name = "markdown-docwriter")]
#[command(version)]
#[command(about = "Convert Markdown into positional edit operations for rich documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ~/.config/markdown-docwriter/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the batch request for a prose-only conversion
    Convert {
        /// Markdown file, or `-` for stdin
        input: PathBuf,

        /// Offset the first insert lands at
        #[arg(long, default_value_t = 1)]
        start_index: usize,
    },
    /// Print the typed blocks a document splits into
    Split {
        /// Markdown file, or `-` for stdin
        input: PathBuf,
    },
    /// Write a document into a fresh in-memory document and print the result
    Write {
        /// Markdown file, or `-` for stdin
        input: PathBuf,

        /// Document id reported in the outcome
        #[arg(long, default_value = DRY_RUN_DOCUMENT_ID)]
        document_id: String,
    },
    /// Plan cell fills for a table in a saved document snapshot
    FillTable {
        /// Snapshot JSON as returned by the document store
        #[arg(long)]
        snapshot: PathBuf,

        /// Markdown file holding the table to fill
        #[arg(long)]
        data: PathBuf,

        /// Offset the table was inserted at
        #[arg(long, conflicts_with = "first")]
        anchor: Option<usize>,

        /// Fill the first table in the snapshot
        #[arg(long)]
        first: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let level = if cli.verbose || config.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    log::debug!("{} starting", config.app_name);
    let options = ConverterOptions {
        code_font: FontSpec {
            family: config.code_font_family.clone(),
            size_pt: config.code_font_size_pt,
        },
    };

    match cli.command {
        Commands::Convert { input, start_index } => {
            let markdown = read_input(&input)?;
            let ops = Converter::new(options).convert(&markdown, start_index);
            print_json(&BatchUpdateRequest::from_operations(&ops))
        }
        Commands::Split { input } => {
            let markdown = read_input(&input)?;
            print_json(&split_blocks(&markdown))
        }
        Commands::Write { input, document_id } => {
            let markdown = read_input(&input)?;
            if markdown.trim().is_empty() {
                anyhow::bail!("Markdown content must not be empty");
            }
            let mut store = MemoryStore::new();
            store.create_document(&document_id, "Dry run");
            let outcome = MarkdownWriter::with_options(&mut store, options)
                .write_markdown(&document_id, markdown.trim())
                .with_context(|| format!("Failed to write document {document_id}"))?;
            print_json(&outcome)?;
            if let Some(doc) = store.document(&document_id) {
                println!("{}", doc.plain_text());
            }
            Ok(())
        }
        Commands::FillTable {
            snapshot,
            data,
            anchor,
            first,
        } => {
            let raw = read_input(&snapshot)?;
            let document: Document = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid snapshot JSON in {}", snapshot.display()))?;
            let rows = first_table(&read_input(&data)?)
                .with_context(|| format!("No Markdown table found in {}", data.display()))?;
            let placement = match (anchor, first) {
                (Some(anchor), false) => TablePlacement::NearAnchor(anchor),
                _ => TablePlacement::First,
            };
            let ops = locate_and_fill(&document, &rows, placement)?;
            print_json(&BatchUpdateRequest::from_operations(&ops))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn first_table(markdown: &str) -> Option<Vec<Vec<String>>> {
    split_blocks(markdown).into_iter().find_map(|block| match block {
        TypedBlock::Table { rows } => Some(rows),
        TypedBlock::Text { .. } => None,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_table_skips_leading_text() {
        let md = "Intro\n\n| A | B |\n|---|---|\n| 1 | 2 |\n";
        assert_eq!(
            first_table(md),
            Some(vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ])
        );
    }

    #[test]
    fn first_table_none_for_prose() {
        assert_eq!(first_table("just words\nmore words"), None);
    }

    #[test]
    fn cli_parses_fill_table_with_anchor() {
        let cli = Cli::parse_from([
            "markdown-docwriter",
            "fill-table",
            "--snapshot",
            "doc.json",
            "--data",
            "table.md",
            "--anchor",
            "12",
        ]);
        match cli.command {
            Commands::FillTable { anchor, first, .. } => {
                assert_eq!(anchor, Some(12));
                assert!(!first);
            }
            _ => panic!("expected fill-table"),
        }
    }
}
