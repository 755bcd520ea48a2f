// SPDX-License-Identifier: AGPL-3.0-or-later
//! folio CLI - render portfolio experience content

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use folio_content::ContentConfig;
use folio_core::OutputFormat;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::{Context, DetailFormat};

const DEFAULT_CONFIG: &str = "folio.toml";

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Render CMS experience records to cards, HTML, Markdown and text", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(short, long, global = true, env = "FOLIO_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Date that current roles run to (YYYY-MM-DD, default: today)
    #[arg(long, global = true, value_name = "DATE")]
    today: Option<NaiveDate>,

    /// Override the configured preview length
    #[arg(long, global = true, value_name = "CHARS")]
    preview_length: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List experience cards, newest first
    #[command(alias = "ls")]
    List {
        /// Experience export (list endpoint response or array of records)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one experience with its full description
    Show {
        /// Record id
        id: String,

        /// Experience export
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: ShowFormat,
    },

    /// Render a rich-text document file
    Render {
        /// Rich-text JSON document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    #[value(alias = "md")]
    Markdown,
    #[value(alias = "txt")]
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Markdown => OutputFormat::Markdown,
            Format::Text => OutputFormat::PlainText,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowFormat {
    Html,
    #[value(alias = "md")]
    Markdown,
    #[value(alias = "txt")]
    Text,
    Json,
}

impl From<ShowFormat> for DetailFormat {
    fn from(format: ShowFormat) -> Self {
        match format {
            ShowFormat::Html => DetailFormat::Rendered(OutputFormat::Html),
            ShowFormat::Markdown => DetailFormat::Rendered(OutputFormat::Markdown),
            ShowFormat::Text => DetailFormat::Rendered(OutputFormat::PlainText),
            ShowFormat::Json => DetailFormat::Json,
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ContentConfig> {
    match explicit {
        Some(path) => ContentConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            debug!(path = DEFAULT_CONFIG, "Using default config file");
            Ok(ContentConfig::load(Path::new(DEFAULT_CONFIG))?)
        }
        None => Ok(ContentConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(length) = cli.preview_length {
        config.preview_length = length;
    }
    let ctx = Context {
        config,
        today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
    };

    match cli.command {
        Commands::List { input, json } => {
            let path = ctx.source_path(input)?;
            println!("{}", commands::list(&ctx, &path, json).await?);
        }
        Commands::Show { id, input, format } => {
            let path = ctx.source_path(input)?;
            println!("{}", commands::show(&ctx, &path, &id, format.into()).await?);
        }
        Commands::Render {
            input,
            format,
            output,
        } => {
            let rendered = commands::render(&ctx, &input, format.into()).await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, rendered)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Wrote rendered document");
                }
                None => println!("{}", rendered),
            }
        }
    }

    Ok(())
}
