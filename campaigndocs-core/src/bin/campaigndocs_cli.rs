//! Campaign Docs CLI - Bridge interface for the document generator
//!
//! Commands: families, generate, render
//! Documents go to stdout, logs to stderr

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use campaigndocs_core::{
    pipeline::render, CampaignGenerator, CampaignRecord, CatalogError, ContactMethod,
    DocumentContext, DocumentKind, GenerationError, TemplateCatalog, TemplateFamily,
};

#[derive(Parser)]
#[command(name = "campaigndocs-cli")]
#[command(about = "Campaign Docs CLI - guidelines, winner DM, intake form and letter from one record")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of JSON template overrides
    #[arg(short, long, default_value = "templates")]
    templates_dir: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List template families
    Families,

    /// Generate all four documents
    Generate {
        /// Template family label or slug (unknown values fall back to X/事後抽選)
        #[arg(short, long, default_value = "X/事後抽選")]
        family: String,

        /// Path to a flat JSON object of campaign fields
        #[arg(short, long)]
        record: PathBuf,

        /// dm or email
        #[arg(short, long, default_value = "dm")]
        contact: ContactMethod,

        /// Print the document set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate one document from a custom template file
    Render {
        /// guidelines, notification, intake_form or enclosed_letter
        #[arg(short, long)]
        kind: DocumentKind,

        #[arg(short, long, default_value = "X/事後抽選")]
        family: String,

        /// Template text file
        #[arg(short, long)]
        template: PathBuf,

        #[arg(short, long)]
        record: PathBuf,

        #[arg(short, long, default_value = "dm")]
        contact: ContactMethod,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Families => {
            let families: Vec<_> = TemplateFamily::ALL
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "label": f.label(),
                        "slug": f.slug(),
                        "platform": f.platform(),
                        "mode": f.mode(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&families)?);
        }

        Commands::Generate { family, record, contact, json } => {
            let generator = CampaignGenerator::new(TemplateCatalog::load_from_dir(&cli.templates_dir)?);
            let record = read_record(&record)?;
            let ctx = DocumentContext::new(resolve_family(&family)).with_contact_method(contact);

            let set = generator.generate_all(&record, &ctx)?;
            info!(family = %set.family, job_hash = %set.job_hash, "generated document set");

            if json {
                println!("{}", serde_json::to_string_pretty(&set)?);
            } else {
                for kind in DocumentKind::ALL {
                    println!("===== {kind} =====");
                    println!("{}", set.get(kind));
                    println!();
                }
            }
        }

        Commands::Render { kind, family, template, record, contact } => {
            let template = read_text(&template)?;
            let record = read_record(&record)?;
            let ctx = DocumentContext::new(resolve_family(&family)).with_contact_method(contact);
            println!("{}", render(kind, &template, &record, &ctx));
        }
    }
    Ok(())
}

fn resolve_family(label: &str) -> TemplateFamily {
    label.parse().unwrap_or_else(|err| {
        let fallback = TemplateFamily::default();
        warn!(%err, fallback = %fallback, "unknown template family, using default");
        fallback
    })
}

fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_record(path: &Path) -> Result<CampaignRecord, CliError> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| CliError::InvalidRecord {
        path: path.to_path_buf(),
        source,
    })
}
