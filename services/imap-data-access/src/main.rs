//! Command line access to the IMAP data archive.
//!
//! - `download <file>` fetches a file into the local archive layout
//! - `query ...` searches the remote catalog and prints a table or JSON
//! - `upload <file>` sends a finished product to the archive

mod table;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use archive_client::{ArchiveClient, QueryParams};
use clap::{Parser, Subcommand, ValueEnum};
use file_validation::ScienceFilePath;
use imap_common::config::{API_KEY_ENV, DATA_ACCESS_URL_ENV, DATA_DIR_ENV};
use imap_common::ArchiveConfig;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "imap-data-access")]
#[command(about = "Download, query and upload IMAP data archive files")]
struct Args {
    /// Local archive root
    #[arg(long, env = DATA_DIR_ENV, global = true)]
    data_dir: Option<PathBuf>,

    /// Data access API base URL
    #[arg(long, env = DATA_ACCESS_URL_ENV, global = true)]
    url: Option<String>,

    /// API key sent with uploads
    #[arg(long, env = API_KEY_ENV, global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// YAML configuration file, read instead of the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download a file into the local archive
    Download {
        /// Filename, optionally with leading directories
        file_path: PathBuf,
    },

    /// Query the archive catalog
    Query(QueryArgs),

    /// Upload a local file to the archive
    Upload {
        file_path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct QueryArgs {
    #[arg(long)]
    instrument: Option<String>,

    #[arg(long)]
    data_level: Option<String>,

    #[arg(long)]
    descriptor: Option<String>,

    /// Files starting on or after this date (YYYYMMDD)
    #[arg(long)]
    start_date: Option<String>,

    /// Files starting before this date (YYYYMMDD)
    #[arg(long)]
    end_date: Option<String>,

    /// repointNNNNN
    #[arg(long)]
    repointing: Option<String>,

    /// vNNN or latest
    #[arg(long)]
    version: Option<String>,

    #[arg(long)]
    extension: Option<String>,

    /// Look up a single science file by name
    #[arg(long, conflicts_with_all = [
        "instrument", "data_level", "descriptor", "start_date",
        "end_date", "repointing", "version", "extension",
    ])]
    filename: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output_format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

impl QueryArgs {
    fn params(&self) -> Result<QueryParams> {
        if let Some(filename) = &self.filename {
            let file = ScienceFilePath::new(filename)
                .with_context(|| format!("Cannot query by filename {filename}"))?;
            return Ok(QueryParams::for_science_file(&file));
        }

        Ok(QueryParams {
            instrument: self.instrument.clone(),
            data_level: self.data_level.clone(),
            descriptor: self.descriptor.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            repointing: self.repointing.clone(),
            version: self.version.clone(),
            extension: self.extension.clone(),
        })
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Start from the config file or environment, then apply explicit flags.
fn resolve_config(args: &Args) -> Result<ArchiveConfig> {
    let mut config = match &args.config {
        Some(path) => ArchiveConfig::load(path)?,
        None => ArchiveConfig::from_env()?,
    };

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(url) = &args.url {
        config.data_access_url = url.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let config = resolve_config(&args)?;
    debug!(
        data_dir = %config.data_dir.display(),
        url = %config.data_access_url,
        "Using archive configuration"
    );
    let client = ArchiveClient::new(config).context("Failed to create archive client")?;

    match &args.command {
        Command::Download { file_path } => {
            let path = client
                .download(file_path)
                .await
                .with_context(|| format!("Failed to download {}", file_path.display()))?;
            println!("Successfully downloaded the file to: {}", path.display());
        }
        Command::Query(query) => {
            let params = query.params()?;
            let records = client.query(&params).await.context("Query failed")?;
            match query.output_format {
                OutputFormat::Table => print!("{}", table::render(&records)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
            }
        }
        Command::Upload { file_path } => {
            if !file_path.is_file() {
                bail!("{} is not a file", file_path.display());
            }
            client
                .upload(file_path, None)
                .await
                .with_context(|| format!("Failed to upload {}", file_path.display()))?;
            println!("Successfully uploaded the file to the IMAP SDC");
        }
    }

    Ok(())
}
