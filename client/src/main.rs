//! Gnome upload CLI - send files to the organizer backend
//!
//! ```bash
//! gnome-upload report.pdf holiday.jpg          # Upload one batch
//! gnome-upload --url http://nas:5000 --path /upload *.pdf
//! gnome-upload --json scans/*.png              # Print the result as JSON
//! ```
//!
//! The backend URL comes from `--url`, then `GNOME_API_URL` (a `.env` file
//! is honored), then the local development default.

use clap::Parser;
use gnome::{summary_lines, UploadConfig, BASE_URL_ENV, DEFAULT_UPLOAD_PATH, FILES_FIELD};
use gnome_client::{upload_files, BatchReport, ClientError, LocalFile, ProgressReporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gnome-upload")]
#[command(about = "Upload files to the Gnome organizer in a single batch", long_about = None)]
struct Cli {
    /// Files to upload
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Backend base URL
    #[arg(short, long, env = BASE_URL_ENV)]
    url: Option<String>,

    /// Upload route on the backend
    #[arg(short, long, default_value = DEFAULT_UPLOAD_PATH)]
    path: String,

    /// Multipart field name repeated for every file
    #[arg(short, long, default_value = FILES_FIELD)]
    field: String,

    /// Print the result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean; RUST_LOG overrides
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let config = UploadConfig::from_env_value(cli.url.as_deref())
        .with_upload_path(cli.path)
        .with_field_name(cli.field);

    let files = cli
        .files
        .iter()
        .map(LocalFile::open)
        .collect::<Result<Vec<_>, _>>()?;

    eprintln!("📤 Uploading {} file(s) to {}", files.len(), config.endpoint());

    let mut reporter = ProgressReporter::new();
    let (widget, batch, result) = upload_files(&config, files, |widget| {
        for row in reporter.changes(widget) {
            eprintln!("{}", row);
        }
    })
    .await?;

    let result = result?;

    if cli.json {
        let report = BatchReport::new(&widget, batch, &result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!("✅ Upload complete");
        for line in summary_lines(&result) {
            println!("{}", line);
        }
    }

    Ok(())
}
