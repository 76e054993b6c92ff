//! Gleaner CLI: save, browse, and summarize highlights from the terminal.
//!
//! Usage:
//!   gleaner save <text> --url <url> [--title <title>] [--db path]
//!   gleaner list [--search term] [--db path]
//!   gleaner delete <id> [--db path]
//!   gleaner open <id> [--db path]
//!   gleaner summarize <id> [--db path]
//!   gleaner clear-summary <id> [--db path]

use chrono::Utc;
use clap::{Parser, Subcommand};
use gleaner::display::{format_age, truncate_with_ellipsis};
use gleaner::host::HostError;
use gleaner::selection::SAVE_SHORTCUT_KEY;
use gleaner::{
    ClipboardSink, EnrichmentOutcome, GeminiClient, HighlightId, HighlightPatch,
    HighlightRepository, HighlightStore, KeyPress, Notifier, OpenStore, Page, PopupHost, PopupSession, Rect,
    Selection, SelectionTracker, Severity, SqliteBlobStore, SummaryConfig, UrlOpener, Viewport,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gleaner",
    version,
    about = "Save highlighted passages and summarize them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a passage as a new highlight
    Save {
        /// The passage to save
        text: String,
        /// Address of the page the passage came from
        #[arg(long)]
        url: String,
        /// Title of the page the passage came from
        #[arg(long, default_value = "")]
        title: String,
    },
    /// List saved highlights, newest first
    List {
        /// Only show highlights whose text or title contains this
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Delete a highlight
    Delete { id: String },
    /// Show the address of the page a highlight came from
    Open { id: String },
    /// Generate a summary for a highlight
    Summarize { id: String },
    /// Remove a highlight's summary
    ClearSummary { id: String },
}

/// A page whose selection is fixed to the text given on the command line
struct CommandLinePage {
    text: String,
    url: String,
    title: String,
}

impl Page for CommandLinePage {
    fn selection(&self) -> Option<Selection> {
        Some(Selection {
            text: self.text.clone(),
            bounds: Rect::default(),
        })
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(80.0, 24.0)
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }
}

/// Host capabilities backed by the terminal
struct Terminal;

impl Notifier for Terminal {
    fn notify(&self, message: &str, severity: Severity) {
        let label = match severity {
            Severity::Success => "ok",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("[{}] {}", label, message);
    }
}

impl ClipboardSink for Terminal {
    fn write_text(&self, _text: &str) -> Result<(), HostError> {
        Err(HostError::Clipboard("no clipboard in terminal mode".to_string()))
    }
}

impl UrlOpener for Terminal {
    fn open(&self, url: &str) -> Result<(), HostError> {
        if url.trim().is_empty() {
            return Err(HostError::OpenUrl("no address recorded".to_string()));
        }
        println!("{}", url);
        Ok(())
    }
}

/// Get the default database path (~/.local/share/gleaner/gleaner.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("gleaner").join("gleaner.db")
}

fn open_repository(db: Option<PathBuf>) -> Result<HighlightRepository, String> {
    let db_path = db.unwrap_or_else(default_db_path);
    let store =
        SqliteBlobStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))?;
    Ok(HighlightRepository::new(HighlightStore::new(Arc::new(store))))
}

fn open_session(repository: HighlightRepository) -> Result<PopupSession, String> {
    let config = SummaryConfig::from_env().map_err(|e| e.to_string())?;
    let terminal = Arc::new(Terminal);
    let host = PopupHost {
        notifier: terminal.clone(),
        clipboard: terminal.clone(),
        opener: terminal,
    };
    Ok(PopupSession::open(
        repository,
        Arc::new(GeminiClient::new(config)),
        host,
    ))
}

fn cmd_save(repository: HighlightRepository, text: String, url: String, title: String) -> i32 {
    let page = Arc::new(CommandLinePage { text, url, title });
    let mut tracker = SelectionTracker::new(page, Arc::new(Terminal), repository.clone());
    let before = repository.list().len();

    tracker.on_key(&KeyPress::ctrl(SAVE_SHORTCUT_KEY));

    match repository.list() {
        records if records.len() > before => {
            println!("{}", records[0].id);
            0
        }
        _ => 1,
    }
}

fn cmd_list(repository: &HighlightRepository, search: &str) -> i32 {
    let records: Vec<_> = repository
        .list()
        .into_iter()
        .filter(|r| r.matches(search))
        .collect();
    if records.is_empty() {
        println!("No highlights saved.");
        return 0;
    }

    let now = Utc::now();
    for record in records {
        println!(
            "{}  {:<10}  {}",
            record.id,
            format_age(record.timestamp, now),
            truncate_with_ellipsis(&record.text, 60)
        );
        println!("    {} <{}>", record.title, record.url);
        if let Some(summary) = &record.summary {
            println!("    summary: {}", summary);
        }
    }
    0
}

fn cmd_delete(repository: &HighlightRepository, id: &HighlightId) -> i32 {
    match repository.delete(id) {
        Ok(true) => {
            println!("Deleted highlight {}", id);
            0
        }
        Ok(false) => {
            eprintln!("Error: highlight '{}' not found", id);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_open(repository: &HighlightRepository, id: &HighlightId) -> i32 {
    let Some(record) = repository.get(id) else {
        eprintln!("Error: highlight '{}' not found", id);
        return 1;
    };
    match Terminal.open(&record.url) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_summarize(repository: HighlightRepository, id: &HighlightId) -> i32 {
    let session = match open_session(repository) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match session.summarize(id).await {
        Ok(EnrichmentOutcome::Applied(summary)) => {
            println!("{}", summary);
            0
        }
        Ok(EnrichmentOutcome::NotFound) => {
            eprintln!("Error: highlight '{}' not found", id);
            1
        }
        Ok(EnrichmentOutcome::AlreadyRequesting) => 1,
        // Already reported through the notifier
        Err(_) => 1,
    }
}

fn cmd_clear_summary(repository: &HighlightRepository, id: &HighlightId) -> i32 {
    match repository.update(id, &HighlightPatch::clear_summary()) {
        Ok(true) => {
            println!("Removed summary from {}", id);
            0
        }
        Ok(false) => {
            eprintln!("Error: highlight '{}' not found", id);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repository = match open_repository(cli.db) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Save { text, url, title } => cmd_save(repository, text, url, title),
        Commands::List { search } => cmd_list(&repository, &search),
        Commands::Delete { id } => cmd_delete(&repository, &HighlightId::from_string(id)),
        Commands::Open { id } => cmd_open(&repository, &HighlightId::from_string(id)),
        Commands::Summarize { id } => cmd_summarize(repository, &HighlightId::from_string(id)).await,
        Commands::ClearSummary { id } => {
            cmd_clear_summary(&repository, &HighlightId::from_string(id))
        }
    };
    std::process::exit(code);
}
