use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "importance",
    version,
    about = "Issue importance scoring with an idempotent write-back guard"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding importance.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a single issue snapshot
    Score(ScoreCommand),
    /// Process one document-change event against the store
    Handle(HandleCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Snapshot JSON file, or `-` for stdin
    pub input: String,
    /// Evaluation time (RFC 3339); defaults to the current time
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct HandleCommand {
    /// Change event JSON file, or `-` for stdin
    pub event: String,
    /// Store file; overrides [store].path
    #[arg(long)]
    pub store: Option<PathBuf>,
    /// Collection name; overrides [store].collection
    #[arg(long)]
    pub collection: Option<String>,
    /// Evaluation time (RFC 3339); defaults to the current time
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,
    /// Report the decision without writing
    #[arg(long)]
    pub dry_run: bool,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}
