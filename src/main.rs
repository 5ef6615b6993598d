mod cli;
mod config;
mod error;
mod guard;
mod handler;
mod report;
mod scoring;
mod store;
mod types;

use crate::error::{ImportanceError, Result};
use crate::guard::ChangeGuard;
use crate::handler::ScoreHandler;
use crate::store::JsonFileStore;
use crate::types::event::ChangeEvent;
use crate::types::issue::IssueSnapshot;
use chrono::Utc;
use clap::Parser;
use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const MALFORMED_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let loaded = config::load_config(&cli.root)?;
    match cli.command {
        cli::Commands::Score(cmd) => {
            let snapshot = IssueSnapshot::from_json_str(&read_input(&cmd.input)?)?;
            let now = cmd.now.unwrap_or_else(Utc::now);
            let breakdown =
                scoring::checked_score_breakdown(&snapshot, now, &loaded.scoring_weights())?;
            let rendered = report::render(
                report::Report::Score(&breakdown),
                output_format(&cmd.format),
            )?;
            if !cli.quiet {
                println!("{rendered}");
            }
            Ok(())
        }
        cli::Commands::Handle(cmd) => {
            let event = ChangeEvent::from_json_str(&read_input(&cmd.event)?)?;
            let now = cmd.now.unwrap_or_else(Utc::now);

            let store_config = loaded.store_config();
            let store_path = cmd
                .store
                .unwrap_or_else(|| cli.root.join(&store_config.path));
            let collection = cmd.collection.unwrap_or(store_config.collection);
            let store = JsonFileStore::new(store_path, collection);
            tracing::debug!(store = %store.path().display(), "store selected");

            let guard = ChangeGuard::new(loaded.change_epsilon())?;
            let mut handler = ScoreHandler::new(store, loaded.scoring_weights(), guard);
            let decision = if cmd.dry_run {
                handler.preview(&event, now)?
            } else {
                handler.handle(&event, now)?
            };

            let rendered = report::render(
                report::Report::Decision(&decision),
                output_format(&cmd.format),
            )?;
            if !cli.quiet {
                println!("{rendered}");
            }
            if cmd.dry_run && decision.is_write() {
                eprintln!("dry run: score for {} was not written", decision.issue_id());
            }
            Ok(())
        }
    }
}

fn exit_code_for(error: &ImportanceError) -> i32 {
    if error.is_malformed_input() {
        exit_code::MALFORMED_INPUT
    } else {
        exit_code::RUNTIME_FAILURE
    }
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(exit_code_for(&e));
    }
}
