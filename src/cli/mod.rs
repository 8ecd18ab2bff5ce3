//! Command-line front end.
//!
//! Each invocation mounts a synchronizer against the configured backend,
//! performs one action through it, and renders the resulting view.
//! `endpoints` only prints the route table and never contacts the backend.

mod prompt;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;

use crate::api::HttpBookApi;
use crate::book::BookId;
use crate::config::{self, ClientConfig};
use crate::error::ShelfError;
use crate::sync::{AssumeYes, Confirm, Outcome, Synchronizer};

pub use prompt::StdinConfirm;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Browse and edit a remote book collection")]
pub struct Cli {
    /// TOML config file (defaults to ./bookshelf.toml when present).
    #[arg(long, global = true, env = "BOOKSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8080.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds (0 waits forever).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List books, optionally filtered by title or year.
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one book fetched directly from the backend.
    Show { id: BookId },
    /// Create a book. A missing or non-numeric year means the current year.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: Option<String>,
    },
    /// Edit a book; omitted fields keep their current value.
    Edit {
        id: BookId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },
    /// Delete a book after confirmation.
    Rm {
        id: BookId,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the backend routes for the configured base URL.
    Endpoints,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Shelf(#[from] ShelfError),
    #[error("book {0} not found")]
    NotFound(BookId),
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("another operation is in progress")]
    Busy,
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Shelf(err.into())
    }
}

pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(args)
}

/// Config file and environment, then command-line flags on top.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    resolve_config_with(cli, |key| std::env::var(key).ok())
}

pub fn resolve_config_with(
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, CliError> {
    let mut config = config::load_with(cli.config.as_deref(), env)?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(ms) = cli.timeout_ms {
        config.request_timeout_ms = ms;
    }
    Ok(config)
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, "resolved config");
    execute(cli.command, &config, &StdinConfirm, &mut io::stdout()).await
}

/// Run one command against the backend in `config`, asking `confirm` before
/// deletes and rendering to `out`.
pub async fn execute<C, W>(
    command: Command,
    config: &ClientConfig,
    confirm: &C,
    out: &mut W,
) -> Result<(), CliError>
where
    C: Confirm + ?Sized,
    W: Write,
{
    if let Command::Endpoints = command {
        render::endpoints(out, &config.endpoints())?;
        return Ok(());
    }

    let shelf = Synchronizer::from_config(HttpBookApi::from_config(config), config);
    shelf.mount().await?;

    match command {
        Command::List { search } => {
            render::shelf(out, &shelf.view(search.as_deref().unwrap_or("")))?;
        }
        Command::Show { id } => {
            let book = shelf.fetch_one(id).await?;
            render::book(out, &book)?;
        }
        Command::Add { title, year } => {
            shelf.open_new();
            shelf.set_title(title);
            if let Some(year) = year {
                shelf.set_year_input(&year);
            }
            expect_done(shelf.submit().await?)?;
            render::shelf(out, &shelf.view(""))?;
        }
        Command::Edit { id, title, year } => {
            if !shelf.open_edit_id(id) {
                return Err(CliError::NotFound(id));
            }
            if let Some(title) = title {
                shelf.set_title(title);
            }
            if let Some(year) = year {
                shelf.set_year_input(&year);
            }
            expect_done(shelf.submit().await?)?;
            render::shelf(out, &shelf.view(""))?;
        }
        Command::Rm { id, yes } => {
            let outcome = if yes {
                shelf.delete(id, &AssumeYes).await?
            } else {
                shelf.delete(id, confirm).await?
            };
            if outcome == Outcome::Declined {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            expect_done(outcome)?;
            render::shelf(out, &shelf.view(""))?;
        }
        Command::Endpoints => render::endpoints(out, &config.endpoints())?,
    }
    Ok(())
}

fn expect_done(outcome: Outcome) -> Result<(), CliError> {
    match outcome {
        Outcome::Done | Outcome::Declined | Outcome::NoDraft => Ok(()),
        Outcome::Invalid => Err(CliError::EmptyTitle),
        Outcome::Busy => Err(CliError::Busy),
    }
}
