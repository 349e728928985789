//! Command definitions and dispatch.

use crate::error::Result;
use crate::reference::RecordRef;
use crate::render;
use applytrack_core::{Persisted, UserEmail, ValidationError};
use applytrack_sync::JobTracker;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "applytrack")]
#[command(about = "Track job applications against an ApplyTrack server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        /// Email address
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log in and remember the session
    Login {
        /// Email address
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List applications
    List,
    /// Count applications per status
    Summary,
    /// Track a new application
    Add {
        /// Company name
        company: String,
        /// Job title
        position: String,
        /// Applied date (YYYY-MM-DD or dd/MM/yyyy), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Applied, Interview, Offer or Rejected
        #[arg(short, long, default_value = "Applied")]
        status: String,
    },
    /// Change an application; omitted fields keep their value
    Update {
        /// Row from the listing as `@n` or quoted `"#n"`, or an identifier
        reference: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Remove an application
    Delete {
        /// Row from the listing as `@n` or quoted `"#n"`, or an identifier
        reference: String,
    },
}

impl Command {
    /// Subcommand name, safe to log
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "register",
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::List => "list",
            Command::Summary => "summary",
            Command::Add { .. } => "add",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
        }
    }
}

/// Run one command and return what should be printed.
pub async fn execute(tracker: &JobTracker, command: Command) -> Result<String> {
    debug!(command = command.name(), "Executing command");

    match command {
        Command::Register { email, password } => {
            let user = tracker.register(&email, &password).await?;
            Ok(format!("Registered {user}. Log in to start tracking."))
        }
        Command::Login { email, password } => {
            let user = tracker.login(&email, &password).await?;
            Ok(format!("Logged in as {user}"))
        }
        Command::Logout => {
            tracker.logout().await?;
            Ok("Logged out".to_string())
        }
        Command::Whoami => Ok(match tracker.current_user().await? {
            Some(user) => user.to_string(),
            None => "Not logged in".to_string(),
        }),
        Command::List => {
            restore(tracker).await?;
            Ok(render::listing(&tracker.records().await))
        }
        Command::Summary => {
            restore(tracker).await?;
            Ok(render::summary(&tracker.summary().await))
        }
        Command::Add {
            company,
            position,
            date,
            status,
        } => {
            // Loaded first so the duplicate check sees current records
            restore(tracker).await?;
            let date = date
                .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            let records = tracker.create(&company, &position, &date, &status).await?;
            Ok(format!("Application added.\n\n{}", render::listing(&records)))
        }
        Command::Update {
            reference,
            company,
            position,
            date,
            status,
        } => {
            restore(tracker).await?;
            let record = resolve(tracker, &reference).await?;
            let current = &record.fields;

            let company = company.unwrap_or_else(|| current.company.clone());
            let position = position.unwrap_or_else(|| current.position.clone());
            let date =
                date.unwrap_or_else(|| current.applied_date.format("%Y-%m-%d").to_string());
            let status = status.unwrap_or_else(|| current.status.to_string());

            let records = tracker
                .update(record.id(), &company, &position, &date, &status)
                .await?;
            Ok(format!("Application updated.\n\n{}", render::listing(&records)))
        }
        Command::Delete { reference } => {
            restore(tracker).await?;
            let record = resolve(tracker, &reference).await?;
            let records = tracker.delete(record.id()).await?;
            Ok(format!("Application deleted.\n\n{}", render::listing(&records)))
        }
    }
}

async fn restore(tracker: &JobTracker) -> Result<UserEmail> {
    tracker
        .restore_session()
        .await?
        .ok_or_else(|| ValidationError::NotLoggedIn.into())
}

async fn resolve(tracker: &JobTracker, reference: &str) -> Result<Persisted> {
    let record = match reference.parse::<RecordRef>()? {
        RecordRef::Position(n) => tracker.record_at(n).await?,
        RecordRef::Id(id) => tracker.find(&id).await?,
    };
    Ok(record)
}
