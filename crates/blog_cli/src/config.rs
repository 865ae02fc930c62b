//! Command-line configuration.
//!
//! # Responsibility
//! - Parse store location, logging options and the requested command.

use blog_core::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "blog")]
#[command(about = "Manage blog authors and posts in a local SQLite store")]
pub struct CliConfig {
    /// SQLite database file; created and migrated on first use.
    #[arg(long, default_value = "blog.db")]
    pub db: PathBuf,

    /// trace|debug|info|warn|error; defaults to the build-mode level.
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print core linkage and version.
    Ping,
    #[command(subcommand)]
    Author(AuthorCommand),
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Debug, Subcommand)]
pub enum AuthorCommand {
    Add {
        #[arg(long)]
        name: String,
        /// Exactly ten digits.
        #[arg(long)]
        phone: Option<String>,
    },
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    Rename {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Set the phone number, or clear it when `--phone` is omitted.
    SetPhone {
        id: i64,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        /// Fiction or Non-Fiction.
        #[arg(long)]
        category: Option<String>,
    },
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value = "0")]
        offset: u32,
    },
    SetTitle {
        id: i64,
        #[arg(long)]
        title: String,
    },
    /// Replace the body, or clear it when `--content` is omitted.
    SetContent {
        id: i64,
        #[arg(long)]
        content: Option<String>,
    },
    SetSummary {
        id: i64,
        #[arg(long)]
        summary: Option<String>,
    },
    SetCategory {
        id: i64,
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        id: i64,
    },
}
