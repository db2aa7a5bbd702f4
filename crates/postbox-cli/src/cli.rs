//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "postbox")]
#[command(about = "Read, mark, and manage synced posts from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the local database file
    #[arg(long, value_name = "PATH", global = true)]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Populate the local store from the remote origin if it is empty
    Sync,
    /// List posts from the local store
    List {
        /// Show at most this many posts
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only show unread posts
        #[arg(long)]
        unread: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single post
    Show {
        /// Post ID
        id: i64,
    },
    /// Mark posts as read
    Read {
        /// Post IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Delete posts
    Delete {
        /// Post IDs
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Follow the live post list, printing every change
    Watch,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
