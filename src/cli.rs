use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for browsing the learning-path catalog and community directory
#[derive(Parser)]
#[command(name = "pathways")]
#[command(about = "Browse learning paths and developer communities", long_about = None)]
pub struct Cli {
    /// Optional TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all topics grouped by category
    Topics,
    /// Show a topic's sections, resources and videos
    Show {
        /// Topic id (the routing key, e.g. "css")
        topic_id: String,
    },
    /// List developer communities, optionally filtered by platform
    Communities {
        /// Platform name, or "all"
        #[arg(short, long, default_value = "all")]
        platform: String,
        /// Bypass the cached directory and fetch again
        #[arg(long)]
        refresh: bool,
    },
    /// Print catalog statistics
    Stats,
    /// Parse a browser path into a route (debugging)
    Route {
        /// Path such as "/topic/css"
        path: String,
    },
}
