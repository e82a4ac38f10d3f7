use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sidenote")]
#[command(about = "Drive the notes sidebar sync footer from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to the footer config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines script of host messages and UI input
    Replay {
        /// Script path (`-` reads stdin)
        script: PathBuf,
        /// Print each rendered footer as JSON
        #[arg(long)]
        json: bool,
        /// Local storage JSON document consulted for stored credentials
        #[arg(long, value_name = "PATH")]
        storage: Option<PathBuf>,
        /// Directory receiving exported files
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Extension version reported to the feedback survey
        #[arg(long)]
        extension_version: Option<String>,
        /// Browser version reported to the feedback survey
        #[arg(long)]
        browser_version: Option<String>,
        /// WebExtension messages.json layered over the English catalog
        #[arg(long, value_name = "PATH")]
        locale: Option<PathBuf>,
    },
    /// List footer statuses and their display flags
    States {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export a notes content file as a standalone HTML document
    Export {
        /// File with the notes HTML content
        content: PathBuf,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}
