use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mdchat")]
#[command(author, version, about = "Markdown chat relay and terminal client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP relay endpoint
    Serve {
        /// Port to listen on (default: 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start an interactive chat session against a relay
    Chat {
        /// Relay base URL (default: "http://127.0.0.1:3000")
        #[arg(short, long)]
        relay_url: Option<String>,

        /// Session record file (default: "./chat_sessions.json")
        #[arg(short, long)]
        storage: Option<String>,

        /// Keep session records in memory only
        #[arg(short, long)]
        ephemeral: bool,
    },
}
