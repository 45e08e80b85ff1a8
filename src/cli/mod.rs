// CLI module - process entry commands

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// IPAM backend
#[derive(Parser, Debug)]
#[command(name = "ipam-backend")]
#[command(about = "IPv4 address management backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run migrations and start the HTTP server (default)
    Serve,

    /// Run pending migrations on the ipam and audit databases, then exit
    Migrate,
}

impl Cli {
    /// Command to run; serving is the default
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
