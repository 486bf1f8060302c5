use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nexus_core::persona::Mode;

#[derive(Parser, Debug)]
#[command(name = "nexus", version, about = "Chat with Cipher or Phantom from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version and exit.
    Version,

    /// Start an interactive chat against a Nexus relay.
    Chat(ChatArgs),
}

#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Base URL of the relay.
    #[arg(long, default_value = "http://localhost:3001")]
    pub relay_url: String,

    /// Persona to start with: `blue` (Cipher) or `red` (Phantom).
    #[arg(long, default_value = "blue", value_parser = parse_mode)]
    pub mode: Mode,

    /// Directory holding client state (defaults to the platform data dir).
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse::<Mode>().map_err(|e| e.to_string())
}
