use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Cached text-to-speech service
#[derive(Debug, Parser)]
#[command(name = "wordcast", about = "Text-to-speech with a persistent audio cache")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "wordcast.toml", env = "WORDCAST_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "WORDCAST_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info", env = "WORDCAST_LOG")]
    pub log: String,
}
