use clap::Parser;
use std::path::PathBuf;

/// Websocket host for XO game sessions
#[derive(Parser, Debug)]
#[command(name = "xo-backend", version)]
pub struct Args {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Directory for the daily rolling server log
    #[arg(long, default_value = "./logs")]
    pub log_dir: PathBuf,
}

impl Args {
    // Prefix handed to registering clients, completed with their id
    pub fn ws_base_url(&self) -> String {
        format!("ws://{}:{}/ws", self.host, self.port)
    }
}
