use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "podium",
    about = "Podium — live audience comments, questions, and votes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the Podium server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on [default: 127.0.0.1:8080]
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the similarity service
    #[arg(long)]
    pub similar_addr: Option<String>,

    /// Base URL of the sentiment service
    #[arg(long)]
    pub senti_addr: Option<String>,

    /// Peer server that receives a copy of every added entry (repeatable)
    #[arg(long = "peer")]
    pub peers: Vec<String>,

    /// Width of the /recent window, in seconds
    #[arg(long)]
    pub recent_window_secs: Option<u64>,

    /// How many entries /top returns
    #[arg(long)]
    pub top_limit: Option<usize>,
}
