use colored::Colorize;

use podium_server::{PodiumServer, ServerConfig};

use crate::cli::{Cli, Command, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => serve(args),
    }
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    println!("podium server on {}", config.bind_addr.to_string().bold());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(PodiumServer::new(config).serve())?;
    Ok(())
}

/// Start from the config file (or defaults) and let explicit flags win.
fn build_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(similar) = &args.similar_addr {
        config.similar_addr = Some(similar.clone());
    }
    if let Some(senti) = &args.senti_addr {
        config.senti_addr = Some(senti.clone());
    }
    if !args.peers.is_empty() {
        config.peers = args.peers.clone();
    }
    if let Some(secs) = args.recent_window_secs {
        config.recent_window_secs = secs;
    }
    if let Some(limit) = args.top_limit {
        config.top_limit = limit;
    }
    Ok(config)
}
