use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod todo;

/// In-memory todo server
#[derive(Parser, Debug)]
#[command(name = "todo-server", version)]
struct Cli {
    /// Config file path without extension (toml, yaml and json are detected)
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::Config::load_from(&cli.config)?;
    logger::init(&cfg)?;

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr).map_err(|e| {
        logger::log_error(&format!("Could not bind {addr}: {e}"));
        e
    })?;

    let state = Arc::new(config::AppState::new(&cfg));
    logger::log_server_start(&addr, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));
    server::start_server_loop(listener, state, shutdown).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_path_default() {
        let cli = Cli::try_parse_from(["todo-server"]).unwrap();
        assert_eq!(cli.config, "config");
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::try_parse_from(["todo-server", "--config", "deploy/prod"]).unwrap();
        assert_eq!(cli.config, "deploy/prod");
        let cli = Cli::try_parse_from(["todo-server", "-c", "local"]).unwrap();
        assert_eq!(cli.config, "local");
    }

    #[test]
    fn test_config_path_errors() {
        assert!(Cli::try_parse_from(["todo-server", "-c"]).is_err());
        assert!(Cli::try_parse_from(["todo-server", "--port", "80"]).is_err());
    }
}
