mod command;
mod metrics;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paperino_core::{
    load_config, validate_config, Config, EngineClient, HttpEngineClient, InfoController,
    ParamsUpdate, SearchController,
};

use command::Command;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("PAPERINO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration; a missing default config file means defaults,
    // an explicitly named one must exist.
    let config = if config_path.exists() || std::env::var("PAPERINO_CONFIG").is_ok() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config file found, using defaults");
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!("Engine base URL: {}", config.engine.base_url);

    let engine: Arc<dyn EngineClient> = Arc::new(
        HttpEngineClient::new(config.engine).context("Failed to create engine client")?,
    );

    // Engine info is loaded once at startup; failure is surfaced but
    // does not prevent searching.
    let mut info_ctl = InfoController::new(Arc::clone(&engine));
    if let Err(e) = info_ctl.load_info().await {
        println!("error: {}", e.message());
    }
    println!("{}", render::header(info_ctl.option_label()));
    println!("type 'help' for commands");

    let mut search_ctl = SearchController::new(engine);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Command::Search(query) => {
                search_ctl.update_params(ParamsUpdate {
                    query: Some(query),
                    ..Default::default()
                });
                match search_ctl.trigger_search().await {
                    Ok(count) => {
                        println!("{} documents", count);
                        print!("{}", render::documents(search_ctl.documents()));
                    }
                    Err(e) => println!("error: {}", e.message()),
                }
            }
            Command::Authors(authors) => {
                search_ctl.update_params(ParamsUpdate {
                    authors: Some(authors),
                    ..Default::default()
                });
                println!("authors filter: '{}'", search_ctl.params().authors);
            }
            Command::Published(published) => {
                search_ctl.update_params(ParamsUpdate {
                    published: Some(published),
                    ..Default::default()
                });
                println!("published filter: '{}'", search_ctl.params().published);
            }
            Command::Judge => match search_ctl.trigger_judge().await {
                Ok(()) => print!("{}", render::documents(search_ctl.documents())),
                Err(e) => println!("error: {}", e.message()),
            },
            Command::List => {
                print!("{}", render::documents(search_ctl.documents()));
            }
            Command::Info => {
                println!("{}", render::header(info_ctl.option_label()));
            }
            Command::Stats => {
                print!("{}", metrics::encode_metrics());
            }
            Command::Help => println!("{}", command::HELP),
            Command::Quit => break,
            Command::Invalid(input) => {
                println!("unrecognized command: '{}' (type 'help')", input);
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
