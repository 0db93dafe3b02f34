//! Omni-Crawler main entry point
//!
//! With a URL the crawl runs in the terminal; without one (or with `--gui`)
//! the web GUI is served instead.

use clap::Parser;
use omni_crawler::config::{load_config_with_hash, Config};
use omni_crawler::crawler::{run_crawl, CrawlRequest};
use omni_crawler::gui;
use omni_crawler::output::ConsoleSink;
use omni_crawler::{crawl_exit_status, select_mode, LaunchMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Omni-Crawler: documentation harvester for AI
///
/// Fetches a documentation index, follows every link under it and writes
/// the cleaned content of all pages into a single markdown file.
#[derive(Parser, Debug)]
#[command(name = "omni-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Documentation harvester for AI", long_about = None)]
struct Cli {
    /// Documentation URL to crawl; omit it to start the GUI
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Output markdown file
    #[arg(short, long, default_value = "output.md")]
    output: PathBuf,

    /// Start the web GUI even if a URL is given
    #[arg(long)]
    gui: bool,

    /// Address the GUI listens on (overrides the config file)
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match cli.config.as_deref() {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((config, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    config
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    match select_mode(cli.url.as_deref(), cli.gui) {
        LaunchMode::Cli { url } => handle_cli(&config, url, cli.output).await,
        LaunchMode::Gui => handle_gui(config, cli.bind).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("omni_crawler=info,warn"),
            1 => EnvFilter::new("omni_crawler=debug,info"),
            2 => EnvFilter::new("omni_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Progress messages own stdout; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs one crawl in the terminal
async fn handle_cli(
    config: &Config,
    url: String,
    output: PathBuf,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("📟 Modo Terminal activado");

    let request = CrawlRequest::new(url, output);
    let outcome = run_crawl(config, &request, &ConsoleSink).await;
    if let Err(e) = &outcome {
        tracing::error!("Crawl failed: {}", e);
        println!("❌ {}", e);
    }

    Ok(ExitCode::from(crawl_exit_status(&outcome)))
}

/// Serves the web GUI until interrupted
async fn handle_gui(
    config: Config,
    bind: Option<String>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("🖥️  Lanzando interfaz gráfica...");

    let addr = bind.unwrap_or_else(|| config.gui.bind.clone());
    println!("   Abre http://{} en tu navegador", addr);

    gui::serve(config, &addr).await?;
    Ok(ExitCode::SUCCESS)
}
