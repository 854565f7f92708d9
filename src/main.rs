//! Aggregate search gateway command line interface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use agg_search::{server, Gateway, GatewayConfig};

/// Aggregate meta search gateway
#[derive(Parser)]
#[command(name = "agg-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway server
    Serve(ServeArgs),

    /// Search one or more engines from the command line
    Search(SearchArgs),

    /// List available engine shortcuts
    Engines,
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Per-engine fetch timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Public base URL advertised to browsers (defaults to http://localhost:<port>)
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Engine shortcuts to fan out to (comma-separated, e.g., gh,gg,you)
    #[arg(short, long, value_delimiter = ',', default_value = "gg")]
    engines: Vec<String>,

    /// Per-engine fetch timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Print the full JSON response instead of a summary
    #[arg(short, long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::Search(args) => run_search(args).await,
        Commands::Engines => list_engines(),
    }
}

async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = GatewayConfig {
        port: args.port,
        timeout_seconds: args.timeout,
        base_url: args.base_url,
    };
    let gateway = Arc::new(Gateway::from_config(&config)?);
    server::serve(gateway, config).await
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let mut gateway = Gateway::new()?;
    gateway.set_timeout(Duration::from_secs(args.timeout));

    let response = gateway.multi_search(&args.engines, &args.query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("\nSearch results for \"{}\":\n", response.query);
    for engine in &response.results {
        match &engine.outcome.error {
            Some(error) => println!("[{}] failed: {}", engine.outcome.engine, error),
            None => println!(
                "[{}] HTTP {} - {} parsed results",
                engine.outcome.engine,
                engine.outcome.status_code,
                engine.results.len()
            ),
        }
        for (i, result) in engine.results.iter().enumerate() {
            println!("  {}. {}", i + 1, result.title);
            if !result.link.is_empty() {
                println!("     {}", result.link);
            }
        }
        println!();
    }
    Ok(())
}

fn list_engines() -> Result<()> {
    let gateway = Gateway::new()?;
    let registry = gateway.registry();

    println!("Available search engines ({} total):\n", registry.len());
    for (category, keys) in registry.categories() {
        println!("  {}:", category);
        for key in keys {
            if let Some(engine) = registry.get(&key) {
                println!("    {:<6} - {}", engine.key, engine.name);
            }
        }
        println!();
    }
    println!("Usage: agg-search search \"query\" -e gh,gg,you");
    Ok(())
}
