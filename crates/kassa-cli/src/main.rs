mod backend;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kassa")]
#[command(about = "Kassa - today's sales from the point-of-sale backend", long_about = None)]
struct Cli {
    /// Log backend requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's sales dashboard (default)
    Today {
        /// Shop id, overriding the configured one
        #[arg(long)]
        shop: Option<String>,
        /// Report for all shops, ignoring the configured shop id
        #[arg(long, conflicts_with = "shop")]
        global: bool,
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify the client credentials against the backend
    Check,
    /// Create the configuration file interactively
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose)?;

    match cli.command.unwrap_or(Commands::Today {
        shop: None,
        global: false,
        json: false,
    }) {
        Commands::Today { shop, global, json } => commands::today(commands::TodayOptions {
            shop,
            global,
            json,
        }),
        Commands::Check => commands::check(),
        Commands::Init { force } => commands::init(force),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("kassa={}", level).parse()?)
                .add_directive(format!("kassa_core={}", level).parse()?)
                .add_directive(format!("kassa_adapters={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
