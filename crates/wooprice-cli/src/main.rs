mod session;
mod shell;

use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wooprice_client::WooClient;
use wooprice_core::AppConfig;

use crate::session::Session;
use crate::shell::Shell;

#[derive(Debug, Parser)]
#[command(name = "wooprice")]
#[command(about = "Search a WooCommerce store and edit product prices")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive search/edit/commit session (the default)
    Shell,
    /// List the rows a search would show and exit
    Search {
        query: String,
        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = wooprice_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(&config).await,
        Commands::Search { query, json } => run_search(&config, &query, json).await,
        Commands::Config => {
            println!("{config:#?}");
            Ok(())
        }
    }
}

fn connect(config: &AppConfig) -> anyhow::Result<WooClient> {
    let client = WooClient::new(config).context("failed to build store client")?;
    tracing::info!(
        base_url = %client.base_url(),
        auth = %client.auth_mode(),
        "store client configured"
    );
    Ok(client)
}

async fn run_shell(config: &AppConfig) -> anyhow::Result<()> {
    let client = connect(config)?;
    let mut out = io::stdout();
    writeln!(
        out,
        "connected to {} ({} auth); type 'help' for commands",
        client.base_url(),
        client.auth_mode()
    )?;

    let mut shell = Shell::new(Session::new(client, config.page_size), out);
    shell
        .run(tokio::io::BufReader::new(tokio::io::stdin()))
        .await
        .context("terminal i/o failed")?;
    Ok(())
}

async fn run_search(config: &AppConfig, query: &str, json: bool) -> anyhow::Result<()> {
    let mut session = Session::new(connect(config)?, config.page_size);
    let rows = session.search(query).await?;

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &rows)?;
        writeln!(out)?;
    } else {
        shell::render::table(&mut out, &rows)?;
    }
    Ok(())
}
