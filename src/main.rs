//! querygate - a read-only SQL gateway over a single CSV-backed table.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use cli::{is_exit_command, Cli, Mode};
use querygate::config::{Config, DatasetConfig};
use querygate::dataset::{self, StoreStatus};
use querygate::db::SqliteStore;
use querygate::error::QueryGateError;
use querygate::logging;
use querygate::query::QueryGateway;
use querygate::tools::{self, ToolCall};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // A .env file may supply the QUERYGATE_* variables read by clap.
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let config = Config::load_from_file(&cli.config_path());

    let log_file = cli.log_file.clone().or_else(|| {
        config
            .as_ref()
            .ok()
            .and_then(|config| config.logging.file.clone())
    });
    match &log_file {
        Some(path) => logging::init_file_logging(path),
        None => logging::init_stderr_logging(),
    }

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        match e.downcast_ref::<QueryGateError>() {
            Some(gate_error) => error!("{}: {e:#}", gate_error.category()),
            None => error!("{e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if cli.tool_spec {
        let definitions = serde_json::to_string_pretty(&tools::get_tool_definitions())?;
        println!("{definitions}");
        return Ok(());
    }

    let mode = cli.mode();
    config.dataset.merge(cli.source, cli.store, cli.table);
    config.dataset.validate()?;

    let gateway = open_gateway(&config.dataset).await?;

    match mode {
        Mode::Once(sql) => println!("{}", gateway.execute(&sql).await),
        Mode::Interactive => run_interactive(&gateway).await?,
        Mode::Serve => serve(&gateway).await?,
        Mode::Schema => println!("{}", gateway.describe().await?),
    }

    Ok(())
}

/// Builds the store if needed, then wraps it in a gateway.
async fn open_gateway(dataset: &DatasetConfig) -> anyhow::Result<QueryGateway> {
    let status = dataset::ensure_store(&dataset.source, &dataset.store, &dataset.table)
        .await
        .with_context(|| format!("Failed to prepare store {}", dataset.store.display()))?;

    if let StoreStatus::Created { rows } = status {
        info!("Store ready with {rows} rows");
    }

    let store = SqliteStore::open(&dataset.store, dataset.table.clone())?;
    Ok(QueryGateway::new(Arc::new(store)))
}

/// Reads one statement per line and prints each result.
async fn run_interactive(gateway: &QueryGateway) -> anyhow::Result<()> {
    eprintln!("querygate: one SQL statement per line, 'quit' to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("sql> ");
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        if is_exit_command(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        println!("{}\n", gateway.execute(&line).await);
    }

    Ok(())
}

/// Answers JSON-encoded tool calls, one per line, until stdin closes.
async fn serve(gateway: &QueryGateway) -> anyhow::Result<()> {
    info!("Serving {} tool calls on stdin", tools::EXECUTE_SQL);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let call: ToolCall = match serde_json::from_str(&line) {
            Ok(call) => call,
            Err(e) => {
                warn!("Skipping malformed tool call: {e}");
                continue;
            }
        };

        let result = tools::dispatch(gateway, &call).await;
        let mut encoded = serde_json::to_string(&result)?;
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
