use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use seyeon_coinmarketcap::{ClientConfig, CoinmarketcapClient, Currency, TickerParams};
use std::io::{Write, stdout};
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Query the CoinMarketCap v1 public API", long_about = None)]
struct Args {
    /// API root, without the version segment
    #[arg(long, env = "CMC_BASE_URL", default_value = seyeon_coinmarketcap::BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "CMC_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tickers, optionally only the top N
    Tickers {
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Also price in this fiat currency (e.g. EUR)
        #[arg(long)]
        convert: Option<Currency>,
    },

    /// Show one ticker by id (e.g. bitcoin)
    Ticker { id: String },

    /// Show the global market snapshot
    Global {
        #[arg(long)]
        convert: Option<Currency>,
    },
}

fn client_config(args: &Args) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        ..ClientConfig::default()
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to render response")?;

    let mut out = stdout().lock();
    writeln!(out, "{json}")?;

    Ok(())
}

async fn run(client: &CoinmarketcapClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Tickers { limit, convert } => {
            let params = TickerParams::builder()
                .maybe_limit(limit)
                .maybe_convert(convert)
                .build();

            let ticks = client
                .get_tickers_with(params)
                .await
                .context("failed to fetch tickers")?;

            debug!(count = ticks.len(), "fetched tickers");
            print_json(&ticks)
        }

        Command::Ticker { id } => {
            let tick = client
                .get_ticker(&id)
                .await
                .with_context(|| format!("failed to fetch ticker {id}"))?;

            print_json(&tick)
        }

        Command::Global { convert } => {
            let data = match convert {
                Some(currency) => client.get_global_data_convert(currency).await,
                None => client.get_global_data().await,
            }
            .context("failed to fetch global market data")?;

            print_json(&data)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let client = CoinmarketcapClient::with_config(client_config(&args))
        .context("failed to build coinmarketcap client")?;

    let result = run(&client, args.command).await;

    if let Err(err) = &result {
        error!("{:#}", err);
    }

    result
}
