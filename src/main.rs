use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use binance_trader::{BinanceGateway, OrderExecutor, Settings};

#[derive(Parser)]
#[command(name = "binance-trader", about = "Market order execution against a Binance spot account")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sell the full free balance of an asset at market
    Sell {
        /// Asset symbol, e.g. "BTC"
        asset: String,
    },
    /// Buy an asset at market, spending 20% of the free USDT balance
    Buy {
        /// Asset symbol, e.g. "BTC"
        asset: String,
    },
    /// Show the free balance of an asset
    Balance {
        /// Asset symbol, e.g. "BTC"
        asset: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::new().context("configuration error")?;
    info!("📋 Configuration loaded");

    let gateway = BinanceGateway::with_api_url(
        settings.api_key,
        settings.api_secret,
        settings.api_url,
    );
    let executor = OrderExecutor::new(gateway);

    match cli.command {
        Command::Sell { asset } => {
            let report = executor.sell(&asset).await?;
            if report.is_filled() {
                info!(
                    symbol = %report.symbol,
                    order_id = report.ack.order_id,
                    executed = %report.ack.executed_qty,
                    "✅ sell filled"
                );
            } else {
                error!(symbol = %report.symbol, status = %report.ack.status, "❌ sell not filled");
                std::process::exit(1);
            }
        }
        Command::Buy { asset } => {
            let report = executor.buy(&asset).await?;
            if report.is_filled() {
                info!(
                    symbol = %report.symbol,
                    order_id = report.ack.order_id,
                    executed = %report.ack.executed_qty,
                    "✅ buy filled"
                );
            } else {
                error!(symbol = %report.symbol, status = %report.ack.status, "❌ buy not filled");
                std::process::exit(1);
            }
        }
        Command::Balance { asset } => {
            let free = executor.account_balance(&asset.to_uppercase()).await?;
            println!("{} free balance: {}", asset.to_uppercase(), free);
        }
    }

    Ok(())
}
