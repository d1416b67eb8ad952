//! PV-Timeline: print a product's event history from the provenance contract.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pv_contract_reader::{
    ContractReaderApi, ContractReaderService, Network, ReaderConfig, SorobanRpcClient,
};
use pv_telemetry::{init_telemetry, TelemetryConfig};
use pv_timeline::{render_event, render_timeline};

/// PV-Timeline: product event history viewer
#[derive(Parser, Debug)]
#[command(name = "pv-timeline")]
#[command(about = "Read product event history from the provenance contract")]
struct Args {
    /// Contract id (C...). Defaults to PV_CONTRACT_ID
    #[arg(long, global = true)]
    contract_id: Option<String>,

    /// testnet, mainnet or futurenet. Defaults to PV_STELLAR_NETWORK
    #[arg(long, global = true)]
    network: Option<String>,

    /// RPC endpoint override. Defaults to PV_RPC_URL, then the network default
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full timeline of a product, most recent first
    Events {
        /// Product id
        product: String,
    },
    /// Event ids recorded for a product
    EventIds {
        /// Product id
        product: String,
    },
    /// A single event
    Event {
        /// Event id
        id: u64,
    },
}

impl Args {
    fn reader_config(&self) -> ReaderConfig {
        let mut config = ReaderConfig::from_env();
        if let Some(contract_id) = &self.contract_id {
            config.contract_id = contract_id.clone();
        }
        if let Some(network) = &self.network {
            config.network = Network::from_discriminator(network);
        }
        if let Some(url) = &self.rpc_url {
            config.rpc_url = Some(url.clone());
        }
        config
    }
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::for_service("pv-timeline");
    if args.verbose {
        telemetry = telemetry.with_log_level("info,pv_contract_reader=debug,pv_timeline=debug");
    }
    let _guard = init_telemetry(telemetry).context("Failed to initialize logging")?;

    let config = args.reader_config();
    let rpc = SorobanRpcClient::from_config(&config).context("Failed to create RPC client")?;
    pv_telemetry::log_event!(
        debug,
        "pv-timeline",
        "Reader configured",
        endpoint = %rpc.endpoint(),
        network = %config.network
    );
    let reader = ContractReaderService::new(config, rpc).context("Invalid reader configuration")?;

    match &args.command {
        Command::Events { product } => {
            let events = reader
                .fetch_all_events(product)
                .await
                .with_context(|| format!("Failed to fetch events of {}", product))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                print!("{}", render_timeline(product, &events, now_secs()));
            }
        }
        Command::EventIds { product } => {
            let ids = reader
                .list_event_ids(product)
                .await
                .with_context(|| format!("Failed to list events of {}", product))?;
            if args.json {
                println!("{}", serde_json::to_string(&ids)?);
            } else if ids.is_empty() {
                println!("No events recorded for {}", product);
            } else {
                for id in ids {
                    println!("{}", id);
                }
            }
        }
        Command::Event { id } => {
            let event = reader
                .get_event(*id)
                .await
                .with_context(|| format!("Failed to read event {}", id))?;
            match (event, args.json) {
                (Some(event), true) => println!("{}", serde_json::to_string_pretty(&event)?),
                (Some(event), false) => print!("{}", render_event(&event, now_secs())),
                (None, true) => println!("null"),
                (None, false) => println!("Event {} not found", id),
            }
        }
    }

    Ok(())
}
