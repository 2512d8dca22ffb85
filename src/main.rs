//! npub2btc command line
//!
//! Converts Nostr keys given on the command line, or serves the HTTP API.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use npub2btc::address::{convert_batch, Converted};
use npub2btc::constants::DEFAULT_PORT;
use npub2btc::nostr::KeyKind;
use npub2btc::rpc::start_rpc_server;
use std::net::{IpAddr, SocketAddr};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "npub2btc", version)]
#[command(about = "Convert Nostr keys to Bitcoin addresses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", env = "LOG_LEVEL", global = true)]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "JSON_LOGS", global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive legacy and native segwit addresses from npub keys
    Convert {
        /// One or more npub1... keys
        #[arg(required = true)]
        keys: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert nsec keys to WIF
    Nsec {
        /// One or more nsec1... keys
        #[arg(required = true)]
        keys: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the HTTP API
    Serve {
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0", env = "BIND_ADDRESS")]
        bind: IpAddr,

        /// Listen port
        #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.json_logs)?;

    match cli.command {
        Commands::Convert { keys, json } => run_convert(&keys, KeyKind::Npub, json),
        Commands::Nsec { keys, json } => run_convert(&keys, KeyKind::Nsec, json),
        Commands::Serve { bind, port } => {
            info!("Starting npub2btc v{}", env!("CARGO_PKG_VERSION"));
            start_rpc_server(SocketAddr::new(bind, port)).await?;
            Ok(())
        }
    }
}

fn run_convert(keys: &[String], kind: KeyKind, json: bool) -> Result<()> {
    let outcome = convert_batch(keys, kind);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for result in &outcome.results {
            match result {
                Converted::Npub(addresses) => {
                    println!("npub:    {}", addresses.npub);
                    println!("hex:     {}", addresses.hex_pubkey);
                    println!("legacy:  {}", addresses.legacy_address);
                    println!("segwit:  {}", addresses.segwit_address);
                }
                Converted::Nsec(key) => {
                    println!("nsec:    {}", key.nsec);
                    println!("hex:     {}", key.hex_privkey);
                    println!("wif:     {}", key.wif);
                    println!("npub:    {}", key.npub);
                }
            }
            println!();
        }
        for failure in &outcome.errors {
            eprintln!("{}: {}", failure.key, failure.error);
        }
    }

    if !outcome.errors.is_empty() {
        bail!("{} of {} keys failed to convert", outcome.errors.len(), keys.len());
    }
    Ok(())
}

fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
