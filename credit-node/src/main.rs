//! CREDIT node entry point: parses the chain selection, publishes the
//! matching parameter profile to the registry and logs a startup summary.

use clap::Parser;
use log::info;

use credit_core::chainparams::{ActivationOverrides, Network};
use credit_core::registry::{active_params, select_params};
use credit_core::Result;

/// Command line arguments for the CREDIT node.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Chain to run on: main, test, regtest or unittest
    #[clap(long, default_value = "main")]
    chain: String,

    /// Segwit activation height override; -1 disables segwit (regtest only)
    #[clap(long, allow_hyphen_values = true)]
    segwitheight: Option<i64>,

    /// Version-bits override, deployment:start:end, repeatable (regtest only)
    #[clap(long)]
    vbparams: Vec<String>,
}

fn run(args: Args) -> Result<()> {
    let network: Network = args.chain.parse()?;
    let overrides = ActivationOverrides {
        segwit_height: args.segwitheight,
        vbparams: args.vbparams,
    };
    select_params(network, &overrides)?;

    let params = active_params();
    info!(
        "chain {} ready: port {}, genesis {}, {} checkpoints, highest pin at height {}",
        params.network,
        params.default_port,
        params.genesis_hash,
        params.checkpoints.len(),
        params.checkpoints.highest().0,
    );
    info!(
        "activation heights: csv {}, segwit {}, offline staking {}",
        params.consensus.csv_height,
        params.consensus.segwit_height,
        params.consensus.offline_stake_height,
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
