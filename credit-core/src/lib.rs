//! Credit Core
//!
//! Consensus parameters, genesis construction and network profiles for the
//! CREDIT cryptocurrency.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![forbid(unsafe_code)]

/// Cryptographic primitives and utilities.
pub mod crypto;

/// Core data structures.
pub mod types;

/// Deterministic genesis-block construction.
pub mod genesis;

/// Checkpoint pins and chain-progress statistics.
pub mod checkpoints;

/// Consensus-related configuration.
pub mod consensus;

/// Per-network chain parameter profiles.
pub mod chainparams;

/// Process-wide registry of the active profile.
pub mod registry;

/// Common error types.
pub mod error;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::chainparams::{ActivationOverrides, Base58Prefixes, ChainParams, Network};
    pub use crate::checkpoints::{ChainTxData, Checkpoints};
    pub use crate::consensus::{
        ConsensusParams, Deployment, DeploymentPos, HEIGHT_DISABLED,
    };
    pub use crate::crypto::{Hash, H160};
    pub use crate::error::{Error, Result};
    pub use crate::registry::{active_params, select_params, Registry, CHAIN_PARAMS};
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_exports_resolve() {
        let _ = Hash::zero();
        let _ = Error::UnknownNetwork("nowhere".to_string());
        let _ = ChainParams::main();
    }
}
