//! Consensus parameters: activation heights, version-bits deployments and
//! reward economics.
//!
//! This module only defines the configuration the validation engine
//! consumes; the version-bits signaling state machine itself runs there.

use serde::{Deserialize, Serialize};

use crate::crypto::{Hash, H160};

/// Sentinel height for a feature that never activates.
pub const HEIGHT_DISABLED: u32 = u32::MAX;

/// Version-bits deployment positions.
///
/// A closed set: every deployment the chain has ever signaled gets a
/// variant here and a matching entry in [`VERSION_BITS_DEPLOYMENTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentPos {
    /// Deployment used only for activation-logic testing.
    TestDummy,
}

/// Number of known version-bits deployments.
pub const MAX_VERSION_BITS_DEPLOYMENTS: usize = 1;

impl DeploymentPos {
    /// All deployment positions, in table order.
    pub const ALL: [DeploymentPos; MAX_VERSION_BITS_DEPLOYMENTS] = [DeploymentPos::TestDummy];

    /// The deployment's signaling name.
    pub fn name(self) -> &'static str {
        VERSION_BITS_DEPLOYMENTS[self as usize].name
    }

    /// Resolves a signaling name to a deployment position.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pos| VERSION_BITS_DEPLOYMENTS[*pos as usize].name == name)
    }
}

/// Static descriptor of a version-bits deployment.
#[derive(Debug, Clone, Copy)]
pub struct DeploymentInfo {
    /// Name used in signaling and in -vbparams overrides.
    pub name: &'static str,
}

/// Descriptors for every known deployment, indexed by [`DeploymentPos`].
pub const VERSION_BITS_DEPLOYMENTS: [DeploymentInfo; MAX_VERSION_BITS_DEPLOYMENTS] =
    [DeploymentInfo { name: "testdummy" }];

/// Configuration of one version-bits deployment.
///
/// Consumed by the signaling state machine: within a window of
/// `miner_confirmation_window` blocks the deployment moves DEFINED →
/// STARTED once `start_time` is reached, LOCKED_IN once the bit is set in
/// at least `rule_change_activation_threshold` of the window, ACTIVE one
/// window later, or FAILED once `timeout` passes without lock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Bit position (0..=28) to select in the block version field.
    pub bit: u8,
    /// Start of the signaling window, seconds since Unix epoch.
    pub start_time: i64,
    /// End of the signaling window, or [`Deployment::NO_TIMEOUT`].
    pub timeout: i64,
}

impl Deployment {
    /// Sentinel timeout for a deployment that never expires.
    pub const NO_TIMEOUT: i64 = i64::MAX;
}

/// Per-network consensus parameters.
///
/// A flat record, immutable once the owning profile is published except
/// through the enumerated override methods on the profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsensusParams {
    /// Blocks between subsidy halvings before the blocktime reduction.
    pub subsidy_halving_interval: u32,
    /// Blocks between subsidy halvings after the blocktime reduction.
    pub subsidy_halving_interval_v2: u32,
    /// Block hash excluded from BIP16 enforcement.
    pub bip16_exception: Hash,
    /// Height at which coinbase heights become mandatory.
    pub bip34_height: u32,
    /// Hash of the block at `bip34_height`.
    pub bip34_hash: Hash,
    /// Height at which CHECKLOCKTIMEVERIFY activates.
    pub bip65_height: u32,
    /// Height at which strict DER signatures activate.
    pub bip66_height: u32,
    /// Height at which CSV (BIP68/112/113) activates.
    pub csv_height: u32,
    /// Height at which segwit (BIP141/143/147) activates.
    pub segwit_height: u32,
    /// Lowest height where unexpected version signaling warns.
    pub min_bip9_warning_height: u32,
    /// Height at which contract gas-sender attribution activates.
    pub cip5_height: u32,
    /// Height at which the btc_ecrecover precompile activates.
    pub cip6_height: u32,
    /// Height at which the Constantinople VM rules activate.
    pub cip7_height: u32,
    /// Height of the difficulty-change hard fork.
    pub cip9_height: u32,
    /// Height at which offline staking delegations activate.
    pub offline_stake_height: u32,
    /// Height of the blocktime reduction.
    pub reduce_blocktime_height: u32,
    /// Height at which the Muir Glacier VM rules activate.
    pub muir_glacier_height: u32,
    /// Highest allowed proof-of-work target.
    pub pow_limit: Hash,
    /// Highest allowed proof-of-stake target.
    pub pos_limit: Hash,
    /// Proof-of-stake target ceiling active after the difficulty change.
    pub cip9_pos_limit: Hash,
    /// Proof-of-stake target ceiling active after the blocktime reduction.
    pub rbt_pos_limit: Hash,
    /// Retarget interval in seconds.
    pub pow_target_timespan: u64,
    /// Retarget interval after the difficulty change.
    pub pow_target_timespan_v2: u64,
    /// Retarget interval after the blocktime reduction.
    pub rbt_pow_target_timespan: u64,
    /// Target block spacing in seconds.
    pub pow_target_spacing: u64,
    /// Target block spacing after the blocktime reduction.
    pub rbt_pow_target_spacing: u64,
    /// Accept minimum-difficulty blocks when spacing is exceeded.
    pub pow_allow_min_difficulty_blocks: bool,
    /// Disable proof-of-work retargeting.
    pub pow_no_retargeting: bool,
    /// Disable proof-of-stake retargeting.
    pub pos_no_retargeting: bool,
    /// Signaling blocks required in a window to lock a deployment in.
    pub rule_change_activation_threshold: u32,
    /// Window length, in blocks, for deployment signaling.
    pub miner_confirmation_window: u32,
    /// Version-bits deployment table, indexed by [`DeploymentPos`].
    pub deployments: [Deployment; MAX_VERSION_BITS_DEPLOYMENTS],
    /// Minimum cumulative work for the best known chain.
    pub minimum_chain_work: Hash,
    /// Ancestors of this block are assumed signature-valid.
    pub default_assume_valid: Hash,
    /// Multiplier applied to interval constants by the blocktime reduction.
    pub blocktime_downscale_factor: u32,
    /// Blocks before a coinbase output can be spent.
    pub coinbase_maturity: u32,
    /// Coinbase maturity after the blocktime reduction.
    pub rbt_coinbase_maturity: u32,
    /// Last block mined by proof-of-work.
    pub last_pow_block: u32,
    /// Last block carrying the initial oversized reward.
    pub last_big_reward: u32,
    /// Stakers sharing each proof-of-stake reward.
    pub mpos_reward_recipients: u32,
    /// First block paying shared proof-of-stake rewards.
    pub first_mpos_block: u32,
    /// Last block paying shared proof-of-stake rewards.
    pub last_mpos_block: u32,
    /// Height of the UTXO-cache consistency hard fork.
    pub fix_utxo_cache_height: u32,
    /// Height at which header signatures become mandatory.
    pub enable_header_signature_height: u32,
    /// Depth of the rolling anti-reorg checkpoint.
    pub checkpoint_span: u32,
    /// Rolling checkpoint depth after the blocktime reduction.
    pub rbt_checkpoint_span: u32,
    /// Contract handling offline-staking delegations.
    pub delegations_address: H160,
    /// Mask applied to proof-of-stake timestamps.
    pub stake_timestamp_mask: u32,
    /// Stake timestamp mask after the blocktime reduction.
    pub rbt_stake_timestamp_mask: u32,
}

impl ConsensusParams {
    /// First block paying shared proof-of-stake rewards, derived from the
    /// proof-of-work crossover, the recipient fan-out and the maturity.
    pub fn derived_first_mpos_block(&self) -> u32 {
        self.last_pow_block + self.mpos_reward_recipients + self.coinbase_maturity
    }

    /// The configuration of one deployment.
    pub fn deployment(&self, pos: DeploymentPos) -> &Deployment {
        &self.deployments[pos as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_names_resolve_both_ways() {
        assert_eq!(DeploymentPos::from_name("testdummy"), Some(DeploymentPos::TestDummy));
        assert_eq!(DeploymentPos::TestDummy.name(), "testdummy");
        assert_eq!(DeploymentPos::from_name("bogus"), None);
    }

    #[test]
    fn no_timeout_sentinel_is_maximal() {
        assert_eq!(Deployment::NO_TIMEOUT, i64::MAX);
    }
}
