//! Per-network chain parameter profiles.
//!
//! Each network variant is built by a factory returning one immutable
//! [`ChainParams`] bundle; the unit-test profile is the regtest profile
//! plus a fixed set of deltas. Factories validate the constructed genesis
//! block against pinned hashes before returning.

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::checkpoints::{ChainTxData, Checkpoints};
use crate::consensus::{ConsensusParams, Deployment, DeploymentPos, HEIGHT_DISABLED};
use crate::crypto::{Hash, H160};
use crate::error::{Error, Result};
use crate::genesis::credit_genesis_block;
use crate::types::{Block, COIN};

/// Merkle root shared by every network's genesis block; the coinbase is
/// identical across networks.
const GENESIS_MERKLE_ROOT: &str = "059f12a764f464f8606ca61831505f7d5a613eb930c34b9632986f95c4c9de8c";

const MAIN_GENESIS_HASH: &str = "0000fa4acfb8b65f9be0b19d88836a165788a4cc80c92e7ac98a333dab956cd4";
const TEST_GENESIS_HASH: &str = "0000ee183b69b8798ab94d25ad44ccc23beae0d175218a2cf2b394f384f71003";
const REGTEST_GENESIS_HASH: &str = "7f737a302ff68b04f59f62eda305003642ce8958e5e7550c85df64a4d223f98b";

// Block hashes anchoring the historical BIP16 exception and the BIP34
// activation point. Distinct from the genesis hashes.
const MAIN_BIP34_HASH: &str = "000075aef83cf2853580f8ae8ce6f8c3096cfa21d98334d6e3f95e5582ed986c";
const TEST_BIP34_HASH: &str = "0000e803ee215c0684ca0d2f9220594d3f828617972aad66feb2ba51f5e14222";
const REGTEST_BIP34_HASH: &str = "665ed5b402ac0b44efc37d8926332994363e8a7278b7ee9a58fb972efadae943";

const POW_LIMIT: &str = "0000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const MAIN_POS_LIMIT: &str = "00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const CIP9_POS_LIMIT: &str = "0000000000001fffffffffffffffffffffffffffffffffffffffffffffffffff";
const RBT_POS_LIMIT: &str = "0000000000003fffffffffffffffffffffffffffffffffffffffffffffffffff";
const REGTEST_LIMIT: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

/// Contract handling offline-staking delegations; identical on every network.
const DELEGATIONS_ADDRESS: &str = "0000000000000000000000000000000000000086";

/// The set of selectable networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// Production network.
    Main,
    /// Public test network.
    Test,
    /// Local regression-test network; the only variant accepting
    /// command-line activation overrides.
    Regtest,
    /// Regtest with maturity-dependent constants rescaled for unit tests.
    Unittest,
}

impl Network {
    /// The network's selection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
            Network::Unittest => "unittest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Test),
            "regtest" => Ok(Network::Regtest),
            "unittest" => Ok(Network::Unittest),
            other => Err(Error::UnknownNetwork(other.to_string())),
        }
    }
}

/// Version bytes for the network's address encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base58Prefixes {
    /// Pay-to-pubkey-hash address version byte.
    pub pubkey_address: u8,
    /// Pay-to-script-hash address version byte.
    pub script_address: u8,
    /// WIF private-key version byte.
    pub secret_key: u8,
    /// BIP32 extended public key prefix.
    pub ext_public_key: [u8; 4],
    /// BIP32 extended private key prefix.
    pub ext_secret_key: [u8; 4],
}

/// Command-line activation overrides, honored only by the regtest-style
/// profiles. Production and test-network profiles never consume these.
#[derive(Debug, Clone, Default)]
pub struct ActivationOverrides {
    /// `-segwitheight=<n>`; -1 disables segwit entirely.
    pub segwit_height: Option<i64>,
    /// `-vbparams=deployment:start:end`, repeatable.
    pub vbparams: Vec<String>,
}

/// One complete, per-network parameter bundle.
///
/// Immutable once published to the registry, except through the enumerated
/// `set_*` override methods, which test harnesses apply via
/// [`crate::registry::Registry::with_active_mut`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainParams {
    /// Which network this profile describes.
    pub network: Network,
    /// Message-start bytes identifying the network on the wire.
    pub message_start: [u8; 4],
    /// Default peer-to-peer port.
    pub default_port: u16,
    /// Blocks below this height may be pruned.
    pub prune_after_height: u64,
    /// Rough blockchain size in GB, for sizing hints.
    pub assumed_blockchain_size: u64,
    /// Rough chain-state size in GB, for sizing hints.
    pub assumed_chain_state_size: u64,
    /// DNS seed hosts.
    pub dns_seeds: Vec<String>,
    /// Address-encoding version bytes.
    pub base58_prefixes: Base58Prefixes,
    /// Human-readable part for bech32 addresses.
    pub bech32_hrp: String,
    /// The canonical genesis block.
    pub genesis: Block,
    /// Hash of the genesis block, validated against the pinned literal.
    pub genesis_hash: Hash,
    /// Anti-reorg checkpoint pins.
    pub checkpoints: Checkpoints,
    /// Advisory sync-progress statistics.
    pub chain_tx_data: ChainTxData,
    /// Run expensive consistency checks by default.
    pub default_consistency_checks: bool,
    /// Require standard transactions by default.
    pub require_standard: bool,
    /// Blocks are only produced on demand.
    pub mine_blocks_on_demand: bool,
    /// This chain is a test chain.
    pub is_test_chain: bool,
    /// This chain can be mocked in unit tests.
    pub is_mockable: bool,
    /// Consensus parameters proper.
    pub consensus: ConsensusParams,
}

/// Parses a pinned hash literal quoted in display order.
fn uint256(s: &str) -> Hash {
    Hash::from_hex(s).expect("hard-coded hash literal is valid hex")
}

/// Asserts the constructed genesis against its pinned hash and merkle root.
///
/// These literals are derived from this exact construction, not hand-typed;
/// a mismatch means a build constant was edited, and startup must abort
/// because every downstream consensus decision depends on genesis identity.
fn check_genesis(network: Network, genesis: &Block, expected_hash: &str) -> Hash {
    let hash = genesis.hash();
    assert_eq!(
        hash,
        uint256(expected_hash),
        "{network} genesis hash does not match its pinned value"
    );
    assert_eq!(
        genesis.header.merkle_root,
        uint256(GENESIS_MERKLE_ROOT),
        "{network} genesis merkle root does not match its pinned value"
    );
    hash
}

impl ChainParams {
    /// Builds the profile for `network`.
    ///
    /// Overrides are consumed only by the regtest-style profiles; the main
    /// and test networks are immutable at the command-line layer.
    pub fn for_network(network: Network, overrides: &ActivationOverrides) -> Result<ChainParams> {
        match network {
            Network::Main => Ok(ChainParams::main()),
            Network::Test => Ok(ChainParams::test()),
            Network::Regtest => ChainParams::regtest(overrides),
            Network::Unittest => ChainParams::unittest(overrides),
        }
    }

    /// Production network parameters.
    pub fn main() -> ChainParams {
        let mut consensus = ConsensusParams {
            subsidy_halving_interval: 525_600,
            subsidy_halving_interval_v2: 2 * 525_600,
            bip16_exception: uint256(MAIN_BIP34_HASH),
            bip34_height: 0,
            bip34_hash: uint256(MAIN_BIP34_HASH),
            bip65_height: 0,
            bip66_height: 0,
            csv_height: 6048,
            segwit_height: 6048,
            min_bip9_warning_height: 8064, // segwit height + miner confirmation window
            cip5_height: 0,
            cip6_height: 0,
            cip7_height: 0,
            cip9_height: 0,
            offline_stake_height: 1,
            reduce_blocktime_height: 0,
            muir_glacier_height: 0,
            pow_limit: uint256(POW_LIMIT),
            pos_limit: uint256(MAIN_POS_LIMIT),
            cip9_pos_limit: uint256(CIP9_POS_LIMIT),
            rbt_pos_limit: uint256(RBT_POS_LIMIT),
            pow_target_timespan: 60 * 60,
            pow_target_timespan_v2: 60 * 60,
            rbt_pow_target_timespan: 60 * 60,
            pow_target_spacing: 60 * 2,
            rbt_pow_target_spacing: 60 * 2,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: true,
            pos_no_retargeting: false,
            rule_change_activation_threshold: 28, // 95% of the window
            miner_confirmation_window: 30, // pow_target_timespan / pow_target_spacing
            deployments: [Deployment {
                bit: 28,
                start_time: 1_199_145_601, // January 1, 2008
                timeout: 1_230_767_999,    // December 31, 2008
            }],
            minimum_chain_work: Hash::zero(),
            default_assume_valid: uint256(
                "23c66194def65cfea20d32a71f23807a93a0b207b3d7251246e2c351204fe9d3",
            ), // height 708000
            blocktime_downscale_factor: 2,
            coinbase_maturity: 10,
            rbt_coinbase_maturity: 2 * 5,
            last_pow_block: 1000,
            last_big_reward: 1,
            mpos_reward_recipients: 10,
            first_mpos_block: 0, // derived below
            last_mpos_block: 1000,
            fix_utxo_cache_height: 100_000,
            enable_header_signature_height: 399_100,
            checkpoint_span: 10,
            rbt_checkpoint_span: 2 * 5,
            delegations_address: H160::from_hex(DELEGATIONS_ADDRESS)
                .expect("hard-coded address literal is valid hex"),
            stake_timestamp_mask: 15,
            rbt_stake_timestamp_mask: 3,
        };
        consensus.first_mpos_block = consensus.derived_first_mpos_block();

        let genesis = credit_genesis_block(1_620_093_300, 81470, 0x1f00ffff, 1, 0 * COIN);
        let genesis_hash = check_genesis(Network::Main, &genesis, MAIN_GENESIS_HASH);

        ChainParams {
            network: Network::Main,
            message_start: [0xef, 0xce, 0xa5, 0xd2],
            default_port: 4000,
            prune_after_height: 100_000,
            assumed_blockchain_size: 8,
            assumed_chain_state_size: 1,
            dns_seeds: vec![
                "seed-01.terra-credit.com".to_string(),
                "seed-02.terra-credit.com".to_string(),
                "seed-03.terra-credit.com".to_string(),
                "seed-04.terra-credit.com".to_string(),
                "seed-05.terra-credit.com".to_string(),
                "explorer.terra-credit.com".to_string(),
            ],
            base58_prefixes: Base58Prefixes {
                pubkey_address: 66, // 'T'
                script_address: 28, // 'C'
                secret_key: 129,
                ext_public_key: [0x05, 0x89, 0xb3, 0x1f],
                ext_secret_key: [0x05, 0x89, 0xae, 0xe5],
            },
            bech32_hrp: "tc".to_string(),
            genesis,
            genesis_hash,
            checkpoints: Checkpoints::new(vec![
                (0, genesis_hash),
                // last proof-of-work block
                (1000, uint256("0000db1fbdc01c72c91c3ee0ea62fd39933a2c5c22abf9155af846d86d8e1dfe")),
                (2000, uint256("07c8bf936ce0987811abb84784c69ab3b9dbc0bb30ac7c92c22e986975830d9a")),
            ]),
            chain_tx_data: ChainTxData {
                // Data as of height 709065.
                timestamp: 1_629_728_544,
                tx_count: 3121,
                tx_rate: 0.01869545410952335,
            },
            default_consistency_checks: false,
            require_standard: true,
            mine_blocks_on_demand: false,
            is_test_chain: false,
            is_mockable: false,
            consensus,
        }
    }

    /// Public test network parameters.
    pub fn test() -> ChainParams {
        let mut consensus = ConsensusParams {
            subsidy_halving_interval: 525_600,
            subsidy_halving_interval_v2: 2 * 525_600,
            bip16_exception: uint256(TEST_BIP34_HASH),
            bip34_height: 0,
            bip34_hash: uint256(TEST_BIP34_HASH),
            bip65_height: 0,
            bip66_height: 0,
            csv_height: 6048,
            segwit_height: 6048,
            min_bip9_warning_height: 8064,
            cip5_height: 0,
            cip6_height: 0,
            cip7_height: 0,
            cip9_height: 0,
            offline_stake_height: 1,
            reduce_blocktime_height: 0,
            muir_glacier_height: 0,
            pow_limit: uint256(POW_LIMIT),
            pos_limit: uint256(POW_LIMIT),
            cip9_pos_limit: uint256(CIP9_POS_LIMIT),
            rbt_pos_limit: uint256(RBT_POS_LIMIT),
            pow_target_timespan: 60 * 60,
            pow_target_timespan_v2: 60 * 60,
            rbt_pow_target_timespan: 60 * 60,
            pow_target_spacing: 60 * 2,
            rbt_pow_target_spacing: 60 * 2,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: true,
            pos_no_retargeting: false,
            rule_change_activation_threshold: 22, // 75% for test chains
            miner_confirmation_window: 30,
            deployments: [Deployment {
                bit: 28,
                start_time: 1_199_145_601,
                timeout: 1_230_767_999,
            }],
            minimum_chain_work: Hash::zero(),
            default_assume_valid: uint256(
                "89b010b5333fa9d22c7fcf157c7eeaee1ccfe80c435390243b3d782a1fc1eff7",
            ), // height 690000
            blocktime_downscale_factor: 2,
            coinbase_maturity: 10,
            rbt_coinbase_maturity: 2 * 5,
            last_pow_block: 100,
            last_big_reward: 1,
            mpos_reward_recipients: 10,
            first_mpos_block: 0, // derived below
            last_mpos_block: 100,
            fix_utxo_cache_height: 84_500,
            enable_header_signature_height: 391_993,
            checkpoint_span: 10,
            rbt_checkpoint_span: 2 * 5,
            delegations_address: H160::from_hex(DELEGATIONS_ADDRESS)
                .expect("hard-coded address literal is valid hex"),
            stake_timestamp_mask: 15,
            rbt_stake_timestamp_mask: 3,
        };
        consensus.first_mpos_block = consensus.derived_first_mpos_block();

        let genesis = credit_genesis_block(1_620_093_301, 7020, 0x1f00ffff, 1, 0 * COIN);
        let genesis_hash = check_genesis(Network::Test, &genesis, TEST_GENESIS_HASH);

        ChainParams {
            network: Network::Test,
            message_start: [0x0e, 0x23, 0x16, 0x07],
            default_port: 14_000,
            prune_after_height: 1000,
            assumed_blockchain_size: 4,
            assumed_chain_state_size: 1,
            dns_seeds: vec![
                "seed-01.terra-credit.com".to_string(),
                "seed-02.terra-credit.com".to_string(),
                "seed-03.terra-credit.com".to_string(),
                "seed-04.terra-credit.com".to_string(),
                "seed-05.terra-credit.com".to_string(),
                "explorer.terra-credit.com".to_string(),
            ],
            base58_prefixes: Base58Prefixes {
                pubkey_address: 127, // 't'
                script_address: 87,  // 'c'
                secret_key: 240,
                ext_public_key: [0x05, 0x36, 0x88, 0xd0],
                ext_secret_key: [0x05, 0x36, 0x84, 0x95],
            },
            bech32_hrp: "tt".to_string(),
            genesis,
            genesis_hash,
            checkpoints: Checkpoints::new(vec![
                (0, genesis_hash),
                // last proof-of-work block
                (100, uint256("0000f67d7dec953994bc036f16aacee2b468d5e339ff02317046e6004c08ee2a")),
                (15_880, uint256("2f908106f567015d1fd1cbb2ba8583495b771de6e3ada2dbee72926f2134c1a1")),
            ]),
            chain_tx_data: ChainTxData {
                // Data as of height 38983.
                timestamp: 1_628_612_092,
                tx_count: 78_035,
                tx_rate: 0.01620918090405545,
            },
            default_consistency_checks: false,
            require_standard: false,
            mine_blocks_on_demand: false,
            is_test_chain: true,
            is_mockable: false,
            consensus,
        }
    }

    /// Regression-test network parameters, with activation overrides applied.
    pub fn regtest(overrides: &ActivationOverrides) -> Result<ChainParams> {
        let consensus = ConsensusParams {
            subsidy_halving_interval: 2500,
            subsidy_halving_interval_v2: 2 * 2500,
            bip16_exception: uint256(REGTEST_BIP34_HASH),
            bip34_height: 0,
            bip34_hash: uint256(REGTEST_BIP34_HASH),
            bip65_height: 0,
            bip66_height: 0,
            csv_height: 432,
            segwit_height: 0, // always active unless overridden
            min_bip9_warning_height: 0,
            cip5_height: 0,
            cip6_height: 0,
            cip7_height: 0,
            cip9_height: 0,
            offline_stake_height: 1,
            reduce_blocktime_height: 0,
            muir_glacier_height: 0,
            pow_limit: uint256(REGTEST_LIMIT),
            pos_limit: uint256(REGTEST_LIMIT),
            cip9_pos_limit: uint256(REGTEST_LIMIT),
            rbt_pos_limit: uint256(REGTEST_LIMIT),
            pow_target_timespan: 60 * 60,
            pow_target_timespan_v2: 60 * 60,
            rbt_pow_target_timespan: 60 * 60,
            pow_target_spacing: 60 * 2,
            rbt_pow_target_spacing: 60 * 2,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            pos_no_retargeting: false,
            rule_change_activation_threshold: 22,
            miner_confirmation_window: 30,
            deployments: [Deployment {
                bit: 28,
                start_time: 0,
                timeout: Deployment::NO_TIMEOUT,
            }],
            minimum_chain_work: Hash::zero(),
            default_assume_valid: Hash::zero(),
            blocktime_downscale_factor: 2,
            coinbase_maturity: 10,
            rbt_coinbase_maturity: 2 * 5,
            last_pow_block: 50,
            last_big_reward: 1,
            mpos_reward_recipients: 10,
            first_mpos_block: 50,
            last_mpos_block: 0,
            fix_utxo_cache_height: 0,
            enable_header_signature_height: 0,
            checkpoint_span: 10,
            rbt_checkpoint_span: 2 * 5,
            delegations_address: H160::from_hex(DELEGATIONS_ADDRESS)
                .expect("hard-coded address literal is valid hex"),
            stake_timestamp_mask: 15,
            rbt_stake_timestamp_mask: 3,
        };

        let genesis = credit_genesis_block(1_620_093_302, 1, 0x207fffff, 1, 0 * COIN);
        let genesis_hash = check_genesis(Network::Regtest, &genesis, REGTEST_GENESIS_HASH);

        let mut params = ChainParams {
            network: Network::Regtest,
            message_start: [0xfd, 0xdd, 0xc6, 0xe1],
            default_port: 24_000,
            prune_after_height: 1000,
            assumed_blockchain_size: 0,
            assumed_chain_state_size: 0,
            dns_seeds: Vec::new(), // regtest has no seeds
            base58_prefixes: Base58Prefixes {
                pubkey_address: 127, // 't'
                script_address: 87,  // 'c'
                secret_key: 240,
                ext_public_key: [0x05, 0x36, 0x88, 0xd0],
                ext_secret_key: [0x05, 0x36, 0x84, 0x95],
            },
            bech32_hrp: "tcrt".to_string(),
            genesis,
            genesis_hash,
            checkpoints: Checkpoints::new(vec![(0, genesis_hash)]),
            chain_tx_data: ChainTxData { timestamp: 0, tx_count: 0, tx_rate: 0.0 },
            default_consistency_checks: true,
            require_standard: true,
            mine_blocks_on_demand: true,
            is_test_chain: true,
            is_mockable: true,
            consensus,
        };
        params.apply_activation_overrides(overrides)?;
        Ok(params)
    }

    /// Unit-test network parameters: the regtest profile with
    /// maturity-dependent constants rescaled to keep block-time-dependent
    /// test scenarios comparable to production ratios.
    pub fn unittest(overrides: &ActivationOverrides) -> Result<ChainParams> {
        let mut params = ChainParams::regtest(overrides)?;
        params.network = Network::Unittest;

        let factor = params.consensus.blocktime_downscale_factor;
        let consensus = &mut params.consensus;
        consensus.bip16_exception = Hash::zero();
        consensus.bip34_height = 100_000_000; // far future so v1 blocks pass in tests
        consensus.bip34_hash = Hash::zero();
        consensus.bip65_height = factor * 500 + 851;
        consensus.bip66_height = factor * 500 + 751;
        consensus.cip6_height = factor * 500 + 500;
        consensus.cip7_height = 0;
        consensus.subsidy_halving_interval = 750;
        consensus.subsidy_halving_interval_v2 = factor * 750;
        consensus.rule_change_activation_threshold = factor * 558;
        consensus.miner_confirmation_window = factor * 744;
        // Widen the rolling checkpoint for reorganization tests.
        consensus.checkpoint_span = consensus.coinbase_maturity * 2;
        consensus.rbt_checkpoint_span = consensus.rbt_coinbase_maturity * 2;
        Ok(params)
    }

    /// Applies `-segwitheight` and `-vbparams` overrides to this profile.
    fn apply_activation_overrides(&mut self, overrides: &ActivationOverrides) -> Result<()> {
        if let Some(height) = overrides.segwit_height {
            if height < -1 || height >= i64::from(u32::MAX) {
                return Err(Error::SegwitHeightOutOfRange(height));
            }
            self.consensus.segwit_height = if height == -1 {
                info!("segwit disabled for testing");
                HEIGHT_DISABLED
            } else {
                height as u32
            };
        }

        for deployment in &overrides.vbparams {
            let fields: Vec<&str> = deployment.split(':').collect();
            let [name, start, timeout] = fields.as_slice() else {
                return Err(Error::MalformedDeploymentParams);
            };
            let start_time: i64 = start
                .parse()
                .map_err(|_| Error::InvalidDeploymentStart(start.to_string()))?;
            let timeout: i64 = timeout
                .parse()
                .map_err(|_| Error::InvalidDeploymentTimeout(timeout.to_string()))?;
            let pos = DeploymentPos::from_name(name)
                .ok_or_else(|| Error::UnknownDeployment(name.to_string()))?;
            self.update_version_bits_parameters(pos, start_time, timeout);
            info!(
                "setting version bits activation parameters for {} to start={}, timeout={}",
                name, start_time, timeout
            );
        }
        Ok(())
    }

    /// Overwrites one deployment's signaling window.
    pub fn update_version_bits_parameters(
        &mut self,
        pos: DeploymentPos,
        start_time: i64,
        timeout: i64,
    ) {
        let deployment = &mut self.consensus.deployments[pos as usize];
        deployment.start_time = start_time;
        deployment.timeout = timeout;
    }

    /// Sets the contract gas-sender attribution activation height.
    pub fn set_op_sender_height(&mut self, height: u32) {
        self.consensus.cip5_height = height;
    }

    /// Sets the btc_ecrecover precompile activation height.
    pub fn set_btc_ecrecover_height(&mut self, height: u32) {
        self.consensus.cip6_height = height;
    }

    /// Sets the Constantinople VM activation height.
    pub fn set_constantinople_height(&mut self, height: u32) {
        self.consensus.cip7_height = height;
    }

    /// Sets the difficulty-change fork height and reapplies the
    /// main-network retargeting defaults, recomputing the dependent
    /// reward-sharing bounds in the same step.
    pub fn set_difficulty_change_height(&mut self, height: u32) {
        let consensus = &mut self.consensus;
        consensus.subsidy_halving_interval = 525_600;
        consensus.subsidy_halving_interval_v2 =
            consensus.blocktime_downscale_factor * 525_600;
        consensus.pos_limit = uint256(MAIN_POS_LIMIT);
        consensus.cip9_pos_limit = uint256(CIP9_POS_LIMIT);
        consensus.rbt_pos_limit = uint256(RBT_POS_LIMIT);
        consensus.cip9_height = height;
        consensus.pow_allow_min_difficulty_blocks = false;
        consensus.pow_no_retargeting = true;
        consensus.pos_no_retargeting = false;
        consensus.last_pow_block = 1000;
        consensus.mpos_reward_recipients = 10;
        consensus.first_mpos_block = consensus.derived_first_mpos_block();
        consensus.last_mpos_block = 0;
    }

    /// Sets the offline-staking activation height.
    pub fn set_offline_staking_height(&mut self, height: u32) {
        self.consensus.offline_stake_height = height;
    }

    /// Sets the offline-staking delegations contract address.
    pub fn set_delegations_address(&mut self, address: H160) {
        self.consensus.delegations_address = address;
    }

    /// Sets the last shared-reward proof-of-stake block.
    pub fn set_last_mpos_block_height(&mut self, height: u32) {
        self.consensus.last_mpos_block = height;
    }

    /// Sets the blocktime-reduction activation height.
    pub fn set_reduce_blocktime_height(&mut self, height: u32) {
        self.consensus.reduce_blocktime_height = height;
    }

    /// Toggles acceptance of minimum-difficulty blocks.
    pub fn set_pow_allow_min_difficulty_blocks(&mut self, value: bool) {
        self.consensus.pow_allow_min_difficulty_blocks = value;
    }

    /// Toggles proof-of-work retargeting off or on.
    pub fn set_pow_no_retargeting(&mut self, value: bool) {
        self.consensus.pow_no_retargeting = value;
    }

    /// Toggles proof-of-stake retargeting off or on.
    pub fn set_pos_no_retargeting(&mut self, value: bool) {
        self.consensus.pos_no_retargeting = value;
    }

    /// Sets the Muir Glacier VM activation height.
    pub fn set_muir_glacier_height(&mut self, height: u32) {
        self.consensus.muir_glacier_height = height;
    }

    /// Renders the embedded-VM genesis configuration, substituting the
    /// profile's own activation heights.
    pub fn evm_genesis_info(&self) -> String {
        render_evm_genesis(
            self.consensus.cip7_height,
            self.consensus.cip6_height,
            self.consensus.muir_glacier_height,
        )
    }

    /// Renders the embedded-VM genesis configuration with every fork
    /// placeholder set to the supplied height.
    pub fn evm_genesis_info_at(&self, height: u32) -> String {
        render_evm_genesis(height, height, height)
    }
}

/// Embedded-VM genesis configuration template. The three `*_STARTING_BLOCK`
/// placeholders are substituted with activation heights at render time.
const EVM_GENESIS_TEMPLATE: &str = r#"{
    "sealEngine": "NoProof",
    "params": {
        "accountStartNonce": "0x00",
        "homesteadForkBlock": "0x00",
        "EIP150ForkBlock": "0x00",
        "EIP158ForkBlock": "0x00",
        "byzantiumForkBlock": "0x00",
        "constantinopleForkBlock": "CIP7_STARTING_BLOCK",
        "constantinopleFixForkBlock": "CIP7_STARTING_BLOCK",
        "istanbulForkBlock": "CIP6_STARTING_BLOCK",
        "muirGlacierForkBlock": "MUIR_STARTING_BLOCK",
        "minGasLimit": "0x0a00000000",
        "maxGasLimit": "0x7fffffffffffffff",
        "tieBreakingGas": false,
        "networkID": "0x51"
    },
    "genesis": {
        "nonce": "0x0000000000000000",
        "difficulty": "0x20000",
        "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "author": "0x0000000000000000000000000000000000000000",
        "timestamp": "0x00",
        "parentHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "extraData": "0x",
        "gasLimit": "0x0a00000000"
    },
    "accounts": {}
}"#;

fn render_evm_genesis(cip7_height: u32, cip6_height: u32, muir_glacier_height: u32) -> String {
    EVM_GENESIS_TEMPLATE
        .replace("CIP7_STARTING_BLOCK", &cip7_height.to_string())
        .replace("CIP6_STARTING_BLOCK", &cip6_height.to_string())
        .replace("MUIR_STARTING_BLOCK", &muir_glacier_height.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regtest_default() -> ChainParams {
        ChainParams::regtest(&ActivationOverrides::default()).unwrap()
    }

    #[test]
    fn main_genesis_is_pinned() {
        let params = ChainParams::main();
        assert_eq!(params.genesis_hash, uint256(MAIN_GENESIS_HASH));
        assert_eq!(params.genesis.header.merkle_root, uint256(GENESIS_MERKLE_ROOT));
        assert_eq!(params.genesis.hash(), params.genesis_hash);
        // The genesis coinbase carries no reward.
        assert_eq!(params.genesis.transactions[0].outputs[0].value, 0);
    }

    #[test]
    fn test_genesis_is_pinned() {
        let params = ChainParams::test();
        assert_eq!(params.genesis_hash, uint256(TEST_GENESIS_HASH));
        assert_eq!(params.genesis.header.merkle_root, uint256(GENESIS_MERKLE_ROOT));
    }

    #[test]
    fn regtest_genesis_is_pinned() {
        let params = regtest_default();
        assert_eq!(params.genesis_hash, uint256(REGTEST_GENESIS_HASH));
        assert_eq!(params.genesis.header.merkle_root, uint256(GENESIS_MERKLE_ROOT));
    }

    #[test]
    fn bip16_and_bip34_anchors_are_not_the_genesis_hash() {
        let cases = [
            (ChainParams::main(), MAIN_BIP34_HASH),
            (ChainParams::test(), TEST_BIP34_HASH),
            (regtest_default(), REGTEST_BIP34_HASH),
        ];
        for (params, expected) in cases {
            let anchor = uint256(expected);
            assert_eq!(params.consensus.bip16_exception, anchor, "{}", params.network);
            assert_eq!(params.consensus.bip34_hash, anchor, "{}", params.network);
            assert_ne!(params.consensus.bip34_hash, params.genesis_hash, "{}", params.network);
        }
        // The unit-test profile blanks both anchors and defers BIP34.
        let unittest = ChainParams::unittest(&ActivationOverrides::default()).unwrap();
        assert!(unittest.consensus.bip16_exception.is_zero());
        assert!(unittest.consensus.bip34_hash.is_zero());
        assert_eq!(unittest.consensus.bip34_height, 100_000_000);
    }

    #[test]
    fn checkpoints_are_monotonic_and_rooted_at_genesis() {
        let profiles = [
            ChainParams::main(),
            ChainParams::test(),
            regtest_default(),
            ChainParams::unittest(&ActivationOverrides::default()).unwrap(),
        ];
        for params in &profiles {
            let entries: Vec<_> = params.checkpoints.iter().collect();
            assert!(entries.windows(2).all(|p| p[0].0 < p[1].0), "{}", params.network);
            assert_eq!(params.checkpoints.hash_at(0), Some(params.genesis_hash));
        }
    }

    #[test]
    fn network_names_round_trip() {
        for network in [Network::Main, Network::Test, Network::Regtest, Network::Unittest] {
            assert_eq!(network.as_str().parse::<Network>().unwrap(), network);
        }
        let err = "bitcoin".parse::<Network>().unwrap_err();
        assert_eq!(err.to_string(), "unknown chain: bitcoin");
    }

    #[test]
    fn vbparams_updates_exactly_one_deployment() {
        let overrides = ActivationOverrides {
            segwit_height: None,
            vbparams: vec!["testdummy:100:200".to_string()],
        };
        let mut params = ChainParams::regtest(&overrides).unwrap();
        let deployment = params.consensus.deployment(DeploymentPos::TestDummy);
        assert_eq!(deployment.start_time, 100);
        assert_eq!(deployment.timeout, 200);
        assert_eq!(deployment.bit, 28);

        // Restoring the deployment yields the untouched baseline profile,
        // so nothing else was modified.
        let baseline = regtest_default();
        params.update_version_bits_parameters(DeploymentPos::TestDummy, 0, Deployment::NO_TIMEOUT);
        assert_eq!(params, baseline);
    }

    #[test]
    fn vbparams_rejects_unknown_deployment() {
        let overrides = ActivationOverrides {
            segwit_height: None,
            vbparams: vec!["bogus:100:200".to_string()],
        };
        let err = ChainParams::regtest(&overrides).unwrap_err();
        assert_eq!(err.to_string(), "invalid deployment (bogus)");
    }

    #[test]
    fn vbparams_rejects_wrong_arity() {
        let overrides = ActivationOverrides {
            segwit_height: None,
            vbparams: vec!["testdummy:100".to_string()],
        };
        let err = ChainParams::regtest(&overrides).unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn vbparams_rejects_unparseable_fields() {
        let start_err = ChainParams::regtest(&ActivationOverrides {
            segwit_height: None,
            vbparams: vec!["testdummy:abc:200".to_string()],
        })
        .unwrap_err();
        assert_eq!(start_err.to_string(), "invalid deployment start time (abc)");

        let timeout_err = ChainParams::regtest(&ActivationOverrides {
            segwit_height: None,
            vbparams: vec!["testdummy:100:xyz".to_string()],
        })
        .unwrap_err();
        assert_eq!(timeout_err.to_string(), "invalid deployment timeout (xyz)");
    }

    #[test]
    fn segwit_height_minus_one_disables() {
        let overrides = ActivationOverrides { segwit_height: Some(-1), vbparams: vec![] };
        let params = ChainParams::regtest(&overrides).unwrap();
        assert_eq!(params.consensus.segwit_height, HEIGHT_DISABLED);
    }

    #[test]
    fn segwit_height_sets_directly() {
        let overrides = ActivationOverrides { segwit_height: Some(777), vbparams: vec![] };
        let params = ChainParams::regtest(&overrides).unwrap();
        assert_eq!(params.consensus.segwit_height, 777);
    }

    #[test]
    fn segwit_height_range_errors() {
        for bad in [-2, i64::from(u32::MAX), i64::MAX] {
            let overrides = ActivationOverrides { segwit_height: Some(bad), vbparams: vec![] };
            let err = ChainParams::regtest(&overrides).unwrap_err();
            assert!(err.to_string().contains("out of valid range"), "height {bad}");
        }
    }

    #[test]
    fn production_profiles_ignore_cli_overrides() {
        let overrides = ActivationOverrides {
            segwit_height: Some(-1),
            vbparams: vec!["testdummy:1:2".to_string()],
        };
        let main = ChainParams::for_network(Network::Main, &overrides).unwrap();
        assert_eq!(main.consensus.segwit_height, 6048);
        let test = ChainParams::for_network(Network::Test, &overrides).unwrap();
        assert_eq!(test.consensus.deployment(DeploymentPos::TestDummy).start_time, 1_199_145_601);
    }

    #[test]
    fn difficulty_change_recomputes_reward_sharing_bounds() {
        let mut params = ChainParams::main();
        params.set_difficulty_change_height(123);
        let consensus = &params.consensus;
        assert_eq!(consensus.cip9_height, 123);
        assert_eq!(
            consensus.first_mpos_block,
            consensus.last_pow_block + consensus.mpos_reward_recipients + consensus.coinbase_maturity
        );
        assert_eq!(consensus.last_mpos_block, 0);
        assert!(consensus.pow_no_retargeting);
        assert!(!consensus.pos_no_retargeting);
        // Unrelated fields are untouched.
        assert_eq!(params.base58_prefixes.pubkey_address, 66);
        assert_eq!(params.bech32_hrp, "tc");
        assert_eq!(consensus.segwit_height, 6048);
    }

    #[test]
    fn single_field_mutators_leave_the_rest_alone() {
        let baseline = ChainParams::main();
        let mut params = baseline.clone();
        params.set_offline_staking_height(9000);
        assert_eq!(params.consensus.offline_stake_height, 9000);
        params.set_offline_staking_height(baseline.consensus.offline_stake_height);
        assert_eq!(params, baseline);

        let mut params = baseline.clone();
        let address = H160::from_hex("00000000000000000000000000000000000000aa").unwrap();
        params.set_delegations_address(address);
        assert_eq!(params.consensus.delegations_address, address);
        params.set_last_mpos_block_height(77);
        assert_eq!(params.consensus.last_mpos_block, 77);
        params.set_muir_glacier_height(88);
        assert_eq!(params.consensus.muir_glacier_height, 88);
        params.set_reduce_blocktime_height(99);
        assert_eq!(params.consensus.reduce_blocktime_height, 99);
        assert_eq!(params.consensus.last_pow_block, baseline.consensus.last_pow_block);
    }

    #[test]
    fn unittest_rescales_maturity_dependent_constants() {
        let params = ChainParams::unittest(&ActivationOverrides::default()).unwrap();
        assert_eq!(params.network, Network::Unittest);
        let consensus = &params.consensus;
        assert_eq!(consensus.subsidy_halving_interval, 750);
        assert_eq!(consensus.subsidy_halving_interval_v2, 1500);
        assert_eq!(consensus.rule_change_activation_threshold, 1116);
        assert_eq!(consensus.miner_confirmation_window, 1488);
        assert_eq!(consensus.bip65_height, 1851);
        assert_eq!(consensus.bip66_height, 1751);
        assert_eq!(consensus.cip6_height, 1500);
        assert_eq!(consensus.checkpoint_span, 20);
        assert_eq!(consensus.rbt_checkpoint_span, 20);
        // The underlying regtest genesis is unchanged.
        assert_eq!(params.genesis_hash, uint256(REGTEST_GENESIS_HASH));
    }

    #[test]
    fn evm_genesis_substitutes_profile_heights() {
        let params = ChainParams::unittest(&ActivationOverrides::default()).unwrap();
        let rendered = params.evm_genesis_info();
        assert!(rendered.contains("\"istanbulForkBlock\": \"1500\""));
        assert!(!rendered.contains("STARTING_BLOCK"));
        serde_json::from_str::<serde_json::Value>(&rendered).expect("rendered config is JSON");
    }

    #[test]
    fn evm_genesis_at_height_overrides_all_placeholders() {
        let params = ChainParams::main();
        let rendered = params.evm_genesis_info_at(42);
        assert!(rendered.contains("\"constantinopleForkBlock\": \"42\""));
        assert!(rendered.contains("\"istanbulForkBlock\": \"42\""));
        assert!(rendered.contains("\"muirGlacierForkBlock\": \"42\""));
        assert!(!rendered.contains("STARTING_BLOCK"));
    }
}
