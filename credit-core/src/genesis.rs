//! Deterministic genesis-block construction.
//!
//! The genesis block's coinbase output cannot be spent: it is never entered
//! into the coin database. The two VM commitment roots in the header are
//! fixed, network-independent constants representing the empty state.

use crate::crypto::Hash;
use crate::types::{
    script, Block, BlockHeader, OutPoint, Transaction, TxInput, TxOutput, SEQUENCE_FINAL,
};

/// Commitment root of the empty VM account state.
const EMPTY_STATE_ROOT: &str = "e965ffd002cd6ad0e2dc402b8044de833e06b23127ea8c3d80aec91410771495";

/// Message embedded in the CREDIT coinbase input.
const GENESIS_TIMESTAMP_MESSAGE: &str = "May 04, 2021 TerraCredit 3.0 started!";

/// Public key paid by the CREDIT genesis output.
const GENESIS_OUTPUT_PUBKEY: &str = "042bdb58f730ffa8fc0a134dac165cc1a76cac9603b6e13a8790c54ecae41d31274ab87f36589fb2f2ecbff5e3422468679423bb94f34ed879daf2f4c789b08cd5";

/// Returns the commitment root of the empty VM account state.
pub fn empty_state_root() -> Hash {
    Hash::from_raw_hex(EMPTY_STATE_ROOT).expect("state root constant is valid hex")
}

/// Returns the commitment root of the empty VM storage trie.
///
/// Keccak-256 of the RLP encoding of the empty byte string.
pub fn empty_utxo_root() -> Hash {
    Hash::keccak256(&[0x80])
}

/// Builds a genesis block from its parameter tuple.
///
/// Pure and deterministic: identical inputs always produce an identical
/// block. Hash and merkle-root validation happens one layer up, where the
/// per-network factories compare against their pinned literals.
pub fn create_genesis_block(
    timestamp_message: &str,
    output_script: Vec<u8>,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: u64,
) -> Block {
    let mut script_sig = Vec::new();
    script::push_num(&mut script_sig, 0);
    script::push_num(&mut script_sig, 488_804_799);
    // Difficulty operand pushed as an explicit script number: one length
    // byte then 0x04, not the small-integer opcode.
    script::push_script_num(&mut script_sig, 4);
    script::push_data(&mut script_sig, timestamp_message.as_bytes());

    let coinbase = Transaction {
        version: 1,
        inputs: vec![TxInput {
            prevout: OutPoint::null(),
            script_sig,
            sequence: SEQUENCE_FINAL,
        }],
        outputs: vec![TxOutput { value: reward, script_pubkey: output_script }],
        lock_time: 0,
    };

    let mut block = Block {
        header: BlockHeader {
            version,
            prev_block_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time,
            bits,
            nonce,
            state_root: empty_state_root(),
            utxo_root: empty_utxo_root(),
            prevout_stake: OutPoint::null(),
            block_signature: Vec::new(),
        },
        transactions: vec![coinbase],
    };
    block.header.merkle_root = block.merkle_root();
    block
}

/// Builds the CREDIT genesis block with the chain's fixed coinbase message
/// and pay-to-pubkey output script.
pub fn credit_genesis_block(time: u32, nonce: u32, bits: u32, version: i32, reward: u64) -> Block {
    let pubkey = hex::decode(GENESIS_OUTPUT_PUBKEY).expect("genesis pubkey constant is valid hex");
    let mut output_script = Vec::with_capacity(pubkey.len() + 2);
    script::push_data(&mut output_script, &pubkey);
    output_script.push(script::OP_CHECKSIG);
    create_genesis_block(GENESIS_TIMESTAMP_MESSAGE, output_script, time, nonce, bits, version, reward)
}
