//! Consensus-serializable block and transaction types.
//!
//! These carry the byte-exact wire encoding used for hashing: block and
//! transaction identities are double-SHA256 over these encodings, so the
//! layout here is consensus-critical and must not change.

use serde::{Deserialize, Serialize};

use crate::crypto::Hash;

/// One coin in base units.
pub const COIN: u64 = 100_000_000;

/// Sequence number for an input with no relative lock.
pub const SEQUENCE_FINAL: u32 = 0xffff_ffff;

/// Identifies a specific transaction output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutPoint {
    /// Transaction id holding the output.
    pub txid: Hash,
    /// Output index within that transaction.
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint used by coinbase inputs and unset stake pointers.
    pub fn null() -> Self {
        OutPoint { txid: Hash::zero(), index: u32::MAX }
    }

    /// Returns true if this is the null outpoint.
    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.index == u32::MAX
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.txid.as_bytes());
        out.extend_from_slice(&self.index.to_le_bytes());
    }
}

/// A transaction input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxInput {
    /// Reference to the transaction output being spent.
    pub prevout: OutPoint,
    /// Unlocking script; carries arbitrary bytes in a coinbase.
    pub script_sig: Vec<u8>,
    /// Sequence number.
    pub sequence: u32,
}

impl TxInput {
    /// Returns true if this is a coinbase input.
    pub fn is_coinbase(&self) -> bool {
        self.prevout.is_null()
    }
}

/// A transaction output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxOutput {
    /// Amount in base units.
    pub value: u64,
    /// Locking script.
    pub script_pubkey: Vec<u8>,
}

/// A transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version.
    pub version: i32,
    /// Inputs being spent.
    pub inputs: Vec<TxInput>,
    /// Outputs being created.
    pub outputs: Vec<TxOutput>,
    /// Earliest time or height the transaction is final.
    pub lock_time: u32,
}

impl Transaction {
    /// Encodes the transaction in consensus wire format.
    pub fn consensus_encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        put_compact_size(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            input.prevout.encode(&mut out);
            put_compact_size(&mut out, input.script_sig.len() as u64);
            out.extend_from_slice(&input.script_sig);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        put_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            put_compact_size(&mut out, output.script_pubkey.len() as u64);
            out.extend_from_slice(&output.script_pubkey);
        }
        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }

    /// Computes the transaction id.
    pub fn txid(&self) -> Hash {
        Hash::double_sha256(&self.consensus_encode())
    }

    /// Returns true if this is a coinbase transaction.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }
}

/// Block header, including the embedded-VM commitment roots.
///
/// The state and storage roots, the stake outpoint and the block signature
/// are all part of the hashed header on this chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    /// Header format version.
    pub version: i32,
    /// Hash of the previous block; null for the genesis block.
    pub prev_block_hash: Hash,
    /// Root hash of the transaction merkle tree.
    pub merkle_root: Hash,
    /// Block creation timestamp (seconds since Unix epoch).
    pub time: u32,
    /// Difficulty target in compact format.
    pub bits: u32,
    /// Proof-of-work nonce.
    pub nonce: u32,
    /// Commitment root of the embedded VM account state.
    pub state_root: Hash,
    /// Commitment root of the embedded VM storage trie.
    pub utxo_root: Hash,
    /// Outpoint of the staked coin for proof-of-stake blocks.
    pub prevout_stake: OutPoint,
    /// Staker signature over the header for proof-of-stake blocks.
    pub block_signature: Vec<u8>,
}

impl BlockHeader {
    /// Encodes the header in consensus wire format.
    pub fn consensus_encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(self.prev_block_hash.as_bytes());
        out.extend_from_slice(self.merkle_root.as_bytes());
        out.extend_from_slice(&self.time.to_le_bytes());
        out.extend_from_slice(&self.bits.to_le_bytes());
        out.extend_from_slice(&self.nonce.to_le_bytes());
        out.extend_from_slice(self.state_root.as_bytes());
        out.extend_from_slice(self.utxo_root.as_bytes());
        self.prevout_stake.encode(&mut out);
        put_compact_size(&mut out, self.block_signature.len() as u64);
        out.extend_from_slice(&self.block_signature);
        out
    }

    /// Computes the block hash.
    pub fn hash(&self) -> Hash {
        Hash::double_sha256(&self.consensus_encode())
    }

    /// Returns true if the header carries a proof-of-stake proof.
    pub fn is_proof_of_stake(&self) -> bool {
        !self.prevout_stake.is_null()
    }
}

/// A block: header plus transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
    /// Transactions in the block, coinbase first.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Computes the merkle root over the block's transactions.
    ///
    /// Odd levels duplicate their last entry, as in the original format.
    pub fn merkle_root(&self) -> Hash {
        let mut level: Vec<Hash> = self.transactions.iter().map(Transaction::txid).collect();
        if level.is_empty() {
            return Hash::zero();
        }
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len() / 2 + 1);
            for pair in level.chunks(2) {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                let mut combined = Vec::with_capacity(64);
                combined.extend_from_slice(left.as_bytes());
                combined.extend_from_slice(right.as_bytes());
                next.push(Hash::double_sha256(&combined));
            }
            level = next;
        }
        level[0]
    }

    /// Computes the block hash.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}

/// Appends a CompactSize-encoded length.
pub fn put_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0x00..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Output-script building helpers.
///
/// Only the opcodes needed to express the chain's fixed scripts are here;
/// script execution lives in the validation engine.
pub mod script {
    /// Pushes an empty value onto the stack.
    pub const OP_0: u8 = 0x00;
    /// Pops a signature and a pubkey and verifies the signature.
    pub const OP_CHECKSIG: u8 = 0xac;

    const OP_1NEGATE: u8 = 0x4f;
    const OP_1: u8 = 0x51;

    /// Appends a minimal push of `data`.
    pub fn push_data(script: &mut Vec<u8>, data: &[u8]) {
        assert!(data.len() < 0x4c, "direct pushes only cover lengths below OP_PUSHDATA1");
        script.push(data.len() as u8);
        script.extend_from_slice(data);
    }

    /// Appends a minimal push of the integer `n` in script-number form.
    pub fn push_num(script: &mut Vec<u8>, n: i64) {
        if n == 0 {
            script.push(OP_0);
        } else if n == -1 {
            script.push(OP_1NEGATE);
        } else if (1..=16).contains(&n) {
            script.push(OP_1 + (n as u8) - 1);
        } else {
            push_data(script, &script_num(n));
        }
    }

    /// Appends a push of `n` serialized in script-number form, without
    /// collapsing small values to their dedicated opcodes. Matches pushing
    /// an explicitly constructed script number rather than an integer.
    pub fn push_script_num(script: &mut Vec<u8>, n: i64) {
        push_data(script, &script_num(n));
    }

    /// Minimal little-endian script-number encoding with a sign bit.
    fn script_num(n: i64) -> Vec<u8> {
        let negative = n < 0;
        let mut abs = n.unsigned_abs();
        let mut out = Vec::new();
        while abs > 0 {
            out.push((abs & 0xff) as u8);
            abs >>= 8;
        }
        if out.last().is_some_and(|b| b & 0x80 != 0) {
            out.push(if negative { 0x80 } else { 0x00 });
        } else if negative {
            let last = out.len() - 1;
            out[last] |= 0x80;
        }
        out
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_size_boundaries() {
        let cases: [(u64, Vec<u8>); 4] = [
            (0xfc, vec![0xfc]),
            (0xfd, vec![0xfd, 0xfd, 0x00]),
            (0x1_0000, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0x1_0000_0000, vec![0xff, 0, 0, 0, 0, 1, 0, 0, 0]),
        ];
        for (n, expected) in cases {
            let mut out = Vec::new();
            put_compact_size(&mut out, n);
            assert_eq!(out, expected, "encoding of {n}");
        }
    }

    #[test]
    fn coinbase_detection() {
        let tx = Transaction {
            version: 1,
            inputs: vec![TxInput {
                prevout: OutPoint::null(),
                script_sig: vec![1, 2, 3],
                sequence: SEQUENCE_FINAL,
            }],
            outputs: vec![TxOutput { value: 0, script_pubkey: vec![] }],
            lock_time: 0,
        };
        assert!(tx.is_coinbase());
        assert!(tx.inputs[0].prevout.is_null());
    }

    #[test]
    fn single_transaction_merkle_root_is_its_txid() {
        let tx = Transaction {
            version: 1,
            inputs: vec![],
            outputs: vec![TxOutput { value: 5, script_pubkey: vec![0xac] }],
            lock_time: 0,
        };
        let block = Block {
            header: BlockHeader {
                version: 1,
                prev_block_hash: Hash::zero(),
                merkle_root: Hash::zero(),
                time: 0,
                bits: 0,
                nonce: 0,
                state_root: Hash::zero(),
                utxo_root: Hash::zero(),
                prevout_stake: OutPoint::null(),
                block_signature: vec![],
            },
            transactions: vec![tx.clone()],
        };
        assert_eq!(block.merkle_root(), tx.txid());
    }

    #[test]
    fn merkle_root_duplicates_odd_entry() {
        let mk_tx = |value| Transaction {
            version: 1,
            inputs: vec![],
            outputs: vec![TxOutput { value, script_pubkey: vec![] }],
            lock_time: 0,
        };
        let txs: Vec<Transaction> = (0..3).map(mk_tx).collect();
        let header = BlockHeader {
            version: 1,
            prev_block_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: 0,
            bits: 0,
            nonce: 0,
            state_root: Hash::zero(),
            utxo_root: Hash::zero(),
            prevout_stake: OutPoint::null(),
            block_signature: vec![],
        };
        let block = Block { header, transactions: txs.clone() };

        // Hand-computed pairing: (0,1) then (2,2).
        let combine = |a: Hash, b: Hash| {
            let mut buf = Vec::new();
            buf.extend_from_slice(a.as_bytes());
            buf.extend_from_slice(b.as_bytes());
            Hash::double_sha256(&buf)
        };
        let left = combine(txs[0].txid(), txs[1].txid());
        let right = combine(txs[2].txid(), txs[2].txid());
        assert_eq!(block.merkle_root(), combine(left, right));
    }

    #[test]
    fn header_hash_commits_to_vm_roots() {
        let base = BlockHeader {
            version: 1,
            prev_block_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: 1,
            bits: 2,
            nonce: 3,
            state_root: Hash::zero(),
            utxo_root: Hash::zero(),
            prevout_stake: OutPoint::null(),
            block_signature: vec![],
        };
        let mut changed = base.clone();
        changed.state_root = Hash::from_bytes([1u8; 32]);
        assert_ne!(base.hash(), changed.hash());
    }
}
