//! Hash primitives and fixed-width byte types for the CREDIT chain.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::error::{Error, Result};

/// A 32-byte hash value.
///
/// Bytes are kept in serialization order. `Display` and [`Hash::from_hex`]
/// use the reversed "block explorer" order, matching how block and
/// transaction hashes are quoted everywhere else in the ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Creates a new zero-initialized hash.
    pub fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Creates a hash from raw bytes in serialization order.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Returns the hash as a byte slice in serialization order.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parses a hash from display-order hex (the quoted, reversed form).
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = decode_fixed::<32>(s)?;
        bytes.reverse();
        Ok(Hash(bytes))
    }

    /// Parses a hash from hex already in serialization order.
    ///
    /// Used for the EVM-side commitment roots, which are quoted in their
    /// native byte order rather than the reversed form.
    pub fn from_raw_hex(s: &str) -> Result<Self> {
        Ok(Hash(decode_fixed::<32>(s)?))
    }

    /// Computes the double-SHA256 hash of the given data.
    pub fn double_sha256(data: &[u8]) -> Self {
        let first = Sha256::digest(data);
        let second = Sha256::digest(first);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&second);
        Hash(hash)
    }

    /// Computes the Keccak-256 hash of the given data.
    pub fn keccak256(data: &[u8]) -> Self {
        let digest = Keccak256::digest(data);
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        Hash(hash)
    }

    /// Returns true if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A 20-byte address, quoted in EVM byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct H160(pub [u8; 20]);

impl H160 {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        H160(bytes)
    }

    /// Parses an address from hex in EVM byte order.
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(H160(decode_fixed::<20>(s)?))
    }

    /// Returns the address as a byte slice.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for H160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|_| Error::InvalidHexLiteral(s.to_string()))?;
    let mut out = [0u8; N];
    if bytes.len() != N {
        return Err(Error::InvalidHexLiteral(s.to_string()));
    }
    out.copy_from_slice(&bytes);
    Ok(out)
}
