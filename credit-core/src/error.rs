//! Error types for the CREDIT chain parameter crates.

use thiserror::Error;

/// Main error type for chain parameter construction and overrides.
///
/// Every variant is a startup-time configuration error: none of these are
/// retried or defaulted, callers are expected to abort initialization with
/// the message.
#[derive(Error, Debug)]
pub enum Error {
    /// The network selection string is not one of the known chains.
    #[error("unknown chain: {0}")]
    UnknownNetwork(String),

    /// A -vbparams argument did not have exactly three colon-separated fields.
    #[error("version bits parameters malformed, expecting deployment:start:end")]
    MalformedDeploymentParams,

    /// The start-time field of a -vbparams argument was not an integer.
    #[error("invalid deployment start time ({0})")]
    InvalidDeploymentStart(String),

    /// The timeout field of a -vbparams argument was not an integer.
    #[error("invalid deployment timeout ({0})")]
    InvalidDeploymentTimeout(String),

    /// The deployment name of a -vbparams argument is not known.
    #[error("invalid deployment ({0})")]
    UnknownDeployment(String),

    /// A -segwitheight value outside the representable height range.
    #[error("activation height {0} for segwit is out of valid range, use -1 to disable segwit")]
    SegwitHeightOutOfRange(i64),

    /// A hash or address literal failed to parse as hex of the right width.
    #[error("invalid hex literal: {0}")]
    InvalidHexLiteral(String),
}

/// A specialized `Result` type for chain parameter operations.
pub type Result<T> = std::result::Result<T, Error>;
