use thiserror::Error;

/// Errors from the primitives in this crate.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An argument was too short to be used.
    #[error("{what} must be at least {min} bytes, got {got}")]
    InvalidInput {
        /// The argument that was rejected.
        what: &'static str,
        /// The minimum accepted length.
        min: usize,
        /// The length that was supplied.
        got: usize,
    },

    /// An AES-IGE buffer was not a whole number of blocks.
    #[error("AES-IGE buffer of {len} bytes is not a multiple of the block size")]
    Unaligned {
        /// The offending buffer length.
        len: usize,
    },

    /// The operating system CSPRNG failed.
    #[error("entropy source failed: {0}")]
    Entropy(getrandom::Error),
}
