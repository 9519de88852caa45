//! Cryptographic primitives for MTProto 2.0 message envelopes.
//!
//! Provides:
//! - AES-256-IGE encryption/decryption
//! - The MTProto secret id, `SHA1(secret)[12..20]`
//! - [`AuthSecret`]: the shared authorization secret, zeroized on drop
//! - The MTProto 2.0 key schedule: [`derive_keys`] and [`message_key`]
//!
//! Everything here is synchronous and free of shared state. An [`AuthSecret`]
//! can be shared between threads and used for any number of concurrent calls.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod aes;
mod error;
mod hash;
mod key_schedule;
mod secret;

pub use error::Error;
pub use key_schedule::{
    Direction, KEY_SCHEDULE_MIN_LEN, MESSAGE_KEY_MIN_LEN, Side, derive_keys, message_key,
};
pub use secret::AuthSecret;

/// Size of an AES block, and the alignment of every encrypted region.
pub const BLOCK_LEN: usize = 16;

/// The 8-byte identifier carried in cleartext in front of every ciphertext.
pub type SecretId = [u8; 8];

/// The 16-byte message key that tags a ciphertext.
pub type MessageKey = [u8; 16];

/// A 256-bit AES key.
pub type AesKey = [u8; 32];

/// A 256-bit IGE initialization vector (two AES blocks).
pub type AesIv = [u8; 32];

/// Fill `buf` with bytes from the operating system CSPRNG.
pub fn fill_random(buf: &mut [u8]) -> Result<(), Error> {
    getrandom::getrandom(buf).map_err(Error::Entropy)
}
