//! MTProto 2.0 message envelopes.
//!
//! This crate turns a plaintext message into a tagged AES-256-IGE ciphertext
//! and back:
//!
//! ```text
//! secret_id(8) ∥ msg_key(16) ∥ AES-256-IGE( salt(8, BE) ∥ session_id(8) ∥ message ∥ padding(12..=27) )
//! ```
//!
//! * [`encrypt`] / [`decrypt`]: the client's view of a connection
//! * [`encrypt_as`] / [`decrypt_as`]: either endpoint, with the parsed envelope
//! * [`decrypt_with_salts`]: decryption that also enforces salt freshness
//! * [`EncryptedSession`]: holds the per-connection state and frames payloads
//!   with a length prefix so padding never leaks to the caller
//!
//! The handshake that produces the [`AuthSecret`] and the transport that
//! carries ciphertexts are out of scope: bring your own.
//!
//! ```rust
//! use xd_mtproto::{AuthSecret, Side, decrypt_as, encrypt};
//!
//! let secret = AuthSecret::from_bytes([7u8; 256]);
//! let secret_id = secret.derive_id();
//! let session_id = [1u8; 8];
//!
//! let wire = encrypt(b"ping", 42, &session_id, &secret, &secret_id)?;
//! let opened = decrypt_as(Side::Server, &wire, &session_id, &secret, &secret_id)?;
//! assert_eq!(opened.salt, 42);
//! assert!(opened.payload.starts_with(b"ping"));
//! # Ok::<(), xd_mtproto::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod envelope;
mod error;
pub mod salt;
pub mod session;

pub use envelope::{
    Decrypted, HEADER_LEN, MAX_PADDING, MIN_PADDING, decrypt, decrypt_as, decrypt_with_salts,
    encrypt, encrypt_as, padding_len,
};
pub use error::Error;
pub use salt::{FutureSalt, SaltWindow};
pub use session::EncryptedSession;
pub use xd_crypto::{AuthSecret, Direction, MessageKey, SecretId, Side};

/// The 8-byte identifier of a logical connection.
pub type SessionId = [u8; 8];
