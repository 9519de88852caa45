//! The shared authorization secret.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::hash::sha1;
use crate::key_schedule::{MESSAGE_KEY_MIN_LEN, calc_key, calc_message_key};
use crate::{AesIv, AesKey, Direction, Error, MessageKey, SecretId};

/// An authorization secret established out of band (normally by the DH
/// handshake), at least [`AuthSecret::MIN_LEN`] bytes long.
///
/// The key schedule alone reads only the first 96 bytes, but the message key
/// of server-to-client traffic hashes `secret[96..128]`, so shorter secrets
/// are rejected up front.
///
/// The bytes are wiped when the value is dropped and never appear in
/// `Debug` output.
#[derive(Clone)]
pub struct AuthSecret {
    data: Box<[u8]>,
}

impl AuthSecret {
    /// Shortest secret usable for both directions of message encryption.
    pub const MIN_LEN: usize = MESSAGE_KEY_MIN_LEN;

    /// Validate and take ownership of `data`.
    ///
    /// A rejected buffer is wiped before the error is returned.
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, Error> {
        let mut data = data.into();
        if data.len() < Self::MIN_LEN {
            let got = data.len();
            data.zeroize();
            return Err(Error::InvalidInput { what: "authorization secret", min: Self::MIN_LEN, got });
        }
        Ok(Self { data: data.into_boxed_slice() })
    }

    /// Wrap a standard 256-byte Telegram authorization key.
    ///
    /// The array is copied; wiping the caller's copy is up to the caller.
    pub fn from_bytes(data: [u8; 256]) -> Self {
        Self { data: Box::new(data) }
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length of the secret in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed secret.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The conventional MTProto identifier: `SHA1(secret)[12..20]`.
    pub fn derive_id(&self) -> SecretId {
        let sha = sha1(&[&self.data[..]]);
        let mut id = [0u8; 8];
        id.copy_from_slice(&sha[12..20]);
        id
    }

    /// [`crate::derive_keys`] without the length check.
    pub fn derive_keys(&self, msg_key: &MessageKey, direction: Direction) -> (AesKey, AesIv) {
        calc_key(&self.data, msg_key, direction)
    }

    /// [`crate::message_key`] without the length check.
    pub fn message_key(&self, direction: Direction, padded: &[u8]) -> MessageKey {
        calc_message_key(&self.data, direction, padded)
    }
}

impl Drop for AuthSecret {
    fn drop(&mut self) {
        self.data.zeroize();
    }
}

impl std::fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthSecret(len={})", self.data.len())
    }
}

impl PartialEq for AuthSecret {
    fn eq(&self, other: &Self) -> bool {
        self.data.ct_eq(&other.data).into()
    }
}

impl Eq for AuthSecret {}
