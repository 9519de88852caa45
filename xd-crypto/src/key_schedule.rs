//! MTProto 2.0 key schedule.
//!
//! Both peers hold the same authorization secret. Each direction of traffic
//! reads the secret at a different offset, so the client and the server
//! never derive the same AES key/IV for their own messages.

use crate::hash::sha256;
use crate::{AesIv, AesKey, Error, MessageKey};

/// Shortest secret [`derive_keys`] accepts.
pub const KEY_SCHEDULE_MIN_LEN: usize = 96;

/// Shortest secret [`message_key`] accepts in either direction.
pub const MESSAGE_KEY_MIN_LEN: usize = 128;

/// Which way a message travels, seen from the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sent by the client, received by the server.
    Outgoing,
    /// Sent by the server, received by the client.
    Incoming,
}

impl Direction {
    /// Offset into the authorization secret used by this direction.
    pub fn offset(self) -> usize {
        match self {
            Direction::Outgoing => 0,
            Direction::Incoming => 8,
        }
    }
}

/// The role of the local endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The party that initiated the connection.
    Client,
    /// The party that accepted it.
    Server,
}

impl Side {
    /// Direction of the messages this side encrypts.
    pub fn sending(self) -> Direction {
        match self {
            Side::Client => Direction::Outgoing,
            Side::Server => Direction::Incoming,
        }
    }

    /// Direction of the messages this side decrypts.
    pub fn receiving(self) -> Direction {
        self.peer().sending()
    }

    /// The other end of the connection.
    pub fn peer(self) -> Side {
        match self {
            Side::Client => Side::Server,
            Side::Server => Side::Client,
        }
    }
}

pub(crate) fn calc_key(secret: &[u8], msg_key: &MessageKey, direction: Direction) -> (AesKey, AesIv) {
    let x = direction.offset();
    let sha_a = sha256(&[&msg_key[..], &secret[x..x + 36]]);
    let sha_b = sha256(&[&secret[40 + x..40 + x + 36], &msg_key[..]]);

    let mut aes_key = [0u8; 32];
    aes_key[..8].copy_from_slice(&sha_a[..8]);
    aes_key[8..24].copy_from_slice(&sha_b[8..24]);
    aes_key[24..].copy_from_slice(&sha_a[24..]);

    let mut aes_iv = [0u8; 32];
    aes_iv[..8].copy_from_slice(&sha_b[..8]);
    aes_iv[8..24].copy_from_slice(&sha_a[8..24]);
    aes_iv[24..].copy_from_slice(&sha_b[24..]);

    (aes_key, aes_iv)
}

pub(crate) fn calc_message_key(secret: &[u8], direction: Direction, padded: &[u8]) -> MessageKey {
    let x = direction.offset();
    let large = sha256(&[&secret[88 + x..88 + x + 32], padded]);
    let mut msg_key = [0u8; 16];
    msg_key.copy_from_slice(&large[8..24]);
    msg_key
}

/// Derive the AES-256-IGE `(key, iv)` pair for one message.
///
/// Deterministic in its inputs. Which bytes of `secret` are read depends only
/// on `direction`, never on their values.
pub fn derive_keys(
    secret: &[u8],
    msg_key: &MessageKey,
    direction: Direction,
) -> Result<(AesKey, AesIv), Error> {
    if secret.len() < KEY_SCHEDULE_MIN_LEN {
        return Err(Error::InvalidInput {
            what: "authorization secret",
            min: KEY_SCHEDULE_MIN_LEN,
            got: secret.len(),
        });
    }
    Ok(calc_key(secret, msg_key, direction))
}

/// Compute the message key of a padded plaintext envelope.
///
/// `SHA256(secret[88+x .. 120+x] ∥ padded)[8..24]`, where `x` is the
/// offset of `direction`.
pub fn message_key(secret: &[u8], direction: Direction, padded: &[u8]) -> Result<MessageKey, Error> {
    let min = 120 + direction.offset();
    if secret.len() < min {
        return Err(Error::InvalidInput { what: "authorization secret", min, got: secret.len() });
    }
    Ok(calc_message_key(secret, direction, padded))
}
