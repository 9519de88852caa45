//! Encryption and validated decryption of single envelopes.
//!
//! Plaintext envelope:
//!
//! ```text
//! salt:       i64, big-endian
//! session_id: [u8; 8]
//! message:    [u8; n]
//! padding:    [u8; 12..=27]   (envelope + padding is a multiple of 16)
//! ```
//!
//! Decryption returns `message ∥ padding`; the envelope does not record `n`.
//! [`EncryptedSession`](crate::EncryptedSession) adds a length prefix for
//! callers that need the exact message back.

use subtle::ConstantTimeEq;
use tracing::debug;
use xd_crypto::{AuthSecret, BLOCK_LEN, MessageKey, SecretId, Side, aes, fill_random};

use crate::{Error, SaltWindow, SessionId};

/// `secret_id ∥ msg_key` in front of the encrypted region.
pub const HEADER_LEN: usize = 24;

/// Fewest padding bytes appended to an envelope.
pub const MIN_PADDING: usize = 12;

/// Most padding bytes appended to an envelope.
pub const MAX_PADDING: usize = MIN_PADDING + BLOCK_LEN - 1;

/// `salt ∥ session_id` at the start of the plaintext.
const ENVELOPE_PREFIX_LEN: usize = 16;

/// Padding for an envelope of `len` bytes: the smallest value of at least
/// [`MIN_PADDING`] that block-aligns the total.
pub fn padding_len(len: usize) -> usize {
    MIN_PADDING + (BLOCK_LEN - (len + MIN_PADDING) % BLOCK_LEN) % BLOCK_LEN
}

/// A successfully decrypted envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decrypted {
    /// Salt chosen by the sender.
    pub salt: i64,
    /// Session id from the envelope (equal to the expected one).
    pub session_id: SessionId,
    /// `message ∥ padding`.
    pub payload: Vec<u8>,
}

/// Encrypt `message` as the client.
pub fn encrypt(
    message: &[u8],
    salt: i64,
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
) -> Result<Vec<u8>, Error> {
    encrypt_as(Side::Client, message, salt, session_id, secret, secret_id)
}

/// Encrypt `message` as `side`; only the peer of `side` can decrypt it.
pub fn encrypt_as(
    side: Side,
    message: &[u8],
    salt: i64,
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
) -> Result<Vec<u8>, Error> {
    let mut rnd = [0u8; MAX_PADDING];
    fill_random(&mut rnd)?;
    seal(side, message, salt, session_id, secret, secret_id, &rnd)
}

pub(crate) fn seal(
    side: Side,
    message: &[u8],
    salt: i64,
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
    rnd: &[u8; MAX_PADDING],
) -> Result<Vec<u8>, Error> {
    let direction = side.sending();
    let envelope_len = ENVELOPE_PREFIX_LEN + message.len();
    let pad = padding_len(envelope_len);

    let mut buf = Vec::with_capacity(HEADER_LEN + envelope_len + pad);
    buf.extend_from_slice(secret_id);
    buf.extend_from_slice(&[0u8; 16]);
    buf.extend_from_slice(&salt.to_be_bytes());
    buf.extend_from_slice(session_id);
    buf.extend_from_slice(message);
    buf.extend_from_slice(&rnd[..pad]);

    let msg_key = secret.message_key(direction, &buf[HEADER_LEN..]);
    let (key, iv) = secret.derive_keys(&msg_key, direction);
    aes::ige_encrypt(&mut buf[HEADER_LEN..], &key, &iv)?;
    buf[8..HEADER_LEN].copy_from_slice(&msg_key);

    debug!(?side, len = buf.len(), padding = pad, "[envelope] encrypted message");
    Ok(buf)
}

/// Decrypt a ciphertext received by the client and return `message ∥ padding`.
///
/// The salt is decoded but not checked for freshness; use
/// [`decrypt_with_salts`] for that.
pub fn decrypt(
    ciphertext: &[u8],
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
) -> Result<Vec<u8>, Error> {
    decrypt_as(Side::Client, ciphertext, session_id, secret, secret_id).map(|d| d.payload)
}

/// Decrypt a ciphertext received by `side`.
pub fn decrypt_as(
    side: Side,
    ciphertext: &[u8],
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
) -> Result<Decrypted, Error> {
    logged(side, open(side, ciphertext, session_id, secret, secret_id, None))
}

/// Like [`decrypt_as`], but also rejects with [`Error::InvalidSalt`] any salt
/// that `salts` does not consider valid at unix time `now`.
pub fn decrypt_with_salts(
    side: Side,
    ciphertext: &[u8],
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
    salts: &SaltWindow,
    now: i32,
) -> Result<Decrypted, Error> {
    logged(side, open(side, ciphertext, session_id, secret, secret_id, Some((salts, now))))
}

fn logged(side: Side, result: Result<Decrypted, Error>) -> Result<Decrypted, Error> {
    match &result {
        Ok(d) => debug!(?side, len = d.payload.len(), "[envelope] decrypted message"),
        Err(e) => debug!(?side, "[envelope] rejected ciphertext: {e}"),
    }
    result
}

fn open(
    side: Side,
    ciphertext: &[u8],
    session_id: &SessionId,
    secret: &AuthSecret,
    secret_id: &SecretId,
    salts: Option<(&SaltWindow, i32)>,
) -> Result<Decrypted, Error> {
    let len = ciphertext.len();
    if len < HEADER_LEN + ENVELOPE_PREFIX_LEN || (len - HEADER_LEN) % BLOCK_LEN != 0 {
        return Err(Error::InvalidInput { what: "ciphertext", len });
    }

    let got: SecretId = array(&ciphertext[..8]);
    if got != *secret_id {
        return Err(Error::InvalidKeyId { got });
    }

    let msg_key: MessageKey = array(&ciphertext[8..HEADER_LEN]);
    let direction = side.receiving();
    let (key, iv) = secret.derive_keys(&msg_key, direction);

    let mut plaintext = ciphertext[HEADER_LEN..].to_vec();
    aes::ige_decrypt(&mut plaintext, &key, &iv)?;

    let salt = i64::from_be_bytes(array(&plaintext[..8]));
    if let Some((window, now)) = salts {
        if !window.is_valid(salt, now) {
            return Err(Error::InvalidSalt { salt });
        }
    }

    let got: SessionId = array(&plaintext[8..ENVELOPE_PREFIX_LEN]);
    if got != *session_id {
        return Err(Error::InvalidSession { got });
    }

    let expected = secret.message_key(direction, &plaintext);
    if !bool::from(expected.ct_eq(&msg_key)) {
        return Err(Error::InvalidMessageKey);
    }

    let payload = plaintext.split_off(ENVELOPE_PREFIX_LEN);
    Ok(Decrypted { salt, session_id: got, payload })
}

// Callers bounds-check `src` first.
fn array<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&src[..N]);
    out
}
