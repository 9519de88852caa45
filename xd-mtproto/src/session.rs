//! Per-connection encryption state.

use tracing::debug;
use xd_crypto::{AuthSecret, SecretId, Side, fill_random};

use crate::envelope::{decrypt_as, decrypt_with_salts, encrypt_as};
use crate::{Error, SaltWindow, SessionId};

const LEN_PREFIX: usize = 4;

/// An authorization secret bound to one session and one endpoint role.
///
/// [`EncryptedSession::pack`] prefixes each payload with its length
/// (`u32`, little-endian) before encrypting, so
/// [`EncryptedSession::unpack`] returns exactly the bytes that were packed
/// and never the random padding.
///
/// Both endpoints must construct their session with the same session id:
/// one side picks it with [`EncryptedSession::new`], the other adopts it
/// with [`EncryptedSession::with_session_id`].
#[derive(Debug)]
pub struct EncryptedSession {
    secret: AuthSecret,
    secret_id: SecretId,
    session_id: SessionId,
    side: Side,
    /// Salt stamped on outgoing messages.
    pub salt: i64,
}

impl EncryptedSession {
    /// Start a session with a fresh random session id.
    pub fn new(secret: AuthSecret, secret_id: SecretId, side: Side, first_salt: i64) -> Result<Self, Error> {
        let mut session_id = [0u8; 8];
        fill_random(&mut session_id)?;
        Ok(Self::with_session_id(secret, secret_id, side, session_id, first_salt))
    }

    /// Join a session whose id was chosen by the peer (or restored).
    pub fn with_session_id(
        secret: AuthSecret,
        secret_id: SecretId,
        side: Side,
        session_id: SessionId,
        salt: i64,
    ) -> Self {
        debug!(?side, "[session] opened session {}", i64::from_le_bytes(session_id));
        Self { secret, secret_id, session_id, side, salt }
    }

    /// The session id stamped on every envelope.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// The id of the authorization secret.
    pub fn secret_id(&self) -> SecretId {
        self.secret_id
    }

    /// This endpoint's role.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Length-prefix and encrypt `payload` for the peer.
    pub fn pack(&self, payload: &[u8]) -> Result<Vec<u8>, Error> {
        let len = u32::try_from(payload.len())
            .map_err(|_| Error::InvalidInput { what: "payload", len: payload.len() })?;
        let mut framed = Vec::with_capacity(LEN_PREFIX + payload.len());
        framed.extend_from_slice(&len.to_le_bytes());
        framed.extend_from_slice(payload);
        encrypt_as(self.side, &framed, self.salt, &self.session_id, &self.secret, &self.secret_id)
    }

    /// Decrypt a ciphertext from the peer and return the packed payload.
    pub fn unpack(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        let opened = decrypt_as(self.side, ciphertext, &self.session_id, &self.secret, &self.secret_id)?;
        unframe(opened.payload)
    }

    /// Like [`EncryptedSession::unpack`], also enforcing salt freshness.
    pub fn unpack_with_salts(&self, ciphertext: &[u8], salts: &SaltWindow, now: i32) -> Result<Vec<u8>, Error> {
        let opened = decrypt_with_salts(
            self.side,
            ciphertext,
            &self.session_id,
            &self.secret,
            &self.secret_id,
            salts,
            now,
        )?;
        unframe(opened.payload)
    }
}

fn unframe(mut plaintext: Vec<u8>) -> Result<Vec<u8>, Error> {
    if plaintext.len() < LEN_PREFIX {
        return Err(Error::InvalidInput { what: "framed payload", len: plaintext.len() });
    }
    let mut prefix = [0u8; LEN_PREFIX];
    prefix.copy_from_slice(&plaintext[..LEN_PREFIX]);
    let len = u32::from_le_bytes(prefix) as usize;
    if len > plaintext.len() - LEN_PREFIX {
        return Err(Error::InvalidInput { what: "length prefix", len });
    }
    plaintext.truncate(LEN_PREFIX + len);
    Ok(plaintext.split_off(LEN_PREFIX))
}
