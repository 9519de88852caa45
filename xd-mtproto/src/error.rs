use thiserror::Error;

use crate::{SecretId, SessionId};

/// Why an envelope could not be produced or accepted.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A buffer had an impossible length. The caller passed something that
    /// was never a ciphertext.
    #[error("malformed {what}: {len} bytes")]
    InvalidInput {
        /// The argument that was rejected.
        what: &'static str,
        /// Its length.
        len: usize,
    },

    /// An argument, such as the authorization secret, was too short.
    #[error("{what} must be at least {min} bytes, got {got}")]
    TooShort {
        /// The argument that was rejected.
        what: &'static str,
        /// The minimum accepted length.
        min: usize,
        /// The length that was supplied.
        got: usize,
    },

    /// The ciphertext was made with a different authorization secret.
    #[error("secret id mismatch: got {}", hex_id(.got))]
    InvalidKeyId {
        /// The id found in the ciphertext.
        got: SecretId,
    },

    /// The salt inside the envelope is not acceptable.
    #[error("salt {salt:#018x} rejected")]
    InvalidSalt {
        /// The salt found in the envelope.
        salt: i64,
    },

    /// The envelope belongs to another session.
    #[error("session id mismatch: got {}", hex_id(.got))]
    InvalidSession {
        /// The session id found in the envelope.
        got: SessionId,
    },

    /// The message key does not match the decrypted envelope.
    #[error("msg_key mismatch")]
    InvalidMessageKey,

    /// A cipher invariant was violated or the CSPRNG failed.
    #[error("encryption failed: {0}")]
    Encryption(#[source] xd_crypto::Error),
}

impl Error {
    /// True for the errors that mean "this ciphertext is not trustworthy"
    /// as opposed to a caller bug or an internal failure.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidKeyId { .. }
                | Self::InvalidSalt { .. }
                | Self::InvalidSession { .. }
                | Self::InvalidMessageKey
        )
    }
}

impl From<xd_crypto::Error> for Error {
    fn from(e: xd_crypto::Error) -> Self {
        match e {
            xd_crypto::Error::InvalidInput { what, min, got } => Self::TooShort { what, min, got },
            other => Self::Encryption(other),
        }
    }
}

fn hex_id(id: &[u8; 8]) -> String {
    id.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_errors_keep_their_kind() {
        let short = xd_crypto::Error::InvalidInput { what: "authorization secret", min: 96, got: 3 };
        let mapped = Error::from(short);
        assert_eq!(mapped, Error::TooShort { what: "authorization secret", min: 96, got: 3 });
        assert_eq!(mapped.to_string(), "authorization secret must be at least 96 bytes, got 3");
        assert!(!mapped.is_authentication_failure());

        let unaligned = xd_crypto::Error::Unaligned { len: 5 };
        assert_eq!(Error::from(unaligned), Error::Encryption(unaligned));
    }

    #[test]
    fn authentication_failures() {
        assert!(Error::InvalidKeyId { got: [0; 8] }.is_authentication_failure());
        assert!(Error::InvalidMessageKey.is_authentication_failure());
        assert!(!Error::InvalidInput { what: "ciphertext", len: 0 }.is_authentication_failure());
    }

    #[test]
    fn display_shows_ids_in_hex() {
        let e = Error::InvalidSession { got: [0xde, 0xad, 0xbe, 0xef, 0, 1, 2, 3] };
        assert_eq!(e.to_string(), "session id mismatch: got deadbeef00010203");
    }
}
