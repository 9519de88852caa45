//! Digest helpers over concatenated byte slices.

use sha1::Sha1;
use sha2::{Digest, Sha256};

/// SHA-256 of `parts` concatenated, without materialising the concatenation.
pub(crate) fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let mut h = Sha256::new();
    for part in parts {
        h.update(part);
    }
    h.finalize().into()
}

/// SHA-1 of `parts` concatenated.
pub(crate) fn sha1(parts: &[&[u8]]) -> [u8; 20] {
    let mut h = Sha1::new();
    for part in parts {
        h.update(part);
    }
    h.finalize().into()
}
