//! AES-256 in Infinite Garble Extension mode.
//!
//! The 32-byte IV is two blocks: `iv[..16]` stands in for the ciphertext
//! block before the first one, `iv[16..]` for the plaintext block before it.
//!
//! ```text
//! c[i] = E(p[i] ^ c[i-1]) ^ p[i-1]
//! p[i] = D(c[i] ^ p[i-1]) ^ c[i-1]
//! ```

#[allow(deprecated)] // see https://github.com/RustCrypto/block-ciphers/issues/509
use ::aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray};
use ::aes::Aes256;

use crate::{AesIv, AesKey, BLOCK_LEN, Error};

type Block = [u8; BLOCK_LEN];

fn check_aligned(buffer: &[u8]) -> Result<(), Error> {
    if buffer.len() % BLOCK_LEN != 0 {
        return Err(Error::Unaligned { len: buffer.len() });
    }
    Ok(())
}

fn xor_in_place(dst: &mut [u8], src: &Block) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

fn split_iv(iv: &AesIv) -> (Block, Block) {
    let mut first = [0u8; BLOCK_LEN];
    let mut second = [0u8; BLOCK_LEN];
    first.copy_from_slice(&iv[..BLOCK_LEN]);
    second.copy_from_slice(&iv[BLOCK_LEN..]);
    (first, second)
}

/// Encrypt `buffer` in place.
///
/// Fails with [`Error::Unaligned`] unless `buffer.len()` is a multiple of 16.
#[allow(deprecated)]
pub fn ige_encrypt(buffer: &mut [u8], key: &AesKey, iv: &AesIv) -> Result<(), Error> {
    check_aligned(buffer)?;
    let cipher = Aes256::new(GenericArray::from_slice(key));
    let (mut prev_cipher, mut prev_plain) = split_iv(iv);

    for chunk in buffer.chunks_exact_mut(BLOCK_LEN) {
        let mut plain = [0u8; BLOCK_LEN];
        plain.copy_from_slice(chunk);

        xor_in_place(chunk, &prev_cipher);
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
        xor_in_place(chunk, &prev_plain);

        prev_cipher.copy_from_slice(chunk);
        prev_plain = plain;
    }
    Ok(())
}

/// Decrypt `buffer` in place.
///
/// Fails with [`Error::Unaligned`] unless `buffer.len()` is a multiple of 16.
#[allow(deprecated)]
pub fn ige_decrypt(buffer: &mut [u8], key: &AesKey, iv: &AesIv) -> Result<(), Error> {
    check_aligned(buffer)?;
    let cipher = Aes256::new(GenericArray::from_slice(key));
    let (mut prev_cipher, mut prev_plain) = split_iv(iv);

    for chunk in buffer.chunks_exact_mut(BLOCK_LEN) {
        let mut encrypted = [0u8; BLOCK_LEN];
        encrypted.copy_from_slice(chunk);

        xor_in_place(chunk, &prev_plain);
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        xor_in_place(chunk, &prev_cipher);

        prev_plain.copy_from_slice(chunk);
        prev_cipher = encrypted;
    }
    Ok(())
}
