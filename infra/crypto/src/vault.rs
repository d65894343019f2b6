use crate::error::{CryptoError, CryptoErrorExt};
use crate::kdf::{derive_key, index};
use crate::keys::{DerivedKey, KEY_LEN, MasterSecret};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, KeyInit, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use getrandom::fill;
use zeroize::Zeroizing;

pub const SEALED_VERSION_V1: u8 = 1;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

const HEADER_LEN: usize = 1;

/// Seals the vault encryption key of an activation under its transport key.
///
/// Both keys are derived from `master`. The result is the base64 encoding of
/// `[version][nonce][ciphertext || tag]` (AES-128-GCM, random nonce).
///
/// # Errors
/// Returns [`CryptoError::Encryption`] if no randomness is available or sealing fails.
pub fn seal_vault_key(master: &MasterSecret) -> Result<String, CryptoError> {
    let transport = derive_key(master, index::TRANSPORT);
    let vault = derive_key(master, index::VAULT_ENCRYPTION);
    let cipher = cipher(&transport)?;

    let mut nonce = [0u8; NONCE_LEN];
    fill(&mut nonce).map_err(|e| CryptoError::Encryption {
        message: e.to_string().into(),
        context: Some("System RNG unavailable for nonce generation".into()),
    })?;

    let sealed = cipher.encrypt(Nonce::from_slice(&nonce), vault.as_bytes().as_slice()).map_err(
        |_| CryptoError::Encryption {
            message: "Encryption failed".into(),
            context: Some("AEAD encryption failed".into()),
        },
    )?;

    let mut blob = Vec::with_capacity(HEADER_LEN + NONCE_LEN + sealed.len());
    blob.push(SEALED_VERSION_V1);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&sealed);
    Ok(STANDARD.encode(blob))
}

/// Device-side counterpart of [`seal_vault_key`].
///
/// # Errors
/// Returns [`CryptoError::Decryption`] if the blob is malformed, has an unknown version, or
/// was not sealed under the transport key of `master`.
pub fn open_vault_key(master: &MasterSecret, sealed: &str) -> Result<DerivedKey, CryptoError> {
    let blob = STANDARD.decode(sealed).map_err(|e| CryptoError::Decryption {
        message: e.to_string().into(),
        context: Some("sealed vault key is not base64".into()),
    })?;

    if blob.len() != HEADER_LEN + NONCE_LEN + KEY_LEN + TAG_LEN {
        return Err(CryptoError::Decryption {
            message: format!("unexpected sealed key length {}", blob.len()).into(),
            context: None,
        });
    }

    let (version, rest) = blob.split_at(HEADER_LEN);
    if version != [SEALED_VERSION_V1] {
        return Err(CryptoError::Decryption {
            message: "Unsupported sealed key version".into(),
            context: Some(format!("version={}", version[0]).into()),
        });
    }

    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
    let transport = derive_key(master, index::TRANSPORT);
    let plain = Zeroizing::new(
        cipher(&transport)?.decrypt(Nonce::from_slice(nonce), ciphertext).map_err(|_| {
            CryptoError::Decryption {
                message: "Authentication failed".into(),
                context: Some("wrong transport key or tampered blob".into()),
            }
        })?,
    );

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&plain);
    Ok(DerivedKey::from_bytes(key))
}

fn cipher(key: &DerivedKey) -> Result<Aes128Gcm, CryptoError> {
    Aes128Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Internal { message: e.to_string().into(), context: None })
        .context("AES-128-GCM key")
}
