use crate::keys::{DerivedKey, KEY_LEN, MasterSecret, SigningKey};
use aes::Aes128;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use csign_domain::SignatureType;

/// Fixed purpose indices fed to the key derivation function.
pub mod index {
    pub const POSSESSION: u64 = 1;
    pub const KNOWLEDGE: u64 = 2;
    pub const BIOMETRY: u64 = 3;
    pub const TRANSPORT: u64 = 1_000;
    pub const VAULT_ENCRYPTION: u64 = 2_000;
}

/// Derives the key for `index`: `AES-128(master, 0^8 || be64(index))`.
#[must_use]
pub fn derive_key(master: &MasterSecret, index: u64) -> DerivedKey {
    let cipher = Aes128::new(GenericArray::from_slice(master.as_bytes()));

    let mut block = GenericArray::from(counter_block(index));
    cipher.encrypt_block(&mut block);

    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&block);
    DerivedKey::from_bytes(key)
}

/// Key indices of a signature type, in signing order.
#[must_use]
pub const fn factor_indices(signature_type: SignatureType) -> &'static [u64] {
    use index::{BIOMETRY, KNOWLEDGE, POSSESSION};
    match signature_type {
        SignatureType::Possession => &[POSSESSION],
        SignatureType::Knowledge => &[KNOWLEDGE],
        SignatureType::Biometry => &[BIOMETRY],
        SignatureType::PossessionKnowledge => &[POSSESSION, KNOWLEDGE],
        SignatureType::PossessionBiometry => &[POSSESSION, BIOMETRY],
        SignatureType::PossessionKnowledgeBiometry => &[POSSESSION, KNOWLEDGE, BIOMETRY],
    }
}

/// Derives the factor keys a signature of `signature_type` is computed with.
#[must_use]
pub fn derive_signature_keys(
    signature_type: SignatureType,
    master: &MasterSecret,
) -> Vec<SigningKey> {
    factor_indices(signature_type).iter().map(|&i| derive_key(master, i)).collect()
}

/// 16-byte block with `value` big-endian in the low eight bytes.
pub(crate) fn counter_block(value: u64) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[8..].copy_from_slice(&value.to_be_bytes());
    block
}
