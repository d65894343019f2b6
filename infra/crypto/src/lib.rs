//! # Countersign crypto
//!
//! Primitives behind multi-factor signature verification:
//!
//! * [`keys`]: P-256 key decoding and the ECDH agreement producing an activation's master
//!   secret.
//! * [`kdf`]: AES-based derivation of the factor, transport and vault keys.
//! * [`signature`]: decimal multi-factor signatures, their syntax and constant-time checks.
//! * [`vault`]: sealing the vault encryption key under the transport key.
//!
//! ## Example
//! ```rust
//! use csign_crypto::prelude::*;
//! use csign_domain::SignatureType;
//!
//! let master = MasterSecret::from_bytes([7; 16]);
//! let keys = derive_signature_keys(SignatureType::PossessionKnowledge, &master);
//!
//! let signature = compute_signature(b"data&secret", &keys, 5).unwrap();
//! validate_signature_format(&signature, 2).unwrap();
//! assert!(verify(b"data&secret", &signature, &keys, 5).unwrap());
//! ```

mod error;
pub mod kdf;
pub mod keys;
pub mod signature;
pub mod vault;

pub use crate::error::{CryptoError, CryptoErrorExt};

pub mod prelude {
    pub use crate::error::{CryptoError, CryptoErrorExt};
    pub use crate::kdf::{derive_key, derive_signature_keys, factor_indices, index};
    pub use crate::keys::{
        DerivedKey, MasterSecret, SigningKey, agree, decode_private_key, decode_public_key,
        derive_master_secret, encode_private_key, encode_public_key,
    };
    pub use crate::signature::{
        compute_signature, parse_signature_type, validate_signature_format, verify,
    };
    pub use crate::vault::{open_vault_key, seal_vault_key};
}
