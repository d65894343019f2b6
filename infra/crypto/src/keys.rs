use crate::error::{CryptoError, CryptoErrorExt};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use p256::ecdh::diffie_hellman;
use p256::{PublicKey, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of every symmetric key in the profile.
pub const KEY_LEN: usize = 16;

const SCALAR_LEN: usize = 32;

/// A 128-bit symmetric key: the master secret or one of the keys derived from it.
///
/// Wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

/// Key produced by the ECDH agreement between the server and device key pairs.
pub type MasterSecret = DerivedKey;

/// One factor key taking part in a signature.
pub type SigningKey = DerivedKey;

impl DerivedKey {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// Decodes a base64 big-endian P-256 scalar.
///
/// Encoders of signed big integers may prepend a zero byte; a 33-byte value with a leading
/// zero is accepted and the zero dropped.
///
/// # Errors
/// * [`CryptoError::Decoding`] for invalid base64.
/// * [`CryptoError::KeyMaterial`] if the bytes are not a valid non-zero scalar.
pub fn decode_private_key(encoded: &str) -> Result<SecretKey, CryptoError> {
    let bytes = Zeroizing::new(STANDARD.decode(encoded).context("server private key")?);
    let scalar = match bytes.split_first() {
        Some((&0, rest)) if bytes.len() == SCALAR_LEN + 1 => rest,
        _ => bytes.as_slice(),
    };

    SecretKey::from_slice(scalar).map_err(|_| CryptoError::KeyMaterial {
        message: "not a valid P-256 scalar".into(),
        context: Some("server private key".into()),
    })
}

/// Decodes a base64 SEC1 encoded P-256 point, compressed or uncompressed.
///
/// # Errors
/// * [`CryptoError::Decoding`] for invalid base64.
/// * [`CryptoError::KeyMaterial`] if the bytes are not a point on the curve.
pub fn decode_public_key(encoded: &str) -> Result<PublicKey, CryptoError> {
    let bytes = STANDARD.decode(encoded).context("device public key")?;

    PublicKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::KeyMaterial {
        message: "not a valid SEC1 P-256 point".into(),
        context: Some("device public key".into()),
    })
}

/// Encodes a private key the way [`decode_private_key`] expects it.
#[must_use]
pub fn encode_private_key(key: &SecretKey) -> String {
    STANDARD.encode(key.to_bytes())
}

/// Encodes a public key as a base64 compressed SEC1 point.
#[must_use]
pub fn encode_public_key(key: &PublicKey) -> String {
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    STANDARD.encode(key.to_encoded_point(true).as_bytes())
}

/// Agrees on the master secret of an activation.
///
/// The 32-byte ECDH x-coordinate is folded to [`KEY_LEN`] bytes by XOR-ing its halves.
/// Both sides obtain the same value: the server from its private key and the device public
/// key, the device from its private key and the server public key.
///
/// # Errors
/// Returns [`CryptoError::Decoding`] or [`CryptoError::KeyMaterial`] if either key fails
/// to decode.
pub fn derive_master_secret(
    private_key: &str,
    public_key: &str,
) -> Result<MasterSecret, CryptoError> {
    let secret = decode_private_key(private_key)?;
    let public = decode_public_key(public_key)?;
    Ok(agree(&secret, &public))
}

/// [`derive_master_secret`] over already decoded keys.
#[must_use]
pub fn agree(secret: &SecretKey, public: &PublicKey) -> MasterSecret {
    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    let raw = shared.raw_secret_bytes();
    let (high, low) = raw.split_at(KEY_LEN);

    let mut folded = [0u8; KEY_LEN];
    for (out, (a, b)) in folded.iter_mut().zip(high.iter().zip(low)) {
        *out = a ^ b;
    }
    DerivedKey(folded)
}
