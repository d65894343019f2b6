use crate::error::CryptoError;
use crate::kdf::counter_block;
use crate::keys::SigningKey;
use csign_domain::SignatureType;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::str::FromStr;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Decimal digits per signature component.
pub const COMPONENT_DIGITS: usize = 8;

const COMPONENT_MODULUS: u32 = 100_000_000;
const COMPONENT_SEPARATOR: &str = "-";

/// Parses a case-insensitive signature type label.
///
/// # Errors
/// Returns [`CryptoError::UnknownSignatureType`] for labels outside the factor table.
pub fn parse_signature_type(label: &str) -> Result<SignatureType, CryptoError> {
    SignatureType::from_str(label)
        .map_err(|_| CryptoError::UnknownSignatureType { label: label.to_owned(), context: None })
}

/// Checks that `signature` is `factors` groups of [`COMPONENT_DIGITS`] ASCII digits joined by `-`.
///
/// # Errors
/// Returns [`CryptoError::InvalidSignatureFormat`] describing the first violation.
pub fn validate_signature_format(signature: &str, factors: usize) -> Result<(), CryptoError> {
    let invalid = |message: String| CryptoError::InvalidSignatureFormat {
        message: message.into(),
        context: None,
    };

    let groups = signature.split(COMPONENT_SEPARATOR).count();
    if groups != factors {
        return Err(invalid(format!("expected {factors} component(s), found {groups}")));
    }

    let well_formed = signature.split(COMPONENT_SEPARATOR).all(|group| {
        group.len() == COMPONENT_DIGITS && group.bytes().all(|b| b.is_ascii_digit())
    });
    if !well_formed {
        return Err(invalid(format!("components must be {COMPONENT_DIGITS} decimal digits")));
    }

    Ok(())
}

/// Computes the decimal signature of `payload` at `counter` with the given factor keys.
///
/// Key `i` contributes one component. Its derived key starts as `HMAC(K_i, ctr)` and is
/// chained through `HMAC(K_{j+1}, ctr)` for every `j < i`, so later components depend on
/// the keys of the following factors as well.
///
/// # Errors
/// Returns [`CryptoError::Internal`] if the MAC cannot be keyed.
pub fn compute_signature(
    payload: &[u8],
    keys: &[SigningKey],
    counter: u64,
) -> Result<String, CryptoError> {
    let ctr = counter_block(counter);
    let mut components = Vec::with_capacity(keys.len());

    for (i, key) in keys.iter().enumerate() {
        let mut derived = hmac(key.as_bytes(), &ctr)?;
        for inner in &keys[1..=i] {
            let inner = hmac(inner.as_bytes(), &ctr)?;
            derived = hmac(&derived, &inner)?;
        }

        let long = hmac(&derived, payload)?;
        let tail = [long[28], long[29], long[30], long[31]];
        let number = (u32::from_be_bytes(tail) & 0x7fff_ffff) % COMPONENT_MODULUS;
        components.push(format!("{number:0width$}", width = COMPONENT_DIGITS));
    }

    Ok(components.join(COMPONENT_SEPARATOR))
}

/// Checks `candidate` against the signature expected at `counter`, in constant time.
///
/// # Errors
/// See [`compute_signature`].
pub fn verify(
    payload: &[u8],
    candidate: &str,
    keys: &[SigningKey],
    counter: u64,
) -> Result<bool, CryptoError> {
    let expected = compute_signature(payload, keys, counter)?;
    Ok(expected.as_bytes().ct_eq(candidate.as_bytes()).into())
}

fn hmac(key: &[u8], data: &[u8]) -> Result<[u8; 32], CryptoError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).map_err(|e| CryptoError::Internal {
        message: e.to_string().into(),
        context: Some("HMAC-SHA256 key".into()),
    })?;
    mac.update(data);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
