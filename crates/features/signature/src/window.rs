use crate::error::SignatureError;
use csign_crypto::prelude::{SigningKey, verify};
use csign_crypto::CryptoError;
use csign_domain::constants::MAX_LOOKAHEAD;
use csign_domain::{ReasonCode, VerificationOutcome};

/// Bounded range of counters probed ahead of an activation's stored counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayWindow {
    lookahead: u32,
}

impl ReplayWindow {
    /// # Errors
    /// Returns [`SignatureError::InvalidConfiguration`] unless `1 <= lookahead <= MAX_LOOKAHEAD`.
    pub fn new(lookahead: u32) -> Result<Self, SignatureError> {
        if lookahead == 0 || lookahead > MAX_LOOKAHEAD {
            return Err(SignatureError::InvalidConfiguration {
                message: format!("lookahead must be within 1..={MAX_LOOKAHEAD}, got {lookahead}")
                    .into(),
                context: None,
            });
        }
        Ok(Self { lookahead })
    }

    #[must_use]
    pub const fn lookahead(self) -> u32 {
        self.lookahead
    }

    /// Probes `start, start + 1, ...` in ascending order and returns the first counter
    /// accepted by `probe`. Counters below `start` are never probed, and neither is
    /// `u64::MAX`: a winning counter must leave room for the stored counter to move past it.
    ///
    /// # Errors
    /// Propagates the first error returned by `probe`.
    pub fn find<E>(
        self,
        start: u64,
        mut probe: impl FnMut(u64) -> Result<bool, E>,
    ) -> Result<Option<u64>, E> {
        for offset in 0..u64::from(self.lookahead) {
            let Some(counter) = start.checked_add(offset).filter(|c| *c < u64::MAX) else { break };
            if probe(counter)? {
                return Ok(Some(counter));
            }
        }
        Ok(None)
    }

    /// Checks `signature` over `payload` against every counter of the window.
    ///
    /// # Errors
    /// See [`verify`].
    pub fn verify(
        self,
        payload: &[u8],
        signature: &str,
        keys: &[SigningKey],
        start: u64,
    ) -> Result<VerificationOutcome, CryptoError> {
        let found = self.find(start, |counter| verify(payload, signature, keys, counter))?;
        Ok(found.map_or(
            VerificationOutcome::rejected(ReasonCode::SignatureDoesNotMatch),
            VerificationOutcome::accepted,
        ))
    }
}

impl Default for ReplayWindow {
    fn default() -> Self {
        Self { lookahead: csign_domain::constants::DEFAULT_LOOKAHEAD }
    }
}
