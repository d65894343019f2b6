//! Protocol-wide constants.

/// User identifier reported whenever the activation is missing or not usable.
pub const UNKNOWN_USER_ID: &str = "unknown";

/// Separator between the client data and the application secret (or key) in the signed payload.
pub const PAYLOAD_SEPARATOR: u8 = b'&';

/// Default number of counter values probed ahead of the stored counter.
pub const DEFAULT_LOOKAHEAD: u32 = 20;

/// Hard ceiling for the lookahead window.
pub const MAX_LOOKAHEAD: u32 = 1_000;

/// Default number of read-verify-write cycles attempted when a concurrent save wins the race.
pub const DEFAULT_SAVE_ATTEMPTS: u32 = 3;
