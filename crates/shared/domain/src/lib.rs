//! # Domain Models
//!
//! Plain data shared by every Countersign crate: activation and application records,
//! signature types, verification reason codes and the service configuration.
//! Keep it lean: no I/O, cryptography or persistence here, just data and small helpers.

pub mod activation;
pub mod application;
pub mod config;
pub mod constants;
pub mod signature;

pub use activation::{Activation, ActivationStatus};
pub use application::ApplicationVersion;
pub use signature::{ReasonCode, SignatureType, VerificationOutcome};
