//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading and the concurrency primitives the
//! feature slices build on.
//!
//! ## Config loading
//! ```rust,ignore
//! use csign_kernel::config::load_service_config;
//!
//! let cfg = load_service_config(Some("config/countersign.toml"))?;
//! assert!(cfg.signature.lookahead > 0);
//! ```
//!
//! ## Per-key serialization
//! ```rust
//! # use csign_kernel::sync::KeyedLocks;
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let locks = KeyedLocks::default();
//! let _guard = locks.lock("activation-1").await;
//! // every other `lock("activation-1")` waits until `_guard` is dropped
//! # }
//! ```

pub mod config;
pub mod sync;

pub use csign_domain as domain;
