//! Concurrency primitives shared by the feature slices.

mod keyed;

pub use keyed::{KeyedGuard, KeyedLocks};
