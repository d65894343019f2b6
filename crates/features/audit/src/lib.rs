//! Signature audit slice.
//!
//! Every verification attempt that reaches a known activation leaves exactly one
//! [`SignatureAuditRecord`]. Records go to an [`AuditSink`]; [`MemoryAuditLog`] is the
//! process-local implementation and supports listing a user's trail with [`AuditQuery`].

mod error;
mod memory;
mod record;
mod sink;

pub use crate::error::{AuditError, AuditErrorExt};
pub use crate::memory::MemoryAuditLog;
pub use crate::record::{AuditQuery, SignatureAuditRecord};
pub use crate::sink::AuditSink;
