//! Audit trail for fintrack
//!
//! Every create and update performed through the services is appended to
//! `audit.log` as one JSON object per line. Entries carry the entity state
//! after the change and, for updates, the state before it plus a short
//! summary of the fields that changed.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
