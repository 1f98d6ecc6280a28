//! Audit journal for Forkly
//!
//! Records every successful write the client makes to the backend (account
//! creation, preference saves, list and visit changes) in an append-only
//! JSONL file. Secrets never reach the journal: passwords are not
//! serializable and sessions are never attached as details.
//!
//! - `AuditEntry`: one journaled write.
//! - `AuditLogger`: appends entries and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
