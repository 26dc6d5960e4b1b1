pub mod audit_entry;

pub use audit_entry::{compact_json, AuditEntry, AuditOperation};
