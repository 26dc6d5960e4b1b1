// Audit module

pub mod models;
pub mod services;

pub use models::{AuditEntry, AuditOperation};
pub use services::{AuditSink, HttpLogTransport, LogTransport, RecordBatch};
