pub mod audit_sink;
pub mod log_transport;

pub use audit_sink::AuditSink;
pub use log_transport::{HttpLogTransport, LogTransport, RecordBatch};
