use std::sync::Arc;

use tokio::sync::Mutex;

use crate::modules::audit::models::AuditEntry;

use super::log_transport::{LogTransport, RecordBatch};

/// Process-wide sink buffering audit entries and delivering them to the
/// external log in batches.
///
/// Delivery is best-effort and decoupled from the tariff store: a failed
/// send is logged and swallowed, never surfaced as a request failure. The
/// audit trail may lose entries on a crash between commit and flush, but a
/// committed mutation is never rejected because of audit delivery problems.
pub struct AuditSink {
    transport: Arc<dyn LogTransport>,
    topic: String,
    partition: i32,
    batch: Mutex<RecordBatch>,
}

impl AuditSink {
    pub fn new(transport: Arc<dyn LogTransport>, topic: String, partition: i32) -> Self {
        let batch = Mutex::new(transport.create_batch());
        Self {
            transport,
            topic,
            partition,
            batch,
        }
    }

    /// Serializes the entry into the current batch. A full batch is sent
    /// and a fresh one started transparently; in the common case the
    /// caller only pays for an in-memory append.
    pub async fn log(&self, entry: &AuditEntry) {
        let record = match entry.to_bytes() {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("Failed to encode audit entry, dropping it: {err}");
                return;
            }
        };

        let mut batch = self.batch.lock().await;
        if batch.append(&record).is_none() {
            let full = std::mem::replace(&mut *batch, self.transport.create_batch());
            self.deliver(full).await;
            // A fresh batch always accepts its first record
            batch.append(&record);
        }
    }

    /// Closes the current batch and delivers it regardless of fullness.
    ///
    /// Called at the end of every request scope that produced entries, so
    /// nothing lingers in memory once the session is over.
    pub async fn flush(&self) {
        let mut batch = self.batch.lock().await;
        if batch.is_empty() {
            return;
        }

        let full = std::mem::replace(&mut *batch, self.transport.create_batch());
        self.deliver(full).await;
    }

    /// Hand over the entries of one committed request scope and flush.
    pub async fn submit(&self, entries: Vec<AuditEntry>) {
        if entries.is_empty() {
            return;
        }

        for entry in &entries {
            self.log(entry).await;
        }

        self.flush().await;
    }

    async fn deliver(&self, batch: RecordBatch) {
        if let Err(err) = self
            .transport
            .send_batch(batch, &self.topic, self.partition)
            .await
        {
            tracing::warn!("Audit log delivery failed, batch dropped: {err}");
        }
    }
}
