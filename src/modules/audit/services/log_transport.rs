use async_trait::async_trait;

use crate::core::{AppError, Result};

/// A bounded buffer of serialized records, delivered to the external log
/// as one unit. Records are framed as newline-delimited JSON.
#[derive(Debug)]
pub struct RecordBatch {
    payload: Vec<u8>,
    records: usize,
    max_bytes: usize,
}

impl RecordBatch {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            payload: Vec::new(),
            records: 0,
            max_bytes,
        }
    }

    /// Appends a record, returning the remaining capacity in bytes, or
    /// `None` when the batch is full and the record was not taken.
    ///
    /// An empty batch accepts any record, so an oversized entry occupies
    /// a batch of its own instead of being undeliverable.
    pub fn append(&mut self, record: &[u8]) -> Option<usize> {
        let cost = record.len() + 1;
        if self.records > 0 && self.payload.len() + cost > self.max_bytes {
            return None;
        }

        self.payload.extend_from_slice(record);
        self.payload.push(b'\n');
        self.records += 1;

        Some(self.max_bytes.saturating_sub(self.payload.len()))
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Transport delivering record batches to an external durable log
#[async_trait]
pub trait LogTransport: Send + Sync {
    /// Start an empty batch sized for this transport
    fn create_batch(&self) -> RecordBatch;

    /// Deliver a closed batch to the given topic partition
    async fn send_batch(&self, batch: RecordBatch, topic: &str, partition: i32) -> Result<()>;
}

/// Log transport posting NDJSON batches to an HTTP collector
pub struct HttpLogTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    batch_max_bytes: usize,
}

impl HttpLogTransport {
    pub fn new(base_url: String, api_key: Option<String>, batch_max_bytes: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            batch_max_bytes,
        }
    }
}

#[async_trait]
impl LogTransport for HttpLogTransport {
    fn create_batch(&self) -> RecordBatch {
        RecordBatch::new(self.batch_max_bytes)
    }

    async fn send_batch(&self, batch: RecordBatch, topic: &str, partition: i32) -> Result<()> {
        let url = format!(
            "{}/topics/{}/partitions/{}/records",
            self.base_url, topic, partition
        );

        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(batch.into_payload());

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LogDelivery(format!(
                "Audit collector error {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
