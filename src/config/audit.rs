use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Audit log transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Base URL of the external audit log collector
    pub base_url: String,

    /// Optional bearer token for the collector
    pub api_key: Option<String>,

    /// Topic audit batches are delivered to
    pub topic: String,

    /// Partition within the topic
    pub partition: i32,

    /// Acting identity recorded on every entry
    pub user: String,

    /// Batch capacity in serialized bytes before a transparent flush
    pub batch_max_bytes: usize,
}

impl AuditConfig {
    pub fn from_env() -> Result<Self> {
        Ok(AuditConfig {
            base_url: env::var("AUDIT_LOG_URL")
                .map_err(|_| AppError::Configuration("AUDIT_LOG_URL not set".to_string()))?,
            api_key: env::var("AUDIT_LOG_API_KEY").ok().filter(|key| !key.is_empty()),
            topic: env::var("AUDIT_LOG_TOPIC")
                .unwrap_or_else(|_| "tariff-audit".to_string()),
            partition: env::var("AUDIT_LOG_PARTITION")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid AUDIT_LOG_PARTITION".to_string())
                })?,
            user: env::var("AUDIT_USER")
                .map_err(|_| AppError::Configuration("AUDIT_USER not set".to_string()))?,
            batch_max_bytes: env::var("AUDIT_BATCH_MAX_BYTES")
                .unwrap_or_else(|_| "16384".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid AUDIT_BATCH_MAX_BYTES".to_string())
                })?,
        })
    }
}
