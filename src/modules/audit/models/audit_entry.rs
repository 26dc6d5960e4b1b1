use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Result;

/// The mutation kinds recorded in the audit stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOperation {
    Upsert,
    Update,
    Delete,
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditOperation::Upsert => write!(f, "upsert"),
            AuditOperation::Update => write!(f, "update"),
            AuditOperation::Delete => write!(f, "delete"),
        }
    }
}

/// One logged mutation.
///
/// Append-only: ownership transfers to the audit sink on creation and no
/// read path exists within this service. Fields are declared in sorted
/// order so the compact encoding has a stable key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Human-readable description, typically the stringified tariff
    pub message: String,

    /// The mutation performed
    pub operation: AuditOperation,

    /// Acting identity, a configured service account
    pub user: String,
}

impl AuditEntry {
    pub fn new(user: impl Into<String>, operation: AuditOperation, message: String) -> Self {
        Self {
            message,
            operation,
            user: user.into(),
        }
    }

    /// Compact deterministic encoding for the log transport
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        compact_json(self)
    }
}

/// Encodes a value as compact JSON.
///
/// serde_json writes struct fields in declaration order with no padding
/// and refuses non-finite numbers, so the output is deterministic and
/// never carries an ambiguous NaN representation.
pub fn compact_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
