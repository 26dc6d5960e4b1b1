use std::sync::Arc;

use sqlx::PgPool;

use crate::modules::audit::AuditSink;

/// Shared application context, constructed once at startup and injected
/// into handlers via `web::Data`. No component reaches for globals.
pub struct AppState {
    /// Process-wide database connection pool
    pub pool: PgPool,

    /// Process-wide audit sink
    pub audit: Arc<AuditSink>,

    /// Acting identity recorded on every audit entry
    pub audit_user: String,
}

impl AppState {
    pub fn new(pool: PgPool, audit: Arc<AuditSink>, audit_user: String) -> Self {
        Self {
            pool,
            audit,
            audit_user,
        }
    }
}
