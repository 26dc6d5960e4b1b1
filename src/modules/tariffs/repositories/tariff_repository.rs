// Repository for tariff database operations.
//
// Every method runs inside a transaction scope supplied by the caller; the
// repository never begins or commits transactions itself. Successful
// mutations accumulate audit entries which the caller hands to the audit
// sink once the transaction has committed, so a rolled-back scope never
// reaches the audit stream.

use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder, Transaction};

use crate::core::{AppError, Result};
use crate::modules::audit::models::{AuditEntry, AuditOperation};
use crate::modules::tariffs::models::{CargoType, Tariff};

/// The sole authority for reading and mutating tariff rows
pub struct TariffRepository {
    user: String,
    entries: Vec<AuditEntry>,
}

impl TariffRepository {
    /// Create a repository acting as `user` for one request scope
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            entries: Vec::new(),
        }
    }

    /// Point lookup by the `(date, cargo_type)` primary key.
    ///
    /// Absence is a normal outcome, not a fault.
    pub async fn fetch_tariff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: NaiveDate,
        cargo_type: &CargoType,
    ) -> Result<Option<Tariff>> {
        let row: Option<TariffRow> = sqlx::query_as(
            "SELECT date, cargo_type, rate FROM tariffs WHERE date = $1 AND cargo_type = $2",
        )
        .bind(date)
        .bind(cargo_type.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        row.map(TariffRow::into_tariff).transpose()
    }

    /// Insert the given tariffs, updating the rate of any that already
    /// exist with a different one. Returns exactly the rows that were
    /// inserted or whose rate changed; rows already holding the incoming
    /// rate are left untouched and not reported.
    ///
    /// One atomic statement: concurrent upserts against the same key
    /// serialize through the store's conflict resolution, not through
    /// application-level read-modify-write.
    ///
    /// The input must be non-empty and hold at most one entry per
    /// `(date, cargo_type)` pair; the request validator enforces this.
    pub async fn upsert_tariffs(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        tariffs: &[Tariff],
    ) -> Result<Vec<Tariff>> {
        if tariffs.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO tariffs (date, cargo_type, rate) ");
        query.push_values(tariffs, |mut row, tariff| {
            row.push_bind(tariff.date)
                .push_bind(tariff.cargo_type.as_str())
                .push_bind(tariff.rate);
        });
        query.push(
            " ON CONFLICT ON CONSTRAINT unique_date_cargo_type \
             DO UPDATE SET rate = EXCLUDED.rate \
             WHERE tariffs.rate <> EXCLUDED.rate \
             RETURNING date, cargo_type, rate",
        );

        let rows: Vec<TariffRow> = query.build_query_as().fetch_all(&mut **tx).await?;

        let affected = rows
            .into_iter()
            .map(TariffRow::into_tariff)
            .collect::<Result<Vec<_>>>()?;

        for tariff in &affected {
            tracing::info!("Upserted tariff {tariff}");
            self.record(AuditOperation::Upsert, tariff);
        }

        Ok(affected)
    }

    /// Update the rate at the tariff's `(date, cargo_type)` key.
    ///
    /// Returns `None` both when no row exists there and when the row
    /// already holds the requested rate; the two cases are intentionally
    /// indistinguishable to the caller. Callers that care must pre-fetch.
    pub async fn update_tariff(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        tariff: &Tariff,
    ) -> Result<Option<Tariff>> {
        let row: Option<TariffRow> = sqlx::query_as(
            "UPDATE tariffs SET rate = $3 \
             WHERE date = $1 AND cargo_type = $2 AND rate <> $3 \
             RETURNING date, cargo_type, rate",
        )
        .bind(tariff.date)
        .bind(tariff.cargo_type.as_str())
        .bind(tariff.rate)
        .fetch_optional(&mut **tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let updated = row.into_tariff()?;
        tracing::info!("Updated tariff {updated}");
        self.record(AuditOperation::Update, &updated);

        Ok(Some(updated))
    }

    /// Delete the tariff at `(date, cargo_type)`, returning its prior
    /// value, or `None` when absent.
    pub async fn delete_tariff(
        &mut self,
        tx: &mut Transaction<'_, Postgres>,
        date: NaiveDate,
        cargo_type: &CargoType,
    ) -> Result<Option<Tariff>> {
        let row: Option<TariffRow> = sqlx::query_as(
            "DELETE FROM tariffs WHERE date = $1 AND cargo_type = $2 \
             RETURNING date, cargo_type, rate",
        )
        .bind(date)
        .bind(cargo_type.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let deleted = row.into_tariff()?;
        tracing::info!("Deleted tariff {deleted}");
        self.record(AuditOperation::Delete, &deleted);

        Ok(Some(deleted))
    }

    /// Surrender the audit entries accumulated in this scope.
    ///
    /// Call after the transaction has committed; dropping the repository
    /// instead discards the entries along with the rolled-back mutations.
    pub fn into_audit_entries(self) -> Vec<AuditEntry> {
        self.entries
    }

    fn record(&mut self, operation: AuditOperation, tariff: &Tariff) {
        self.entries
            .push(AuditEntry::new(&self.user, operation, tariff.to_string()));
    }
}

// Helper struct for database mapping

#[derive(Debug, sqlx::FromRow)]
struct TariffRow {
    date: NaiveDate,
    cargo_type: String,
    rate: f64,
}

impl TariffRow {
    fn into_tariff(self) -> Result<Tariff> {
        let cargo_type = CargoType::new(self.cargo_type)
            .map_err(|e| AppError::internal(format!("Invalid cargo type in database: {}", e)))?;

        Ok(Tariff {
            cargo_type,
            rate: self.rate,
            date: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests with an actual database live in tests/integration/.
    // These cover the row conversion and audit bookkeeping.

    #[test]
    fn test_row_conversion() {
        let row = TariffRow {
            date: "2024-01-01".parse().unwrap(),
            cargo_type: "electronics".to_string(),
            rate: 1.5,
        };

        let tariff = row.into_tariff().unwrap();
        assert_eq!(tariff.cargo_type.as_str(), "electronics");
        assert_eq!(tariff.rate, 1.5);
    }

    #[test]
    fn test_row_conversion_rejects_corrupt_cargo_type() {
        let row = TariffRow {
            date: "2024-01-01".parse().unwrap(),
            cargo_type: String::new(),
            rate: 1.5,
        };

        assert!(row.into_tariff().is_err());
    }

    #[test]
    fn test_fresh_repository_has_no_audit_entries() {
        let repo = TariffRepository::new("tariff-service");
        assert!(repo.into_audit_entries().is_empty());
    }
}
