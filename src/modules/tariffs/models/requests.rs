use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

use super::tariff::{validate_rate, CargoType, Tariff};

/// Body of `POST /api/public/evaluate_cost`
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateCostRequest {
    pub insurance_date: NaiveDate,
    pub cargo_type: CargoType,
    pub declared_price: f64,
}

impl EvaluateCostRequest {
    pub fn validate(&self) -> Result<()> {
        validate_rate(self.declared_price, "declared_price")
    }
}

/// One tariff of the load payload, scoped to the date it is keyed under
#[derive(Debug, Clone, Deserialize)]
pub struct TariffEntry {
    pub cargo_type: CargoType,
    pub rate: f64,
}

/// Body of `POST /api/internal/tariffs/load`: a map of date to the tariffs
/// taking effect on that date.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LoadTariffsRequest(pub BTreeMap<NaiveDate, Vec<TariffEntry>>);

impl LoadTariffsRequest {
    /// Checks list-level invariants the repository relies on: a non-empty
    /// payload, non-empty per-date lists, strictly positive rates, and at
    /// most one entry per cargo type within a date's list.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(AppError::validation("Tariff payload cannot be empty"));
        }

        let mut errors = Vec::new();

        for (date, entries) in &self.0 {
            if entries.is_empty() {
                errors.push(format!("Tariff list for date {} cannot be empty", date));
                continue;
            }

            for (index, entry) in entries.iter().enumerate() {
                if let Err(err) = validate_rate(entry.rate, &format!("{}[{}].rate", date, index)) {
                    errors.push(err.to_string());
                }
            }

            let mut indexes_by_type: HashMap<&CargoType, Vec<usize>> = HashMap::new();
            for (index, entry) in entries.iter().enumerate() {
                indexes_by_type.entry(&entry.cargo_type).or_default().push(index);
            }

            let mut duplicates: Vec<_> = indexes_by_type
                .into_iter()
                .filter(|(_, indexes)| indexes.len() > 1)
                .collect();
            duplicates.sort_by_key(|(_, indexes)| indexes[0]);

            for (cargo_type, indexes) in duplicates {
                errors.push(format!(
                    "For date {} tariffs at indexes {} share the same cargo type '{}'",
                    date,
                    format_index_list(&indexes),
                    cargo_type
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors.join("; ")))
        }
    }

    /// Flattens the payload into tariffs, assuming `validate` has passed.
    pub fn into_tariffs(self) -> Vec<Tariff> {
        self.0
            .into_iter()
            .flat_map(|(date, entries)| {
                entries.into_iter().map(move |entry| Tariff {
                    cargo_type: entry.cargo_type,
                    rate: entry.rate,
                    date,
                })
            })
            .collect()
    }
}

fn format_index_list(indexes: &[usize]) -> String {
    match indexes {
        [] => String::new(),
        [only] => only.to_string(),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} and {}", head, last)
        }
    }
}

/// Body of `POST /api/internal/tariffs/update`
#[derive(Debug, Clone, Deserialize)]
pub struct EditTariffRequest {
    pub tariff_date: NaiveDate,
    pub cargo_type: CargoType,
    pub new_rate: f64,
}

impl EditTariffRequest {
    pub fn validate(&self) -> Result<()> {
        validate_rate(self.new_rate, "new_rate")
    }

    pub fn into_tariff(self) -> Tariff {
        Tariff {
            cargo_type: self.cargo_type,
            rate: self.new_rate,
            date: self.tariff_date,
        }
    }
}

/// Body of `POST /api/internal/tariffs/delete`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteTariffRequest {
    pub tariff_date: NaiveDate,
    pub cargo_type: CargoType,
}

/// Plain detail response for operations with nothing else to return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleResponse {
    pub detail: String,
}

impl SimpleResponse {
    pub fn success() -> Self {
        Self {
            detail: "Success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_request(json: &str) -> LoadTariffsRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_load_request_valid() {
        let request = load_request(
            r#"{"2024-01-01": [{"cargo_type": "electronics", "rate": 1.5},
                              {"cargo_type": "glass", "rate": 2.0}]}"#,
        );
        assert!(request.validate().is_ok());

        let tariffs = request.into_tariffs();
        assert_eq!(tariffs.len(), 2);
        assert_eq!(tariffs[0].cargo_type.as_str(), "electronics");
        assert_eq!(tariffs[0].rate, 1.5);
    }

    #[test]
    fn test_load_request_rejects_empty_payload() {
        let request = load_request("{}");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_load_request_rejects_empty_date_list() {
        let request = load_request(r#"{"2024-01-01": []}"#);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("2024-01-01"));
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_load_request_rejects_duplicate_cargo_types() {
        let request = load_request(
            r#"{"2024-01-01": [{"cargo_type": "electronics", "rate": 1.5},
                              {"cargo_type": "glass", "rate": 2.0},
                              {"cargo_type": "electronics", "rate": 3.0}]}"#,
        );
        let err = request.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("at indexes 0 and 2 share the same cargo type 'electronics'"));
    }

    #[test]
    fn test_load_request_same_cargo_type_on_different_dates_ok() {
        let request = load_request(
            r#"{"2024-01-01": [{"cargo_type": "electronics", "rate": 1.5}],
                "2024-01-02": [{"cargo_type": "electronics", "rate": 2.0}]}"#,
        );
        assert!(request.validate().is_ok());
        assert_eq!(request.into_tariffs().len(), 2);
    }

    #[test]
    fn test_load_request_rejects_non_positive_rate() {
        let request = load_request(r#"{"2024-01-01": [{"cargo_type": "glass", "rate": 0.0}]}"#);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("2024-01-01[0].rate"));
    }

    #[test]
    fn test_load_request_collects_all_errors() {
        let request = load_request(
            r#"{"2024-01-01": [{"cargo_type": "glass", "rate": -1.0},
                              {"cargo_type": "glass", "rate": 2.0}]}"#,
        );
        let message = request.validate().unwrap_err().to_string();
        assert!(message.contains("2024-01-01[0].rate"));
        assert!(message.contains("share the same cargo type"));
    }

    #[test]
    fn test_format_index_list() {
        assert_eq!(format_index_list(&[0, 2]), "0 and 2");
        assert_eq!(format_index_list(&[0, 1, 4]), "0, 1 and 4");
    }

    #[test]
    fn test_evaluate_request_rejects_non_positive_price() {
        let request: EvaluateCostRequest = serde_json::from_str(
            r#"{"insurance_date": "2024-01-01", "cargo_type": "glass", "declared_price": -5.0}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_edit_request_into_tariff() {
        let request: EditTariffRequest = serde_json::from_str(
            r#"{"tariff_date": "2024-01-01", "cargo_type": "glass", "new_rate": 2.5}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let tariff = request.into_tariff();
        assert_eq!(tariff.rate, 2.5);
        assert_eq!(tariff.cargo_type.as_str(), "glass");
    }
}
