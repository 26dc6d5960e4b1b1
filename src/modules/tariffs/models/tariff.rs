use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// A known shipment category. Non-empty, at most 50 characters
/// (the column width of `tariffs.cargo_type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CargoType(String);

impl CargoType {
    pub const MAX_LENGTH: usize = 50;

    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(AppError::validation("Cargo type cannot be empty"));
        }

        if name.chars().count() > Self::MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Cargo type cannot exceed {} characters",
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CargoType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CargoType> for String {
    fn from(cargo_type: CargoType) -> Self {
        cargo_type.0
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The price multiplier applicable to one cargo type on one calendar date.
///
/// At most one tariff exists per `(date, cargo_type)` pair; the pair is the
/// primary key of the `tariffs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub cargo_type: CargoType,
    pub rate: f64,
    pub date: NaiveDate,
}

impl Tariff {
    pub fn new(date: NaiveDate, cargo_type: CargoType, rate: f64) -> Result<Self> {
        validate_rate(rate, "rate")?;

        Ok(Self {
            cargo_type,
            rate,
            date,
        })
    }
}

impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tariff(date={}, cargo_type={}, rate={})",
            self.date, self.cargo_type, self.rate
        )
    }
}

/// Rates and declared prices must be strictly positive and finite.
pub fn validate_rate(value: f64, field: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "Field '{}' must be a finite number",
            field
        )));
    }

    if value <= 0.0 {
        return Err(AppError::validation(format!(
            "Field '{}' must be strictly positive, got {}",
            field, value
        )));
    }

    Ok(())
}
