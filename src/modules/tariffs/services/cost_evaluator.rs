use crate::modules::tariffs::models::Tariff;

/// Computes insurance cost from a tariff and a declared price
pub struct CostEvaluator;

impl CostEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// cost = rate * declared_price
    pub fn evaluate(&self, tariff: &Tariff, declared_price: f64) -> f64 {
        tariff.rate * declared_price
    }
}

impl Default for CostEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
