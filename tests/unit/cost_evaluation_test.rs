// Property-based tests for insurance cost evaluation:
// cost = rate * declared_price

use chrono::NaiveDate;
use proptest::prelude::*;

use cargotariff::tariffs::models::{CargoType, Tariff};
use cargotariff::tariffs::CostEvaluator;

fn tariff(rate: f64) -> Tariff {
    Tariff {
        cargo_type: CargoType::new("electronics").unwrap(),
        rate,
        date: "2024-01-01".parse::<NaiveDate>().unwrap(),
    }
}

proptest! {
    #[test]
    fn cost_is_rate_times_price(
        rate in 1e-3f64..1e3f64,
        declared_price in 1e-3f64..1e6f64,
    ) {
        let evaluator = CostEvaluator::new();
        let cost = evaluator.evaluate(&tariff(rate), declared_price);
        prop_assert_eq!(cost, rate * declared_price);
    }

    #[test]
    fn cost_is_deterministic(
        rate in 1e-3f64..1e3f64,
        declared_price in 1e-3f64..1e6f64,
    ) {
        let evaluator = CostEvaluator::new();
        let t = tariff(rate);
        prop_assert_eq!(
            evaluator.evaluate(&t, declared_price),
            evaluator.evaluate(&t, declared_price)
        );
    }

    #[test]
    fn cost_is_positive_for_valid_inputs(
        rate in 1e-3f64..1e3f64,
        declared_price in 1e-3f64..1e6f64,
    ) {
        let cost = CostEvaluator::new().evaluate(&tariff(rate), declared_price);
        prop_assert!(cost > 0.0);
    }

    #[test]
    fn unit_rate_returns_declared_price(declared_price in 1e-3f64..1e6f64) {
        let cost = CostEvaluator::new().evaluate(&tariff(1.0), declared_price);
        prop_assert_eq!(cost, declared_price);
    }
}

#[test]
fn concrete_scenario() {
    let evaluator = CostEvaluator::new();

    // rate 1.5, declared price 200 -> 300.0
    assert_eq!(evaluator.evaluate(&tariff(1.5), 200.0), 300.0);

    // after an edit to rate 2.0 -> 400.0
    assert_eq!(evaluator.evaluate(&tariff(2.0), 200.0), 400.0);
}
