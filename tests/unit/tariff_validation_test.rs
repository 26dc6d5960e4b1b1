// Property-based tests for request validation.
//
// The repository relies on these invariants holding on input:
// - cargo types are non-empty and at most 50 characters
// - rates and declared prices are strictly positive and finite
// - a load payload holds at most one entry per cargo type per date

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;

use cargotariff::tariffs::models::{
    validate_rate, CargoType, LoadTariffsRequest, TariffEntry,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn load_request(date_: NaiveDate, entries: Vec<TariffEntry>) -> LoadTariffsRequest {
    LoadTariffsRequest(BTreeMap::from([(date_, entries)]))
}

proptest! {
    #[test]
    fn cargo_type_accepts_names_up_to_50_chars(name in "[a-z]{1,50}") {
        let cargo_type = CargoType::new(name.clone()).unwrap();
        prop_assert_eq!(cargo_type.as_str(), name.as_str());
    }

    #[test]
    fn cargo_type_rejects_names_over_50_chars(name in "[a-z]{51,80}") {
        prop_assert!(CargoType::new(name).is_err());
    }

    #[test]
    fn positive_finite_rates_are_accepted(rate in 1e-6f64..1e9f64) {
        prop_assert!(validate_rate(rate, "rate").is_ok());
    }

    #[test]
    fn non_positive_rates_are_rejected(rate in -1e9f64..=0.0f64) {
        prop_assert!(validate_rate(rate, "rate").is_err());
    }

    #[test]
    fn distinct_cargo_types_validate(names in prop::collection::hash_set("[a-z]{1,20}", 1..10)) {
        let entries = names
            .into_iter()
            .map(|name| TariffEntry {
                cargo_type: CargoType::new(name).unwrap(),
                rate: 1.5,
            })
            .collect();

        prop_assert!(load_request(date("2024-01-01"), entries).validate().is_ok());
    }

    #[test]
    fn any_repeated_cargo_type_is_rejected(
        names in prop::collection::hash_set("[a-z]{1,20}", 1..10),
        duplicated_index in any::<prop::sample::Index>(),
    ) {
        let mut entries: Vec<TariffEntry> = names
            .into_iter()
            .map(|name| TariffEntry {
                cargo_type: CargoType::new(name).unwrap(),
                rate: 1.5,
            })
            .collect();

        let duplicate = entries[duplicated_index.index(entries.len())].clone();
        entries.push(duplicate);

        let err = load_request(date("2024-01-01"), entries)
            .validate()
            .unwrap_err();
        prop_assert!(err.to_string().contains("share the same cargo type"));
    }
}

#[test]
fn non_finite_rates_are_rejected() {
    assert!(validate_rate(f64::NAN, "rate").is_err());
    assert!(validate_rate(f64::INFINITY, "rate").is_err());
    assert!(validate_rate(f64::NEG_INFINITY, "rate").is_err());
}

#[test]
fn empty_payload_is_rejected() {
    let request = LoadTariffsRequest(BTreeMap::new());
    assert!(request.validate().is_err());
}
