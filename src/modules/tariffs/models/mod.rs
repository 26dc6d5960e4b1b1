pub mod requests;
pub mod tariff;

pub use requests::{
    DeleteTariffRequest, EditTariffRequest, EvaluateCostRequest, LoadTariffsRequest,
    SimpleResponse, TariffEntry,
};
pub use tariff::{validate_rate, CargoType, Tariff};
