// Tariffs module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CargoType, Tariff};
pub use repositories::TariffRepository;
pub use services::CostEvaluator;
