pub mod cost_controller;
pub mod tariff_controller;

use actix_web::web;

/// Configure all tariff routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cost_controller::configure(cfg);
    tariff_controller::configure(cfg);
}
