use actix_web::{web, HttpResponse};

use crate::core::{AppError, AppState};
use crate::modules::tariffs::models::EvaluateCostRequest;
use crate::modules::tariffs::repositories::TariffRepository;
use crate::modules::tariffs::services::CostEvaluator;

/// Evaluate insurance cost for a shipment
/// POST /api/public/evaluate_cost
///
/// Returns `rate * declared_price` for the tariff at
/// `(insurance_date, cargo_type)`, or 404 when no such tariff exists.
pub async fn evaluate_cost(
    state: web::Data<AppState>,
    request: web::Json<EvaluateCostRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let mut tx = state.pool.begin().await?;
    let repo = TariffRepository::new(state.audit_user.clone());
    let tariff = repo
        .fetch_tariff(&mut tx, request.insurance_date, &request.cargo_type)
        .await?;
    tx.commit().await?;

    let Some(tariff) = tariff else {
        return Err(AppError::not_found(format!(
            "Tariff for '{}' on {} is not found",
            request.cargo_type, request.insurance_date
        )));
    };

    let cost = CostEvaluator::new().evaluate(&tariff, request.declared_price);

    Ok(HttpResponse::Ok().json(cost))
}

/// Configure public cost evaluation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/public").route("/evaluate_cost", web::post().to(evaluate_cost)),
    );
}
