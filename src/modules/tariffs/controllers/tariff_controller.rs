use actix_web::{web, HttpResponse};

use crate::core::{AppError, AppState};
use crate::modules::tariffs::models::{
    DeleteTariffRequest, EditTariffRequest, LoadTariffsRequest, SimpleResponse,
};
use crate::modules::tariffs::repositories::TariffRepository;

/// Load tariffs
/// POST /api/internal/tariffs/load
///
/// Inserts the submitted tariffs, updating the rate of any that already
/// exist with a different one. Responds with the list of tariffs actually
/// added or updated.
pub async fn load_tariffs(
    state: web::Data<AppState>,
    request: web::Json<LoadTariffsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;
    let tariffs = request.into_tariffs();

    let mut tx = state.pool.begin().await?;
    let mut repo = TariffRepository::new(state.audit_user.clone());
    let affected = repo.upsert_tariffs(&mut tx, &tariffs).await?;
    tx.commit().await?;

    state.audit.submit(repo.into_audit_entries()).await;

    Ok(HttpResponse::Ok().json(affected))
}

/// Edit a tariff's rate
/// POST /api/internal/tariffs/update
///
/// Responds 304 when the tariff is absent or already holds the requested
/// rate; the two cases are signaled identically.
pub async fn edit_tariff(
    state: web::Data<AppState>,
    request: web::Json<EditTariffRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;
    let tariff = request.into_tariff();

    let mut tx = state.pool.begin().await?;
    let mut repo = TariffRepository::new(state.audit_user.clone());
    let updated = repo.update_tariff(&mut tx, &tariff).await?;

    if updated.is_none() {
        // Nothing written; dropping the transaction rolls it back
        return Err(AppError::NotModified);
    }

    tx.commit().await?;

    state.audit.submit(repo.into_audit_entries()).await;

    Ok(HttpResponse::Ok().json(SimpleResponse::success()))
}

/// Delete a tariff
/// POST /api/internal/tariffs/delete
///
/// Responds with the deleted tariff, or 404 when absent.
pub async fn delete_tariff(
    state: web::Data<AppState>,
    request: web::Json<DeleteTariffRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();

    let mut tx = state.pool.begin().await?;
    let mut repo = TariffRepository::new(state.audit_user.clone());
    let deleted = repo
        .delete_tariff(&mut tx, request.tariff_date, &request.cargo_type)
        .await?;

    let Some(deleted) = deleted else {
        return Err(AppError::not_found(format!(
            "Tariff for '{}' on {} is not found",
            request.cargo_type, request.tariff_date
        )));
    };

    tx.commit().await?;

    state.audit.submit(repo.into_audit_entries()).await;

    Ok(HttpResponse::Ok().json(deleted))
}

/// Configure internal tariff management routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/internal/tariffs")
            .route("/load", web::post().to(load_tariffs))
            .route("/update", web::post().to(edit_tariff))
            .route("/delete", web::post().to(delete_tariff)),
    );
}
