use actix_web::{
    error::{InternalError, JsonPayloadError},
    HttpRequest, HttpResponse,
};

/// Error handler for `web::JsonConfig`.
///
/// Body deserialization covers most request validation (dates, positive
/// numbers, cargo type constraints), so failures here are logged in detail
/// before the generic 400 envelope goes out.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let detail = match &err {
        JsonPayloadError::Deserialize(e) => format!("In the request body: {}", e),
        other => other.to_string(),
    };

    tracing::error!(
        path = %req.path(),
        "Validation error in the recent request: {detail}"
    );

    InternalError::from_response(err, error_response(400, detail)).into()
}

/// Helper function to create standardized error responses
pub fn error_response(status_code: u16, message: String) -> HttpResponse {
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status_code).unwrap())
        .json(serde_json::json!({
            "error": {
                "code": status_code,
                "message": message,
            }
        }))
}
