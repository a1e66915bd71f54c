use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;
use upwatch_service::validation::validate_probe_target;
use upwatch_service::{MonitorService, Persistence};

use crate::error::ApiError;

macros_utils::routes! {
    route monitor_route,
}

#[derive(Debug, Deserialize)]
pub struct MonitorQuery {
    url: Option<String>,
}

/// Probe `?url=` once and record the sample
///
/// Transport failures are still a `200`, the sample carries the error. A
/// `503` means the probe ran but its result could not be stored.
#[get("/monitor")]
pub async fn monitor_route(
    service: web::Data<MonitorService>,
    query: web::Query<MonitorQuery>,
) -> Result<HttpResponse, ApiError> {
    let validation = validate_probe_target(query.url.as_deref());
    let Some(url) = query.url.as_deref().filter(|_| validation.is_valid) else {
        return Err(ApiError::BadRequest(validation.error.unwrap_or_default()));
    };

    let report = service.check(url).await;
    Ok(match &report.persistence {
        Persistence::Failed(e) => HttpResponse::ServiceUnavailable().json(json!({
            "sample": report.sample,
            "error": "store_failed",
            "detail": e.to_string(),
        })),
        Persistence::Stored(_) | Persistence::Skipped => HttpResponse::Ok().json(&report.sample),
    })
}
