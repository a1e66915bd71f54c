use actix_web::{HttpResponse, get, web};
use upwatch_service::MonitorService;
use upwatch_service::config::HistoryConfig;

use crate::error::ApiError;

macros_utils::routes! {
    route history_route,
}

/// Most recent recorded samples, newest first
#[get("/history")]
pub async fn history_route(
    service: web::Data<MonitorService>,
    history: web::Data<HistoryConfig>,
) -> Result<HttpResponse, ApiError> {
    let records = service.recent_history(history.limit).await?;
    Ok(HttpResponse::Ok().json(records))
}
