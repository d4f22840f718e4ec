use actix_web::{web, HttpResponse};
use serde_json::json;

use sg_shared::ApiResponse;

use crate::middleware::RequestId;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Handler for GET /health
pub async fn health_check(request_id: RequestId) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        json!({
            "status": "ok",
            "server": "SFTP Gateway",
            "version": env!("CARGO_PKG_VERSION"),
        }),
        request_id.to_string(),
    ))
}
