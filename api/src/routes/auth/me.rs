use actix_web::HttpResponse;

use sg_shared::ApiResponse;

use crate::middleware::{Principal, RequestId};

/// Handler for GET /auth/me
pub async fn me(request_id: RequestId, principal: Principal) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(principal.0, request_id.to_string()))
}
