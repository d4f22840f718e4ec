use actix_web::{web, HttpResponse};
use serde_json::json;

use sg_shared::ApiResponse;

use crate::app::AppState;
use crate::handlers::{ApiError, IntoApiResult};
use crate::middleware::RequestId;

/// Handler for GET /admin/organizations
///
/// Active accounts other than administrators, with a display name derived
/// from the username.
pub async fn list_organizations(
    request_id: RequestId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let organizations = state
        .admin
        .list_organizations()
        .await
        .api_err(&request_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        json!({ "organizations": organizations }),
        request_id.to_string(),
    )))
}
