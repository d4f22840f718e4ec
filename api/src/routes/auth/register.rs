use actix_web::{web, HttpResponse};

use sg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::RegisterRequest;
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::RequestId;

/// Handler for POST /auth/register
///
/// New accounts are `PENDING` with the `READ_ONLY` role until an
/// administrator activates them.
pub async fn register(
    request_id: RequestId,
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner(), &request_id)?;

    let account = state
        .auth
        .register(&request.username, &request.email, &request.password)
        .await
        .api_err(&request_id)?;

    log::info!("[{}] Registered account {}", request_id, account.username);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        account.to_public(),
        request_id.to_string(),
    )))
}
