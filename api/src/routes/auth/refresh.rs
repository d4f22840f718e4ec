use actix_web::{web, HttpResponse};

use sg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::RefreshRequest;
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::RequestId;

/// Handler for POST /auth/refresh
///
/// Exchanges a refresh token for a new access token. The refresh token
/// itself stays valid until it expires.
///
/// ## Errors
/// - 401 `INVALID_REFRESH_TOKEN`: expired, malformed or access-typed token,
///   or the account no longer exists
/// - 403 `ACCOUNT_PENDING` / `ACCOUNT_DISABLED`
pub async fn refresh(
    request_id: RequestId,
    state: web::Data<AppState>,
    request: web::Json<RefreshRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner(), &request_id)?;

    let grant = state
        .auth
        .refresh(&request.refresh_token)
        .await
        .api_err(&request_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(grant, request_id.to_string())))
}
