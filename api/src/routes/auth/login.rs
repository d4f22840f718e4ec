use actix_web::{web, HttpResponse};

use sg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::LoginRequest;
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::RequestId;

/// Handler for POST /auth/login
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "requestId": "...",
///     "data": {
///         "accessToken": "eyJ...",
///         "refreshToken": "eyJ...",
///         "expiresIn": 900,
///         "tokenType": "Bearer"
///     }
/// }
/// ```
///
/// ## Errors
/// - 401 `INVALID_CREDENTIALS`: unknown username or wrong password
/// - 403 `ACCOUNT_PENDING` / `ACCOUNT_DISABLED`: correct password, inactive account
pub async fn login(
    request_id: RequestId,
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner(), &request_id)?;

    let pair = state
        .auth
        .login(&request.username, &request.password)
        .await
        .api_err(&request_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(pair, request_id.to_string())))
}
