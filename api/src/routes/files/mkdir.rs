use actix_web::{web, HttpResponse};

use sg_core::services::MakeDirectory;
use sg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::files::{MkdirRequest, PathResponse};
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::{Principal, RequestId};

/// Handler for POST /files/mkdir
pub async fn mkdir(
    request_id: RequestId,
    principal: Principal,
    state: web::Data<AppState>,
    request: web::Json<MkdirRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner(), &request_id)?;
    let path = state
        .sandbox
        .resolve(Some(&request.path))
        .api_err(&request_id)?;

    state
        .broker
        .with_session(&mut MakeDirectory::new(path.clone()))
        .await
        .api_err(&request_id)?;

    log::info!("[{}] {} created {}", request_id, principal.username, path);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PathResponse { path },
        request_id.to_string(),
    )))
}
