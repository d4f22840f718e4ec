use actix_web::{http::header::CONTENT_LENGTH, web, HttpRequest, HttpResponse};

use sg_core::errors::RemoteError;
use sg_core::services::UploadFile;
use sg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::files::UploadQuery;
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::{Principal, RequestId};

/// Handler for POST /files/upload?path=<dir>&filename=<name>
///
/// The request body is the raw file content, streamed to the remote store
/// without buffering. Bodies over the configured limit are rejected with
/// 413 and any partial file is removed.
pub async fn upload(
    req: HttpRequest,
    request_id: RequestId,
    principal: Principal,
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let query = validated(query.into_inner(), &request_id)?;
    let limit = state.max_upload_bytes;

    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(RemoteError::PayloadTooLarge { limit }).api_err(&request_id);
    }

    let path = state
        .sandbox
        .join_file(query.path.as_deref(), &query.filename)
        .api_err(&request_id)?;
    let filename = path.rsplit('/').next().unwrap_or_default().to_string();

    let receipt = state
        .broker
        .with_session(&mut UploadFile::new(path, filename, payload, limit))
        .await
        .api_err(&request_id)?;

    log::info!(
        "[{}] {} uploaded {} ({} bytes)",
        request_id,
        principal.username,
        receipt.path,
        receipt.size
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(receipt, request_id.to_string())))
}
