use actix_web::{web, HttpResponse};

use sg_core::services::ListDirectory;
use sg_shared::{ApiResponse, OffsetPage};

use crate::app::AppState;
use crate::dto::files::{ListQuery, ListResponse, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::{Principal, RequestId};

/// Handler for GET /files/list
///
/// Directories first, then files, each alphabetically; `limit` and `offset`
/// window the sorted listing.
pub async fn list(
    request_id: RequestId,
    principal: Principal,
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = validated(query.into_inner(), &request_id)?;
    let path = state
        .sandbox
        .resolve(query.path.as_deref())
        .api_err(&request_id)?;

    let entries = state
        .broker
        .with_session(&mut ListDirectory::new(path.clone()))
        .await
        .api_err(&request_id)?;

    let page = OffsetPage::new(
        query.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        query.offset.unwrap_or(0),
        MAX_LIST_LIMIT,
    );
    let total = entries.len() as u64;
    let files = page.slice(entries);

    log::info!(
        "[{}] {} listed {} ({} entries)",
        request_id,
        principal.username,
        path,
        total
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ListResponse {
            pagination: page.info(files.len(), total),
            path,
            files,
        },
        request_id.to_string(),
    )))
}
