use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sg_core::services::admin::MAX_PAGE_SIZE;
use sg_shared::{ApiResponse, OffsetPage};

use crate::app::AppState;
use crate::dto::admin::{ListUsersQuery, UpdateRoleRequest, UpdateStatusRequest};
use crate::handlers::{validated, ApiError, IntoApiResult};
use crate::middleware::{Principal, RequestId};

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Handler for GET /admin/users
///
/// Optional `status` and `role` filters; `limit` (1..=100, default 50) and
/// `offset` window the newest-first listing.
pub async fn list_users(
    request_id: RequestId,
    state: web::Data<AppState>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = validated(query.into_inner(), &request_id)?;
    let page = OffsetPage::new(
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        query.offset.unwrap_or(0),
        MAX_PAGE_SIZE,
    );

    let listing = state
        .admin
        .list_accounts(query.status, query.role, page)
        .await
        .api_err(&request_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(listing, request_id.to_string())))
}

/// Handler for PATCH /admin/users/{id}/status
pub async fn update_status(
    request_id: RequestId,
    principal: Principal,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let account = state
        .admin
        .update_status(&principal, id.into_inner(), request.status)
        .await
        .api_err(&request_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        account.to_public(),
        request_id.to_string(),
    )))
}

/// Handler for PATCH /admin/users/{id}/role
pub async fn update_role(
    request_id: RequestId,
    principal: Principal,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, ApiError> {
    let account = state
        .admin
        .update_role(&principal, id.into_inner(), request.role)
        .await
        .api_err(&request_id)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        account.to_public(),
        request_id.to_string(),
    )))
}
