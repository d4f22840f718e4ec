//! Authorization middleware protecting API endpoints.
//!
//! Runs the authorization gate for every request reaching a wrapped scope or
//! resource. A rejected request is answered with an error envelope and never
//! reaches the handler; an admitted one carries its [`PrincipalContext`] in
//! the request extensions for the [`Principal`] extractor.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use sg_core::domain::entities::account::Role;
use sg_core::domain::entities::principal::PrincipalContext;
use sg_core::errors::{AuthError, DomainError};

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::RequestId;

/// Roles that may read from the file store
pub const READERS: &[Role] = &[Role::ReadOnly, Role::ReadWrite, Role::Admin];

/// Roles that may write to the file store
pub const WRITERS: &[Role] = &[Role::ReadWrite, Role::Admin];

pub const ADMINS: &[Role] = &[Role::Admin];

/// Authorization middleware factory
#[derive(Clone)]
pub struct RequireAuth {
    roles: Rc<[Role]>,
}

impl RequireAuth {
    /// Admits active accounts holding any of `roles`
    pub fn new(roles: &[Role]) -> Self {
        Self {
            roles: Rc::from(roles),
        }
    }

    /// Admits any active account
    pub fn any() -> Self {
        Self::new(&[])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
            roles: Rc::clone(&self.roles),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
    roles: Rc<[Role]>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let roles = Rc::clone(&self.roles);

        Box::pin(async move {
            let request_id = RequestId::of(req.request());
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let verdict = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.gate.authorize(header.as_deref(), &roles).await,
                None => Err(DomainError::internal("authorization gate not configured")),
            };

            match verdict {
                Ok(principal) => {
                    log::debug!(
                        "[{}] Authorized {} ({})",
                        request_id,
                        principal.username,
                        principal.role
                    );
                    req.extensions_mut().insert(principal);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = ApiError::from_domain(error, &request_id).error_response();
                    log::info!(
                        "[{}] {} {} rejected with {}",
                        request_id,
                        req.method(),
                        req.path(),
                        response.status()
                    );
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// The authorized caller of the current request
#[derive(Debug, Clone)]
pub struct Principal(pub PrincipalContext);

impl std::ops::Deref for Principal {
    type Target = PrincipalContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Principal {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<PrincipalContext>()
            .cloned()
            .map(Principal)
            .ok_or_else(|| ApiError::from_domain(AuthError::MissingToken.into(), &RequestId::of(req)));

        ready(result)
    }
}
