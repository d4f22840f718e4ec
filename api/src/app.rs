//! Application state and factory

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use sg_core::repositories::AccountRepository;
use sg_core::services::{
    AdminService, AuthService, AuthServiceConfig, AuthorizationGate, PathSandbox, SessionBroker,
    SessionBrokerConfig, SessionConnector, TokenService, TokenServiceConfig,
};
use sg_shared::{AppConfig, ApiResponse};

use crate::handlers::{json_error_handler, path_error_handler, query_error_handler};
use crate::middleware::{RequestId, RequestIdMiddleware, SecurityHeaders};
use crate::routes;

/// Services shared by every worker
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub gate: AuthorizationGate,
    pub auth: AuthService,
    pub admin: AdminService,
    pub broker: Arc<SessionBroker>,
    pub sandbox: PathSandbox,
    pub max_upload_bytes: u64,
    pub json_limit: usize,
    pub strict_transport: bool,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        accounts: Arc<dyn AccountRepository>,
        connector: Arc<dyn SessionConnector>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        Self::with_token_service(config, accounts, connector, tokens)
    }

    /// Builds the state around an existing token service, e.g. one driven
    /// by a fixed clock
    pub fn with_token_service(
        config: &AppConfig,
        accounts: Arc<dyn AccountRepository>,
        connector: Arc<dyn SessionConnector>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let broker = SessionBroker::new(connector, SessionBrokerConfig::from(&config.remote.broker));

        Self {
            gate: AuthorizationGate::new(tokens.clone(), accounts.clone()),
            auth: AuthService::new(
                accounts.clone(),
                tokens.clone(),
                AuthServiceConfig::from(&config.auth),
            ),
            admin: AdminService::new(accounts),
            broker: Arc::new(broker),
            sandbox: PathSandbox::new(&config.sandbox.root),
            max_upload_bytes: config.sandbox.max_upload_bytes,
            json_limit: config.server.json_limit,
            strict_transport: config.is_production(),
            tokens,
        }
    }
}

/// Registers state, extractor configuration and every route
pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let json_limit = state.json_limit;
        cfg.app_data(state)
            .app_data(
                web::JsonConfig::default()
                    .limit(json_limit)
                    .error_handler(json_error_handler),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .configure(routes::health::configure)
            .configure(routes::auth::configure)
            .configure(routes::admin::configure)
            .configure(routes::files::configure);
    }
}

/// Create the application with logging, request ids, security headers and
/// all routes
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let security = SecurityHeaders::new().with_strict_transport(state.strict_transport);

    App::new()
        .configure(configure(state))
        .wrap(security)
        .wrap(RequestIdMiddleware)
        .wrap(Logger::new("%a \"%r\" %s %b %T %{x-request-id}o"))
        .default_service(web::route().to(not_found))
}

async fn not_found(request_id: RequestId) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(
        "NOT_FOUND",
        "The requested resource was not found",
        request_id.to_string(),
    ))
}
