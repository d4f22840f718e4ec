//! Mapping of domain errors onto HTTP error envelopes

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

use sg_core::errors::{AuthError, DomainError, RemoteError, SandboxError, ValidationError};
use sg_shared::ApiResponse;

use crate::middleware::RequestId;

/// An error ready to be rendered as an error envelope
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Value>,
    request_id: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>, request_id: &RequestId) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
            request_id: request_id.to_string(),
        }
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Classifies a domain error. Transport and internal causes are logged
    /// here and never exposed in the message.
    pub fn from_domain(error: DomainError, request_id: &RequestId) -> Self {
        use StatusCode as S;

        match error {
            DomainError::Auth(auth) => from_auth(auth, request_id),
            DomainError::Token(e) => {
                log::debug!("[{}] Token rejected: {}", request_id, e);
                Self::new(S::UNAUTHORIZED, "TOKEN_INVALID", "Invalid or expired token", request_id)
            }
            DomainError::ValidationErr(e) => {
                let field = match &e {
                    ValidationError::RequiredField { field }
                    | ValidationError::InvalidFormat { field }
                    | ValidationError::InvalidLength { field, .. } => field.clone(),
                    ValidationError::WeakPassword { .. } => "password".to_string(),
                };
                let mut fields = serde_json::Map::new();
                fields.insert(field, json!([e.to_string()]));
                Self::new(S::BAD_REQUEST, "VALIDATION_ERROR", e.to_string(), request_id)
                    .with_details(json!({ "fields": fields }))
            }
            DomainError::Validation { message } => {
                Self::new(S::BAD_REQUEST, "VALIDATION_ERROR", message, request_id)
            }
            DomainError::NotFound { resource } => Self::new(
                S::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", resource),
                request_id,
            ),
            DomainError::Sandbox(e) => from_sandbox(e, request_id),
            DomainError::Remote(e) => from_remote(e, request_id),
            DomainError::Internal { message } => {
                log::error!("[{}] Internal error: {}", request_id, message);
                Self::new(
                    S::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred",
                    request_id,
                )
            }
        }
    }

    /// Field-level validation failures from `validator`
    pub fn validation(errors: &ValidationErrors, request_id: &RequestId) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Invalid request data",
            request_id,
        )
        .with_details(json!({ "fields": fields }))
    }

    /// Rejects a request body that could not be parsed
    pub fn bad_request(message: impl Into<String>, request_id: &RequestId) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, request_id)
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

fn from_auth(error: AuthError, request_id: &RequestId) -> ApiError {
    use StatusCode as S;

    let (status, code, message) = match error {
        AuthError::MissingToken => (S::UNAUTHORIZED, "MISSING_TOKEN", "Authentication required".to_string()),
        AuthError::TokenInvalid(e) => {
            log::debug!("[{}] Token rejected: {}", request_id, e);
            (S::UNAUTHORIZED, "TOKEN_INVALID", "Invalid or expired token".to_string())
        }
        AuthError::AccountNotFound => (S::UNAUTHORIZED, "ACCOUNT_NOT_FOUND", error.to_string()),
        AuthError::AccountPending => (S::FORBIDDEN, "ACCOUNT_PENDING", error.to_string()),
        AuthError::AccountDisabled => (S::FORBIDDEN, "ACCOUNT_DISABLED", error.to_string()),
        AuthError::Forbidden => (S::FORBIDDEN, "FORBIDDEN", error.to_string()),
        AuthError::InvalidCredentials => (S::UNAUTHORIZED, "INVALID_CREDENTIALS", error.to_string()),
        AuthError::InvalidRefreshToken => (S::UNAUTHORIZED, "INVALID_REFRESH_TOKEN", error.to_string()),
        AuthError::UsernameTaken => (S::CONFLICT, "USERNAME_TAKEN", error.to_string()),
        AuthError::UserNotFound => (S::NOT_FOUND, "USER_NOT_FOUND", error.to_string()),
        AuthError::SelfModification => (S::BAD_REQUEST, "SELF_MODIFICATION", error.to_string()),
    };
    ApiError::new(status, code, message, request_id)
}

fn from_sandbox(error: SandboxError, request_id: &RequestId) -> ApiError {
    match error {
        SandboxError::PathTraversal { path } => ApiError::new(
            StatusCode::BAD_REQUEST,
            "PATH_TRAVERSAL",
            "Path resolves outside the permitted directory",
            request_id,
        )
        .with_details(json!({ "path": path })),
        SandboxError::IllegalCharacter => ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_PATH",
            error.to_string(),
            request_id,
        ),
    }
}

fn from_remote(error: RemoteError, request_id: &RequestId) -> ApiError {
    use StatusCode as S;

    match error {
        RemoteError::NotFound(_) => {
            ApiError::new(S::NOT_FOUND, "REMOTE_NOT_FOUND", "Remote path not found", request_id)
        }
        RemoteError::PermissionDenied(_) => ApiError::new(
            S::FORBIDDEN,
            "REMOTE_PERMISSION_DENIED",
            "Permission denied by the remote store",
            request_id,
        ),
        RemoteError::AlreadyExists(_) => ApiError::new(
            S::CONFLICT,
            "REMOTE_ALREADY_EXISTS",
            "Remote path already exists",
            request_id,
        ),
        RemoteError::PayloadTooLarge { limit } => ApiError::new(
            S::PAYLOAD_TOO_LARGE,
            "PAYLOAD_TOO_LARGE",
            format!("Upload exceeds the {} byte limit", limit),
            request_id,
        )
        .with_details(json!({ "limit": limit })),
        RemoteError::Cancelled => ApiError::new(
            S::SERVICE_UNAVAILABLE,
            "REQUEST_CANCELLED",
            "Request cancelled",
            request_id,
        ),
        other => {
            log::error!("[{}] Remote store failure: {}", request_id, other);
            ApiError::new(
                S::BAD_GATEWAY,
                "TRANSPORT_ERROR",
                "Remote file store unavailable",
                request_id,
            )
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ApiResponse::error(self.code, self.message.clone(), self.request_id.clone());
        if let Some(details) = &self.details {
            body = body.with_details(details.clone());
        }
        HttpResponse::build(self.status).json(body)
    }
}

/// Attaches the request id to a domain failure
pub trait IntoApiResult<T> {
    fn api_err(self, request_id: &RequestId) -> Result<T, ApiError>;
}

impl<T, E> IntoApiResult<T> for Result<T, E>
where
    E: Into<DomainError>,
{
    fn api_err(self, request_id: &RequestId) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_domain(e.into(), request_id))
    }
}

/// Runs `validator` checks on a deserialized request
pub fn validated<T: Validate>(value: T, request_id: &RequestId) -> Result<T, ApiError> {
    value
        .validate()
        .map_err(|errors| ApiError::validation(&errors, request_id))?;
    Ok(value)
}

/// Renders malformed JSON bodies as validation envelopes
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let request_id = RequestId::of(req);
    log::debug!("[{}] Rejected JSON body: {}", request_id, err);
    ApiError::bad_request(format!("Invalid request body: {}", err), &request_id).into()
}

/// Renders malformed query strings as validation envelopes
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let request_id = RequestId::of(req);
    log::debug!("[{}] Rejected query string: {}", request_id, err);
    ApiError::bad_request(format!("Invalid query parameters: {}", err), &request_id).into()
}

/// Renders unparsable path segments (e.g. a malformed id) as validation envelopes
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let request_id = RequestId::of(req);
    ApiError::bad_request(format!("Invalid path parameter: {}", err), &request_id).into()
}
