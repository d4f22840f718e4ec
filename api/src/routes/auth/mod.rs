//! Authentication route handlers
//!
//! - Login with username and password
//! - Access token refresh
//! - Self-registration
//! - The current principal

pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

use actix_web::web;

use crate::middleware::RequireAuth;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login::login))
            .route("/refresh", web::post().to(refresh::refresh))
            .route("/register", web::post().to(register::register))
            .service(
                web::resource("/me")
                    .wrap(RequireAuth::any())
                    .route(web::get().to(me::me)),
            ),
    );
}
