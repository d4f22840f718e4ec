//! Account administration, restricted to the `ADMIN` role

pub mod organizations;
pub mod users;

use actix_web::web;

use crate::middleware::{RequireAuth, ADMINS};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireAuth::new(ADMINS))
            .route("/users", web::get().to(users::list_users))
            .route("/users/{id}/status", web::patch().to(users::update_status))
            .route("/users/{id}/role", web::patch().to(users::update_role))
            .route("/organizations", web::get().to(organizations::list_organizations)),
    );
}
