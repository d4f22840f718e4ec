//! File operations proxied to the remote store
//!
//! Every path is resolved through the sandbox before a session is opened.
//! Reads are open to all roles; writes need `READ_WRITE` or `ADMIN`.

pub mod download;
pub mod list;
pub mod mkdir;
pub mod upload;

use actix_web::web;

use crate::middleware::{RequireAuth, READERS, WRITERS};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/files")
            .service(
                web::resource("/list")
                    .wrap(RequireAuth::new(READERS))
                    .route(web::get().to(list::list)),
            )
            .service(
                web::resource("/download")
                    .wrap(RequireAuth::new(READERS))
                    .route(web::get().to(download::download)),
            )
            .service(
                web::resource("/upload")
                    .wrap(RequireAuth::new(WRITERS))
                    .route(web::post().to(upload::upload)),
            )
            .service(
                web::resource("/mkdir")
                    .wrap(RequireAuth::new(WRITERS))
                    .route(web::post().to(mkdir::mkdir)),
            ),
    );
}
