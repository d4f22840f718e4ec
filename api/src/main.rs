use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use sg_api::{create_app, AppState};
use sg_infra::{DatabasePool, PgAccountRepository, SftpConnector};
use sg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.logging.level));

    info!(
        "Starting SFTP Gateway {} ({})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );
    if config.auth.jwt.is_using_default_secret() {
        if config.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        warn!("JWT_SECRET is not set, using the development default");
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the account database")?;
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    info!("{}", database.get_statistics());

    let accounts = Arc::new(PgAccountRepository::new(database.get_pool().clone()));
    let connector = Arc::new(SftpConnector::new(config.remote.sftp.clone()));
    info!(
        "Remote store sftp://{}:{} sandboxed to {}",
        config.remote.sftp.host, config.remote.sftp.port, config.sandbox.root
    );

    let state = web::Data::new(AppState::new(&config, accounts, connector));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    database.close().await;
    info!("Server stopped");
    Ok(())
}
