use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use jb_api::config::{init_tracing, log_startup};
use jb_api::{create_app, AppState, EmployerStore};
use jb_core::repositories::InMemoryStore;
use jb_core::services::WelcomeMailer;
use jb_infra::database::{DatabasePool, MySqlEmployerRepository};
use jb_infra::mail::create_mailer;
use jb_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;
    log_startup(&config);

    let mailer = Arc::new(create_mailer(&config.mail));
    tracing::info!(provider = mailer.provider_name(), "Welcome mail provider selected");

    match &config.database {
        Some(database) => {
            let pool = DatabasePool::new(database)
                .await
                .context("failed to connect to MySQL")?;
            pool.run_migrations()
                .await
                .context("failed to run database migrations")?;
            tracing::info!(pool = %pool.statistics(), "Connected to MySQL");

            let repository = Arc::new(MySqlEmployerRepository::new(pool.inner().clone()));
            let state = AppState::new(repository, mailer, &config.auth).with_database(pool);
            serve(state, config).await
        }
        None => {
            let state = AppState::new(Arc::new(InMemoryStore::new()), mailer, &config.auth);
            serve(state, config).await
        }
    }
}

async fn serve<R, M>(state: AppState<R, M>, config: AppConfig) -> anyhow::Result<()>
where
    R: EmployerStore,
    M: WelcomeMailer + 'static,
{
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let state = web::Data::new(state);

    tracing::info!(address = %bind_address, "Starting HTTP server");

    let mut server = HttpServer::new(move || create_app(state.clone(), &config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
