use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::{Context, Result};

mod api;
mod config;
mod db;
mod docs;
mod error;
mod export;
mod mapper;
mod model;
mod routes;
mod service;
mod store;

use config::{Config, StoreBackend};
use db::init_db;

use crate::docs::ApiDoc;
use crate::mapper::RecordMapper;
use crate::service::EmployeeService;
use crate::store::{EmployeeStore, InMemoryEmployeeStore, MySqlEmployeeStore};
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Employee records service"
}

async fn build_store(config: &Config) -> Result<Arc<dyn EmployeeStore>> {
    match config.store_backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryEmployeeStore::new())),
        StoreBackend::Mysql => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = init_db(
                database_url,
                config.database_max_connections,
                config.run_migrations,
            )
            .await?;
            Ok(Arc::new(MySqlEmployeeStore::new(pool)))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = %config.store_backend, "Server starting...");

    let store = build_store(&config).await?;
    let service = Data::new(EmployeeService::new(store, Arc::new(RecordMapper)));
    let rate_limit = routes::rate_limit(config.rate_api_per_min)?;

    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(service.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, &api_prefix, &rate_limit))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
