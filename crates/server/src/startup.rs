use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::pagination::PageLimits;
use service::student::NameMatch;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when readable, built-in defaults otherwise.
/// A readable but invalid file is an error.
fn load_config() -> Result<AppConfig, StartupError> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config file unavailable, using defaults");
            AppConfig::default()
        }
    };
    cfg.database.normalize_from_env();
    if cfg.database.url.trim().is_empty() {
        cfg.database.url = models::db::DATABASE_URL.clone();
    }
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    Ok(cfg)
}

/// Host/port from config, overridable by SERVER_HOST / SERVER_PORT.
fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.server.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.server.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Migrate (when enabled) and wire the services into a router.
pub async fn build_app(cfg: &AppConfig, db: DatabaseConnection) -> Result<Router, StartupError> {
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("migrations applied");
    }
    let paging = PageLimits::new(cfg.pagination.default_size, cfg.pagination.max_size);
    let name_match = NameMatch::from_case_sensitive(cfg.search.case_sensitive);
    let state = ServerState::new(db, paging, name_match);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg).await?;
    let app = build_app(&cfg, db).await?;

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, page_size = cfg.pagination.default_size, "starting school server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
