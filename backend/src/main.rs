//! Backend entry-point: loads settings, connects storage and starts the HTTP
//! server.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;
use zeroize::Zeroizing;

use feedforward::AppSettings;
use feedforward::inbound::http::health::HealthState;
use feedforward::outbound::categories::load_categories;
use feedforward::outbound::mongo::{DocumentStore, StoreConfig};
use feedforward::outbound::security::JwtTokenIssuer;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(std::io::Error::other)?;
    info!(settings = ?settings, "settings loaded");

    let catalogue = load_categories(&settings.categories_path()).map_err(std::io::Error::other)?;
    let tokens = build_token_issuer(&settings)?;

    let mut config = ServerConfig::new(settings.bind_addr(), settings.cors_origins(), tokens);
    match settings.mongodb_uri.as_deref() {
        Some(uri) => {
            let store = DocumentStore::connect(StoreConfig::new(uri, settings.database()))
                .await
                .map_err(std::io::Error::other)?;
            if let Err(e) = store.ping().await {
                warn!(error = %e, "document store not reachable yet; requests will fail until it is");
            }
            store.ensure_indexes().await;
            config = config.with_store(store);
        }
        None => warn!("FEEDFORWARD_MONGODB_URI not set; using in-memory storage (dev only)"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, Arc::new(catalogue))?;
    server.await
}

fn build_token_issuer(settings: &AppSettings) -> std::io::Result<JwtTokenIssuer> {
    let ttl = settings.token_ttl().map_err(std::io::Error::other)?;
    let secret = match settings.jwt_secret() {
        Some(secret) => Zeroizing::new(secret.as_bytes().to_vec()),
        None if cfg!(debug_assertions) => {
            warn!("using temporary token secret (dev only); tokens will not survive a restart");
            let mut bytes = Uuid::new_v4().as_bytes().to_vec();
            bytes.extend_from_slice(Uuid::new_v4().as_bytes());
            Zeroizing::new(bytes)
        }
        None => {
            return Err(std::io::Error::other(
                "FEEDFORWARD_JWT_SECRET must be set in release builds",
            ));
        }
    };
    JwtTokenIssuer::new(secret.as_slice(), ttl, Arc::new(DefaultClock)).map_err(std::io::Error::other)
}
