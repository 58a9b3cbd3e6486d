//! HTTP server assembly: state, middleware and routes.

mod config;
mod state_builders;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use tracing::info;

use feedforward::Trace;
use feedforward::domain::{CategoryCatalogue, TRACE_ID_HEADER};
use feedforward::inbound::http::api_scope;
use feedforward::inbound::http::health::{HealthState, live, ready};
use feedforward::inbound::http::status::server_status;
use feedforward::outbound::security::Argon2PasswordHasher;

use state_builders::build_http_state;

const CORS_MAX_AGE_SECS: usize = 3600;

/// Browser access for the configured origins, with credentials.
fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .supports_credentials()
        .max_age(CORS_MAX_AGE_SECS)
}

/// Root status, health probes, the `/api/v1` scope and, in debug builds,
/// Swagger UI at `/docs`.
fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(server_status)
        .service(ready)
        .service(live)
        .service(api_scope());

    #[cfg(debug_assertions)]
    {
        use feedforward::doc::ApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when the password hasher cannot be built or
/// the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    catalogue: Arc<CategoryCatalogue>,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        cors_origins,
        tokens,
        store,
    } = config;
    let hasher = Argon2PasswordHasher::new()
        .map_err(|err| std::io::Error::other(format!("password hasher: {err}")))?;
    let http_state = build_http_state(store.as_ref(), hasher, tokens, catalogue);
    let cors_origins: Arc<[String]> = cors_origins.into();
    let probes = health_state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(probes.clone())
            .app_data(http_state.clone())
            .wrap(cors(&cors_origins))
            .wrap(Trace)
            .configure(routes)
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "server ready");
    Ok(server)
}
