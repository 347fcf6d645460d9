//! Backend entry-point: wires the tweet REST endpoints, health probes, and
//! the terminal error translator.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::config::ServerSettings;
use backend::domain::ports::{FixtureTweetRepository, TweetRepository};
use backend::inbound::http::error::fallback;
use backend::inbound::http::health::{self, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::tweets;
use backend::middleware::{RequestLog, Translate};
use backend::outbound::persistence::{self, DbPool, DieselTweetRepository, PoolSettings};

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

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let mode = settings.runtime_mode();

    let repository: Arc<dyn TweetRepository> = match settings.database_url.as_deref() {
        Some(url) => {
            persistence::run_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::connect(PoolSettings::new(url))
                .await
                .map_err(std::io::Error::other)?;
            Arc::new(DieselTweetRepository::new(pool))
        }
        None => {
            warn!("TWEETS_DATABASE_URL not set; using the in-memory store (dev only)");
            Arc::new(FixtureTweetRepository::default())
        }
    };

    let state = HttpState::new(repository);
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let cors_origin = settings.cors_origin().to_owned();
    let bind = (settings.bind_address().to_owned(), settings.port());

    info!(
        address = %bind.0,
        port = bind.1,
        production = mode.is_production(),
        "starting tweets backend"
    );

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header();

        // Registration order matters: the translator sits innermost so the
        // request log and CORS headers see the response it renders.
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .service(tweets::routes())
            .service(health::ready)
            .service(health::live)
            .default_service(web::route().to(fallback))
            .wrap(Translate::new(mode))
            .wrap(cors)
            .wrap(RequestLog);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(bind)?;

    health_state.mark_ready();
    server.run().await
}
