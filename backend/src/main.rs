//! Backend entry-point: wires the petition endpoints and health probes.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use petition_backend::domain::ports::FixtureViewRenderer;
use petition_backend::inbound::http::campaigns::{
    create_campaign, list_campaigns, new_campaign, show_campaign, sign,
};
use petition_backend::inbound::http::health::{live, ready, HealthState};
use petition_backend::inbound::http::state::{HttpState, HttpStatePorts};
use petition_backend::inbound::http::users::login;
use petition_backend::outbound::markdown::ComrakMarkdownRenderer;
use petition_backend::outbound::persistence::{
    DbPool, DieselCampaignRepository, DieselSignatureRepository, PoolConfig,
};

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

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let state = web::Data::new(HttpState::from(HttpStatePorts {
        campaigns: Arc::new(DieselCampaignRepository::new(pool.clone())),
        signatures: Arc::new(DieselSignatureRepository::new(pool)),
        markdown: Arc::new(ComrakMarkdownRenderer),
        renderer: Arc::new(FixtureViewRenderer),
    }));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server_state = state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        // Health probes stay outside the session scope so probes never
        // carry cookies.
        let site = web::scope("")
            .wrap(session)
            .app_data(server_state.clone())
            .service(login)
            .service(show_campaign)
            .service(sign)
            .service(new_campaign)
            .service(create_campaign)
            .service(list_campaigns);

        App::new()
            .app_data(server_health_state.clone())
            .service(ready)
            .service(live)
            .service(site)
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
