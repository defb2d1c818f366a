// src/main.rs
use anyhow::{Context, Result};
use audit_console::application::{
    ports::{
        forgery::AntiForgery, localization::Translator, security::TokenManager, time::Clock,
    },
    services::ApplicationServices,
};
use audit_console::config::AppConfig;
use audit_console::domain::event::EventRepository;
use audit_console::infrastructure::{
    database,
    localization::CatalogTranslator,
    repositories::PostgresEventRepository,
    security::{forgery::HmacAntiForgery, token::BiscuitTokenManager},
    time::SystemClock,
};
use audit_console::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let event_repo: Arc<dyn EventRepository> = Arc::new(PostgresEventRepository::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let csrf_ttl = chrono::Duration::from_std(config.csrf_ttl())
        .context("CSRF_TTL_SECONDS out of range")?;
    let anti_forgery: Arc<dyn AntiForgery> = Arc::new(HmacAntiForgery::new(
        config.csrf_secret(),
        csrf_ttl,
        Arc::clone(&clock),
    ));
    let translator: Arc<dyn Translator> = Arc::new(load_translations(&config)?);

    let services = Arc::new(ApplicationServices::new(
        event_repo,
        token_manager,
        anti_forgery,
        translator,
        clock,
        config.listing_settings(),
    ));

    let state = HttpState::new(services, config.allowed_origins());

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn load_translations(config: &AppConfig) -> Result<CatalogTranslator> {
    let catalog = CatalogTranslator::english();
    let Some(path) = config.translations_path() else {
        return Ok(catalog);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading language pack {path}"))?;
    let overrides = CatalogTranslator::from_json(&raw)
        .with_context(|| format!("parsing language pack {path}"))?;
    tracing::info!(path, entries = overrides.len(), "loaded language pack");
    Ok(catalog.merge(overrides))
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
