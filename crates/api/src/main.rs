use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use jualputus_core::message::MessageFormatter;
use jualputus_core::ticket::TicketGenerator;
use jualputus_db::{MemorySubmissionStore, PgSubmissionStore, SubmissionRepo};
use jualputus_whatsapp::FonnteConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jualputus_api::config::ServerConfig;
use jualputus_api::router::build_app_router;
use jualputus_api::state::{AppState, WhatsApp};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    if config.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN is not set; admin submission endpoints will return 401");
    }

    // --- Submission store ---
    let store = open_store(&config).await?;

    // --- WhatsApp delivery ---
    let formatter = MessageFormatter::with_utc_offset_hours(config.message_utc_offset_hours);
    let whatsapp = FonnteConfig::from_env().and_then(|c| WhatsApp::from_config(c, formatter));
    match &whatsapp {
        Ok(w) => tracing::info!(
            api_url = %w.uploads.client().config().api_url,
            "WhatsApp delivery configured"
        ),
        Err(e) => tracing::warn!(error = %e, "WhatsApp delivery disabled; send endpoints will return 503"),
    }

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        whatsapp: Arc::new(whatsapp),
        tickets: Arc::new(TicketGenerator::new(config.ticket_prefix.clone())),
    };

    // --- Router ---
    let app = build_app_router(state, &config)?;

    // --- Start server ---
    let host: IpAddr = config.host.parse()?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "jualputus_api=debug,jualputus_whatsapp=debug,jualputus_db=debug,tower_http=debug".into()
    });
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Pick the store: Postgres when `DATABASE_URL` is set, otherwise memory,
/// mirrored to `SUBMISSIONS_FILE` when that is set.
async fn open_store(config: &ServerConfig) -> Result<Arc<dyn SubmissionRepo>, BoxError> {
    if let Some(database_url) = &config.database_url {
        let pool = jualputus_db::create_pool(database_url).await?;
        tracing::info!("Database connection pool created");

        jualputus_db::health_check(&pool).await?;
        jualputus_db::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        return Ok(Arc::new(PgSubmissionStore::new(pool)));
    }

    match &config.submissions_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using in-memory store with JSON snapshot");
            Ok(Arc::new(MemorySubmissionStore::open(path).await?))
        }
        None => {
            tracing::warn!("No DATABASE_URL or SUBMISSIONS_FILE; submissions are kept in memory only");
            Ok(Arc::new(MemorySubmissionStore::new()))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
