// src/main.rs
use anyhow::Result;
use inkwell::application::{
    ports::{security::TokenManager, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, Repositories},
};
use inkwell::config::AppConfig;
use inkwell::infrastructure::{
    database,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleRevisionRepository,
        PostgresArticleWriteRepository, PostgresCategoryRepository,
        PostgresColumnEntryRepository, PostgresColumnRepository, PostgresCommentReportRepository,
        PostgresCommentRepository, PostgresDraftRepository, PostgresSensitiveWordRepository,
        PostgresTopicRepository,
    },
    security::BiscuitTokenManager,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use inkwell::presentation::http::{
    routes::{RouterOptions, build_router_with_options},
    state::HttpState,
};
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool =
        database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let token_manager: Arc<dyn TokenManager> = Arc::new(
        BiscuitTokenManager::from_public_key_hex(config.biscuit_public_key())?,
    );
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        postgres_repositories(&pool),
        token_manager,
        clock,
        slugger,
    ));

    let state = HttpState { services };
    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        rate_limit: config.rate_limit_enabled(),
    };

    let app = build_router_with_options(state, &options);

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

fn postgres_repositories(pool: &PgPool) -> Repositories {
    Repositories {
        article_write: Arc::new(PostgresArticleWriteRepository::new(pool.clone())),
        article_read: Arc::new(PostgresArticleReadRepository::new(pool.clone())),
        article_revisions: Arc::new(PostgresArticleRevisionRepository::new(pool.clone())),
        drafts: Arc::new(PostgresDraftRepository::new(pool.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
        topics: Arc::new(PostgresTopicRepository::new(pool.clone())),
        comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
        comment_reports: Arc::new(PostgresCommentReportRepository::new(pool.clone())),
        sensitive_words: Arc::new(PostgresSensitiveWordRepository::new(pool.clone())),
        columns: Arc::new(PostgresColumnRepository::new(pool.clone())),
        column_entries: Arc::new(PostgresColumnEntryRepository::new(pool.clone())),
    }
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
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
