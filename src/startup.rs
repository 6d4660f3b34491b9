use std::sync::Arc;

use axum::{
    extract::MatchedPath,
    http::Request,
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::{Settings, StoreKind};
use crate::routes::{check_health, home, signup};
use crate::store::{InMemoryStore, PostgresStore, SignupStore};

#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when no database is configured; signups then answer 503.
    pub store: Option<Arc<dyn SignupStore>>,
}

impl AppState {
    pub fn with_store(store: Arc<dyn SignupStore>) -> Self {
        Self { store: Some(store) }
    }
}

pub async fn get_app_state(configuration: &Settings) -> AppState {
    if configuration.store == StoreKind::InMemory {
        tracing::warn!("Using the in-memory store; signups are lost on restart");
        return AppState::with_store(Arc::new(InMemoryStore::new()));
    }

    let Some(database) = &configuration.database else {
        tracing::warn!("No database configured; signups are unavailable");
        return AppState::default();
    };

    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(database.connect_options());

    if let Err(error) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!(error = ?error, "Failed to migrate the database");
    }

    AppState::with_store(Arc::new(PostgresStore::new(pool)))
}

pub async fn run(listener: TcpListener, app_state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(app_state)).await
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/signups", post(signup))
        .route("/health_check", get(check_health))
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!(
                    "Starting HTTP request",
                    method = ?request.method(),
                    path,
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}
