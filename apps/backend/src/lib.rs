pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trivia_core::{GameSettings, QuestionSet};

use crate::config::Config;
use crate::services::games::GameStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameStore>,
    /// Default board. `None` when the configured source failed to load.
    pub questions: Option<Arc<QuestionSet>>,
    pub settings: GameSettings,
}

impl AppState {
    pub fn new(questions: Option<QuestionSet>, settings: GameSettings) -> Self {
        Self {
            games: Arc::new(GameStore::new()),
            questions: questions.map(Arc::new),
            settings,
        }
    }
}

/// Build the full router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/grade", post(routes::grade::grade))
        .route("/api/questions", get(routes::questions::summary))
        .route("/api/games", post(routes::games::create))
        .route(
            "/api/games/:id",
            get(routes::games::get).delete(routes::games::delete),
        )
        .route("/api/games/:id/open", post(routes::games::open))
        .route("/api/games/:id/buzz", post(routes::games::buzz))
        .route("/api/games/:id/answer", post(routes::games::answer))
        .route("/api/games/:id/dismiss", post(routes::games::dismiss))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading questions from {:?}...", config.source);
    let questions = match services::questions::load(&config.source).await {
        Ok(set) => {
            tracing::info!(
                "Loaded {} questions in {} categories",
                set.question_count(),
                set.categories.len()
            );
            Some(set)
        }
        Err(e) => {
            tracing::error!("Failed to load questions, board not built: {}", e);
            None
        }
    };

    let state = AppState::new(questions, config.settings);
    let app = app(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
