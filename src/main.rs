mod config;
mod db;
mod entities;
mod error;
mod flash;
mod models;
mod omdb;
mod routes;
mod store;
mod templates;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    omdb::OmdbClient,
    store::{DbStore, Store},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub omdb: Arc<OmdbClient>,
    key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,moviweb=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("moviweb/0.1")
        .timeout(Duration::from_secs(config.omdb_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = DbStore::new(db);

    let omdb =
        OmdbClient::new(http, config.omdb_api_key.clone(), config.omdb_base_url.clone());

    let key = Key::derive_from(config.secret_key.as_bytes());
    let state = AppState { store: Arc::new(store), omdb: Arc::new(omdb), key };

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/users", post(routes::create_user))
        .route("/users/{user_id}/delete", post(routes::delete_user))
        .route("/users/{user_id}/movies", get(routes::movies).post(routes::add_movie))
        .route("/users/{user_id}/movies/{movie_id}/update", post(routes::update_movie))
        .route("/users/{user_id}/movies/{movie_id}/delete", post(routes::delete_movie))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
