use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    pub omdb_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://moviweb.db?mode=rwc".to_string());

        let secret_key = std::env::var("SECRET_KEY").context("SECRET_KEY is not set")?;
        anyhow::ensure!(secret_key.len() >= 32, "SECRET_KEY must be at least 32 bytes");

        // Enrichment is optional: without a key the app still works,
        // movies are just stored with their title alone.
        let omdb_api_key = std::env::var("OMDB_API_KEY").unwrap_or_else(|_| "".to_string());
        let omdb_base_url = std::env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.omdbapi.com/".to_string());

        let omdb_timeout_secs: u64 =
            std::env::var("OMDB_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            secret_key,
            omdb_api_key,
            omdb_base_url,
            omdb_timeout_secs,
        })
    }
}
