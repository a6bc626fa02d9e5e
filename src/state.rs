use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenService;
use crate::auth::rate_limit::FixedWindowLimiter;
use crate::clients::nhl::NhlClient;
use crate::clients::weather::WeatherClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{ReferenceCache, RosterService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client is reused across all upstream clients to enable connection
/// pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent("Paneboard/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything a request handler can reach: config, store, upstream clients,
/// the token service, the login limiter and the reference-data cache.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Store,
    tokens: TokenService,
    login_limiter: Arc<FixedWindowLimiter>,
    nhl: Arc<NhlClient>,
    weather: Arc<WeatherClient>,
    roster_service: Arc<RosterService>,
    reference: Arc<ReferenceCache>,
}

impl AppState {
    pub async fn from_config(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.nhl.request_timeout_seconds)?;

        let nhl = Arc::new(NhlClient::with_shared_client(
            http_client.clone(),
            config.nhl.base_url.clone(),
        ));
        let weather = Arc::new(WeatherClient::with_shared_client(
            http_client,
            config.weather.base_url.clone(),
            config.weather.api_key.clone(),
        ));

        let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_seconds);
        let login_limiter = Arc::new(FixedWindowLimiter::new(
            config.auth.login_max_attempts,
            Duration::from_secs(config.auth.login_window_seconds),
        ));

        let roster_service = Arc::new(RosterService::new(
            nhl.clone(),
            config.nhl.player_fetch_concurrency,
        ));

        Ok(Arc::new(Self {
            config: Arc::new(config),
            store,
            tokens,
            login_limiter,
            nhl,
            weather,
            roster_service,
            reference: Arc::new(ReferenceCache::new()),
        }))
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub const fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    #[must_use]
    pub fn login_limiter(&self) -> &FixedWindowLimiter {
        &self.login_limiter
    }

    #[must_use]
    pub fn nhl(&self) -> &Arc<NhlClient> {
        &self.nhl
    }

    #[must_use]
    pub fn weather(&self) -> &Arc<WeatherClient> {
        &self.weather
    }

    #[must_use]
    pub fn roster_service(&self) -> &Arc<RosterService> {
        &self.roster_service
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceCache {
        &self.reference
    }
}
