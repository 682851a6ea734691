use std::sync::Arc;

use crate::config::ApiConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to handlers and middleware via
/// `State<AppState>`.
///
/// Cheaply cloneable: the pool is internally reference-counted and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool to the managed Postgres backend.
    pub pool: promptrepo_db::DbPool,
    /// Service configuration.
    pub config: Arc<ApiConfig>,
    /// Counter store for the fixed-window rate limiter.
    pub limiter: Arc<RateLimiter>,
}
