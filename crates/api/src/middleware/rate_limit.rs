//! Fixed-window rate limiting backed by the shared cache.
//!
//! Each request INCRs a per-caller counter; the first request of a window
//! sets the key's TTL. Requests over the limit get 429 without reaching the
//! handler. A missing or unreachable cache fails open (configurable for the
//! unreachable case via `rate_limit_fail_open`). Limits and window length
//! come from [`crate::config::ApiConfig`].

use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use promptrepo_core::AppError;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use crate::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Upper bound on establishing the cache connection. Requests must never
/// wait on the driver's reconnect backoff.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
/// Upper bound on a single counter command.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Counter store handle. Connects lazily on first use so a slow or absent
/// cache never delays startup.
pub struct RateLimiter {
    client: Option<redis::Client>,
    conn: OnceCell<Option<ConnectionManager>>,
}

/// Outcome of one counter increment.
enum Hit {
    /// The running request count for the window, this request included.
    Counted(u64),
    /// No cache configured; counting is permanently off.
    Unconfigured,
    /// Cache configured but unreachable or failing.
    Unavailable,
}

impl RateLimiter {
    pub fn new(redis_url: Option<&str>) -> Self {
        let client = redis_url.and_then(|url| match redis::Client::open(url) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(error = %err, "Invalid cache URL, rate limiting disabled");
                None
            }
        });
        Self {
            client,
            conn: OnceCell::new(),
        }
    }

    /// Establish the manager once, with bounded connect and response
    /// timeouts. A failed first connection is remembered: counting stays
    /// off for the process lifetime and every later request takes the
    /// unavailable branch immediately. An established manager reconnects
    /// on its own.
    async fn connection(&self, client: &redis::Client) -> Option<ConnectionManager> {
        self.conn
            .get_or_init(|| async {
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(1)
                    .set_connection_timeout(CONNECT_TIMEOUT)
                    .set_response_timeout(RESPONSE_TIMEOUT);
                match ConnectionManager::new_with_config(client.clone(), config).await {
                    Ok(conn) => Some(conn),
                    Err(err) => {
                        tracing::error!(error = %err, "Cache connection failed, counting disabled");
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// INCR `key`, setting the window TTL when this request opened it.
    ///
    /// Two first requests racing can each see count 1 and both set the TTL;
    /// the window runs marginally long, which is accepted.
    async fn hit(&self, key: &str, window_secs: u64) -> Hit {
        let Some(client) = self.client.as_ref() else {
            return Hit::Unconfigured;
        };
        let Some(mut conn) = self.connection(client).await else {
            return Hit::Unavailable;
        };

        let count: u64 = match conn.incr(key, 1).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(error = %err, "Cache counter call failed");
                return Hit::Unavailable;
            }
        };
        if count == 1 {
            if let Err(err) = conn.expire::<_, ()>(key, window_secs as i64).await {
                tracing::warn!(error = %err, "Cache counter call failed");
                return Hit::Unavailable;
            }
        }
        Hit::Counted(count)
    }
}

/// Per-IP limiter for the anonymous public surface.
pub async fn public(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = format!("ratelimit:public:{}", client_ip(req.headers()));
    let max = state.config.rate_limit_public_max;
    enforce(&state, &key, max, req, next).await
}

/// Per-user limiter for authenticated surfaces. Sits after `require_auth`;
/// if the context is somehow absent the caller's IP keys the counter.
pub async fn user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = match req
        .extensions()
        .get::<AuthContext>()
        .and_then(AuthContext::user)
    {
        Some((id, _)) => format!("ratelimit:user:{id}"),
        None => format!("ratelimit:user:{}", client_ip(req.headers())),
    };
    let max = state.config.rate_limit_user_max;
    enforce(&state, &key, max, req, next).await
}

async fn enforce(
    state: &AppState,
    key: &str,
    max: u64,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let window_secs = state.config.rate_limit_window_secs;
    let count = match state.limiter.hit(key, window_secs).await {
        Hit::Counted(count) => count,
        Hit::Unconfigured => return Ok(next.run(req).await),
        Hit::Unavailable => {
            if state.config.rate_limit_fail_open {
                tracing::warn!("Rate limit store unavailable, letting request through");
                return Ok(next.run(req).await);
            }
            return Err(AppError::internal("Rate limit check failed").into());
        }
    };

    if count > max {
        let err = AppError::rate_limit(format!(
            "Too many requests. Limit: {max} per {window_secs}s"
        ));
        let mut response = ApiError::from(err).into_response();
        apply_headers(response.headers_mut(), max, count, window_secs);
        return Ok(response);
    }

    let mut response = next.run(req).await;
    apply_headers(response.headers_mut(), max, count, window_secs);
    Ok(response)
}

/// Attach `x-ratelimit-limit`, `x-ratelimit-remaining` and
/// `x-ratelimit-reset` (epoch milliseconds at window end).
fn apply_headers(headers: &mut HeaderMap, max: u64, count: u64, window_secs: u64) {
    let remaining = max.saturating_sub(count);
    let reset = chrono::Utc::now().timestamp_millis() + window_secs as i64 * 1000;

    headers.insert("x-ratelimit-limit", HeaderValue::from(max));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(reset));
}

/// Best-effort client address: first `x-forwarded-for` entry, then
/// `x-real-ip`, then a shared `unknown` bucket.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| "unknown".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn forwarded_for_takes_the_first_entry() {
        let map = headers(&[("x-forwarded-for", "203.0.113.9, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(client_ip(&map), "203.0.113.9");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let map = headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(client_ip(&map), "198.51.100.4");
    }

    #[test]
    fn no_headers_means_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn empty_forwarded_for_falls_through() {
        let map = headers(&[("x-forwarded-for", ""), ("x-real-ip", "198.51.100.4")]);
        assert_eq!(client_ip(&map), "198.51.100.4");
    }

    #[test]
    fn headers_carry_limit_remaining_and_reset() {
        let before = chrono::Utc::now().timestamp_millis();
        let mut map = HeaderMap::new();
        apply_headers(&mut map, 60, 3, 60);

        assert_eq!(map["x-ratelimit-limit"], "60");
        assert_eq!(map["x-ratelimit-remaining"], "57");

        let reset: i64 = map["x-ratelimit-reset"].to_str().unwrap().parse().unwrap();
        assert!(reset >= before + 60_000);
    }

    #[test]
    fn remaining_never_goes_negative() {
        let mut map = HeaderMap::new();
        apply_headers(&mut map, 60, 75, 60);
        assert_eq!(map["x-ratelimit-remaining"], "0");
    }

    #[tokio::test]
    async fn unreachable_cache_reports_unavailable_and_remembers_it() {
        // Nothing listens on port 1: the first hit pays at most the bounded
        // connect attempt, later hits answer from the cached failure.
        let limiter = RateLimiter::new(Some("redis://127.0.0.1:1/"));

        assert!(matches!(
            limiter.hit("ratelimit:public:test", 60).await,
            Hit::Unavailable
        ));

        let second = tokio::time::timeout(
            Duration::from_millis(250),
            limiter.hit("ratelimit:public:test", 60),
        )
        .await
        .expect("cached connection failure must answer immediately");
        assert!(matches!(second, Hit::Unavailable));
    }

    #[tokio::test]
    async fn invalid_cache_url_counts_as_unconfigured() {
        let limiter = RateLimiter::new(Some("not a url"));
        assert!(matches!(
            limiter.hit("ratelimit:public:test", 60).await,
            Hit::Unconfigured
        ));
    }
}
