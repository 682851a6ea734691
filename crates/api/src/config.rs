/// Service configuration loaded from environment variables.
///
/// Integration values are optional at load time so `/health` can report what
/// is configured; the ones the server cannot run without are asserted in
/// `main` with a descriptive failure.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Connection string for the managed Postgres backend.
    pub database_url: Option<String>,
    /// HS256 secret the identity provider signs access tokens with.
    pub supabase_jwt_secret: Option<String>,
    /// Connection string for the cache holding rate-limit counters.
    pub redis_url: Option<String>,
    /// Payments provider API key. Presence-checked only; no outbound calls.
    pub stripe_secret_key: Option<String>,
    /// Secret the payments provider signs webhook payloads with.
    pub stripe_webhook_secret: Option<String>,
    /// When the rate-limit cache is unreachable: `true` lets requests
    /// through without counting, `false` fails them with INTERNAL.
    pub rate_limit_fail_open: bool,
    /// Requests allowed per window on the anonymous public surface, per IP.
    pub rate_limit_public_max: u64,
    /// Requests allowed per window on authenticated surfaces, per user.
    pub rate_limit_user_max: u64,
    /// Fixed-window length in seconds.
    pub rate_limit_window_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `DATABASE_URL`          | unset                   |
    /// | `SUPABASE_JWT_SECRET`   | unset                   |
    /// | `REDIS_URL`             | unset                   |
    /// | `STRIPE_SECRET_KEY`     | unset                   |
    /// | `STRIPE_WEBHOOK_SECRET` | unset                   |
    /// | `RATE_LIMIT_FAIL_OPEN`  | `true`                  |
    /// | `RATE_LIMIT_PUBLIC_MAX` | `60`                    |
    /// | `RATE_LIMIT_USER_MAX`   | `120`                   |
    /// | `RATE_LIMIT_WINDOW_SECS`| `60`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rate_limit_fail_open = std::env::var("RATE_LIMIT_FAIL_OPEN")
            .map(|v| !matches!(v.trim(), "false" | "0"))
            .unwrap_or(true);

        Self {
            host,
            port,
            cors_origins,
            database_url: optional_env("DATABASE_URL"),
            supabase_jwt_secret: optional_env("SUPABASE_JWT_SECRET"),
            redis_url: optional_env("REDIS_URL"),
            stripe_secret_key: optional_env("STRIPE_SECRET_KEY"),
            stripe_webhook_secret: optional_env("STRIPE_WEBHOOK_SECRET"),
            rate_limit_fail_open,
            rate_limit_public_max: numeric_env("RATE_LIMIT_PUBLIC_MAX", 60),
            rate_limit_user_max: numeric_env("RATE_LIMIT_USER_MAX", 120),
            rate_limit_window_secs: numeric_env("RATE_LIMIT_WINDOW_SECS", 60),
        }
    }

    /// Store and token verification are both needed to serve user data.
    pub fn supabase_configured(&self) -> bool {
        self.database_url.is_some() && self.supabase_jwt_secret.is_some()
    }

    pub fn redis_configured(&self) -> bool {
        self.redis_url.is_some()
    }

    pub fn stripe_configured(&self) -> bool {
        self.stripe_secret_key.is_some() && self.stripe_webhook_secret.is_some()
    }
}

/// An unset or empty environment variable both count as "not configured".
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn numeric_env(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a number")),
        Err(_) => default,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_config() -> ApiConfig {
        ApiConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            database_url: None,
            supabase_jwt_secret: None,
            redis_url: None,
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            rate_limit_fail_open: true,
            rate_limit_public_max: 60,
            rate_limit_user_max: 120,
            rate_limit_window_secs: 60,
        }
    }

    #[test]
    fn nothing_configured_reports_false_everywhere() {
        let config = blank_config();
        assert!(!config.supabase_configured());
        assert!(!config.redis_configured());
        assert!(!config.stripe_configured());
    }

    #[test]
    fn supabase_needs_both_url_and_secret() {
        let mut config = blank_config();
        config.database_url = Some("postgres://localhost/app".into());
        assert!(!config.supabase_configured());

        config.supabase_jwt_secret = Some("secret".into());
        assert!(config.supabase_configured());
    }

    #[test]
    fn stripe_needs_both_key_and_webhook_secret() {
        let mut config = blank_config();
        config.stripe_secret_key = Some("sk_test_123".into());
        assert!(!config.stripe_configured());

        config.stripe_webhook_secret = Some("whsec_123".into());
        assert!(config.stripe_configured());
    }
}
