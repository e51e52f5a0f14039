use snapchef_domain::pagination::DEFAULT_MAX_PAGE_SIZE;

/// API server configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// Redis host. The recipe cache is disabled when unset. Env var: `REDIS_HOST`.
    pub redis_host: Option<String>,
    /// Env var: `REDIS_PORT` (default 6379).
    pub redis_port: u16,
    /// TCP port for the HTTP server (default 3000). Env var: `APP_PORT`.
    pub app_port: u16,
    pub access_ttl_secs: u64,
    pub refresh_ttl_secs: u64,
    /// Recipe detail cache TTL. Env var: `CACHE_TTL_SECS`.
    pub cache_ttl_secs: u64,
    /// Upper bound for `limit` on every list endpoint.
    pub max_page_size: u32,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            redis_host: std::env::var("REDIS_HOST").ok().filter(|h| !h.is_empty()),
            redis_port: parse_or("REDIS_PORT", 6379),
            app_port: parse_or("APP_PORT", 3000),
            access_ttl_secs: parse_or("JWT_ACCESS_TTL_SECS", 900),
            refresh_ttl_secs: parse_or("JWT_REFRESH_TTL_SECS", 604_800),
            cache_ttl_secs: parse_or("CACHE_TTL_SECS", 300),
            max_page_size: parse_or("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE).max(1),
            run_migrations: std::env::var("RUN_MIGRATIONS")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
        }
    }

    /// `redis://host:port`, if a host is configured.
    pub fn redis_url(&self) -> Option<String> {
        self.redis_host
            .as_ref()
            .map(|host| format!("redis://{host}:{}", self.redis_port))
    }
}
