use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, DEFAULT_ALLOWED_ORIGINS};
pub use security::create_security_headers_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Without a database URL events are kept in memory.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    /// Prefix for the absolute URIs placed in `_links` and `Location`.
    pub public_base_url: String,
    pub cors_allowed_origins: String,
    /// `RUST_ENV=production`; enables HSTS.
    pub production: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            cors_allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            production: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST")
            .and_then(|value| parse_or_warn("HOST", &value))
            .unwrap_or(defaults.host);
        let port = var("PORT")
            .and_then(|value| parse_or_warn("PORT", &value))
            .unwrap_or(defaults.port);
        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|value| parse_or_warn("DATABASE_MAX_CONNECTIONS", &value))
            .unwrap_or(defaults.database_max_connections);
        let public_base_url = var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        let cors_allowed_origins =
            var("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);
        let production = var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        Self {
            database_url: var("DATABASE_URL"),
            database_max_connections,
            host,
            port,
            public_base_url,
            cors_allowed_origins,
            production,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Config: Ignoring invalid {} '{}'", key, value);
            None
        }
    }
}
