use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL of the nearest-stores backend the proxy forwards to.
    pub backend_url: String,
    /// Upstream request timeout. `None` leaves reqwest's defaults in place.
    pub upstream_timeout_secs: Option<u64>,
    /// Base URL of the proxy server, used by the CLI client.
    pub proxy_url: String,
    /// Position provider for "use current location". May embed an access token.
    pub geolocation_url: Option<String>,
    /// Visible page size for the result list. `None` disables pagination.
    pub page_size: Option<usize>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("backend_url", &self.backend_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("proxy_url", &self.proxy_url)
            .field(
                "geolocation_url",
                &self.geolocation_url.as_ref().map(|_| "[redacted]"),
            )
            .field("page_size", &self.page_size)
            .finish()
    }
}
