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
    /// Shared secret Datafrete presents in `x-operator-token` on webhooks.
    pub operator_token: Option<String>,
    pub datafrete_timeout_secs: u64,
    pub platform_api_base_url: String,
    pub platform_authentication_id: Option<String>,
    pub platform_api_key: Option<String>,
    pub platform_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "operator_token",
                &self.operator_token.as_ref().map(|_| "[redacted]"),
            )
            .field("datafrete_timeout_secs", &self.datafrete_timeout_secs)
            .field("platform_api_base_url", &self.platform_api_base_url)
            .field(
                "platform_authentication_id",
                &self.platform_authentication_id,
            )
            .field(
                "platform_api_key",
                &self.platform_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("platform_timeout_secs", &self.platform_timeout_secs)
            .finish()
    }
}
