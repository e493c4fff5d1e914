use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values fail to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values fail to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function, decoupled from the actual environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("FREIGHTGATE_ENV", "development"));
    let bind_addr = parse_addr("FREIGHTGATE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FREIGHTGATE_LOG_LEVEL", "info");

    let operator_token = lookup("DATAFRETE_OPERATOR_TOKEN").ok();
    let datafrete_timeout_secs = parse_u64("DATAFRETE_TIMEOUT_SECS", "30")?;

    let platform_api_base_url = or_default("ECOM_API_BASE_URL", "https://api.e-com.plus/v1");
    let platform_authentication_id = lookup("ECOM_AUTHENTICATION_ID").ok();
    let platform_api_key = lookup("ECOM_API_KEY").ok();
    let platform_timeout_secs = parse_u64("ECOM_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        operator_token,
        datafrete_timeout_secs,
        platform_api_base_url,
        platform_authentication_id,
        platform_api_key,
        platform_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_variants() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("anything"), Environment::Development);
    }

    #[test]
    fn defaults_apply_with_an_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.operator_token.is_none());
        assert_eq!(cfg.datafrete_timeout_secs, 30);
        assert_eq!(cfg.platform_api_base_url, "https://api.e-com.plus/v1");
        assert!(cfg.platform_api_key.is_none());
        assert_eq!(cfg.platform_timeout_secs, 30);
    }

    #[test]
    fn overrides_are_read() {
        let mut map = HashMap::new();
        map.insert("FREIGHTGATE_BIND_ADDR", "127.0.0.1:8800");
        map.insert("DATAFRETE_OPERATOR_TOKEN", "secret");
        map.insert("DATAFRETE_TIMEOUT_SECS", "10");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8800");
        assert_eq!(cfg.operator_token.as_deref(), Some("secret"));
        assert_eq!(cfg.datafrete_timeout_secs, 10);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let mut map = HashMap::new();
        map.insert("FREIGHTGATE_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FREIGHTGATE_BIND_ADDR"),
            "expected InvalidEnvVar(FREIGHTGATE_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut map = HashMap::new();
        map.insert("DATAFRETE_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "DATAFRETE_TIMEOUT_SECS"),
            "expected InvalidEnvVar(DATAFRETE_TIMEOUT_SECS), got: {result:?}"
        );
    }
}
