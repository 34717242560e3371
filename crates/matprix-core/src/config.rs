use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a provided value fails to parse. All variables
/// have defaults, so an empty environment always succeeds.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a provided value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// tests can drive it with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let bind_raw = or_default("MATPRIX_BIND_ADDR", "127.0.0.1:8000");
    let bind_addr = bind_raw
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "MATPRIX_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let data_path = PathBuf::from(or_default("MATPRIX_DATA_PATH", "data/materials.json"));
    let config_path = PathBuf::from(or_default("MATPRIX_CONFIG_PATH", "config/scraper.yaml"));
    let log_level = or_default("MATPRIX_LOG_LEVEL", "info");

    Ok(AppConfig {
        bind_addr,
        data_path,
        config_path,
        log_level,
    })
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
    fn empty_environment_yields_all_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8000");
        assert_eq!(cfg.data_path.to_str(), Some("data/materials.json"));
        assert_eq!(cfg.config_path.to_str(), Some("config/scraper.yaml"));
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn bind_addr_override() {
        let mut map = HashMap::new();
        map.insert("MATPRIX_BIND_ADDR", "0.0.0.0:9001");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:9001");
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let mut map = HashMap::new();
        map.insert("MATPRIX_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MATPRIX_BIND_ADDR"),
            "expected InvalidEnvVar(MATPRIX_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn data_and_config_path_overrides() {
        let mut map = HashMap::new();
        map.insert("MATPRIX_DATA_PATH", "/var/lib/matprix/materials.json");
        map.insert("MATPRIX_CONFIG_PATH", "/etc/matprix/scraper.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(
            cfg.data_path.to_str(),
            Some("/var/lib/matprix/materials.json")
        );
        assert_eq!(cfg.config_path.to_str(), Some("/etc/matprix/scraper.yaml"));
    }
}
