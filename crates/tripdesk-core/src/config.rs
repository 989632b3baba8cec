use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_PLACES_URL: &str = "https://en.wikipedia.org/w/api.php";
const DEFAULT_USER_AGENT: &str = "tripdesk/0.1 (itinerary-suggestions)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got '{raw}'"))
            }),
        }
    };

    let database_url = lookup("DATABASE_URL").ok();
    let env = parse_environment(&or_default("TRIPDESK_ENV", "development"))?;

    let bind_addr = parse_addr("TRIPDESK_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("TRIPDESK_LOG_LEVEL", "info");
    let catalog_path = lookup("TRIPDESK_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let geocoder_url = or_default("TRIPDESK_GEOCODER_URL", DEFAULT_GEOCODER_URL);
    let places_url = or_default("TRIPDESK_PLACES_URL", DEFAULT_PLACES_URL);
    let http_timeout_secs = parse_u64("TRIPDESK_HTTP_TIMEOUT_SECS", "10")?;
    if http_timeout_secs == 0 {
        return Err(invalid(
            "TRIPDESK_HTTP_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let user_agent = or_default("TRIPDESK_USER_AGENT", DEFAULT_USER_AGENT);
    let poi_radius_meters = parse_u32("TRIPDESK_POI_RADIUS_METERS", "10000")?;
    let fallback_enabled = parse_bool("TRIPDESK_FALLBACK_ENABLED", true)?;

    let db_max_connections = parse_u32("TRIPDESK_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("TRIPDESK_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("TRIPDESK_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        catalog_path,
        geocoder_url,
        places_url,
        http_timeout_secs,
        user_agent,
        poi_radius_meters,
        fallback_enabled,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TRIPDESK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
