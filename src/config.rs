use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;

use crate::model::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "steamsaver.json";
pub const CONFIG_PATH_ENV: &str = "STEAMSAVER_CONFIG";

/// Endpoints and runtime knobs. Everything has a compiled-in default; a JSON
/// file only needs the keys it wants to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub deals_endpoint: String,
    pub redirect_base: String,
    pub store_base: String,
    pub header_image_base: String,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deals_endpoint: "https://www.cheapshark.com/api/1.0/deals".into(),
            redirect_base: "https://www.cheapshark.com/redirect".into(),
            store_base: "https://store.steampowered.com".into(),
            header_image_base: "https://shared.fastly.steamstatic.com/store_item_assets/steam/apps".into(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) SteamSaver/0.1".into(),
            request_timeout_seconds: 15,
            log_file: "steamsaver.log".into(),
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    pub fn header_image_url(&self, steam_app_id: &str) -> String {
        format!("{}/{}/header.jpg", self.header_image_base, steam_app_id)
    }
}

/// Path from `STEAMSAVER_CONFIG`, falling back to `steamsaver.json`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Loads the config file. A missing file yields the defaults.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_config("/nonexistent/steamsaver.json").unwrap();
        assert_eq!(cfg.deals_endpoint, "https://www.cheapshark.com/api/1.0/deals");
        assert_eq!(cfg.request_timeout_seconds, 15);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let path = std::env::temp_dir().join(format!("steamsaver-test-{}.json", std::process::id()));
        fs::write(&path, r#"{"deals_endpoint": "http://localhost:9000/deals", "log_level": "debug"}"#).unwrap();
        let cfg = load_config(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(cfg.deals_endpoint, "http://localhost:9000/deals");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.redirect_base, "https://www.cheapshark.com/redirect");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("steamsaver-bad-{}.json", std::process::id()));
        fs::write(&path, "{not json").unwrap();
        let result = load_config(path.to_str().unwrap());
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn header_image() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.header_image_url("400"),
            "https://shared.fastly.steamstatic.com/store_item_assets/steam/apps/400/header.jpg"
        );
    }
}
