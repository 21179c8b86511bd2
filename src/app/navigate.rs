// Outbound links opened in the user's browser.
use std::io;

use tracing::{info, warn};

use crate::config::AppConfig;

/// `{redirect_base}?dealID={id}`. Deal ids arrive already URL-encoded and are used as-is.
pub fn deal_url(config: &AppConfig, deal_id: &str) -> String {
    format!("{}?dealID={}", config.redirect_base, deal_id)
}

/// `{store_base}/app/{steam_app_id}`
pub fn store_url(config: &AppConfig, steam_app_id: &str) -> String {
    format!("{}/app/{}", config.store_base.trim_end_matches('/'), steam_app_id)
}

/// Hands the URL to the system handler without waiting for it.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    info!("Opening {}", url);
    open::that_detached(url).inspect_err(|e| warn!("Failed to open {}: {}", url, e))
}
