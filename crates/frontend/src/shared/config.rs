use contracts::shared::config::{AppConfig, DEFAULT_CONFIG};

/// Id of the optional `<script type="application/json">` holding page overrides.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Load configuration for the current page
///
/// Search order:
/// 1. JSON embedded in the page under `#app-config`
/// 2. Falls back to embedded default config
pub fn load_config() -> AppConfig {
    let embedded = super::dom::document()
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    if let Some(raw) = embedded {
        match AppConfig::from_json(&raw) {
            Ok(config) => {
                log::info!("Loading config from #{}", CONFIG_ELEMENT_ID);
                return config;
            }
            Err(e) => log::warn!("#{} ignored: {}", CONFIG_ELEMENT_ID, e),
        }
    }

    log::info!("Using default embedded configuration");
    AppConfig::from_json(DEFAULT_CONFIG).unwrap_or_default()
}
