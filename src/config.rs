//! Dashboard configuration parameters
//!
//! All tunable parameters for the KrishiMitra dashboard client.
//! Values can be loaded from a JSON file and overridden from the command line.

use serde::{Deserialize, Serialize};

use crate::app::alerts::AlertCounting;
use crate::app::ports::ConfigError;

/// Core dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    // --- Server ---
    /// Base URL of the dashboard server, without trailing path
    pub base_url: String,
    /// Value of the `Cookie` header sent with every request, if any
    pub session_cookie: Option<String>,
    /// Upcoming-alerts endpoint
    pub alerts_path: String,
    /// Weather fetch endpoint
    pub weather_fetch_path: String,

    // --- Alerts ---
    /// How the alert count is read from the alerts response
    pub alert_counting: AlertCounting,
    /// Alert poll interval (seconds)
    pub alert_poll_interval_secs: u32,

    // --- Weather ---
    /// Automatic weather refresh interval (seconds)
    pub weather_refresh_interval_secs: u32,
    /// Refresh button label while idle
    pub refresh_idle_label: String,
    /// Refresh button label while a refresh is in flight
    pub refresh_busy_label: String,

    // --- Notifications ---
    /// Banner lifetime before auto-dismiss (seconds)
    pub notification_ttl_secs: u32,
    /// Delay before page-load flash banners are dismissed (seconds)
    pub flash_dismiss_delay_secs: u32,

    // --- Timing ---
    /// Service tick interval (milliseconds)
    pub tick_interval_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            // Server
            base_url: "http://127.0.0.1:5000".into(),
            session_cookie: None,
            alerts_path: "/alerts/upcoming".into(),
            weather_fetch_path: "/weather/fetch".into(),

            // Alerts
            alert_counting: AlertCounting::default(),
            alert_poll_interval_secs: 30,

            // Weather
            weather_refresh_interval_secs: 300, // 5 min
            refresh_idle_label: "Refresh".into(),
            refresh_busy_label: "Refreshing...".into(),

            // Notifications
            notification_ttl_secs: 5,
            flash_dismiss_delay_secs: 5,

            // Timing
            tick_interval_ms: 1000, // 1 Hz
        }
    }
}

impl DashboardConfig {
    /// Seconds per service tick.
    pub fn tick_secs(&self) -> f32 {
        self.tick_interval_ms as f32 / 1000.0
    }

    /// Banner lifetime in milliseconds.
    pub fn notification_ttl_ms(&self) -> u64 {
        u64::from(self.notification_ttl_secs) * 1000
    }
}

/// Range-check every field.  Called by every [`ConfigPort`] adapter
/// before a config is returned or persisted.
///
/// [`ConfigPort`]: crate::app::ports::ConfigPort
pub fn validate_config(cfg: &DashboardConfig) -> Result<(), ConfigError> {
    if !(cfg.base_url.starts_with("http://") || cfg.base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationFailed(
            "base_url must start with http:// or https://",
        ));
    }
    if !cfg.alerts_path.starts_with('/') {
        return Err(ConfigError::ValidationFailed("alerts_path must start with '/'"));
    }
    if !cfg.weather_fetch_path.starts_with('/') {
        return Err(ConfigError::ValidationFailed(
            "weather_fetch_path must start with '/'",
        ));
    }
    if cfg.session_cookie.as_deref().is_some_and(|c| c.trim().is_empty()) {
        return Err(ConfigError::ValidationFailed(
            "session_cookie must not be blank when set",
        ));
    }
    match &cfg.alert_counting {
        AlertCounting::Marker(token) if token.is_empty() => {
            return Err(ConfigError::ValidationFailed(
                "alert_counting marker must not be empty",
            ));
        }
        AlertCounting::JsonField { field, fallback_marker } => {
            if field.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "alert_counting field must not be empty",
                ));
            }
            if fallback_marker.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "alert_counting fallback_marker must not be empty",
                ));
            }
        }
        AlertCounting::Marker(_) => {}
    }
    if !(10..=60_000).contains(&cfg.tick_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "tick_interval_ms must be 10–60000",
        ));
    }
    if cfg.alert_poll_interval_secs == 0 {
        return Err(ConfigError::ValidationFailed(
            "alert_poll_interval_secs must be > 0",
        ));
    }
    if cfg.weather_refresh_interval_secs == 0 {
        return Err(ConfigError::ValidationFailed(
            "weather_refresh_interval_secs must be > 0",
        ));
    }
    let tick_ms = u64::from(cfg.tick_interval_ms);
    if u64::from(cfg.alert_poll_interval_secs) * 1000 < tick_ms
        || u64::from(cfg.weather_refresh_interval_secs) * 1000 < tick_ms
    {
        return Err(ConfigError::ValidationFailed(
            "poll intervals must not be shorter than one tick",
        ));
    }
    if cfg.notification_ttl_secs == 0 {
        return Err(ConfigError::ValidationFailed(
            "notification_ttl_secs must be > 0",
        ));
    }
    if cfg.refresh_idle_label.trim().is_empty() || cfg.refresh_busy_label.trim().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "refresh labels must not be blank",
        ));
    }
    Ok(())
}
