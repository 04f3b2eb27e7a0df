//! Inbound commands to the dashboard service.
//!
//! These represent actions requested by the scheduler or by the user
//! (the refresh button) that the
//! [`DashboardService`](super::service::DashboardService) turns into
//! spawned tasks.

/// Commands that the scheduler and UI adapters send into the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Poll the upcoming-alerts endpoint once.
    PollAlerts,

    /// Refresh weather data once (timer or manual trigger).
    RefreshWeather,

    /// Dismiss the banners that were present when the view loaded.
    DismissFlash,
}
