//! Weather refresh workflow.
//!
//! ```text
//!  refresh()
//!    ├─ control: disabled, "Refreshing..."   (guard armed)
//!    ├─ GET /weather/fetch
//!    │    ├─ 2xx       → success banner → reload view
//!    │    ├─ non-2xx   → error banner
//!    │    └─ transport → error banner
//!    └─ guard dropped: control enabled, "Refresh"
//! ```
//!
//! The idle state is restored by a drop guard on every exit path,
//! including a refresh future that is dropped before it completes.

use log::{info, warn};

use crate::error::FetchError;
use crate::notify::NotificationCenter;

use super::events::Severity;
use super::ports::{HttpPort, NotificationSink, RefreshControl, ReloadPort};

pub const UPDATED_MESSAGE: &str = "Weather data updated successfully!";
pub const FAILED_MESSAGE: &str = "Failed to update weather data";
pub const ERROR_MESSAGE: &str = "Error updating weather data";

/// Result of one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The server accepted the fetch; a reload was requested.
    Updated,
    Failed(FetchError),
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Puts the control back to idle when dropped.
struct IdleGuard<'a, C: RefreshControl> {
    control: &'a C,
    idle_label: &'a str,
}

impl<C: RefreshControl> Drop for IdleGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_label(self.idle_label);
        self.control.set_enabled(true);
    }
}

/// Triggers a server-side weather fetch and reports the result.
#[derive(Debug, Clone)]
pub struct WeatherRefresher {
    path: String,
    idle_label: String,
    busy_label: String,
}

impl WeatherRefresher {
    pub fn new(
        path: impl Into<String>,
        idle_label: impl Into<String>,
        busy_label: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            idle_label: idle_label.into(),
            busy_label: busy_label.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run one refresh.  The success banner is shown before the reload is
    /// requested; failures never reload.
    pub async fn refresh<H, C, S, R>(
        &self,
        http: &H,
        control: &C,
        notifier: &NotificationCenter<S>,
        reloader: &R,
    ) -> RefreshOutcome
    where
        H: HttpPort,
        C: RefreshControl,
        S: NotificationSink,
        R: ReloadPort,
    {
        control.set_enabled(false);
        control.set_label(&self.busy_label);
        let _idle = IdleGuard {
            control,
            idle_label: &self.idle_label,
        };

        match http.get(&self.path).await {
            Ok(response) if response.is_success() => {
                info!("Weather: refresh accepted (HTTP {})", response.status);
                notifier.show(UPDATED_MESSAGE, Severity::Success);
                reloader.reload();
                RefreshOutcome::Updated
            }
            Ok(response) => {
                warn!("Weather: refresh rejected (HTTP {})", response.status);
                notifier.show(FAILED_MESSAGE, Severity::Error);
                RefreshOutcome::Failed(FetchError::Status(response.status))
            }
            Err(e) => {
                warn!("Weather: refresh failed: {}", e);
                notifier.show(ERROR_MESSAGE, Severity::Error);
                RefreshOutcome::Failed(e)
            }
        }
    }
}
