//! Upcoming-alert polling.
//!
//! One poll is a single `GET` of the alerts endpoint.  The body is counted
//! according to [`AlertCounting`]; a positive count becomes an info banner.
//! Failures are logged and swallowed, and the next scheduled poll simply
//! tries again.  Non-2xx responses count as failures and are never
//! counted; the page counted markers in any body regardless of status.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::notify::NotificationCenter;

use super::events::Severity;
use super::ports::{HttpPort, NotificationSink};

/// Marker token counted in the alerts page by default.
pub const DEFAULT_ALERT_MARKER: &str = "alert-card";

/// How the number of upcoming alerts is read from a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCounting {
    /// Count non-overlapping occurrences of a token in the raw body.
    Marker(String),
    /// Read a non-negative integer field from a JSON object body.
    /// Bodies that are not JSON, or lack the field, are counted with
    /// `fallback_marker` instead.
    JsonField {
        field: String,
        fallback_marker: String,
    },
}

impl Default for AlertCounting {
    fn default() -> Self {
        Self::Marker(DEFAULT_ALERT_MARKER.into())
    }
}

/// Count the alerts in `body`.
pub fn count_alerts(counting: &AlertCounting, body: &str) -> usize {
    match counting {
        AlertCounting::Marker(token) => count_marker(body, token),
        AlertCounting::JsonField {
            field,
            fallback_marker,
        } => match json_count(body, field) {
            Some(n) => n,
            None => {
                warn!(
                    "Alerts: no integer '{}' in response, counting '{}' markers",
                    field, fallback_marker
                );
                count_marker(body, fallback_marker)
            }
        },
    }
}

fn count_marker(body: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    body.matches(token).count()
}

fn json_count(body: &str, field: &str) -> Option<usize> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let n = value.get(field)?.as_u64()?;
    usize::try_from(n).ok()
}

/// Banner text for a positive alert count.
pub fn alert_message(count: usize) -> String {
    format!("You have {count} upcoming alerts!")
}

/// Polls the alerts endpoint and raises a banner when alerts are pending.
#[derive(Debug, Clone)]
pub struct AlertPoller {
    path: String,
    counting: AlertCounting,
}

impl AlertPoller {
    pub fn new(path: impl Into<String>, counting: AlertCounting) -> Self {
        Self {
            path: path.into(),
            counting,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run one poll.
    ///
    /// Returns the alert count, or `None` when the request failed or the
    /// server answered with a non-2xx status.  No banner is shown for a
    /// count of zero.
    pub async fn poll_once<H, S>(&self, http: &H, notifier: &NotificationCenter<S>) -> Option<usize>
    where
        H: HttpPort,
        S: NotificationSink,
    {
        let response = match http.get(&self.path).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Alerts: poll of {} failed: {}", self.path, e);
                return None;
            }
        };
        if !response.is_success() {
            warn!("Alerts: poll of {} returned HTTP {}", self.path, response.status);
            return None;
        }

        let count = count_alerts(&self.counting, &response.body);
        debug!("Alerts: {} upcoming", count);
        if count > 0 {
            notifier.show(alert_message(count), Severity::Info);
        }
        Some(count)
    }
}
