//! Outbound notifications.
//!
//! The poll and refresh workflows emit these through the
//! [`NotificationCenter`](crate::notify::NotificationCenter), which forwards
//! them to the [`NotificationSink`](super::ports::NotificationSink) port.
//! Adapters on the other side decide how a banner is drawn.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Severity tag of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Tag as used in the banner class (`alert-{tag}`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Banner CSS classes, e.g. `alert alert-info alert-dismissible fade show`.
    pub fn banner_class(self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a banner, unique within one
/// [`NotificationCenter`](crate::notify::NotificationCenter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// A transient, dismissible banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    /// Service clock (ms) at which the banner was shown.
    pub shown_at_ms: u64,
}
