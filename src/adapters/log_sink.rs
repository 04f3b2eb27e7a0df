//! Log-based notification sink adapter.
//!
//! Implements [`NotificationSink`] by writing each banner to the log,
//! which the runner routes to stderr.  A page renderer would implement
//! the same trait.

use log::{info, warn};

use crate::app::events::{Notification, NotificationId, Severity};
use crate::app::ports::NotificationSink;

/// Adapter that logs every banner shown or dismissed.
#[derive(Default)]
pub struct LogNotificationSink;

impl LogNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for LogNotificationSink {
    fn show(&self, n: &Notification) {
        match n.severity {
            Severity::Error => warn!("BANNER #{} | {} | {}", n.id.0, n.severity, n.message),
            Severity::Info | Severity::Success => {
                info!("BANNER #{} | {} | {}", n.id.0, n.severity, n.message);
            }
        }
    }

    fn dismiss(&self, id: NotificationId) {
        info!("BANNER #{} | dismissed", id.0);
    }
}
