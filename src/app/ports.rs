//! Port traits: the hexagonal boundary between dashboard logic and the page.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DashboardService (domain)
//! ```
//!
//! Driven adapters (HTTP client, banner renderer, refresh button, view
//! reloader, config store) implement these traits.  The
//! [`DashboardService`](super::service::DashboardService) consumes them via
//! generics, so the domain core never looks anything up in ambient state.
//!
//! All UI-facing ports take `&self`: several poll and refresh tasks may
//! hold the same port at once on the single-threaded executor, so adapters
//! use interior mutability where they keep state.

use core::future::Future;

use crate::config::DashboardConfig;
use crate::error::FetchError;

use super::events::{Notification, NotificationId};

// ───────────────────────────────────────────────────────────────
// HTTP port (driven adapter: domain → dashboard server)
// ───────────────────────────────────────────────────────────────

/// Response from the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True when the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Read-side port: the domain calls this to issue a `GET` request.
///
/// Implementations return `Ok` for every status the server answers with
/// (including 4xx/5xx) and reserve `Err` for transport failures.  No
/// timeout is applied.
pub trait HttpPort {
    /// Issue `GET {base}{path}`.
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpResponse, FetchError>>;
}

// ───────────────────────────────────────────────────────────────
// Notification sink port (driven adapter: domain → banner region)
// ───────────────────────────────────────────────────────────────

/// Renders transient banners at the top of the page's content region.
///
/// The [`NotificationCenter`](crate::notify::NotificationCenter) decides
/// ordering and expiry; the sink only draws and removes.
pub trait NotificationSink {
    fn show(&self, notification: &Notification);

    fn dismiss(&self, id: NotificationId);
}

// ───────────────────────────────────────────────────────────────
// Refresh control port (driven adapter: domain → refresh button)
// ───────────────────────────────────────────────────────────────

/// Handle to the weather view's refresh button.
///
/// Injected into the refresher instead of being discovered in the page.
pub trait RefreshControl {
    fn set_label(&self, label: &str);

    fn set_enabled(&self, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Reload port (driven adapter: domain → current view)
// ───────────────────────────────────────────────────────────────

/// Forces a full reload of the current view.
pub trait ReloadPort {
    fn reload(&self);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ config store)
// ───────────────────────────────────────────────────────────────

/// Loads and persists dashboard configuration.
///
/// Implementations MUST validate values before returning or persisting
/// them.  Invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration.
    /// Returns [`ConfigError::NotFound`] if no stored config exists.
    fn load(&self) -> Result<DashboardConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &DashboardConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the task runner)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a schedule fires.
///
/// The [`Scheduler`](crate::scheduler::Scheduler) knows nothing about
/// HTTP, banners or executors; the service implements this to turn fires
/// into [`AppCommand`](super::commands::AppCommand)s.
pub trait SchedulerDelegate {
    /// Called when a schedule fires.
    ///
    /// * `label`: the label of the schedule that fired.
    /// * `kind`: whether it was a periodic or one-shot fire.
    fn on_schedule_fired(&mut self, label: &str, kind: ScheduleFiredKind);
}

/// Discriminant passed to [`SchedulerDelegate::on_schedule_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFiredKind {
    /// A recurring periodic schedule fired.
    Periodic,
    /// A one-shot schedule fired (auto-disables after).
    OneShot,
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage.
    NotFound,
    /// Stored config could not be deserialized.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
