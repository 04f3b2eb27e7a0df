//! KrishiMitra dashboard client library.
//!
//! Exposes the soil evaluator, the alert/weather polling workflow and the
//! form helpers for the runner binary and for integration testing.  The
//! workflow core in [`app`] talks to the outside only through port traits;
//! [`adapters`] holds the concrete implementations.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod notify;
pub mod scheduler;
pub mod soil;

pub use app::events::{Notification, NotificationId, Severity};
pub use app::service::{DashboardPorts, DashboardService, View};
pub use config::DashboardConfig;
pub use error::{Error, Result};
pub use soil::{SoilAssessment, SoilSample, assess};
