//! Application core: dashboard workflow logic, no direct I/O.
//!
//! This module holds the rules of the live dashboard: alert polling,
//! weather refresh, and per-view scheduling.  All interaction with the
//! server and the page happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a network or page.

pub mod alerts;
pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod weather;
