//! Headless stand-in for the weather view's refresh button.
//!
//! Tracks the label and enabled flag so the runner can report them, and
//! logs every change.

use std::cell::{Cell, RefCell};

use log::info;

use crate::app::ports::RefreshControl;

pub struct ConsoleRefreshControl {
    label: RefCell<String>,
    enabled: Cell<bool>,
}

impl ConsoleRefreshControl {
    pub fn new(idle_label: impl Into<String>) -> Self {
        Self {
            label: RefCell::new(idle_label.into()),
            enabled: Cell::new(true),
        }
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

impl RefreshControl for ConsoleRefreshControl {
    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_owned();
        info!("CONTROL | label='{}'", label);
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        info!("CONTROL | {}", if enabled { "enabled" } else { "disabled" });
    }
}
