//! Reload adapter for the headless runner.
//!
//! There is no page to reload, so a reload request is logged and
//! counted.  The runner reports the count on shutdown.

use std::cell::Cell;

use log::info;

use crate::app::ports::ReloadPort;

#[derive(Default)]
pub struct LogReloader {
    reloads: Cell<u32>,
}

impl LogReloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> u32 {
        self.reloads.get()
    }
}

impl ReloadPort for LogReloader {
    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
        info!("RELOAD | view reload #{}", self.reloads.get());
    }
}
