//! Transient banner notifications.
//!
//! [`NotificationCenter`] owns the banner stack for one view.  New banners
//! go on top; each one is dismissed once it is older than the configured
//! TTL.  Banners present when the view loaded (server flash messages) are
//! seeded with [`NotificationCenter::seed_flash`] and are dismissed together
//! by the `flash-dismiss` one-shot instead of by TTL.
//!
//! ```text
//!  show() ──▶ [newest, …, oldest] ──▶ NotificationSink::show
//!  advance(now) ── expired ids ─────▶ NotificationSink::dismiss
//! ```
//!
//! Time is the service clock in milliseconds, advanced once per tick.

use core::cell::{Cell, RefCell};

use log::info;

use crate::app::events::{Notification, NotificationId, Severity};
use crate::app::ports::NotificationSink;

struct Banner {
    notification: Notification,
    /// Flash banners ignore the TTL.
    flash: bool,
}

/// Banner stack plus auto-dismiss bookkeeping.
pub struct NotificationCenter<S> {
    sink: S,
    ttl_ms: u64,
    now_ms: Cell<u64>,
    next_id: Cell<u64>,
    /// Newest first.
    banners: RefCell<Vec<Banner>>,
}

impl<S: NotificationSink> NotificationCenter<S> {
    pub fn new(sink: S, ttl_ms: u64) -> Self {
        Self {
            sink,
            ttl_ms,
            now_ms: Cell::new(0),
            next_id: Cell::new(1),
            banners: RefCell::new(Vec::new()),
        }
    }

    /// Show a banner that auto-dismisses after the TTL.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.push(message.into(), severity, false)
    }

    /// Register a banner that was already on the page at load time.
    pub fn seed_flash(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.push(message.into(), severity, true)
    }

    /// Advance the clock and dismiss expired banners.
    /// Returns how many were dismissed.
    pub fn advance(&self, now_ms: u64) -> usize {
        self.now_ms.set(now_ms);
        let ttl = self.ttl_ms;
        let expired = self.remove_where(|b| {
            !b.flash && now_ms.saturating_sub(b.notification.shown_at_ms) >= ttl
        });
        for id in &expired {
            self.sink.dismiss(*id);
        }
        expired.len()
    }

    /// Dismiss one banner.  Returns `false` if it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let removed = self.remove_where(|b| b.notification.id == id);
        for id in &removed {
            self.sink.dismiss(*id);
        }
        !removed.is_empty()
    }

    /// Dismiss every seeded flash banner.  Returns how many were dismissed.
    pub fn dismiss_flash(&self) -> usize {
        let removed = self.remove_where(|b| b.flash);
        for id in &removed {
            self.sink.dismiss(*id);
        }
        if !removed.is_empty() {
            info!("Notifications: dismissed {} flash banner(s)", removed.len());
        }
        removed.len()
    }

    pub fn dismiss_all(&self) {
        let removed = self.remove_where(|_| true);
        for id in &removed {
            self.sink.dismiss(*id);
        }
    }

    /// Visible banners, top of the page first.
    pub fn banners(&self) -> Vec<Notification> {
        self.banners
            .borrow()
            .iter()
            .map(|b| b.notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.banners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ── Internal ──────────────────────────────────────────────

    fn push(&self, message: String, severity: Severity, flash: bool) -> NotificationId {
        let id = NotificationId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let notification = Notification {
            id,
            message,
            severity,
            shown_at_ms: self.now_ms.get(),
        };
        self.banners.borrow_mut().insert(
            0,
            Banner {
                notification: notification.clone(),
                flash,
            },
        );
        // Borrow released before calling out.
        self.sink.show(&notification);
        id
    }

    fn remove_where(&self, mut pred: impl FnMut(&Banner) -> bool) -> Vec<NotificationId> {
        let mut removed = Vec::new();
        self.banners.borrow_mut().retain(|b| {
            if pred(b) {
                removed.push(b.notification.id);
                false
            } else {
                true
            }
        });
        removed
    }
}
