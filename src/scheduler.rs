//! Timer/scheduler engine.
//!
//! Drives the repeating poll timers and the page-load one-shot.  The
//! scheduler notifies a [`SchedulerDelegate`] when schedules fire; the
//! dashboard service implements the delegate to queue commands.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Trigger Sources                          │
//! │                                                              │
//! │  ┌──────────────┐   ┌────────────────┐   ┌───────────────┐   │
//! │  │ alert-poll   │   │ weather-refresh│   │ flash-dismiss │   │
//! │  │ (30s, dash)  │   │ (300s, weather)│   │ (5s one-shot) │   │
//! │  └──────┬───────┘   └───────┬────────┘   └───────┬───────┘   │
//! │         │                   │                    │           │
//! │         ▼                   ▼                    ▼           │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              SchedulerDelegate                         │  │
//! │  │       (service queues AppCommands)                     │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          ▼                                   │
//! │              spawned task on LocalExecutor                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timers have no cancellation: a schedule lives as long as the service
//! that registered it.  Periodic schedules first fire one full interval
//! after registration.

use crate::app::ports::{ScheduleFiredKind, SchedulerDelegate};
use log::info;

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Label passed back to the delegate (e.g. "alert-poll").
    pub label: &'static str,
    pub kind: ScheduleKind,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub enum ScheduleKind {
    /// Fire every `interval_secs` seconds.
    Periodic { interval_secs: u32 },
    /// Fire once after `delay_secs`, then auto-disable.
    OneShot { delay_secs: u32 },
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules per view.
const MAX_SCHEDULES: usize = 4;

/// The scheduler engine.
///
/// Decoupled from HTTP and from the executor: when a schedule fires it
/// invokes the [`SchedulerDelegate`] callback and nothing else.
pub struct Scheduler {
    schedules: [Option<ScheduleEntry>; MAX_SCHEDULES],
}

#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Ticks elapsed since last fire (or since registration).
    elapsed_ticks: u64,
    /// Whether a one-shot has fired.
    fired: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            schedules: [None, None, None, None],
        }
    }

    /// Add a schedule.  Returns the slot index, or `None` if full.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        for (i, slot) in self.schedules.iter_mut().enumerate() {
            if slot.is_none() {
                info!("Scheduler: added '{}' at slot {}", schedule.label, i);
                *slot = Some(ScheduleEntry {
                    schedule,
                    elapsed_ticks: 0,
                    fired: false,
                });
                return Some(i);
            }
        }
        None
    }

    /// Tick the scheduler.  Call once per service tick.
    ///
    /// * `tick_secs`: duration of one tick in seconds.
    /// * `delegate`: receives fire notifications.
    pub fn tick(&mut self, tick_secs: f32, delegate: &mut dyn SchedulerDelegate) {
        for slot in &mut self.schedules {
            let entry = match slot {
                Some(e) if e.schedule.enabled => e,
                _ => continue,
            };

            entry.elapsed_ticks += 1;
            let elapsed_secs = entry.elapsed_ticks as f32 * tick_secs;

            match &entry.schedule.kind {
                ScheduleKind::Periodic { interval_secs } => {
                    if elapsed_secs >= *interval_secs as f32 {
                        info!(
                            "Scheduler: '{}' periodic fire (every {}s)",
                            entry.schedule.label, interval_secs
                        );
                        delegate.on_schedule_fired(entry.schedule.label, ScheduleFiredKind::Periodic);
                        entry.elapsed_ticks = 0;
                    }
                }

                ScheduleKind::OneShot { delay_secs } => {
                    if !entry.fired && elapsed_secs >= *delay_secs as f32 {
                        info!(
                            "Scheduler: '{}' one-shot fired (after {}s)",
                            entry.schedule.label, delay_secs
                        );
                        delegate.on_schedule_fired(entry.schedule.label, ScheduleFiredKind::OneShot);
                        entry.fired = true;
                        entry.schedule.enabled = false;
                    }
                }
            }
        }
    }

    /// Number of active (enabled) schedules.
    pub fn active_count(&self) -> usize {
        self.schedules
            .iter()
            .filter(|s| s.as_ref().is_some_and(|e| e.schedule.enabled))
            .count()
    }

    /// Labels of every registered schedule, enabled or not, in slot order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.schedules
            .iter()
            .flatten()
            .map(|e| e.schedule.label)
            .collect()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
