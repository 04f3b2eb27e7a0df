//! Dashboard service, the hexagonal core.
//!
//! [`DashboardService`] owns the scheduler and the shared task context for
//! one view.  It exposes a clean, transport-agnostic API.  All I/O flows
//! through port traits injected at construction, making the whole
//! workflow testable with mock adapters.
//!
//! ```text
//!   HttpPort ──────▶ ┌────────────────────────────────┐ ──▶ NotificationSink
//!                    │        DashboardService        │
//! RefreshControl ◀── │ Scheduler · Poller · Refresher │ ──▶ ReloadPort
//!                    └────────────────────────────────┘
//! ```
//!
//! The service is tick-driven: the runner calls [`DashboardService::tick`]
//! once per `tick_interval_ms`, receives the commands whose schedules
//! fired, and spawns each one with [`DashboardService::spawn`].  Spawned
//! commands run concurrently, so a refresh may start while an earlier one
//! is still waiting on the server.  Nothing bounds the number in flight;
//! the executor must use an unbounded run queue.

use core::fmt;
use core::future::Future;
use core::str::FromStr;
use std::rc::Rc;

use edge_executor::LocalExecutor;
use log::{info, warn};

use crate::config::{DashboardConfig, validate_config};
use crate::notify::NotificationCenter;
use crate::scheduler::{Schedule, ScheduleKind, Scheduler};

use super::alerts::AlertPoller;
use super::commands::AppCommand;
use super::events::{NotificationId, Severity};
use super::ports::{
    ConfigError, HttpPort, NotificationSink, RefreshControl, ReloadPort, ScheduleFiredKind,
    SchedulerDelegate,
};
use super::weather::WeatherRefresher;

// ───────────────────────────────────────────────────────────────
// Views
// ───────────────────────────────────────────────────────────────

/// The page a service instance drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Farm overview: polls upcoming alerts.
    Dashboard,
    /// Weather view: refreshes weather data and owns the refresh button.
    Weather,
    /// Any other page: flash dismissal only.
    Other,
}

impl View {
    /// Classify a request path.  `/dashboard` wins when a path names both.
    pub fn from_path(path: &str) -> Self {
        if path.contains("/dashboard") {
            Self::Dashboard
        } else if path.contains("/weather") {
            Self::Weather
        } else {
            Self::Other
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Weather => "weather",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a view name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view '{}' (expected dashboard, weather or other)", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "weather" => Ok(Self::Weather),
            "other" => Ok(Self::Other),
            _ => Err(UnknownView(s.to_owned())),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Schedule labels
// ───────────────────────────────────────────────────────────────

pub const ALERT_POLL: &str = "alert-poll";
pub const WEATHER_REFRESH: &str = "weather-refresh";
pub const FLASH_DISMISS: &str = "flash-dismiss";

/// Collects the commands for one tick.
struct CommandQueue(Vec<AppCommand>);

impl SchedulerDelegate for CommandQueue {
    fn on_schedule_fired(&mut self, label: &str, _kind: ScheduleFiredKind) {
        let cmd = match label {
            ALERT_POLL => AppCommand::PollAlerts,
            WEATHER_REFRESH => AppCommand::RefreshWeather,
            FLASH_DISMISS => AppCommand::DismissFlash,
            other => {
                warn!("Service: no command for schedule '{}'", other);
                return;
            }
        };
        self.0.push(cmd);
    }
}

// ───────────────────────────────────────────────────────────────
// Ports bundle
// ───────────────────────────────────────────────────────────────

/// Adapters a service is built from.
pub struct DashboardPorts<H, S, C, R> {
    pub http: H,
    pub sink: S,
    /// Required on the weather view; ignored elsewhere.
    pub control: Option<C>,
    pub reloader: R,
}

/// State shared by the service and every task it spawns.
struct TaskContext<H, S, C, R> {
    http: H,
    notifier: NotificationCenter<S>,
    control: Option<C>,
    reloader: R,
    poller: AlertPoller,
    refresher: WeatherRefresher,
}

impl<H, S, C, R> TaskContext<H, S, C, R>
where
    H: HttpPort,
    S: NotificationSink,
    C: RefreshControl,
    R: ReloadPort,
{
    async fn run(&self, command: AppCommand) {
        match command {
            AppCommand::PollAlerts => {
                self.poller.poll_once(&self.http, &self.notifier).await;
            }
            AppCommand::RefreshWeather => match &self.control {
                Some(control) => {
                    self.refresher
                        .refresh(&self.http, control, &self.notifier, &self.reloader)
                        .await;
                }
                None => warn!("Service: refresh requested without a refresh control"),
            },
            AppCommand::DismissFlash => {
                self.notifier.dismiss_flash();
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// DashboardService
// ───────────────────────────────────────────────────────────────

/// Per-view orchestration of polling, refreshing and banner expiry.
pub struct DashboardService<H, S, C, R> {
    view: View,
    ctx: Rc<TaskContext<H, S, C, R>>,
    scheduler: Scheduler,
    /// Seconds per tick (derived from config).
    tick_secs: f32,
    tick_interval_ms: u64,
    tick_count: u64,
}

impl<H, S, C, R> DashboardService<H, S, C, R>
where
    H: HttpPort,
    S: NotificationSink,
    C: RefreshControl,
    R: ReloadPort,
{
    /// Build the service for `view` and register the schedules it needs.
    ///
    /// Fails if the config is invalid or if the weather view is built
    /// without a refresh control.
    pub fn for_view(
        view: View,
        config: &DashboardConfig,
        ports: DashboardPorts<H, S, C, R>,
    ) -> Result<Self, ConfigError> {
        validate_config(config)?;
        if view == View::Weather && ports.control.is_none() {
            return Err(ConfigError::ValidationFailed(
                "weather view requires a refresh control",
            ));
        }

        let mut scheduler = Scheduler::new();
        match view {
            View::Dashboard => {
                scheduler.add(Schedule {
                    label: ALERT_POLL,
                    kind: ScheduleKind::Periodic {
                        interval_secs: config.alert_poll_interval_secs,
                    },
                    enabled: true,
                });
            }
            View::Weather => {
                scheduler.add(Schedule {
                    label: WEATHER_REFRESH,
                    kind: ScheduleKind::Periodic {
                        interval_secs: config.weather_refresh_interval_secs,
                    },
                    enabled: true,
                });
            }
            View::Other => {}
        }
        scheduler.add(Schedule {
            label: FLASH_DISMISS,
            kind: ScheduleKind::OneShot {
                delay_secs: config.flash_dismiss_delay_secs,
            },
            enabled: true,
        });

        let ctx = TaskContext {
            http: ports.http,
            notifier: NotificationCenter::new(ports.sink, config.notification_ttl_ms()),
            control: ports.control,
            reloader: ports.reloader,
            poller: AlertPoller::new(config.alerts_path.clone(), config.alert_counting.clone()),
            refresher: WeatherRefresher::new(
                config.weather_fetch_path.clone(),
                config.refresh_idle_label.clone(),
                config.refresh_busy_label.clone(),
            ),
        };

        info!(
            "Service: {} view ready ({} schedules)",
            view,
            scheduler.active_count()
        );

        Ok(Self {
            view,
            ctx: Rc::new(ctx),
            scheduler,
            tick_secs: config.tick_secs(),
            tick_interval_ms: u64::from(config.tick_interval_ms),
            tick_count: 0,
        })
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance the service clock by one tick: expire banners, then return
    /// the commands whose schedules fired.
    pub fn tick(&mut self) -> Vec<AppCommand> {
        self.tick_count += 1;
        self.ctx.notifier.advance(self.clock_ms());

        let mut queue = CommandQueue(Vec::new());
        self.scheduler.tick(self.tick_secs, &mut queue);
        queue.0
    }

    /// Manual refresh (the refresh button).  `None` when this view has no
    /// refresh control.
    pub fn trigger_refresh(&self) -> Option<AppCommand> {
        self.ctx.control.as_ref().map(|_| AppCommand::RefreshWeather)
    }

    // ── Task execution ────────────────────────────────────────

    /// A self-contained future that runs `command` to completion.
    pub fn task(&self, command: AppCommand) -> impl Future<Output = ()> + use<H, S, C, R> {
        let ctx = Rc::clone(&self.ctx);
        async move { ctx.run(command).await }
    }

    /// Spawn `command` on `executor` and detach it.
    pub fn spawn<'a, const N: usize>(&self, executor: &LocalExecutor<'a, N>, command: AppCommand)
    where
        H: 'a,
        S: 'a,
        C: 'a,
        R: 'a,
    {
        executor.spawn(self.task(command)).detach();
    }

    // ── Notifications ─────────────────────────────────────────

    /// Show a banner (auto-dismissed after the TTL).
    pub fn show_notification(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.ctx.notifier.show(message, severity)
    }

    /// Register a banner that was rendered with the page.
    pub fn seed_flash(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.ctx.notifier.seed_flash(message, severity)
    }

    pub fn notifications(&self) -> &NotificationCenter<S> {
        &self.ctx.notifier
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn view(&self) -> View {
        self.view
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Service clock in milliseconds.
    pub fn clock_ms(&self) -> u64 {
        self.tick_count * self.tick_interval_ms
    }

    /// Labels of the registered schedules.
    pub fn schedules(&self) -> Vec<&'static str> {
        self.scheduler.labels()
    }

    pub fn http(&self) -> &H {
        &self.ctx.http
    }

    pub fn control(&self) -> Option<&C> {
        self.ctx.control.as_ref()
    }

    pub fn reloader(&self) -> &R {
        &self.ctx.reloader
    }
}
