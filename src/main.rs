//! KrishiMitra dashboard runner entry point.
//!
//! Hexagonal architecture with a tick-driven service on a single-threaded
//! executor.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ReqwestHttp    LogNotificationSink   ConsoleRefreshControl    │
//! │  (HttpPort)     (NotificationSink)    (RefreshControl)         │
//! │  LogReloader    JsonFileConfig                                 │
//! │  (ReloadPort)   (ConfigPort)                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           DashboardService (per view)                  │    │
//! │  │  Scheduler · AlertPoller · WeatherRefresher            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  tokio current-thread runtime ─▶ edge_executor::LocalExecutor  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use edge_executor::LocalExecutor;
use log::{info, warn};
use tokio::time::MissedTickBehavior;

use krishimitra::adapters::config_store::JsonFileConfig;
use krishimitra::adapters::console_control::ConsoleRefreshControl;
use krishimitra::adapters::http::ReqwestHttp;
use krishimitra::adapters::log_sink::LogNotificationSink;
use krishimitra::adapters::reload::LogReloader;
use krishimitra::app::ports::{ConfigError, ConfigPort};
use krishimitra::soil::{self, SoilSample};
use krishimitra::{DashboardConfig, DashboardPorts, DashboardService, Severity, View};

type CliService =
    DashboardService<ReqwestHttp, LogNotificationSink, ConsoleRefreshControl, LogReloader>;

// ── Command line ──────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "krishimitra")]
#[command(about = "KrishiMitra dashboard client: alert polling, weather refresh, soil assessment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live workflow for one view against the dashboard server
    Watch {
        /// View to drive: dashboard, weather or other
        #[arg(long, conflicts_with = "path")]
        view: Option<View>,
        /// Derive the view from a page path such as /weather
        #[arg(long)]
        path: Option<String>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the server base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Cookie header sent with every request (e.g. "session=...")
        #[arg(long)]
        cookie: Option<String>,
        /// Flash banner present at load time (repeatable)
        #[arg(long = "flash")]
        flash: Vec<String>,
        /// Trigger one weather refresh immediately (weather view)
        #[arg(long)]
        refresh_now: bool,
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Assess one soil sample and print the result as JSON
    Assess {
        #[arg(long)]
        ph: f64,
        #[arg(long)]
        moisture: f64,
        #[arg(long)]
        nitrogen: f64,
        #[arg(long)]
        phosphorus: f64,
        #[arg(long)]
        potassium: f64,
        /// Reject out-of-range or NaN values instead of assessing them
        #[arg(long)]
        strict: bool,
    },
    /// Write the default configuration to a JSON file
    InitConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Default log level: info for our crate, warn for others
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "krishimitra=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Commands::Watch {
            view,
            path,
            config,
            base_url,
            cookie,
            flash,
            refresh_now,
            ticks,
        } => {
            let mut cfg = load_config(config)?;
            if let Some(url) = base_url {
                cfg.base_url = url;
            }
            if cookie.is_some() {
                cfg.session_cookie = cookie;
            }
            let view = match (view, path) {
                (Some(v), _) => v,
                (None, Some(p)) => View::from_path(&p),
                (None, None) => View::Dashboard,
            };
            watch(view, &cfg, &flash, refresh_now, ticks)
        }
        Commands::Assess {
            ph,
            moisture,
            nitrogen,
            phosphorus,
            potassium,
            strict,
        } => {
            let sample = SoilSample {
                ph,
                moisture,
                nitrogen,
                phosphorus,
                potassium,
            };
            let assessment = if strict {
                soil::assess_checked(&sample)?
            } else {
                soil::assess(&sample)
            };
            println!("{}", serde_json::to_string_pretty(&assessment)?);
            Ok(())
        }
        Commands::InitConfig { path } => {
            JsonFileConfig::new(&path)
                .save(&DashboardConfig::default())
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}

// ── Config ────────────────────────────────────────────────────

fn load_config(path: Option<PathBuf>) -> Result<DashboardConfig> {
    let Some(path) = path else {
        return Ok(DashboardConfig::default());
    };
    match JsonFileConfig::new(&path).load() {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::NotFound) => {
            warn!("Config {} not found, using defaults", path.display());
            Ok(DashboardConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("loading {}", path.display())),
    }
}

// ── Live workflow ─────────────────────────────────────────────

fn watch(
    view: View,
    cfg: &DashboardConfig,
    flash: &[String],
    refresh_now: bool,
    ticks: Option<u64>,
) -> Result<()> {
    let http = ReqwestHttp::new(&cfg.base_url, cfg.session_cookie.as_deref())?;
    let control = (view == View::Weather)
        .then(|| ConsoleRefreshControl::new(cfg.refresh_idle_label.clone()));

    let mut service = DashboardService::for_view(
        view,
        cfg,
        DashboardPorts {
            http,
            sink: LogNotificationSink::new(),
            control,
            reloader: LogReloader::new(),
        },
    )?;
    for message in flash {
        service.seed_flash(message.clone(), Severity::Info);
    }

    info!(
        "Watching {} view at {} (schedules: {:?})",
        view,
        cfg.base_url,
        service.schedules()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    // Unbounded run queue: any number of stalled requests may wake at once.
    let executor: LocalExecutor<'_> = LocalExecutor::new();

    if refresh_now {
        match service.trigger_refresh() {
            Some(cmd) => service.spawn(&executor, cmd),
            None => warn!("--refresh-now ignored: {} view has no refresh control", view),
        }
    }

    runtime.block_on(executor.run(tick_loop(
        &executor,
        &mut service,
        cfg.tick_interval_ms,
        ticks,
    )));

    service.notifications().dismiss_all();
    info!(
        "Stopped after {} ticks ({} reloads requested)",
        service.tick_count(),
        service.reloader().reload_count()
    );
    Ok(())
}

async fn tick_loop(
    executor: &LocalExecutor<'_>,
    service: &mut CliService,
    tick_interval_ms: u32,
    max_ticks: Option<u64>,
) {
    let mut interval = tokio::time::interval(Duration::from_millis(u64::from(tick_interval_ms)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately.
    interval.tick().await;

    while max_ticks.is_none_or(|max| service.tick_count() < max) {
        interval.tick().await;
        for cmd in service.tick() {
            service.spawn(executor, cmd);
        }
    }
}
