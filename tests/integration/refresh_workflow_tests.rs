//! Weather refresh workflow: control state, banners and reload ordering.

use edge_executor::LocalExecutor;
use futures_lite::future::block_on;

use krishimitra::app::commands::AppCommand;
use krishimitra::app::weather::{ERROR_MESSAGE, FAILED_MESSAGE, UPDATED_MESSAGE};
use krishimitra::{DashboardConfig, Severity, View};

use crate::mocks::{Event, build, requests, run_commands, shown, tick_and_run, yield_until};

fn idle_restores(log: &[Event]) -> usize {
    log.iter().filter(|e| **e == Event::Enabled(true)).count()
}

#[test]
fn success_shows_banner_then_reloads() {
    let (service, log) = build(View::Weather, &DashboardConfig::default());
    service.http().reply(200, "<html>weather</html>");

    run_commands(&service, &[AppCommand::RefreshWeather]);

    assert_eq!(
        *log.borrow(),
        vec![
            Event::Enabled(false),
            Event::Label("Refreshing...".into()),
            Event::Get("/weather/fetch".into()),
            Event::Shown(UPDATED_MESSAGE.into(), Severity::Success),
            Event::Reload,
            Event::Label("Refresh".into()),
            Event::Enabled(true),
        ]
    );
}

#[test]
fn non_success_status_shows_failure_without_reload() {
    let (service, log) = build(View::Weather, &DashboardConfig::default());
    service.http().reply(503, "maintenance");

    run_commands(&service, &[AppCommand::RefreshWeather]);

    assert_eq!(
        shown(&log),
        vec![(FAILED_MESSAGE.to_owned(), Severity::Error)]
    );
    assert_eq!(service.reloader().count.get(), 0);
    assert_eq!(idle_restores(&log.borrow()), 1);
    assert_eq!(*service.control().unwrap().label.borrow(), "Refresh");
}

#[test]
fn transport_failure_shows_error_without_reload() {
    let (service, log) = build(View::Weather, &DashboardConfig::default());
    service.http().fail("connection refused");

    run_commands(&service, &[AppCommand::RefreshWeather]);

    assert_eq!(shown(&log), vec![(ERROR_MESSAGE.to_owned(), Severity::Error)]);
    assert!(!log.borrow().contains(&Event::Reload));
    let control = service.control().unwrap();
    assert!(control.enabled.get());
    assert_eq!(*control.label.borrow(), "Refresh");
}

#[test]
fn idle_is_restored_exactly_once_per_refresh() {
    let (service, log) = build(View::Weather, &DashboardConfig::default());
    service.http().reply(200, "");
    service.http().reply(500, "");
    service.http().fail("dns");

    for _ in 0..3 {
        run_commands(&service, &[AppCommand::RefreshWeather]);
    }

    assert_eq!(idle_restores(&log.borrow()), 3);
    assert_eq!(
        log.borrow()
            .iter()
            .filter(|e| **e == Event::Enabled(false))
            .count(),
        3
    );
}

#[test]
fn overlapping_refreshes_each_restore_idle() {
    let (service, log) = build(View::Weather, &DashboardConfig::default());
    let first = service.http().reply_gated(200);
    let second = service.http().reply_gated(500);

    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();
    let a = executor.spawn(service.task(AppCommand::RefreshWeather));
    let b = executor.spawn(service.task(AppCommand::RefreshWeather));

    block_on(executor.run(async {
        yield_until(16, || first.waiting() == 1 && second.waiting() == 1).await;
        // Both requests are in flight.
        assert_eq!(requests(&log).len(), 2);
        assert!(!service.control().unwrap().enabled.get());

        first.open();
        a.await;
        // The first completion re-enables the control although the second
        // request is still pending.
        assert!(service.control().unwrap().enabled.get());
        assert_eq!(idle_restores(&log.borrow()), 1);

        second.open();
        b.await;
    }));

    assert_eq!(idle_restores(&log.borrow()), 2);
    assert_eq!(
        shown(&log),
        vec![
            (UPDATED_MESSAGE.to_owned(), Severity::Success),
            (FAILED_MESSAGE.to_owned(), Severity::Error),
        ]
    );
    assert_eq!(service.reloader().count.get(), 1);
}

#[test]
fn timer_refreshes_every_five_minutes() {
    let (mut service, log) = build(View::Weather, &DashboardConfig::default());

    let fired = tick_and_run(&mut service, 299);
    assert!(!fired.contains(&AppCommand::RefreshWeather));
    assert!(requests(&log).is_empty());

    tick_and_run(&mut service, 1);
    assert_eq!(requests(&log), vec!["/weather/fetch".to_owned()]);

    tick_and_run(&mut service, 300);
    assert_eq!(requests(&log).len(), 2);
}

#[test]
fn manual_trigger_uses_the_same_workflow() {
    let (service, log) = build(View::Weather, &DashboardConfig::default());
    let cmd = service.trigger_refresh().expect("weather view has a control");
    service.http().reply(200, "");

    run_commands(&service, &[cmd]);

    assert_eq!(requests(&log), vec!["/weather/fetch".to_owned()]);
    assert_eq!(service.reloader().count.get(), 1);
}

#[test]
fn configured_labels_and_path_are_used() {
    let config = DashboardConfig {
        weather_fetch_path: "/api/weather/fetch".into(),
        refresh_idle_label: "Update".into(),
        refresh_busy_label: "Updating\u{2026}".into(),
        ..DashboardConfig::default()
    };
    let (service, log) = build(View::Weather, &config);

    run_commands(&service, &[AppCommand::RefreshWeather]);

    let log = log.borrow();
    assert!(log.contains(&Event::Label("Updating\u{2026}".into())));
    assert!(log.contains(&Event::Get("/api/weather/fetch".into())));
    assert_eq!(log.last(), Some(&Event::Enabled(true)));
    assert!(log.contains(&Event::Label("Update".into())));
}
