//! Per-view schedule registration, flash dismissal and banner expiry.

use std::rc::Rc;

use krishimitra::adapters::config_store::MemoryConfig;
use krishimitra::app::commands::AppCommand;
use krishimitra::app::ports::{ConfigError, ConfigPort};
use krishimitra::app::service::{ALERT_POLL, FLASH_DISMISS, WEATHER_REFRESH};
use krishimitra::{DashboardConfig, DashboardPorts, DashboardService, Severity, View};

use crate::mocks::{
    Event, EventLog, MockHttp, MockReloader, RecordingSink, TestService, build, requests,
    tick_and_run,
};

#[test]
fn dashboard_never_refreshes_weather() {
    let (mut service, log) = build(View::Dashboard, &DashboardConfig::default());
    assert_eq!(service.schedules(), vec![ALERT_POLL, FLASH_DISMISS]);

    let fired = tick_and_run(&mut service, 900);

    assert!(!fired.contains(&AppCommand::RefreshWeather));
    assert!(requests(&log).iter().all(|p| p == "/alerts/upcoming"));
    assert_eq!(requests(&log).len(), 30);
}

#[test]
fn weather_never_polls_alerts() {
    let (mut service, log) = build(View::Weather, &DashboardConfig::default());
    assert_eq!(service.schedules(), vec![WEATHER_REFRESH, FLASH_DISMISS]);

    tick_and_run(&mut service, 900);

    assert!(requests(&log).iter().all(|p| p == "/weather/fetch"));
    assert_eq!(requests(&log).len(), 3);
}

#[test]
fn other_views_only_dismiss_flash() {
    let (mut service, log) = build(View::Other, &DashboardConfig::default());
    assert_eq!(service.schedules(), vec![FLASH_DISMISS]);
    assert_eq!(service.trigger_refresh(), None);

    let fired = tick_and_run(&mut service, 600);

    assert_eq!(fired, vec![AppCommand::DismissFlash]);
    assert!(requests(&log).is_empty());
}

#[test]
fn flash_banners_are_dismissed_after_five_seconds() {
    let (mut service, log) = build(View::Other, &DashboardConfig::default());
    let flash = service.seed_flash("Soil data added successfully!", Severity::Success);

    tick_and_run(&mut service, 2);
    let live = service.show_notification("Saved draft", Severity::Info);

    tick_and_run(&mut service, 2);
    assert_eq!(service.notifications().len(), 2);

    // Tick 5: flash-dismiss fires; the live banner is only 3 s old.
    tick_and_run(&mut service, 1);
    assert_eq!(service.notifications().len(), 1);
    assert_eq!(service.notifications().banners()[0].id, live);
    assert!(log.borrow().contains(&Event::Dismissed(flash)));

    // The live banner expires by TTL at 7 s.
    tick_and_run(&mut service, 2);
    assert!(service.notifications().is_empty());
}

#[test]
fn banners_are_newest_first() {
    let (service, _log) = build(View::Other, &DashboardConfig::default());
    service.show_notification("first", Severity::Info);
    service.show_notification("second", Severity::Error);

    let banners = service.notifications().banners();
    assert_eq!(banners[0].message, "second");
    assert_eq!(banners[1].message, "first");
    assert_eq!(
        banners[0].severity.banner_class(),
        "alert alert-error alert-dismissible fade show"
    );
}

#[test]
fn weather_view_without_control_is_rejected() {
    let log: EventLog = Rc::default();
    let result: Result<TestService, _> = DashboardService::for_view(
        View::Weather,
        &DashboardConfig::default(),
        DashboardPorts {
            http: MockHttp::new(Rc::clone(&log)),
            sink: RecordingSink::new(Rc::clone(&log)),
            control: None,
            reloader: MockReloader::new(Rc::clone(&log)),
        },
    );
    assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
}

#[test]
fn stored_config_drives_the_service() {
    let store = MemoryConfig::new();
    store
        .save(&DashboardConfig {
            alert_poll_interval_secs: 10,
            ..DashboardConfig::default()
        })
        .unwrap();

    let config = store.load().unwrap();
    let (mut service, log) = build(View::Dashboard, &config);
    tick_and_run(&mut service, 30);

    assert_eq!(requests(&log).len(), 3);
}
