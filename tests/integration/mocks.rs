//! Mock port adapters for integration tests.
//!
//! Every mock writes into one shared [`EventLog`], so tests can assert on
//! the relative order of requests, control changes, banners and reloads.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::{Future, poll_fn};
use std::rc::Rc;
use std::task::{Poll, Waker};

use edge_executor::LocalExecutor;
use futures_lite::future::block_on;

use krishimitra::app::commands::AppCommand;
use krishimitra::app::ports::{
    HttpPort, HttpResponse, NotificationSink, RefreshControl, ReloadPort,
};
use krishimitra::error::FetchError;
use krishimitra::{
    DashboardConfig, DashboardPorts, DashboardService, Notification, NotificationId, Severity,
    View,
};

// ── Event log ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Get(String),
    Label(String),
    Enabled(bool),
    Shown(String, Severity),
    Dismissed(NotificationId),
    Reload,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

// ── MockHttp ──────────────────────────────────────────────────

/// Manually opened latch that holds scripted replies back.
///
/// Waiting requests park their wakers; `open` wakes all of them at once.
#[derive(Default)]
pub struct Gate {
    open: Cell<bool>,
    waiters: RefCell<Vec<Waker>>,
}

#[allow(dead_code)]
impl Gate {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn open(&self) {
        self.open.set(true);
        for waker in self.waiters.borrow_mut().drain(..) {
            waker.wake();
        }
    }

    pub fn waiting(&self) -> usize {
        self.waiters.borrow().len()
    }

    async fn wait(&self) {
        poll_fn(|cx| {
            if self.open.get() {
                Poll::Ready(())
            } else {
                self.waiters.borrow_mut().push(cx.waker().clone());
                Poll::Pending
            }
        })
        .await;
    }
}

enum Reply {
    Now(Result<HttpResponse, FetchError>),
    Gated(Rc<Gate>, Result<HttpResponse, FetchError>),
}

/// Answers requests from a script; falls back to `200 ""` when empty.
pub struct MockHttp {
    log: EventLog,
    replies: RefCell<VecDeque<Reply>>,
}

#[allow(dead_code)]
impl MockHttp {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            replies: RefCell::new(VecDeque::new()),
        }
    }

    pub fn reply(&self, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Now(Ok(HttpResponse::new(status, body))));
    }

    pub fn fail(&self, msg: &str) {
        self.replies
            .borrow_mut()
            .push_back(Reply::Now(Err(FetchError::Transport(msg.to_owned()))));
    }

    /// Reply with `status` only once the returned gate is opened.
    pub fn reply_gated(&self, status: u16) -> Rc<Gate> {
        let gate = Gate::new();
        self.replies.borrow_mut().push_back(Reply::Gated(
            Rc::clone(&gate),
            Ok(HttpResponse::new(status, "")),
        ));
        gate
    }

    /// Reply with `status` and `body` once `gate` is opened.
    pub fn reply_behind(&self, gate: &Rc<Gate>, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Reply::Gated(
            Rc::clone(gate),
            Ok(HttpResponse::new(status, body)),
        ));
    }
}

impl HttpPort for MockHttp {
    fn get(&self, path: &str) -> impl Future<Output = Result<HttpResponse, FetchError>> {
        self.log.borrow_mut().push(Event::Get(path.to_owned()));
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or(Reply::Now(Ok(HttpResponse::new(200, ""))));
        async move {
            match reply {
                Reply::Now(result) => result,
                Reply::Gated(gate, result) => {
                    gate.wait().await;
                    result
                }
            }
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    log: EventLog,
}

impl RecordingSink {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl NotificationSink for RecordingSink {
    fn show(&self, n: &Notification) {
        self.log
            .borrow_mut()
            .push(Event::Shown(n.message.clone(), n.severity));
    }

    fn dismiss(&self, id: NotificationId) {
        self.log.borrow_mut().push(Event::Dismissed(id));
    }
}

// ── MockControl ───────────────────────────────────────────────

pub struct MockControl {
    log: EventLog,
    pub label: RefCell<String>,
    pub enabled: Cell<bool>,
}

impl RefreshControl for MockControl {
    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_owned();
        self.log.borrow_mut().push(Event::Label(label.to_owned()));
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        self.log.borrow_mut().push(Event::Enabled(enabled));
    }
}

// ── MockReloader ──────────────────────────────────────────────

pub struct MockReloader {
    log: EventLog,
    pub count: Cell<u32>,
}

impl MockReloader {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            count: Cell::new(0),
        }
    }
}

impl ReloadPort for MockReloader {
    fn reload(&self) {
        self.count.set(self.count.get() + 1);
        self.log.borrow_mut().push(Event::Reload);
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestService = DashboardService<MockHttp, RecordingSink, MockControl, MockReloader>;

/// Build a service for `view`; the weather view gets a control.
pub fn build(view: View, config: &DashboardConfig) -> (TestService, EventLog) {
    let log: EventLog = Rc::default();
    let control = (view == View::Weather).then(|| MockControl {
        log: Rc::clone(&log),
        label: RefCell::new(config.refresh_idle_label.clone()),
        enabled: Cell::new(true),
    });
    let service = DashboardService::for_view(
        view,
        config,
        DashboardPorts {
            http: MockHttp::new(Rc::clone(&log)),
            sink: RecordingSink::new(Rc::clone(&log)),
            control,
            reloader: MockReloader::new(Rc::clone(&log)),
        },
    )
    .expect("valid test service");
    (service, log)
}

/// Spawn every command and run them all to completion.
#[allow(dead_code)]
pub fn run_commands(service: &TestService, commands: &[AppCommand]) {
    let executor: LocalExecutor<'_, 16> = LocalExecutor::new();
    let tasks: Vec<_> = commands
        .iter()
        .map(|cmd| executor.spawn(service.task(*cmd)))
        .collect();
    block_on(executor.run(async {
        for task in tasks {
            task.await;
        }
    }));
}

/// Yield to the executor until `done` holds, for at most `max_yields` turns.
#[allow(dead_code)]
pub async fn yield_until(max_yields: u32, done: impl Fn() -> bool) {
    for _ in 0..max_yields {
        if done() {
            return;
        }
        futures_lite::future::yield_now().await;
    }
    assert!(done(), "condition not reached after {max_yields} yields");
}

/// Tick `n` times, running whatever fires after each tick.
#[allow(dead_code)]
pub fn tick_and_run(service: &mut TestService, n: u32) -> Vec<AppCommand> {
    let mut fired = Vec::new();
    for _ in 0..n {
        let cmds = service.tick();
        run_commands(service, &cmds);
        fired.extend(cmds);
    }
    fired
}

/// Events of one kind, in order.
#[allow(dead_code)]
pub fn shown(log: &EventLog) -> Vec<(String, Severity)> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Shown(m, s) => Some((m.clone(), *s)),
            _ => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn requests(log: &EventLog) -> Vec<String> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Get(p) => Some(p.clone()),
            _ => None,
        })
        .collect()
}
