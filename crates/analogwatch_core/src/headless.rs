//! In-process host and renderer that record instead of drawing.
//!
//! # Responsibility
//! - Provide working `AppHost`, `DisplayBackend`, `BadgeService` and
//!   `LaunchService` implementations for simulation and tests.
//! - Append every observable host interaction to one shared [`Journal`].
//!
//! # Invariants
//! - Windows, layouts and launch requests append a release entry when dropped.
//! - Launch results are only delivered by [`PendingLaunches::complete_next`],
//!   never from inside `send_launch_request`.

use crate::platform::{
    AppHost, BadgeService, DisplayBackend, LaunchOutcome, LaunchRequest, LaunchResultCallback,
    LaunchService, LayoutSpec, MessageId, MessagePayload, PlatformError, SystemEvent, WatchLayout,
    WatchWindow, WindowOptions,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::rc::Rc;

/// One recorded host interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    WindowCreated(WindowOptions),
    WindowShown,
    WindowReleased,
    LayoutCreated(LayoutSpec),
    LayoutReleased,
    SignalRoute { emission: String, source: String },
    Message { id: MessageId, payload: MessagePayload },
    Signal { signal: String, part: String },
    LanguageSet(String),
    EventHandlerAdded(SystemEvent),
    ExitRequested,
    BadgeRegistered,
    BadgeUnregistered,
    LaunchRequestCreated,
    LaunchTargetSet(String),
    LaunchSent(String),
    LaunchRequestReleased,
}

impl Display for JournalEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowCreated(options) => write!(
                f,
                "window created title={} size={}x{}",
                options.title, options.width, options.height
            ),
            Self::WindowShown => write!(f, "window shown"),
            Self::WindowReleased => write!(f, "window released"),
            Self::LayoutCreated(spec) => write!(
                f,
                "layout created file={} group={}",
                spec.file.display(),
                spec.group
            ),
            Self::LayoutReleased => write!(f, "layout released"),
            Self::SignalRoute { emission, source } => {
                write!(f, "route {emission} on {source}")
            }
            Self::Message { id, payload } => match payload {
                MessagePayload::Int(value) => write!(f, "message id={} int={value}", id.code()),
                MessagePayload::IntSet(values) => {
                    write!(f, "message id={} int_set={values:?}", id.code())
                }
            },
            Self::Signal { signal, part } => write!(f, "signal {signal} part={part}"),
            Self::LanguageSet(locale) => write!(f, "language set {locale}"),
            Self::EventHandlerAdded(event) => write!(f, "event handler {}", event.label()),
            Self::ExitRequested => write!(f, "exit requested"),
            Self::BadgeRegistered => write!(f, "badge subscriber registered"),
            Self::BadgeUnregistered => write!(f, "badge subscriber unregistered"),
            Self::LaunchRequestCreated => write!(f, "launch request created"),
            Self::LaunchTargetSet(app_id) => write!(f, "launch target {app_id}"),
            Self::LaunchSent(app_id) => write!(f, "launch sent {app_id}"),
            Self::LaunchRequestReleased => write!(f, "launch request released"),
        }
    }
}

/// Shared, append-only record of host interactions.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<JournalEntry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: JournalEntry) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.borrow().clone()
    }

    /// Layout messages in send order.
    pub fn messages(&self) -> Vec<(MessageId, MessagePayload)> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                JournalEntry::Message { id, payload } => Some((*id, payload.clone())),
                _ => None,
            })
            .collect()
    }

    /// Emitted layout signals as `(signal, part)`.
    pub fn signals(&self) -> Vec<(String, String)> {
        self.entries
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                JournalEntry::Signal { signal, part } => Some((signal.clone(), part.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, expected: &JournalEntry) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| *entry == expected)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Renderer that records windows, layouts, messages and signals.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDisplay {
    journal: Journal,
    fail_window: bool,
    fail_layout: bool,
}

impl HeadlessDisplay {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    /// Makes every window creation fail.
    pub fn failing_window(mut self) -> Self {
        self.fail_window = true;
        self
    }

    /// Makes every layout creation fail.
    pub fn failing_layout(mut self) -> Self {
        self.fail_layout = true;
        self
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}

#[derive(Debug)]
pub struct HeadlessWindow {
    journal: Journal,
}

impl WatchWindow for HeadlessWindow {
    fn show(&mut self) {
        self.journal.record(JournalEntry::WindowShown);
    }
}

impl Drop for HeadlessWindow {
    fn drop(&mut self) {
        self.journal.record(JournalEntry::WindowReleased);
    }
}

#[derive(Debug)]
pub struct HeadlessLayout {
    journal: Journal,
}

impl WatchLayout for HeadlessLayout {
    fn add_signal_route(&mut self, emission: &str, source: &str) {
        self.journal.record(JournalEntry::SignalRoute {
            emission: emission.to_string(),
            source: source.to_string(),
        });
    }

    fn send_message(&mut self, id: MessageId, payload: MessagePayload) {
        self.journal.record(JournalEntry::Message { id, payload });
    }

    fn emit_signal(&mut self, signal: &str, part: &str) {
        self.journal.record(JournalEntry::Signal {
            signal: signal.to_string(),
            part: part.to_string(),
        });
    }
}

impl Drop for HeadlessLayout {
    fn drop(&mut self) {
        self.journal.record(JournalEntry::LayoutReleased);
    }
}

impl DisplayBackend for HeadlessDisplay {
    type Window = HeadlessWindow;
    type Layout = HeadlessLayout;

    fn create_window(&mut self, options: &WindowOptions) -> Result<HeadlessWindow, PlatformError> {
        if self.fail_window {
            return Err(PlatformError::new("watch_app_get_elm_win", -1));
        }
        self.journal
            .record(JournalEntry::WindowCreated(options.clone()));
        Ok(HeadlessWindow {
            journal: self.journal.clone(),
        })
    }

    fn create_layout(
        &mut self,
        _window: &mut HeadlessWindow,
        spec: &LayoutSpec,
    ) -> Result<HeadlessLayout, PlatformError> {
        if self.fail_layout {
            return Err(PlatformError::new("elm_layout_file_set", -1));
        }
        self.journal.record(JournalEntry::LayoutCreated(spec.clone()));
        Ok(HeadlessLayout {
            journal: self.journal.clone(),
        })
    }

    fn set_language(&mut self, locale: &str) {
        self.journal
            .record(JournalEntry::LanguageSet(locale.to_string()));
    }
}

/// Application host with a fixed locale and resource directory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    journal: Journal,
    locale: Option<String>,
    resource_dir: Option<PathBuf>,
    rejected_events: Vec<SystemEvent>,
    exit_requested: bool,
}

impl HeadlessHost {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = Some(dir.into());
        self
    }

    /// Makes subscribing to `event` fail.
    pub fn rejecting(mut self, event: SystemEvent) -> Self {
        self.rejected_events.push(event);
        self
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

impl AppHost for HeadlessHost {
    fn add_event_handler(&mut self, event: SystemEvent) -> Result<(), PlatformError> {
        if self.rejected_events.contains(&event) {
            return Err(PlatformError::new("watch_app_add_event_handler", -22));
        }
        self.journal.record(JournalEntry::EventHandlerAdded(event));
        Ok(())
    }

    fn locale_language(&self) -> Option<String> {
        self.locale.clone()
    }

    fn resource_dir(&self) -> Option<PathBuf> {
        self.resource_dir.clone()
    }

    fn exit(&mut self) {
        self.exit_requested = true;
        self.journal.record(JournalEntry::ExitRequested);
    }
}

/// Badge subsystem stub tracking the subscription.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBadges {
    journal: Journal,
    fail_register: bool,
    registered: bool,
}

impl HeadlessBadges {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn failing_register(mut self) -> Self {
        self.fail_register = true;
        self
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

impl BadgeService for HeadlessBadges {
    fn register_changed(&mut self) -> Result<(), PlatformError> {
        if self.fail_register {
            return Err(PlatformError::new("badge_register_changed_cb", -13));
        }
        self.registered = true;
        self.journal.record(JournalEntry::BadgeRegistered);
        Ok(())
    }

    fn unregister_changed(&mut self) -> Result<(), PlatformError> {
        self.registered = false;
        self.journal.record(JournalEntry::BadgeUnregistered);
        Ok(())
    }
}

/// Launch requests waiting for their asynchronous result.
#[derive(Clone, Default)]
pub struct PendingLaunches {
    queue: Rc<RefCell<VecDeque<(String, LaunchResultCallback)>>>,
}

impl PendingLaunches {
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Delivers `outcome` to the oldest pending request, returning its app id.
    pub fn complete_next(&self, outcome: LaunchOutcome) -> Option<String> {
        // Release the queue borrow before running the callback.
        let (app_id, on_result) = self.queue.borrow_mut().pop_front()?;
        on_result(outcome);
        Some(app_id)
    }
}

/// Launcher that queues results for later delivery.
#[derive(Clone, Default)]
pub struct HeadlessLauncher {
    journal: Journal,
    pending: PendingLaunches,
    fail_create: bool,
    fail_send: bool,
}

impl HeadlessLauncher {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    /// Handle to the result queue that stays valid after the launcher moves.
    pub fn pending(&self) -> PendingLaunches {
        self.pending.clone()
    }
}

#[derive(Debug)]
pub struct HeadlessLaunchRequest {
    journal: Journal,
    app_id: Option<String>,
}

impl LaunchRequest for HeadlessLaunchRequest {
    fn set_app_id(&mut self, app_id: &str) -> Result<(), PlatformError> {
        if app_id.is_empty() {
            return Err(PlatformError::new("app_control_set_app_id", -22));
        }
        self.app_id = Some(app_id.to_string());
        self.journal
            .record(JournalEntry::LaunchTargetSet(app_id.to_string()));
        Ok(())
    }
}

impl Drop for HeadlessLaunchRequest {
    fn drop(&mut self) {
        self.journal.record(JournalEntry::LaunchRequestReleased);
    }
}

impl LaunchService for HeadlessLauncher {
    type Request = HeadlessLaunchRequest;

    fn create_request(&mut self) -> Result<HeadlessLaunchRequest, PlatformError> {
        if self.fail_create {
            return Err(PlatformError::new("app_control_create", -12));
        }
        self.journal.record(JournalEntry::LaunchRequestCreated);
        Ok(HeadlessLaunchRequest {
            journal: self.journal.clone(),
            app_id: None,
        })
    }

    fn send_launch_request(
        &mut self,
        request: &HeadlessLaunchRequest,
        on_result: LaunchResultCallback,
    ) -> Result<(), PlatformError> {
        let Some(app_id) = request.app_id.clone() else {
            return Err(PlatformError::new("app_control_send_launch_request", -22));
        };
        if self.fail_send {
            return Err(PlatformError::new("app_control_send_launch_request", -1));
        }
        self.journal.record(JournalEntry::LaunchSent(app_id.clone()));
        self.pending.queue.borrow_mut().push_back((app_id, on_result));
        Ok(())
    }
}
