//! Lifecycle adapter between the application host and the view.
//!
//! # Responsibility
//! - Receive host lifecycle, tick, ambient, badge and system callbacks.
//! - Forward each one to a single view or dispatcher operation after trivial
//!   shaping (time extraction, badge routing).
//!
//! # Invariants
//! - Host handles (time handles, app control requests) are only borrowed.
//! - No error leaves a lifecycle callback; failures are logged.
//! - At most one badge subscription is active at a time.

pub mod badge;

use crate::config::WatchConfig;
use crate::launch::LaunchDispatcher;
use crate::model::badge::BadgeChangeEvent;
use crate::platform::{AppHost, BadgeService, DisplayBackend, LaunchService, SystemEvent, WatchTime};
use crate::view::{IconTapListener, ViewController, ViewSetup};
use badge::route_badge;
use log::{debug, error, info, trace, warn};

/// Launch request delivered to a running application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppControl {
    pub operation: Option<String>,
    pub caller: Option<String>,
}

/// Watch-face application context threaded through every host callback.
pub struct WatchApp<H, D, B>
where
    H: AppHost,
    D: DisplayBackend,
    B: BadgeService,
{
    config: WatchConfig,
    host: H,
    display: D,
    badges: B,
    view: ViewController<D>,
    tap_listener: Option<Box<dyn IconTapListener>>,
    badge_subscribed: bool,
}

impl<H, D, B> WatchApp<H, D, B>
where
    H: AppHost,
    D: DisplayBackend,
    B: BadgeService,
{
    /// Wires the host services; nothing is created until [`Self::on_create`].
    pub fn new<L>(config: WatchConfig, host: H, display: D, badges: B, launcher: L) -> Self
    where
        L: LaunchService + 'static,
    {
        Self {
            config,
            host,
            display,
            badges,
            view: ViewController::new(),
            tap_listener: Some(Box::new(LaunchDispatcher::new(launcher))),
            badge_subscribed: false,
        }
    }

    /// Builds the UI and subscriptions. Always reports success to the host;
    /// a view that failed to build stays inert.
    pub fn on_create(&mut self, width: i32, height: i32) -> bool {
        info!(
            "event=app_create module=lifecycle status=start width={} height={}",
            width, height
        );

        for event in SystemEvent::ALL {
            if let Err(err) = self.host.add_event_handler(event) {
                error!(
                    "event=app_create module=lifecycle status=error stage=event_handler system_event={} error={}",
                    event.label(),
                    err
                );
            }
        }

        let setup = ViewSetup {
            title: self.config.package.clone(),
            resource_dir: self
                .config
                .resource_dir
                .clone()
                .or_else(|| self.host.resource_dir()),
        };
        if let Err(err) = self
            .view
            .create_view(&mut self.display, &setup, width, height)
        {
            warn!(
                "event=app_create module=lifecycle status=degraded reason=view_unavailable error={}",
                err
            );
        }

        self.subscribe_badges();

        if let Some(listener) = self.tap_listener.take() {
            self.view.register_icon_tap_callback(listener);
        }

        info!("event=app_create module=lifecycle status=ok");
        true
    }

    /// Drops the badge subscription and releases the view.
    pub fn on_terminate(&mut self) {
        if self.badge_subscribed {
            if let Err(err) = self.badges.unregister_changed() {
                error!(
                    "event=app_terminate module=lifecycle status=error stage=badge_unregister error={}",
                    err
                );
            }
            self.badge_subscribed = false;
        }
        self.view.destroy_view();
        info!("event=app_terminate module=lifecycle status=ok");
    }

    pub fn on_pause(&mut self) {
        debug!("event=app_pause module=lifecycle status=ok");
    }

    pub fn on_resume(&mut self) {
        debug!("event=app_resume module=lifecycle status=ok");
    }

    pub fn on_app_control(&mut self, request: &AppControl) {
        debug!(
            "event=app_control module=lifecycle status=ignored operation={} caller={}",
            request.operation.as_deref().unwrap_or("none"),
            request.caller.as_deref().unwrap_or("none")
        );
    }

    /// Per-second tick while the face is visible and not ambient.
    pub fn on_time_tick(&mut self, watch_time: &impl WatchTime) {
        match watch_time.current_time() {
            Ok(time) => self.view.set_display_time(time),
            Err(err) => error!(
                "event=time_tick module=lifecycle status=error reason=time_unavailable error={}",
                err
            ),
        }
    }

    /// Per-minute tick in ambient mode; identical to a regular tick.
    pub fn on_ambient_tick(&mut self, watch_time: &impl WatchTime) {
        self.on_time_tick(watch_time);
    }

    pub fn on_ambient_changed(&mut self, ambient: bool) {
        self.view.toggle_ambient_mode(ambient);
    }

    /// Routes a badge notification to the matching counter; other apps are
    /// ignored.
    pub fn on_badge_changed(&mut self, event: &BadgeChangeEvent) {
        match route_badge(&event.source_app_id, self.config.badge_match) {
            Some(icon) => self.view.set_badge(icon, event.count),
            None => trace!(
                "event=badge_changed module=lifecycle status=skip app_id={}",
                event.source_app_id
            ),
        }
    }

    /// Raw badge callback from the host. Calls without an application id are
    /// dropped; counts above `i32::MAX` saturate.
    pub fn on_badge_changed_raw(&mut self, action: u32, app_id: Option<&str>, count: u32) {
        match BadgeChangeEvent::from_host(action, app_id, count) {
            Some(event) => self.on_badge_changed(&event),
            None => debug!(
                "event=badge_changed module=lifecycle status=skip reason=missing_app_id action={}",
                action
            ),
        }
    }

    /// Handles one subscribed system notification.
    pub fn on_system_event(&mut self, event: SystemEvent) {
        match event {
            SystemEvent::LanguageChanged => match self.host.locale_language() {
                Some(locale) => {
                    self.display.set_language(&locale);
                    info!(
                        "event=language_changed module=lifecycle status=ok locale={}",
                        locale
                    );
                }
                None => warn!(
                    "event=language_changed module=lifecycle status=skip reason=locale_unavailable"
                ),
            },
            SystemEvent::LowBattery | SystemEvent::LowMemory => {
                warn!(
                    "event=app_exit module=lifecycle status=requested reason={}",
                    event.label()
                );
                self.host.exit();
            }
            SystemEvent::RegionFormatChanged | SystemEvent::DeviceOrientationChanged => {
                debug!(
                    "event=system_event module=lifecycle status=ignored system_event={}",
                    event.label()
                );
            }
        }
    }

    /// Emission raised by one of the routed layout parts.
    pub fn on_signal(&mut self, emission: &str, source: &str) {
        self.view.handle_signal(emission, source);
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewController<D> {
        &self.view
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn badges(&self) -> &B {
        &self.badges
    }

    pub fn is_badge_subscribed(&self) -> bool {
        self.badge_subscribed
    }

    fn subscribe_badges(&mut self) {
        if self.badge_subscribed {
            return;
        }
        match self.badges.register_changed() {
            Ok(()) => self.badge_subscribed = true,
            Err(err) => error!(
                "event=app_create module=lifecycle status=error stage=badge_register error={}",
                err
            ),
        }
    }
}
