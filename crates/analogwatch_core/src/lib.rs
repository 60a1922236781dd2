//! Core of the analog watch face.
//!
//! The host runtime drives a [`WatchApp`] through lifecycle callbacks; the app
//! forwards time, ambient and badge updates to the [`ViewController`] and turns
//! icon taps into launch requests through the [`LaunchDispatcher`].

pub mod config;
pub mod headless;
pub mod launch;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod platform;
pub mod view;

pub use config::{ConfigError, WatchConfig};
pub use launch::{
    app_id_for, on_launch_result, LaunchDispatcher, LaunchError, APP_ID_CALL, APP_ID_MESSAGES,
};
pub use lifecycle::badge::{route_badge, AppIdMatch};
pub use lifecycle::{AppControl, WatchApp};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::badge::{BadgeAction, BadgeChangeEvent, IconId};
pub use model::time::{TimeError, WallClockTime};
pub use platform::{
    AppHost, BadgeService, DisplayBackend, LaunchOutcome, LaunchRequest, LaunchService,
    MessageId, MessagePayload, PlatformError, SystemEvent, WatchLayout, WatchTime, WatchWindow,
};
pub use view::{IconTapListener, ViewController, ViewError, ViewPhase, ViewSetup};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
