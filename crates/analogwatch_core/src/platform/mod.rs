//! Host platform seams consumed by the watch face.
//!
//! # Responsibility
//! - Describe the application host, badge subsystem, renderer and launcher
//!   as traits so core logic never touches platform handles directly.
//!
//! # Invariants
//! - Every callback from the host runs on one event loop; implementations do
//!   not need to be `Send` or `Sync`.
//! - Host-owned handles are only borrowed for the duration of a call.

use crate::model::time::WallClockTime;
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod display;
pub mod launch;

pub use display::{
    DisplayBackend, LayoutSpec, MessageId, MessagePayload, WatchLayout, WatchWindow,
    WindowOptions,
};
pub use launch::{LaunchOutcome, LaunchRequest, LaunchResultCallback, LaunchService};

/// Failed host API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// Host operation that failed, e.g. `badge_register_changed_cb`.
    pub operation: &'static str,
    /// Host error code as reported.
    pub code: i32,
}

impl PlatformError {
    pub fn new(operation: &'static str, code: i32) -> Self {
        Self { operation, code }
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed with code {}", self.operation, self.code)
    }
}

impl Error for PlatformError {}

/// System notifications the watch face subscribes to on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemEvent {
    LanguageChanged,
    RegionFormatChanged,
    LowBattery,
    LowMemory,
    DeviceOrientationChanged,
}

impl SystemEvent {
    /// Subscription order used during create.
    pub const ALL: [SystemEvent; 5] = [
        SystemEvent::LanguageChanged,
        SystemEvent::RegionFormatChanged,
        SystemEvent::LowBattery,
        SystemEvent::LowMemory,
        SystemEvent::DeviceOrientationChanged,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::LanguageChanged => "language_changed",
            Self::RegionFormatChanged => "region_format_changed",
            Self::LowBattery => "low_battery",
            Self::LowMemory => "low_memory",
            Self::DeviceOrientationChanged => "device_orientation_changed",
        }
    }
}

/// Application lifecycle host.
pub trait AppHost {
    /// Subscribes the application to one system notification.
    fn add_event_handler(&mut self, event: SystemEvent) -> Result<(), PlatformError>;

    /// Current UI language (e.g. `en_US.UTF-8`), if the setting is readable.
    fn locale_language(&self) -> Option<String>;

    /// Read-only resource directory of the installed package.
    fn resource_dir(&self) -> Option<PathBuf>;

    /// Asks the host to leave the main loop.
    fn exit(&mut self);
}

/// Badge-change subscription.
///
/// The host delivers changes by calling back into the lifecycle adapter while
/// a subscription is active.
pub trait BadgeService {
    fn register_changed(&mut self) -> Result<(), PlatformError>;
    fn unregister_changed(&mut self) -> Result<(), PlatformError>;
}

/// Opaque time handle handed over by a tick callback.
pub trait WatchTime {
    /// Reads the current 24-hour time out of the handle.
    fn current_time(&self) -> Result<WallClockTime, PlatformError>;
}

impl WatchTime for WallClockTime {
    fn current_time(&self) -> Result<WallClockTime, PlatformError> {
        Ok(*self)
    }
}

impl WatchTime for NaiveTime {
    fn current_time(&self) -> Result<WallClockTime, PlatformError> {
        Ok(WallClockTime::from_timelike(self))
    }
}

impl WatchTime for NaiveDateTime {
    fn current_time(&self) -> Result<WallClockTime, PlatformError> {
        Ok(WallClockTime::from_timelike(self))
    }
}

impl<Tz: TimeZone> WatchTime for DateTime<Tz> {
    fn current_time(&self) -> Result<WallClockTime, PlatformError> {
        Ok(WallClockTime::from_timelike(self))
    }
}
