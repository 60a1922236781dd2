//! View controller and the layout resource contract.
//!
//! # Responsibility
//! - Own the watch window, its layout and the displayed badge counters.
//! - Translate time, ambient and badge updates into layout messages.
//! - Turn press/release emissions into visual feedback and tap notifications.
//!
//! # Invariants
//! - Only the view controller talks to the layout.
//! - Display operations outside the `Created` phase are logged no-ops.

use crate::platform::PlatformError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod controller;
pub mod defines;
pub mod tap;

pub use controller::{ViewController, ViewPhase, ViewSetup};
pub use tap::{IconTapListener, TapSubscription};

/// View construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    WindowUnavailable(PlatformError),
    LayoutUnavailable(PlatformError),
    /// Neither config nor host provided a resource directory.
    ResourcePathUnavailable,
    InvalidPhase(ViewPhase),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowUnavailable(err) => write!(f, "failed to create a window: {err}"),
            Self::LayoutUnavailable(err) => write!(f, "failed to create main layout: {err}"),
            Self::ResourcePathUnavailable => write!(f, "failed to get resource path"),
            Self::InvalidPhase(phase) => write!(f, "view cannot be created in phase {phase:?}"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WindowUnavailable(err) | Self::LayoutUnavailable(err) => Some(err),
            Self::ResourcePathUnavailable | Self::InvalidPhase(_) => None,
        }
    }
}
