//! Icon tap to application launch.
//!
//! # Responsibility
//! - Resolve a tapped icon to its companion application id.
//! - Issue one fire-and-forget launch request and log the asynchronous result.
//!
//! # Invariants
//! - The host request object never outlives `dispatch`; it is released on
//!   every exit path.
//! - No retry: a failed launch needs another tap.

use crate::model::badge::IconId;
use crate::platform::{LaunchOutcome, LaunchRequest, LaunchService, PlatformError};
use crate::view::IconTapListener;
use log::{error, info, log, warn, Level};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dialer / call history application.
pub const APP_ID_CALL: &str = "com.samsung.call";
/// Messaging application.
pub const APP_ID_MESSAGES: &str = "com.samsung.message";

/// Companion application opened by tapping `icon`.
pub fn app_id_for(icon: IconId) -> &'static str {
    match icon {
        IconId::MissedCalls => APP_ID_CALL,
        IconId::UnreadMessages => APP_ID_MESSAGES,
    }
}

/// Launch dispatch failure. Already logged when returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    UnknownIcon(i32),
    RequestCreation(PlatformError),
    TargetRejected {
        app_id: &'static str,
        source: PlatformError,
    },
    SendFailed {
        app_id: &'static str,
        source: PlatformError,
    },
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIcon(raw) => write!(f, "unknown id of the tapped icon: {raw}"),
            Self::RequestCreation(err) => write!(f, "launch request creation failed: {err}"),
            Self::TargetRejected { app_id, source } => {
                write!(f, "launch target `{app_id}` rejected: {source}")
            }
            Self::SendFailed { app_id, source } => {
                write!(f, "launch request for `{app_id}` not sent: {source}")
            }
        }
    }
}

impl Error for LaunchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnknownIcon(_) => None,
            Self::RequestCreation(err) => Some(err),
            Self::TargetRejected { source, .. } | Self::SendFailed { source, .. } => Some(source),
        }
    }
}

/// Turns icon taps into launch requests on `L`.
pub struct LaunchDispatcher<L: LaunchService> {
    launcher: L,
}

impl<L: LaunchService> LaunchDispatcher<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    /// Sends a launch request for the application behind `icon`.
    ///
    /// Returns once the request is submitted; the outcome is logged by
    /// [`on_launch_result`] when the host reports it.
    pub fn dispatch(&mut self, icon: IconId) -> Result<(), LaunchError> {
        let app_id = app_id_for(icon);

        let mut request = self.launcher.create_request().map_err(|err| {
            error!(
                "event=app_launch module=launch status=error stage=create_request icon={} error={}",
                icon, err
            );
            LaunchError::RequestCreation(err)
        })?;

        request.set_app_id(app_id).map_err(|err| {
            error!(
                "event=app_launch module=launch status=error stage=set_app_id app_id={} error={}",
                app_id, err
            );
            LaunchError::TargetRejected {
                app_id,
                source: err,
            }
        })?;

        self.launcher
            .send_launch_request(
                &request,
                Box::new(move |outcome| on_launch_result(app_id, outcome)),
            )
            .map_err(|err| {
                error!(
                    "event=app_launch module=launch status=error stage=send app_id={} error={}",
                    app_id, err
                );
                LaunchError::SendFailed {
                    app_id,
                    source: err,
                }
            })?;

        info!(
            "event=app_launch module=launch status=sent icon={} app_id={}",
            icon, app_id
        );
        Ok(())
    }

    /// Dispatches a raw host icon index; unknown indexes are rejected without
    /// touching the launcher.
    pub fn dispatch_raw(&mut self, raw: i32) -> Result<(), LaunchError> {
        match IconId::from_raw(raw) {
            Some(icon) => self.dispatch(icon),
            None => {
                warn!(
                    "event=app_launch module=launch status=skip reason=unknown_icon raw={}",
                    raw
                );
                Err(LaunchError::UnknownIcon(raw))
            }
        }
    }
}

impl<L: LaunchService> IconTapListener for LaunchDispatcher<L> {
    fn on_icon_tapped(&mut self, icon: IconId) {
        // Failures are logged inside dispatch; there is no caller to report to.
        let _ = self.dispatch(icon);
    }
}

/// Log level used for a launch outcome.
pub fn outcome_level(outcome: LaunchOutcome) -> Level {
    match outcome {
        LaunchOutcome::Succeeded => Level::Info,
        LaunchOutcome::Canceled | LaunchOutcome::Failed => Level::Warn,
        LaunchOutcome::Unknown => Level::Error,
    }
}

/// Records the asynchronous result of a launch request.
pub fn on_launch_result(app_id: &str, outcome: LaunchOutcome) {
    let status = match outcome {
        LaunchOutcome::Succeeded => "succeeded",
        LaunchOutcome::Canceled => "canceled",
        LaunchOutcome::Failed => "failed",
        LaunchOutcome::Unknown => "unknown",
    };
    log!(
        outcome_level(outcome),
        "event=app_launch_result module=launch status={} app_id={}",
        status,
        app_id
    );
}
