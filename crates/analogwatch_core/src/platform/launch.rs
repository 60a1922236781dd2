//! Inter-application launch contracts.

use super::PlatformError;

/// Asynchronous result of one launch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Succeeded,
    Canceled,
    Failed,
    Unknown,
}

/// Invoked by the host on a later loop iteration with the launch result.
pub type LaunchResultCallback = Box<dyn FnOnce(LaunchOutcome)>;

/// Host launch request. Dropping it destroys the request.
pub trait LaunchRequest {
    fn set_app_id(&mut self, app_id: &str) -> Result<(), PlatformError>;
}

/// Host launcher that starts other applications.
pub trait LaunchService {
    type Request: LaunchRequest;

    fn create_request(&mut self) -> Result<Self::Request, PlatformError>;

    /// Submits `request` without blocking; `on_result` fires later.
    fn send_launch_request(
        &mut self,
        request: &Self::Request,
        on_result: LaunchResultCallback,
    ) -> Result<(), PlatformError>;
}
