use thiserror::Error;

/// Failure modes of position acquisition.
///
/// Callers branch on the variant to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// No position source is available in this environment.
    #[error("no position source is available")]
    Unsupported,

    /// The lookup service refused the request (HTTP 401 or 403).
    #[error("position lookup was denied")]
    PermissionDenied,

    /// The source could not produce a fix.
    #[error("position is unavailable")]
    PositionUnavailable,

    /// No fix arrived within the acquisition timeout.
    #[error("timed out waiting for a position fix")]
    Timeout,
}
