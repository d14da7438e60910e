//! One position source, one timeout, typed failures.

use std::time::Duration;

use atlas_core::types::Coordinates;

use crate::error::LocationError;
use crate::provider::IpLookupService;

/// Where position fixes come from.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Network lookup against an IP geolocation endpoint.
    Service(IpLookupService),
    /// Operator-supplied static position.
    Fixed(Coordinates),
    /// No position source; every acquisition fails as unsupported.
    Disabled,
}

/// Acquires the user position from the configured provider.
///
/// Stateless: callers cache the resulting coordinates themselves, and every
/// [`Acquirer::acquire`] call performs a fresh lookup.
#[derive(Debug, Clone)]
pub struct Acquirer {
    provider: Provider,
    timeout: Duration,
}

impl Acquirer {
    #[must_use]
    pub fn new(provider: Provider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Obtains one position fix.
    ///
    /// # Errors
    ///
    /// - [`LocationError::Unsupported`] with the disabled provider; returned
    ///   immediately, nothing is contacted.
    /// - [`LocationError::Timeout`] when the service produces no fix within
    ///   the acquisition timeout.
    /// - [`LocationError::PermissionDenied`] and
    ///   [`LocationError::PositionUnavailable`] propagated from the lookup.
    pub async fn acquire(&self) -> Result<Coordinates, LocationError> {
        match &self.provider {
            Provider::Disabled => Err(LocationError::Unsupported),
            Provider::Fixed(position) => Ok(*position),
            Provider::Service(service) => tokio::time::timeout(self.timeout, service.fix())
                .await
                .map_err(|_| LocationError::Timeout)?,
        }
    }
}
