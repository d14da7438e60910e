//! Position acquisition for the Atlas client.
//!
//! A terminal has no geolocation API, so positions come from one of three
//! sources: an IP geolocation service, operator-supplied fixed coordinates,
//! or nothing at all. The [`Acquirer`] wraps whichever source is configured
//! behind a single timeout-bounded call with a typed failure taxonomy.

pub mod acquirer;
pub mod error;
pub mod provider;

pub use acquirer::{Acquirer, Provider};
pub use error::LocationError;
pub use provider::IpLookupService;
