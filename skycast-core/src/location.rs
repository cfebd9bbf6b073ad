//! Location resolution with a permission-aware fallback.
//!
//! The platform's callback-style location delivery is reframed as a
//! single-slot request/response channel: one pending fix request at a
//! time, resolved exactly once by either a coordinate or an error.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::error::LocationError;
use crate::model::Coordinate;

/// Platform permission state for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    NotDetermined,
    Denied,
    Restricted,
    Granted,
}

/// Seam to the platform location service. Implementations back this with
/// whatever the host offers; tests use hand-rolled doubles.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the platform location service can be used at all.
    fn services_enabled(&self) -> bool;

    fn permission_status(&self) -> PermissionStatus;

    /// Prompt the user and suspend until the platform reports an outcome.
    async fn request_permission(&self) -> PermissionStatus;

    /// Request one fresh location fix.
    async fn request_fix(&self) -> Result<Coordinate, LocationError>;
}

/// Resolves one coordinate per fetch cycle.
pub struct LocationResolver {
    provider: Arc<dyn LocationProvider>,
    fallback: Coordinate,
    // Single in-flight fix request at a time.
    fix_slot: Mutex<()>,
}

impl LocationResolver {
    pub fn new(provider: Arc<dyn LocationProvider>, fallback: Coordinate) -> Self {
        Self { provider, fallback, fix_slot: Mutex::new(()) }
    }

    /// Obtain a coordinate for this fetch cycle.
    ///
    /// Unavailable services or denied/restricted permission answer with
    /// the fallback coordinate; an error is surfaced only when the
    /// platform fails during an active fix request.
    pub async fn resolve(&self) -> Result<Coordinate, LocationError> {
        if !self.provider.services_enabled() {
            debug!("location services unavailable, using fallback");
            return Ok(self.fallback);
        }

        let status = match self.provider.permission_status() {
            PermissionStatus::NotDetermined => self.provider.request_permission().await,
            status => status,
        };

        if status != PermissionStatus::Granted {
            debug!(?status, "location permission unavailable, using fallback");
            return Ok(self.fallback);
        }

        let _slot =
            self.fix_slot.try_lock().map_err(|_| LocationError::RequestInFlight)?;

        self.provider.request_fix().await
    }
}

/// Sending half of a single-slot fix request; resolves the request
/// exactly once. Dropping it without delivering counts as "completed
/// with no fix".
pub struct FixHandle {
    tx: oneshot::Sender<Result<Coordinate, LocationError>>,
}

impl FixHandle {
    pub fn deliver(self, location: Coordinate) {
        let _ = self.tx.send(Ok(location));
    }

    pub fn fail(self, error: LocationError) {
        let _ = self.tx.send(Err(error));
    }
}

/// Receiving half of a single-slot fix request.
pub struct FixRequest {
    rx: oneshot::Receiver<Result<Coordinate, LocationError>>,
}

impl FixRequest {
    /// Suspend until the platform side resolves the request.
    pub async fn wait(self) -> Result<Coordinate, LocationError> {
        self.rx.await.unwrap_or(Err(LocationError::NoFix))
    }
}

/// Create a fresh fix request/response pair.
pub fn fix_channel() -> (FixHandle, FixRequest) {
    let (tx, rx) = oneshot::channel();
    (FixHandle { tx }, FixRequest { rx })
}

/// Provider pinned to a fixed coordinate, e.g. one configured by hand.
pub struct PinnedLocationProvider {
    coordinate: Coordinate,
}

impl PinnedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for PinnedLocationProvider {
    fn services_enabled(&self) -> bool {
        true
    }

    fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_fix(&self) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}

/// Provider for hosts without a location platform; the resolver answers
/// every cycle with the fallback coordinate.
pub struct UnsupportedLocationProvider;

#[async_trait]
impl LocationProvider for UnsupportedLocationProvider {
    fn services_enabled(&self) -> bool {
        false
    }

    fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::NotDetermined
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::NotDetermined
    }

    async fn request_fix(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unknown("location services unavailable".into()))
    }
}
