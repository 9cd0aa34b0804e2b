//! Capability negotiation
//!
//! Queries a panel's driver for ground truth before any sizing decision.
//! Readiness is a hard precondition: a not-ready device fails boot, it is
//! never polled or retried. Enforcement of the configured width/height
//! against the returned maxima belongs to the provisioner.

use platform::{Capabilities, DisplayDevice};

use crate::error::InitError;

/// Snapshot a ready device's capabilities.
pub fn negotiate(device: &dyn DisplayDevice) -> Result<Capabilities, InitError> {
    if !device.is_ready() {
        return Err(InitError::DeviceNotReady);
    }
    Ok(device.capabilities())
}
