//! Enumerate, match and operate
//!
//! Walks the device list once. Every hub that matches the selector is
//! opened, receives the requested operation and is closed again before the
//! next device is looked at. Per-device failures are logged and skipped.

use crate::usb::backend::{ControlTransport, HubCandidate};
use crate::usb::port::{self, PortReply};
use common::{Result, UsbId, class_name};
use protocol::{MatchMode, TargetSelector};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Counters for one pass over the device list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Devices in the list
    pub devices: usize,
    /// Hubs that matched the selector
    pub matched: usize,
    /// Matched hubs whose operation completed
    pub succeeded: usize,
    /// Matched hubs that could not be opened or whose transfer failed
    pub failed: usize,
}

pub struct HubScanner {
    selector: TargetSelector,
    mode: MatchMode,
    timeout: Duration,
}

impl HubScanner {
    pub fn new(selector: TargetSelector, mode: MatchMode, timeout: Duration) -> Self {
        Self {
            selector,
            mode,
            timeout,
        }
    }

    /// Apply the selected operation to every matching hub in `devices`
    pub fn run<D: HubCandidate>(&self, devices: &[D]) -> ScanSummary {
        let mut summary = ScanSummary {
            devices: devices.len(),
            ..Default::default()
        };

        info!("There are {} devices", devices.len());

        for (index, device) in devices.iter().enumerate() {
            let descriptor = match device.summary() {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!("Failed getting device descriptor for device {}: {}", index, e);
                    continue;
                }
            };

            if !self.selector.matches(&descriptor, self.mode) {
                continue;
            }
            summary.matched += 1;

            info!(
                "Device {} {} bus num {}, port num: {}",
                index,
                UsbId::new(descriptor.vendor_id, descriptor.product_id),
                descriptor.bus_number,
                descriptor.port_number
            );

            let handle = match device.open() {
                Ok(handle) => handle,
                Err(e) => {
                    warn!("Failed opening device: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            match self.operate(&handle) {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        "Operation '{}' failed on device {}: {}",
                        self.selector.operation, index, e
                    );
                    summary.failed += 1;
                }
            }

            drop(handle);
        }

        summary
    }

    /// Returns `Ok(false)` when the operation keyword is not one we know
    fn operate<H: ControlTransport>(&self, handle: &H) -> Result<bool> {
        let Some(setup) = self.selector.setup() else {
            debug!(
                "Unrecognized operation '{}', nothing sent",
                self.selector.operation
            );
            return Ok(false);
        };

        match port::send(handle, &setup, self.timeout)? {
            PortReply::Status(response) => {
                for line in response.status.report_lines() {
                    info!("{}", line);
                }
                debug!("wPortChange: {}", response.change);
            }
            PortReply::Written(_) => {}
        }

        Ok(true)
    }
}

/// Log every hub in `devices` and return how many there were
pub fn list_hubs<D: HubCandidate>(devices: &[D]) -> usize {
    let mut hubs = 0;

    for (index, device) in devices.iter().enumerate() {
        match device.summary() {
            Ok(descriptor) if descriptor.is_hub() => {
                hubs += 1;
                info!(
                    "Bus {:03} Port {:03} ID {} {}",
                    descriptor.bus_number,
                    descriptor.port_number,
                    UsbId::new(descriptor.vendor_id, descriptor.product_id),
                    class_name(descriptor.class_code)
                );
            }
            Ok(_) => {}
            Err(e) => warn!("Failed getting device descriptor for device {}: {}", index, e),
        }
    }

    info!("Found {} hub(s)", hubs);
    hubs
}
