//! libusb context ownership

use common::{Error, Result};
use rusb::{Context, Device, LogLevel, UsbContext};
use tracing::debug;

/// Owns the libusb context for the lifetime of one invocation
///
/// The context is torn down when this is dropped, after every device and
/// handle borrowed from it.
pub struct UsbHost {
    context: Context,
}

impl UsbHost {
    /// Initialize libusb and set its internal log level
    pub fn new(log_level: LogLevel) -> Result<Self> {
        let mut context = Context::new()
            .map_err(|e| Error::Usb(format!("Failed to initialize libusb: {}", e)))?;
        context.set_log_level(log_level);

        debug!("libusb context initialized");
        Ok(Self { context })
    }

    /// Snapshot of the attached devices
    ///
    /// An empty list is reported as an error; there is nothing to operate on.
    pub fn devices(&self) -> Result<Vec<Device<Context>>> {
        let list = self
            .context
            .devices()
            .map_err(|e| Error::Usb(format!("Failed getting device list: {}", e)))?;

        let devices: Vec<_> = list.iter().collect();
        if devices.is_empty() {
            return Err(Error::Usb("Failed getting device list: no devices".to_string()));
        }

        Ok(devices)
    }
}
