//! Port requests on an open hub
//!
//! `send` issues exactly one control transfer for a setup packet built by
//! the protocol crate. The data stage direction comes from bmRequestType.

use crate::usb::backend::ControlTransport;
use common::{Error, Result};
use protocol::{ControlSetup, PORT_STATUS_RESPONSE_LEN, PortStatusResponse};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What a port request returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortReply {
    /// GetPortStatus data stage, decoded
    Status(PortStatusResponse),
    /// Byte count of a request without a data stage, zero on success
    Written(usize),
}

/// libusb return code for a rusb error
pub fn libusb_code(error: rusb::Error) -> i32 {
    match error {
        rusb::Error::Io => -1,
        rusb::Error::InvalidParam => -2,
        rusb::Error::Access => -3,
        rusb::Error::NoDevice => -4,
        rusb::Error::NotFound => -5,
        rusb::Error::Busy => -6,
        rusb::Error::Timeout => -7,
        rusb::Error::Overflow => -8,
        rusb::Error::Pipe => -9,
        rusb::Error::Interrupted => -10,
        rusb::Error::NoMem => -11,
        rusb::Error::NotSupported => -12,
        _ => -99,
    }
}

/// Send `setup` and interpret the reply
///
/// IN requests read `setup.length` bytes and must return a full port status
/// response. OUT requests carry no data and log the raw return code.
pub fn send<H: ControlTransport>(
    handle: &H,
    setup: &ControlSetup,
    timeout: Duration,
) -> Result<PortReply> {
    debug!(
        "Control transfer: request_type={:#x}, request={:#x}, value={:#x}, index={:#x}, length={}",
        setup.request_type, setup.request, setup.value, setup.index, setup.length
    );

    if setup.is_device_to_host() {
        let mut buffer = [0u8; PORT_STATUS_RESPONSE_LEN];
        let length = (setup.length as usize).min(buffer.len());

        let len = handle
            .read_control(
                setup.request_type,
                setup.request,
                setup.value,
                setup.index,
                &mut buffer[..length],
                timeout,
            )
            .map_err(|e| {
                let code = libusb_code(e);
                warn!("Get port status ret: {}", code);
                Error::Usb(format!("GetPortStatus failed: {} ({})", code, e))
            })?;

        if len != PORT_STATUS_RESPONSE_LEN {
            warn!("Did not read all bytes: {}", len);
        }

        Ok(PortReply::Status(PortStatusResponse::parse(&buffer[..len])?))
    } else {
        match handle.write_control(
            setup.request_type,
            setup.request,
            setup.value,
            setup.index,
            &[],
            timeout,
        ) {
            Ok(len) => {
                info!("set port feature ret: {}", len);
                Ok(PortReply::Written(len))
            }
            Err(e) => {
                let code = libusb_code(e);
                warn!("set port feature ret: {}", code);
                Err(Error::Usb(format!(
                    "Port feature request {:#04x} failed: {} ({})",
                    setup.request, code, e
                )))
            }
        }
    }
}
