//! Trait seam over rusb
//!
//! The scan loop only needs a descriptor summary, the ability to open a
//! device and two control transfer primitives. Keeping those behind traits
//! lets tests drive the loop with in-memory hubs.

use protocol::DeviceSummary;
use rusb::{Device, DeviceHandle, UsbContext};
use std::time::Duration;

/// Synchronous control transfers on endpoint 0
pub trait ControlTransport {
    /// Control transfer with a device-to-host data stage
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> rusb::Result<usize>;

    /// Control transfer with a host-to-device (possibly empty) data stage
    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize>;
}

/// An enumerated device that may turn out to be the target hub
pub trait HubCandidate {
    /// Open handle. Dropping it closes the device.
    type Handle: ControlTransport;

    /// Read the device descriptor and location
    fn summary(&self) -> rusb::Result<DeviceSummary>;

    /// Open the device for control transfers
    fn open(&self) -> rusb::Result<Self::Handle>;
}

impl<T: UsbContext> ControlTransport for DeviceHandle<T> {
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        DeviceHandle::read_control(self, request_type, request, value, index, buf, timeout)
    }

    fn write_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &[u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        DeviceHandle::write_control(self, request_type, request, value, index, buf, timeout)
    }
}

impl<T: UsbContext> HubCandidate for Device<T> {
    type Handle = DeviceHandle<T>;

    fn summary(&self) -> rusb::Result<DeviceSummary> {
        let descriptor = self.device_descriptor()?;

        Ok(DeviceSummary {
            class_code: descriptor.class_code(),
            vendor_id: descriptor.vendor_id(),
            product_id: descriptor.product_id(),
            bus_number: self.bus_number(),
            port_number: self.port_number(),
        })
    }

    fn open(&self) -> rusb::Result<DeviceHandle<T>> {
        Device::open(self)
    }
}
