//! In-memory hubs for exercising the scan loop without hardware

use crate::usb::backend::{ControlTransport, HubCandidate};
use protocol::{ControlSetup, DeviceSummary, USB_CLASS_HUB};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// A control transfer as seen by the mock device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTransfer {
    /// Setup fields, with `length` taken from the data stage buffer
    pub setup: ControlSetup,
    pub timeout: Duration,
}

#[derive(Default)]
struct Shared {
    transfers: RefCell<Vec<RecordedTransfer>>,
    opened: Cell<usize>,
    closed: Cell<usize>,
}

#[derive(Clone)]
pub struct MockHub {
    summary: rusb::Result<DeviceSummary>,
    open_error: Option<rusb::Error>,
    response: rusb::Result<Vec<u8>>,
    shared: Rc<Shared>,
}

impl MockHub {
    pub fn hub(bus_number: u8, vendor_id: u16, product_id: u16) -> Self {
        Self::device(USB_CLASS_HUB, bus_number, vendor_id, product_id)
    }

    pub fn device(class_code: u8, bus_number: u8, vendor_id: u16, product_id: u16) -> Self {
        Self {
            summary: Ok(DeviceSummary {
                class_code,
                vendor_id,
                product_id,
                bus_number,
                port_number: 1,
            }),
            open_error: None,
            response: Ok(vec![0; 4]),
            shared: Rc::new(Shared::default()),
        }
    }

    pub fn with_response(mut self, data: &[u8]) -> Self {
        self.response = Ok(data.to_vec());
        self
    }

    pub fn with_transfer_error(mut self, error: rusb::Error) -> Self {
        self.response = Err(error);
        self
    }

    pub fn with_descriptor_error(mut self, error: rusb::Error) -> Self {
        self.summary = Err(error);
        self
    }

    pub fn with_open_error(mut self, error: rusb::Error) -> Self {
        self.open_error = Some(error);
        self
    }

    /// Open a handle directly, bypassing the configured open error
    pub fn open_handle(&self) -> MockHandle {
        self.shared.opened.set(self.shared.opened.get() + 1);
        MockHandle {
            response: self.response.clone(),
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn transfers(&self) -> Vec<RecordedTransfer> {
        self.shared.transfers.borrow().clone()
    }

    pub fn opened(&self) -> usize {
        self.shared.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.shared.closed.get()
    }
}

impl HubCandidate for MockHub {
    type Handle = MockHandle;

    fn summary(&self) -> rusb::Result<DeviceSummary> {
        self.summary
    }

    fn open(&self) -> rusb::Result<MockHandle> {
        match self.open_error {
            Some(error) => Err(error),
            None => Ok(self.open_handle()),
        }
    }
}

pub struct MockHandle {
    response: rusb::Result<Vec<u8>>,
    shared: Rc<Shared>,
}

impl MockHandle {
    fn record(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        len: usize,
        timeout: Duration,
    ) {
        self.shared.transfers.borrow_mut().push(RecordedTransfer {
            setup: ControlSetup {
                request_type,
                request,
                value,
                index,
                length: len as u16,
            },
            timeout,
        });
    }
}

impl ControlTransport for MockHandle {
    fn read_control(
        &self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buf: &mut [u8],
        timeout: Duration,
    ) -> rusb::Result<usize> {
        self.record(request_type, request, value, index, buf.len(), timeout);

        let data = self.response.as_ref().map_err(|e| *e)?;
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        Ok(len)
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
        self.record(request_type, request, value, index, buf.len(), timeout);

        match &self.response {
            Ok(_) => Ok(buf.len()),
            Err(e) => Err(*e),
        }
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        self.shared.closed.set(self.shared.closed.get() + 1);
    }
}
