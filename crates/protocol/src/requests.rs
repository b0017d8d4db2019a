//! Hub class control requests
//!
//! Setup packets for the port-directed requests defined in chapter 11 of the
//! USB 2.0 specification (and chapter 10 of USB 3.2). All of them go to the
//! hub's default control endpoint with the port number in `wIndex`.

/// bmRequestType for port requests with a device-to-host data stage
/// (direction IN, class request, recipient "other" i.e. a port)
pub const PORT_REQUEST_TYPE_IN: u8 = 0xA3;

/// bmRequestType for port requests without a data stage
/// (direction OUT, class request, recipient "other")
pub const PORT_REQUEST_TYPE_OUT: u8 = 0x23;

/// GET_STATUS bRequest
pub const HUB_REQUEST_GET_STATUS: u8 = 0x00;

/// CLEAR_FEATURE bRequest
pub const HUB_REQUEST_CLEAR_FEATURE: u8 = 0x01;

/// SET_FEATURE bRequest
pub const HUB_REQUEST_SET_FEATURE: u8 = 0x03;

/// Port feature selectors used in `wValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum PortFeature {
    /// PORT_POWER
    Power = 8,
}

impl PortFeature {
    /// Feature selector value placed in `wValue`
    pub fn selector(self) -> u16 {
        self as u16
    }
}

/// The fields of a control transfer setup packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSetup {
    /// bmRequestType
    pub request_type: u8,
    /// bRequest
    pub request: u8,
    /// wValue
    pub value: u16,
    /// wIndex
    pub index: u16,
    /// wLength
    pub length: u16,
}

impl ControlSetup {
    /// GetPortStatus: reads wPortStatus and wPortChange for `port`
    pub fn get_port_status(port: u16) -> Self {
        Self {
            request_type: PORT_REQUEST_TYPE_IN,
            request: HUB_REQUEST_GET_STATUS,
            value: 0,
            index: port,
            length: crate::status::PORT_STATUS_RESPONSE_LEN as u16,
        }
    }

    /// SetPortFeature with no data stage
    pub fn set_port_feature(port: u16, feature: PortFeature) -> Self {
        Self {
            request_type: PORT_REQUEST_TYPE_OUT,
            request: HUB_REQUEST_SET_FEATURE,
            value: feature.selector(),
            index: port,
            length: 0,
        }
    }

    /// ClearPortFeature with no data stage
    pub fn clear_port_feature(port: u16, feature: PortFeature) -> Self {
        Self {
            request_type: PORT_REQUEST_TYPE_OUT,
            request: HUB_REQUEST_CLEAR_FEATURE,
            value: feature.selector(),
            index: port,
            length: 0,
        }
    }

    /// Direction is taken from bit 7 of bmRequestType
    pub fn is_device_to_host(&self) -> bool {
        (self.request_type & 0x80) != 0
    }
}
