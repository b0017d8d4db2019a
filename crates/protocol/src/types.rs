//! Target selection types
//!
//! A hubctl invocation names one hub (bus, vendor, product), one of its
//! downstream ports and an operation. These types carry that selection and
//! decide which enumerated devices it applies to.

use crate::requests::{ControlSetup, PortFeature};
use serde::{Deserialize, Serialize};
use std::fmt;

/// bDeviceClass of a hub
pub const USB_CLASS_HUB: u8 = 0x09;

/// Operation requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortOperation {
    /// Read and print the port status word
    Status,
    /// SetPortFeature(PORT_POWER)
    PowerOn,
    /// ClearPortFeature(PORT_POWER)
    PowerOff,
    /// Any other keyword. Matching hubs are opened but nothing is sent.
    Unrecognized(String),
}

impl PortOperation {
    /// Parse an operation keyword. Matching is exact and case-sensitive.
    pub fn parse(keyword: &str) -> Self {
        match keyword {
            "status" => Self::Status,
            "on" => Self::PowerOn,
            "off" => Self::PowerOff,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Setup packet for this operation against `port`
    ///
    /// Returns `None` for unrecognized keywords.
    pub fn setup(&self, port: u16) -> Option<ControlSetup> {
        match self {
            Self::Status => Some(ControlSetup::get_port_status(port)),
            Self::PowerOn => Some(ControlSetup::set_port_feature(port, PortFeature::Power)),
            Self::PowerOff => Some(ControlSetup::clear_port_feature(port, PortFeature::Power)),
            Self::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for PortOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status => f.write_str("status"),
            Self::PowerOn => f.write_str("on"),
            Self::PowerOff => f.write_str("off"),
            Self::Unrecognized(keyword) => f.write_str(keyword),
        }
    }
}

/// How vendor and product IDs are compared against the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// A hub matches when its vendor ID or its product ID equals the target.
    /// It is only rejected when both differ.
    #[default]
    Either,
    /// Both vendor and product ID must equal the target
    Both,
}

/// The descriptor fields hubctl looks at while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSummary {
    /// bDeviceClass
    pub class_code: u8,
    /// idVendor
    pub vendor_id: u16,
    /// idProduct
    pub product_id: u16,
    /// Bus the device is attached to
    pub bus_number: u8,
    /// Port on the parent hub (informational only)
    pub port_number: u8,
}

impl DeviceSummary {
    pub fn is_hub(&self) -> bool {
        self.class_code == USB_CLASS_HUB
    }
}

/// Hub, port and operation chosen on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSelector {
    pub bus: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    /// Downstream port placed in wIndex
    pub port: u16,
    pub operation: PortOperation,
}

impl TargetSelector {
    /// Whether `device` is a hub this selector applies to
    ///
    /// The device's own port number never takes part in matching.
    pub fn matches(&self, device: &DeviceSummary, mode: MatchMode) -> bool {
        if !device.is_hub() {
            return false;
        }

        let vendor_matches = device.vendor_id == self.vendor_id;
        let product_matches = device.product_id == self.product_id;
        let ids_match = match mode {
            MatchMode::Either => vendor_matches || product_matches,
            MatchMode::Both => vendor_matches && product_matches,
        };

        ids_match && device.bus_number == self.bus
    }

    /// Setup packet for the selected operation and port
    pub fn setup(&self) -> Option<ControlSetup> {
        self.operation.setup(self.port)
    }
}
