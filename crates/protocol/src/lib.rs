//! USB hub class protocol for hubctl
//!
//! This crate describes the small slice of the USB hub class specification
//! that hubctl speaks: the setup packets for port GET_STATUS, SET_FEATURE and
//! CLEAR_FEATURE requests, decoding of the 4-byte port status response, and
//! the selector used to pick a hub out of the host's device list.
//!
//! Nothing in here performs I/O.
//!
//! # Example
//!
//! ```
//! use protocol::{ControlSetup, PortStatusResponse};
//!
//! let setup = ControlSetup::get_port_status(2);
//! assert_eq!(setup.request_type, 0xA3);
//! assert_eq!(setup.length, 4);
//!
//! let response = PortStatusResponse::parse(&[0x03, 0x01, 0x00, 0x00]).unwrap();
//! assert!(response.status.connected());
//! assert!(response.status.enabled());
//! ```

pub mod error;
pub mod requests;
pub mod status;
pub mod types;

pub use error::{ProtocolError, Result};
pub use requests::{
    ControlSetup, HUB_REQUEST_CLEAR_FEATURE, HUB_REQUEST_GET_STATUS, HUB_REQUEST_SET_FEATURE,
    PORT_REQUEST_TYPE_IN, PORT_REQUEST_TYPE_OUT, PortFeature,
};
pub use status::{PORT_STATUS_RESPONSE_LEN, PortChange, PortStatus, PortStatusResponse};
pub use types::{DeviceSummary, MatchMode, PortOperation, TargetSelector, USB_CLASS_HUB};
