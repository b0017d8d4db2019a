//! Common utilities for hubctl
//!
//! Error handling, logging setup and small USB formatting helpers shared by
//! the hubctl binary and its tests.

pub mod error;
pub mod logging;
pub mod usb_types;

pub use error::{Error, Result};
pub use logging::setup_logging;
pub use usb_types::{UsbId, class_name};
