//! USB subsystem
//!
//! Host-side USB access for hubctl:
//! - Context creation and device enumeration (`host`)
//! - The trait seam between the scan loop and rusb (`backend`)
//! - Port requests issued on an open hub (`port`)
//! - The enumerate / match / operate loop (`scanner`)
//!
//! Everything runs synchronously on the main thread. The only blocking
//! points are the control transfers, each bounded by the configured timeout.

pub mod backend;
pub mod host;
pub mod port;
pub mod scanner;

#[cfg(test)]
pub mod mock;

pub use host::UsbHost;
pub use scanner::{HubScanner, list_hubs};
