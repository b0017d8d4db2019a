//! Port status decoding
//!
//! GetPortStatus returns two little-endian words: wPortStatus followed by
//! wPortChange (USB 3.2 tables 10-13 and 10-14).

use crate::error::{ProtocolError, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// Length of the GetPortStatus data stage
pub const PORT_STATUS_RESPONSE_LEN: usize = 4;

/// wPortStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStatus(pub u16);

impl PortStatus {
    const CONNECTION: u16 = 0x0001;
    const ENABLE: u16 = 0x0002;
    const OVER_CURRENT: u16 = 0x0008;
    const RESET: u16 = 0x0010;
    const LINK_STATE_SHIFT: u16 = 4;
    const LINK_STATE_MASK: u16 = 0x000F;
    const POWER: u16 = 0x0200;

    /// A device is attached to the port
    pub fn connected(&self) -> bool {
        self.0 & Self::CONNECTION != 0
    }

    /// The port is enabled
    pub fn enabled(&self) -> bool {
        self.0 & Self::ENABLE != 0
    }

    /// The hub reports an over-current condition on this port
    pub fn over_current(&self) -> bool {
        self.0 & Self::OVER_CURRENT != 0
    }

    /// Reset signaling is asserted
    pub fn reset(&self) -> bool {
        self.0 & Self::RESET != 0
    }

    /// Link state nibble, `(wPortStatus >> 4) & 0xF`
    pub fn link_state(&self) -> u8 {
        ((self.0 >> Self::LINK_STATE_SHIFT) & Self::LINK_STATE_MASK) as u8
    }

    /// Bit 9. When clear the port is in the Powered-off state.
    pub fn port_power(&self) -> bool {
        self.0 & Self::POWER != 0
    }

    /// Human-readable description, one line per decoded field
    ///
    /// The first line shows the word as a signed 16-bit decimal, then in hex.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(7);
        lines.push(format!("wPortStatus: {} ({:#06x})", self.0 as i16, self.0));

        lines.push(
            if self.connected() {
                "A device is present on the port"
            } else {
                "No device is present on the port"
            }
            .to_string(),
        );
        lines.push(
            if self.enabled() {
                "Port is enabled"
            } else {
                "Port is disabled"
            }
            .to_string(),
        );
        lines.push(
            if self.over_current() {
                "Port reports over current condition"
            } else {
                "No over current condition on the port"
            }
            .to_string(),
        );
        lines.push(
            if self.reset() {
                "Port reset signal asserted"
            } else {
                "Port reset signal not asserted"
            }
            .to_string(),
        );
        lines.push(format!("link state: {:x}", self.link_state()));
        lines.push(
            if self.port_power() {
                "Port is not in the powered off state"
            } else {
                "Port is in the powered off state"
            }
            .to_string(),
        );

        lines
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// wPortChange, kept as the raw word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortChange(pub u16);

impl fmt::Display for PortChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Decoded GetPortStatus data stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStatusResponse {
    pub status: PortStatus,
    pub change: PortChange,
}

impl PortStatusResponse {
    /// Parse the data stage. Anything past the first four bytes is ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < PORT_STATUS_RESPONSE_LEN {
            return Err(ProtocolError::ShortRead {
                expected: PORT_STATUS_RESPONSE_LEN,
                actual: data.len(),
            });
        }

        Ok(Self {
            status: PortStatus(LittleEndian::read_u16(&data[0..2])),
            change: PortChange(LittleEndian::read_u16(&data[2..4])),
        })
    }
}
