//! Command line handling
//!
//! The five positionals are optional at the clap level so a short command
//! line can print usage and exit successfully instead of failing.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use protocol::{PortOperation, TargetSelector};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(name = "hubctl")]
#[command(
    author,
    version,
    about = "Query or toggle power on a single USB hub port"
)]
#[command(long_about = "
Finds USB hubs on the given bus whose vendor or product ID matches, and sends
one port request to each of them: GET_STATUS, SET_FEATURE(PORT_POWER) or
CLEAR_FEATURE(PORT_POWER). All output goes to stderr.

EXAMPLES:
    # Read the status of port 2 on a hub on bus 1
    hubctl 1 2109 2817 2 status

    # Cut power to that port, then restore it
    hubctl 1 2109 2817 2 off
    hubctl 1 2109 2817 2 on

    # Show the hubs hubctl can see
    hubctl --list-hubs

CONFIGURATION:
    hubctl looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/hubctl/hubctl.toml
    3. /etc/hubctl/hubctl.toml
    4. Built-in defaults
")]
#[command(allow_negative_numbers = true)]
pub struct Args {
    /// Bus number of the hub, decimal (see lsusb)
    #[arg(value_name = "BUSNUMBER")]
    pub bus: Option<String>,

    /// Vendor ID of the hub, hexadecimal
    #[arg(value_name = "IDVENDOR")]
    pub vendor: Option<String>,

    /// Product ID of the hub, hexadecimal
    #[arg(value_name = "IDPRODUCT")]
    pub product: Option<String>,

    /// Downstream port to operate on, decimal
    #[arg(value_name = "PORTNUM")]
    pub port: Option<String>,

    /// on: enable port power, off: disable port power, status: read the port status
    #[arg(value_name = "on|off|status")]
    pub operation: Option<String>,

    /// Ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Control transfer timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Require both vendor and product ID to match
    #[arg(long)]
    pub strict_match: bool,

    /// List hubs and exit
    #[arg(long)]
    pub list_hubs: bool,

    /// Save default configuration to default location and exit
    #[arg(long)]
    pub save_config: bool,
}

impl Args {
    /// All five positionals were given
    pub fn has_target(&self) -> bool {
        self.bus.is_some()
            && self.vendor.is_some()
            && self.product.is_some()
            && self.port.is_some()
            && self.operation.is_some()
    }

    /// Build the selector from the positionals
    ///
    /// Returns `None` if any positional is missing. Numbers that do not parse
    /// become zero, with a warning.
    pub fn selector(&self) -> Option<TargetSelector> {
        let bus = self.bus.as_deref()?;
        let vendor = self.vendor.as_deref()?;
        let product = self.product.as_deref()?;
        let port = self.port.as_deref()?;
        let operation = self.operation.as_deref()?;

        if !self.extra.is_empty() {
            debug!("Ignoring extra arguments: {:?}", self.extra);
        }

        Some(TargetSelector {
            bus: narrow_u8("busnumber", parse_number("busnumber", bus, 10)),
            vendor_id: narrow_u16("idvendor", parse_number("idvendor", vendor, 16)),
            product_id: narrow_u16("idproduct", parse_number("idproduct", product, 16)),
            port: narrow_u16("portnum", parse_number("portnum", port, 10)),
            operation: PortOperation::parse(operation),
        })
    }
}

/// Parse the process arguments
///
/// Help and version text go to stderr like every other diagnostic; clap
/// would otherwise print them on stdout. Parse errors exit through clap.
pub fn parse() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                eprint!("{}", e.render());
                std::process::exit(0);
            }
            _ => e.exit(),
        },
    }
}

/// Usage and argument help, for the short command line path
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Result of a lenient numeric parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientNumber {
    pub value: i64,
    /// The whole input was consumed
    pub complete: bool,
}

/// Parse like C's `strtol`
///
/// Leading whitespace and a sign are accepted, base 16 also takes a `0x`
/// prefix, and parsing stops at the first character that is not a digit.
/// No digits at all yields 0. Out-of-range values saturate.
pub fn parse_lenient(input: &str, radix: u32) -> LenientNumber {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let rest = if radix == 16 {
        match rest.get(..2) {
            Some("0x") | Some("0X")
                if rest[2..].chars().next().is_some_and(|c| c.is_ascii_hexdigit()) =>
            {
                &rest[2..]
            }
            _ => rest,
        }
    } else {
        rest
    };

    let mut value: i64 = 0;
    let mut digits = 0;
    for c in rest.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = value.saturating_mul(radix as i64).saturating_add(digit as i64);
        digits += 1;
    }

    LenientNumber {
        value: if negative { -value } else { value },
        complete: digits > 0 && digits == rest.len(),
    }
}

fn parse_number(name: &str, input: &str, radix: u32) -> i64 {
    let parsed = parse_lenient(input, radix);
    if !parsed.complete {
        warn!(
            "Argument {} '{}' is not a valid base-{} number, using {}",
            name, input, radix, parsed.value
        );
    }
    parsed.value
}

/// Truncate to a bus number, warning when bits are lost
fn narrow_u8(name: &str, value: i64) -> u8 {
    u8::try_from(value).unwrap_or_else(|_| {
        warn!("Argument {} {} is out of range, using {}", name, value, value as u8);
        value as u8
    })
}

/// Truncate to a 16-bit field, warning when bits are lost
fn narrow_u16(name: &str, value: i64) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| {
        warn!("Argument {} {} is out of range, using {}", name, value, value as u16);
        value as u16
    })
}
