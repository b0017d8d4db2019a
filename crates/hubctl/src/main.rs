//! hubctl
//!
//! Finds a USB hub by bus number and vendor/product ID and sends a single
//! port request to it: read the port status, or switch port power on or off.
//! Diagnostics go to stderr; stdout is not used.

mod args;
mod config;
mod usb;

use anyhow::{Context, Result};
use common::{UsbId, setup_logging};
use config::HubctlConfig;
use protocol::MatchMode;
use std::process::ExitCode;
use tracing::{debug, error, info};
use usb::{HubScanner, UsbHost, list_hubs};

fn main() -> Result<ExitCode> {
    let args = args::parse();

    if args.save_config {
        let config = HubctlConfig::default();
        let path = HubctlConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        eprintln!("Configuration saved to: {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    // Too few positionals is not an error
    if !args.list_hubs && !args.has_target() {
        eprintln!("{}", args::usage());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if let Some(ref path) = args.config {
        config::load_config(path).context("Failed to load configuration")?
    } else {
        HubctlConfig::load_or_default()
    };

    let mode = args.strict_match.then_some(MatchMode::Both);
    let config = config
        .with_overrides(args.log_level.as_deref(), args.timeout_ms, mode)
        .context("Invalid command line option")?;

    setup_logging(&config.general.log_level).context("Failed to setup logging")?;

    debug!("hubctl v{}", env!("CARGO_PKG_VERSION"));

    let selector = args.selector();
    if let Some(ref selector) = selector {
        info!(
            "target bus: {}, id: {}, port: {}, operation: {}",
            selector.bus,
            UsbId::new(selector.vendor_id, selector.product_id),
            selector.port,
            selector.operation
        );
    }

    let host = match UsbHost::new(config.general.libusb_log_level()) {
        Ok(host) => host,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let devices = match host.devices() {
        Ok(devices) => devices,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    match selector {
        Some(selector) if !args.list_hubs => {
            let scanner =
                HubScanner::new(selector, config.matching.mode, config.transfer.timeout());
            let summary = scanner.run(&devices);
            if summary.matched == 0 {
                info!("No matching hub found");
            }
            debug!(
                "Scanned {} devices: {} matched, {} succeeded, {} failed",
                summary.devices, summary.matched, summary.succeeded, summary.failed
            );
        }
        _ => {
            list_hubs(&devices);
        }
    }

    Ok(ExitCode::SUCCESS)
}
