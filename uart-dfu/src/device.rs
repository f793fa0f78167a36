// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Device handle construction.
//!
//! The handle is opened once in `cli::run` and dropped when the command
//! finishes, whatever the outcome.

use anyhow::{Context, Result};

use uart_dfu_common::{parse_int, Device, DeviceError, SimConfig, SimulatedDevice};

/// Port name selecting the in-memory device.
pub const SIM_PORT: &str = "sim";

/// Open the device behind `port`.
///
/// `sim` gives a simulated device with the default flash size, `sim:<size>`
/// one with `<size>` bytes of flash. Bootloader protocol backends for real
/// serial ports are provided outside this tool.
pub fn open_device(port: &str) -> Result<Box<dyn Device>> {
    if port == SIM_PORT {
        log::info!("Using simulated device");
        return Ok(Box::new(SimulatedDevice::new_default()));
    }

    if let Some(size) = port.strip_prefix("sim:") {
        let size = parse_int(size)
            .with_context(|| format!("Invalid simulated flash size {:?}", size))?;
        log::info!("Using simulated device with {} bytes of flash", size);
        return Ok(Box::new(SimulatedDevice::new(SimConfig {
            size: size as usize,
            ..SimConfig::default()
        })));
    }

    Err(DeviceError::NotConnected(port.to_string()))
        .with_context(|| format!("No bootloader backend available for {}", port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uart_dfu_common::ProgressValue;

    #[test]
    fn test_open_sim() {
        let mut device = open_device("sim").unwrap();
        assert_eq!(device.identify().unwrap(), vec![0x04, 0x13]);
    }

    #[test]
    fn test_open_sim_with_size() {
        let mut device = open_device("sim:0x100").unwrap();
        let ignore = |_: ProgressValue| {};
        assert!(device.read(0x0800_0000, 0x100, &ignore).is_ok());
        assert!(device.read(0x0800_0000, 0x101, &ignore).is_err());
    }

    #[test]
    fn test_open_sim_bad_size() {
        assert!(open_device("sim:lots").is_err());
    }

    #[test]
    fn test_open_unknown_port_is_device_error() {
        let err = open_device("/dev/ttyUSB0").err().unwrap();
        assert_eq!(
            err.downcast_ref::<DeviceError>(),
            Some(&DeviceError::NotConnected("/dev/ttyUSB0".to_string()))
        );
    }
}
