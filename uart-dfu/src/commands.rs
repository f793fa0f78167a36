// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for device workflows.
//!
//! Each workflow runs its steps one after another on the calling thread.
//! Long-running device calls get their own progress reporter, which is
//! always joined before the next line of output is printed.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crc::{Crc, CRC_32_ISO_HDLC};

use uart_dfu_common::{Console, Device, DeviceError, MemoryMap, ProgressReporter, ProgressValue};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Printed once whenever a device call fails.
pub const REMEDIATION: &str = "An error occurred. Reset the device and try again.";

/// Arguments of the `load` command.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub address: u32,
    pub file: PathBuf,
    pub memory_map: Option<PathBuf>,
    pub erase: bool,
    pub run: bool,
}

/// Outcome of the read-back check at the end of `load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch { expected: u32, actual: u32 },
}

/// Print the device identifier.
pub fn id<D: Device + ?Sized>(device: &mut D, console: &Console) -> Result<()> {
    log::debug!("identify");
    let id = device.identify().map_err(|e| abort(console, None, e))?;

    console.line(&format!("MCU ID: 0x{}", hex(&id)))?;
    Ok(())
}

/// Start executing from `address`.
pub fn run<D: Device + ?Sized>(device: &mut D, console: &Console, address: u32) -> Result<()> {
    execute(device, console, address)
}

/// Erase `size` bytes from `address`, or the whole memory without a size.
pub fn erase<D: Device + ?Sized>(
    device: &mut D,
    console: &Console,
    address: u32,
    size: Option<u32>,
    memory_map: Option<&Path>,
) -> Result<()> {
    let memory_map = memory_map.map(load_memory_map).transpose()?;

    match size {
        Some(size) => console.line(&format!("Erasing {} bytes from {:#x}...", size, address))?,
        None => console.line("Erasing whole memory...")?,
    }

    log::debug!(
        "erase {:#x} size={:?} map={}",
        address,
        size,
        memory_map.is_some()
    );
    let reporter = ProgressReporter::indeterminate(console.clone());
    with_reporter(console, reporter, |progress| {
        device.erase(address, size, memory_map.as_ref(), progress)
    })?;

    Ok(())
}

/// Dump `size` bytes from `address` into `file`.
pub fn dump<D: Device + ?Sized>(
    device: &mut D,
    console: &Console,
    address: u32,
    size: u32,
    file: &Path,
) -> Result<()> {
    let mut out =
        File::create(file).with_context(|| format!("Failed to create {}", file.display()))?;

    console.line(&format!("Dumping {} bytes from {:#x}...", size, address))?;

    log::debug!("read {:#x} size={}", address, size);
    let reporter = ProgressReporter::determinate(console.clone());
    let data = with_reporter(console, reporter, |progress| {
        device.read(address, size, progress)
    })?;

    out.write_all(&data)
        .with_context(|| format!("Failed to write {}", file.display()))?;
    Ok(())
}

/// Load firmware: optional erase, write, read-back verification, optional run.
///
/// A checksum mismatch is reported but is not an error; the run step still
/// happens when requested.
pub fn load<D: Device + ?Sized>(
    device: &mut D,
    console: &Console,
    options: &LoadOptions,
) -> Result<Verification> {
    let address = options.address;
    let firmware = fs::read(&options.file)
        .with_context(|| format!("Failed to read {}", options.file.display()))?;
    let size = u32::try_from(firmware.len()).context("Firmware image does not fit in 32 bits")?;

    if options.erase {
        let (memory_map, erase_size) = match &options.memory_map {
            Some(path) => {
                let map = load_memory_map(path)?;
                console.line(&format!("Erasing {} bytes from {:#x}...", size, address))?;
                (Some(map), Some(size))
            }
            None => {
                console.line("Erasing whole memory...")?;
                (None, None)
            }
        };

        log::debug!("erase {:#x} size={:?}", address, erase_size);
        let reporter = ProgressReporter::indeterminate(console.clone());
        with_reporter(console, reporter, |progress| {
            device.erase(address, erase_size, memory_map.as_ref(), progress)
        })?;
    }

    console.line(&format!(
        "Loading {} ({} bytes) at {:#x}",
        options.file.display(),
        size,
        address
    ))?;

    log::debug!("write {:#x} len={}", address, size);
    let reporter = ProgressReporter::determinate(console.clone());
    with_reporter(console, reporter, |progress| {
        device.write(address, &firmware, progress)
    })?;

    console.line("Validating firmware...")?;

    log::debug!("read {:#x} size={}", address, size);
    let reporter = ProgressReporter::determinate(console.clone());
    let written = with_reporter(console, reporter, |progress| {
        device.read(address, size, progress)
    })?;

    let expected = CRC32.checksum(&firmware);
    let actual = CRC32.checksum(&written);
    log::debug!("CRC32 firmware=0x{:08x} device=0x{:08x}", expected, actual);

    let verification = if expected == actual {
        console.line("Success!")?;
        Verification::Match
    } else {
        console.line("Error: checksum mismatch!")?;
        Verification::Mismatch { expected, actual }
    };

    if options.run {
        execute(device, console, address)?;
    }

    Ok(verification)
}

fn execute<D: Device + ?Sized>(device: &mut D, console: &Console, address: u32) -> Result<()> {
    console.line(&format!("MCU will be running from {:#x}.", address))?;

    log::debug!("execute {:#x}", address);
    device
        .execute(address)
        .map_err(|e| abort(console, None, e))?;
    Ok(())
}

/// Run one device call under a freshly started progress reporter.
///
/// On success the reporter is forced to `Done`; on failure the step is
/// aborted. Either way the reporter has drawn its final line on return.
fn with_reporter<T>(
    console: &Console,
    reporter: ProgressReporter,
    step: impl FnOnce(&dyn Fn(ProgressValue)) -> Result<T, DeviceError>,
) -> Result<T, DeviceError> {
    let result = step(&|value| reporter.update(value));

    match result {
        Ok(value) => {
            reporter.update(ProgressValue::Done);
            reporter.join();
            Ok(value)
        }
        Err(e) => Err(abort(console, Some(reporter), e)),
    }
}

/// Fail the active reporter (if any), print the remediation line and hand
/// the original error back.
fn abort(
    console: &Console,
    reporter: Option<ProgressReporter>,
    error: DeviceError,
) -> DeviceError {
    log::debug!("Aborting: {}", error);

    if let Some(reporter) = reporter {
        reporter.update(ProgressValue::Failed);
        reporter.join();
    }

    if let Err(e) = console.line(REMEDIATION) {
        log::warn!("Failed to print remediation message: {}", e);
    }
    error
}

fn load_memory_map(path: &Path) -> Result<MemoryMap> {
    MemoryMap::load(path).with_context(|| format!("Failed to load memory map {}", path.display()))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
