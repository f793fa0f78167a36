// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The device the workflows drive.
//!
//! Implementations own the link to the microcontroller and its bootloader
//! protocol. Every call is blocking. Long-running calls receive a progress
//! sink and may invoke it any number of times while they run.

use std::fmt;

use thiserror::Error;

use crate::memory_map::MemoryMap;
use crate::progress::ProgressValue;

/// Device operations that can fail mid-workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Identify,
    Erase,
    Write,
    Read,
    Execute,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Identify => "identify",
            Operation::Erase => "erase",
            Operation::Write => "write",
            Operation::Read => "read",
            Operation::Execute => "execute",
        };
        f.write_str(name)
    }
}

/// Any failure signalled by the device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("link failure during {operation}: {reason}")]
    Transport {
        operation: Operation,
        reason: String,
    },
    #[error("device rejected {operation} at 0x{address:08x}")]
    Rejected { operation: Operation, address: u32 },
    #[error("timeout waiting for {0} to complete")]
    Timeout(Operation),
    #[error("{operation} of {size} bytes at 0x{address:08x} is outside device memory")]
    OutOfRange {
        operation: Operation,
        address: u32,
        size: u32,
    },
    #[error("no device behind port {0}")]
    NotConnected(String),
}

/// Microcontroller reachable over a point-to-point link.
pub trait Device {
    /// Raw identifier bytes reported by the bootloader.
    fn identify(&mut self) -> Result<Vec<u8>, DeviceError>;

    /// Erase `size` bytes from `address`, or the whole device when `size` is
    /// `None`. A memory map, when given, tells the device which segments exist.
    fn erase(
        &mut self,
        address: u32,
        size: Option<u32>,
        memory_map: Option<&MemoryMap>,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError>;

    fn write(
        &mut self,
        address: u32,
        data: &[u8],
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError>;

    fn read(
        &mut self,
        address: u32,
        size: u32,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<Vec<u8>, DeviceError>;

    /// Jump to `address` and start executing.
    fn execute(&mut self, address: u32) -> Result<(), DeviceError>;
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn identify(&mut self) -> Result<Vec<u8>, DeviceError> {
        (**self).identify()
    }

    fn erase(
        &mut self,
        address: u32,
        size: Option<u32>,
        memory_map: Option<&MemoryMap>,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError> {
        (**self).erase(address, size, memory_map, progress)
    }

    fn write(
        &mut self,
        address: u32,
        data: &[u8],
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError> {
        (**self).write(address, data, progress)
    }

    fn read(
        &mut self,
        address: u32,
        size: u32,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<Vec<u8>, DeviceError> {
        (**self).read(address, size, progress)
    }

    fn execute(&mut self, address: u32) -> Result<(), DeviceError> {
        (**self).execute(address)
    }
}
