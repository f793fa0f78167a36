// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! In-memory device emulating a microcontroller's internal flash.
//!
//! Useful for exercising the workflows without hardware. Programming follows
//! NOR flash rules: erased bytes read `0xFF` and writes can only clear bits,
//! so writing over unerased data shows up as a checksum mismatch.

use crate::device::{Device, DeviceError, Operation};
use crate::memory_map::MemoryMap;
use crate::progress::ProgressValue;

/// Start of the emulated flash.
pub const FLASH_BASE: u32 = 0x0800_0000;

/// Configuration for the simulated device.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Address of the first flash byte
    pub base: u32,
    /// Flash size in bytes
    pub size: usize,
    /// Bytes transferred per progress notification
    pub chunk_size: usize,
    /// Identifier returned by `identify`
    pub id: Vec<u8>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base: FLASH_BASE,
            size: 128 * 1024,
            chunk_size: 256,
            id: vec![0x04, 0x13], // STM32F40x/41x
        }
    }
}

/// Simulated device.
pub struct SimulatedDevice {
    config: SimConfig,
    flash: Vec<u8>,
    executed: Option<u32>,
}

impl SimulatedDevice {
    pub fn new(config: SimConfig) -> Self {
        let flash = vec![0xFF; config.size];
        Self {
            config,
            flash,
            executed: None,
        }
    }

    /// Simulated device with default configuration.
    pub fn new_default() -> Self {
        Self::new(SimConfig::default())
    }

    /// Simulated device with pre-filled flash contents.
    pub fn with_data(config: SimConfig, initial: &[u8]) -> Self {
        let mut device = Self::new(config);
        let len = initial.len().min(device.flash.len());
        device.flash[..len].copy_from_slice(&initial[..len]);
        device
    }

    /// Raw flash contents.
    pub fn data(&self) -> &[u8] {
        &self.flash
    }

    /// Address of the last `execute` call, if any.
    pub fn executed(&self) -> Option<u32> {
        self.executed
    }

    fn offset(
        &self,
        operation: Operation,
        address: u32,
        size: usize,
    ) -> Result<usize, DeviceError> {
        let out_of_range = || DeviceError::OutOfRange {
            operation,
            address,
            size: size as u32,
        };

        let offset = address
            .checked_sub(self.config.base)
            .ok_or_else(out_of_range)? as usize;
        if offset + size > self.flash.len() {
            return Err(out_of_range());
        }
        Ok(offset)
    }

    fn erase_range(
        &mut self,
        address: u32,
        size: usize,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError> {
        let start = self.offset(Operation::Erase, address, size)?;
        for chunk in self.flash[start..start + size].chunks_mut(self.config.chunk_size) {
            chunk.fill(0xFF);
            progress(ProgressValue::Indeterminate);
        }
        Ok(())
    }
}

impl Device for SimulatedDevice {
    fn identify(&mut self) -> Result<Vec<u8>, DeviceError> {
        Ok(self.config.id.clone())
    }

    fn erase(
        &mut self,
        address: u32,
        size: Option<u32>,
        memory_map: Option<&MemoryMap>,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError> {
        match (size, memory_map) {
            (None, _) => {
                log::debug!("sim: mass erase");
                let (base, len) = (self.config.base, self.flash.len());
                self.erase_range(base, len, progress)?;
            }
            (Some(size), None) => self.erase_range(address, size as usize, progress)?,
            (Some(size), Some(map)) => {
                // Whole segments are erased, so the range is rounded out to
                // the regions it touches.
                let regions: Vec<_> = map.covering(address, size).copied().collect();
                if regions.is_empty() {
                    return Err(DeviceError::OutOfRange {
                        operation: Operation::Erase,
                        address,
                        size,
                    });
                }
                for region in regions {
                    log::debug!(
                        "sim: erasing segment 0x{:08x}+{}",
                        region.address,
                        region.size
                    );
                    self.erase_range(region.address, region.size as usize, progress)?;
                }
            }
        }
        progress(ProgressValue::Done);
        Ok(())
    }

    fn write(
        &mut self,
        address: u32,
        data: &[u8],
        progress: &dyn Fn(ProgressValue),
    ) -> Result<(), DeviceError> {
        let start = self.offset(Operation::Write, address, data.len())?;
        let mut written = 0;

        for chunk in data.chunks(self.config.chunk_size) {
            for (cell, byte) in self.flash[start + written..].iter_mut().zip(chunk) {
                *cell &= *byte;
            }
            written += chunk.len();
            progress(ProgressValue::from_ratio(written, data.len()));
        }
        if data.is_empty() {
            progress(ProgressValue::Done);
        }
        Ok(())
    }

    fn read(
        &mut self,
        address: u32,
        size: u32,
        progress: &dyn Fn(ProgressValue),
    ) -> Result<Vec<u8>, DeviceError> {
        let size = size as usize;
        let start = self.offset(Operation::Read, address, size)?;
        let mut out = Vec::with_capacity(size);

        for chunk in self.flash[start..start + size].chunks(self.config.chunk_size) {
            out.extend_from_slice(chunk);
            progress(ProgressValue::from_ratio(out.len(), size));
        }
        if size == 0 {
            progress(ProgressValue::Done);
        }
        Ok(out)
    }

    fn execute(&mut self, address: u32) -> Result<(), DeviceError> {
        self.offset(Operation::Execute, address, 0)?;
        self.executed = Some(address);
        Ok(())
    }
}
