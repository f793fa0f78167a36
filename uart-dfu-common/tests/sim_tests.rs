// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Tests for the simulated device.

use std::cell::RefCell;

use uart_dfu_common::device::{Device, DeviceError, Operation};
use uart_dfu_common::memory_map::{MemoryMap, Region};
use uart_dfu_common::progress::ProgressValue;
use uart_dfu_common::sim::{SimConfig, SimulatedDevice, FLASH_BASE};

fn small_config() -> SimConfig {
    SimConfig {
        size: 4096,
        chunk_size: 256,
        ..SimConfig::default()
    }
}

fn ignore(_: ProgressValue) {}

#[test]
fn test_fresh_flash_is_erased() {
    let device = SimulatedDevice::new(small_config());
    assert!(device.data().iter().all(|b| *b == 0xFF));
}

#[test]
fn test_identify_returns_configured_id() {
    let mut device = SimulatedDevice::new_default();
    assert_eq!(device.identify().unwrap(), vec![0x04, 0x13]);
}

#[test]
fn test_write_then_read_back() {
    let mut device = SimulatedDevice::new(small_config());
    device
        .write(FLASH_BASE + 16, &[0xAA, 0xBB, 0xCC, 0xDD], &ignore)
        .unwrap();

    let data = device.read(FLASH_BASE + 16, 4, &ignore).unwrap();
    assert_eq!(data, vec![0xAA, 0xBB, 0xCC, 0xDD]);
}

#[test]
fn test_write_only_clears_bits() {
    let mut device = SimulatedDevice::with_data(small_config(), &[0x0F]);
    device.write(FLASH_BASE, &[0xF1], &ignore).unwrap();
    assert_eq!(device.data()[0], 0x01);
}

#[test]
fn test_write_reports_percent_per_chunk() {
    let mut device = SimulatedDevice::new(small_config());
    let seen = RefCell::new(Vec::new());

    device
        .write(FLASH_BASE, &[0u8; 1024], &|v| seen.borrow_mut().push(v))
        .unwrap();

    assert_eq!(
        seen.into_inner(),
        vec![
            ProgressValue::Percent(25),
            ProgressValue::Percent(50),
            ProgressValue::Percent(75),
            ProgressValue::Done,
        ]
    );
}

#[test]
fn test_erase_range_without_map() {
    let mut device = SimulatedDevice::with_data(small_config(), &[0u8; 4096]);
    let seen = RefCell::new(Vec::new());

    device
        .erase(FLASH_BASE + 0x100, Some(0x100), None, &|v| {
            seen.borrow_mut().push(v)
        })
        .unwrap();

    assert!(device.data()[0x100..0x200].iter().all(|b| *b == 0xFF));
    assert!(device.data()[..0x100].iter().all(|b| *b == 0));
    assert!(device.data()[0x200..].iter().all(|b| *b == 0));
    assert_eq!(seen.borrow().last(), Some(&ProgressValue::Done));
}

#[test]
fn test_mass_erase() {
    let mut device = SimulatedDevice::with_data(small_config(), &[0u8; 4096]);
    device.erase(FLASH_BASE, None, None, &ignore).unwrap();
    assert!(device.data().iter().all(|b| *b == 0xFF));
}

#[test]
fn test_erase_with_map_rounds_out_to_segments() {
    let mut device = SimulatedDevice::with_data(small_config(), &[0u8; 4096]);
    let map = MemoryMap::new(vec![
        Region::new(FLASH_BASE, 0x400),
        Region::new(FLASH_BASE + 0x400, 0x400),
        Region::new(FLASH_BASE + 0x800, 0x800),
    ]);

    device
        .erase(FLASH_BASE, Some(0x500), Some(&map), &ignore)
        .unwrap();

    assert!(device.data()[..0x800].iter().all(|b| *b == 0xFF));
    assert!(device.data()[0x800..].iter().all(|b| *b == 0));
}

#[test]
fn test_erase_with_map_outside_regions_fails() {
    let mut device = SimulatedDevice::new(small_config());
    let map = MemoryMap::new(vec![Region::new(FLASH_BASE, 0x400)]);

    let err = device
        .erase(FLASH_BASE + 0x800, Some(0x10), Some(&map), &ignore)
        .unwrap_err();
    assert!(matches!(
        err,
        DeviceError::OutOfRange {
            operation: Operation::Erase,
            ..
        }
    ));
}

#[test]
fn test_read_out_of_range() {
    let mut device = SimulatedDevice::new(small_config());
    let err = device.read(FLASH_BASE + 4000, 200, &ignore).unwrap_err();
    assert_eq!(
        err,
        DeviceError::OutOfRange {
            operation: Operation::Read,
            address: FLASH_BASE + 4000,
            size: 200,
        }
    );
}

#[test]
fn test_write_below_base_fails() {
    let mut device = SimulatedDevice::new(small_config());
    assert!(device.write(0x1000, &[1, 2, 3], &ignore).is_err());
}

#[test]
fn test_execute_records_address() {
    let mut device = SimulatedDevice::new(small_config());
    assert_eq!(device.executed(), None);
    device.execute(FLASH_BASE).unwrap();
    assert_eq!(device.executed(), Some(FLASH_BASE));
}

#[test]
fn test_execute_outside_flash_fails() {
    let mut device = SimulatedDevice::new(small_config());
    assert!(device.execute(0x2000_0000).is_err());
    assert_eq!(device.executed(), None);
}
