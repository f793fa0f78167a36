// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types and utilities for uart-dfu.
//!
//! This crate holds everything the workflows need that is not tied to the
//! command line:
//! - `progress`: progress values and the single-line status renderer
//! - `animator`: the bouncing block drawn for indeterminate operations
//! - `reporter`: the background thread that redraws progress at a fixed pace
//! - `memory_map`: the operator-supplied region list
//! - `device`: the `Device` trait the workflows drive, plus its error type
//! - `sim`: an in-memory device for bench use and tests

pub mod animator;
pub mod console;
pub mod device;
pub mod memory_map;
pub mod numeric;
pub mod progress;
pub mod reporter;
pub mod sim;

// Re-export commonly used types
pub use animator::{Animator, Direction, BLOCK_MAX_WIDTH};
pub use console::{Captured, Console};
pub use device::{Device, DeviceError, Operation};
pub use memory_map::{MemoryMap, MemoryMapError, Region};
pub use numeric::{parse_int, IntLiteralError};
pub use progress::{render, Line, ProgressValue, TRACK_WIDTH};
pub use reporter::{ProgressReporter, WAKE_PERIOD};
pub use sim::{SimConfig, SimulatedDevice, FLASH_BASE};
