// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Firmware flashing tool for microcontroller UART bootloaders.
//!
//! Usage:
//!   uart-dfu --port /dev/ttyUSB0 id
//!   uart-dfu --port /dev/ttyUSB0 load --file firmware.bin --erase --run
//!   uart-dfu --port /dev/ttyUSB0 dump --address 0x8000000 --size 0x4000 --file dump.bin
//!   uart-dfu --port sim load --file firmware.bin

mod cli;
mod commands;
mod device;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // stdout carries the operator output, logs stay quiet unless asked for
    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    cli::run(args)
}
