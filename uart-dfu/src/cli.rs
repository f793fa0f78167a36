// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use uart_dfu_common::{parse_int, Console};

use crate::commands::{self, LoadOptions};
use crate::device;

/// Serial port used when none is given.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Start of internal flash on the usual targets.
pub const DEFAULT_ADDRESS: &str = "0x8000000";

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "uart-dfu")]
#[command(about = "Firmware flashing tool for microcontroller UART bootloaders")]
pub struct Cli {
    /// Serial port (e.g., /dev/ttyUSB0), or `sim` for the in-memory device
    #[arg(short, long, env = "UART_DFU_PORT", default_value = DEFAULT_PORT)]
    pub port: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Load a firmware image, verify it and optionally start it
    Load {
        /// Memory address for loading the binary file
        #[arg(short, long, default_value = DEFAULT_ADDRESS, value_parser = parse_int)]
        address: u32,

        /// Binary firmware file
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,

        /// JSON file describing the memory layout: [{"address": "..", "size": ".."}, ...]
        #[arg(short, long, value_name = "FILE")]
        memory_map: Option<PathBuf>,

        /// Erase enough memory to store the firmware (whole memory without a memory map)
        #[arg(short, long)]
        erase: bool,

        /// Run the program after loading
        #[arg(short, long)]
        run: bool,
    },

    /// Erase device memory
    Erase {
        /// Memory address for erasing
        #[arg(short, long, default_value = DEFAULT_ADDRESS, value_parser = parse_int)]
        address: u32,

        /// JSON file describing the memory layout: [{"address": "..", "size": ".."}, ...]
        #[arg(short, long, value_name = "FILE")]
        memory_map: Option<PathBuf>,

        /// Number of bytes to erase (whole memory when omitted)
        #[arg(short, long, value_parser = parse_int)]
        size: Option<u32>,
    },

    /// Dump device memory to a file
    Dump {
        /// Memory address for the dump
        #[arg(short, long, default_value = DEFAULT_ADDRESS, value_parser = parse_int)]
        address: u32,

        /// Number of bytes to dump
        #[arg(short, long, value_parser = parse_int)]
        size: u32,

        /// File for the memory dump
        #[arg(short, long, value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the device identifier
    Id,

    /// Start executing from an address
    Run {
        /// Memory address to run from
        #[arg(short, long, default_value = DEFAULT_ADDRESS, value_parser = parse_int)]
        address: u32,
    },
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let mut device = device::open_device(&cli.port)?;
    let console = Console::stdout();

    match cli.command {
        Commands::Load {
            address,
            file,
            memory_map,
            erase,
            run,
        } => {
            let options = LoadOptions {
                address,
                file,
                memory_map,
                erase,
                run,
            };
            commands::load(&mut device, &console, &options).map(|_| ())
        }
        Commands::Erase {
            address,
            memory_map,
            size,
        } => commands::erase(&mut device, &console, address, size, memory_map.as_deref()),
        Commands::Dump {
            address,
            size,
            file,
        } => commands::dump(&mut device, &console, address, size, &file),
        Commands::Id => commands::id(&mut device, &console),
        Commands::Run { address } => commands::run(&mut device, &console, address),
    }
}
