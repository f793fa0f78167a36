// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Memory map: the ordered list of erasable regions supplied by the operator.
//!
//! The on-disk form is a JSON array:
//!
//! ```json
//! [{"address": "0x8000000", "size": "0x4000"}, {"address": 134234112, "size": 16384}]
//! ```
//!
//! Values may be JSON numbers or strings in any base `parse_int` accepts.
//! Regions are kept in file order; overlaps are not checked here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::numeric::parse_int;

/// Errors raised while loading a memory map.
#[derive(Debug, Error)]
pub enum MemoryMapError {
    #[error("cannot read memory map: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed memory map: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One erasable region.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    #[serde(deserialize_with = "int_literal")]
    pub address: u32,
    #[serde(deserialize_with = "int_literal")]
    pub size: u32,
}

impl Region {
    pub fn new(address: u32, size: u32) -> Self {
        Self { address, size }
    }

    /// First address past the region.
    pub fn end(&self) -> u64 {
        u64::from(self.address) + u64::from(self.size)
    }

    /// Whether the region shares at least one byte with `[address, address + size)`.
    pub fn overlaps(&self, address: u32, size: u32) -> bool {
        let end = u64::from(address) + u64::from(size);
        u64::from(self.address) < end && u64::from(address) < self.end()
    }
}

/// Ordered region list, immutable once loaded.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MemoryMap {
    regions: Vec<Region>,
}

impl MemoryMap {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Load a memory map from a JSON file.
    pub fn load(path: &Path) -> Result<Self, MemoryMapError> {
        let text = fs::read_to_string(path)?;
        let map = Self::from_json(&text)?;
        log::debug!("Loaded {} regions from {}", map.len(), path.display());
        Ok(map)
    }

    /// Parse a memory map from JSON text.
    pub fn from_json(text: &str) -> Result<Self, MemoryMapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions touching `[address, address + size)`, in map order.
    pub fn covering(&self, address: u32, size: u32) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(move |region| region.overlaps(address, size))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLiteral {
    Number(u64),
    Text(String),
}

fn int_literal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    use serde::de::Error;

    match IntLiteral::deserialize(deserializer)? {
        IntLiteral::Number(n) => u32::try_from(n)
            .map_err(|_| D::Error::custom(format!("{} does not fit in 32 bits", n))),
        IntLiteral::Text(text) => parse_int(&text)
            .map_err(|e| D::Error::custom(format!("invalid integer {:?}: {}", text, e))),
    }
}
