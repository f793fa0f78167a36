// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Integer literals as operators type them: `0x8000000`, `0b1010`, `0o17`,
//! `4096`, with optional `_` separators. A decimal literal may not start
//! with `0` (`010` is ambiguous between octal and decimal), except for zero
//! itself.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised for malformed integer literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntLiteralError {
    #[error("leading zeros are not allowed in decimal literal {0:?}; use a 0o prefix for octal")]
    LeadingZero(String),
    #[error(transparent)]
    Invalid(#[from] ParseIntError),
}

/// Parse an unsigned integer, picking the base from its prefix.
pub fn parse_int(text: &str) -> Result<u32, IntLiteralError> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (oct, 8)
    } else {
        (lower.as_str(), 10)
    };

    if radix == 10 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0') {
        return Err(IntLiteralError::LeadingZero(text.trim().to_string()));
    }

    Ok(u32::from_str_radix(digits, radix)?)
}
