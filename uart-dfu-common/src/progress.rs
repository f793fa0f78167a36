// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Progress values and the single-line status renderer.
//!
//! Rendering is pure: the same value and animator state always produce the
//! same line. Only terminal values end the line with a newline; everything
//! else starts with a carriage return and is redrawn in place.

use crate::animator::Animator;

/// Width of the progress track in glyphs.
pub const TRACK_WIDTH: usize = 40;

const COMPLETE_GLYPH: char = '█';
const BLANK_GLYPH: char = ' ';
const FAILED_GLYPH: char = '-';

/// Progress of a single workflow step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressValue {
    /// Determinate progress, 0..100.
    Percent(u8),
    /// Operation ongoing without a quantifiable percentage.
    Indeterminate,
    /// Step completed.
    Done,
    /// Step failed.
    Failed,
}

impl ProgressValue {
    /// Build a determinate value; anything at or past 100% is `Done`.
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 100 {
            ProgressValue::Done
        } else {
            ProgressValue::Percent(percent as u8)
        }
    }

    /// Percentage of `done` out of `total`, `Done` once everything is through.
    pub fn from_ratio(done: usize, total: usize) -> Self {
        if total == 0 || done >= total {
            return ProgressValue::Done;
        }
        Self::from_percent((done as u64 * 100 / total as u64) as u32)
    }

    /// `Done` and `Failed` end a reporter's polling loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressValue::Done | ProgressValue::Failed)
    }
}

/// One rendered status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// The line is finished with a newline and will not be redrawn.
    pub terminal: bool,
}

/// Number of filled glyphs for a percentage.
pub fn complete_len(percent: u8) -> usize {
    TRACK_WIDTH * usize::from(percent.min(100)) / 100
}

/// Render a progress value. The animator is only consulted for
/// `Indeterminate`.
pub fn render(value: ProgressValue, animator: &Animator) -> Line {
    match value {
        ProgressValue::Failed => Line {
            text: format!("\r[{}] failed.\n", repeat(FAILED_GLYPH, TRACK_WIDTH)),
            terminal: true,
        },
        ProgressValue::Done => Line {
            text: format!("\r[{}] done.\n", repeat(COMPLETE_GLYPH, TRACK_WIDTH)),
            terminal: true,
        },
        ProgressValue::Percent(percent) => {
            let complete = complete_len(percent);
            Line {
                text: format!(
                    "\r[{}{}] {}%",
                    repeat(COMPLETE_GLYPH, complete),
                    repeat(BLANK_GLYPH, TRACK_WIDTH - complete),
                    percent.min(100)
                ),
                terminal: false,
            }
        }
        ProgressValue::Indeterminate => {
            let position = animator.position();
            let block = animator.block_width();
            let tail = TRACK_WIDTH.saturating_sub(position + block);
            Line {
                text: format!(
                    "\r[{}{}{}] ...",
                    repeat(BLANK_GLYPH, position),
                    repeat(COMPLETE_GLYPH, block),
                    repeat(BLANK_GLYPH, tail)
                ),
                terminal: false,
            }
        }
    }
}

fn repeat(glyph: char, count: usize) -> String {
    std::iter::repeat(glyph).take(count).collect()
}
