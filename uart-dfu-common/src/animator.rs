// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Bouncing block animation for operations without a known percentage.
//!
//! The block grows from the left edge, slides to the right edge, shrinks
//! into it, then runs the same sequence backwards. Each call to
//! [`Animator::step`] advances exactly one frame.

use crate::progress::TRACK_WIDTH;

/// Maximum width of the bouncing block.
pub const BLOCK_MAX_WIDTH: usize = 20;

/// Direction the block is travelling in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// Animation state. Invariant: `position + block_width <= TRACK_WIDTH` and
/// `block_width <= BLOCK_MAX_WIDTH`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Animator {
    position: usize,
    block_width: usize,
    direction: Direction,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn block_width(&self) -> usize {
        self.block_width
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Advance the animation by one frame.
    pub fn step(&mut self) {
        match self.direction {
            Direction::Forward => self.step_forward(),
            Direction::Reverse => self.step_reverse(),
        }
    }

    fn step_forward(&mut self) {
        if self.position == 0 && self.block_width < BLOCK_MAX_WIDTH {
            self.block_width += 1;
        } else if self.position + self.block_width < TRACK_WIDTH {
            self.position += 1;
        } else if self.block_width > 0 {
            self.block_width -= 1;
            self.position += 1;
        } else {
            self.direction = Direction::Reverse;
        }
    }

    fn step_reverse(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            if self.block_width < BLOCK_MAX_WIDTH {
                self.block_width += 1;
            }
        } else if self.block_width > 0 {
            self.block_width -= 1;
        } else {
            self.direction = Direction::Forward;
        }
    }
}
