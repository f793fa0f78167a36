// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Background progress reporter.
//!
//! The producer (a `Device` call running on the workflow thread) stores
//! values into a shared cell whenever it likes; a dedicated thread reads the
//! cell once per wake period and redraws the status line. The thread only
//! exits after it has drawn a terminal value, so the final line can never be
//! lost to a race with the last `update`.

use std::panic;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::animator::Animator;
use crate::console::Console;
use crate::progress::{render, ProgressValue};

/// Default redraw period.
pub const WAKE_PERIOD: Duration = Duration::from_millis(200);

/// Handle to a running reporter thread.
pub struct ProgressReporter {
    cell: Arc<Mutex<ProgressValue>>,
    handle: JoinHandle<usize>,
}

impl ProgressReporter {
    /// Start polling immediately with the default wake period.
    pub fn start(initial: ProgressValue, console: Console) -> Self {
        Self::with_period(initial, console, WAKE_PERIOD)
    }

    /// Reporter for an operation without a known percentage.
    pub fn indeterminate(console: Console) -> Self {
        Self::start(ProgressValue::Indeterminate, console)
    }

    /// Reporter for an operation that reports percentages, starting at 0%.
    pub fn determinate(console: Console) -> Self {
        Self::start(ProgressValue::Percent(0), console)
    }

    /// Start polling with a custom wake period.
    pub fn with_period(initial: ProgressValue, console: Console, period: Duration) -> Self {
        let cell = Arc::new(Mutex::new(initial));
        let shared = Arc::clone(&cell);

        log::trace!("Starting progress reporter ({:?}, every {:?})", initial, period);
        let handle = thread::spawn(move || poll(&shared, &console, period));

        Self { cell, handle }
    }

    /// Store a new value. Last write wins; never blocks on rendering.
    pub fn update(&self, value: ProgressValue) {
        *self.cell.lock().unwrap_or_else(|e| e.into_inner()) = value;
    }

    /// Value currently held in the cell.
    pub fn current(&self) -> ProgressValue {
        *self.cell.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Wait for the polling loop to draw a terminal value and exit.
    ///
    /// Returns the number of frames drawn. Blocks forever if no terminal
    /// value is ever stored. A panic on the reporter thread is resumed here.
    pub fn join(self) -> usize {
        match self.handle.join() {
            Ok(frames) => {
                log::trace!("Progress reporter stopped after {} frames", frames);
                frames
            }
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

fn poll(cell: &Mutex<ProgressValue>, console: &Console, period: Duration) -> usize {
    let mut animator = Animator::new();
    let mut frames = 0;

    loop {
        let value = *cell.lock().unwrap_or_else(|e| e.into_inner());
        if value == ProgressValue::Indeterminate {
            animator.step();
        }

        let line = render(value, &animator);
        if let Err(e) = console.raw(&line.text) {
            log::warn!("Failed to draw progress: {}", e);
        }
        frames += 1;

        if line.terminal {
            return frames;
        }
        thread::sleep(period);
    }
}
