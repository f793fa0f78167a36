// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Shared operator output.
//!
//! Workflow status lines and reporter redraws go through the same handle so
//! they never interleave mid-line. Tests swap stdout for an in-memory buffer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, thread-safe writer for human-readable output.
#[derive(Clone)]
pub struct Console {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    /// Console writing to standard output.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Console writing to an arbitrary sink.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Console backed by a buffer that can be inspected afterwards.
    pub fn buffer() -> (Self, Captured) {
        let captured = Captured::default();
        (Self::from_writer(captured.clone()), captured)
    }

    /// Write one complete line.
    pub fn line(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock();
        writeln!(out, "{}", text)?;
        out.flush()
    }

    /// Write raw text (no newline added) and flush, for carriage-return redraws.
    pub fn raw(&self, text: &str) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // A panic while holding the lock leaves the writer usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// In-memory sink handed out by [`Console::buffer`].
#[derive(Clone, Default)]
pub struct Captured {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
