#![allow(dead_code)]

use masklog::{initialize_with, shutdown, CaptureBuffer, SinkConfig, SinkHandle};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The default sink is process-wide; tests that register one take this lock.
static DEFAULT_SINK_LOCK: Mutex<()> = Mutex::new(());

/// A default sink writing into memory, released when dropped.
pub struct CapturedSink {
    pub capture: CaptureBuffer,
    handle: Option<SinkHandle>,
    _guard: MutexGuard<'static, ()>,
}

impl CapturedSink {
    pub fn install(config: SinkConfig) -> Self {
        let guard = DEFAULT_SINK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let capture = CaptureBuffer::new();
        let handle = initialize_with(config, capture.clone()).expect("sink should build");
        Self { capture, handle: Some(handle), _guard: guard }
    }

    pub fn lines(&self) -> Vec<String> {
        self.capture.lines()
    }

    /// Message part of every line, i.e. what follows the last ` | `.
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .iter()
            .filter_map(|line| line.rsplit(" | ").next().map(str::to_string))
            .collect()
    }

    pub fn shutdown(mut self) -> bool {
        self.handle.take().map(shutdown).unwrap_or(false)
    }
}

impl Drop for CapturedSink {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            shutdown(handle);
        }
    }
}

/// Takes the default sink lock without registering anything.
pub fn lock_default_sink() -> MutexGuard<'static, ()> {
    DEFAULT_SINK_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Compares `actual` against `expected` line by line after dropping the
/// leading `MM-DD HH:mm:ss ` timestamp, printing both sides on mismatch.
pub fn assert_lines_without_timestamp(actual: &[String], expected: &[&str]) {
    let stripped: Vec<&str> = actual.iter().map(|line| strip_timestamp(line)).collect();
    if stripped != expected {
        println!("\n=== Line Comparison ===");
        println!("Actual:");
        for line in &stripped {
            println!("  {line}");
        }
        println!("Expected:");
        for line in expected {
            println!("  {line}");
        }
        panic!("rendered lines differ");
    }
}

/// `03-09 07:05:01 [INFO] ...` -> `[INFO] ...`. Lines without a timestamp
/// (exception blocks) are returned unchanged.
pub fn strip_timestamp(line: &str) -> &str {
    let bytes = line.as_bytes();
    let looks_stamped = bytes.len() > 15
        && bytes[2] == b'-'
        && bytes[5] == b' '
        && bytes[8] == b':'
        && bytes[11] == b':'
        && bytes[14] == b' ';
    if looks_stamped {
        &line[15..]
    } else {
        line
    }
}
