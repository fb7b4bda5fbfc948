//! Telemetry utilities for command timing and log correlation.

use std::time::Instant;
use tracing::debug;

/// Guard for timing command execution.
///
/// Logs the command latency when dropped.
pub struct CommandTimer {
    command: &'static str,
    start: Instant,
}

impl CommandTimer {
    /// Start timing a command.
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        debug!(command = self.command, elapsed_ms, "Command finished");
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for a command execution.
    pub fn command(name: &str, invoker: &str) -> Span {
        info_span!("command", name = %name, invoker = %invoker)
    }

    /// Create a span for a card database lookup.
    pub fn lookup(term: &str) -> Span {
        info_span!("lookup", term = %term)
    }
}
