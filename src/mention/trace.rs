//! Append-only debug trace buffer.

/// Records discovery and delivery steps for inspection by callers.
///
/// The buffer is appended to only when debug mode is enabled; it never
/// affects control flow. Every pushed message is also emitted as a
/// `tracing` debug event regardless of the debug flag, so structured
/// logging keeps working when the trace buffer is off.
#[derive(Debug, Default)]
pub struct DebugTrace {
    enabled: bool,
    buf: String,
}

impl DebugTrace {
    /// Creates a trace buffer with the given debug flag.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            buf: String::new(),
        }
    }

    /// Enables or disables trace collection.
    ///
    /// Disabling does not clear messages already collected.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if trace collection is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends a message to the trace when enabled.
    pub fn push(&mut self, msg: &str) {
        if !msg.is_empty() {
            tracing::debug!("{msg}");
        }
        if self.enabled {
            self.buf.push('\t');
            self.buf.push_str(msg);
            self.buf.push('\n');
        }
    }

    /// Returns the collected trace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}
