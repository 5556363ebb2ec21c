//! Configurable destination for `print` output.
//!
//! Enum dispatch, not trait objects: there are exactly three destinations
//! and `print` is a hot path in unit top-level execution.

use parking_lot::Mutex;

/// Print handler that captures output for later assertion.
pub struct BufferPrinter {
    buffer: Mutex<String>,
}

impl BufferPrinter {
    pub fn new() -> Self {
        BufferPrinter {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// All captured output so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Where `print` writes.
pub enum PrintHandler {
    /// Process stdout (the default).
    Stdout,
    /// Captured to a buffer, for tests and embedding hosts.
    Buffer(BufferPrinter),
    /// Discarded.
    Silent,
}

impl PrintHandler {
    pub fn stdout() -> Self {
        PrintHandler::Stdout
    }

    pub fn buffer() -> Self {
        PrintHandler::Buffer(BufferPrinter::new())
    }

    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buf) => buf.println(msg),
            PrintHandler::Silent => {}
        }
    }

    /// Captured output. Empty for non-capturing handlers.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buf) => buf.output(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let PrintHandler::Buffer(buf) = self {
            buf.clear();
        }
    }
}
