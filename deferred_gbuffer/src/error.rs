//! Error types for the deferred G-buffer
//!
//! Precondition violations (double kill, clearing an unbound buffer, reloading
//! a live buffer) are reported as `InvalidState`. Framebuffer completeness is
//! not an error: it is reported through the `bool` returned by `update()`.

use std::fmt;

/// Result type for G-buffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// G-buffer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Initialization failed (context, shader program, framebuffer object)
    InitializationFailed(String),

    /// Lifecycle precondition violated by the caller
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```ignore
/// let err = gbuffer_err!("deferred::gl", "glCreateTexture failed: {}", msg);
/// ```
#[macro_export]
macro_rules! gbuffer_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::gbuffer_error!($source, "{}", message);
        $crate::deferred::Error::BackendError(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
