//! Error reporting context
//!
//! Every [`Profile`](crate::Profile) carries a [`Context`]. Operations that
//! fail report through it before returning the error: a `tracing` warning is
//! always emitted, and the optional error handler is invoked with the
//! numeric error class and message.
//!
//! Handlers are attached per context, never process-wide, so two hosts in
//! the same process can observe their own profiles independently.

use std::fmt;
use std::sync::Arc;

use crate::Error;

/// Error classes passed to error handlers
///
/// Numbering matches the `cmsERROR_*` codes of Little CMS so host
/// applications can keep their existing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    Undefined = 0,
    File = 1,
    Range = 2,
    Internal = 3,
    Null = 4,
    Read = 5,
    Seek = 6,
    Write = 7,
    UnknownExtension = 8,
    ColorspaceCheck = 9,
    AlreadyDefined = 10,
    BadSignature = 11,
    CorruptionDetected = 12,
    NotSuitable = 13,
}

impl ErrorCode {
    /// Numeric value of the code
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Callback invoked with every reported error
pub type ErrorHandler = Arc<dyn Fn(ErrorCode, &str) + Send + Sync>;

/// Error reporting context
#[derive(Clone, Default)]
pub struct Context {
    handler: Option<ErrorHandler>,
}

impl Context {
    /// Create a context without an error handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an error handler
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(ErrorCode, &str) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Remove the error handler
    pub fn clear_error_handler(&mut self) {
        self.handler = None;
    }

    /// Check if an error handler is attached
    pub fn has_error_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Report an error through this context
    pub fn report(&self, err: &Error) {
        let code = err.code();
        tracing::warn!(code = code.as_u32(), "{err}");
        if let Some(handler) = &self.handler {
            handler(code, &err.to_string());
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("has_error_handler", &self.has_error_handler())
            .finish()
    }
}
