// Tue Jan 13 2026 - Alex

use thiserror::Error;

/// A failed OS call. `code` is the errno / `GetLastError` value when the OS
/// reported one; the dynamic loader only reports text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Platform error{}: {message}", .code.map(|c| format!(" {}", c)).unwrap_or_default())]
pub struct PlatformError {
    code: Option<i32>,
    message: String,
}

impl PlatformError {
    pub fn from_code(code: i32) -> Self {
        Self {
            code: Some(code),
            message: crate::platform::describe_error(code),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn last_os_error() -> Self {
        match std::io::Error::last_os_error().raw_os_error() {
            Some(code) => Self::from_code(code),
            None => Self::with_message("Unknown OS error"),
        }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for PlatformError {
    fn from(error: std::io::Error) -> Self {
        match error.raw_os_error() {
            Some(code) => Self::from_code(code),
            None => Self::with_message(error.to_string()),
        }
    }
}
