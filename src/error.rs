use thiserror::Error;

/// Opaque failure signal handed back to callers. Consumers branch on the
/// variant or render it through `Display`; no further structure is promised.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Generic(String),
    /// OS-level failure: errno-style code plus the operation that produced it.
    #[error("{code} {message}")]
    Os { code: i32, message: String },
    #[error("todo")]
    Unimplemented,
    #[error("unknown")]
    Unknown,
}

impl Error {
    /// Snapshot `errno` for the failed operation named by `message`.
    pub fn last_os(message: &str) -> Self {
        let code = std::io::Error::last_os_error().raw_os_error().unwrap_or(-1);

        Error::Os {
            code,
            message: message.to_string(),
        }
    }
}
