use thiserror::Error;

/// Errors returned by the compressor
#[derive(Debug, Error)]
pub enum CompressError {
    /// A working buffer could not be allocated. Nothing allocated before the
    /// failure is leaked.
    #[error("failed to allocate {what} ({len} samples)")]
    Allocation { what: &'static str, len: usize },
}

pub type Result<T> = std::result::Result<T, CompressError>;
