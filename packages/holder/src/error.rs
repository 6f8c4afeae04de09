use thiserror::Error;

/// Errors that can occur when accessing the value of a [`Holder`][crate::Holder].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller asked for the held value but the holder was empty.
    #[error("holder of {type_name} is empty")]
    Empty {
        /// The name of the held type, for diagnostics.
        type_name: &'static str,
    },
}

/// A specialized `Result` type for holder operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
