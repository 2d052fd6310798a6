//! Parse failure taxonomy.

use thiserror::Error;

/// Failure of one [`parse`](crate::Flags::parse) invocation.
///
/// Messages carry the offending flag's long name (or positional label), the
/// raw text when coercion rejected it, and the flag's pre-rendered help line
/// when one is registered.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required option or positional ended the scan with no captured value
    /// and no default to fall back on.
    #[error("{0}")]
    RequiredFlagNotGiven(String),

    /// A captured value was rejected by coercion.
    #[error("{0}")]
    InvalidInput(String),

    /// Two registrations share a long name or a short character.
    #[error("{0}")]
    DuplicateName(String),
}
