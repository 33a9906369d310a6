//! Error types for invite codes.

use thiserror::Error;

/// Why an invite string could not be parsed.
///
/// A validating peer turns any of these into a rejection; none of them is
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Wrong shape: part count, empty part, bad timestamp, length bounds.
    #[error("malformed invite code: {0}")]
    Malformed(String),

    /// A mandatory structured field is absent.
    #[error("invite is missing field `{0}`")]
    MissingField(&'static str),

    /// The structured wrapper or one of its fields does not parse.
    #[error("invalid invite encoding: {0}")]
    Encoding(String),

    /// The version prefix is not one this codec knows.
    #[error("unknown invite version `{0}`")]
    UnknownVersion(String),
}

/// Why an invite could not be rendered to a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A legacy field is empty or contains the `:` delimiter.
    #[error("field `{0}` cannot be carried by a legacy invite")]
    InvalidField(&'static str),

    /// The rendered code falls outside the accepted length bounds.
    #[error("encoded invite is {0} characters, outside the accepted bounds")]
    Length(usize),
}
