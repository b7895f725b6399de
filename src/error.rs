//! This module contains some error and result definitions used in this crate.

/// An enumeration of the errors that may occur when parsing a
/// [Grid](crate::Grid) from its 81-character line representation. Malformed
/// input is always detected here, before any propagation or search has
/// started.
#[derive(Debug, Eq, PartialEq)]
pub enum GridParseError {

    /// Indicates that the code does not consist of exactly 81 characters. The
    /// wrapped value is the number of characters that were actually provided.
    WrongLength(usize),

    /// Indicates that the code contains a character which is neither a digit
    /// from 1 to 9 nor the placeholder `'.'`. The wrapped value is the
    /// offending character.
    InvalidCharacter(char)
}

/// Syntactic sugar for `Result<V, GridParseError>`.
pub type GridParseResult<V> = Result<V, GridParseError>;
