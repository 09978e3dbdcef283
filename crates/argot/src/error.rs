//! The two failure kinds the engine can report.
//!
//! [`DefinitionError`] is a configuration mistake made by the program author
//! and always surfaces before any parsing happens. [`ParseError`] is the
//! expected-at-runtime kind raised while consuming a user-supplied argument
//! vector. The engine only returns these; reporting and process exit are the
//! caller's business.

use thiserror::Error;

/// Rejected option configuration, raised while building a definition or
/// registering it with a [`Parser`](crate::Parser).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// An alias was the empty string.
    #[error("alias cannot be empty")]
    EmptyAlias,

    /// An alias did not match the alias grammar.
    #[error("invalid alias: {0:?}")]
    InvalidAlias(String),

    /// A definition reached `build()` without any alias.
    #[error("option must have at least one alias")]
    NoAliases,

    /// An alias is already mapped to a previously registered option.
    #[error("alias cannot duplicate: {0}")]
    DuplicateAlias(String),
}

/// Malformed user input discovered while consuming an argument vector.
///
/// No partial result survives a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option-shaped token named no registered option.
    #[error("option {0} not found")]
    UnknownOption(String),

    /// A bare token appeared after options started, without a `--` before it.
    #[error("invalid option: {0}")]
    InvalidToken(String),

    /// A value option was the last token, so its value never arrived.
    #[error("missing value for option {aliases}")]
    MissingValue {
        /// Every alias of the dangling option, joined with `/`.
        aliases: String,
    },

    /// A recorded value failed the option's validator.
    #[error("value for option {aliases} is not valid")]
    InvalidValue {
        /// Every alias of the offending option, joined with `/`.
        aliases: String,
    },
}
