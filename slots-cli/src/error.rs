use std::fmt;

use rvjni_slots::ArgKind;

/// Errors from reading argument descriptors and slot words on the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum ArgParseError {
    /// The descriptor is not of the form `kind:value`.
    MissingKind(String),
    /// The kind is not one of `i32`, `i64`, `ref`, `f32`, `f64`.
    UnknownKind(String),
    /// The value text does not fit the kind.
    InvalidValue { kind: ArgKind, text: String },
    /// A slot word is not a 32-bit decimal or hex number.
    InvalidSlot(String),
    /// An address is not a 32-bit decimal or hex number.
    InvalidAddress(String),
    /// There are fewer slots than the kinds consume.
    NotEnoughSlots { needed: usize, available: usize },
}

impl fmt::Display for ArgParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgParseError::MissingKind(arg) => {
                write!(f, "expected kind:value but got '{arg}'")
            }
            ArgParseError::UnknownKind(kind) => {
                write!(f, "unknown kind '{kind}' (expected i32, i64, ref, f32 or f64)")
            }
            ArgParseError::InvalidValue { kind, text } => {
                write!(f, "'{text}' is not a valid {kind} value")
            }
            ArgParseError::InvalidSlot(text) => write!(f, "'{text}' is not a 32-bit slot word"),
            ArgParseError::InvalidAddress(text) => write!(f, "'{text}' is not a 32-bit address"),
            ArgParseError::NotEnoughSlots { needed, available } => {
                write!(f, "kinds need {needed} slot(s) but {available} were given")
            }
        }
    }
}

impl std::error::Error for ArgParseError {}
