/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured validation errors for configuration generation.
//!
//! Every table generator and leaf setter validates its whole input before it
//! touches the [`ConfigTree`](crate::tree::ConfigTree), so a returned
//! [`ConfigError`] always means *no* updates were produced.
//!
//! | Variant | Typical cause | Suggested gRPC status |
//! |---|---|---|
//! | `OutOfRange` | priority / PCP outside `[0,7]`, queue count outside `[1,8]` | `InvalidArgument` |
//! | `UnknownEnumValue` | unrecognised PCP type or frame-type literal | `InvalidArgument` |
//! | `LengthViolation` | VLAN / MSTP names longer than 32 characters | `InvalidArgument` |
//! | `InconsistentInput` | parallel lists of different lengths | `InvalidArgument` |
//! | `Tree` | a descent or leaf write broke leaf exclusivity | `Internal` |

use thiserror::Error;

use crate::tree::TreeError;

/// Validation failure raised before any configuration is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric parameter lies outside its permitted range (inclusive).
    #[error("{what} ({value}) is out of range, valid range is [{min}-{max}]")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A string parameter is not one of the literals the YANG model allows.
    #[error("'{value}' is not a valid {what}; valid values are: {valid}")]
    UnknownEnumValue {
        what: &'static str,
        value: String,
        valid: &'static str,
    },

    /// A name exceeds the maximum length of its YANG type.
    #[error("{what} is {len} characters long, at most {max} are allowed")]
    LengthViolation {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// Two lists that are consumed pairwise have different lengths.
    #[error("{left} has {left_len} entries but {right} has {right_len}, they must be equal")]
    InconsistentInput {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ConfigError {
    /// Shorthand used by the range checks in the table modules.
    pub(crate) fn out_of_range(what: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        ConfigError::OutOfRange {
            what,
            value: value.into(),
            min,
            max,
        }
    }
}

/// Reject `name` when it is longer than `max` characters.
pub(crate) fn check_length(what: &'static str, name: &str, max: usize) -> Result<(), ConfigError> {
    let len = name.chars().count();
    if len > max {
        return Err(ConfigError::LengthViolation { what, len, max });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
