//! Crate error type
//!
//! The simulation itself never fails: misuse is a silent no-op. Errors only
//! surface from tuning validation/parsing and from the explicit `try_*`
//! engine calls.

use std::fmt;

use crate::sim::RunState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// An engine operation was requested outside the `Running` state
    InvalidState {
        operation: &'static str,
        state: RunState,
    },
    /// A tuning value failed validation
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },
    /// Tuning JSON could not be parsed or written
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState { operation, state } => {
                write!(f, "cannot {operation} while run is {state}")
            }
            Self::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
            Self::Json(err) => write!(f, "tuning json: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidState {
            operation: "step",
            state: RunState::Ended,
        };
        assert_eq!(err.to_string(), "cannot step while run is ended");

        let err = Error::InvalidTuning {
            field: "gravity",
            reason: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "invalid tuning value `gravity`: must be positive"
        );
    }

    #[test]
    fn test_json_error_has_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::from(parse);
        assert!(std::error::Error::source(&err).is_some());
    }
}
