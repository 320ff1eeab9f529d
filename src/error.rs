//! Structured error kinds (§7). Matches the hand-written
//! `Display`/`std::error::Error` style of `geo_types::geometry::error::Error`
//! rather than pulling in a derive-macro error crate the teacher does not
//! use for this concern.

use std::fmt;

/// Convenience alias used throughout the crate's fallible APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// NaN/infinite coordinate, negative epsilon, empty bounding rectangle,
    /// or a duplicate site under epsilon.
    InvalidInput { message: String },
    /// A query that only makes sense on a bounded face, a zero-area
    /// polygon's centroid, or an out-of-range index.
    PreconditionViolation { message: String },
    /// Raised only by `validate()` or internal assertions: twin mismatch,
    /// an unclosed cycle, a positively-oriented outer boundary.
    TopologyViolation { message: String },
    /// `find`/`locate` found no match.
    NotFound { message: String },
    /// A near-degeneracy neither epsilon mode resolved deterministically;
    /// callers should retry with a larger epsilon.
    NumericIndeterminate { message: String },
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::PreconditionViolation {
            message: message.into(),
        }
    }

    pub fn topology(message: impl Into<String>) -> Self {
        Error::TopologyViolation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    pub fn numeric_indeterminate(message: impl Into<String>) -> Self {
        Error::NumericIndeterminate {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput { message } => write!(f, "invalid input: {message}"),
            Error::PreconditionViolation { message } => {
                write!(f, "precondition violation: {message}")
            }
            Error::TopologyViolation { message } => write!(f, "topology violation: {message}"),
            Error::NotFound { message } => write!(f, "not found: {message}"),
            Error::NumericIndeterminate { message } => {
                write!(f, "numerically indeterminate: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Rejects NaN/infinite coordinates and negative epsilons at the boundary,
/// per §6 ("an implementation may either reject them at the boundary or
/// leave behavior unspecified, consistently" — this crate rejects).
pub fn check_epsilon(eps: f64) -> Result<()> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(Error::invalid_input(format!(
            "epsilon must be finite and >= 0, got {eps}"
        )));
    }
    Ok(())
}

pub fn check_finite_point(p: &crate::types::Point, context: &str) -> Result<()> {
    if !p.is_finite() {
        return Err(Error::invalid_input(format!(
            "{context}: coordinate must be finite, got ({}, {})",
            p.x, p.y
        )));
    }
    Ok(())
}
