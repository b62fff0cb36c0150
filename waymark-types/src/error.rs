//! Error type used by the crate.

use thiserror::Error;

/// A location was used as a coordinate while it was undefined or outside of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid location")]
pub struct InvalidLocation;
