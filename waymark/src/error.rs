//! Error types used by the crate.

use thiserror::Error;

use crate::diff::DiffError;
use crate::geom::GeometryError;
use crate::io::SourceError;

/// Waymark error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaymarkError {
    /// Failed to build a geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// Failed to apply a diff.
    #[error(transparent)]
    Diff(#[from] DiffError),
    /// Failed to read input.
    #[error(transparent)]
    Source(#[from] SourceError),
}
