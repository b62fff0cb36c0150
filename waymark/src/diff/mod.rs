//! Walking object histories revision by revision.
//!
//! A history stream holds every version of every object, sorted by kind, id and version.
//! [`DiffIterator`] turns such a stream into [`DiffObject`]s, each revision paired with the ones
//! right before and after it. [`apply_diff`] sends those to one or more [`DiffHandler`]s by
//! object kind.

use thiserror::Error;
use waymark_types::ItemType;

use crate::io::SourceError;

mod iterator;
mod object;
mod visitor;

pub use iterator::DiffIterator;
pub use object::{Diff, DiffNode, DiffObject, DiffRelation, DiffView, DiffWay, Revision};
pub use visitor::{apply_diff, apply_diff_buffer, apply_diff_source, DiffHandler, DiffHandlers};

/// Error applying a diff.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The stream contains an object of a kind handlers cannot receive.
    #[error("unknown object kind: {0}")]
    UnknownKind(ItemType),
    /// Reading the stream failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
