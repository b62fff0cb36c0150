//! In-memory container of objects.

use std::cmp::Ordering;

use waymark_types::OsmObject;

/// Ordered list of objects, the unit a [`Source`](crate::io::Source) produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    objects: Vec<OsmObject>,
}

impl Buffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object.
    pub fn push(&mut self, object: impl Into<OsmObject>) {
        self.objects.push(object.into());
    }

    /// Iterates over the objects in order.
    pub fn iter(&self) -> std::slice::Iter<'_, OsmObject> {
        self.objects.iter()
    }

    /// Number of objects in the buffer.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if there are no objects in the buffer.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Sorts objects in history order: by kind, then id, then version.
    ///
    /// The sort is stable, so equal revisions keep their relative order.
    pub fn sort_history(&mut self) {
        self.objects.sort_by(OsmObject::history_cmp);
    }

    /// Returns true if the objects are sorted in history order.
    pub fn is_history_sorted(&self) -> bool {
        self.objects
            .windows(2)
            .all(|pair| pair[0].history_cmp(&pair[1]) != Ordering::Greater)
    }
}

impl From<Vec<OsmObject>> for Buffer {
    fn from(objects: Vec<OsmObject>) -> Self {
        Self { objects }
    }
}

impl<T: Into<OsmObject>> FromIterator<T> for Buffer {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Buffer {
    type Item = &'a OsmObject;
    type IntoIter = std::slice::Iter<'a, OsmObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Buffer {
    type Item = OsmObject;
    type IntoIter = std::vec::IntoIter<OsmObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}
