//! Reading objects buffer by buffer.

use std::rc::Rc;

use thiserror::Error;
use waymark_types::OsmObject;

use crate::buffer::Buffer;

/// Error reading from a [`Source`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The underlying reader failed. Details are inside.
    #[error("failed to read objects: {0}")]
    Read(String),
}

/// Producer of object buffers, e.g. a file reader.
pub trait Source {
    /// Returns the next buffer, or `None` once the input is exhausted.
    fn read(&mut self) -> Result<Option<Buffer>, SourceError>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn read(&mut self) -> Result<Option<Buffer>, SourceError> {
        (**self).read()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn read(&mut self) -> Result<Option<Buffer>, SourceError> {
        (**self).read()
    }
}

/// Source serving buffers from an iterator.
#[derive(Debug)]
pub struct BufferSource<I> {
    buffers: I,
}

impl<I> BufferSource<I>
where
    I: Iterator<Item = Result<Buffer, SourceError>>,
{
    /// Creates a new source.
    pub fn new(buffers: I) -> Self {
        Self { buffers }
    }
}

impl BufferSource<std::iter::Once<Result<Buffer, SourceError>>> {
    /// Source producing a single buffer.
    pub fn single(buffer: Buffer) -> Self {
        Self::new(std::iter::once(Ok(buffer)))
    }
}

impl<I> Source for BufferSource<I>
where
    I: Iterator<Item = Result<Buffer, SourceError>>,
{
    fn read(&mut self) -> Result<Option<Buffer>, SourceError> {
        self.buffers.next().transpose()
    }
}

/// Iterates over all objects of a source across buffer boundaries.
///
/// Objects are handed out as `Rc` so that several of them can be held at once while the buffer
/// they came from is dropped. If the source fails, iteration ends and the error is kept until
/// [`InputIterator::take_error`] is called.
pub struct InputIterator<'a, S: ?Sized> {
    source: &'a mut S,
    current: std::vec::IntoIter<OsmObject>,
    error: Option<SourceError>,
    done: bool,
}

impl<'a, S: Source + ?Sized> InputIterator<'a, S> {
    /// Creates a new iterator reading from `source`.
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            current: Vec::new().into_iter(),
            error: None,
            done: false,
        }
    }

    /// Returns the error that ended iteration, if any.
    pub fn take_error(&mut self) -> Option<SourceError> {
        self.error.take()
    }
}

impl<S: Source + ?Sized> Iterator for InputIterator<'_, S> {
    type Item = Rc<OsmObject>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(object) = self.current.next() {
                return Some(Rc::new(object));
            }

            if self.done {
                return None;
            }

            match self.source.read() {
                Ok(Some(buffer)) => self.current = buffer.into_iter(),
                Ok(None) => self.done = true,
                Err(err) => {
                    log::warn!("Stopped reading input: {err}");
                    self.error = Some(err);
                    self.done = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use waymark_types::{Location, Node, ObjectMeta};

    use super::*;

    fn buffer(ids: &[i64]) -> Buffer {
        ids.iter()
            .map(|&id| Node::new(ObjectMeta::new(id), Location::new(0.0, 0.0)))
            .collect()
    }

    #[test]
    fn reads_all_buffers() {
        let mut source = BufferSource::new(
            vec![buffer(&[1, 2]), Buffer::new(), buffer(&[3])]
                .into_iter()
                .map(Ok),
        );

        let mut input = InputIterator::new(&mut source);
        let ids: Vec<_> = input.by_ref().map(|object| object.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(input.take_error().is_none());
        assert!(input.next().is_none());
    }

    #[test]
    fn single_buffer() {
        let mut source = BufferSource::single(buffer(&[7]));
        assert_matches!(source.read(), Ok(Some(b)) if b.len() == 1);
        assert_matches!(source.read(), Ok(None));
    }

    #[test]
    fn stops_at_error() {
        let mut source = BufferSource::new(
            vec![
                Ok(buffer(&[1])),
                Err(SourceError::Read("bad header".into())),
                Ok(buffer(&[2])),
            ]
            .into_iter(),
        );

        let mut input = InputIterator::new(&mut source);
        assert_eq!(input.next().map(|object| object.id()), Some(1));
        assert!(input.next().is_none());
        assert!(input.next().is_none());
        assert_eq!(
            input.take_error(),
            Some(SourceError::Read("bad header".into()))
        );
    }
}
