use std::borrow::Borrow;
use std::iter::{Fuse, FusedIterator};

use waymark_types::OsmObject;

use super::DiffObject;

/// Turns a history stream into [`DiffObject`]s, one per record.
///
/// The stream must be sorted by kind, id and version, as produced by history files and change
/// files. This is not checked: records of one object that are not adjacent are reported as
/// separate histories.
///
/// Only the previous, current and next records are kept. Items are cloned into the produced diff
/// objects, so they should be cheap handles such as `&OsmObject` or `Rc<OsmObject>`.
#[derive(Debug)]
pub struct DiffIterator<I: Iterator> {
    objects: Fuse<I>,
    prev: Option<I::Item>,
    curr: Option<I::Item>,
    next: Option<I::Item>,
    started: bool,
}

impl<I> DiffIterator<I>
where
    I: Iterator,
    I::Item: Clone + Borrow<OsmObject>,
{
    /// Creates a new iterator over the given stream.
    pub fn new(objects: I) -> Self {
        Self {
            objects: objects.fuse(),
            prev: None,
            curr: None,
            next: None,
            started: false,
        }
    }

    fn advance(&mut self) {
        if self.started {
            self.prev = self.curr.take();
            self.curr = self.next.take();
        } else {
            self.started = true;
            self.curr = self.objects.next();
        }

        self.next = self.objects.next();
    }
}

impl<I> Iterator for DiffIterator<I>
where
    I: Iterator,
    I::Item: Clone + Borrow<OsmObject>,
{
    type Item = DiffObject<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance();
        let curr = self.curr.clone()?;

        Some(DiffObject::new(self.prev.clone(), curr, self.next.clone()))
    }
}

impl<I> FusedIterator for DiffIterator<I>
where
    I: Iterator,
    I::Item: Clone + Borrow<OsmObject>,
{
}
