//! Revisions of one object around a point in its history.

use std::borrow::Borrow;

use waymark_types::{ItemType, Node, ObjectMeta, OsmObject, Relation, Timestamp, Way};

use super::DiffError;

/// One revision of an object together with its neighbouring revisions.
///
/// `prev` and `next` are only present if the neighbouring records in the stream are revisions of
/// the same object. A revision without `prev` is the first one seen for the object; a revision
/// without `next` is the last one.
///
/// `O` is whatever the stream yields for an object: a reference, `Rc` or `Arc`.
#[derive(Debug, Clone)]
pub struct DiffObject<O> {
    prev: Option<O>,
    curr: O,
    next: Option<O>,
}

impl<O: Borrow<OsmObject>> DiffObject<O> {
    /// Creates a diff object. Neighbours with a different identity than `curr` are dropped.
    pub fn new(prev: Option<O>, curr: O, next: Option<O>) -> Self {
        let same = |other: &O| other.borrow().same_identity(curr.borrow());
        let prev = prev.filter(same);
        let next = next.filter(same);
        Self { prev, curr, next }
    }

    /// Previous revision.
    pub fn prev(&self) -> Option<&OsmObject> {
        self.prev.as_ref().map(Borrow::borrow)
    }

    /// Current revision.
    pub fn curr(&self) -> &OsmObject {
        self.curr.borrow()
    }

    /// Next revision.
    pub fn next(&self) -> Option<&OsmObject> {
        self.next.as_ref().map(Borrow::borrow)
    }

    /// Whether this is the first revision of the object in the stream.
    pub fn first(&self) -> bool {
        self.prev.is_none()
    }

    /// Whether this is the last revision of the object in the stream.
    pub fn last(&self) -> bool {
        self.next.is_none()
    }

    /// Kind of the object.
    pub fn item_type(&self) -> ItemType {
        self.curr().item_type()
    }

    /// Object id.
    pub fn id(&self) -> i64 {
        self.curr().id()
    }

    /// Version of the current revision.
    pub fn version(&self) -> u32 {
        self.curr().version()
    }

    /// Time the current revision became valid.
    pub fn start_time(&self) -> Timestamp {
        self.curr().timestamp()
    }

    /// Time the current revision was superseded, [`Timestamp::END_OF_TIME`] for the last one.
    pub fn end_time(&self) -> Timestamp {
        self.next()
            .map_or(Timestamp::END_OF_TIME, OsmObject::timestamp)
    }

    /// Typed view of the revisions.
    ///
    /// Fails with [`DiffError::UnknownKind`] for kinds that have no diff handler method.
    pub fn view(&self) -> Result<DiffView<'_>, DiffError> {
        let prev = self.prev();
        let next = self.next();

        Ok(match self.curr() {
            OsmObject::Node(curr) => DiffView::Node(Diff {
                prev: prev.and_then(OsmObject::as_node),
                curr,
                next: next.and_then(OsmObject::as_node),
            }),
            OsmObject::Way(curr) => DiffView::Way(Diff {
                prev: prev.and_then(OsmObject::as_way),
                curr,
                next: next.and_then(OsmObject::as_way),
            }),
            OsmObject::Relation(curr) => DiffView::Relation(Diff {
                prev: prev.and_then(OsmObject::as_relation),
                curr,
                next: next.and_then(OsmObject::as_relation),
            }),
            other => return Err(DiffError::UnknownKind(other.item_type())),
        })
    }
}

/// Object kinds with their metadata.
pub trait Revision {
    /// Metadata of the revision.
    fn meta(&self) -> &ObjectMeta;
}

impl Revision for Node {
    fn meta(&self) -> &ObjectMeta {
        &self.meta
    }
}

impl Revision for Way {
    fn meta(&self) -> &ObjectMeta {
        &self.meta
    }
}

impl Revision for Relation {
    fn meta(&self) -> &ObjectMeta {
        &self.meta
    }
}

/// [`DiffObject`] for a known object kind.
#[derive(Debug)]
pub struct Diff<'a, T> {
    prev: Option<&'a T>,
    curr: &'a T,
    next: Option<&'a T>,
}

impl<T> Clone for Diff<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Diff<'_, T> {}

/// Diff of a node.
pub type DiffNode<'a> = Diff<'a, Node>;
/// Diff of a way.
pub type DiffWay<'a> = Diff<'a, Way>;
/// Diff of a relation.
pub type DiffRelation<'a> = Diff<'a, Relation>;

impl<'a, T: Revision> Diff<'a, T> {
    /// Previous revision.
    pub fn prev(&self) -> Option<&'a T> {
        self.prev
    }

    /// Current revision.
    pub fn curr(&self) -> &'a T {
        self.curr
    }

    /// Next revision.
    pub fn next(&self) -> Option<&'a T> {
        self.next
    }

    /// Whether this is the first revision of the object in the stream.
    pub fn first(&self) -> bool {
        self.prev.is_none()
    }

    /// Whether this is the last revision of the object in the stream.
    pub fn last(&self) -> bool {
        self.next.is_none()
    }

    /// Object id.
    pub fn id(&self) -> i64 {
        self.curr.meta().id
    }

    /// Version of the current revision.
    pub fn version(&self) -> u32 {
        self.curr.meta().version
    }

    /// Time the current revision became valid.
    pub fn start_time(&self) -> Timestamp {
        self.curr.meta().timestamp
    }

    /// Time the current revision was superseded, [`Timestamp::END_OF_TIME`] for the last one.
    pub fn end_time(&self) -> Timestamp {
        self.next
            .map_or(Timestamp::END_OF_TIME, |next| next.meta().timestamp)
    }
}

/// Typed view of a [`DiffObject`].
#[derive(Debug, Clone, Copy)]
pub enum DiffView<'a> {
    /// Node revisions.
    Node(DiffNode<'a>),
    /// Way revisions.
    Way(DiffWay<'a>),
    /// Relation revisions.
    Relation(DiffRelation<'a>),
}
