use std::borrow::Borrow;

use waymark_types::OsmObject;

use super::{DiffError, DiffIterator, DiffNode, DiffRelation, DiffView, DiffWay};
use crate::buffer::Buffer;
use crate::io::{InputIterator, Source};

/// Receives object revisions from [`apply_diff`].
///
/// All methods do nothing by default, so a handler only implements the kinds it cares about.
pub trait DiffHandler {
    /// Called for every node revision.
    fn node(&mut self, _diff: &DiffNode<'_>) {}

    /// Called for every way revision.
    fn way(&mut self, _diff: &DiffWay<'_>) {}

    /// Called for every relation revision.
    fn relation(&mut self, _diff: &DiffRelation<'_>) {}
}

impl<H: DiffHandler + ?Sized> DiffHandler for &mut H {
    fn node(&mut self, diff: &DiffNode<'_>) {
        (**self).node(diff)
    }

    fn way(&mut self, diff: &DiffWay<'_>) {
        (**self).way(diff)
    }

    fn relation(&mut self, diff: &DiffRelation<'_>) {
        (**self).relation(diff)
    }
}

impl<H: DiffHandler + ?Sized> DiffHandler for Box<H> {
    fn node(&mut self, diff: &DiffNode<'_>) {
        (**self).node(diff)
    }

    fn way(&mut self, diff: &DiffWay<'_>) {
        (**self).way(diff)
    }

    fn relation(&mut self, diff: &DiffRelation<'_>) {
        (**self).relation(diff)
    }
}

/// A list of handlers is called in order.
impl<H: DiffHandler> DiffHandler for [H] {
    fn node(&mut self, diff: &DiffNode<'_>) {
        self.iter_mut().for_each(|handler| handler.node(diff));
    }

    fn way(&mut self, diff: &DiffWay<'_>) {
        self.iter_mut().for_each(|handler| handler.way(diff));
    }

    fn relation(&mut self, diff: &DiffRelation<'_>) {
        self.iter_mut().for_each(|handler| handler.relation(diff));
    }
}

impl<H: DiffHandler> DiffHandler for Vec<H> {
    fn node(&mut self, diff: &DiffNode<'_>) {
        self.as_mut_slice().node(diff)
    }

    fn way(&mut self, diff: &DiffWay<'_>) {
        self.as_mut_slice().way(diff)
    }

    fn relation(&mut self, diff: &DiffRelation<'_>) {
        self.as_mut_slice().relation(diff)
    }
}

/// Set of handlers [`apply_diff`] sends every diff to.
///
/// Implemented for a single `&mut H`, for tuples of up to eight `&mut H` with different handler
/// types, and for `()`. Handler collections sized at runtime (`Vec<Box<dyn DiffHandler>>`,
/// `[&mut dyn DiffHandler]`) are handlers themselves and can be passed as `&mut`.
pub trait DiffHandlers {
    /// Sends `diff` to every handler, in order.
    fn dispatch(&mut self, diff: &DiffView<'_>);
}

fn visit<H: DiffHandler + ?Sized>(handler: &mut H, diff: &DiffView<'_>) {
    match diff {
        DiffView::Node(v) => handler.node(v),
        DiffView::Way(v) => handler.way(v),
        DiffView::Relation(v) => handler.relation(v),
    }
}

impl DiffHandlers for () {
    fn dispatch(&mut self, _diff: &DiffView<'_>) {}
}

impl<H: DiffHandler + ?Sized> DiffHandlers for &mut H {
    fn dispatch(&mut self, diff: &DiffView<'_>) {
        visit(&mut **self, diff);
    }
}

macro_rules! impl_diff_handlers_for_tuple {
    ($($handler:ident => $value:ident),+) => {
        impl<$($handler: DiffHandler + ?Sized),+> DiffHandlers for ($(&mut $handler,)+) {
            fn dispatch(&mut self, diff: &DiffView<'_>) {
                let ($($value,)+) = self;
                $(visit(&mut **$value, diff);)+
            }
        }
    };
}

impl_diff_handlers_for_tuple!(H1 => h1);
impl_diff_handlers_for_tuple!(H1 => h1, H2 => h2);
impl_diff_handlers_for_tuple!(H1 => h1, H2 => h2, H3 => h3);
impl_diff_handlers_for_tuple!(H1 => h1, H2 => h2, H3 => h3, H4 => h4);
impl_diff_handlers_for_tuple!(H1 => h1, H2 => h2, H3 => h3, H4 => h4, H5 => h5);
impl_diff_handlers_for_tuple!(H1 => h1, H2 => h2, H3 => h3, H4 => h4, H5 => h5, H6 => h6);
impl_diff_handlers_for_tuple!(
    H1 => h1, H2 => h2, H3 => h3, H4 => h4, H5 => h5, H6 => h6, H7 => h7
);
impl_diff_handlers_for_tuple!(
    H1 => h1, H2 => h2, H3 => h3, H4 => h4, H5 => h5, H6 => h6, H7 => h7, H8 => h8
);

/// Sends every revision in `objects` to `handlers`.
///
/// Each revision is wrapped into a [`DiffObject`](super::DiffObject) and passed to all handlers
/// before the next revision is read. The stream must be sorted by kind, id and version.
///
/// Stops with [`DiffError::UnknownKind`] at the first record that is not a node, way or relation.
///
/// ```
/// use waymark::diff::{apply_diff, DiffHandler, DiffNode};
/// use waymark_types::{Location, Node, ObjectMeta, OsmObject};
///
/// #[derive(Default)]
/// struct CreatedNodes(usize);
///
/// impl DiffHandler for CreatedNodes {
///     fn node(&mut self, diff: &DiffNode<'_>) {
///         if diff.first() {
///             self.0 += 1;
///         }
///     }
/// }
///
/// let objects: Vec<OsmObject> = vec![
///     Node::new(ObjectMeta::new(1), Location::new(1.0, 1.0)).into(),
///     Node::new(ObjectMeta::new(1).with_version(2), Location::new(1.0, 2.0)).into(),
/// ];
///
/// let mut created = CreatedNodes::default();
/// apply_diff(&objects, &mut created).expect("only known kinds");
/// assert_eq!(created.0, 1);
/// ```
pub fn apply_diff<I, H>(objects: I, mut handlers: H) -> Result<(), DiffError>
where
    I: IntoIterator,
    I::Item: Clone + Borrow<OsmObject>,
    H: DiffHandlers,
{
    for diff in DiffIterator::new(objects.into_iter()) {
        let view = match diff.view() {
            Ok(v) => v,
            Err(err) => {
                log::error!(
                    "Cannot dispatch {} {} version {}: {err}",
                    diff.item_type(),
                    diff.id(),
                    diff.version()
                );
                return Err(err);
            }
        };

        handlers.dispatch(&view);
    }

    Ok(())
}

/// Same as [`apply_diff`] for the objects of a buffer.
pub fn apply_diff_buffer<H: DiffHandlers>(buffer: &Buffer, handlers: H) -> Result<(), DiffError> {
    apply_diff(buffer.iter(), handlers)
}

/// Same as [`apply_diff`] for all objects a source produces.
///
/// If the source fails, the objects read before the failure have been dispatched and the read error
/// is returned.
pub fn apply_diff_source<S, H>(source: &mut S, handlers: H) -> Result<(), DiffError>
where
    S: Source + ?Sized,
    H: DiffHandlers,
{
    let mut input = InputIterator::new(source);
    apply_diff(&mut input, handlers)?;

    match input.take_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
