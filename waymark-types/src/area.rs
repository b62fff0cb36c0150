//! Areas: already assembled outer and inner rings.
//!
//! Ring assembly (closing rings, deciding which inner ring belongs into which outer ring) happens
//! before an [`Area`] is created. An area here is just the flat sequence of its rings in the order
//! they were produced, optionally interleaved with other items such as its tags.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node_ref::{NodeRef, NodeRefList};
use crate::object::ObjectMeta;
use crate::tags::TagList;

/// Closed sequence of node references. Closure and winding order are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ring {
    nodes: Vec<NodeRef>,
}

impl Ring {
    /// Creates a new ring.
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }
}

impl NodeRefList for Ring {
    fn node_refs(&self) -> &[NodeRef] {
        &self.nodes
    }
}

impl<N: Into<NodeRef>> FromIterator<N> for Ring {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Entry of an area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AreaItem {
    /// Outer boundary. Starts a new polygon.
    OuterRing(Ring),
    /// Hole in the polygon started by the closest preceding outer ring.
    InnerRing(Ring),
    /// Tags of the area. Not part of the geometry.
    Tags(TagList),
}

/// Multipolygon made of pre-assembled rings.
///
/// Area ids are derived from the object they were built from: `2 * id` for ways and
/// `2 * id + 1` for relations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    /// Metadata. `meta.id` is the area id, see [`Area::orig_id`].
    pub meta: ObjectMeta,
    items: Vec<AreaItem>,
}

impl Area {
    /// Creates a new area.
    pub fn new(meta: ObjectMeta, items: Vec<AreaItem>) -> Self {
        Self { meta, items }
    }

    /// Area id for an area built from the way with the given id.
    pub fn id_from_way(way_id: i64) -> i64 {
        way_id * 2
    }

    /// Area id for an area built from the relation with the given id.
    pub fn id_from_relation(relation_id: i64) -> i64 {
        relation_id * 2 + 1
    }

    /// Whether this area was built from a way (as opposed to a relation).
    pub fn from_way(&self) -> bool {
        self.meta.id % 2 == 0
    }

    /// Id of the way or relation this area was built from.
    pub fn orig_id(&self) -> i64 {
        if self.from_way() {
            self.meta.id / 2
        } else {
            (self.meta.id - 1) / 2
        }
    }

    /// All items in the order they were added.
    pub fn items(&self) -> &[AreaItem] {
        &self.items
    }

    /// Appends an item.
    pub fn push(&mut self, item: AreaItem) {
        self.items.push(item);
    }

    /// Iterates over the outer rings.
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring> {
        self.items.iter().filter_map(|item| match item {
            AreaItem::OuterRing(ring) => Some(ring),
            _ => None,
        })
    }

    /// Iterates over the inner rings.
    pub fn inner_rings(&self) -> impl Iterator<Item = &Ring> {
        self.items.iter().filter_map(|item| match item {
            AreaItem::InnerRing(ring) => Some(ring),
            _ => None,
        })
    }

    /// Number of outer and inner rings.
    pub fn num_rings(&self) -> (usize, usize) {
        self.items
            .iter()
            .fold((0, 0), |(outer, inner), item| match item {
                AreaItem::OuterRing(_) => (outer + 1, inner),
                AreaItem::InnerRing(_) => (outer, inner + 1),
                AreaItem::Tags(_) => (outer, inner),
            })
    }

    /// Whether the area has more than one outer ring.
    pub fn is_multipolygon(&self) -> bool {
        self.num_rings().0 > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64) -> Ring {
        [
            (1, (offset, offset)),
            (2, (offset + 1.0, offset)),
            (3, (offset + 1.0, offset + 1.0)),
            (1, (offset, offset)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn ring_counts() {
        let area = Area::new(
            ObjectMeta::new(Area::id_from_relation(17)),
            vec![
                AreaItem::Tags(TagList::default()),
                AreaItem::OuterRing(square(0.0)),
                AreaItem::InnerRing(square(0.2)),
                AreaItem::OuterRing(square(5.0)),
            ],
        );

        assert_eq!(area.num_rings(), (2, 1));
        assert!(area.is_multipolygon());
        assert_eq!(area.outer_rings().count(), 2);
        assert_eq!(area.inner_rings().count(), 1);
        assert!(!area.from_way());
        assert_eq!(area.orig_id(), 17);
    }

    #[test]
    fn area_from_way() {
        let area = Area::new(ObjectMeta::new(Area::id_from_way(42)), vec![]);
        assert!(area.from_way());
        assert_eq!(area.orig_id(), 42);
        assert_eq!(area.num_rings(), (0, 0));
    }
}
