//! References to nodes and ordered lists of them.

use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::location::{HasLocation, Location};

/// Reference to a node by id, together with the node's location if it is known.
///
/// The id is only informational. Geometries are built from the location alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRef {
    id: i64,
    location: Location,
}

impl NodeRef {
    /// Creates a new node reference.
    pub fn new(id: i64, location: Location) -> Self {
        Self { id, location }
    }

    /// Creates a reference to a node whose location is not resolved yet.
    pub fn unresolved(id: i64) -> Self {
        Self {
            id,
            location: Location::UNDEFINED,
        }
    }

    /// Id of the referenced node.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Sets the location, as done by the collaborator that resolves way node locations.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }
}

impl HasLocation for NodeRef {
    fn location(&self) -> Location {
        self.location
    }
}

impl From<(i64, Location)> for NodeRef {
    fn from((id, location): (i64, Location)) -> Self {
        Self::new(id, location)
    }
}

impl From<(i64, (f64, f64))> for NodeRef {
    fn from((id, lonlat): (i64, (f64, f64))) -> Self {
        Self::new(id, lonlat.into())
    }
}

/// Ordered sequence of node references with constant time indexed access.
///
/// Backward line strings are produced by walking the slice from its last index down, so
/// implementors must be able to hand out the whole sequence as a slice.
pub trait NodeRefList {
    /// All node references in order.
    fn node_refs(&self) -> &[NodeRef];

    /// Number of node references.
    fn node_count(&self) -> usize {
        self.node_refs().len()
    }

    /// Whether the first and last references point to the same node id.
    fn ends_have_same_id(&self) -> bool {
        let nodes = self.node_refs();
        match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => first.id() == last.id(),
            _ => false,
        }
    }

    /// Whether the first and last references have the same defined location.
    fn ends_have_same_location(&self) -> bool {
        let nodes = self.node_refs();
        match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => {
                first.location().is_defined() && first.location() == last.location()
            }
            _ => false,
        }
    }
}

impl NodeRefList for [NodeRef] {
    fn node_refs(&self) -> &[NodeRef] {
        self
    }
}

impl NodeRefList for Vec<NodeRef> {
    fn node_refs(&self) -> &[NodeRef] {
        self
    }
}

/// Nodes of a way, in order. Consecutive entries may repeat a location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WayNodeList {
    nodes: Vec<NodeRef>,
}

impl WayNodeList {
    /// Creates a new list.
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }

    /// Appends a node reference.
    pub fn push(&mut self, node: NodeRef) {
        self.nodes.push(node);
    }

    /// Mutable access to the references, used to fill in resolved locations.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NodeRef> {
        self.nodes.iter_mut()
    }
}

impl Deref for WayNodeList {
    type Target = [NodeRef];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl NodeRefList for WayNodeList {
    fn node_refs(&self) -> &[NodeRef] {
        &self.nodes
    }
}

impl From<Vec<NodeRef>> for WayNodeList {
    fn from(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }
}

impl<N: Into<NodeRef>> FromIterator<N> for WayNodeList {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_from_pairs() {
        let list: WayNodeList = [(1, (3.2, 4.2)), (2, (3.5, 4.7))].into_iter().collect();
        assert_eq!(list.node_count(), 2);
        assert_eq!(list[1].id(), 2);
        assert_eq!(list[1].location(), Location::new(3.5, 4.7));
    }

    #[test]
    fn closed_ends() {
        let list: WayNodeList = [(1, (0.0, 0.0)), (2, (1.0, 0.0)), (1, (0.0, 0.0))]
            .into_iter()
            .collect();
        assert!(list.ends_have_same_id());
        assert!(list.ends_have_same_location());

        let unresolved = WayNodeList::new(vec![NodeRef::unresolved(1), NodeRef::unresolved(1)]);
        assert!(unresolved.ends_have_same_id());
        assert!(!unresolved.ends_have_same_location());

        assert!(!WayNodeList::default().ends_have_same_id());
    }
}
