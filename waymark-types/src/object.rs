//! Map object records: nodes, ways, relations and areas.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::location::{HasLocation, Location};
use crate::node_ref::{NodeRef, NodeRefList, WayNodeList};
use crate::tags::TagList;

/// Kind of a map object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemType {
    /// Single point.
    Node,
    /// Ordered list of nodes.
    Way,
    /// Ordered list of members of any kind.
    Relation,
    /// Assembled multipolygon.
    Area,
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ItemType::Node => "node",
            ItemType::Way => "way",
            ItemType::Relation => "relation",
            ItemType::Area => "area",
        };
        f.write_str(name)
    }
}

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp(u32);

impl Timestamp {
    /// Latest representable point in time. Used as the end of the validity interval of the last
    /// revision of an object.
    pub const END_OF_TIME: Timestamp = Timestamp(u32::MAX);

    /// Creates a timestamp from seconds since the epoch.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    pub fn as_secs(&self) -> u32 {
        self.0
    }
}

/// Attributes shared by all object kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectMeta {
    /// Object id. Unique per [`ItemType`].
    pub id: i64,
    /// Revision number.
    pub version: u32,
    /// Time the revision was created.
    pub timestamp: Timestamp,
    /// `false` if this revision deletes the object.
    pub visible: bool,
    /// Tags of the revision.
    pub tags: TagList,
}

impl ObjectMeta {
    /// Creates metadata with the given id, version 1 and the visible flag set.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            version: 1,
            timestamp: Timestamp::default(),
            visible: true,
            tags: TagList::default(),
        }
    }

    /// Sets the version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Sets the timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the visible flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the tags.
    pub fn with_tags(mut self, tags: TagList) -> Self {
        self.tags = tags;
        self
    }
}

impl Default for ObjectMeta {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Point feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Metadata.
    pub meta: ObjectMeta,
    /// Position. Undefined for deleted nodes.
    pub location: Location,
}

impl Node {
    /// Creates a new node.
    pub fn new(meta: ObjectMeta, location: Location) -> Self {
        Self { meta, location }
    }
}

impl HasLocation for Node {
    fn location(&self) -> Location {
        self.location
    }
}

/// Ordered chain of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Way {
    /// Metadata.
    pub meta: ObjectMeta,
    /// Node references. Locations are undefined until resolved.
    pub nodes: WayNodeList,
}

impl Way {
    /// Creates a new way.
    pub fn new(meta: ObjectMeta, nodes: WayNodeList) -> Self {
        Self { meta, nodes }
    }

    /// Whether the way starts and ends at the same node.
    pub fn is_closed(&self) -> bool {
        self.nodes.ends_have_same_id()
    }
}

impl NodeRefList for Way {
    fn node_refs(&self) -> &[NodeRef] {
        self.nodes.node_refs()
    }
}

/// Member of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemberRef {
    /// Kind of the referenced object.
    pub item_type: ItemType,
    /// Id of the referenced object.
    pub id: i64,
    /// Role of the member in the relation.
    pub role: String,
}

/// Group of other objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    /// Metadata.
    pub meta: ObjectMeta,
    /// Members in order.
    pub members: Vec<MemberRef>,
}

impl Relation {
    /// Creates a new relation.
    pub fn new(meta: ObjectMeta, members: Vec<MemberRef>) -> Self {
        Self { meta, members }
    }
}

/// Any map object record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum OsmObject {
    /// Node record.
    Node(Node),
    /// Way record.
    Way(Way),
    /// Relation record.
    Relation(Relation),
    /// Area record.
    Area(Area),
}

impl OsmObject {
    /// Kind of the object.
    pub fn item_type(&self) -> ItemType {
        match self {
            OsmObject::Node(_) => ItemType::Node,
            OsmObject::Way(_) => ItemType::Way,
            OsmObject::Relation(_) => ItemType::Relation,
            OsmObject::Area(_) => ItemType::Area,
        }
    }

    /// Metadata of the object.
    pub fn meta(&self) -> &ObjectMeta {
        match self {
            OsmObject::Node(v) => &v.meta,
            OsmObject::Way(v) => &v.meta,
            OsmObject::Relation(v) => &v.meta,
            OsmObject::Area(v) => &v.meta,
        }
    }

    /// Object id.
    pub fn id(&self) -> i64 {
        self.meta().id
    }

    /// Revision number.
    pub fn version(&self) -> u32 {
        self.meta().version
    }

    /// Time the revision was created.
    pub fn timestamp(&self) -> Timestamp {
        self.meta().timestamp
    }

    /// `false` if this revision deletes the object.
    pub fn visible(&self) -> bool {
        self.meta().visible
    }

    /// Tags of the revision.
    pub fn tags(&self) -> &TagList {
        &self.meta().tags
    }

    /// Whether both records describe the same object (same kind and id), possibly in different
    /// revisions.
    pub fn same_identity(&self, other: &OsmObject) -> bool {
        self.item_type() == other.item_type() && self.id() == other.id()
    }

    /// Order of records in a history stream: by kind, id, version, then timestamp.
    pub fn history_cmp(&self, other: &OsmObject) -> Ordering {
        (self.item_type(), self.id(), self.version(), self.timestamp()).cmp(&(
            other.item_type(),
            other.id(),
            other.version(),
            other.timestamp(),
        ))
    }

    /// The node, if this is a node record.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            OsmObject::Node(v) => Some(v),
            _ => None,
        }
    }

    /// The way, if this is a way record.
    pub fn as_way(&self) -> Option<&Way> {
        match self {
            OsmObject::Way(v) => Some(v),
            _ => None,
        }
    }

    /// The relation, if this is a relation record.
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            OsmObject::Relation(v) => Some(v),
            _ => None,
        }
    }

    /// The area, if this is an area record.
    pub fn as_area(&self) -> Option<&Area> {
        match self {
            OsmObject::Area(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Node> for OsmObject {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Way> for OsmObject {
    fn from(value: Way) -> Self {
        Self::Way(value)
    }
}

impl From<Relation> for OsmObject {
    fn from(value: Relation) -> Self {
        Self::Relation(value)
    }
}

impl From<Area> for OsmObject {
    fn from(value: Area) -> Self {
        Self::Area(value)
    }
}
