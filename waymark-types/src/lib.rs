//! Map object model used by `waymark`.
//!
//! The types here describe what the geometry factory and the diff dispatcher consume: fixed
//! precision [`Location`]s, [`NodeRef`] chains, [`Area`]s made of rings, and the [`OsmObject`]
//! records that a reader produces. Nothing in this crate builds geometries or reads files.

pub mod area;
pub mod error;
pub mod location;
pub mod node_ref;
pub mod object;
pub mod tags;

pub use area::{Area, AreaItem, Ring};
pub use error::InvalidLocation;
pub use location::{HasLocation, Location};
pub use node_ref::{NodeRef, NodeRefList, WayNodeList};
pub use object::{
    ItemType, MemberRef, Node, ObjectMeta, OsmObject, Relation, Timestamp, Way,
};
pub use tags::{Tag, TagList};
