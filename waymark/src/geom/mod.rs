//! Building geometries from map objects.
//!
//! [`GeometryFactory`] knows how points, line strings and multipolygons are derived from nodes,
//! node lists and areas. What the result looks like is decided by the [`GeometryBackend`] it is
//! instantiated with. The crate ships three backends:
//!
//! * [`WktBackend`] - WKT or EWKT strings,
//! * [`GeoJsonBackend`] - [`::geojson::Geometry`] values (feature `geojson`),
//! * [`GeoTypesBackend`] - [`::geo_types`] geometries (feature `geo-types`).
//!
//! ```
//! use waymark::geom::{Direction, UseNodes, WktFactory};
//! use waymark_types::WayNodeList;
//!
//! let nodes: WayNodeList = [(1, (3.2, 4.2)), (2, (3.5, 4.7))].into_iter().collect();
//! let mut factory = WktFactory::default();
//! let wkt = factory
//!     .create_linestring(&nodes, UseNodes::Unique, Direction::Forward)
//!     .expect("valid linestring");
//! assert_eq!(wkt, "LINESTRING(3.2 4.2,3.5 4.7)");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use waymark_types::InvalidLocation;

mod coordinates;
mod factory;
#[cfg(feature = "geo-types")]
mod geo_types;
#[cfg(feature = "geojson")]
mod geojson;
mod wkt;

pub use coordinates::Coordinates;
pub use factory::{GeometryBackend, GeometryFactory};
#[cfg(feature = "geo-types")]
pub use self::geo_types::{GeoTypesBackend, GeoTypesFactory};
#[cfg(feature = "geojson")]
pub use self::geojson::{GeoJsonBackend, GeoJsonFactory};
pub use wkt::{WktBackend, WktFactory};

/// Error building a geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A point or vertex had an undefined or out of range location.
    #[error(transparent)]
    InvalidLocation(#[from] InvalidLocation),
    /// Fewer than two points were left for a line string.
    #[error("invalid linestring")]
    InvalidLineString,
    /// The area had no outer or inner rings.
    #[error("invalid area")]
    InvalidArea,
}

/// Which nodes of a way to use for a line string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UseNodes {
    /// Skip nodes with the same location as the previously used node.
    #[default]
    Unique,
    /// Use all nodes.
    All,
}

/// Direction of a line string relative to its way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Same order as the way's nodes.
    #[default]
    Forward,
    /// Reverse order.
    Backward,
}

/// Line string settings, for callers that read them from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineStringOptions {
    /// Node selection.
    pub use_nodes: UseNodes,
    /// Output direction.
    pub direction: Direction,
}
