//! Waymark turns map objects into geometries and walks object histories.
//!
//! # Geometries
//!
//! [`GeometryFactory`](geom::GeometryFactory) builds points, line strings and multipolygons from
//! nodes, way node lists and areas. The output format is chosen at compile time by the backend:
//!
//! ```
//! use waymark::geom::{WktBackend, WktFactory};
//! use waymark::waymark_types::{lonlat, Node, ObjectMeta};
//!
//! let node = Node::new(ObjectMeta::new(17), lonlat!(3.2, 4.2));
//! let mut factory = WktFactory::new(WktBackend::new().with_srid(4326));
//! assert_eq!(factory.create_point(&node).unwrap(), "SRID=4326;POINT(3.2 4.2)");
//! ```
//!
//! # Diffs
//!
//! [`apply_diff`](diff::apply_diff) pairs every revision in a history stream with the revisions
//! before and after it and sends it to [`DiffHandler`](diff::DiffHandler)s by object kind.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod buffer;
pub mod diff;
pub mod error;
pub mod geom;
pub mod io;

pub use buffer::Buffer;
pub use diff::{apply_diff, DiffHandler};
pub use error::WaymarkError;
pub use geom::{GeometryBackend, GeometryError, GeometryFactory};
pub use waymark_types;
