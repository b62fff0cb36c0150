//! WKT and EWKT text output.

use super::{Coordinates, GeometryBackend, GeometryFactory};

/// Factory producing WKT strings.
pub type WktFactory = GeometryFactory<WktBackend>;

const DEFAULT_PRECISION: usize = 7;

/// Backend writing geometries as WKT, or as EWKT if an SRID is set.
///
/// Coordinates are written with at most `precision` decimal places, without trailing zeros.
#[derive(Debug, Clone)]
pub struct WktBackend {
    precision: usize,
    srid: Option<i32>,
    buffer: String,
    polygon_open: bool,
}

impl Default for WktBackend {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            srid: None,
            buffer: String::new(),
            polygon_open: false,
        }
    }
}

impl WktBackend {
    /// Creates a WKT backend with 7 decimal places precision.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of decimal places.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Switches to EWKT output with the given SRID.
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Number of decimal places.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// SRID written in front of every geometry, if any.
    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    fn start(&mut self, geometry_type: &str) {
        self.buffer.clear();
        if let Some(srid) = self.srid {
            self.buffer.push_str(&format!("SRID={srid};"));
        }
        self.buffer.push_str(geometry_type);
    }

    fn add_coordinates(&mut self, coordinates: Coordinates) {
        coordinates.append_to_string(&mut self.buffer, ' ', self.precision);
        self.buffer.push(',');
    }

    fn close_list(&mut self) {
        if self.buffer.ends_with(',') {
            self.buffer.pop();
        }
        self.buffer.push(')');
    }
}

impl GeometryBackend for WktBackend {
    type Point = String;
    type LineString = String;
    type MultiPolygon = String;

    fn make_point(&mut self, coordinates: Coordinates) -> String {
        self.start("POINT(");
        coordinates.append_to_string(&mut self.buffer, ' ', self.precision);
        self.buffer.push(')');
        std::mem::take(&mut self.buffer)
    }

    fn linestring_start(&mut self) {
        self.start("LINESTRING(");
    }

    fn linestring_add_location(&mut self, coordinates: Coordinates) {
        self.add_coordinates(coordinates);
    }

    fn linestring_finish(&mut self) -> String {
        self.close_list();
        std::mem::take(&mut self.buffer)
    }

    fn multipolygon_start(&mut self) {
        self.start("MULTIPOLYGON(");
        self.polygon_open = false;
    }

    fn multipolygon_outer_ring_start(&mut self) {
        if self.polygon_open {
            self.buffer.push_str("),");
        }
        self.buffer.push_str("((");
        self.polygon_open = true;
    }

    fn multipolygon_outer_ring_finish(&mut self) {
        self.close_list();
    }

    fn multipolygon_inner_ring_start(&mut self) {
        if !self.polygon_open {
            log::warn!("Inner ring without outer ring, writing it as a separate polygon");
            self.buffer.push_str("((");
            self.polygon_open = true;
        } else {
            self.buffer.push_str(",(");
        }
    }

    fn multipolygon_inner_ring_finish(&mut self) {
        self.close_list();
    }

    fn multipolygon_add_location(&mut self, coordinates: Coordinates) {
        self.add_coordinates(coordinates);
    }

    fn multipolygon_finish(&mut self) -> String {
        if self.polygon_open {
            self.buffer.push(')');
        }
        self.buffer.push(')');
        self.polygon_open = false;
        std::mem::take(&mut self.buffer)
    }

    fn discard(&mut self) {
        self.buffer.clear();
        self.polygon_open = false;
    }
}
