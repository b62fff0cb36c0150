//! GeoJSON output using the `geojson` crate.

use geojson::{Geometry, PolygonType, Position, Value};

use super::{Coordinates, GeometryBackend, GeometryFactory};

/// Factory producing [`geojson::Geometry`] values.
pub type GeoJsonFactory = GeometryFactory<GeoJsonBackend>;

/// Backend building [`geojson::Geometry`] values.
#[derive(Debug, Clone, Default)]
pub struct GeoJsonBackend {
    precision: Option<u8>,
    line: Vec<Position>,
    polygons: Vec<PolygonType>,
    ring: Vec<Position>,
}

impl GeoJsonBackend {
    /// Creates a backend that keeps coordinates as they are.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds all coordinates to the given number of decimal places.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    fn position(&self, coordinates: Coordinates) -> Position {
        let coordinates = match self.precision {
            Some(precision) => coordinates.rounded(precision),
            None => coordinates,
        };

        vec![coordinates.x, coordinates.y]
    }

    fn finish_ring(&mut self) {
        let ring = std::mem::take(&mut self.ring);
        match self.polygons.last_mut() {
            Some(polygon) => polygon.push(ring),
            None => {
                log::warn!("Inner ring without outer ring, writing it as a separate polygon");
                self.polygons.push(vec![ring]);
            }
        }
    }
}

impl GeometryBackend for GeoJsonBackend {
    type Point = Geometry;
    type LineString = Geometry;
    type MultiPolygon = Geometry;

    fn make_point(&mut self, coordinates: Coordinates) -> Geometry {
        Geometry::new(Value::Point(self.position(coordinates)))
    }

    fn linestring_start(&mut self) {
        self.line.clear();
    }

    fn linestring_add_location(&mut self, coordinates: Coordinates) {
        let position = self.position(coordinates);
        self.line.push(position);
    }

    fn linestring_finish(&mut self) -> Geometry {
        Geometry::new(Value::LineString(std::mem::take(&mut self.line)))
    }

    fn multipolygon_start(&mut self) {
        self.polygons.clear();
        self.ring.clear();
    }

    fn multipolygon_outer_ring_start(&mut self) {
        self.polygons.push(vec![]);
        self.ring.clear();
    }

    fn multipolygon_outer_ring_finish(&mut self) {
        self.finish_ring();
    }

    fn multipolygon_inner_ring_start(&mut self) {
        self.ring.clear();
    }

    fn multipolygon_inner_ring_finish(&mut self) {
        self.finish_ring();
    }

    fn multipolygon_add_location(&mut self, coordinates: Coordinates) {
        let position = self.position(coordinates);
        self.ring.push(position);
    }

    fn multipolygon_finish(&mut self) -> Geometry {
        Geometry::new(Value::MultiPolygon(std::mem::take(&mut self.polygons)))
    }

    fn discard(&mut self) {
        self.line.clear();
        self.polygons.clear();
        self.ring.clear();
    }
}
