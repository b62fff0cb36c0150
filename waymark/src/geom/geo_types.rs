//! [`geo_types`] output.

use geo_types::{Coord, CoordFloat, LineString, MultiPolygon, Point, Polygon};

use super::{Coordinates, GeometryBackend, GeometryFactory};

/// Factory producing [`geo_types`] geometries with `f64` coordinates.
pub type GeoTypesFactory<T = f64> = GeometryFactory<GeoTypesBackend<T>>;

/// Backend building [`geo_types`] geometries.
///
/// `T` is the coordinate type, usually `f64`. With `f32` coordinates lose precision.
///
/// Note that [`Polygon::new`] closes rings that are not closed.
#[derive(Debug, Clone)]
pub struct GeoTypesBackend<T: CoordFloat = f64> {
    line: Vec<Coord<T>>,
    polygons: Vec<(LineString<T>, Vec<LineString<T>>)>,
    ring: Vec<Coord<T>>,
}

impl<T: CoordFloat> Default for GeoTypesBackend<T> {
    fn default() -> Self {
        Self {
            line: Vec::new(),
            polygons: Vec::new(),
            ring: Vec::new(),
        }
    }
}

impl<T: CoordFloat> GeoTypesBackend<T> {
    /// Creates a new backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn coord(coordinates: Coordinates) -> Coord<T> {
        Coord {
            x: num_traits::cast(coordinates.x).unwrap_or_else(T::nan),
            y: num_traits::cast(coordinates.y).unwrap_or_else(T::nan),
        }
    }
}

impl<T: CoordFloat> GeometryBackend for GeoTypesBackend<T> {
    type Point = Point<T>;
    type LineString = LineString<T>;
    type MultiPolygon = MultiPolygon<T>;

    fn make_point(&mut self, coordinates: Coordinates) -> Point<T> {
        Point(Self::coord(coordinates))
    }

    fn linestring_start(&mut self) {
        self.line.clear();
    }

    fn linestring_add_location(&mut self, coordinates: Coordinates) {
        self.line.push(Self::coord(coordinates));
    }

    fn linestring_finish(&mut self) -> LineString<T> {
        LineString::new(std::mem::take(&mut self.line))
    }

    fn multipolygon_start(&mut self) {
        self.polygons.clear();
        self.ring.clear();
    }

    fn multipolygon_outer_ring_start(&mut self) {
        self.ring.clear();
    }

    fn multipolygon_outer_ring_finish(&mut self) {
        let exterior = LineString::new(std::mem::take(&mut self.ring));
        self.polygons.push((exterior, vec![]));
    }

    fn multipolygon_inner_ring_start(&mut self) {
        self.ring.clear();
    }

    fn multipolygon_inner_ring_finish(&mut self) {
        let interior = LineString::new(std::mem::take(&mut self.ring));
        match self.polygons.last_mut() {
            Some((_, interiors)) => interiors.push(interior),
            None => {
                log::warn!("Inner ring without outer ring, writing it as a separate polygon");
                self.polygons.push((interior, vec![]));
            }
        }
    }

    fn multipolygon_add_location(&mut self, coordinates: Coordinates) {
        self.ring.push(Self::coord(coordinates));
    }

    fn multipolygon_finish(&mut self) -> MultiPolygon<T> {
        MultiPolygon::new(
            self.polygons
                .drain(..)
                .map(|(exterior, interiors)| Polygon::new(exterior, interiors))
                .collect(),
        )
    }

    fn discard(&mut self) {
        self.line.clear();
        self.polygons.clear();
        self.ring.clear();
    }
}
