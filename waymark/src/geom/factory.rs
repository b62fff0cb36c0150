use waymark_types::{Area, AreaItem, HasLocation, InvalidLocation, Location, NodeRef, NodeRefList};

use super::{Coordinates, Direction, GeometryError, LineStringOptions, UseNodes};

/// Output format of a [`GeometryFactory`].
///
/// The factory drives a backend through a fixed sequence of calls for each geometry kind:
///
/// * point: [`make_point`](GeometryBackend::make_point)
/// * line string: `linestring_start`, `linestring_add_location` for every point,
///   `linestring_finish`
/// * multipolygon: `multipolygon_start`, then for each ring `multipolygon_outer_ring_start` (or
///   `multipolygon_inner_ring_start`), `multipolygon_add_location` for every point and the matching
///   `*_finish`, and finally `multipolygon_finish`
///
/// If the factory gives up on a geometry after it was started, it calls
/// [`discard`](GeometryBackend::discard) instead of the finishing method. After `discard` the
/// backend must be ready for a new geometry. In particular, a multipolygon that was started but
/// received no rings must be discarded cleanly.
///
/// An outer ring starts a new polygon, inner rings belong to the last started polygon.
pub trait GeometryBackend {
    /// Point type.
    type Point;
    /// Line string type.
    type LineString;
    /// Multipolygon type.
    type MultiPolygon;

    /// Creates a point.
    fn make_point(&mut self, coordinates: Coordinates) -> Self::Point;

    /// Starts a new line string.
    fn linestring_start(&mut self);
    /// Appends a point to the line string.
    fn linestring_add_location(&mut self, coordinates: Coordinates);
    /// Returns the line string. Only called with two or more points added.
    fn linestring_finish(&mut self) -> Self::LineString;

    /// Starts a new multipolygon.
    fn multipolygon_start(&mut self);
    /// Starts an outer ring, and with it a new polygon.
    fn multipolygon_outer_ring_start(&mut self);
    /// Finishes the outer ring.
    fn multipolygon_outer_ring_finish(&mut self);
    /// Starts an inner ring of the current polygon.
    fn multipolygon_inner_ring_start(&mut self);
    /// Finishes the inner ring.
    fn multipolygon_inner_ring_finish(&mut self);
    /// Appends a point to the current ring.
    fn multipolygon_add_location(&mut self, coordinates: Coordinates);
    /// Returns the multipolygon. Only called if at least one ring was added.
    fn multipolygon_finish(&mut self) -> Self::MultiPolygon;

    /// Drops whatever geometry is in progress.
    fn discard(&mut self);
}

/// Builds geometries from map objects with the given backend.
///
/// The factory checks everything that does not depend on the output format: locations must be
/// valid, line strings need at least two points, areas need at least one ring, and consecutive
/// points with the same location are collapsed where requested.
///
/// A backend usually keeps the geometry in progress, so a factory is used by one caller at a time.
#[derive(Debug, Clone, Default)]
pub struct GeometryFactory<B> {
    backend: B,
}

impl<B: GeometryBackend> GeometryFactory<B> {
    /// Creates a factory with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to change its settings between calls.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the factory and returns the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Creates a point from a location, node or node reference.
    ///
    /// Nothing is sent to the backend if the location is not valid.
    pub fn create_point(&mut self, object: &impl HasLocation) -> Result<B::Point, GeometryError> {
        let coordinates = Coordinates::try_from(object.location())?;
        Ok(self.backend.make_point(coordinates))
    }

    /// Creates a line string from a way or any other list of node references.
    ///
    /// Fails with [`GeometryError::InvalidLineString`] if fewer than two points are left after
    /// applying `use_nodes`, and with [`GeometryError::InvalidLocation`] if any node has an invalid
    /// location.
    pub fn create_linestring<L>(
        &mut self,
        nodes: &L,
        use_nodes: UseNodes,
        direction: Direction,
    ) -> Result<B::LineString, GeometryError>
    where
        L: NodeRefList + ?Sized,
    {
        let nodes = nodes.node_refs();

        self.backend.linestring_start();
        let added = match direction {
            Direction::Forward => self.add_linestring_points(nodes.iter(), use_nodes),
            Direction::Backward => self.add_linestring_points(nodes.iter().rev(), use_nodes),
        };

        match added {
            Ok(count) if count >= 2 => Ok(self.backend.linestring_finish()),
            Ok(count) => {
                self.backend.discard();
                log::debug!(
                    "Linestring of {} nodes has only {count} usable points",
                    nodes.len()
                );
                Err(GeometryError::InvalidLineString)
            }
            Err(err) => {
                self.backend.discard();
                log::debug!("Linestring contains a node with invalid location");
                Err(err.into())
            }
        }
    }

    /// Same as [`GeometryFactory::create_linestring`] with unique nodes in forward direction.
    pub fn create_linestring_default<L>(
        &mut self,
        nodes: &L,
    ) -> Result<B::LineString, GeometryError>
    where
        L: NodeRefList + ?Sized,
    {
        self.create_linestring(nodes, UseNodes::Unique, Direction::Forward)
    }

    /// Same as [`GeometryFactory::create_linestring`] with the settings taken from `options`.
    pub fn create_linestring_with<L>(
        &mut self,
        nodes: &L,
        options: LineStringOptions,
    ) -> Result<B::LineString, GeometryError>
    where
        L: NodeRefList + ?Sized,
    {
        self.create_linestring(nodes, options.use_nodes, options.direction)
    }

    /// Creates a multipolygon from the rings of an area.
    ///
    /// Rings are sent to the backend in the order they appear in the area, with consecutive
    /// duplicate points removed. Items that are not rings are skipped. Fails with
    /// [`GeometryError::InvalidArea`] if the area has no rings.
    pub fn create_multipolygon(&mut self, area: &Area) -> Result<B::MultiPolygon, GeometryError> {
        self.backend.multipolygon_start();

        match self.add_rings(area) {
            Ok(0) => {
                self.backend.discard();
                log::debug!("Area {} has no rings", area.meta.id);
                Err(GeometryError::InvalidArea)
            }
            Ok(_) => Ok(self.backend.multipolygon_finish()),
            Err(err) => {
                self.backend.discard();
                log::debug!("Area {} contains a node with invalid location", area.meta.id);
                Err(err.into())
            }
        }
    }

    fn add_linestring_points<'a>(
        &mut self,
        nodes: impl Iterator<Item = &'a NodeRef>,
        use_nodes: UseNodes,
    ) -> Result<usize, InvalidLocation> {
        let mut count = 0;
        for coordinates in UsableLocations::new(nodes, use_nodes) {
            self.backend.linestring_add_location(coordinates?);
            count += 1;
        }

        Ok(count)
    }

    fn add_rings(&mut self, area: &Area) -> Result<usize, InvalidLocation> {
        let mut rings = 0;
        for item in area.items() {
            match item {
                AreaItem::OuterRing(ring) => {
                    self.backend.multipolygon_outer_ring_start();
                    self.add_ring_points(ring)?;
                    self.backend.multipolygon_outer_ring_finish();
                }
                AreaItem::InnerRing(ring) => {
                    self.backend.multipolygon_inner_ring_start();
                    self.add_ring_points(ring)?;
                    self.backend.multipolygon_inner_ring_finish();
                }
                AreaItem::Tags(_) => continue,
            }

            rings += 1;
        }

        Ok(rings)
    }

    fn add_ring_points(&mut self, ring: &impl NodeRefList) -> Result<(), InvalidLocation> {
        for coordinates in UsableLocations::new(ring.node_refs().iter(), UseNodes::Unique) {
            self.backend.multipolygon_add_location(coordinates?);
        }

        Ok(())
    }
}

/// Iterator over the coordinates of the nodes that make it into a geometry.
///
/// Every node's location is validated, including the ones that are skipped as duplicates.
struct UsableLocations<'a, Iter>
where
    Iter: Iterator<Item = &'a NodeRef>,
{
    nodes: Iter,
    use_nodes: UseNodes,
    last_location: Location,
}

impl<'a, Iter> UsableLocations<'a, Iter>
where
    Iter: Iterator<Item = &'a NodeRef>,
{
    fn new(nodes: Iter, use_nodes: UseNodes) -> Self {
        Self {
            nodes,
            use_nodes,
            last_location: Location::UNDEFINED,
        }
    }
}

impl<'a, Iter> Iterator for UsableLocations<'a, Iter>
where
    Iter: Iterator<Item = &'a NodeRef>,
{
    type Item = Result<Coordinates, InvalidLocation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let location = self.nodes.next()?.location();
            let coordinates = match Coordinates::try_from(location) {
                Ok(v) => v,
                Err(err) => return Some(Err(err)),
            };

            if self.use_nodes == UseNodes::Unique && location == self.last_location {
                continue;
            }

            self.last_location = location;
            return Some(Ok(coordinates));
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;
    use waymark_types::{Node, ObjectMeta, Ring, TagList, WayNodeList};

    use super::*;

    /// Records every call it receives.
    #[derive(Debug, Default)]
    struct RecordingBackend {
        calls: Vec<Call>,
        line: Vec<Coordinates>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Point(Coordinates),
        LineStart,
        LineAdd(Coordinates),
        LineFinish,
        MultiStart,
        OuterStart,
        OuterFinish,
        InnerStart,
        InnerFinish,
        MultiAdd(Coordinates),
        MultiFinish,
        Discard,
    }

    impl GeometryBackend for RecordingBackend {
        type Point = Coordinates;
        type LineString = Vec<Coordinates>;
        type MultiPolygon = usize;

        fn make_point(&mut self, coordinates: Coordinates) -> Coordinates {
            self.calls.push(Call::Point(coordinates));
            coordinates
        }

        fn linestring_start(&mut self) {
            self.calls.push(Call::LineStart);
            self.line.clear();
        }

        fn linestring_add_location(&mut self, coordinates: Coordinates) {
            self.calls.push(Call::LineAdd(coordinates));
            self.line.push(coordinates);
        }

        fn linestring_finish(&mut self) -> Vec<Coordinates> {
            self.calls.push(Call::LineFinish);
            std::mem::take(&mut self.line)
        }

        fn multipolygon_start(&mut self) {
            self.calls.push(Call::MultiStart);
        }

        fn multipolygon_outer_ring_start(&mut self) {
            self.calls.push(Call::OuterStart);
        }

        fn multipolygon_outer_ring_finish(&mut self) {
            self.calls.push(Call::OuterFinish);
        }

        fn multipolygon_inner_ring_start(&mut self) {
            self.calls.push(Call::InnerStart);
        }

        fn multipolygon_inner_ring_finish(&mut self) {
            self.calls.push(Call::InnerFinish);
        }

        fn multipolygon_add_location(&mut self, coordinates: Coordinates) {
            self.calls.push(Call::MultiAdd(coordinates));
        }

        fn multipolygon_finish(&mut self) -> usize {
            self.calls.push(Call::MultiFinish);
            self.calls.len()
        }

        fn discard(&mut self) {
            self.calls.push(Call::Discard);
            self.line.clear();
        }
    }

    fn factory() -> GeometryFactory<RecordingBackend> {
        GeometryFactory::new(RecordingBackend::default())
    }

    fn calls(factory: &GeometryFactory<RecordingBackend>) -> &[Call] {
        &factory.backend().calls
    }

    fn c(x: f64, y: f64) -> Coordinates {
        Coordinates::new(x, y)
    }

    fn way_nodes() -> WayNodeList {
        [
            (1, (3.2, 4.2)),
            (3, (3.5, 4.7)),
            (4, (3.5, 4.7)),
            (2, (3.6, 4.9)),
        ]
        .into_iter()
        .collect()
    }

    fn ring(points: &[(f64, f64)]) -> Ring {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as i64, *p))
            .collect()
    }

    #[test]
    fn point_from_location_and_node() {
        let mut factory = factory();
        let point = factory
            .create_point(&Location::new(3.2, 4.2))
            .expect("valid point");
        assert_eq!(point, c(3.2, 4.2));

        let node = Node::new(ObjectMeta::new(1), Location::new(1.0, 2.0));
        let point = factory.create_point(&node).expect("valid point");
        assert_eq!(point, c(1.0, 2.0));

        let node_ref = NodeRef::new(7, Location::new(-1.5, 0.5));
        let point = factory.create_point(&node_ref).expect("valid point");
        assert_eq!(point, c(-1.5, 0.5));
    }

    #[test]
    fn undefined_point_makes_no_backend_calls() {
        let mut factory = factory();
        assert_matches!(
            factory.create_point(&Location::UNDEFINED),
            Err(GeometryError::InvalidLocation(_))
        );
        assert_matches!(
            factory.create_point(&NodeRef::unresolved(3)),
            Err(GeometryError::InvalidLocation(_))
        );
        assert!(calls(&factory).is_empty());
    }

    #[test]
    fn linestring_unique_forward() {
        let mut factory = factory();
        let line = factory
            .create_linestring(&way_nodes(), UseNodes::Unique, Direction::Forward)
            .expect("valid linestring");
        assert_eq!(line, vec![c(3.2, 4.2), c(3.5, 4.7), c(3.6, 4.9)]);
        assert_eq!(calls(&factory).first(), Some(&Call::LineStart));
        assert_eq!(calls(&factory).last(), Some(&Call::LineFinish));
    }

    #[test]
    fn linestring_unique_backward() {
        let line = factory()
            .create_linestring(&way_nodes(), UseNodes::Unique, Direction::Backward)
            .expect("valid linestring");
        assert_eq!(line, vec![c(3.6, 4.9), c(3.5, 4.7), c(3.2, 4.2)]);
    }

    #[test]
    fn linestring_all_forward() {
        let line = factory()
            .create_linestring(&way_nodes(), UseNodes::All, Direction::Forward)
            .expect("valid linestring");
        assert_eq!(
            line,
            vec![c(3.2, 4.2), c(3.5, 4.7), c(3.5, 4.7), c(3.6, 4.9)]
        );
    }

    #[test]
    fn linestring_all_backward() {
        let line = factory()
            .create_linestring(&way_nodes(), UseNodes::All, Direction::Backward)
            .expect("valid linestring");
        assert_eq!(
            line,
            vec![c(3.6, 4.9), c(3.5, 4.7), c(3.5, 4.7), c(3.2, 4.2)]
        );
    }

    #[test]
    fn linestring_from_way_and_options() {
        let way = waymark_types::Way::new(ObjectMeta::new(10), way_nodes());
        let line = factory()
            .create_linestring_with(
                &way,
                LineStringOptions {
                    use_nodes: UseNodes::All,
                    direction: Direction::Forward,
                },
            )
            .expect("valid linestring");
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn linestring_default_is_unique_forward() {
        let mut factory = factory();
        let line = factory
            .create_linestring_default(&way_nodes())
            .expect("valid linestring");
        assert_eq!(line, vec![c(3.2, 4.2), c(3.5, 4.7), c(3.6, 4.9)]);

        let way = waymark_types::Way::new(ObjectMeta::new(10), way_nodes());
        let from_way = factory
            .create_linestring_default(&way)
            .expect("valid linestring");
        assert_eq!(from_way, line);
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut points = factory();
        for location in [
            Location::new(f64::NAN, f64::NAN),
            Location::new(f64::NAN, 4.2),
            Location::new(f64::INFINITY, 4.2),
            Location::new(3.5, f64::NEG_INFINITY),
        ] {
            assert_matches!(
                points.create_point(&location),
                Err(GeometryError::InvalidLocation(_))
            );
        }
        assert!(calls(&points).is_empty());

        let nodes: WayNodeList = [(1, (f64::NAN, 4.2)), (2, (3.5, f64::NAN))]
            .into_iter()
            .collect();
        for use_nodes in [UseNodes::Unique, UseNodes::All] {
            let mut factory = factory();
            assert_matches!(
                factory.create_linestring(&nodes, use_nodes, Direction::Forward),
                Err(GeometryError::InvalidLocation(_))
            );
            assert!(!calls(&factory).contains(&Call::LineFinish));
        }
    }

    #[test]
    fn empty_linestring() {
        for use_nodes in [UseNodes::Unique, UseNodes::All] {
            for direction in [Direction::Forward, Direction::Backward] {
                let mut factory = factory();
                assert_matches!(
                    factory.create_linestring(&WayNodeList::default(), use_nodes, direction),
                    Err(GeometryError::InvalidLineString)
                );
                assert_eq!(calls(&factory), &[Call::LineStart, Call::Discard]);
            }
        }
    }

    #[test]
    fn linestring_with_two_same_locations() {
        let nodes: WayNodeList = [(1, (3.5, 4.7)), (2, (3.5, 4.7))].into_iter().collect();

        for direction in [Direction::Forward, Direction::Backward] {
            let mut factory = factory();
            assert_matches!(
                factory.create_linestring(&nodes, UseNodes::Unique, direction),
                Err(GeometryError::InvalidLineString)
            );
            assert!(!calls(&factory).contains(&Call::LineFinish));
            assert_eq!(calls(&factory).last(), Some(&Call::Discard));

            let line = factory
                .create_linestring(&nodes, UseNodes::All, direction)
                .expect("valid linestring");
            assert_eq!(line, vec![c(3.5, 4.7), c(3.5, 4.7)]);
        }
    }

    #[test]
    fn linestring_with_undefined_location() {
        let nodes = WayNodeList::new(vec![
            NodeRef::new(1, Location::new(3.5, 4.7)),
            NodeRef::unresolved(2),
        ]);

        for use_nodes in [UseNodes::Unique, UseNodes::All] {
            let mut factory = factory();
            assert_matches!(
                factory.create_linestring(&nodes, use_nodes, Direction::Forward),
                Err(GeometryError::InvalidLocation(_))
            );
            assert_eq!(calls(&factory).last(), Some(&Call::Discard));
            assert!(!calls(&factory).contains(&Call::LineFinish));
        }
    }

    #[test]
    fn leading_undefined_location_is_rejected() {
        let nodes = WayNodeList::new(vec![
            NodeRef::unresolved(1),
            NodeRef::new(2, Location::new(3.5, 4.7)),
            NodeRef::new(3, Location::new(3.6, 4.7)),
        ]);

        assert_matches!(
            factory().create_linestring(&nodes, UseNodes::Unique, Direction::Forward),
            Err(GeometryError::InvalidLocation(_))
        );
    }

    #[test]
    fn area_without_rings() {
        let mut factory = factory();
        let empty = Area::new(ObjectMeta::new(2), vec![]);
        assert_matches!(
            factory.create_multipolygon(&empty),
            Err(GeometryError::InvalidArea)
        );
        assert_eq!(calls(&factory), &[Call::MultiStart, Call::Discard]);

        let tags_only = Area::new(
            ObjectMeta::new(4),
            vec![AreaItem::Tags(
                [("landuse", "forest")].into_iter().collect::<TagList>(),
            )],
        );
        assert_matches!(
            factory.create_multipolygon(&tags_only),
            Err(GeometryError::InvalidArea)
        );
    }

    #[test]
    fn area_ring_protocol() {
        let mut factory = factory();
        let area = Area::new(
            ObjectMeta::new(3),
            vec![
                AreaItem::Tags(TagList::default()),
                AreaItem::OuterRing(ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)])),
                AreaItem::InnerRing(ring(&[
                    (1.0, 1.0),
                    (2.0, 1.0),
                    (2.0, 1.0),
                    (2.0, 2.0),
                    (1.0, 1.0),
                ])),
            ],
        );

        factory.create_multipolygon(&area).expect("valid area");
        assert_eq!(
            calls(&factory),
            &[
                Call::MultiStart,
                Call::OuterStart,
                Call::MultiAdd(c(0.0, 0.0)),
                Call::MultiAdd(c(4.0, 0.0)),
                Call::MultiAdd(c(4.0, 4.0)),
                Call::MultiAdd(c(0.0, 0.0)),
                Call::OuterFinish,
                Call::InnerStart,
                Call::MultiAdd(c(1.0, 1.0)),
                Call::MultiAdd(c(2.0, 1.0)),
                Call::MultiAdd(c(2.0, 2.0)),
                Call::MultiAdd(c(1.0, 1.0)),
                Call::InnerFinish,
                Call::MultiFinish,
            ]
        );
    }

    #[test]
    fn ring_dedup_resets_per_ring() {
        let mut factory = factory();
        let area = Area::new(
            ObjectMeta::new(3),
            vec![
                AreaItem::OuterRing(ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)])),
                AreaItem::OuterRing(ring(&[(0.0, 0.0), (0.0, 1.0), (0.0, 0.0)])),
            ],
        );

        factory.create_multipolygon(&area).expect("valid area");
        let added = calls(&factory)
            .iter()
            .filter(|call| matches!(call, Call::MultiAdd(_)))
            .count();
        assert_eq!(added, 6);
    }

    #[test]
    fn area_with_undefined_location() {
        let mut factory = factory();
        let area = Area::new(
            ObjectMeta::new(3),
            vec![AreaItem::OuterRing(Ring::new(vec![
                NodeRef::new(1, Location::new(0.0, 0.0)),
                NodeRef::unresolved(2),
            ]))],
        );

        assert_matches!(
            factory.create_multipolygon(&area),
            Err(GeometryError::InvalidLocation(_))
        );
        assert_eq!(calls(&factory).last(), Some(&Call::Discard));
        assert!(!calls(&factory).contains(&Call::MultiFinish));
    }

    fn node_list_strategy() -> impl Strategy<Value = WayNodeList> {
        // A small coordinate range, so that duplicates are common.
        prop::collection::vec((0i32..4, 0i32..4), 0..12).prop_map(|points| {
            points
                .into_iter()
                .enumerate()
                .map(|(i, (x, y))| NodeRef::new(i as i64, Location::from_fixed(x, y)))
                .collect::<Vec<_>>()
                .into()
        })
    }

    fn build(
        nodes: &WayNodeList,
        use_nodes: UseNodes,
        direction: Direction,
    ) -> Result<Vec<Coordinates>, GeometryError> {
        factory().create_linestring(nodes, use_nodes, direction)
    }

    proptest! {
        #[test]
        fn all_backward_is_reverse_of_all_forward(nodes in node_list_strategy()) {
            let forward = build(&nodes, UseNodes::All, Direction::Forward);
            let backward = build(&nodes, UseNodes::All, Direction::Backward);

            match (forward, backward) {
                (Ok(forward), Ok(mut backward)) => {
                    backward.reverse();
                    prop_assert_eq!(forward, backward);
                }
                (Err(forward), Err(backward)) => {
                    prop_assert_eq!(forward, GeometryError::InvalidLineString);
                    prop_assert_eq!(backward, GeometryError::InvalidLineString);
                    prop_assert!(nodes.len() < 2);
                }
                _ => prop_assert!(false, "directions disagree on validity"),
            }
        }

        #[test]
        fn unique_is_deduplicated_subsequence_of_all(
            nodes in node_list_strategy(),
            backward in any::<bool>(),
        ) {
            let direction = if backward { Direction::Backward } else { Direction::Forward };

            if let Ok(unique) = build(&nodes, UseNodes::Unique, direction) {
                prop_assert!(unique.len() >= 2);
                prop_assert!(unique.windows(2).all(|pair| pair[0] != pair[1]));

                let all = build(&nodes, UseNodes::All, direction).expect("all is never shorter");
                let mut remaining = all.iter();
                for point in &unique {
                    prop_assert!(remaining.any(|p| p == point));
                }
            }
        }

        #[test]
        fn identical_pair_is_invalid_when_unique(x in 0i32..1000, y in 0i32..1000) {
            let location = Location::from_fixed(x, y);
            let nodes = WayNodeList::new(vec![NodeRef::new(1, location), NodeRef::new(2, location)]);
            prop_assert_eq!(
                build(&nodes, UseNodes::Unique, Direction::Forward),
                Err(GeometryError::InvalidLineString)
            );
        }
    }
}
