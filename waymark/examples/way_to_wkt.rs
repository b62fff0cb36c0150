//! This example walks a small way history and prints every revision of the way as WKT.
//!
//! Run with `RUST_LOG=debug` to see why revisions without geometry are skipped.

use waymark::diff::{apply_diff, DiffHandler, DiffNode, DiffWay};
use waymark::geom::{Direction, UseNodes, WktBackend, WktFactory};
use waymark::waymark_types::{
    Location, Node, NodeRef, ObjectMeta, OsmObject, Timestamp, Way, WayNodeList,
};
use waymark::WaymarkError;

struct WayPrinter {
    factory: WktFactory,
}

impl DiffHandler for WayPrinter {
    fn way(&mut self, diff: &DiffWay<'_>) {
        let way = diff.curr();
        if !way.meta.visible {
            println!("way {} v{}: deleted", diff.id(), diff.version());
            return;
        }

        match self
            .factory
            .create_linestring(&way.nodes, UseNodes::Unique, Direction::Forward)
        {
            Ok(wkt) => println!(
                "way {} v{} [{}..{}]: {wkt}",
                diff.id(),
                diff.version(),
                diff.start_time().as_secs(),
                diff.end_time().as_secs()
            ),
            Err(err) => log::warn!("way {} v{}: {err}", diff.id(), diff.version()),
        }
    }
}

#[derive(Default)]
struct NodeCounter {
    created: usize,
    modified: usize,
}

impl DiffHandler for NodeCounter {
    fn node(&mut self, diff: &DiffNode<'_>) {
        if diff.first() {
            self.created += 1;
        } else {
            self.modified += 1;
        }
    }
}

fn history() -> Vec<OsmObject> {
    let node = |id: i64, version: u32, lon: f64, lat: f64| -> OsmObject {
        Node::new(
            ObjectMeta::new(id)
                .with_version(version)
                .with_timestamp(Timestamp::from_secs(1_000 * version)),
            Location::new(lon, lat),
        )
        .into()
    };

    let way = |version: u32, nodes: Vec<NodeRef>, visible: bool| -> OsmObject {
        Way::new(
            ObjectMeta::new(20)
                .with_version(version)
                .with_visible(visible)
                .with_timestamp(Timestamp::from_secs(1_500 * version)),
            WayNodeList::from(nodes),
        )
        .into()
    };

    vec![
        node(1, 1, 3.2, 4.2),
        node(1, 2, 3.25, 4.2),
        node(2, 1, 3.5, 4.7),
        node(3, 1, 3.6, 4.9),
        way(
            1,
            vec![
                NodeRef::new(1, Location::new(3.2, 4.2)),
                NodeRef::new(2, Location::new(3.5, 4.7)),
            ],
            true,
        ),
        way(
            2,
            vec![
                NodeRef::new(1, Location::new(3.25, 4.2)),
                NodeRef::new(2, Location::new(3.5, 4.7)),
                NodeRef::new(2, Location::new(3.5, 4.7)),
                NodeRef::new(3, Location::new(3.6, 4.9)),
            ],
            true,
        ),
        way(3, vec![NodeRef::new(1, Location::new(3.25, 4.2))], true),
        way(4, vec![], false),
    ]
}

fn main() -> Result<(), WaymarkError> {
    env_logger::init();

    let mut printer = WayPrinter {
        factory: WktFactory::new(WktBackend::new().with_precision(3)),
    };
    let mut nodes = NodeCounter::default();

    apply_diff(&history(), (&mut printer, &mut nodes))?;

    println!(
        "nodes: {} created, {} modified",
        nodes.created, nodes.modified
    );

    Ok(())
}
