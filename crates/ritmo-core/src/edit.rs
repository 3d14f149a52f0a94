//! Selection-driven editing operations.
//!
//! These are the graph-side halves of the canvas interactions: dragging a
//! selection, rubber-band box select, and click-toggling. Hit-testing against
//! pixels stays in the presentation layer; this module only needs positions
//! and the selection flags on the store's entities.

use crate::graph::{EdgeKey, GraphStore, NodeId};
use crate::point::{Point, Rect};

/// What a click-toggle addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionTarget {
    /// A node, by id.
    Node(NodeId),
    /// An edge, by canonical key.
    Edge(EdgeKey),
}

/// Translates every selected node by `delta`.
///
/// Edges have no position of their own; a selected edge moves implicitly
/// with its endpoints. Unselected nodes never move.
pub fn move_selected(store: &mut GraphStore, delta: Point) {
    for node in store.nodes_mut() {
        if node.selected {
            node.position.translate(delta);
        }
    }
}

/// Box select: replaces the current selection with everything inside the
/// rectangle spanned by `a` and `b` (any two opposite corners).
///
/// Bounds are inclusive. A node is inside when its position is; an edge is
/// inside when the midpoint of its endpoints is. An edge whose endpoints
/// straddle the rectangle is therefore selectable without either node being.
pub fn select_in_rect(store: &mut GraphStore, a: Point, b: Point) {
    let rect = Rect::bounding(a, b);
    store.clear_selections();

    for node in store.nodes_mut() {
        if rect.contains(node.position) {
            node.select();
        }
    }

    let midpoints: Vec<(EdgeKey, Option<Point>)> = store
        .edges()
        .map(|e| (e.key(), edge_midpoint(store, e.key())))
        .collect();
    for (key, mid) in midpoints {
        if mid.is_some_and(|m| rect.contains(m)) {
            if let Some(edge) = store.edge_mut(key) {
                edge.select();
            }
        }
    }
}

/// Flips the selection flag of one node or edge.
///
/// Unknown targets are ignored: a click on something deleted since the hit
/// test is a no-op, not an error.
pub fn toggle_select(store: &mut GraphStore, target: SelectionTarget) {
    match target {
        SelectionTarget::Node(id) => {
            if let Some(node) = store.node_mut(id) {
                node.toggle_selected();
            }
        }
        SelectionTarget::Edge(key) => {
            if let Some(edge) = store.edge_mut(key) {
                edge.toggle_selected();
            }
        }
    }
}

fn edge_midpoint(store: &GraphStore, key: EdgeKey) -> Option<Point> {
    let parent = store.node(key.parent)?;
    let child = store.node(key.child)?;
    Some(parent.position.midpoint(child.position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodePayload;

    fn store_at(positions: &[(f64, f64)]) -> (GraphStore, Vec<NodeId>) {
        let mut store = GraphStore::new();
        let ids = positions
            .iter()
            .map(|&(x, y)| store.create_node(Point::new(x, y), NodePayload::synth(440.0)))
            .collect();
        (store, ids)
    }

    #[test]
    fn move_selected_leaves_others_in_place() {
        let (mut store, ids) = store_at(&[(0.0, 0.0), (100.0, 100.0)]);
        store.node_mut(ids[0]).unwrap().select();
        move_selected(&mut store, Point::new(10.0, -5.0));

        assert_eq!(store.node(ids[0]).unwrap().position, Point::new(10.0, -5.0));
        assert_eq!(store.node(ids[1]).unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn select_in_rect_replaces_previous_selection() {
        let (mut store, ids) = store_at(&[(0.0, 0.0), (50.0, 50.0), (500.0, 500.0)]);
        store.node_mut(ids[2]).unwrap().select();

        select_in_rect(&mut store, Point::new(-10.0, -10.0), Point::new(60.0, 60.0));
        assert_eq!(store.selected_nodes(), vec![ids[0], ids[1]]);
    }

    #[test]
    fn select_in_rect_accepts_any_corner_order() {
        let (mut store, ids) = store_at(&[(5.0, 5.0)]);
        select_in_rect(&mut store, Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        assert_eq!(store.selected_nodes(), vec![ids[0]]);
    }

    #[test]
    fn select_in_rect_is_inclusive_on_the_boundary() {
        let (mut store, ids) = store_at(&[(10.0, 10.0)]);
        select_in_rect(&mut store, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(store.selected_nodes(), vec![ids[0]]);
    }

    #[test]
    fn edge_selects_by_midpoint_without_its_endpoints() {
        // Endpoints at x = 0 and x = 100 straddle a box around x = 50: the
        // edge's midpoint is inside, neither node is.
        let (mut store, ids) = store_at(&[(0.0, 0.0), (100.0, 0.0)]);
        let key = store.create_edge(ids[0], ids[1]).unwrap().key();

        select_in_rect(&mut store, Point::new(40.0, -10.0), Point::new(60.0, 10.0));
        assert!(store.selected_nodes().is_empty());
        assert_eq!(store.selected_edges(), vec![key]);
    }

    #[test]
    fn toggle_select_flips_and_ignores_missing() {
        let (mut store, ids) = store_at(&[(0.0, 0.0), (1.0, 1.0)]);
        let key = store.create_edge(ids[0], ids[1]).unwrap().key();

        toggle_select(&mut store, SelectionTarget::Node(ids[0]));
        toggle_select(&mut store, SelectionTarget::Edge(key));
        assert!(store.node(ids[0]).unwrap().selected);
        assert!(store.edge(key).unwrap().selected);

        toggle_select(&mut store, SelectionTarget::Node(ids[0]));
        assert!(!store.node(ids[0]).unwrap().selected);

        // Stale targets are ignored.
        toggle_select(&mut store, SelectionTarget::Node(NodeId::from_index(99)));
        assert!(!store.node(ids[1]).unwrap().selected);
        assert!(store.edge(key).unwrap().selected);
    }
}
