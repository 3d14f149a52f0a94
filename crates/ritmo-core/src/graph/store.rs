//! Graph store — node/edge ownership, mutation API, and selection queries.
//!
//! [`GraphStore`] is the single shared mutable resource between the editing
//! layer (user input) and the trigger scheduler (timed hops). Mutation and
//! traversal interleave between scheduled steps, so the store guarantees:
//! ids are never reused, the edge map holds at most one edge per ordered
//! pair, and every adjacency cache entry has a backing node at mutation time.
//! The scheduler defends against the rest by re-checking the edge map when a
//! hop is scheduled.

use std::collections::HashMap;

use thiserror::Error;

use crate::point::Point;

use super::edge::{Edge, EdgeKey};
use super::node::{Node, NodeId, NodePayload};

/// Errors surfaced by graph mutations.
///
/// Traversal-time races (node or edge gone mid-flood) are deliberately not
/// errors; they terminate the affected branch silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// An edge's endpoints refer to the same node.
    #[error("node {0} cannot connect to itself")]
    SelfLoop(NodeId),

    /// The referenced node is not in the store.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// A node with this id already exists (persistence restore only).
    #[error("node id {0} already in use")]
    DuplicateNodeId(NodeId),
}

/// Explicit status of a [`GraphStore::create_edge`] call.
///
/// Duplicate insertion is a designed no-op (first writer wins), reported as
/// a status value rather than an error so callers can branch without
/// exception-style control flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was inserted and the parent's adjacency updated.
    Created(EdgeKey),
    /// An edge with this canonical key already existed; nothing changed.
    AlreadyExists(EdgeKey),
}

impl EdgeOutcome {
    /// The canonical key, whichever way the call went.
    pub fn key(self) -> EdgeKey {
        match self {
            EdgeOutcome::Created(key) | EdgeOutcome::AlreadyExists(key) => key,
        }
    }
}

/// Owns the nodes and edges of one composition graph.
///
/// Nodes keep insertion order (which is also display and trigger-start
/// order); edges live in a map keyed by canonical [`EdgeKey`], so their
/// iteration order is unspecified and callers must not depend on it.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    edges: HashMap<EdgeKey, Edge>,
    next_id: u32,
}

impl GraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node mutations ---

    /// Creates a node at `position`, assigning the next id.
    ///
    /// New nodes start unselected and active with no children.
    pub fn create_node(&mut self, position: Point, payload: NodePayload) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node::new(id, position, payload));
        tracing::debug!("graph_add: node {id}");
        id
    }

    /// Inserts a node with an explicit id, for persistence restoration.
    ///
    /// Bumps the id counter past `id` so later [`create_node`](Self::create_node)
    /// calls stay unique.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNodeId`] if the id is already live.
    pub fn insert_node_with_id(
        &mut self,
        id: NodeId,
        position: Point,
        payload: NodePayload,
    ) -> Result<(), GraphError> {
        if self.node(id).is_some() {
            return Err(GraphError::DuplicateNodeId(id));
        }
        self.next_id = self.next_id.max(id.0 + 1);
        self.nodes.push(Node::new(id, position, payload));
        tracing::debug!("graph_add: node {id} (restored)");
        Ok(())
    }

    // --- Edge mutations ---

    /// Connects `parent -> child` with the default delay scale of 1.0.
    ///
    /// See [`create_edge_scaled`](Self::create_edge_scaled).
    pub fn create_edge(&mut self, parent: NodeId, child: NodeId) -> Result<EdgeOutcome, GraphError> {
        self.create_edge_scaled(parent, child, 1.0)
    }

    /// Connects `parent -> child` with the given delay scale.
    ///
    /// At-most-once per ordered pair: if the canonical key is already mapped,
    /// nothing changes and [`EdgeOutcome::AlreadyExists`] is returned. A
    /// reverse edge is a distinct pair and is always permitted.
    ///
    /// # Errors
    ///
    /// [`GraphError::SelfLoop`] when `parent == child`;
    /// [`GraphError::NodeNotFound`] when either endpoint is not in the store.
    /// Neither error mutates the store.
    pub fn create_edge_scaled(
        &mut self,
        parent: NodeId,
        child: NodeId,
        delay_scale: f64,
    ) -> Result<EdgeOutcome, GraphError> {
        let key = EdgeKey::new(parent, child)?;
        self.node(parent).ok_or(GraphError::NodeNotFound(parent))?;
        self.node(child).ok_or(GraphError::NodeNotFound(child))?;

        if self.edges.contains_key(&key) {
            tracing::debug!("graph_connect: {key} already exists, ignored");
            return Ok(EdgeOutcome::AlreadyExists(key));
        }

        self.edges.insert(key, Edge::new(key, delay_scale));
        if let Some(p) = self.node_mut(parent) {
            p.add_child(child);
        }
        tracing::debug!("graph_connect: {key}");
        Ok(EdgeOutcome::Created(key))
    }

    // --- Lookups ---

    /// Linear lookup by id. Absence is a normal outcome (stale ids from
    /// persisted graphs), not an error.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Mutable variant of [`node`](Self::node).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    /// Looks up an edge by its canonical key.
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }

    /// Mutable variant of [`edge`](Self::edge).
    pub fn edge_mut(&mut self, key: EdgeKey) -> Option<&mut Edge> {
        self.edges.get_mut(&key)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Mutable iteration over all nodes, in insertion order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// All edges, in unspecified order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Mutable iteration over all edges, in unspecified order.
    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.values_mut()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Selection ---

    /// Whether any node or edge is selected.
    pub fn has_selected(&self) -> bool {
        self.nodes.iter().any(|n| n.selected) || self.edges.values().any(|e| e.selected)
    }

    /// Ids of selected nodes, in insertion order.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id())
            .collect()
    }

    /// Keys of selected edges, in unspecified order.
    pub fn selected_edges(&self) -> Vec<EdgeKey> {
        self.edges
            .values()
            .filter(|e| e.selected)
            .map(|e| e.key())
            .collect()
    }

    /// Clears every selection flag. Idempotent.
    pub fn clear_selections(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
        for edge in self.edges.values_mut() {
            edge.selected = false;
        }
    }

    /// Uniformly sets every node's `active` gate.
    pub fn set_all_active(&mut self, state: bool) {
        for node in &mut self.nodes {
            node.active = state;
        }
    }

    // --- Deletion ---

    /// Removes every selected node and edge.
    ///
    /// Two phases, in order: first all selected nodes are removed and purged
    /// from every other node's children list; then every edge that is itself
    /// selected, or whose parent or child was just deleted, is dropped. Node
    /// removal must finish first so the edge pass sees the complete
    /// deleted-node set. Calling with nothing selected is a no-op.
    pub fn delete_selected(&mut self) {
        let deleted: Vec<NodeId> = self.selected_nodes();

        if !deleted.is_empty() {
            self.nodes.retain(|n| !n.selected);
            for node in &mut self.nodes {
                for &gone in &deleted {
                    node.remove_child(gone);
                }
            }
        }

        self.edges.retain(|key, edge| {
            let drop = edge.selected
                || deleted.contains(&key.parent)
                || deleted.contains(&key.child);
            if drop {
                tracing::debug!("graph_disconnect: {key}");
            }
            !drop
        });

        for &id in &deleted {
            tracing::debug!("graph_remove: node {id}");
        }
    }
}
