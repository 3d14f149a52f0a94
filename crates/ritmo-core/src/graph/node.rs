//! Graph node types: identity, sound payload, and adjacency.
//!
//! Each node in a composition has a [`NodeId`], a canvas position, a
//! [`NodePayload`] describing the sound it triggers, and a denormalized list
//! of child ids kept in sync with the store's edge map.

use crate::point::Point;

/// Unique identifier for a node in a composition graph.
///
/// Node IDs are assigned sequentially and never reused within a store
/// instance, including across deletions. They remain stable for the lifetime
/// of the store, so id equality stands in for reference identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Reconstructs an id from its raw value (persistence restore).
    #[inline]
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The sound a node triggers.
///
/// A tagged variant rather than a player object: the store stays pure data,
/// and whatever implements [`crate::schedule::AudioPlayer`] dispatches on the
/// payload when the node fires.
#[derive(Clone, Debug, PartialEq)]
pub enum NodePayload {
    /// A synthesized tone around a base frequency.
    Synth {
        /// Base frequency in Hz.
        base_frequency: f32,
    },
    /// A named sampled clip, resolved by the audio layer.
    Sample {
        /// Sample name or file reference.
        name: String,
    },
    /// Wraps another payload that only fires with the given chance.
    Probabilistic {
        /// Probability of the inner payload firing, in `0.0..=1.0`.
        chance: f64,
        /// The payload fired when the roll succeeds.
        inner: Box<NodePayload>,
    },
}

impl NodePayload {
    /// Shorthand for a synth payload.
    pub fn synth(base_frequency: f32) -> Self {
        NodePayload::Synth { base_frequency }
    }

    /// Shorthand for a sample payload.
    pub fn sample(name: impl Into<String>) -> Self {
        NodePayload::Sample { name: name.into() }
    }

    /// Wraps `self` so it only fires with probability `chance`.
    pub fn with_chance(self, chance: f64) -> Self {
        NodePayload::Probabilistic {
            chance,
            inner: Box::new(self),
        }
    }
}

/// A positioned audio trigger in the composition graph.
///
/// Created through [`crate::GraphStore::create_node`], which assigns the id.
/// The `children` list is an adjacency cache owned by the store: it is
/// updated on every edge insert/delete and must not be mutated elsewhere.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    /// Canvas position; logically part of node identity for hit-testing.
    pub position: Point,
    /// The sound this node triggers.
    pub payload: NodePayload,
    pub(crate) children: Vec<NodeId>,
    /// Whether the node is part of the current selection.
    pub selected: bool,
    /// Gate for flood traversal; an inactive node halts any flood reaching it.
    pub active: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, position: Point, payload: NodePayload) -> Self {
        Self {
            id,
            position,
            payload,
            children: Vec::new(),
            selected: false,
            active: true,
        }
    }

    /// Returns this node's id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's children, in edge-insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Membership test against the adjacency cache.
    pub fn has_child(&self, child: NodeId) -> bool {
        self.children.contains(&child)
    }

    /// Appends `child` iff not already present and not the node itself.
    ///
    /// Duplicate or self additions are silent no-ops so that repeated edge
    /// attempts never corrupt adjacency.
    pub(crate) fn add_child(&mut self, child: NodeId) {
        if child != self.id && !self.has_child(child) {
            self.children.push(child);
        }
    }

    /// Removes `child` from the adjacency cache, if present.
    pub(crate) fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|&c| c != child);
    }

    /// Marks the node selected.
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Flips the node's selection flag.
    pub fn toggle_selected(&mut self) {
        self.selected = !self.selected;
    }
}
