//! Graph edge types: canonical directed identity and per-edge delay.
//!
//! An edge's identity is the ordered pair of endpoint node ids. The store
//! keys its edge map by [`EdgeKey`], so at most one edge can exist per
//! ordered pair; the reverse direction is a distinct key.

use super::node::NodeId;
use super::store::GraphError;

/// Canonical identity of a directed edge: the ordered `(parent, child)` pair.
///
/// Displays as the canonical hash string `"<parent>-><child>"`. Construction
/// rejects self-loops; [`EdgeKey::between`] is the non-failing variant used
/// on the traversal path, where endpoints are already known to be distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    /// Source node.
    pub parent: NodeId,
    /// Destination node.
    pub child: NodeId,
}

impl EdgeKey {
    /// Builds the key for `parent -> child`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::SelfLoop`] when both endpoints are the same node.
    pub fn new(parent: NodeId, child: NodeId) -> Result<Self, GraphError> {
        if parent == child {
            return Err(GraphError::SelfLoop(parent));
        }
        Ok(Self { parent, child })
    }

    /// Non-failing variant for traversal: `None` instead of an error for
    /// equal endpoints, so a flood never has to handle a structural error.
    pub fn between(parent: NodeId, child: NodeId) -> Option<Self> {
        (parent != child).then_some(Self { parent, child })
    }

    /// The key of the opposite direction (`child -> parent`).
    ///
    /// A valid key always reverses to a valid key.
    pub fn reversed(self) -> Self {
        Self {
            parent: self.child,
            child: self.parent,
        }
    }
}

impl core::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}->{}", self.parent, self.child)
    }
}

/// A directed connection carrying a propagation delay scale.
///
/// The effective delay of a hop over this edge is
/// `delay_scale × traverse_delay_ms` (the scheduler's global scalar), read at
/// the moment the hop is scheduled.
#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) key: EdgeKey,
    /// Multiplier applied to the global traverse delay. Positive.
    pub delay_scale: f64,
    /// Whether the edge is part of the current selection.
    pub selected: bool,
}

impl Edge {
    pub(crate) fn new(key: EdgeKey, delay_scale: f64) -> Self {
        Self {
            key,
            delay_scale,
            selected: false,
        }
    }

    /// This edge's canonical key.
    #[inline]
    pub fn key(&self) -> EdgeKey {
        self.key
    }

    /// Source node id.
    #[inline]
    pub fn parent(&self) -> NodeId {
        self.key.parent
    }

    /// Destination node id.
    #[inline]
    pub fn child(&self) -> NodeId {
        self.key.child
    }

    /// Marks the edge selected.
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Flips the edge's selection flag.
    pub fn toggle_selected(&mut self) {
        self.selected = !self.selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_rejects_self_loop() {
        let n = NodeId(7);
        assert!(matches!(
            EdgeKey::new(n, n),
            Err(GraphError::SelfLoop(id)) if id == n
        ));
        assert_eq!(EdgeKey::between(n, n), None);
    }

    #[test]
    fn key_displays_canonical_hash() {
        let key = EdgeKey::new(NodeId(3), NodeId(12)).unwrap();
        assert_eq!(key.to_string(), "3->12");
    }

    #[test]
    fn reverse_is_distinct_identity() {
        let key = EdgeKey::new(NodeId(0), NodeId(1)).unwrap();
        let rev = key.reversed();
        assert_ne!(key, rev);
        assert_eq!(rev.to_string(), "1->0");
        assert_eq!(rev.reversed(), key);
    }
}
