//! Graph data model for ritmo compositions.
//!
//! The graph is a general directed graph (cycles allowed — they produce
//! rhythmic loops) of audio-trigger nodes. It uses a **two-layer split**:
//!
//! - [`GraphStore`] — owned by the editing side. Holds topology (nodes in
//!   insertion order, edges keyed by their canonical [`EdgeKey`]), performs
//!   all mutations, and maintains the adjacency cache on every node.
//! - [`crate::schedule::TriggerScheduler`] — reads topology and edge delays
//!   at fire time, never trusting stale snapshots, so editing and in-flight
//!   traversal can interleave safely.
//!
//! # Identity
//!
//! Node ids are assigned sequentially and never reused for the lifetime of a
//! store, even across deletions. An edge's identity is the ordered pair of
//! endpoint ids; the store holds at most one edge per ordered pair, and a
//! reverse edge is a distinct entity.
//!
//! # Example
//!
//! ```rust
//! use ritmo_core::{GraphStore, NodePayload, Point};
//!
//! let mut store = GraphStore::new();
//! let a = store.create_node(Point::new(0.0, 0.0), NodePayload::synth(440.0));
//! let b = store.create_node(Point::new(100.0, 0.0), NodePayload::synth(660.0));
//! store.create_edge(a, b).unwrap();
//! assert_eq!(store.edge_count(), 1);
//! ```

pub mod edge;
pub mod node;
mod store;

pub use edge::{Edge, EdgeKey};
pub use node::{Node, NodeId, NodePayload};
pub use store::{EdgeOutcome, GraphError, GraphStore};
