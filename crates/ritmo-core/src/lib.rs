//! Ritmo Core - graph store and flood-trigger scheduling engine
//!
//! This crate holds the data model and propagation algorithm behind ritmo's
//! graph compositions: directed graphs whose nodes are audio triggers and
//! whose edges carry timed propagation of a "play" signal.
//!
//! # Core Abstractions
//!
//! ## Graph
//!
//! - [`GraphStore`] - owns nodes and the canonical edge map; all mutations
//!   (create, connect, select, delete) go through it
//! - [`Node`] / [`NodePayload`] - a positioned trigger with a tagged sound
//!   payload (synth, sample, probabilistic wrapper)
//! - [`EdgeKey`] / [`Edge`] - canonical directed-edge identity plus a per-edge
//!   delay scale
//!
//! ## Scheduling
//!
//! - [`TriggerScheduler`] - the flood trigger: fires a node's sound, then
//!   enqueues timed hops to its children on a virtual clock
//! - [`AudioPlayer`] - boundary trait to whatever actually makes sound
//! - [`SchedulerConfig`] - global traverse delay, kill semantics, hop bounds
//!
//! ## Editing
//!
//! - [`edit`] - selection-driven operations: move, box-select, toggle-select
//!
//! Rendering, hit-testing, input routing, and synthesis live outside this
//! crate; the scheduler only ever talks to an [`AudioPlayer`].

pub mod edit;
pub mod graph;
pub mod point;
pub mod schedule;

pub use graph::{Edge, EdgeKey, EdgeOutcome, GraphError, GraphStore, Node, NodeId, NodePayload};
pub use point::{Point, Rect};
pub use schedule::{
    AudioPlayer, SchedulerConfig, StepResult, TriggerFire, TriggerScheduler, DEFAULT_TRAVERSE_DELAY_MS,
};
