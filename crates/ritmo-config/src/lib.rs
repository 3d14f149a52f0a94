//! Ritmo Config - composition file format and persistence
//!
//! Compositions are TOML documents capturing a full graph snapshot: nodes
//! with explicit ids, positions, and sounds, plus edges with delay scales and
//! the global traverse delay. [`Composition::build_store`] rebuilds a
//! [`ritmo_core::GraphStore`] with ids restored exactly; malformed edges are
//! logged and skipped so one bad line never takes a document down.
//!
//! # Example
//!
//! ```rust
//! use ritmo_config::{Composition, EdgeSpec, NodeSpec, SoundSpec};
//!
//! let comp = Composition::new("Pulse")
//!     .with_node(NodeSpec {
//!         id: 0,
//!         x: 0.0,
//!         y: 0.0,
//!         sound: SoundSpec::Synth { base_frequency: 440.0 },
//!     })
//!     .with_node(NodeSpec {
//!         id: 1,
//!         x: 120.0,
//!         y: 0.0,
//!         sound: SoundSpec::Sample { name: "kick".into() },
//!     })
//!     .with_edge(EdgeSpec { parent: 0, child: 1, delay_scale: 0.5 });
//!
//! let store = comp.build_store().unwrap();
//! assert_eq!(store.node_count(), 2);
//! ```

pub mod composition;
pub mod error;

pub use composition::{Composition, EdgeSpec, NodeSpec, SoundSpec};
pub use error::ConfigError;
