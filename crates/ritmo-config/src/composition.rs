//! Composition file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ritmo_core::{GraphStore, NodeId, NodePayload, Point, SchedulerConfig};

use crate::error::ConfigError;

/// Composition file format for trigger graphs.
///
/// Compositions are stored as TOML files holding the full graph snapshot:
/// every node with its exact id, position, and sound, and every edge with its
/// delay scale. Loading restores ids exactly so documents can reference nodes
/// stably across sessions.
///
/// # TOML Format
///
/// ```toml
/// name = "Pulse"
/// description = "Two synths chasing a sample"
/// traverse_delay_ms = 500
///
/// [[nodes]]
/// id = 0
/// x = 0.0
/// y = 0.0
/// [nodes.sound]
/// type = "synth"
/// base_frequency = 440.0
///
/// [[nodes]]
/// id = 1
/// x = 120.0
/// y = 40.0
/// [nodes.sound]
/// type = "sample"
/// name = "kick"
///
/// [[edges]]
/// parent = 0
/// child = 1
/// delay_scale = 0.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Composition {
    /// Name of the composition.
    pub name: String,

    /// Optional description of the composition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Global traverse delay in milliseconds (defaults to 500).
    #[serde(default = "default_traverse_delay_ms")]
    pub traverse_delay_ms: u64,

    /// Nodes of the graph, ids explicit.
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    /// Edges of the graph, referencing node ids.
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

fn default_traverse_delay_ms() -> u64 {
    ritmo_core::DEFAULT_TRAVERSE_DELAY_MS
}

fn default_delay_scale() -> f64 {
    1.0
}

/// Serialized form of one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    /// The node's id, restored exactly on load.
    pub id: u32,
    /// Canvas x position.
    pub x: f64,
    /// Canvas y position.
    pub y: f64,
    /// The sound the node triggers.
    pub sound: SoundSpec,
}

/// Serialized form of one edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeSpec {
    /// Parent node id.
    pub parent: u32,
    /// Child node id.
    pub child: u32,
    /// Delay multiplier (defaults to 1.0).
    #[serde(default = "default_delay_scale")]
    pub delay_scale: f64,
}

/// Serialized form of a [`NodePayload`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SoundSpec {
    /// A synthesized tone.
    Synth {
        /// Base frequency in Hz.
        base_frequency: f32,
    },
    /// A named sample.
    Sample {
        /// Sample name or file reference.
        name: String,
    },
    /// A sound that only fires with the given chance.
    Probabilistic {
        /// Probability of firing, in `0.0..=1.0`.
        chance: f64,
        /// The wrapped sound.
        inner: Box<SoundSpec>,
    },
}

impl SoundSpec {
    /// Converts into the core payload type.
    pub fn into_payload(self) -> NodePayload {
        match self {
            SoundSpec::Synth { base_frequency } => NodePayload::Synth { base_frequency },
            SoundSpec::Sample { name } => NodePayload::Sample { name },
            SoundSpec::Probabilistic { chance, inner } => NodePayload::Probabilistic {
                chance,
                inner: Box::new(inner.into_payload()),
            },
        }
    }
}

impl From<&NodePayload> for SoundSpec {
    fn from(payload: &NodePayload) -> Self {
        match payload {
            NodePayload::Synth { base_frequency } => SoundSpec::Synth {
                base_frequency: *base_frequency,
            },
            NodePayload::Sample { name } => SoundSpec::Sample { name: name.clone() },
            NodePayload::Probabilistic { chance, inner } => SoundSpec::Probabilistic {
                chance: *chance,
                inner: Box::new(SoundSpec::from(inner.as_ref())),
            },
        }
    }
}

impl Composition {
    /// Create a new empty composition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            traverse_delay_ms: default_traverse_delay_ms(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Create a composition with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the global traverse delay.
    pub fn with_traverse_delay_ms(mut self, ms: u64) -> Self {
        self.traverse_delay_ms = ms;
        self
    }

    /// Add a node to the composition.
    pub fn with_node(mut self, node: NodeSpec) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add an edge to the composition.
    pub fn with_edge(mut self, edge: EdgeSpec) -> Self {
        self.edges.push(edge);
        self
    }

    /// Load a composition from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let composition: Composition = toml::from_str(&content)?;
        Ok(composition)
    }

    /// Load a composition from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the composition to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the composition to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Snapshot a live graph store into a composition document.
    ///
    /// Nodes keep their store order; edges are sorted by `(parent, child)` so
    /// the document is byte-stable across saves.
    pub fn from_store(name: impl Into<String>, store: &GraphStore) -> Self {
        let nodes = store
            .nodes()
            .map(|n| NodeSpec {
                id: n.id().index(),
                x: n.position.x,
                y: n.position.y,
                sound: SoundSpec::from(&n.payload),
            })
            .collect();

        let mut edges: Vec<EdgeSpec> = store
            .edges()
            .map(|e| EdgeSpec {
                parent: e.parent().index(),
                child: e.child().index(),
                delay_scale: e.delay_scale,
            })
            .collect();
        edges.sort_by_key(|e| (e.parent, e.child));

        Self {
            name: name.into(),
            description: None,
            traverse_delay_ms: default_traverse_delay_ms(),
            nodes,
            edges,
        }
    }

    /// Rebuild a graph store from the document.
    ///
    /// Node ids are restored exactly; the store's id counter resumes past the
    /// maximum. Malformed edges recover locally: an edge naming an unknown
    /// node or forming a self-loop is logged and skipped, and a duplicate
    /// edge keeps the first occurrence. Duplicate node ids are a document
    /// error.
    pub fn build_store(&self) -> Result<GraphStore, ConfigError> {
        let mut store = GraphStore::new();

        for spec in &self.nodes {
            let id = NodeId::from_index(spec.id);
            store
                .insert_node_with_id(id, Point::new(spec.x, spec.y), spec.sound.clone().into_payload())
                .map_err(|_| ConfigError::DuplicateNodeId(id))?;
        }

        for spec in &self.edges {
            let parent = NodeId::from_index(spec.parent);
            let child = NodeId::from_index(spec.child);
            match store.create_edge_scaled(parent, child, spec.delay_scale) {
                Ok(ritmo_core::EdgeOutcome::Created(_)) => {}
                Ok(ritmo_core::EdgeOutcome::AlreadyExists(key)) => {
                    tracing::warn!("duplicate edge {key} in '{}', keeping the first", self.name);
                }
                Err(err) => {
                    tracing::warn!("skipping edge {parent}->{child} in '{}': {err}", self.name);
                }
            }
        }

        Ok(store)
    }

    /// Scheduler configuration implied by the document.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            traverse_delay_ms: self.traverse_delay_ms,
            ..SchedulerConfig::default()
        }
    }

    /// Get the number of nodes in the composition.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the composition has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth_node(id: u32, x: f64, freq: f32) -> NodeSpec {
        NodeSpec {
            id,
            x,
            y: 0.0,
            sound: SoundSpec::Synth {
                base_frequency: freq,
            },
        }
    }

    #[test]
    fn composition_builder() {
        let comp = Composition::new("Pulse")
            .with_description("test")
            .with_traverse_delay_ms(250)
            .with_node(synth_node(0, 0.0, 440.0))
            .with_node(synth_node(1, 100.0, 660.0))
            .with_edge(EdgeSpec {
                parent: 0,
                child: 1,
                delay_scale: 2.0,
            });

        assert_eq!(comp.name, "Pulse");
        assert_eq!(comp.traverse_delay_ms, 250);
        assert_eq!(comp.len(), 2);
        assert_eq!(comp.edges.len(), 1);
    }

    #[test]
    fn from_toml_parses_all_sound_kinds() {
        let toml = r#"
name = "Kinds"

[[nodes]]
id = 0
x = 0.0
y = 0.0
[nodes.sound]
type = "synth"
base_frequency = 440.0

[[nodes]]
id = 1
x = 10.0
y = 0.0
[nodes.sound]
type = "sample"
name = "kick"

[[nodes]]
id = 2
x = 20.0
y = 0.0
[nodes.sound]
type = "probabilistic"
chance = 0.25
[nodes.sound.inner]
type = "sample"
name = "hat"
"#;
        let comp = Composition::from_toml(toml).unwrap();
        assert_eq!(comp.len(), 3);
        assert_eq!(comp.traverse_delay_ms, 500, "default applies");
        assert_eq!(
            comp.nodes[2].sound,
            SoundSpec::Probabilistic {
                chance: 0.25,
                inner: Box::new(SoundSpec::Sample {
                    name: "hat".to_string()
                }),
            }
        );
    }

    #[test]
    fn edge_delay_scale_defaults_to_one() {
        let toml = r#"
name = "Default scale"

[[nodes]]
id = 0
x = 0.0
y = 0.0
[nodes.sound]
type = "synth"
base_frequency = 440.0

[[nodes]]
id = 1
x = 1.0
y = 0.0
[nodes.sound]
type = "synth"
base_frequency = 660.0

[[edges]]
parent = 0
child = 1
"#;
        let comp = Composition::from_toml(toml).unwrap();
        assert_eq!(comp.edges[0].delay_scale, 1.0);
    }

    #[test]
    fn build_store_restores_ids_exactly() {
        let comp = Composition::new("Ids")
            .with_node(synth_node(7, 0.0, 440.0))
            .with_node(synth_node(2, 10.0, 660.0))
            .with_edge(EdgeSpec {
                parent: 7,
                child: 2,
                delay_scale: 0.5,
            });

        let mut store = comp.build_store().unwrap();
        assert!(store.node(NodeId::from_index(7)).is_some());
        assert!(store.node(NodeId::from_index(2)).is_some());
        assert_eq!(store.edge_count(), 1);

        // The counter resumes past the max restored id.
        let fresh = store.create_node(Point::default(), NodePayload::synth(110.0));
        assert_eq!(fresh.index(), 8);
    }

    #[test]
    fn build_store_rejects_duplicate_node_ids() {
        let comp = Composition::new("Dup")
            .with_node(synth_node(0, 0.0, 440.0))
            .with_node(synth_node(0, 10.0, 660.0));
        assert!(matches!(
            comp.build_store(),
            Err(ConfigError::DuplicateNodeId(_))
        ));
    }

    #[test]
    fn build_store_skips_malformed_edges() {
        let comp = Composition::new("Bad edges")
            .with_node(synth_node(0, 0.0, 440.0))
            .with_node(synth_node(1, 10.0, 660.0))
            .with_edge(EdgeSpec {
                parent: 0,
                child: 0,
                delay_scale: 1.0,
            })
            .with_edge(EdgeSpec {
                parent: 0,
                child: 9,
                delay_scale: 1.0,
            })
            .with_edge(EdgeSpec {
                parent: 0,
                child: 1,
                delay_scale: 2.0,
            })
            .with_edge(EdgeSpec {
                parent: 0,
                child: 1,
                delay_scale: 0.1,
            });

        let store = comp.build_store().unwrap();
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        // First writer wins on the duplicate.
        let key = store.edges().next().unwrap().key();
        assert_eq!(store.edge(key).unwrap().delay_scale, 2.0);
    }

    #[test]
    fn from_store_sorts_edges_for_stable_output() {
        let mut store = GraphStore::new();
        let a = store.create_node(Point::new(0.0, 0.0), NodePayload::synth(440.0));
        let b = store.create_node(Point::new(1.0, 0.0), NodePayload::synth(550.0));
        let c = store.create_node(Point::new(2.0, 0.0), NodePayload::synth(660.0));
        store.create_edge(b, c).unwrap();
        store.create_edge(a, b).unwrap();
        store.create_edge(b, a).unwrap();

        let comp = Composition::from_store("Sorted", &store);
        let pairs: Vec<(u32, u32)> = comp.edges.iter().map(|e| (e.parent, e.child)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn scheduler_config_carries_the_delay() {
        let comp = Composition::new("Delay").with_traverse_delay_ms(125);
        assert_eq!(comp.scheduler_config().traverse_delay_ms, 125);
    }
}
