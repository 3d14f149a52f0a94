//! Console audio player: prints what would sound instead of synthesizing.

use ritmo_core::{AudioPlayer, NodeId, NodePayload};

/// Nominal synth tone length.
const SYNTH_DURATION_MS: u64 = 300;
/// Nominal sample clip length.
const SAMPLE_DURATION_MS: u64 = 500;

/// [`AudioPlayer`] that narrates triggers to stdout.
///
/// Probabilistic payloads are resolved with a small xorshift generator so
/// runs differ without pulling in an RNG dependency.
pub struct ConsolePlayer {
    rng_state: u64,
}

impl ConsolePlayer {
    /// Creates a player seeded from the current time.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0x9e37_79b9, |d| d.as_nanos() as u64);
        Self::with_seed(seed)
    }

    /// Creates a player with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_state: seed.max(1),
        }
    }

    /// xorshift64: fast, stateful, plenty for chance rolls.
    fn next_f64(&mut self) -> f64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }

    fn describe(payload: &NodePayload) -> String {
        match payload {
            NodePayload::Synth { base_frequency } => format!("synth {base_frequency} Hz"),
            NodePayload::Sample { name } => format!("sample '{name}'"),
            NodePayload::Probabilistic { chance, inner } => {
                format!("{} ({:.0}% chance)", Self::describe(inner), chance * 100.0)
            }
        }
    }
}

impl Default for ConsolePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for ConsolePlayer {
    fn trigger(&mut self, node: NodeId, payload: &NodePayload) {
        match payload {
            NodePayload::Probabilistic { chance, inner } => {
                if self.next_f64() < *chance {
                    self.trigger(node, inner);
                } else {
                    println!("  node {node}: {} -- skipped this roll", Self::describe(payload));
                }
            }
            other => println!("  node {node}: {}", Self::describe(other)),
        }
    }

    fn duration_ms(&self, payload: &NodePayload) -> u64 {
        match payload {
            NodePayload::Synth { .. } => SYNTH_DURATION_MS,
            NodePayload::Sample { .. } => SAMPLE_DURATION_MS,
            NodePayload::Probabilistic { inner, .. } => self.duration_ms(inner),
        }
    }
}
