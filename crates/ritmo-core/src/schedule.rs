//! Flood-trigger scheduling over a virtual clock.
//!
//! Propagation is a flood: firing a node plays its sound, then enqueues one
//! timed hop per outgoing edge. Instead of timer-callback recursion, hops sit
//! in a priority queue ordered by virtual fire time, and a driver loop pops
//! them with [`TriggerScheduler::step`] / [`TriggerScheduler::run_until`].
//! Tests advance the clock instantly; the CLI maps virtual time to wall clock
//! by sleeping until [`TriggerScheduler::next_fire_at`].
//!
//! Hops hold node ids, never references. Every hop re-resolves its node
//! against the store when it pops, and every outgoing edge is re-checked
//! against the edge map when its hop is scheduled, so graph edits during an
//! in-flight traversal degrade to silently dropped branches rather than
//! firing through deleted topology.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::{EdgeKey, GraphStore, NodeId, NodePayload};

/// Default global traverse delay, in milliseconds.
pub const DEFAULT_TRAVERSE_DELAY_MS: u64 = 500;

/// Boundary to whatever actually makes sound.
///
/// The scheduler dispatches payloads here and asks for durations; synthesis,
/// sample decoding, and device handling all live behind this trait.
/// Implementations must not panic when a resource is unavailable; log and
/// stay silent instead.
pub trait AudioPlayer {
    /// Plays the sound for `node`. Called once per fired hop.
    fn trigger(&mut self, node: NodeId, payload: &NodePayload);

    /// Nominal duration of the payload's sound in milliseconds, used for the
    /// advisory animation window on [`TriggerFire`].
    fn duration_ms(&self, payload: &NodePayload) -> u64;

    /// Silences everything currently sounding. Only invoked on kill when
    /// [`SchedulerConfig::kill_cuts_audio`] is set.
    fn stop_all(&mut self) {}
}

/// Tunables for a [`TriggerScheduler`].
#[derive(Clone, Copy, Debug)]
pub struct SchedulerConfig {
    /// Global scalar multiplied by each edge's `delay_scale` to get the hop
    /// delay. May be changed mid-traversal via
    /// [`TriggerScheduler::set_traverse_delay_ms`].
    pub traverse_delay_ms: u64,
    /// When set, [`TriggerScheduler::kill`] also calls
    /// [`AudioPlayer::stop_all`]. Off, a kill stops propagation but lets
    /// already-sounding audio ring out.
    pub kill_cuts_audio: bool,
    /// Upper bound on queued hops. Hops past the bound are dropped with a
    /// warning. `None` leaves cyclic graphs free-running.
    pub max_pending: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            traverse_delay_ms: DEFAULT_TRAVERSE_DELAY_MS,
            kill_cuts_audio: false,
            max_pending: None,
        }
    }
}

/// One node firing, as observed by presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerFire {
    /// The node that fired.
    pub node: NodeId,
    /// Virtual time of the firing.
    pub at_ms: u64,
    /// Advisory end of the node's animation window
    /// (`at_ms + player.duration_ms(payload)`).
    pub animate_until_ms: u64,
}

/// Outcome of popping one hop with [`TriggerScheduler::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The hop's node fired; its sound played and children were enqueued.
    Fired(TriggerFire),
    /// The hop was dropped: traversal killed, node deleted, or node inactive.
    Skipped(NodeId),
    /// The queue is empty.
    Idle,
}

/// A queued visit to a node at a virtual time.
///
/// Ordered by `(fire_at, seq)`; `seq` breaks ties so simultaneous hops pop in
/// scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Hop {
    fire_at: u64,
    seq: u64,
    node: NodeId,
}

/// Drives flood traversal of a [`GraphStore`].
///
/// Owns the hop queue, the virtual clock, and the kill flag — all traversal
/// state lives here, none of it in the graph. One scheduler drives one store;
/// both are handed to every call so the scheduler never holds a borrow across
/// steps and edits can interleave freely.
#[derive(Debug)]
pub struct TriggerScheduler {
    queue: BinaryHeap<Reverse<Hop>>,
    now_ms: u64,
    seq: u64,
    killed: bool,
    config: SchedulerConfig,
}

impl Default for TriggerScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl TriggerScheduler {
    /// Creates an idle scheduler at virtual time zero.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            queue: BinaryHeap::new(),
            now_ms: 0,
            seq: 0,
            killed: false,
            config,
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of hops waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True when no hops are queued.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Virtual time of the earliest queued hop, if any.
    pub fn next_fire_at(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(hop)| hop.fire_at)
    }

    /// Whether the traversal has been killed and not yet re-armed.
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// The global traverse delay currently in effect.
    pub fn traverse_delay_ms(&self) -> u64 {
        self.config.traverse_delay_ms
    }

    /// Changes the global traverse delay.
    ///
    /// Takes effect for hops scheduled from now on; hops already queued keep
    /// the fire times they were given.
    pub fn set_traverse_delay_ms(&mut self, ms: u64) {
        self.config.traverse_delay_ms = ms;
    }

    /// Stops the traversal: queued hops are skipped as they pop, and nothing
    /// new is enqueued until the next [`trigger_selected`](Self::trigger_selected).
    ///
    /// A node that already fired is never taken back; with
    /// [`SchedulerConfig::kill_cuts_audio`] set the player is additionally
    /// asked to silence in-flight audio.
    pub fn kill(&mut self, player: &mut impl AudioPlayer) {
        self.killed = true;
        tracing::debug!("traversal killed, {} hops will be dropped", self.queue.len());
        if self.config.kill_cuts_audio {
            player.stop_all();
        }
    }

    /// Starts a flood from every selected node.
    ///
    /// Re-arms first: every node becomes active and the kill flag clears, so
    /// a fresh trigger always propagates regardless of what an earlier kill
    /// or gating left behind. Selected nodes then fire immediately at the
    /// current virtual time, in insertion order.
    pub fn trigger_selected(
        &mut self,
        store: &mut GraphStore,
        player: &mut impl AudioPlayer,
    ) -> Vec<TriggerFire> {
        store.set_all_active(true);
        self.killed = false;

        let starts = store.selected_nodes();
        tracing::debug!("trigger_selected: {} start node(s)", starts.len());

        starts
            .into_iter()
            .filter_map(|id| self.fire_node(store, player, id))
            .collect()
    }

    /// Pops the earliest hop, advances the virtual clock to it, and fires or
    /// skips its node. Returns [`StepResult::Idle`] on an empty queue.
    pub fn step(&mut self, store: &GraphStore, player: &mut impl AudioPlayer) -> StepResult {
        let Some(Reverse(hop)) = self.queue.pop() else {
            return StepResult::Idle;
        };
        self.now_ms = self.now_ms.max(hop.fire_at);
        match self.fire_node(store, player, hop.node) {
            Some(fire) => StepResult::Fired(fire),
            None => StepResult::Skipped(hop.node),
        }
    }

    /// Drains every hop due by `deadline_ms`, leaving the clock at the
    /// deadline. Returns the fires in order; skipped hops are omitted.
    pub fn run_until(
        &mut self,
        store: &GraphStore,
        player: &mut impl AudioPlayer,
        deadline_ms: u64,
    ) -> Vec<TriggerFire> {
        let mut fires = Vec::new();
        while self.next_fire_at().is_some_and(|at| at <= deadline_ms) {
            if let StepResult::Fired(fire) = self.step(store, player) {
                fires.push(fire);
            }
        }
        self.now_ms = self.now_ms.max(deadline_ms);
        fires
    }

    /// Fires one node: plays its sound and enqueues hops to its children.
    ///
    /// Returns `None` without side effects when the traversal is killed, the
    /// node no longer exists, or the node is inactive. Each child hop is
    /// enqueued only if the forward edge is still present in the store at
    /// this moment; its delay is the edge's scale times the current global
    /// traverse delay.
    fn fire_node(
        &mut self,
        store: &GraphStore,
        player: &mut impl AudioPlayer,
        id: NodeId,
    ) -> Option<TriggerFire> {
        if self.killed {
            return None;
        }
        let node = store.node(id)?;
        if !node.active {
            tracing::trace!("node {id} inactive, flood halted");
            return None;
        }

        player.trigger(id, &node.payload);
        let fire = TriggerFire {
            node: id,
            at_ms: self.now_ms,
            animate_until_ms: self.now_ms + player.duration_ms(&node.payload),
        };
        tracing::trace!("node {id} fired at {}ms", fire.at_ms);

        // Snapshot, then re-check each edge against the map: a child in the
        // adjacency cache whose edge has been deleted gets no hop.
        let children: Vec<NodeId> = node.children().to_vec();
        for child in children {
            let Some(key) = EdgeKey::between(id, child) else {
                continue;
            };
            let Some(edge) = store.edge(key) else {
                tracing::trace!("edge {key} gone, hop dropped");
                continue;
            };
            let delay = (edge.delay_scale * self.config.traverse_delay_ms as f64)
                .max(0.0)
                .round() as u64;
            self.enqueue(child, self.now_ms + delay);
        }

        Some(fire)
    }

    fn enqueue(&mut self, node: NodeId, fire_at: u64) {
        if let Some(max) = self.config.max_pending {
            if self.queue.len() >= max {
                tracing::warn!("hop queue at bound {max}, dropping hop to node {node}");
                return;
            }
        }
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Reverse(Hop { fire_at, seq, node }));
    }
}
