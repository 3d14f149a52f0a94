//! Wall-clock playback command.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use ritmo_config::Composition;
use ritmo_core::{NodeId, StepResult, TriggerScheduler};

use crate::commands::show::start_candidates;
use crate::player::ConsolePlayer;

/// Sleep granularity while waiting for the next hop; short so Ctrl-C stays
/// responsive.
const TICK: Duration = Duration::from_millis(25);

#[derive(Args)]
pub struct PlayArgs {
    /// Composition file to play
    file: PathBuf,

    /// Start node id (repeatable). Defaults to every node without an
    /// incoming edge, or node order's first node when the graph is all cycle
    #[arg(long)]
    start: Vec<u32>,

    /// Stop after this much virtual time, in milliseconds
    #[arg(long)]
    for_ms: Option<u64>,

    /// Stop after this many fired hops
    #[arg(long)]
    max_hops: Option<u64>,

    /// Seed for probabilistic sounds (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let comp = Composition::load(&args.file)?;
    let mut store = comp.build_store()?;
    if store.node_count() == 0 {
        anyhow::bail!("'{}' has no nodes", comp.name);
    }

    let starts = resolve_starts(&store, &args.start)?;
    store.clear_selections();
    for &id in &starts {
        if let Some(node) = store.node_mut(id) {
            node.select();
        }
    }

    let mut player = args.seed.map_or_else(ConsolePlayer::new, ConsolePlayer::with_seed);
    let mut sched = TriggerScheduler::new(comp.scheduler_config());

    let stop = Arc::new(AtomicBool::new(false));
    let stop_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || stop_handler.store(true, Ordering::SeqCst))?;

    let list: Vec<String> = starts.iter().map(ToString::to_string).collect();
    println!(
        "Playing '{}' from node(s) {} (Ctrl+C to stop)",
        comp.name,
        list.join(", ")
    );

    let mut hops = sched.trigger_selected(&mut store, &mut player).len() as u64;
    let started = Instant::now();

    loop {
        if stop.load(Ordering::SeqCst) {
            sched.kill(&mut player);
            println!("\nTraversal killed.");
            break;
        }
        if args.max_hops.is_some_and(|max| hops >= max) {
            println!("\nReached {hops} hops.");
            break;
        }
        let Some(at) = sched.next_fire_at() else {
            println!("\nTraversal drained.");
            break;
        };
        if args.for_ms.is_some_and(|limit| at > limit) {
            println!("\nReached the time limit.");
            break;
        }

        // Map virtual time onto the wall clock in short ticks.
        let due = Duration::from_millis(at);
        let elapsed = started.elapsed();
        if due > elapsed {
            std::thread::sleep((due - elapsed).min(TICK));
            continue;
        }

        if let StepResult::Fired(_) = sched.step(&store, &mut player) {
            hops += 1;
        }
    }

    println!("{hops} hop(s) fired over {} ms.", sched.now_ms());
    Ok(())
}

/// Explicit `--start` ids when given, otherwise every node without an
/// incoming edge, otherwise the first node (pure-cycle graphs).
fn resolve_starts(
    store: &ritmo_core::GraphStore,
    requested: &[u32],
) -> anyhow::Result<Vec<NodeId>> {
    if !requested.is_empty() {
        let mut starts = Vec::with_capacity(requested.len());
        for &raw in requested {
            let id = NodeId::from_index(raw);
            if store.node(id).is_none() {
                anyhow::bail!("start node {raw} does not exist");
            }
            starts.push(id);
        }
        return Ok(starts);
    }

    let candidates = start_candidates(store);
    if !candidates.is_empty() {
        return Ok(candidates);
    }
    Ok(store.nodes().take(1).map(ritmo_core::Node::id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ritmo_core::{GraphStore, NodePayload, Point};

    #[test]
    fn explicit_starts_must_exist() {
        let mut store = GraphStore::new();
        store.create_node(Point::default(), NodePayload::synth(440.0));
        assert!(resolve_starts(&store, &[5]).is_err());
        assert_eq!(
            resolve_starts(&store, &[0]).unwrap(),
            vec![NodeId::from_index(0)]
        );
    }

    #[test]
    fn cycle_falls_back_to_first_node() {
        let mut store = GraphStore::new();
        let a = store.create_node(Point::default(), NodePayload::synth(440.0));
        let b = store.create_node(Point::default(), NodePayload::synth(550.0));
        store.create_edge(a, b).unwrap();
        store.create_edge(b, a).unwrap();
        assert_eq!(resolve_starts(&store, &[]).unwrap(), vec![a]);
    }
}
