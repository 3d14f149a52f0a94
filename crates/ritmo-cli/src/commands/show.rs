//! Composition inspection command.

use std::path::PathBuf;

use clap::Args;
use ritmo_config::Composition;
use ritmo_core::NodeId;

#[derive(Args)]
pub struct ShowArgs {
    /// Composition file to inspect
    file: PathBuf,
}

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    let comp = Composition::load(&args.file)?;
    let store = comp.build_store()?;

    println!("Composition: {}", comp.name);
    if let Some(desc) = &comp.description {
        println!("  {desc}");
    }
    println!("Traverse delay: {} ms", comp.traverse_delay_ms);

    println!("\nNodes ({}):", store.node_count());
    for node in store.nodes() {
        println!(
            "  {:>4}  ({:>7.1}, {:>7.1})  {:?}",
            node.id().to_string(),
            node.position.x,
            node.position.y,
            node.payload,
        );
    }

    println!("\nEdges ({}):", store.edge_count());
    let mut edges: Vec<_> = store.edges().collect();
    edges.sort_by_key(|e| (e.parent(), e.child()));
    for edge in edges {
        let effective = (edge.delay_scale * comp.traverse_delay_ms as f64).round();
        println!(
            "  {}  scale {:.2}  fires after {} ms",
            edge.key(),
            edge.delay_scale,
            effective,
        );
    }

    let starts = start_candidates(&store);
    if !starts.is_empty() {
        let list: Vec<String> = starts.iter().map(ToString::to_string).collect();
        println!("\nDefault start nodes: {}", list.join(", "));
    }

    Ok(())
}

/// Nodes with no incoming edge; where `play` floods from by default.
pub fn start_candidates(store: &ritmo_core::GraphStore) -> Vec<NodeId> {
    store
        .nodes()
        .map(ritmo_core::Node::id)
        .filter(|&id| !store.edges().any(|e| e.child() == id))
        .collect()
}
