//! Starter composition command.

use std::path::PathBuf;

use clap::Args;
use ritmo_config::{Composition, EdgeSpec, NodeSpec, SoundSpec};

#[derive(Args)]
pub struct InitArgs {
    /// Path of the composition file to create
    file: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    force: bool,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    if args.file.exists() && !args.force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            args.file.display()
        );
    }

    starter().save(&args.file)?;
    println!("Wrote starter composition to {}", args.file.display());
    Ok(())
}

/// A small playable graph: a synth chain feeding a looping sample pair.
fn starter() -> Composition {
    Composition::new("Starter")
        .with_description("Edit freely; `ritmo play` floods from node 0")
        .with_node(NodeSpec {
            id: 0,
            x: 0.0,
            y: 0.0,
            sound: SoundSpec::Synth {
                base_frequency: 261.6,
            },
        })
        .with_node(NodeSpec {
            id: 1,
            x: 150.0,
            y: 0.0,
            sound: SoundSpec::Synth {
                base_frequency: 392.0,
            },
        })
        .with_node(NodeSpec {
            id: 2,
            x: 300.0,
            y: 60.0,
            sound: SoundSpec::Sample {
                name: "kick".to_string(),
            },
        })
        .with_node(NodeSpec {
            id: 3,
            x: 300.0,
            y: -60.0,
            sound: SoundSpec::Probabilistic {
                chance: 0.5,
                inner: Box::new(SoundSpec::Sample {
                    name: "hat".to_string(),
                }),
            },
        })
        .with_edge(EdgeSpec {
            parent: 0,
            child: 1,
            delay_scale: 1.0,
        })
        .with_edge(EdgeSpec {
            parent: 1,
            child: 2,
            delay_scale: 0.5,
        })
        .with_edge(EdgeSpec {
            parent: 1,
            child: 3,
            delay_scale: 0.5,
        })
        .with_edge(EdgeSpec {
            parent: 2,
            child: 3,
            delay_scale: 1.0,
        })
}
