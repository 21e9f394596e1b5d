//! The `blocks` command: list what can be placed in a patch.

#![allow(clippy::print_literal)]

use anyhow::anyhow;
use clap::Args;
use senal_core::{BlockKind, BlockParams};

#[derive(Args)]
pub struct BlocksArgs {
    /// Show a single block type
    #[arg(value_name = "TYPE")]
    kind: Option<String>,
}

pub fn run(args: BlocksArgs) -> anyhow::Result<()> {
    let kinds: Vec<BlockKind> = match &args.kind {
        Some(name) => vec![
            BlockKind::from_id(name).ok_or_else(|| anyhow!("Unknown block type: {}", name))?,
        ],
        None => BlockKind::ALL.to_vec(),
    };

    println!("Available Blocks");
    println!("================");
    println!();
    println!(
        "  {:14}  {:9}  {:>6}  {:>5}  {:>7}  {}",
        "Type", "Label", "Inputs", "Clock", "Outputs", "Defaults"
    );
    println!(
        "  {:14}  {:9}  {:>6}  {:>5}  {:>7}  {}",
        "----", "-----", "------", "-----", "-------", "--------"
    );
    for kind in kinds {
        let layout = kind.port_layout();
        let defaults = serde_json::to_string(&BlockParams::default_for(kind))?;
        println!(
            "  {:14}  {:9}  {:>6}  {:>5}  {:>7}  {}",
            kind.id(),
            kind.label(),
            layout.inputs,
            layout.clock_inputs,
            layout.outputs,
            defaults
        );
    }

    Ok(())
}
