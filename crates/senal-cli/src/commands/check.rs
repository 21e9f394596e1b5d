//! The `check` command: validate a patch and print its wiring.

use super::common::PatchSource;
use clap::Args;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    source: PatchSource,
}

pub fn run(args: CheckArgs) -> anyhow::Result<()> {
    let patch = args.source.load()?;
    let built = patch.build_graph()?;

    println!("{}", patch.name);
    println!("{}", "=".repeat(patch.name.len()));
    if let Some(desc) = &patch.description {
        println!("{desc}");
    }
    println!();
    println!(
        "Run: {} Hz for {} s, fan-in {:?}",
        patch.run.sample_rate, patch.run.duration, patch.run.fan_in
    );
    println!();

    println!("Blocks ({}):", built.graph.block_count());
    for block in &patch.blocks {
        let id = built.names[&block.name];
        println!("  {:12}  {:14}  {}", block.name, block.params.kind().id(), id);
    }
    println!();

    println!("Connections ({}):", built.graph.connection_count());
    for conn in &patch.connections {
        println!("  {} -> {}", conn.from, conn.to);
    }
    println!();
    println!("OK");

    Ok(())
}
