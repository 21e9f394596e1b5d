//! The `factory` command: browse the bundled patches.

use anyhow::anyhow;
use clap::Args;
use senal_config::{FACTORY_PATCH_NAMES, get_factory_patch};

#[derive(Args)]
pub struct FactoryArgs {
    /// Print this factory patch as TOML
    #[arg(value_name = "NAME")]
    name: Option<String>,
}

pub fn run(args: FactoryArgs) -> anyhow::Result<()> {
    if let Some(name) = &args.name {
        let patch =
            get_factory_patch(name).ok_or_else(|| anyhow!("Unknown factory patch: {}", name))?;
        print!("{}", patch.to_toml()?);
        return Ok(());
    }

    println!("Factory Patches:");
    println!("================");
    for id in FACTORY_PATCH_NAMES {
        if let Some(patch) = get_factory_patch(id) {
            let desc = patch.description.as_deref().unwrap_or("");
            println!("  {:12} {:16} - {}", id, patch.name, desc);
        }
    }
    println!();
    println!("  Run one with: senal run --factory <name>");

    Ok(())
}
