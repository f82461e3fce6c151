use anyhow::Context;
use std::path::Path;
use venue_core::{config::Config, paths};

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing venue in: {}", root.display());

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
    } else {
        Config::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    }

    println!("\nEdit api.base_url and the vip lists, then run 'venue config validate'.");
    Ok(())
}
