use std::path::Path;

use anyhow::{Context, bail};
use haul_core::HaulConfig;

pub fn init(path: &Path) -> anyhow::Result<()> {
    let output = path.join("haul.toml");
    if output.exists() {
        bail!("{} already exists, not overwriting", output.display());
    }

    let config = HaulConfig::scaffold().to_toml_string()?;
    std::fs::write(&output, config)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("✓ Generated {}", output.display());

    Ok(())
}
