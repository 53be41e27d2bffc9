use std::path::PathBuf;

use lode_bundle::{ASSETS_DIR, ENTRY_FILE, REFERENCES_DIR};
use lode_config::ConfigLoader;

pub(super) fn cmd_create(config_loader: &ConfigLoader, name: &str) -> lode_core::Result<()> {
    let dirs = config_loader.bundle_dirs();
    let base = dirs
        .first()
        .ok_or_else(|| lode_core::LodeError::Config("no bundle directories configured".into()))?;

    let bundle_dir = base.join(name);
    if bundle_dir.exists() {
        return Err(lode_core::LodeError::Bundle(format!(
            "Bundle '{}' already exists at {}",
            name,
            bundle_dir.display()
        )));
    }

    std::fs::create_dir_all(bundle_dir.join(REFERENCES_DIR))?;
    std::fs::create_dir_all(bundle_dir.join(ASSETS_DIR))?;

    let entry_path = bundle_dir.join(ENTRY_FILE);
    let template = format!(
        r#"---
name: {name}
description: Describe when a consumer should load this bundle
version: 1.0.0
tags: []
---

# {name}

## When to use this bundle

Describe the requests this bundle applies to. The description above is the
only text consumers see before deciding to load this body.

## Instructions

1. Keep the core workflow here, in the body.
2. Link each deep-dive topic once: [example topic](references/example-topic.md)
3. Put copy/adapt templates under assets/ and mention them in prose only.
"#
    );
    std::fs::write(&entry_path, template)?;

    let leaf_path = bundle_dir.join(REFERENCES_DIR).join("example-topic.md");
    std::fs::write(
        &leaf_path,
        "# Example topic\n\nDetail loaded only when this sub-topic is relevant.\nLeaves link nowhere further.\n",
    )?;

    println!("✅ Created bundle at {}", bundle_dir.display());
    println!("   Edit {} and run 'lode check' to validate.", entry_path.display());
    Ok(())
}

pub(super) fn cmd_init(local: bool) -> lode_core::Result<()> {
    let target_dir = if local {
        PathBuf::from(".")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lode")
    };
    std::fs::create_dir_all(&target_dir)?;

    let config_path = target_dir.join("lode.toml");
    if config_path.exists() {
        return Err(lode_core::LodeError::Config(format!(
            "config already exists at {}",
            config_path.display()
        )));
    }

    let starter = r#"# Lode configuration

[bundles]
# Precedence order: first directory wins on duplicate names
dirs = ["bundles"]

[gate]
# Fraction of request words that must match a descriptor (0.0-1.0)
threshold = 0.2

[logging]
level = "info"
format = "pretty"
"#;
    std::fs::write(&config_path, starter)?;
    println!("✅ Wrote {}", config_path.display());
    Ok(())
}
