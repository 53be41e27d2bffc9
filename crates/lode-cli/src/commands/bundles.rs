use lode_bundle::{list_assets, load_leaf};
use lode_config::ConfigLoader;
use lode_registry::{BundleRegistry, RelevanceGate};

fn discover(config_loader: &ConfigLoader) -> lode_core::Result<BundleRegistry> {
    let dirs = config_loader.bundle_dirs();
    let dir_refs: Vec<&std::path::Path> = dirs.iter().map(|d| d.as_path()).collect();
    let mut registry = BundleRegistry::new(&dir_refs);
    registry.discover()?;
    Ok(registry)
}

pub(super) fn cmd_list(config_loader: &ConfigLoader) -> lode_core::Result<()> {
    let registry = discover(config_loader)?;
    let bundles = registry.list();

    if bundles.is_empty() {
        let dirs = config_loader.bundle_dirs();
        println!("No bundles found in:");
        for d in dirs {
            println!("  {}", d.display());
        }
        println!("  Create one with: lode create <name>");
        return Ok(());
    }

    println!("\x1b[1mAvailable Bundles ({}):\x1b[0m\n", bundles.len());
    for b in bundles {
        let tags = if b.descriptor.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", b.descriptor.tags.join(", "))
        };
        println!(
            "  \x1b[36m{}\x1b[0m v{}{}",
            b.descriptor.name, b.descriptor.version, tags
        );
        println!("    {}", b.descriptor.description);
        println!("    File: {}", b.entry_path.display());
        println!();
    }
    Ok(())
}

pub(super) fn cmd_show(config_loader: &ConfigLoader, name: &str) -> lode_core::Result<()> {
    let registry = discover(config_loader)?;
    let Some(bundle) = registry.get(name) else {
        println!("Bundle '{name}' not found.");
        return Ok(());
    };

    println!(
        "\x1b[1m{}\x1b[0m v{}",
        bundle.descriptor.name, bundle.descriptor.version
    );
    println!("  {}", bundle.descriptor.description);
    if !bundle.descriptor.tags.is_empty() {
        println!("  Tags: {}", bundle.descriptor.tags.join(", "));
    }
    println!("  File: {}", bundle.entry_path.display());

    let body = bundle.load_body()?;
    let leaves: Vec<_> = body.leaf_links().collect();
    if !leaves.is_empty() {
        println!("\n  \x1b[1mReference leaves:\x1b[0m");
        for link in &leaves {
            println!("    {} — {}", link.target, link.label);
        }
    }

    println!("\n  \x1b[1mBody:\x1b[0m");
    for line in body.markdown.lines() {
        println!("    {line}");
    }
    Ok(())
}

pub(super) fn cmd_leaf(
    config_loader: &ConfigLoader,
    name: &str,
    target: &str,
) -> lode_core::Result<()> {
    let registry = discover(config_loader)?;
    let bundle = registry
        .get(name)
        .ok_or_else(|| lode_core::LodeError::BundleNotFound(name.to_string()))?;

    let body = bundle.load_body()?;
    let leaf = load_leaf(bundle, &body, target)?;

    println!(
        "\x1b[1m{}\x1b[0m — {}\n",
        bundle.descriptor.name,
        leaf.target.display()
    );
    println!("{}", leaf.content);
    if !leaf.fan_out.is_empty() {
        println!(
            "\n\x1b[33mWarning:\x1b[0m this leaf fans out to {} further document(s) — run 'lode check'",
            leaf.fan_out.len()
        );
    }
    Ok(())
}

pub(super) fn cmd_assets(config_loader: &ConfigLoader, name: &str) -> lode_core::Result<()> {
    let registry = discover(config_loader)?;
    let bundle = registry
        .get(name)
        .ok_or_else(|| lode_core::LodeError::BundleNotFound(name.to_string()))?;

    let assets = list_assets(bundle)?;
    if assets.is_empty() {
        println!("Bundle '{name}' has no passive assets.");
        return Ok(());
    }

    println!(
        "\x1b[1mPassive assets of '{name}' ({}):\x1b[0m  (copy/adapt only — never auto-loaded)\n",
        assets.len()
    );
    for a in assets {
        println!("  {}  ({} bytes)", a.path.display(), a.size);
    }
    Ok(())
}

pub(super) fn cmd_gate(
    config_loader: &ConfigLoader,
    threshold: f32,
    request: &str,
) -> lode_core::Result<()> {
    let registry = discover(config_loader)?;
    if registry.is_empty() {
        println!("No bundles to gate.");
        return Ok(());
    }

    let gate = RelevanceGate::new(threshold);
    println!(
        "Request: \x1b[3m{request}\x1b[0m  (threshold {:.2})\n",
        gate.threshold()
    );

    for bundle in registry.list() {
        let decision = gate.decide(&bundle.descriptor, request);
        let verdict = if decision.load {
            "\x1b[32mload\x1b[0m"
        } else {
            "\x1b[90mskip\x1b[0m"
        };
        println!(
            "  {verdict}  {}  (score {:.2})",
            bundle.descriptor.name, decision.score
        );
        if !decision.matched.is_empty() {
            println!("        matched: {}", decision.matched.join(", "));
        }
    }
    println!("\nA skipped bundle produces no error — a missed trigger is silent by design.");
    Ok(())
}
