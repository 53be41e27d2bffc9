use lode_config::ConfigLoader;
use lode_lint::lint_dirs;

pub(super) fn cmd_check(config_loader: &ConfigLoader, json: bool) -> lode_core::Result<()> {
    let dirs = config_loader.bundle_dirs();
    let report = lint_dirs(&dirs)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report)
                .map_err(|e| lode_core::LodeError::Config(e.to_string()))?
        );
        return report.into_result().map(|_| ());
    }

    if report.bundles == 0 {
        println!("No bundles found in:");
        for d in dirs {
            println!("  {}", d.display());
        }
        return Ok(());
    }

    if report.issues.is_empty() {
        println!(
            "✅ {} bundle(s) checked, no findings",
            report.bundles
        );
        return Ok(());
    }

    for issue in &report.issues {
        println!("{issue}");
    }
    println!(
        "\n{} bundle(s) checked: {} error(s), {} warning(s)",
        report.bundles,
        report.error_count(),
        report.warning_count()
    );

    report.into_result().map(|_| ())
}
