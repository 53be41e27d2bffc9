#[cfg(test)]
mod tests {
    use lode_config::schema::*;
    use lode_config::ConfigLoader;
    use std::path::PathBuf;

    // ── Default tests ──────────────────────────────────────────

    #[test]
    fn test_lode_config_defaults() {
        let config = LodeConfig::default();
        assert_eq!(config.bundles.dirs, vec![PathBuf::from("bundles")]);
        assert_eq!(config.gate.threshold, lode_registry::DEFAULT_THRESHOLD);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    // ── TOML roundtrip tests ───────────────────────────────────

    #[test]
    fn test_config_toml_roundtrip() {
        let config = LodeConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: LodeConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(restored.bundles.dirs, config.bundles.dirs);
        assert_eq!(restored.gate.threshold, config.gate.threshold);
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let toml_str = r#"
[gate]
threshold = 0.4
"#;
        let config: LodeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gate.threshold, 0.4);
        // Defaults should fill in
        assert_eq!(config.bundles.dirs, vec![PathBuf::from("bundles")]);
        assert_eq!(config.logging.level, "info");
    }

    // ── Validation tests ───────────────────────────────────────

    #[test]
    fn test_empty_dirs_is_error() {
        let config = LodeConfig {
            bundles: BundlesConfig { dirs: vec![] },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_threshold_is_error() {
        let config = LodeConfig {
            gate: GateConfig { threshold: 1.5 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strict_threshold_warns() {
        let config = LodeConfig {
            gate: GateConfig { threshold: 0.9 },
            ..Default::default()
        };
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, WarningSeverity::Warning);
    }

    #[test]
    fn test_unknown_log_level_warns() {
        let mut config = LodeConfig::default();
        config.logging.level = "loud".into();
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.field == "logging.level"));
    }

    // ── ConfigLoader tests ─────────────────────────────────────

    #[test]
    fn test_config_loader_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("lode.toml");
        std::fs::write(
            &config_path,
            r#"
[bundles]
dirs = ["skills", "/opt/lode/bundles"]

[gate]
threshold = 0.3

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let loader = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        let config = loader.get();
        assert_eq!(config.gate.threshold, 0.3);
        assert_eq!(config.logging.level, "debug");

        // Relative dirs resolve against the config file's directory
        let dirs = loader.bundle_dirs();
        assert_eq!(dirs[0], dir.path().join("skills"));
        assert_eq!(dirs[1], PathBuf::from("/opt/lode/bundles"));
    }

    #[test]
    fn test_config_loader_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loader.get().logging.level, "info");
    }

    #[test]
    fn test_config_loader_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("lode.toml");
        std::fs::write(&config_path, "[gate]\nthreshold = 9.0\n").unwrap();
        assert!(ConfigLoader::load(Some(config_path.as_path())).is_err());
    }

    // ── JSON roundtrip ─────────────────────────────────────────

    #[test]
    fn test_config_json_roundtrip() {
        let config = LodeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: LodeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.logging.level, config.logging.level);
    }
}
