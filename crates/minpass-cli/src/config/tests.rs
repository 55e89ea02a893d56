#[cfg(test)]
mod tests {
    use crate::config::loading::env_key_to_field;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use minpass_pipeline::{ConcurrencyMode, EcmaVersion, FailurePolicy, MinifyPreset};
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_config(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, json).unwrap();
        path
    }

    fn in_dir(dir: &Path) -> CliOverrides {
        CliOverrides {
            cwd: Some(dir.to_path_buf()),
            ..CliOverrides::default()
        }
    }

    #[test]
    fn test_serialization() {
        let json_val = serde_json::to_value(MinpassConfig::default_config()).unwrap();

        // camelCase field names
        assert!(json_val.get("outDir").is_some());
        assert!(json_val.get("emptyOutDir").is_some());
        assert!(json_val.get("chunkSizeWarningLimit").is_some());
        assert!(json_val.get("out_dir").is_none());

        // lowercase enums
        assert_eq!(json_val["preset"], "current");
        assert_eq!(json_val["failurePolicy"], "abort");
        assert_eq!(json_val["format"], "esm");

        // skip_serializing_if
        assert!(json_val.get("cwd").is_none());
        assert!(json_val.get("nameCacheFile").is_none());
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let parsed: MinpassConfig = serde_json::from_str(r#"{ "entry": ["app.js"] }"#).unwrap();
        assert_eq!(parsed.out_dir, PathBuf::from("dist"));
        assert!(parsed.empty_out_dir);
        assert_eq!(parsed.chunk_size_warning_limit, 20_000);
        assert_eq!(parsed.concurrency, 1);
    }

    #[test]
    fn test_validation() {
        assert!(MinpassConfig::default_config().validate().is_ok());

        let err = MinpassConfig {
            entry: vec![],
            ..MinpassConfig::default_config()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::MissingField { .. })
        ));

        assert!(
            MinpassConfig {
                concurrency: 0,
                ..MinpassConfig::default_config()
            }
            .validate()
            .is_err()
        );

        let err = MinpassConfig {
            mangle_regex: Some("([unclosed".to_string()),
            ..MinpassConfig::default_config()
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("mangleRegex"));
    }

    #[test]
    fn test_minify_options_from_preset() {
        let legacy = MinpassConfig {
            preset: MinifyPreset::Legacy,
            ..MinpassConfig::default_config()
        }
        .minify_options();
        assert_eq!(legacy.ecma, EcmaVersion::Es2015);
        assert!(!legacy.properties.unwrap().keep_quoted);

        let current = MinpassConfig::default_config().minify_options();
        assert_eq!(current.ecma, EcmaVersion::Es2020);
        assert!(current.properties.unwrap().keep_quoted);
    }

    #[test]
    fn test_minify_options_overrides() {
        let options = MinpassConfig {
            reserved: Some(vec!["keepMe".to_string()]),
            mangle_regex: Some("^_".to_string()),
            keep_quoted: Some(false),
            ..MinpassConfig::default_config()
        }
        .minify_options();

        let props = options.properties.unwrap();
        assert_eq!(props.reserved, vec!["keepMe"]);
        assert_eq!(props.regex, "^_");
        assert!(!props.keep_quoted);
    }

    #[test]
    fn test_bundle_config_and_concurrency() {
        let config = MinpassConfig {
            entry: vec!["src/a.js".to_string(), "src/b.js".to_string()],
            out_dir: PathBuf::from("build"),
            concurrency: 3,
            ..MinpassConfig::default_config()
        };
        let root = Path::new("/project");

        let bundle = config.bundle_config(root);
        assert_eq!(bundle.entries, vec!["src/a.js", "src/b.js"]);
        assert_eq!(bundle.cwd.as_deref(), Some(root));
        assert_eq!(bundle.resolved_out_dir().unwrap(), PathBuf::from("/project/build"));
        assert_eq!(config.concurrency_mode(), ConcurrencyMode::Ordered { limit: 3 });
        assert_eq!(config.name_cache_path(root), None);
    }

    #[test]
    fn test_env_key_to_field() {
        assert_eq!(env_key_to_field("OUT_DIR"), "outDir");
        assert_eq!(env_key_to_field("NAME_CACHE_FILE"), "nameCacheFile");
        assert_eq!(env_key_to_field("concurrency"), "concurrency");
        assert_eq!(env_key_to_field("_PRESET"), "preset");
    }

    #[test]
    #[serial]
    fn test_load_file_then_cli() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"{ "entry": ["src/app.js"], "outDir": "public", "concurrency": 2 }"#,
        );

        let config = MinpassConfig::load(&in_dir(temp.path()), None).unwrap();
        assert_eq!(config.entry, vec!["src/app.js"]);
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.concurrency, 2);

        let overrides = CliOverrides {
            out_dir: Some(PathBuf::from("cli-out")),
            failure_policy: Some(FailurePolicy::Continue),
            ..in_dir(temp.path())
        };
        let config = MinpassConfig::load(&overrides, None).unwrap();
        assert_eq!(config.entry, vec!["src/app.js"]);
        assert_eq!(config.out_dir, PathBuf::from("cli-out"));
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), r#"{ "outDir": "public", "preset": "current" }"#);

        unsafe {
            std::env::set_var("MINPASS_OUT_DIR", "from-env");
            std::env::set_var("MINPASS_PRESET", "legacy");
        }
        let result = MinpassConfig::load(&in_dir(temp.path()), None);
        unsafe {
            std::env::remove_var("MINPASS_OUT_DIR");
            std::env::remove_var("MINPASS_PRESET");
        }

        let config = result.unwrap();
        assert_eq!(config.out_dir, PathBuf::from("from-env"));
        assert_eq!(config.preset, MinifyPreset::Legacy);
    }

    #[test]
    #[serial]
    fn test_unknown_field_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), r#"{ "outdir": "typo" }"#);

        let err = MinpassConfig::load(&CliOverrides::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.json");

        let err = MinpassConfig::load(&CliOverrides::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }
}
