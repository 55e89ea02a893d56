//! Build-then-minify pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{BundleConfig, ConcurrencyMode, FailurePolicy, MinifyOptions};
use crate::driver::{Driver, DriverSummary};
use crate::mangle::{NameCache, SharedNameCache};
use crate::minify::OxcMinifier;
use crate::orchestrator::{Bundler, Orchestrator};
use crate::report::ProgressSink;
use crate::rolldown_bundler::RolldownBundler;
use crate::size::BrotliEstimator;
use crate::Result;

/// Runs the bundler once, then the driver over the emitted scripts.
///
/// The driver is never invoked when the bundler fails, so a failed build
/// leaves the output directory exactly as the bundler left it.
pub struct Pipeline<B = RolldownBundler> {
    orchestrator: Orchestrator<B>,
    driver: Driver,
    name_cache: Option<(SharedNameCache, PathBuf)>,
}

impl Pipeline<RolldownBundler> {
    /// Rolldown build, oxc minifier and brotli estimates with a fresh name
    /// cache.
    pub fn with_defaults(bundle: BundleConfig, options: MinifyOptions) -> Result<Self> {
        Self::with_name_cache(bundle, options, SharedNameCache::new())
    }

    /// Like [`Pipeline::with_defaults`], sharing `name_cache` with the
    /// minifier.
    pub fn with_name_cache(
        bundle: BundleConfig,
        options: MinifyOptions,
        name_cache: SharedNameCache,
    ) -> Result<Self> {
        bundle.validate()?;
        let out_dir = bundle.resolved_out_dir()?;

        let mut minifier = OxcMinifier::with_name_cache(options, name_cache)?;
        if !bundle.format.is_module() {
            minifier = minifier.script_source();
        }

        let driver = Driver::new(
            out_dir,
            Arc::new(minifier),
            Arc::new(BrotliEstimator::default()),
        );
        Ok(Self::new(RolldownBundler::new(bundle), driver))
    }
}

impl<B: Bundler> Pipeline<B> {
    pub fn new(bundler: B, driver: Driver) -> Self {
        Self {
            orchestrator: Orchestrator::new(bundler),
            driver,
            name_cache: None,
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.driver = self.driver.with_failure_policy(policy);
        self
    }

    pub fn with_concurrency(mut self, concurrency: ConcurrencyMode) -> Self {
        self.driver = self.driver.with_concurrency(concurrency);
        self
    }

    /// Write `cache` to `path` after every minification pass.
    pub fn persist_name_cache(mut self, cache: SharedNameCache, path: impl Into<PathBuf>) -> Self {
        self.name_cache = Some((cache, path.into()));
        self
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Build, then minify every emitted `.js` artifact.
    pub async fn run(&self, sink: &mut dyn ProgressSink) -> Result<DriverSummary> {
        let scripts = self.orchestrator.run().await?;
        let file_names: Vec<String> = scripts.into_iter().map(|a| a.file_name).collect();
        self.minify(&file_names, sink).await
    }

    /// Minify artifacts that already exist in the output directory.
    pub async fn minify(
        &self,
        file_names: &[String],
        sink: &mut dyn ProgressSink,
    ) -> Result<DriverSummary> {
        let result = self.driver.process(file_names, sink).await;

        // Artifacts already rewritten use the cached names, so the cache is
        // saved even when the pass stopped early.
        if let Some((cache, path)) = &self.name_cache {
            if let Err(e) = cache.snapshot().save(path) {
                if result.is_ok() {
                    return Err(e);
                }
                tracing::warn!(path = %path.display(), error = %e, "Failed to save name cache");
            } else {
                tracing::debug!(path = %path.display(), "Saved name cache");
            }
        }

        result
    }
}

/// Load a persisted name cache, or start empty when `path` does not exist.
pub fn load_name_cache(path: &Path) -> Result<SharedNameCache> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No name cache found, starting empty");
        return Ok(SharedNameCache::new());
    }
    let cache = NameCache::load(path)?;
    tracing::debug!(path = %path.display(), entries = cache.len(), "Loaded name cache");
    Ok(SharedNameCache::from_cache(cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MinifyPreset;
    use crate::minify::Minify;
    use crate::orchestrator::OutputArtifact;
    use crate::size::SizeEstimator;
    use crate::Error;
    use async_trait::async_trait;
    use std::fs;
    use tempfile::TempDir;

    /// Writes fixed files into the output directory.
    struct StaticBundler {
        out_dir: PathBuf,
        files: Vec<(&'static str, &'static str)>,
    }

    #[async_trait]
    impl Bundler for StaticBundler {
        async fn bundle(&self) -> Result<Vec<OutputArtifact>> {
            let mut artifacts = Vec::new();
            for (name, content) in &self.files {
                fs::write(self.out_dir.join(name), content)?;
                let artifact = if name.ends_with(".js") {
                    OutputArtifact::chunk(*name, content.len() as u64)
                } else {
                    OutputArtifact::asset(*name, content.len() as u64)
                };
                artifacts.push(artifact);
            }
            Ok(artifacts)
        }
    }

    struct BrokenBuild;

    #[async_trait]
    impl Bundler for BrokenBuild {
        async fn bundle(&self) -> Result<Vec<OutputArtifact>> {
            Err(Error::Bundler("Could not resolve './missing.js'".to_string()))
        }
    }

    struct Upper;

    impl Minify for Upper {
        fn minify(&self, _file_name: &str, source: &str) -> Result<String> {
            Ok(source.to_uppercase())
        }
    }

    struct Half;

    impl SizeEstimator for Half {
        fn compressed_size(&self, data: &[u8]) -> Result<u64> {
            Ok(data.len() as u64 / 2)
        }
    }

    fn driver_in(dir: &Path) -> Driver {
        Driver::new(dir, Arc::new(Upper), Arc::new(Half))
    }

    #[tokio::test]
    async fn test_only_scripts_are_minified() {
        let temp = TempDir::new().unwrap();
        let bundler = StaticBundler {
            out_dir: temp.path().to_path_buf(),
            files: vec![("logo.png", "png"), ("a.js", "a"), ("b.js", "b")],
        };

        let mut sink = Vec::new();
        let summary = Pipeline::new(bundler, driver_in(temp.path()))
            .run(&mut sink)
            .await
            .unwrap();

        assert_eq!(summary.processed(), 2);
        let lines: Vec<String> = sink.iter().map(|r| r.progress_line()).collect();
        assert!(lines[0].starts_with("Minifying 1/2: a.js... "));
        assert!(lines[1].starts_with("Minifying 2/2: b.js... "));
        assert_eq!(fs::read_to_string(temp.path().join("logo.png")).unwrap(), "png");
        assert_eq!(fs::read_to_string(temp.path().join("b.js")).unwrap(), "B");
    }

    #[tokio::test]
    async fn test_build_failure_skips_minification() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("old.js"), "old").unwrap();

        let mut sink = Vec::new();
        let result = Pipeline::new(BrokenBuild, driver_in(temp.path()))
            .run(&mut sink)
            .await;

        assert!(matches!(result, Err(Error::Bundler(_))));
        assert!(sink.is_empty());
        assert_eq!(fs::read_to_string(temp.path().join("old.js")).unwrap(), "old");
    }

    #[tokio::test]
    async fn test_no_scripts_prints_nothing() {
        let temp = TempDir::new().unwrap();
        let bundler = StaticBundler {
            out_dir: temp.path().to_path_buf(),
            files: vec![("index.html", "<html></html>")],
        };

        let mut sink = Vec::new();
        let summary = Pipeline::new(bundler, driver_in(temp.path()))
            .run(&mut sink)
            .await
            .unwrap();

        assert_eq!(summary.processed(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_name_cache_is_persisted() {
        let temp = TempDir::new().unwrap();
        let cache_path = temp.path().join("names.json");
        fs::write(
            temp.path().join("app.js"),
            "var o = {}; o.$m_alpha = 1; console.log(o.$m_alpha);",
        )
        .unwrap();

        let cache = load_name_cache(&cache_path).unwrap();
        let minifier = OxcMinifier::with_name_cache(
            MinifyOptions::preset(MinifyPreset::Current),
            cache.clone(),
        )
        .unwrap()
        .script_source();
        let driver = Driver::new(temp.path(), Arc::new(minifier), Arc::new(Half));

        let mut sink = Vec::new();
        Pipeline::new(BrokenBuild, driver)
            .persist_name_cache(cache, &cache_path)
            .minify(&["app.js".to_string()], &mut sink)
            .await
            .unwrap();

        let reloaded = load_name_cache(&cache_path).unwrap().snapshot();
        assert!(reloaded.get("$m_alpha").is_some());
        let written = fs::read_to_string(temp.path().join("app.js")).unwrap();
        assert!(!written.contains("$m_alpha"));
    }

    #[test]
    fn test_missing_name_cache_starts_empty() {
        let temp = TempDir::new().unwrap();
        let cache = load_name_cache(&temp.path().join("absent.json")).unwrap();
        assert!(cache.snapshot().is_empty());
    }
}
