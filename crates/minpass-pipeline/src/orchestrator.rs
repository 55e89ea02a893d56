//! Build orchestration: one bundler invocation, then the script subset.

use async_trait::async_trait;

use crate::Result;

/// File extension of script artifacts.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Whether the bundler emitted a chunk of code or a static asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Chunk,
    Asset,
}

/// One named output file produced by the bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub file_name: String,
    pub kind: ArtifactKind,
    pub size: u64,
}

impl OutputArtifact {
    pub fn chunk(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            kind: ArtifactKind::Chunk,
            size,
        }
    }

    pub fn asset(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            kind: ArtifactKind::Asset,
            size,
        }
    }
}

/// Script artifacts are selected by name, not by kind.
pub fn is_script_artifact(file_name: &str) -> bool {
    file_name.ends_with(SCRIPT_EXTENSION)
}

/// The external build tool.
///
/// Implementations write every artifact to the output directory and return
/// them in emission order.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self) -> Result<Vec<OutputArtifact>>;
}

/// Runs the bundler once and keeps the emitted scripts.
pub struct Orchestrator<B> {
    bundler: B,
}

impl<B: Bundler> Orchestrator<B> {
    pub fn new(bundler: B) -> Self {
        Self { bundler }
    }

    /// Invoke the bundler and return the script artifacts in emission order.
    ///
    /// Bundler errors propagate unchanged; there is no retry.
    pub async fn run(&self) -> Result<Vec<OutputArtifact>> {
        let emitted = self.bundler.bundle().await?;
        tracing::info!(artifacts = emitted.len(), "Bundler finished");

        let scripts: Vec<OutputArtifact> = emitted
            .into_iter()
            .filter(|artifact| is_script_artifact(&artifact.file_name))
            .collect();

        tracing::debug!(
            scripts = scripts.len(),
            names = ?scripts.iter().map(|a| a.file_name.as_str()).collect::<Vec<_>>(),
            "Selected script artifacts"
        );

        Ok(scripts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedBundler {
        output: Vec<OutputArtifact>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Bundler for FixedBundler {
        async fn bundle(&self) -> Result<Vec<OutputArtifact>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    struct FailingBundler;

    #[async_trait]
    impl Bundler for FailingBundler {
        async fn bundle(&self) -> Result<Vec<OutputArtifact>> {
            Err(Error::Bundler("unresolved import".to_string()))
        }
    }

    #[tokio::test]
    async fn test_keeps_scripts_in_emission_order() {
        let bundler = FixedBundler {
            output: vec![
                OutputArtifact::chunk("b.js", 10),
                OutputArtifact::asset("logo.png", 5),
                OutputArtifact::chunk("a.js", 20),
                OutputArtifact::asset("style.css", 3),
                OutputArtifact::asset("a.js.map", 3),
            ],
            calls: AtomicUsize::new(0),
        };
        let orchestrator = Orchestrator::new(bundler);

        let names: Vec<String> = orchestrator
            .run()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.file_name)
            .collect();

        assert_eq!(names, vec!["b.js", "a.js"]);
        assert_eq!(orchestrator.bundler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bundler_failure_propagates() {
        let result = Orchestrator::new(FailingBundler).run().await;
        assert!(matches!(result, Err(Error::Bundler(_))));
    }

    #[test]
    fn test_is_script_artifact() {
        assert!(is_script_artifact("assets/index-3f2a.js"));
        assert!(!is_script_artifact("index.mjs"));
        assert!(!is_script_artifact("app.js.map"));
        assert!(!is_script_artifact("logo.png"));
    }
}
