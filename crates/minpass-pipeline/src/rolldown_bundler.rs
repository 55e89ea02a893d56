//! [`Bundler`] backed by Rolldown.

use std::path::Path;

use async_trait::async_trait;
use rolldown::{BundlerBuilder as RolldownBundlerBuilder, BundlerOptions, InputItem};
use rolldown_common::Output;

use crate::config::BundleConfig;
use crate::orchestrator::{Bundler, OutputArtifact};
use crate::{Error, Result, writer};

/// Production build through Rolldown.
///
/// Emitted chunks and assets are written below the configured output
/// directory before the artifact list is returned.
#[derive(Debug, Clone)]
pub struct RolldownBundler {
    config: BundleConfig,
}

impl RolldownBundler {
    pub fn new(config: BundleConfig) -> Self {
        Self { config }
    }

    fn rolldown_options(&self, cwd: &Path, out_dir: &Path) -> BundlerOptions {
        BundlerOptions {
            input: Some(
                self.config
                    .entries
                    .iter()
                    .map(|entry| InputItem {
                        name: None,
                        import: entry.clone(),
                    })
                    .collect(),
            ),
            cwd: Some(cwd.to_path_buf()),
            dir: Some(out_dir.to_string_lossy().into_owned()),
            format: Some(self.config.format.to_rolldown()),
            platform: Some(self.config.platform.to_rolldown()),
            minify: self
                .config
                .first_pass_minify
                .then(|| rolldown::RawMinifyOptions::from(true)),
            ..Default::default()
        }
    }

    fn warn_large_chunks(&self, artifacts: &[OutputArtifact]) {
        let limit = self.config.chunk_size_warning_limit_kib.saturating_mul(1024);
        for artifact in artifacts.iter().filter(|a| a.size > limit) {
            tracing::warn!(
                file = %artifact.file_name,
                size = artifact.size,
                limit_kib = self.config.chunk_size_warning_limit_kib,
                "Chunk is larger than the warning limit"
            );
        }
    }
}

#[async_trait]
impl Bundler for RolldownBundler {
    async fn bundle(&self) -> Result<Vec<OutputArtifact>> {
        self.config.validate()?;

        let cwd = match &self.config.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir()?,
        };
        let out_dir = self.config.resolved_out_dir()?;

        tracing::info!(
            entries = self.config.entries.len(),
            out_dir = %out_dir.display(),
            "Starting production build"
        );

        let mut bundler = RolldownBundlerBuilder::default()
            .with_options(self.rolldown_options(&cwd, &out_dir))
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let output = bundler
            .generate()
            .await
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let mut artifacts = Vec::with_capacity(output.assets.len());
        let mut files: Vec<(&str, &[u8])> = Vec::with_capacity(output.assets.len());
        for item in &output.assets {
            match item {
                Output::Chunk(chunk) => {
                    artifacts.push(OutputArtifact::chunk(
                        chunk.filename.as_str(),
                        chunk.code.len() as u64,
                    ));
                    files.push((chunk.filename.as_str(), chunk.code.as_bytes()));
                }
                Output::Asset(asset) => {
                    let bytes = asset.source.as_bytes();
                    artifacts.push(OutputArtifact::asset(
                        asset.filename.as_str(),
                        bytes.len() as u64,
                    ));
                    files.push((asset.filename.as_str(), bytes));
                }
            }
        }

        // Only a successful build may clear the previous output.
        if self.config.empty_out_dir {
            tracing::debug!(dir = %out_dir.display(), "Emptying output directory");
            writer::empty_dir(&out_dir)?;
        }
        writer::write_artifacts(&out_dir, &files)?;
        self.warn_large_chunks(&artifacts);

        Ok(artifacts)
    }
}
