//! The second minification pass.
//!
//! [`OxcMinifier`] parses an artifact with oxc, mangles properties according
//! to the configured policy, runs the compressor for the configured number of
//! passes (identifier mangling on the last one) and prints the program back
//! without comments or whitespace.

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use oxc_transformer::EngineTargets;

use crate::config::MinifyOptions;
use crate::mangle::{PropertyManglePolicy, SharedNameCache, mangle_properties};
use crate::{Error, Result};

/// Minifier seam used by the driver.
pub trait Minify: Send + Sync {
    /// Minify `source`, the content of the artifact `file_name`.
    fn minify(&self, file_name: &str, source: &str) -> Result<String>;
}

/// oxc-backed minifier with property mangling.
#[derive(Debug, Clone)]
pub struct OxcMinifier {
    options: MinifyOptions,
    policy: Option<PropertyManglePolicy>,
    name_cache: SharedNameCache,
    source_type: SourceType,
}

impl OxcMinifier {
    /// Create a minifier with a fresh, empty name cache.
    pub fn new(options: MinifyOptions) -> Result<Self> {
        Self::with_name_cache(options, SharedNameCache::new())
    }

    /// Create a minifier that records property names in `name_cache`.
    pub fn with_name_cache(options: MinifyOptions, name_cache: SharedNameCache) -> Result<Self> {
        options.validate()?;
        let policy = options
            .properties
            .as_ref()
            .map(|props| props.policy())
            .transpose()?;

        Ok(Self {
            options,
            policy,
            name_cache,
            source_type: SourceType::mjs(),
        })
    }

    /// Parse artifacts as classic scripts instead of ES modules.
    pub fn script_source(mut self) -> Self {
        self.source_type = SourceType::cjs();
        self
    }

    fn compress_options(&self) -> CompressOptions {
        CompressOptions {
            target: EngineTargets::from_target(&self.options.ecma.to_es_target().to_string())
                .expect("ES target names are always parsable"),
            ..CompressOptions::smallest()
        }
    }

    fn mangle_options(&self) -> Option<MangleOptions> {
        self.options.mangle_identifiers.then(|| MangleOptions {
            top_level: self.options.toplevel,
            ..MangleOptions::default()
        })
    }
}

impl Minify for OxcMinifier {
    fn minify(&self, file_name: &str, source: &str) -> Result<String> {
        let allocator = Allocator::default();
        let mut parsed = Parser::new(&allocator, source, self.source_type).parse();

        if parsed.panicked || !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Minify {
                file: file_name.to_string(),
                message: if message.is_empty() {
                    "parser aborted".to_string()
                } else {
                    message
                },
            });
        }

        if let (Some(policy), Some(props)) = (&self.policy, &self.options.properties) {
            mangle_properties(
                &allocator,
                &mut parsed.program,
                policy,
                props.keep_quoted,
                &self.name_cache,
            );
        }

        let passes = self.options.compress_passes.max(1);
        let mut scoping = None;
        for pass in 1..=passes {
            let last = pass == passes;
            let minifier = Minifier::new(MinifierOptions {
                mangle: if last { self.mangle_options() } else { None },
                compress: Some(self.compress_options()),
            });
            scoping = minifier.minify(&allocator, &mut parsed.program).scoping;
        }

        let comments = if self.options.comments {
            CommentOptions::default()
        } else {
            CommentOptions::disabled()
        };

        let output = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments,
                ..CodegenOptions::default()
            })
            .with_scoping(scoping)
            .build(&parsed.program);

        tracing::debug!(
            file = file_name,
            from = source.len(),
            to = output.code.len(),
            passes,
            "Minified artifact"
        );

        Ok(output.code)
    }
}
