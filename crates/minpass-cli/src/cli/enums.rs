use clap::ValueEnum;
use minpass_pipeline::{FailurePolicy, MinifyPreset};

/// Minify preset
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Preset {
    /// ES2015 output ceiling; quoted property names are mangled too
    #[value(name = "legacy")]
    Legacy,

    /// ES2020 output ceiling; quoted property names are preserved
    #[value(name = "current")]
    Current,
}

impl From<Preset> for MinifyPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Legacy => MinifyPreset::Legacy,
            Preset::Current => MinifyPreset::Current,
        }
    }
}

/// Failure policy for the minification pass
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FailurePolicyArg {
    /// Stop at the first artifact that fails
    #[value(name = "abort")]
    Abort,

    /// Report the failure and carry on with the next artifact
    #[value(name = "continue")]
    Continue,
}

impl From<FailurePolicyArg> for FailurePolicy {
    fn from(policy: FailurePolicyArg) -> Self {
        match policy {
            FailurePolicyArg::Abort => FailurePolicy::Abort,
            FailurePolicyArg::Continue => FailurePolicy::Continue,
        }
    }
}
