//! Size estimation used for reporting only.

use std::io::Write;

use crate::{Error, Result};

/// Compressed-size estimator seam.
pub trait SizeEstimator: Send + Sync {
    /// Size in bytes `data` would occupy once compressed.
    fn compressed_size(&self, data: &[u8]) -> Result<u64>;
}

/// Brotli size at a fixed quality.
#[derive(Debug, Clone, Copy)]
pub struct BrotliEstimator {
    quality: u32,
    lgwin: u32,
}

impl BrotliEstimator {
    pub const DEFAULT_QUALITY: u32 = 11;
    pub const DEFAULT_LGWIN: u32 = 22;

    pub fn new(quality: u32) -> Self {
        Self {
            quality: quality.min(11),
            lgwin: Self::DEFAULT_LGWIN,
        }
    }
}

impl Default for BrotliEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUALITY)
    }
}

impl SizeEstimator for BrotliEstimator {
    fn compressed_size(&self, data: &[u8]) -> Result<u64> {
        let mut out = Vec::with_capacity(data.len() / 4 + 16);
        {
            let mut writer = brotli::CompressorWriter::new(&mut out, 4096, self.quality, self.lgwin);
            writer
                .write_all(data)
                .map_err(|e| Error::Compression(e.to_string()))?;
            writer
                .flush()
                .map_err(|e| Error::Compression(e.to_string()))?;
        }
        Ok(out.len() as u64)
    }
}

/// Raw byte length of a text.
pub fn raw_size(text: &str) -> u64 {
    text.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetitive_input_compresses() {
        let data = "function f(){return 1}".repeat(500);
        let size = BrotliEstimator::default()
            .compressed_size(data.as_bytes())
            .unwrap();
        assert!(size > 0);
        assert!(size < data.len() as u64 / 10);
    }

    #[test]
    fn test_empty_input_has_small_size() {
        let size = BrotliEstimator::default().compressed_size(b"").unwrap();
        assert!(size <= 4);
    }

    #[test]
    fn test_quality_is_clamped() {
        let estimator = BrotliEstimator::new(99);
        assert_eq!(estimator.quality, 11);
    }

    #[test]
    fn test_raw_size_counts_bytes() {
        assert_eq!(raw_size("abc"), 3);
        assert_eq!(raw_size("é"), 2);
    }
}
