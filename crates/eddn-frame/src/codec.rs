use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{DecodeError, Result};

/// Default cap on the inflated size of one frame: 16 MiB.
pub const DEFAULT_MAX_DECOMPRESSED: usize = 16 * 1024 * 1024;

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Configuration for frame decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum inflated size in bytes. Default: 16 MiB.
    pub max_decompressed_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED,
        }
    }
}

/// Inflate a zlib frame, refusing output larger than `max` bytes.
pub fn inflate(raw: &[u8], max: usize) -> Result<Vec<u8>> {
    let read_limit = u64::try_from(max.saturating_add(1)).unwrap_or(u64::MAX);
    let mut output = Vec::with_capacity(INITIAL_BUFFER_CAPACITY.min(max));
    ZlibDecoder::new(raw)
        .take(read_limit)
        .read_to_end(&mut output)
        .map_err(DecodeError::Compression)?;

    if output.len() > max {
        return Err(DecodeError::PayloadTooLarge { max });
    }
    Ok(output)
}

/// Deflate bytes into a zlib frame as the relay publishes them.
pub fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
