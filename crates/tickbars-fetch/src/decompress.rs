//! LZMA decompression for bi5 files.

use lzma_rs::lzma_decompress;
use std::io::{BufReader, Cursor};
use thiserror::Error;

/// Errors that can occur during decompression.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// LZMA decompression failed.
    #[error("LZMA decompression failed: {0}")]
    LzmaError(String),
}

/// Decompresses LZMA-compressed bi5 data.
///
/// The feed answers with a zero-length body for hours that exist but hold no
/// ticks; that case decompresses to an empty buffer.
///
/// # Errors
///
/// Returns an error if the stream is not valid LZMA.
pub fn decompress_bi5(compressed: &[u8]) -> Result<Vec<u8>, DecompressError> {
    if compressed.is_empty() {
        return Ok(Vec::new());
    }

    let mut decompressed = Vec::new();
    let mut reader = BufReader::new(Cursor::new(compressed));

    lzma_decompress(&mut reader, &mut decompressed)
        .map_err(|e| DecompressError::LzmaError(e.to_string()))?;

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(decompress_bi5(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_lzma() {
        let result = decompress_bi5(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecompressError::LzmaError(_))));
    }

    #[test]
    fn test_lzma_alone_stream() {
        let payload = vec![7u8; 60];
        let mut compressed = Vec::new();
        lzma_rs::lzma_compress(&mut Cursor::new(&payload), &mut compressed).unwrap();

        assert_eq!(decompress_bi5(&compressed).unwrap(), payload);
    }
}
