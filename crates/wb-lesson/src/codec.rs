//! Reversible text compression used for stored blobs and share links.
//!
//! Text is brotli-compressed and rendered as URL-safe base64 so the result
//! can be dropped into a storage value or a query parameter as is. Callers
//! treat the output as opaque.

use std::io::{Read, Write};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use brotli::{CompressorWriter, Decompressor};
use thiserror::Error;

const BUFFER_SIZE: usize = 4096;
const QUALITY: u32 = 9;
const WINDOW_SIZE: u32 = 20;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Could not decode base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Could not decompress blob: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decompressed blob is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn compress(text: &str) -> Result<String, CodecError> {
    let mut compressed = Vec::new();
    {
        let mut writer = CompressorWriter::new(&mut compressed, BUFFER_SIZE, QUALITY, WINDOW_SIZE);
        writer.write_all(text.as_bytes())?;
    }
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

pub fn decompress(encoded: &str) -> Result<String, CodecError> {
    let compressed = URL_SAFE_NO_PAD.decode(encoded.trim())?;
    let mut decompressed = Vec::new();
    {
        let mut reader = Decompressor::new(compressed.as_slice(), BUFFER_SIZE);
        reader.read_to_end(&mut decompressed)?;
    }
    Ok(String::from_utf8(decompressed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_unicode() {
        let text = r#"[["¿Qué tal?","How are you?"],["niño","child"]]"#;
        let packed = compress(text).unwrap();
        assert!(
            packed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(decompress(&packed).unwrap(), text);
    }

    #[test]
    fn test_empty_text() {
        let packed = compress("").unwrap();
        assert_eq!(decompress(&packed).unwrap(), "");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(decompress("%%%"), Err(CodecError::Base64(_))));
    }
}
