//! Source decoding with a UTF-8 fast path and detected-encoding fallback.
//!
//! Python sources are almost always UTF-8. When a file is not, the bytes are decoded with the
//! encoding `chardetng` guesses (honoring a UTF-16 byte-order mark first) so that legacy
//! Latin-1 or Windows-1252 files still land in the bundle instead of failing the read.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use std::io;
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Read `path` and decode it to text.
///
/// Only I/O failures are errors; undecodable byte sequences become replacement characters.
pub fn read_source(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            let bytes = err.into_bytes();
            let encoding = detect_encoding(&bytes);
            let (decoded, _, had_errors) = encoding.decode(&bytes);
            tracing::debug!(
                path = %path.display(),
                encoding = encoding.name(),
                had_errors,
                "decoded non-UTF-8 source"
            );
            Ok(decoded.into_owned())
        }
    }
}

/// Guess the encoding of a non-UTF-8 byte buffer.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if bytes.starts_with(&[0xff, 0xfe]) {
        return UTF_16LE;
    }
    if bytes.starts_with(&[0xfe, 0xff]) {
        return UTF_16BE;
    }

    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == bytes.len());
    detector.guess(None, true)
}
