use thiserror::Error;
use tracing::{debug, warn};

use crate::transcript::Transcript;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No file")]
    MissingFile,

    #[error("Upload failed: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Upload failed: {0}")]
    Read(String),
}

/// Turns uploaded bytes into transcript text.
///
/// Any file name is accepted; only the bytes have to be UTF-8.
pub struct TranscriptReader;

impl TranscriptReader {
    pub fn decode(bytes: &[u8], file_name: Option<&str>) -> Result<Transcript, IngestError> {
        if let Some(name) = file_name {
            if !Self::has_text_extension(name) {
                warn!(file_name = name, "Accepting upload without a .txt extension");
            }
        }

        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)?;

        let transcript = Transcript::new(text.to_string(), file_name.map(str::to_string));
        debug!(
            fingerprint = %transcript.fingerprint,
            chars = transcript.char_count(),
            "Decoded transcript"
        );

        Ok(transcript)
    }

    fn has_text_extension(name: &str) -> bool {
        std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_verbatim() {
        let raw = "Alice: let's ship Friday.\r\nBob: agreed.\n";
        let transcript = TranscriptReader::decode(raw.as_bytes(), Some("notes.txt")).unwrap();

        assert_eq!(transcript.text, raw);
        assert_eq!(transcript.source.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn same_bytes_give_same_text() {
        let raw = "Standup\n- deploy blocked on review".as_bytes();
        let first = TranscriptReader::decode(raw, None).unwrap();
        let second = TranscriptReader::decode(raw, None).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn strips_byte_order_mark() {
        let mut raw = UTF8_BOM.to_vec();
        raw.extend_from_slice("hello".as_bytes());

        let transcript = TranscriptReader::decode(&raw, None).unwrap();
        assert_eq!(transcript.text, "hello");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = TranscriptReader::decode(&[0x66, 0xFF, 0xFE], Some("a.txt")).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[test]
    fn accepts_other_extensions() {
        let transcript = TranscriptReader::decode(b"# notes", Some("notes.md")).unwrap();
        assert_eq!(transcript.text, "# notes");
        assert!(TranscriptReader::has_text_extension("A.TXT"));
        assert!(!TranscriptReader::has_text_extension("a.md"));
    }
}
