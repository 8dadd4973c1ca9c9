pub mod reader;
pub mod transcript;

pub use reader::{IngestError, TranscriptReader};
pub use transcript::Transcript;

use sha2::{Digest, Sha256};

/// Generate a stable fingerprint for transcript content
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint("Alice: hi"), fingerprint("Alice: hi"));
        assert_ne!(fingerprint("Alice: hi"), fingerprint("Bob: hi"));
        assert_eq!(fingerprint("x").len(), 16);
    }
}
