use serde::{Deserialize, Serialize};

/// Decoded transcript text plus where it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub source: Option<String>,
    pub fingerprint: String,
}

impl Transcript {
    pub fn new(text: String, source: Option<String>) -> Self {
        let fingerprint = crate::fingerprint(&text);

        Self {
            text,
            source,
            fingerprint,
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
