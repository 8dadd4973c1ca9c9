use serde::{Deserialize, Serialize};

use crate::SummarizeError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizationRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub instruction: String,
}

impl SummarizationRequest {
    pub fn new(text: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            instruction: instruction.into(),
        }
    }

    pub fn validate(&self) -> Result<(), SummarizeError> {
        if self.text.trim().is_empty() || self.instruction.trim().is_empty() {
            return Err(SummarizeError::MissingInput);
        }
        Ok(())
    }
}

/// The five-field structured summary. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationResult {
    pub summary: String,
    pub action_items: Vec<String>,
    pub decisions: Vec<String>,
    pub follow_ups: Vec<String>,
    pub risks: Vec<String>,
}

impl SummarizationResult {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.action_items.is_empty()
            && self.decisions.is_empty()
            && self.follow_ups.is_empty()
            && self.risks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_blank() {
        let req: SummarizationRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(req.instruction, "");
        assert!(matches!(req.validate(), Err(SummarizeError::MissingInput)));
    }

    #[test]
    fn whitespace_only_is_missing() {
        let req = SummarizationRequest::new("   \n", "Summarize");
        assert!(req.validate().is_err());

        let req = SummarizationRequest::new("Alice: hi", "Summarize");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn result_serializes_with_snake_case_fields() {
        let value = serde_json::to_value(SummarizationResult::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "summary": "",
                "action_items": [],
                "decisions": [],
                "follow_ups": [],
                "risks": []
            })
        );
    }
}
