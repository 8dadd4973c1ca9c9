pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that outputs strict JSON only, without extra commentary.";

pub fn build_summary_prompt(instruction: &str, transcript: &str) -> String {
    format!(
        r#"
Instruction: {}

Transcript:
{}

Return strict JSON with this schema:
{{
  "summary": "string",
  "action_items": ["string"],
  "decisions": ["string"],
  "follow_ups": ["string"],
  "risks": ["string"]
}}
"#,
        instruction, transcript
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_instruction_transcript_and_schema() {
        let prompt = build_summary_prompt("Summarize briefly", "Alice: let's ship Friday.");

        assert!(prompt.contains("Instruction: Summarize briefly"));
        assert!(prompt.contains("Transcript:\nAlice: let's ship Friday."));
        for field in ["summary", "action_items", "decisions", "follow_ups", "risks"] {
            assert!(prompt.contains(&format!("\"{}\"", field)));
        }
    }
}
