use notify::EmailRequest;
use summarize::SummarizationResult;

pub const EMAIL_SUBJECT: &str = "Meeting Summary";

/// Editable form of a summary: every section is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryDraft {
    pub summary: String,
    pub action_items: String,
    pub decisions: String,
    pub follow_ups: String,
    pub risks: String,
}

impl From<SummarizationResult> for SummaryDraft {
    fn from(result: SummarizationResult) -> Self {
        Self {
            summary: result.summary,
            action_items: bullet_lines(&result.action_items),
            decisions: bullet_lines(&result.decisions),
            follow_ups: bullet_lines(&result.follow_ups),
            risks: bullet_lines(&result.risks),
        }
    }
}

impl SummaryDraft {
    fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("Summary", self.summary.as_str()),
            ("Action Items", self.action_items.as_str()),
            ("Decisions", self.decisions.as_str()),
            ("Follow Ups", self.follow_ups.as_str()),
            ("Risks", self.risks.as_str()),
        ]
    }

    pub fn plain_text(&self) -> String {
        self.sections()
            .iter()
            .enumerate()
            .map(|(i, (title, body))| {
                let lead = if i == 0 { "" } else { "\n" };
                format!("{}{}:\n{}", lead, title, body)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn html(&self) -> String {
        self.sections()
            .iter()
            .enumerate()
            .map(|(i, (title, body))| {
                let tag = if i == 0 { "h2" } else { "h3" };
                format!("<{tag}>{}</{tag}><pre>{}</pre>", title, escape_html(body))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn email_request(&self, recipients: Vec<String>) -> EmailRequest {
        EmailRequest {
            to: recipients,
            subject: EMAIL_SUBJECT.to_string(),
            text: Some(self.plain_text()),
            html: Some(self.html()),
        }
    }
}

fn bullet_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
