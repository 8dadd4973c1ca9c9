use std::time::{Duration, Instant};

/// How long a notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
}

/// Holds the single visible notice. A new notice replaces the old one.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            message: message.into(),
            shown_at: now,
        });
    }

    /// The visible message at `now`; expired notices are dropped.
    pub fn visible_at(&mut self, now: Instant) -> Option<&str> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= NOTICE_DURATION);
        if expired {
            self.current = None;
        }
        self.current.as_ref().map(|n| n.message.as_str())
    }
}
