use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use notify::EmailResult;
use summarize::SummarizationRequest;

use crate::backend::Backend;
use crate::draft::SummaryDraft;
use crate::notice::NoticeBoard;
use crate::recipients::{all_valid, parse_recipients};
use crate::ClientError;

/// Busy flags, one per action family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub uploading: bool,
    pub summarizing: bool,
    pub emailing: bool,
}

impl UiState {
    pub fn is_idle(&self) -> bool {
        !(self.uploading || self.summarizing || self.emailing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    /// Failed with the message that was shown as a notice
    Failed(String),
    /// A newer summarization superseded this one; nothing was shown
    Discarded,
    /// The action was already in flight
    Ignored,
}

struct InFlight {
    generation: u64,
    token: CancellationToken,
}

/// Releases the in-flight slot when a summarization future is dropped early
struct SummarizationGuard<'a> {
    orchestrator: &'a Orchestrator,
    generation: u64,
    finished: bool,
}

impl SummarizationGuard<'_> {
    fn finish(mut self) -> bool {
        self.finished = true;
        self.orchestrator.finish_summarization(self.generation)
    }
}

impl Drop for SummarizationGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.orchestrator.finish_summarization(self.generation);
        }
    }
}

/// Sequences upload, summarize and email calls for one user session.
///
/// A new summarization cancels the previous one on the client side only: the
/// server still finishes the superseded request and its answer is dropped.
pub struct Orchestrator {
    backend: Arc<dyn Backend>,
    state: Mutex<UiState>,
    notices: Mutex<NoticeBoard>,
    in_flight: Mutex<Option<InFlight>>,
    generations: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: Mutex::new(UiState::default()),
            notices: Mutex::new(NoticeBoard::default()),
            in_flight: Mutex::new(None),
            generations: AtomicU64::new(0),
        }
    }

    pub fn ui_state(&self) -> UiState {
        *lock(&self.state)
    }

    /// Currently visible notice, if it has not expired
    pub fn notice(&self) -> Option<String> {
        lock(&self.notices)
            .visible_at(Instant::now())
            .map(str::to_string)
    }

    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Outcome<String> {
        lock(&self.state).uploading = true;
        let result = self.backend.upload(file_name, bytes).await;
        lock(&self.state).uploading = false;

        match result {
            Ok(text) => {
                self.show("Transcript loaded");
                Outcome::Done(text)
            }
            Err(ClientError::Server { status, message }) => self.fail(match message {
                Some(message) => format!("Upload failed: {}", message),
                None => format!("Upload failed ({})", status),
            }),
            Err(e) => self.fail(format!("Upload error: {}", e)),
        }
    }

    pub async fn summarize(&self, transcript: &str, instruction: &str) -> Outcome<SummaryDraft> {
        if transcript.trim().is_empty() {
            return self.fail("Please upload or paste a transcript first.");
        }

        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        {
            let mut slot = lock(&self.in_flight);
            let next = InFlight {
                generation,
                token: token.clone(),
            };
            if let Some(previous) = slot.replace(next) {
                debug!(superseded = previous.generation, generation, "Cancelling previous summarization");
                previous.token.cancel();
            }
        }
        lock(&self.state).summarizing = true;
        let guard = SummarizationGuard {
            orchestrator: self,
            generation,
            finished: false,
        };

        let request = SummarizationRequest::new(transcript, instruction);
        let result = tokio::select! {
            result = self.backend.summarize(&request) => result,
            _ = token.cancelled() => {
                debug!(generation, "Summarization superseded, discarding response");
                return Outcome::Discarded;
            }
        };

        if !guard.finish() {
            return Outcome::Discarded;
        }

        match result {
            Ok(result) => {
                self.show("Summary generated");
                Outcome::Done(SummaryDraft::from(result))
            }
            Err(ClientError::Server {
                status,
                message: None,
            }) => self.fail(format!("Summarize failed ({})", status)),
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Clears the in-flight slot if `generation` still owns it
    fn finish_summarization(&self, generation: u64) -> bool {
        let mut slot = lock(&self.in_flight);
        match slot.as_ref() {
            Some(current) if current.generation == generation => {
                *slot = None;
                lock(&self.state).summarizing = false;
                true
            }
            _ => false,
        }
    }

    pub async fn send_email(&self, draft: &SummaryDraft, recipients_input: &str) -> Outcome<EmailResult> {
        let recipients = parse_recipients(recipients_input);
        if recipients.is_empty() {
            return self.fail("Enter at least one recipient email");
        }
        if !all_valid(&recipients) {
            return self.fail("One or more recipient emails are invalid");
        }

        {
            let mut state = lock(&self.state);
            if state.emailing {
                debug!("Email already in flight, ignoring");
                return Outcome::Ignored;
            }
            state.emailing = true;
        }

        let result = self.backend.send_email(&draft.email_request(recipients)).await;
        lock(&self.state).emailing = false;

        match result {
            Ok(sent) => {
                self.show("Email sent");
                Outcome::Done(sent)
            }
            Err(ClientError::Server { status, message }) => {
                let mut text = format!("Email failed ({})", status);
                if let Some(message) = message {
                    text.push_str(&format!(": {}", message));
                }
                self.fail(text)
            }
            Err(e) => self.fail(format!("Email request error: {}", e)),
        }
    }

    fn show(&self, message: &str) {
        info!(notice = message, "Notice");
        lock(&self.notices).show(message, Instant::now());
    }

    fn fail<T>(&self, message: impl Into<String>) -> Outcome<T> {
        let message = message.into();
        warn!(notice = %message, "Notice");
        lock(&self.notices).show(message.clone(), Instant::now());
        Outcome::Failed(message)
    }
}
