pub mod backend;
pub mod draft;
pub mod error;
pub mod notice;
pub mod orchestrator;
pub mod recipients;

pub use backend::{ApiClient, Backend};
pub use draft::SummaryDraft;
pub use error::ClientError;
pub use notice::{NOTICE_DURATION, NoticeBoard};
pub use orchestrator::{Orchestrator, Outcome, UiState};
pub use recipients::parse_recipients;
