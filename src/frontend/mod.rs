//! Front-end abstraction
//!
//! Every user interface needs the same four capabilities: pick an image,
//! show a result, show an error, and collect feedback. The business flow
//! that strings them together with the [`AnalysisClient`] lives here, once,
//! in [`run_session`]; toolkits only implement [`Frontend`].

pub mod terminal;

pub use terminal::TerminalFrontend;

use crate::api::{AnalysisClient, Transport};
use crate::types::{AnalysisResult, Feedback, FeedbackResponse};
use std::path::PathBuf;
use tracing::{debug, info};

/// Shown when the analysis could not be completed for any reason
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze product. Please try again.";

/// Shown after the backend accepted a feedback submission
pub const FEEDBACK_THANKS_MESSAGE: &str = "Thanks for your feedback!";

/// Capability set implemented once per user interface
pub trait Frontend {
    /// Ask the user for an image; `None` cancels the session
    fn select_image(&mut self) -> Option<PathBuf>;

    fn display_result(&mut self, result: &AnalysisResult);

    fn display_error(&mut self, message: &str);

    /// Ask the user to rate `result`; `None` means no feedback given
    fn submit_feedback(&mut self, result: &AnalysisResult) -> Option<Feedback>;

    /// Transient confirmation (toast, status line)
    fn display_notice(&mut self, _message: &str) {}
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// No image was selected
    Cancelled,
    /// The analysis was unavailable; the user has been told
    AnalysisFailed,
    Analysed {
        result: AnalysisResult,
        feedback: Option<FeedbackResponse>,
    },
}

/// Run one select → analyse → display → feedback cycle
pub async fn run_session<T, F>(client: &AnalysisClient<T>, frontend: &mut F) -> SessionOutcome
where
    T: Transport,
    F: Frontend + ?Sized,
{
    let Some(path) = frontend.select_image() else {
        debug!("No image selected, ending session");
        return SessionOutcome::Cancelled;
    };

    info!("Analysing {}", path.display());
    let Some(result) = client.analyze(&path).await else {
        frontend.display_error(ANALYSIS_FAILED_MESSAGE);
        return SessionOutcome::AnalysisFailed;
    };

    frontend.display_result(&result);

    // Feedback is only meaningful for an analysis the backend identified
    let handle = result.handle();
    if handle.id().is_none() {
        return SessionOutcome::Analysed {
            result,
            feedback: None,
        };
    }

    let feedback = match frontend.submit_feedback(&result) {
        Some(feedback) => {
            let response = client.send_feedback_for(&handle, &feedback).await;
            if response.is_success() {
                frontend.display_notice(FEEDBACK_THANKS_MESSAGE);
            } else {
                let message = response
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Feedback was not accepted ({})", response.status));
                frontend.display_error(&message);
            }
            Some(response)
        }
        None => None,
    };

    SessionOutcome::Analysed { result, feedback }
}
