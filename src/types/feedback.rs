//! Feedback payloads
//!
//! Callers describe their verdict with [`Feedback`]; the client pairs it with
//! an analysis id to produce the [`FeedbackSubmission`] wire payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message returned when feedback is attempted without a prior analysis
pub const NO_ANALYSIS_ID_MESSAGE: &str = "No analysis ID available for feedback";

/// The six independent "what was wrong" flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackIssues {
    pub wrong_product: bool,
    pub wrong_brand: bool,
    pub wrong_country: bool,
    pub wrong_classification: bool,
    pub wrong_alternatives: bool,
    pub wrong_other: bool,
}

impl FeedbackIssues {
    pub fn any(&self) -> bool {
        self.wrong_product
            || self.wrong_brand
            || self.wrong_country
            || self.wrong_classification
            || self.wrong_alternatives
            || self.wrong_other
    }
}

/// User verdict on an analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub is_positive: bool,
    pub issues: FeedbackIssues,
    pub text: String,
}

impl Feedback {
    /// Thumbs up, nothing flagged
    pub fn positive() -> Self {
        Self {
            is_positive: true,
            ..Default::default()
        }
    }

    pub fn negative(issues: FeedbackIssues, text: impl Into<String>) -> Self {
        Self {
            is_positive: false,
            issues,
            text: text.into(),
        }
    }
}

/// Request body posted to the feedback endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub analysis_id: String,
    pub is_positive: bool,
    #[serde(flatten)]
    pub issues: FeedbackIssues,
    pub feedback_text: String,
}

impl FeedbackSubmission {
    pub fn new(analysis_id: impl Into<String>, feedback: &Feedback) -> Self {
        Self {
            analysis_id: analysis_id.into(),
            is_positive: feedback.is_positive,
            issues: feedback.issues,
            feedback_text: feedback.text.clone(),
        }
    }
}

/// Outcome of a feedback submission
///
/// Remote failures and local precondition failures share the
/// `{"status": "error", "message": ...}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeedbackResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            extra: Map::new(),
        }
    }

    /// Only an explicit `"success"` counts; any other status is a failure
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }
}
