//! Data model shared by the client, the front-ends and the CLI

pub mod analysis;
pub mod feedback;
pub mod location;

pub use analysis::{
    Alternative, AnalysisHandle, AnalysisResult, Classification, CurrentAlternative,
    LegacyAlternative, TokenUsage,
};
pub use feedback::{
    Feedback, FeedbackIssues, FeedbackResponse, FeedbackSubmission, NO_ANALYSIS_ID_MESSAGE,
};
pub use location::UserLocation;
