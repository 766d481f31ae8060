use crate::cli::commands::EndpointArgs;
use crate::errors::{AppError, AppResult};
use crate::types::{AnalysisHandle, Feedback, FeedbackIssues, FeedbackResponse};
use clap::{ArgGroup, Args};

/// Submit feedback for a previous analysis
#[derive(Args)]
#[command(group(ArgGroup::new("verdict").required(true).args(["positive", "negative"])))]
pub struct FeedbackCommand {
    /// Request ID printed with the analysis result
    #[arg(long)]
    pub analysis_id: String,

    /// The result was correct
    #[arg(long)]
    pub positive: bool,

    /// The result was wrong
    #[arg(long)]
    pub negative: bool,

    /// Product identification was wrong
    #[arg(long)]
    pub wrong_product: bool,

    /// Brand identification was wrong
    #[arg(long)]
    pub wrong_brand: bool,

    /// Country identification was wrong
    #[arg(long)]
    pub wrong_country: bool,

    /// Classification was wrong
    #[arg(long)]
    pub wrong_classification: bool,

    /// Suggested alternatives were wrong
    #[arg(long)]
    pub wrong_alternatives: bool,

    /// Something else was wrong
    #[arg(long)]
    pub wrong_other: bool,

    /// Additional comments
    #[arg(long, default_value = "")]
    pub text: String,

    #[command(flatten)]
    pub endpoints: EndpointArgs,
}

impl FeedbackCommand {
    pub fn feedback(&self) -> Feedback {
        Feedback {
            is_positive: self.positive,
            issues: FeedbackIssues {
                wrong_product: self.wrong_product,
                wrong_brand: self.wrong_brand,
                wrong_country: self.wrong_country,
                wrong_classification: self.wrong_classification,
                wrong_alternatives: self.wrong_alternatives,
                wrong_other: self.wrong_other,
            },
            text: self.text.clone(),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let client = self.endpoints.build_client()?;
        let handle = AnalysisHandle::new(self.analysis_id.trim());

        let response = client.send_feedback_for(&handle, &self.feedback()).await;
        println!("{}", serde_json::to_string_pretty(&response)?);

        check_response(response)
    }
}

fn check_response(response: FeedbackResponse) -> AppResult<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(AppError::InvalidData(format!(
        "feedback rejected: {}",
        response.message.unwrap_or(response.status)
    )))
}
