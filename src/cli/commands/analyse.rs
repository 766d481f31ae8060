use crate::cli::commands::EndpointArgs;
use crate::errors::{AppError, AppResult};
use crate::frontend::{run_session, SessionOutcome, TerminalFrontend};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Analyse a product image and optionally rate the result
#[derive(Args)]
pub struct AnalyseCommand {
    /// Image of the product (any common format; converted to JPEG before upload)
    pub image: PathBuf,

    /// Print the normalised result as JSON instead of the rendered view
    #[arg(long)]
    pub json: bool,

    /// Do not prompt for feedback after the result is shown
    #[arg(long)]
    pub no_feedback: bool,

    #[command(flatten)]
    pub endpoints: EndpointArgs,
}

impl AnalyseCommand {
    pub async fn run(&self) -> AppResult<()> {
        let client = self.endpoints.build_client()?;
        let mut frontend = TerminalFrontend::stdio()
            .with_image(&self.image)
            .with_feedback(!self.no_feedback)
            .with_json(self.json);

        match run_session(&client, &mut frontend).await {
            SessionOutcome::Analysed { result, feedback } => {
                info!(
                    "Analysis complete (id: {}, feedback sent: {})",
                    result.id.as_deref().unwrap_or("none"),
                    feedback.is_some()
                );
                Ok(())
            }
            SessionOutcome::AnalysisFailed => Err(AppError::InvalidData(format!(
                "analysis of {} unavailable",
                self.image.display()
            ))),
            SessionOutcome::Cancelled => Ok(()),
        }
    }
}
