use crate::cli::commands::EndpointArgs;
use crate::errors::AppResult;
use clap::Args;

/// Show the location that would be sent with an analysis
#[derive(Args)]
pub struct LocateCommand {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub endpoints: EndpointArgs,
}

impl LocateCommand {
    pub async fn run(&self) -> AppResult<()> {
        let client = self.endpoints.build_client()?;
        let location = client.locate().await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&location)?);
        } else {
            println!("{}", location);
            if location.is_unknown() {
                println!("(location lookup failed; the placeholder will be sent)");
            }
        }
        Ok(())
    }
}
