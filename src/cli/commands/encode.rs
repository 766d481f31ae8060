use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::imaging;
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Normalise an image exactly as it would be uploaded
#[derive(Args)]
pub struct EncodeCommand {
    /// Image to normalise
    pub image: PathBuf,

    /// Write the normalised JPEG here instead of printing a base64 summary
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// JPEG quality (overrides config.toml)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

impl EncodeCommand {
    pub fn run(&self) -> AppResult<()> {
        let quality = self
            .quality
            .unwrap_or_else(|| AppConfig::get_defaults().client.jpeg_quality);

        match &self.output {
            Some(output) => {
                let bytes = fs::read(&self.image)?;
                let jpeg = imaging::normalise_to_jpeg(&bytes, quality).map_err(|e| {
                    AppError::InvalidData(format!(
                        "{} is not a decodable image: {}",
                        self.image.display(),
                        e
                    ))
                })?;
                fs::write(output, &jpeg)?;
                info!("Wrote {} bytes to {}", jpeg.len(), output.display());
                println!("{} -> {} ({} bytes)", self.image.display(), output.display(), jpeg.len());
            }
            None => {
                let encoded = imaging::encode_image(&self.image, quality)?;
                let preview: String = encoded.chars().take(48).collect();
                println!("{} base64 characters", encoded.len());
                println!("{}...", preview);
            }
        }
        Ok(())
    }
}
