use crate::api::geolocation;
use crate::api::headers::{build_headers, BrowserIdentity};
use crate::api::transport::{ReqwestTransport, Transport};
use crate::config::{ApiConfig, AppConfig, ClientConfig};
use crate::errors::{ApiError, ApiResult, ImageResult};
use crate::imaging;
use crate::types::{
    AnalysisHandle, AnalysisResult, Feedback, FeedbackResponse, FeedbackSubmission, UserLocation,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, warn};

/// Body posted to the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Base64 of the normalised JPEG
    pub image: String,
    #[serde(rename = "userLocation")]
    pub user_location: UserLocation,
}

/// Client for the BuyEuropean analysis service
///
/// Analysis failures are reported as `None` and feedback failures as an
/// error [`FeedbackResponse`]; neither operation returns `Err`.
///
/// The id of the most recent successful analysis is remembered so that
/// [`send_feedback`](Self::send_feedback) can be called without arguments
/// identifying the analysis. Callers juggling several analyses should prefer
/// [`send_feedback_for`](Self::send_feedback_for) with an explicit handle.
pub struct AnalysisClient<T: Transport = ReqwestTransport> {
    transport: T,
    api: ApiConfig,
    jpeg_quality: u8,
    last_analysis_id: Mutex<Option<String>>,
}

impl AnalysisClient<ReqwestTransport> {
    /// Create a client with the fixed header set for this platform
    ///
    /// No network activity happens here.
    pub fn new(client: &ClientConfig, api: ApiConfig) -> ApiResult<Self> {
        let identity = BrowserIdentity::for_current_platform(client);
        let headers = build_headers(&identity, &api.origin)?;
        let transport = ReqwestTransport::new(headers)?;

        info!("Analysis client ready ({})", identity.user_agent);

        Ok(Self::with_transport(transport, api, client.jpeg_quality))
    }

    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        Self::new(&config.client, config.api.clone())
    }
}

impl<T: Transport> AnalysisClient<T> {
    pub fn with_transport(transport: T, api: ApiConfig, jpeg_quality: u8) -> Self {
        Self {
            transport,
            api,
            jpeg_quality,
            last_analysis_id: Mutex::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api
    }

    /// Approximate user location, or the placeholder on any failure
    pub async fn locate(&self) -> UserLocation {
        geolocation::locate(&self.transport, &self.api.geolocation_url).await
    }

    /// Normalise the image at `path` and return it as base64 text
    pub fn encode_image(&self, path: &Path) -> ImageResult<String> {
        imaging::encode_image(path, self.jpeg_quality)
    }

    /// Send a product image for analysis
    ///
    /// Returns `None` when the analysis is unavailable for any reason; the
    /// cause is logged.
    pub async fn analyze(&self, path: &Path) -> Option<AnalysisResult> {
        match self.try_analyze(path).await {
            Ok(result) => Some(result),
            Err(e) => {
                error!("Error analyzing product: {}", e);
                None
            }
        }
    }

    async fn try_analyze(&self, path: &Path) -> ApiResult<AnalysisResult> {
        let user_location = self.locate().await;
        let image = self.encode_image_blocking(path.to_path_buf()).await?;

        let request = AnalysisRequest {
            image,
            user_location,
        };
        let body = serde_json::to_value(&request)?;

        let response = self
            .transport
            .post_json(&self.api.analysis_url, &body)
            .await?;

        if !response.is_ok() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let result = parse_analysis(&response.body)?;

        match &result.id {
            Some(id) => {
                debug!("Remembering analysis id {}", id);
                self.remember_analysis_id(id.clone());
            }
            None => warn!("Analysis response carried no id; feedback will use the previous one"),
        }

        Ok(result)
    }

    /// Image decoding is CPU-bound; keep it off the async worker threads
    async fn encode_image_blocking(&self, path: PathBuf) -> ApiResult<String> {
        let quality = self.jpeg_quality;
        let encoded =
            tokio::task::spawn_blocking(move || imaging::encode_image(&path, quality))
                .await
                .map_err(|e| ApiError::Worker(e.to_string()))??;
        Ok(encoded)
    }

    /// Submit feedback for the most recent successful analysis
    ///
    /// Without a prior analysis id this returns an error response locally.
    pub async fn send_feedback(&self, feedback: &Feedback) -> FeedbackResponse {
        let handle = self.last_analysis_handle();
        self.send_feedback_for(&handle, feedback).await
    }

    /// Submit feedback for the analysis identified by `handle`
    pub async fn send_feedback_for(
        &self,
        handle: &AnalysisHandle,
        feedback: &Feedback,
    ) -> FeedbackResponse {
        match self.try_send_feedback(handle, feedback).await {
            Ok(response) => response,
            Err(ApiError::MissingAnalysisId) => {
                warn!("Feedback requested before any identified analysis");
                FeedbackResponse::error(ApiError::MissingAnalysisId.to_string())
            }
            Err(e) => {
                error!("Error sending feedback: {}", e);
                FeedbackResponse::error(e.to_string())
            }
        }
    }

    async fn try_send_feedback(
        &self,
        handle: &AnalysisHandle,
        feedback: &Feedback,
    ) -> ApiResult<FeedbackResponse> {
        let analysis_id = handle.id().ok_or(ApiError::MissingAnalysisId)?;

        let submission = FeedbackSubmission::new(analysis_id, feedback);
        let body = serde_json::to_value(&submission)?;

        let response = self
            .transport
            .post_json(&self.api.feedback_url, &body)
            .await?;

        if !response.is_ok() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }

        parse_feedback_response(&response.body)
    }

    fn remember_analysis_id(&self, id: String) {
        *self
            .last_analysis_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(id);
    }

    fn last_analysis_handle(&self) -> AnalysisHandle {
        self.last_analysis_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .map(AnalysisHandle::new)
            .unwrap_or_default()
    }
}

fn parse_analysis(body: &str) -> ApiResult<AnalysisResult> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("analysis body: {}", e)))
}

fn parse_feedback_response(body: &str) -> ApiResult<FeedbackResponse> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::InvalidResponse(format!("feedback body: {}", e)))
}
