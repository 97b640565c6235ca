//! HTTP client for the camera server API.
//!
//! All request/response plumbing for the dashboard lives here, so the UI
//! components never build URLs or parse payloads themselves. Works with
//! same-origin relative URLs in the browser and with an explicit base URL
//! in tests.

use std::collections::BTreeMap;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::telemetry::MetricSample;
use crate::types::{
    Burst, BurstAck, BurstFormat, CameraParams, FrameResponse, ProcessOptions, ProcessResponse,
};

/// Error type for camera server operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
    /// Server returned an error status
    #[error("Server error (status {status}): {message}")]
    ServerError { status: u16, message: String },
}

impl From<gloo_net::Error> for DashboardError {
    fn from(err: gloo_net::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

/// Relative path for a burst download, shared with the frontend's plain
/// `<a href>` links (the download is a browser navigation, not a fetch).
pub fn download_burst_path(burst_id: i64, format: BurstFormat) -> String {
    format!(
        "/download-burst?burstId={}&format={}",
        burst_id,
        format.as_str()
    )
}

/// Client for the camera server HTTP API.
#[derive(Debug, Clone)]
pub struct CameraServerClient {
    base_url: String,
}

impl CameraServerClient {
    /// Create a new client pointing to the given base URL.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Create a client for same-origin web requests.
    ///
    /// Uses relative URLs (empty base), which works in WASM when the
    /// dashboard is served from the same origin as the API. Panics if
    /// called outside WASM.
    pub fn for_web() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::new("")
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            unreachable!("for_web() is only available in WASM builds")
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // === Internal HTTP helpers ===

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url).send().await?;

        if !response.ok() {
            return Err(DashboardError::ServerError {
                status: response.status(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::Parse(e.to_string()))
    }

    async fn get_text(&self, path: &str) -> Result<String, DashboardError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url).send().await?;

        if !response.ok() {
            return Err(DashboardError::ServerError {
                status: response.status(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DashboardError::Parse(e.to_string()))
    }

    // === Camera ===

    /// Current values of the adjustable camera parameters.
    pub async fn get_camera_params(&self) -> Result<CameraParams, DashboardError> {
        self.get("/get-camera-params").await
    }

    /// Capture a frame with the given parameter snapshot.
    ///
    /// The server applies the parameters, captures, stores the image, and
    /// answers with the encoded frame plus its opaque handle.
    pub async fn get_current_frame(
        &self,
        params: &CameraParams,
    ) -> Result<FrameResponse, DashboardError> {
        self.get(&format!("/current-frame?{}", params.to_query()))
            .await
    }

    /// Upload a user-selected image as a multipart form (field `image`).
    ///
    /// On success the returned handle replaces the active image exactly as
    /// a capture would.
    pub async fn upload_image(
        &self,
        form: &web_sys::FormData,
    ) -> Result<FrameResponse, DashboardError> {
        let url = format!("{}/upload-image", self.base_url);
        let response = Request::post(&url)
            .body(form.clone())
            .map_err(|e| DashboardError::Http(e.to_string()))?
            .send()
            .await?;

        if !response.ok() {
            return Err(DashboardError::ServerError {
                status: response.status(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        response
            .json::<FrameResponse>()
            .await
            .map_err(|e| DashboardError::Parse(e.to_string()))
    }

    /// Run the star-detection pipeline on a previously stored image.
    pub async fn process_image(
        &self,
        uuid: &str,
        opts: &ProcessOptions,
    ) -> Result<ProcessResponse, DashboardError> {
        self.get(&format!(
            "/process-image?uuid={}&auto_threshold={}&label_guide_stars={}&threshold={}",
            uuid, opts.auto_threshold, opts.label_guide_stars, opts.threshold
        ))
        .await
    }

    // === Telemetry ===

    /// Per-metric sample sequences covering the trailing window.
    pub async fn get_metrics(
        &self,
        minutes: u32,
    ) -> Result<BTreeMap<String, Vec<MetricSample>>, DashboardError> {
        self.get(&format!("/get-metrics/{minutes}")).await
    }

    // === Burst queue ===

    /// The authoritative current set of scheduled bursts.
    pub async fn get_bursts(&self) -> Result<Vec<Burst>, DashboardError> {
        self.get("/get-bursts").await
    }

    /// Queue a capture burst. A rejected burst (e.g. over the frame limit)
    /// still answers 200 with `result == "error"`; that is data for the
    /// report log, not a transport failure.
    pub async fn queue_burst(
        &self,
        duration: u32,
        interval: u32,
        params: &CameraParams,
    ) -> Result<BurstAck, DashboardError> {
        self.get(&format!(
            "/queue-burst?duration={}&interval={}&{}",
            duration,
            interval,
            params.to_query()
        ))
        .await
    }

    /// Delete a queued burst and its stored images.
    pub async fn delete_burst(&self, burst_id: i64) -> Result<(), DashboardError> {
        self.get_text(&format!("/delete-burst?burstId={burst_id}"))
            .await?;
        Ok(())
    }

    /// Absolute URL for a burst download navigation.
    pub fn download_burst_url(&self, burst_id: i64, format: BurstFormat) -> String {
        format!("{}{}", self.base_url, download_burst_path(burst_id, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_url_construction() {
        let client = CameraServerClient::new("http://localhost:5000");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.download_burst_url(3, BurstFormat::Raw),
            "http://localhost:5000/download-burst?burstId=3&format=raw"
        );
    }

    #[test]
    fn client_strips_trailing_slash() {
        let client = CameraServerClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn download_path_carries_id_and_format() {
        let path = download_burst_path(7, BurstFormat::Jpeg);
        assert!(path.contains("burstId=7"));
        assert!(path.contains("format=jpeg"));
        assert_eq!(path, "/download-burst?burstId=7&format=jpeg");
    }

    #[test]
    fn all_burst_formats_have_distinct_query_values() {
        let values: Vec<&str> = BurstFormat::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(values, vec!["raw", "jpeg", "mat"]);
    }
}
