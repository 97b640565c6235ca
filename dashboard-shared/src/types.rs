//! Wire types for the camera server HTTP API.

use serde::{Deserialize, Serialize};

/// Adjustable camera parameters.
///
/// The server reports and accepts these as a flat name -> value mapping,
/// so the same struct serves `/get-camera-params` responses, capture
/// requests, and the parameter snapshot stored with each burst.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CameraParams {
    pub brightness: i64,
    pub gamma: i64,
    pub gain: i64,
    pub exposure: i64,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            brightness: 128,
            gamma: 100,
            gain: 16,
            exposure: 100,
        }
    }
}

impl CameraParams {
    /// Query-string fragment used by `/current-frame` and `/queue-burst`.
    pub fn to_query(&self) -> String {
        format!(
            "brightness={}&gamma={}&gain={}&exposure={}",
            self.brightness, self.gamma, self.gain, self.exposure
        )
    }
}

/// Response from `/current-frame` and `/upload-image`.
///
/// `uuid` is the opaque handle the server issues for the stored image;
/// `/process-image` requires it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameResponse {
    pub b64_img: String,
    pub uuid: String,
}

/// Options sent with a `/process-image` request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessOptions {
    pub auto_threshold: bool,
    pub label_guide_stars: bool,
    pub threshold: i64,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            auto_threshold: true,
            label_guide_stars: false,
            threshold: 170,
        }
    }
}

/// One named section of the processing report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
}

/// The `results` object of a `/process-image` response.
///
/// `labeled` is only present when guide-star labeling was requested and a
/// pattern was found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessResults {
    pub pattern: ReportSection,
    pub threshold: ReportSection,
    pub stars: ReportSection,
    #[serde(default)]
    pub labeled: Option<ReportSection>,
}

/// Response from `/process-image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessResponse {
    /// 256-bin grayscale histogram. The server emits each bin as a
    /// single-element list (`[[n], [n], ...]`), an artifact of its
    /// histogram computation; use [`ProcessResponse::histogram_counts`].
    pub hist: Vec<[f64; 1]>,
    pub b64_thresh_img: String,
    /// Present and true only when a star pattern was matched.
    #[serde(default)]
    pub pattern: bool,
    /// Original frame with the matched pattern drawn; only present on match.
    #[serde(default)]
    pub pattern_points: Option<String>,
    pub results: ProcessResults,
}

impl ProcessResponse {
    /// Histogram bins flattened to plain counts.
    pub fn histogram_counts(&self) -> Vec<f64> {
        self.hist.iter().map(|bin| bin[0]).collect()
    }
}

/// Acknowledgement from `/queue-burst`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BurstAck {
    pub result: String,
    pub id: i64,
    pub msg: String,
}

impl BurstAck {
    pub fn is_ok(&self) -> bool {
        self.result == "ok"
    }
}

/// One scheduled capture burst, as listed by `/get-bursts`.
///
/// Immutable once queued; the only mutation the dashboard can request is
/// deletion. `progress` is the server-side completion percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Burst {
    pub id: i64,
    pub duration: u32,
    pub interval: u32,
    #[serde(flatten)]
    pub params: CameraParams,
    #[serde(default)]
    pub progress: u8,
}

/// Export format accepted by `/download-burst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstFormat {
    Raw,
    Jpeg,
    Mat,
}

impl BurstFormat {
    pub const ALL: [BurstFormat; 3] = [BurstFormat::Raw, BurstFormat::Jpeg, BurstFormat::Mat];

    /// Query-parameter value understood by the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            BurstFormat::Raw => "raw",
            BurstFormat::Jpeg => "jpeg",
            BurstFormat::Mat => "mat",
        }
    }

    /// Human-readable label for download links.
    pub fn label(&self) -> &'static str {
        match self {
            BurstFormat::Raw => "RAW",
            BurstFormat::Jpeg => "JPEG",
            BurstFormat::Mat => "MAT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_params_query_order() {
        let params = CameraParams {
            brightness: 120,
            gamma: 100,
            gain: 32,
            exposure: 500,
        };
        assert_eq!(
            params.to_query(),
            "brightness=120&gamma=100&gain=32&exposure=500"
        );
    }

    #[test]
    fn camera_params_parse_from_mapping() {
        let json = r#"{"brightness": 128, "gamma": 100, "gain": 16, "exposure": 200}"#;
        let params: CameraParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.exposure, 200);
    }

    #[test]
    fn process_response_histogram_flattens_nested_bins() {
        let json = r#"{
            "hist": [[12.0], [0.0], [3.0]],
            "b64_thresh_img": "abc",
            "results": {
                "pattern": {"type": "Error", "msg": "Pattern not found"},
                "threshold": {"type": "info", "msg": "Automatic threshold selected: 171"},
                "stars": {"type": "info", "msg": "Possible stars found in the image: 2"}
            }
        }"#;
        let resp: ProcessResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.histogram_counts(), vec![12.0, 0.0, 3.0]);
        assert!(!resp.pattern);
        assert!(resp.pattern_points.is_none());
        assert!(resp.results.labeled.is_none());
    }

    #[test]
    fn burst_flattens_camera_params() {
        let json = r#"{
            "id": 3, "duration": 60, "interval": 5,
            "brightness": 128, "gamma": 100, "gain": 16, "exposure": 100,
            "progress": 40
        }"#;
        let burst: Burst = serde_json::from_str(json).unwrap();
        assert_eq!(burst.id, 3);
        assert_eq!(burst.params.brightness, 128);
        assert_eq!(burst.progress, 40);
    }

    #[test]
    fn burst_ack_result_flag() {
        let ok: BurstAck = serde_json::from_str(
            r#"{"result": "ok", "id": 7, "msg": "The burst has been queued"}"#,
        )
        .unwrap();
        assert!(ok.is_ok());
        let err: BurstAck = serde_json::from_str(
            r#"{"result": "error", "id": -1, "msg": "Maximum number of frames(600) exceeded"}"#,
        )
        .unwrap();
        assert!(!err.is_ok());
    }
}
