use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for the nearby-issues dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyIssuesRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[validate(range(min = 0.0))]
    #[serde(default, alias = "radius")]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub search: Option<String>,
    /// Set when the client failed to acquire a position
    #[serde(default)]
    pub location_error: Option<LocationErrorReport>,
}

/// Geolocation failure as reported by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationErrorReport {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request to report a new issue
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIssueRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub reported_by: Option<String>,
    #[serde(default)]
    pub address: String,
    /// Range-checked when converted to a `GeoPoint`
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Admin request to move an issue to a new status
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub admin_comment: Option<String>,
}

/// Request to measure the distance between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceRequest {
    pub from: PointPayload,
    pub to: PointPayload,
}

/// Unvalidated coordinate pair as it arrives over the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointPayload {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
}
