use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::distance::{is_valid_latitude, is_valid_longitude};
use crate::models::ingest::RawCoordinates;

/// Errors raised when a coordinate pair cannot become a [`GeoPoint`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("Invalid latitude {0}: must be a finite number in [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Invalid longitude {0}: must be a finite number in [-180, 180]")]
    InvalidLongitude(f64),
}

/// A validated latitude/longitude pair in degrees.
///
/// The fields are private so every `GeoPoint` in the crate satisfies the
/// range invariant. Deserialization accepts both `{lat, lng}` and
/// `{latitude, longitude}`; serialization always emits the long form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !is_valid_latitude(latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !is_valid_longitude(longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }

        Ok(Self { latitude, longitude })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<RawCoordinates> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        let (latitude, longitude) = raw.into_parts();
        Self::new(latitude, longitude)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Triage state of a reported issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "Open",
            IssueStatus::InProgress => "In Progress",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "open" => Ok(IssueStatus::Open),
            "in progress" | "inprogress" => Ok(IssueStatus::InProgress),
            "resolved" => Ok(IssueStatus::Resolved),
            "closed" => Ok(IssueStatus::Closed),
            other => Err(format!(
                "unknown status '{}', expected one of: Open, In Progress, Resolved, Closed",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(format!(
                "unknown priority '{}', expected one of: Low, Medium, High, Critical",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Where an issue was reported. `coordinates` is `None` when the reporter
/// supplied only an address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLocation {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
}

/// A civic issue after ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: IssueStatus,
    pub priority: Priority,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub location: IssueLocation,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Fields a reporter provides when submitting a new issue
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub reported_by: String,
    pub address: String,
    pub coordinates: GeoPoint,
    pub images: Vec<String>,
}

/// An entity paired with its great-circle distance from a query origin.
///
/// Produced fresh by every radius query; the entity is usually borrowed from
/// the caller's collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult<T> {
    #[serde(flatten)]
    pub entity: T,
    pub distance_km: f64,
}

impl<T: Clone> DistanceResult<&T> {
    /// Detach the result from the borrowed collection
    pub fn cloned(&self) -> DistanceResult<T> {
        DistanceResult {
            entity: self.entity.clone(),
            distance_km: self.distance_km,
        }
    }
}

/// Geospatial bounding box in degrees.
///
/// `min_lon` may be below -180 or `max_lon` above 180 when the box crosses
/// the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon < -180.0 || self.max_lon > 180.0
    }
}
