//! Normalization boundary for issue records.
//!
//! Upstream producers disagree on where an issue's coordinate lives and what
//! its fields are called. Everything that enters the crate passes through
//! [`RawIssue::normalize`], which settles on a single [`GeoPoint`] so the rest
//! of the code never inspects field names.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::models::domain::{Comment, GeoError, GeoPoint, Issue, IssueLocation, IssueStatus, Priority};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Malformed issue payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Issue {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Issue {index}: invalid value for '{field}': {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Issue {index}: {source}")]
    InvalidCoordinates {
        index: usize,
        #[source]
        source: GeoError,
    },
}

/// Coordinate object in either of the two shapes seen in the wild
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinates {
    Short { lat: f64, lng: f64 },
    Long { latitude: f64, longitude: f64 },
}

impl RawCoordinates {
    pub fn into_parts(self) -> (f64, f64) {
        match self {
            RawCoordinates::Short { lat, lng } => (lat, lng),
            RawCoordinates::Long { latitude, longitude } => (latitude, longitude),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
}

/// An issue record as produced by the mock data set or a backend
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIssue {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub reported_by: Option<String>,
    #[serde(default)]
    pub reported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(default)]
    pub coordinates: Option<RawCoordinates>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl RawIssue {
    /// Resolve the record's coordinate.
    ///
    /// Precedence: `location.coordinates`, then top-level `coordinates`, then
    /// flat `latitude`/`longitude`. `Ok(None)` means the record carries no
    /// coordinate at all.
    fn resolve_coordinates(&self, index: usize) -> Result<Option<GeoPoint>, IngestError> {
        let nested = self.location.as_ref().and_then(|l| l.coordinates);

        let raw = match (nested, self.coordinates, self.latitude, self.longitude) {
            (Some(c), _, _, _) | (None, Some(c), _, _) => Some(c.into_parts()),
            (None, None, Some(lat), Some(lng)) => Some((lat, lng)),
            (None, None, Some(_), None) => {
                return Err(IngestError::MissingField { index, field: "longitude" })
            }
            (None, None, None, Some(_)) => {
                return Err(IngestError::MissingField { index, field: "latitude" })
            }
            (None, None, None, None) => None,
        };

        raw.map(|(lat, lng)| GeoPoint::new(lat, lng))
            .transpose()
            .map_err(|source| IngestError::InvalidCoordinates { index, source })
    }

    /// Convert into a domain [`Issue`], using `fallback_id` when the record has
    /// no id of its own. `index` only labels errors.
    pub fn normalize(self, index: usize, fallback_id: u64) -> Result<Issue, IngestError> {
        let coordinates = self.resolve_coordinates(index)?;

        let title = self
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(IngestError::MissingField { index, field: "title" })?;

        let status = match self.status.as_deref() {
            Some(s) => s
                .parse::<IssueStatus>()
                .map_err(|reason| IngestError::InvalidField { index, field: "status", reason })?,
            None => IssueStatus::Open,
        };

        let priority = match self.priority.as_deref() {
            Some(p) => p
                .parse::<Priority>()
                .map_err(|reason| IngestError::InvalidField { index, field: "priority", reason })?,
            None => Priority::default(),
        };

        let address = self
            .location
            .as_ref()
            .and_then(|l| l.address.clone())
            .or(self.address)
            .unwrap_or_default();

        Ok(Issue {
            id: self.id.unwrap_or(fallback_id),
            title,
            description: self.description,
            category: self.category.unwrap_or_else(|| "Other".to_string()),
            status,
            priority,
            reported_by: self.reported_by.unwrap_or_else(|| "Anonymous".to_string()),
            reported_at: self.reported_at.unwrap_or_else(Utc::now),
            last_updated: self.last_updated,
            location: IssueLocation { address, coordinates },
            images: self.images,
            upvotes: self.upvotes,
            comments: self.comments,
        })
    }
}

/// Parse a JSON array of raw issue records into normalized issues.
///
/// Records without an id receive ids above the largest explicit one, in
/// input order.
pub fn parse_issues(json: &str) -> Result<Vec<Issue>, IngestError> {
    let raw: Vec<RawIssue> = serde_json::from_str(json)?;

    let mut next_id = raw.iter().filter_map(|r| r.id).max().unwrap_or(0).checked_add(1);

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            let fallback_id = match record.id {
                Some(id) => id,
                None => {
                    let id = next_id.ok_or_else(|| IngestError::InvalidField {
                        index,
                        field: "id",
                        reason: "no id left above the largest explicit id".to_string(),
                    })?;
                    next_id = id.checked_add(1);
                    id
                }
            };
            record.normalize(index, fallback_id)
        })
        .collect()
}
