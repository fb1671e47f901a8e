// Model exports
pub mod domain;
pub mod ingest;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Comment, DistanceResult, GeoError, GeoPoint, Issue, IssueLocation, IssueStatus, NewIssue, Priority};
pub use ingest::{parse_issues, IngestError, RawCoordinates, RawIssue};
pub use requests::{DistanceRequest, LocationErrorReport, NearbyIssuesRequest, PointPayload, SubmitIssueRequest, UpdateStatusRequest};
pub use responses::{DashboardStats, DistanceResponse, ErrorResponse, HealthResponse, LocationNotice};
