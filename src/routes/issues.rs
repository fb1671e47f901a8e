use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    distance, format_distance, Dashboard, DashboardQuery, DeviceFix, LocationError, StatusFilter,
};
use crate::error::ApiError;
use crate::models::{
    DistanceRequest, DistanceResponse, GeoPoint, HealthResponse, IssueStatus, LocationNotice,
    NearbyIssuesRequest, NewIssue, PointPayload, Priority, SubmitIssueRequest, UpdateStatusRequest,
};
use crate::services::IssueStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<IssueStore>,
    pub dashboard: Dashboard,
}

/// Configure all issue-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/distance", web::post().to(measure_distance))
        .route("/issues", web::get().to(list_issues))
        .route("/issues", web::post().to(submit_issue))
        .route("/issues/nearby", web::post().to(nearby_issues))
        .route("/issues/{id}", web::get().to(get_issue))
        .route("/issues/{id}/status", web::patch().to(update_status))
        .route("/issues/{id}/upvote", web::post().to(upvote_issue));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        issues: state.store.len().await,
        timestamp: chrono::Utc::now(),
    })
}

fn to_geo_point(point: PointPayload) -> Result<GeoPoint, ApiError> {
    Ok(GeoPoint::new(point.latitude, point.longitude)?)
}

/// Distance between two points
///
/// POST /api/v1/distance
///
/// Request body:
/// ```json
/// { "from": { "lat": 30.7333, "lng": 76.7794 }, "to": { "latitude": 30.77, "longitude": 76.7401 } }
/// ```
async fn measure_distance(req: web::Json<DistanceRequest>) -> Result<HttpResponse, ApiError> {
    let from = to_geo_point(req.from)?;
    let to = to_geo_point(req.to)?;

    let distance_km = distance(&from, &to);

    Ok(HttpResponse::Ok().json(DistanceResponse {
        distance_km,
        label: format_distance(distance_km),
    }))
}

/// Dashboard view around the user's location
///
/// POST /api/v1/issues/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 30.7333,
///   "longitude": 76.7794,
///   "radiusKm": 5,
///   "status": "open",
///   "search": "pothole"
/// }
/// ```
///
/// Without a location every issue is returned, unsorted and without
/// distances. A `locationError` from the client is turned into a message
/// the UI can show next to that list.
async fn nearby_issues(
    state: web::Data<AppState>,
    req: web::Json<NearbyIssuesRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let fix = DeviceFix {
        latitude: req.latitude,
        longitude: req.longitude,
        accuracy: req.accuracy,
        timestamp: req.timestamp,
    };

    let origin = if fix.is_empty() {
        None
    } else {
        match (req.latitude, req.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)?),
            _ => {
                return Err(ApiError::BadRequest(
                    "latitude and longitude must be provided together".to_string(),
                ))
            }
        }
    };

    let status = match req.status.as_deref() {
        Some(s) => s.parse::<StatusFilter>().map_err(ApiError::BadRequest)?,
        None => StatusFilter::All,
    };

    let location_notice = req.location_error.as_ref().map(|report| {
        let error = LocationError::from_code(report.code, report.message.as_deref());
        tracing::debug!("Client reported location failure: {}", error);
        LocationNotice {
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    });

    let query = DashboardQuery {
        origin,
        radius_km: req.radius_km,
        status,
        search: req.search.clone(),
    };

    let issues = state.store.read().await;
    let view = state.dashboard.view(&issues, &query);

    tracing::info!(
        "Returning {} issues (origin: {:?}, accuracy: {:?}m, radius: {}km)",
        view.issues.len(),
        fix.to_geo_point().map(|p| p.to_string()),
        fix.accuracy,
        view.radius_km
    );

    let mut body = serde_json::to_value(&view).map_err(|e| ApiError::Internal(e.to_string()))?;
    if let (Some(notice), Some(obj)) = (location_notice, body.as_object_mut()) {
        let notice = serde_json::to_value(notice).map_err(|e| ApiError::Internal(e.to_string()))?;
        obj.insert("locationNotice".to_string(), notice);
    }

    Ok(HttpResponse::Ok().json(body))
}

/// All issues, as stored
async fn list_issues(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.list().await)
}

async fn get_issue(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let issue = state.store.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(issue))
}

/// Report a new issue
///
/// POST /api/v1/issues
async fn submit_issue(
    state: web::Data<AppState>,
    req: web::Json<SubmitIssueRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let req = req.into_inner();
    let coordinates = GeoPoint::new(req.latitude, req.longitude)?;
    let priority = match req.priority.as_deref() {
        Some(p) => p.parse::<Priority>().map_err(ApiError::BadRequest)?,
        None => Priority::default(),
    };

    let issue = state
        .store
        .submit(NewIssue {
            title: req.title,
            description: req.description,
            category: req.category,
            priority,
            reported_by: req.reported_by.unwrap_or_else(|| "Anonymous".to_string()),
            address: req.address,
            coordinates,
            images: req.images,
        })
        .await?;

    Ok(HttpResponse::Created().json(issue))
}

/// Admin triage
///
/// PATCH /api/v1/issues/{id}/status
///
/// Request body:
/// ```json
/// { "status": "In Progress", "adminComment": "Crew dispatched" }
/// ```
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let status = req.status.parse::<IssueStatus>().map_err(ApiError::BadRequest)?;
    let issue = state
        .store
        .update_status(path.into_inner(), status, req.admin_comment.clone())
        .await?;

    Ok(HttpResponse::Ok().json(issue))
}

async fn upvote_issue(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let issue = state.store.upvote(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(issue))
}
