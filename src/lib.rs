//! Civic Proximity - location-aware issue dashboard for civic issue reporting
//!
//! This library provides the proximity engine behind the dashboard: great-circle
//! distances, radius filtering with nearest-first ordering, coordinate
//! validation and distance formatting, plus the in-memory issue store and
//! HTTP routes that serve it.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance, filter_by_radius, format_distance, is_valid_coordinates, Dashboard, Located};
pub use crate::models::{DistanceResult, GeoPoint, Issue, IssueStatus};
