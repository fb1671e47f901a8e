use serde::Serialize;

use crate::core::{
    filters::{calculate_stats, matches_search, matches_status, StatusFilter},
    format::format_distance,
    proximity::filter_by_radius,
};
use crate::models::{DashboardStats, GeoPoint, Issue};

/// Radius limits applied to dashboard queries
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub default_radius_km: f64,
    pub max_radius_km: f64,
    pub radius_options_km: Vec<f64>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_radius_km: 5.0,
            max_radius_km: 25.0,
            radius_options_km: vec![1.0, 2.0, 5.0, 10.0, 25.0],
        }
    }
}

/// What the user asked the dashboard for
#[derive(Debug, Clone, Default)]
pub struct DashboardQuery {
    pub origin: Option<GeoPoint>,
    pub radius_km: Option<f64>,
    pub status: StatusFilter,
    pub search: Option<String>,
}

/// One row of the issue list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_label: Option<String>,
}

/// Filtered issue list plus the numbers shown around it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub issues: Vec<DashboardEntry<'a>>,
    pub stats: DashboardStats,
    pub origin: Option<GeoPoint>,
    pub radius_km: f64,
    pub radius_options_km: Vec<f64>,
}

/// Dashboard pipeline
///
/// # Pipeline Stages
/// 1. Radius filter around the user's location, nearest first (skipped
///    when no location is known, leaving the list unfiltered)
/// 2. Free-text search
/// 3. Status filter
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(settings: DashboardSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Radius to use for a query: the configured default when absent or not
    /// a number, clamped to `[0, max_radius_km]`
    pub fn effective_radius(&self, requested: Option<f64>) -> f64 {
        let radius = requested
            .filter(|r| !r.is_nan())
            .unwrap_or(self.settings.default_radius_km);
        radius.clamp(0.0, self.settings.max_radius_km)
    }

    pub fn view<'a>(&self, issues: &'a [Issue], query: &DashboardQuery) -> DashboardView<'a> {
        let radius_km = self.effective_radius(query.radius_km);

        // Stage 1: proximity
        let located: Vec<DashboardEntry<'a>> = match query.origin {
            Some(origin) => filter_by_radius(issues, Some(origin), radius_km)
                .into_iter()
                .map(|result| DashboardEntry {
                    issue: result.entity,
                    distance_km: Some(result.distance_km),
                    distance_label: Some(format_distance(result.distance_km)),
                })
                .collect(),
            None => issues
                .iter()
                .map(|issue| DashboardEntry {
                    issue,
                    distance_km: None,
                    distance_label: None,
                })
                .collect(),
        };

        let search = query.search.as_deref().unwrap_or("");

        // Stages 2 & 3: search and status
        let entries: Vec<DashboardEntry<'a>> = located
            .into_iter()
            .filter(|entry| matches_search(entry.issue, search))
            .filter(|entry| matches_status(entry.issue, query.status))
            .collect();

        let mut stats = calculate_stats(entries.iter().map(|entry| entry.issue));
        if query.origin.is_some() {
            stats.nearby = stats.total;
        }

        tracing::debug!(
            "Dashboard view: {} of {} issues (origin: {}, radius: {}km)",
            entries.len(),
            issues.len(),
            query.origin.is_some(),
            radius_km
        );

        DashboardView {
            issues: entries,
            stats,
            origin: query.origin,
            radius_km,
            radius_options_km: self.settings.radius_options_km.clone(),
        }
    }
}
