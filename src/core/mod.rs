// Core algorithm exports
pub mod dashboard;
pub mod distance;
pub mod filters;
pub mod format;
pub mod geolocation;
pub mod proximity;

pub use dashboard::{Dashboard, DashboardEntry, DashboardQuery, DashboardSettings, DashboardView};
pub use distance::{calculate_bounding_box, distance, haversine_distance, is_valid_coordinates, is_within_bounding_box, EARTH_RADIUS_KM};
pub use filters::{calculate_stats, matches_search, matches_status, StatusFilter};
pub use format::{format_coordinates, format_distance};
pub use geolocation::{DeviceFix, LocationError};
pub use proximity::{filter_by_radius, Located};
