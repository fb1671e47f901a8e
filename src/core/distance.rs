use std::f64::consts::{FRAC_PI_2, PI};

use crate::models::{BoundingBox, GeoPoint};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Widening applied to every bounding box edge so a point whose Haversine
/// distance lands exactly on the radius is never clipped by rounding.
const BBOX_SLACK_DEG: f64 = 1e-9;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers. Inputs are not range-checked; use
/// [`is_valid_coordinates`] or [`GeoPoint::new`] first.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // a can drift a hair above 1.0 for antipodal points
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Great-circle distance between two validated points in kilometers
#[inline]
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_distance(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

#[inline]
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

#[inline]
pub fn is_valid_longitude(lng: f64) -> bool {
    lng.is_finite() && (-180.0..=180.0).contains(&lng)
}

/// True iff both values are finite and inside the latitude/longitude ranges
#[inline]
pub fn is_valid_coordinates(lat: f64, lng: f64) -> bool {
    is_valid_latitude(lat) && is_valid_longitude(lng)
}

/// Calculate the bounding box of a spherical cap around a center point
///
/// Cheaper than Haversine for pre-filtering. The box is exact for the
/// sphere used by [`haversine_distance`], so every point within
/// `radius_km` of `center` falls inside it. When the cap reaches a pole the
/// box spans all longitudes; when it crosses the antimeridian the longitude
/// bounds extend past ±180.
pub fn calculate_bounding_box(center: &GeoPoint, radius_km: f64) -> BoundingBox {
    let angular = radius_km.max(0.0) / EARTH_RADIUS_KM;
    let lat = center.latitude().to_radians();
    let lon = center.longitude().to_radians();

    let min_lat = lat - angular;
    let max_lat = lat + angular;

    let (min_lat, max_lat, min_lon, max_lon) = if min_lat > -FRAC_PI_2 && max_lat < FRAC_PI_2 {
        let delta_lon = (angular.sin() / lat.cos()).asin();
        (min_lat, max_lat, lon - delta_lon, lon + delta_lon)
    } else {
        // Cap contains a pole
        (min_lat.max(-FRAC_PI_2), max_lat.min(FRAC_PI_2), -PI, PI)
    };

    BoundingBox {
        min_lat: min_lat.to_degrees() - BBOX_SLACK_DEG,
        max_lat: max_lat.to_degrees() + BBOX_SLACK_DEG,
        min_lon: min_lon.to_degrees() - BBOX_SLACK_DEG,
        max_lon: max_lon.to_degrees() + BBOX_SLACK_DEG,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: &GeoPoint, bbox: &BoundingBox) -> bool {
    let lat = point.latitude();
    let lon = point.longitude();

    if lat < bbox.min_lat || lat > bbox.max_lat {
        return false;
    }

    if bbox.min_lon < -180.0 {
        lon >= bbox.min_lon + 360.0 || lon <= bbox.max_lon
    } else if bbox.max_lon > 180.0 {
        lon >= bbox.min_lon || lon <= bbox.max_lon - 360.0
    } else {
        lon >= bbox.min_lon && lon <= bbox.max_lon
    }
}
