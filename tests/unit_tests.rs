// Unit tests for Civic Proximity

use civic_proximity::core::{
    distance::{distance, haversine_distance, is_valid_coordinates},
    filter_by_radius,
    format::format_distance,
};
use civic_proximity::models::GeoPoint;

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

/// Spread of valid points, poles and antimeridian included
fn sample_points() -> Vec<GeoPoint> {
    let mut points = Vec::new();
    for lat in (-90..=90).step_by(15) {
        for lon in (-180..=180).step_by(30) {
            points.push(point(lat as f64, lon as f64));
        }
    }
    points.push(point(30.7333, 76.7794));
    points.push(point(-33.8688, 151.2093));
    points
}

#[test]
fn test_distance_to_self_is_zero() {
    for p in sample_points() {
        assert!(distance(&p, &p) < 1e-9, "distance({:?}, itself) = {}", p, distance(&p, &p));
    }
}

#[test]
fn test_distance_is_symmetric() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let ab = distance(a, b);
            let ba = distance(b, a);
            assert!((ab - ba).abs() < 1e-9, "{:?} <-> {:?}: {} vs {}", a, b, ab, ba);
        }
    }
}

#[test]
fn test_distance_is_finite_and_non_negative() {
    let points = sample_points();
    for a in &points {
        for b in &points {
            let d = distance(a, b);
            assert!(d.is_finite() && d >= 0.0);
        }
    }
}

#[test]
fn test_new_york_to_los_angeles() {
    let d = distance(&point(40.7128, -74.0060), &point(34.0522, -118.2437));
    assert!(d >= 3935.0 && d <= 3945.0, "Expected 3935-3945km, got {}", d);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let manhattan_lat = 40.7580;
    let manhattan_lon = -73.9855;
    let brooklyn_lat = 40.6782;
    let brooklyn_lon = -73.9442;

    let distance = haversine_distance(manhattan_lat, manhattan_lon, brooklyn_lat, brooklyn_lon);
    assert!(distance > 5.0 && distance < 15.0);
}

#[test]
fn test_coordinate_validation() {
    assert!(!is_valid_coordinates(91.0, 0.0));
    assert!(!is_valid_coordinates(45.0, 200.0));
    assert!(is_valid_coordinates(45.0, -73.5));
}

#[test]
fn test_format_distance_fixtures() {
    assert_eq!(format_distance(0.045), "45m");
    assert_eq!(format_distance(3.456), "3.5km");
    assert_eq!(format_distance(12.7), "13km");
    assert_eq!(format_distance(0.5), "500m");
}

#[test]
fn test_filter_empty_for_any_origin() {
    let empty: Vec<GeoPoint> = Vec::new();
    for origin in sample_points() {
        assert!(filter_by_radius(&empty, Some(origin), 5.0).is_empty());
    }
}

#[test]
fn test_zero_radius_only_coincident() {
    let points = sample_points();
    let origin = point(30.7333, 76.7794);

    let results = filter_by_radius(&points, Some(origin), 0.0);

    assert_eq!(results.len(), 1);
    assert_eq!(*results[0].entity, origin);
}

#[test]
fn test_smaller_radius_is_subset() {
    let points = sample_points();
    let radii = [0.0, 100.0, 1000.0, 2500.0, 5000.0, 10000.0, 20100.0];

    for origin in [point(30.7333, 76.7794), point(0.0, 180.0), point(90.0, 0.0)] {
        for pair in radii.windows(2) {
            let inner = filter_by_radius(&points, Some(origin), pair[0]);
            let outer = filter_by_radius(&points, Some(origin), pair[1]);

            for r in &inner {
                assert!(
                    outer.iter().any(|o| std::ptr::eq(o.entity, r.entity)),
                    "{:?} within {}km but not within {}km",
                    r.entity,
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn test_results_sorted_non_decreasing() {
    let points = sample_points();
    let results = filter_by_radius(&points, Some(point(10.0, 10.0)), 8000.0);

    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert!(pair[0].distance_km <= pair[1].distance_km);
    }
}

#[test]
fn test_whole_globe_radius_keeps_everything() {
    let points = sample_points();
    // Half the circumference covers the antipode
    let results = filter_by_radius(&points, Some(point(12.0, 34.0)), 20100.0);
    assert_eq!(results.len(), points.len());
}

#[test]
fn test_input_untouched() {
    let points = sample_points();
    let before = points.clone();

    let _ = filter_by_radius(&points, Some(point(0.0, 0.0)), 5000.0);

    assert_eq!(points, before);
}
