use crate::models::GeoPoint;

/// Render a distance for display.
///
/// Below 1 km the value is shown in whole meters, below 10 km in kilometers
/// with one decimal, otherwise in whole kilometers. Rounding follows the
/// exact binary value and breaks exact ties upward, so labels match what a
/// browser renders for the same number. Negative or non-finite input
/// renders as `"0m"`.
pub fn format_distance(distance_km: f64) -> String {
    let km = if distance_km.is_finite() && distance_km > 0.0 { distance_km } else { 0.0 };

    if km < 1.0 {
        format!("{}m", (km * 1000.0).round())
    } else if km < 10.0 {
        format!("{}km", one_decimal(km))
    } else {
        format!("{}km", km.round())
    }
}

/// `km` to one decimal place.
///
/// The formatter already rounds the exact value, but it sends exact ties to
/// even, so those are pushed up by hand.
fn one_decimal(km: f64) -> String {
    let scaled = km * 10.0;
    if scaled.fract() == 0.5 && km.mul_add(10.0, -scaled) == 0.0 {
        format!("{:.1}", scaled.ceil() / 10.0)
    } else {
        format!("{:.1}", km)
    }
}

/// Short label for a point, used where no reverse geocoder is available
pub fn format_coordinates(point: &GeoPoint) -> String {
    point.to_string()
}
