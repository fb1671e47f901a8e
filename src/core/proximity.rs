use crate::core::distance::{calculate_bounding_box, distance, is_within_bounding_box};
use crate::models::{DistanceResult, GeoPoint, Issue};

/// Anything that can be placed on the map.
///
/// Returning `None` means the entity has no usable coordinate and is left
/// out of every radius query.
pub trait Located {
    fn coordinates(&self) -> Option<GeoPoint>;
}

impl Located for GeoPoint {
    fn coordinates(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl Located for Issue {
    fn coordinates(&self) -> Option<GeoPoint> {
        self.location.coordinates
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coordinates(&self) -> Option<GeoPoint> {
        (**self).coordinates()
    }
}

/// Select the entities within `radius_km` of `origin`, nearest first
///
/// The boundary is inclusive and ties keep their input order. Returns an
/// empty vec when there is no origin, no entities, or the radius is
/// negative or not finite. The input slice is only borrowed.
pub fn filter_by_radius<'a, E: Located>(
    entities: &'a [E],
    origin: Option<GeoPoint>,
    radius_km: f64,
) -> Vec<DistanceResult<&'a E>> {
    let Some(origin) = origin else {
        return Vec::new();
    };

    if entities.is_empty() || !radius_km.is_finite() || radius_km < 0.0 {
        return Vec::new();
    }

    // Stage 1: bounding box pre-filter, Stage 2: exact Haversine check
    let bbox = calculate_bounding_box(&origin, radius_km);

    let mut results: Vec<DistanceResult<&'a E>> = entities
        .iter()
        .filter_map(|entity| {
            let point = entity.coordinates()?;
            if !is_within_bounding_box(&point, &bbox) {
                return None;
            }

            let distance_km = distance(&origin, &point);
            (distance_km <= radius_km).then_some(DistanceResult { entity, distance_km })
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::trace!(
        "Radius filter kept {} of {} entities within {}km of {}",
        results.len(),
        entities.len(),
        radius_km,
        origin
    );

    results
}
