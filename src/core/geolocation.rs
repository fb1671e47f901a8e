use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::GeoPoint;

/// Geolocation error codes as reported by browsers
pub const PERMISSION_DENIED: u16 = 1;
pub const POSITION_UNAVAILABLE: u16 = 2;
pub const TIMEOUT: u16 = 3;

/// Why a device position could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location access denied by user. Please enable location permissions in your browser settings.")]
    PermissionDenied,

    #[error("Location information is unavailable. Please check your GPS or internet connection.")]
    PositionUnavailable,

    #[error("Location request timed out. Please try again.")]
    Timeout,

    #[error("Geolocation is not supported by this browser")]
    Unsupported,

    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    pub fn from_code(code: u16, message: Option<&str>) -> Self {
        match code {
            PERMISSION_DENIED => LocationError::PermissionDenied,
            POSITION_UNAVAILABLE => LocationError::PositionUnavailable,
            TIMEOUT => LocationError::Timeout,
            _ => LocationError::Other(message.unwrap_or("unknown error").to_string()),
        }
    }

    /// Whether asking again without user action can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, LocationError::PositionUnavailable | LocationError::Timeout)
    }
}

/// A position fix as delivered by a device
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceFix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub timestamp: Option<i64>,
}

impl DeviceFix {
    /// The fix as a validated point, or `None` when either component is
    /// missing or out of range
    pub fn to_geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng).ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LocationError::from_code(1, None), LocationError::PermissionDenied);
        assert_eq!(LocationError::from_code(2, None), LocationError::PositionUnavailable);
        assert_eq!(LocationError::from_code(3, None), LocationError::Timeout);
        assert_eq!(
            LocationError::from_code(9, Some("kaboom")).to_string(),
            "Location error: kaboom"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            LocationError::Timeout.to_string(),
            "Location request timed out. Please try again."
        );
        assert!(LocationError::PermissionDenied.to_string().starts_with("Location access denied"));
    }

    #[test]
    fn test_retryable() {
        assert!(LocationError::Timeout.is_retryable());
        assert!(!LocationError::PermissionDenied.is_retryable());
    }

    #[test]
    fn test_fix_validation() {
        let fix = DeviceFix {
            latitude: Some(30.7333),
            longitude: Some(76.7794),
            accuracy: Some(12.0),
            timestamp: Some(1_705_312_200_000),
        };
        assert!(fix.to_geo_point().is_some());

        let garbage = DeviceFix { latitude: Some(300.0), longitude: Some(0.0), ..Default::default() };
        assert!(garbage.to_geo_point().is_none());

        let partial = DeviceFix { latitude: Some(30.0), ..Default::default() };
        assert!(partial.to_geo_point().is_none());
        assert!(!partial.is_empty());
        assert!(DeviceFix::default().is_empty());
    }
}
