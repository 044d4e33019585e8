//! Coordinate reference system transformations.
//!
//! Implements the projections scene assets are delivered in, from scratch
//! without external dependencies.

pub mod polar;
pub mod utm;

pub use polar::PolarStereographic;
pub use utm::TransverseMercator;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("Unsupported CRS: EPSG:{0}")]
    UnsupportedEpsg(u32),

    #[error("Invalid CRS code: {0}")]
    InvalidCode(String),
}

/// The CRS a scene's pixels are laid out in.
#[derive(Debug, Clone)]
pub enum SceneCrs {
    /// EPSG:4326, coordinates already lon/lat
    Geographic,
    /// WGS84 / UTM
    Utm {
        zone: u8,
        north: bool,
        projection: TransverseMercator,
    },
    /// EPSG:3031, Antarctic Polar Stereographic
    AntarcticPolar { projection: PolarStereographic },
}

impl SceneCrs {
    /// Resolve an EPSG code.
    ///
    /// Supports EPSG:4326, the WGS84 UTM zones (32601-32660 north,
    /// 32701-32760 south) and EPSG:3031.
    pub fn from_epsg(code: u32) -> Result<Self, ProjectionError> {
        match code {
            4326 => Ok(SceneCrs::Geographic),
            32601..=32660 => Ok(Self::utm((code - 32600) as u8, true)),
            32701..=32760 => Ok(Self::utm((code - 32700) as u8, false)),
            3031 => Ok(SceneCrs::AntarcticPolar {
                projection: PolarStereographic::antarctic(),
            }),
            other => Err(ProjectionError::UnsupportedEpsg(other)),
        }
    }

    /// Resolve an authority string such as `"EPSG:32610"`.
    pub fn from_code(code: &str) -> Result<Self, ProjectionError> {
        let number = code
            .trim()
            .strip_prefix("EPSG:")
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| ProjectionError::InvalidCode(code.to_string()))?;
        Self::from_epsg(number)
    }

    fn utm(zone: u8, north: bool) -> Self {
        SceneCrs::Utm {
            zone,
            north,
            projection: TransverseMercator::utm(zone, north),
        }
    }

    /// Project a lon/lat point (degrees) into this CRS.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        match self {
            SceneCrs::Geographic => (lon, lat),
            SceneCrs::Utm { projection, .. } => projection.forward(lon, lat),
            SceneCrs::AntarcticPolar { projection } => projection.forward(lon, lat),
        }
    }

    /// Envelope `(min_x, min_y, max_x, max_y)` of projected points.
    pub fn project_envelope(&self, points: &[(f64, f64)]) -> Option<(f64, f64, f64, f64)> {
        if points.is_empty() {
            return None;
        }
        let mut envelope = (
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for &(lon, lat) in points {
            let (x, y) = self.project(lon, lat);
            envelope.0 = envelope.0.min(x);
            envelope.1 = envelope.1.min(y);
            envelope.2 = envelope.2.max(x);
            envelope.3 = envelope.3.max(y);
        }
        Some(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_epsg_utm_zones() {
        match SceneCrs::from_epsg(32610).unwrap() {
            SceneCrs::Utm { zone, north, .. } => {
                assert_eq!(zone, 10);
                assert!(north);
            }
            other => panic!("unexpected {:?}", other),
        }
        match SceneCrs::from_epsg(32756).unwrap() {
            SceneCrs::Utm { zone, north, .. } => {
                assert_eq!(zone, 56);
                assert!(!north);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_from_epsg_unsupported() {
        assert_eq!(
            SceneCrs::from_epsg(3857).unwrap_err(),
            ProjectionError::UnsupportedEpsg(3857)
        );
    }

    #[test]
    fn test_from_code() {
        assert!(matches!(
            SceneCrs::from_code("EPSG:4326").unwrap(),
            SceneCrs::Geographic
        ));
        assert!(SceneCrs::from_code("OGC:CRS84").is_err());
    }

    #[test]
    fn test_geographic_envelope_is_identity() {
        let crs = SceneCrs::Geographic;
        let env = crs
            .project_envelope(&[(-1.0, 2.0), (3.0, -4.0)])
            .unwrap();
        assert_eq!(env, (-1.0, -4.0, 3.0, 2.0));
    }

    #[test]
    fn test_utm_envelope_contains_projected_corners() {
        let crs = SceneCrs::from_epsg(32610).unwrap();
        let points = [(-122.27, 47.54), (-121.94, 47.74)];
        let (min_x, min_y, max_x, max_y) = crs.project_envelope(&points).unwrap();
        for &(lon, lat) in &points {
            let (x, y) = crs.project(lon, lat);
            assert!(x >= min_x && x <= max_x);
            assert!(y >= min_y && y <= max_y);
        }
        assert!(min_x > 500_000.0, "east of the central meridian");
    }

    #[test]
    fn test_antarctic_envelope() {
        let crs = SceneCrs::from_code("EPSG:3031").unwrap();
        assert!(matches!(crs, SceneCrs::AntarcticPolar { .. }));

        // McMurdo Dry Valleys, on the Ross Sea side of the pole
        let (min_x, min_y, max_x, max_y) = crs
            .project_envelope(&[(161.5, -77.7), (163.0, -77.3)])
            .unwrap();
        assert!(min_x > 0.0 && max_x < 500_000.0, "x {}..{}", min_x, max_x);
        assert!(max_y < -1_000_000.0 && min_y > -1_500_000.0, "y {}..{}", min_y, max_y);
    }
}
