//! Transverse Mercator projection and its UTM specialisation.
//!
//! Landsat Collection 2 scenes are distributed on the UTM grid of the zone
//! they were acquired in (WGS84, EPSG:326zz north / 327zz south). Only the
//! forward transform is needed to turn a lon/lat window into scene pixels.
//!
//! Formulas follow the series expansion in Snyder, "Map Projections - A
//! Working Manual" (USGS PP 1395), eq. 8-9 to 8-10 and 3-21, which is
//! accurate to well under a metre within a 6° zone.

use std::f64::consts::PI;

/// WGS84 semi-major axis (meters)
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// UTM scale factor on the central meridian
const UTM_K0: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Transverse Mercator projection parameters.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// Semi-major axis (meters)
    pub a: f64,
    /// First eccentricity squared
    pub e2: f64,
    /// Central meridian in radians
    pub lon0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    /// Second eccentricity squared
    ep2: f64,
}

impl TransverseMercator {
    /// Create a projection on an ellipsoid given by semi-major axis and
    /// eccentricity squared.
    pub fn new(
        a: f64,
        e2: f64,
        lon0_deg: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        Self {
            a,
            e2,
            lon0: lon0_deg.to_radians(),
            k0,
            false_easting,
            false_northing,
            ep2: e2 / (1.0 - e2),
        }
    }

    /// UTM zone on WGS84.
    ///
    /// # Arguments
    /// * `zone` - Zone number, 1..=60
    /// * `north` - Northern hemisphere (no false northing) if true
    pub fn utm(zone: u8, north: bool) -> Self {
        let lon0 = (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0;
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let false_northing = if north { 0.0 } else { UTM_FALSE_NORTHING_SOUTH };
        Self::new(WGS84_A, e2, lon0, UTM_K0, UTM_FALSE_EASTING, false_northing)
    }

    /// Convert geographic coordinates (degrees) to projected (x, y) meters.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let phi = lat_deg.to_radians();
        let mut dlon = lon_deg.to_radians() - self.lon0;
        // Normalize longitude difference to [-π, π]
        while dlon > PI {
            dlon -= 2.0 * PI;
        }
        while dlon < -PI {
            dlon += 2.0 * PI;
        }

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = self.a / (1.0 - self.e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = self.ep2 * cos_phi * cos_phi;
        let a = cos_phi * dlon;
        let m = self.meridian_arc(phi);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let x = self.k0
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a5 / 120.0);

        let y = self.k0
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a6 / 720.0));

        (x + self.false_easting, y + self.false_northing)
    }

    /// Distance along the meridian from the equator to latitude `phi`.
    fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        self.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snyder_worked_example() {
        // Snyder p. 269: Clarke 1866, phi=40.5, lambda=-73.5, lambda0=-75
        let tm = TransverseMercator::new(6_378_206.4, 0.006_768_66, -75.0, 0.9996, 0.0, 0.0);
        let (x, y) = tm.forward(-73.5, 40.5);
        assert!((x - 127_106.5).abs() < 1.0, "x = {}", x);
        assert!((y - 4_484_124.4).abs() < 1.0, "y = {}", y);
    }

    #[test]
    fn test_central_meridian_on_equator() {
        let tm = TransverseMercator::utm(10, true);
        let (x, y) = tm.forward(-123.0, 0.0);
        assert!((x - 500_000.0).abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn test_symmetric_about_central_meridian() {
        let tm = TransverseMercator::utm(10, true);
        let (x_east, y_east) = tm.forward(-122.0, 47.6);
        let (x_west, y_west) = tm.forward(-124.0, 47.6);
        assert!(((x_east - 500_000.0) + (x_west - 500_000.0)).abs() < 1e-6);
        assert!((y_east - y_west).abs() < 1e-6);
    }

    #[test]
    fn test_southern_false_northing() {
        let tm = TransverseMercator::utm(56, false);
        let (_, y) = tm.forward(153.0, -33.87);
        // Sydney lies roughly 3.75e6 m south of the equator
        assert!(y > 6_200_000.0 && y < 6_300_000.0, "y = {}", y);
    }
}
