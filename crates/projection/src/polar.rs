//! Polar stereographic projection with a standard parallel.
//!
//! Landsat Collection 2 scenes over Antarctica are delivered on the
//! Antarctic Polar Stereographic grid (EPSG:3031, true scale at 71°S).
//! Forward formulas are Snyder's ellipsoidal polar case (eq. 15-9, 14-15,
//! 21-30, 21-31, 21-34); the southern aspect negates latitude, longitude
//! and the output axes.

use std::f64::consts::FRAC_PI_4;

use crate::utm::{WGS84_A, WGS84_F};

#[derive(Debug, Clone)]
pub struct PolarStereographic {
    /// Semi-major axis (meters)
    pub a: f64,
    /// First eccentricity
    pub e: f64,
    /// Central meridian in radians
    pub lon0: f64,
    /// Latitude of true scale in radians, negative for the south pole
    pub lat_ts: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    south: bool,
    /// a * m_c / t_c, constant for the projection
    rho_scale: f64,
}

impl PolarStereographic {
    pub fn new(
        a: f64,
        e2: f64,
        lon0_deg: f64,
        lat_ts_deg: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let e = e2.sqrt();
        let south = lat_ts_deg < 0.0;
        let phi_c = lat_ts_deg.abs().to_radians();

        let m_c = phi_c.cos() / (1.0 - e2 * phi_c.sin().powi(2)).sqrt();
        let t_c = conformal_t(phi_c, e);

        Self {
            a,
            e,
            lon0: lon0_deg.to_radians(),
            lat_ts: lat_ts_deg.to_radians(),
            false_easting,
            false_northing,
            south,
            rho_scale: a * m_c / t_c,
        }
    }

    /// EPSG:3031, WGS84 Antarctic Polar Stereographic.
    pub fn antarctic() -> Self {
        let e2 = WGS84_F * (2.0 - WGS84_F);
        Self::new(WGS84_A, e2, 0.0, -71.0, 0.0, 0.0)
    }

    /// Convert geographic coordinates (degrees) to projected (x, y) meters.
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let sign = if self.south { -1.0 } else { 1.0 };
        let phi = sign * lat_deg.to_radians();
        let dlon = sign * (lon_deg.to_radians() - self.lon0);

        let rho = self.rho_scale * conformal_t(phi, self.e);
        let x = sign * rho * dlon.sin();
        let y = -sign * rho * dlon.cos();

        (x + self.false_easting, y + self.false_northing)
    }
}

/// Snyder's `t` (eq. 15-9) for a latitude in the northern aspect.
fn conformal_t(phi: f64, e: f64) -> f64 {
    let e_sin = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)
}
