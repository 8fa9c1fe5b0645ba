use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Runway as seen by the approach modes, supplied by navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunwayGeometry {
    /// Threshold position in the local frame [m]
    pub threshold_north_m: f64,
    pub threshold_east_m: f64,
    /// Threshold elevation MSL [m]
    pub elevation_m: f64,
    /// Landing direction [deg true]
    pub heading_deg: f64,
    pub length_m: f64,
    pub glide_slope_deg: f64,
    /// Touchdown aim point past the threshold [m]
    pub aim_point_m: f64,
}

impl Default for RunwayGeometry {
    fn default() -> Self {
        Self {
            threshold_north_m: 0.0,
            threshold_east_m: 0.0,
            elevation_m: 0.0,
            heading_deg: 0.0,
            length_m: 3_000.0,
            glide_slope_deg: 3.0,
            aim_point_m: 300.0,
        }
    }
}

impl RunwayGeometry {
    fn offset(&self, position_ned: &Vector3<f64>) -> (f64, f64) {
        (
            position_ned.x - self.threshold_north_m,
            position_ned.y - self.threshold_east_m,
        )
    }

    /// Distance past the threshold along the centreline [m], negative on approach.
    pub fn along_track(&self, position_ned: &Vector3<f64>) -> f64 {
        let (dn, de) = self.offset(position_ned);
        let h = self.heading_deg.to_radians();
        dn * h.cos() + de * h.sin()
    }

    /// Lateral offset from the extended centreline [m], positive right of it.
    pub fn cross_track(&self, position_ned: &Vector3<f64>) -> f64 {
        let (dn, de) = self.offset(position_ned);
        let h = self.heading_deg.to_radians();
        -dn * h.sin() + de * h.cos()
    }

    /// Glide path height MSL abeam `position_ned` [m], never below the runway.
    pub fn glide_path_altitude(&self, position_ned: &Vector3<f64>) -> f64 {
        let to_aim = (self.aim_point_m - self.along_track(position_ned)).max(0.0);
        self.elevation_m + to_aim * self.glide_slope_deg.to_radians().tan()
    }
}
