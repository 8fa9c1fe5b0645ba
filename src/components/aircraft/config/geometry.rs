use serde::{Deserialize, Serialize};

/// Configuration for the geometry of an aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftGeometry {
    /// The total wing area of the aircraft (m²).
    pub wing_area: f64,
    /// The wingspan of the aircraft (m).
    pub wing_span: f64,
    /// The mean aerodynamic chord of the aircraft (m).
    pub mac: f64,
    /// Wing aspect ratio, `span² / area`.
    pub aspect_ratio: f64,
}

impl AircraftGeometry {
    /// Creates a new `AircraftGeometry`, deriving the chord as `area / span`
    /// when none is supplied.
    ///
    /// # Arguments
    /// * `wing_area` - The total wing area of the aircraft (m²).
    /// * `wing_span` - The wing span of the aircraft (m).
    /// * `mac` - The mean aerodynamic chord (m), if known.
    pub fn new(wing_area: f64, wing_span: f64, mac: Option<f64>) -> Self {
        let mac = mac.unwrap_or(wing_area / wing_span);
        AircraftGeometry {
            wing_area,
            wing_span,
            mac,
            aspect_ratio: wing_span * wing_span / wing_area,
        }
    }

    pub fn a320() -> Self {
        Self::new(122.6, 35.8, None)
    }
}
