use serde::{Deserialize, Serialize};

/// A scanned point in spherical coordinates, angles in radian.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphericalPoint {
    /// Polar angle in radian.
    pub theta: f64,
    /// Azimuthal angle in radian.
    pub phi: f64,
    /// Distance from the origin. NaN when the point could not be measured.
    pub radius: f64,
}

/// A point in right-handed cartesian coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn degree_to_radian(degree: f64) -> f64 {
    degree * std::f64::consts::PI / 180.
}

/// Mirrors a commanded scan angle into the display frame and converts it to
/// radian. The head scans against the display orientation, so a target of 0
/// degrees sits at 180 degrees in the output frame.
pub fn to_display_angle(degree: f64) -> f64 {
    degree_to_radian(180. - degree)
}

/// Converts both angles of a target orientation to display-frame radian.
pub fn to_display_angles(theta_degree: f64, phi_degree: f64) -> (f64, f64) {
    (to_display_angle(theta_degree), to_display_angle(phi_degree))
}

impl SphericalPoint {
    /// Physics convention: theta from the positive z axis, phi in the x-y
    /// plane from the positive x axis.
    pub fn to_cartesian(&self) -> CartesianPoint {
        CartesianPoint {
            x: self.radius * self.theta.sin() * self.phi.cos(),
            y: self.radius * self.theta.sin() * self.phi.sin(),
            z: self.radius * self.theta.cos(),
        }
    }
}
