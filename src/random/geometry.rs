use std::f64::consts::PI;

use bevy_math::DQuat;
use bevy_math::DVec2;
use bevy_math::DVec3;
use serde::Deserialize;
use serde::Serialize;

use super::MersenneTwister;

/// Squared length below which a candidate is too short to normalize.
const MIN_UNIT_LENGTH_SQUARED: f64 = 1e-4;

/// Axis aligned box in double precision.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct DBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl DBox {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_size(center: DVec3, half_size: DVec3) -> Self {
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Forward and right axes of the frame looking along `direction` with no
/// roll. X is forward, Z is up.
fn direction_axes(direction: DVec3) -> (DVec3, DVec3) {
    let yaw = direction.y.atan2(direction.x);
    let pitch = direction.z.atan2(direction.x.hypot(direction.y));
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let forward = DVec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch);
    let right = DVec3::new(-sin_yaw, cos_yaw, 0.0);
    (forward, right)
}

/// Tilt `direction` away from itself by `phi`, then spin it around itself
/// by `theta`.
fn rotate_in_cone(direction: DVec3, phi: f64, theta: f64) -> DVec3 {
    let (forward, right) = direction_axes(direction);
    let tilted = DQuat::from_axis_angle(right, phi) * direction;
    let spun = DQuat::from_axis_angle(forward, theta) * tilted;
    // direction might not have been normalized
    spun.normalize_or_zero()
}

impl MersenneTwister {
    /// Uniformly distributed direction.
    pub fn unit_vector(&mut self) -> DVec3 {
        loop {
            // candidates inside the unit sphere keep the result uniform
            let candidate = self.cube_point();
            let length_squared = candidate.length_squared();
            if length_squared <= 1.0 && length_squared >= MIN_UNIT_LENGTH_SQUARED {
                return candidate / length_squared.sqrt();
            }
        }
    }

    pub fn point_in_unit_circle(&mut self) -> DVec2 {
        loop {
            let candidate = DVec2::new(
                self.random_range_float(-1.0, 1.0),
                self.random_range_float(-1.0, 1.0),
            );
            if candidate.length_squared() <= 1.0 {
                return candidate;
            }
        }
    }

    pub fn point_in_unit_sphere(&mut self) -> DVec3 {
        loop {
            let candidate = self.cube_point();
            if candidate.length_squared() <= 1.0 {
                return candidate;
            }
        }
    }

    pub fn point_in_bounding_box(&mut self, center: DVec3, half_size: DVec3) -> DVec3 {
        self.point_in_box(&DBox::from_center_half_size(center, half_size))
    }

    /// Each axis is drawn from [min, max). A flat axis returns its bound
    /// without drawing.
    pub fn point_in_box(&mut self, bounds: &DBox) -> DVec3 {
        DVec3::new(
            self.box_axis(bounds.min.x, bounds.max.x),
            self.box_axis(bounds.min.y, bounds.max.y),
            self.box_axis(bounds.min.z, bounds.max.z),
        )
    }

    /// Uniform unit vector within the cone around `direction`.
    ///
    /// Uses sphere point picking with the polar angle folded into
    /// [0, half_angle]. A non-positive half angle returns the normalized
    /// direction without drawing.
    pub fn cone(&mut self, direction: DVec3, half_angle: f64) -> DVec3 {
        if half_angle <= 0.0 {
            return direction.normalize_or_zero();
        }
        let (theta, phi) = self.sphere_angles();
        rotate_in_cone(direction, phi % half_angle, theta)
    }

    /// Like [`Self::cone`] but with an elliptical cross section. The half
    /// angle at each spin angle is the radius of the ellipse with the given
    /// horizontal and vertical half angles.
    pub fn elliptical_cone(&mut self, direction: DVec3, horizontal_half_angle: f64, vertical_half_angle: f64) -> DVec3 {
        if horizontal_half_angle <= 0.0 || vertical_half_angle <= 0.0 {
            return direction.normalize_or_zero();
        }
        let (theta, phi) = self.sphere_angles();
        let (sin_theta, cos_theta) = theta.sin_cos();
        let inverse_square = (cos_theta / vertical_half_angle).powi(2)
            + (sin_theta / horizontal_half_angle).powi(2);
        let half_angle = (1.0 / inverse_square).sqrt();
        rotate_in_cone(direction, phi % half_angle, theta)
    }

    fn cube_point(&mut self) -> DVec3 {
        DVec3::new(
            self.random_range_float(-1.0, 1.0),
            self.random_range_float(-1.0, 1.0),
            self.random_range_float(-1.0, 1.0),
        )
    }

    fn box_axis(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.random_range_float(min, max)
    }

    /// (theta, phi) evenly distributed over the sphere.
    fn sphere_angles(&mut self) -> (f64, f64) {
        let u: f64 = self.fraction();
        let v: f64 = self.fraction();
        (2.0 * PI * u, (2.0 * v - 1.0).acos())
    }
}
