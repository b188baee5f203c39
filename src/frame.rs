use glam::{Mat3, Quat, Vec3};

use crate::error::Error;
use crate::{EPSILON, WORLD_UP};

/// Position and orthonormal local frame at a point on a curve.
///
/// `tangent` is the unit curve velocity direction,
/// `binormal = normalize(cross(WORLD_UP, tangent))` and
/// `normal = normalize(cross(tangent, binormal))`, so the three vectors are
/// mutually orthogonal unit vectors whenever the tangent is well defined.
/// `orientation` is the rotation mapping `+Z` to `tangent` and `+Y` to
/// `normal`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub position: Vec3,
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
    pub orientation: Quat,
}

impl Frame {
    /// Build a frame at `position` from an unnormalized curve velocity.
    ///
    /// Fails with [`Error::DegenerateGeometry`] when the velocity vanishes
    /// or runs parallel to [`WORLD_UP`], since neither admits a well defined
    /// basis.
    pub fn from_velocity(position: Vec3, velocity: Vec3) -> Result<Self, Error> {
        let tangent = unit(velocity, "zero-length curve velocity")?;
        let binormal = unit(
            WORLD_UP.cross(tangent),
            "curve tangent parallel to the global up axis",
        )?;
        let normal = tangent.cross(binormal).normalize();
        let orientation = Quat::from_mat3(&Mat3::from_cols(binormal, normal, tangent));

        Ok(Frame {
            position,
            tangent,
            normal,
            binormal,
            orientation,
        })
    }
}

/// Normalize `v`, failing instead of producing NaN when its length is ~zero.
pub(crate) fn unit(v: Vec3, what: &'static str) -> Result<Vec3, Error> {
    if v.length_squared() < EPSILON {
        return Err(Error::DegenerateGeometry(what));
    }
    Ok(v.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal() {
        let frame = Frame::from_velocity(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)).unwrap();

        assert!((frame.tangent.length() - 1.0).abs() < EPSILON);
        assert!((frame.normal.length() - 1.0).abs() < EPSILON);
        assert!((frame.binormal.length() - 1.0).abs() < EPSILON);
        assert!(frame.tangent.dot(frame.normal).abs() < EPSILON);
        assert!(frame.tangent.dot(frame.binormal).abs() < EPSILON);
        assert!(frame.normal.dot(frame.binormal).abs() < EPSILON);
    }

    #[test]
    fn orientation_maps_forward_and_up() {
        let frame = Frame::from_velocity(Vec3::ZERO, Vec3::new(0.4, -0.2, 1.0)).unwrap();

        assert!((frame.orientation * Vec3::Z - frame.tangent).length() < 1e-4);
        assert!((frame.orientation * Vec3::Y - frame.normal).length() < 1e-4);
        assert!((frame.orientation * Vec3::X - frame.binormal).length() < 1e-4);
    }

    #[test]
    fn zero_velocity_is_degenerate() {
        let result = Frame::from_velocity(Vec3::ZERO, Vec3::ZERO);
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn up_parallel_velocity_is_degenerate() {
        let result = Frame::from_velocity(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));

        let result = Frame::from_velocity(Vec3::ZERO, Vec3::new(0.0, -5.0, 0.0));
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }
}
