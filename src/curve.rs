use glam::Vec3;

use crate::error::Error;
use crate::frame::Frame;

/// One cubic Bezier segment defined by two on-curve anchors and two
/// off-curve control handles.
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * start + 3 * (1 - t)² * t * start_control + 3 * (1 - t) * t² * end_control + t³ * end```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curve {
    pub start: Vec3,
    pub start_control: Vec3,
    pub end: Vec3,
    pub end_control: Vec3,
}

impl Curve {
    pub fn new(start: Vec3, start_control: Vec3, end: Vec3, end_control: Vec3) -> Self {
        Curve {
            start,
            start_control,
            end,
            end_control,
        }
    }

    /// Evaluate the position at `t` by direct evaluation of the Bernstein
    /// polynomial.
    pub fn eval(&self, t: f32) -> Vec3 {
        let omt = 1.0 - t;
        let omt2 = omt * omt;
        let t2 = t * t;

        self.start * (omt2 * omt)
            + self.start_control * (3.0 * omt2 * t)
            + self.end_control * (3.0 * omt * t2)
            + self.end * (t2 * t)
    }

    /// Evaluate the unnormalized curve velocity at `t`, the derivative of
    /// [`eval`](Self::eval) with respect to `t`.
    pub fn velocity(&self, t: f32) -> Vec3 {
        let omt = 1.0 - t;

        (self.start_control - self.start) * (3.0 * omt * omt)
            + (self.end_control - self.start_control) * (6.0 * omt * t)
            + (self.end - self.end_control) * (3.0 * t * t)
    }

    /// Position plus orthonormal local frame at `t`.
    ///
    /// Fails with [`Error::DegenerateGeometry`] when the velocity at `t`
    /// vanishes or runs parallel to the global up axis.
    pub fn frame_at(&self, t: f32) -> Result<Frame, Error> {
        Frame::from_velocity(self.eval(t), self.velocity(t))
    }

    /// Sample the segment into `resolution + 1` frames at `t = i / resolution`,
    /// so both endpoints are always included exactly.
    ///
    /// Fails with [`Error::InvalidArgument`] when `resolution < 2`; a 1-step
    /// sampling cannot represent a curve.
    pub fn sample(&self, resolution: usize) -> Result<Vec<Frame>, Error> {
        if resolution < 2 {
            return Err(Error::InvalidArgument(
                "sampling resolution must be at least 2",
            ));
        }

        let increment = 1.0 / resolution as f32;
        let mut frames = Vec::with_capacity(resolution + 1);
        for i in 0..=resolution {
            frames.push(self.frame_at(i as f32 * increment)?);
        }

        Ok(frames)
    }

    /// Approximate the arc length by flattening the curve into `nsteps`
    /// straight chords. Like any linear approximation this underestimates;
    /// accuracy beyond ~2 decimal places needs a large step count.
    pub fn arclen(&self, nsteps: usize) -> f32 {
        let stepsize = 1.0 / nsteps as f32;
        let mut arclen = 0.0;
        for i in 0..nsteps {
            let t = i as f32 * stepsize;
            arclen += (self.eval(t + stepsize) - self.eval(t)).length();
        }
        arclen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;

    fn arbitrary_curve() -> Curve {
        Curve::new(
            Vec3::new(0.0, 1.77, 0.0),
            Vec3::new(1.1, -1.0, 2.0),
            Vec3::new(3.2, -4.0, 8.0),
            Vec3::new(4.3, 3.0, 6.0),
        )
    }

    #[test]
    fn eval_hits_anchors_at_endpoints() {
        let curve = arbitrary_curve();
        assert!((curve.eval(0.0) - curve.start).length_squared() < EPSILON);
        assert!((curve.eval(1.0) - curve.end).length_squared() < EPSILON);
    }

    #[test]
    fn velocity_matches_finite_differences() {
        let curve = arbitrary_curve();
        let h = 1e-3;
        let nsteps = 20;
        for i in 1..nsteps {
            let t = i as f32 / nsteps as f32;
            let approx = (curve.eval(t + h) - curve.eval(t - h)) / (2.0 * h);
            let exact = curve.velocity(t);
            assert!((approx - exact).length() < 1e-2);
        }
    }

    #[test]
    fn frames_are_orthonormal_along_the_curve() {
        let curve = arbitrary_curve();
        let nsteps = 100;
        for i in 0..=nsteps {
            let t = i as f32 / nsteps as f32;
            let frame = curve.frame_at(t).unwrap();
            assert!((frame.tangent.length() - 1.0).abs() < EPSILON);
            assert!((frame.normal.length() - 1.0).abs() < EPSILON);
            assert!((frame.binormal.length() - 1.0).abs() < EPSILON);
            assert!(frame.tangent.dot(frame.normal).abs() < 1e-4);
            assert!(frame.tangent.dot(frame.binormal).abs() < 1e-4);
            assert!(frame.normal.dot(frame.binormal).abs() < 1e-4);
        }
    }

    #[test]
    fn sample_returns_evenly_spaced_frames() {
        let curve = arbitrary_curve();
        let resolution = 8;
        let frames = curve.sample(resolution).unwrap();

        assert_eq!(frames.len(), resolution + 1);
        for (i, frame) in frames.iter().enumerate() {
            let t = i as f32 / resolution as f32;
            assert!((frame.position - curve.eval(t)).length_squared() < EPSILON);
        }
    }

    #[test]
    fn sample_rejects_resolution_below_two() {
        let curve = arbitrary_curve();
        assert!(matches!(curve.sample(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(curve.sample(1), Err(Error::InvalidArgument(_))));
        assert!(curve.sample(2).is_ok());
    }

    #[test]
    fn vertical_curve_has_no_frame() {
        // all control points on the up axis: tangent parallel to up everywhere
        let curve = Curve::new(
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        );
        assert!(matches!(
            curve.frame_at(0.5),
            Err(Error::DegenerateGeometry(_))
        ));
        assert!(matches!(curve.sample(4), Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn point_curve_has_no_frame() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        let curve = Curve::new(p, p, p, p);
        assert!(matches!(
            curve.frame_at(0.5),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn arclen_of_a_straight_segment() {
        let curve = Curve::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 9.0),
            Vec3::new(0.0, 0.0, 6.0),
        );
        assert!((curve.arclen(100) - 9.0).abs() < 1e-3);
    }
}
