//! Procedural construction of random Bezier paths.
//!
//! Both generators share one construction scheme: anchors are laid out
//! along a straight reference line, displaced by bounded per-axis noise in
//! a frame perpendicular to the travel direction, control handles are
//! placed at the thirds of each anchor span and displaced the same way in
//! the span's own frame, and every interior joint is made tangentially
//! continuous by re-aiming the incoming handle exactly opposite the
//! outgoing one.

use glam::Vec3;
use log::{debug, trace};
use rand::Rng;

use crate::curve::Curve;
use crate::error::Error;
use crate::frame::unit;
use crate::path::Path;
use crate::WORLD_UP;

/// Symmetric per-axis noise amplitudes, expressed in a frame aligned to a
/// reference travel direction: `lateral` across it, `vertical` along the
/// projection of the global up axis perpendicular to it. Both must be
/// non-negative; a zero range disables that axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NoiseRange {
    pub lateral: f32,
    pub vertical: f32,
}

impl NoiseRange {
    pub const ZERO: NoiseRange = NoiseRange {
        lateral: 0.0,
        vertical: 0.0,
    };

    pub fn new(lateral: f32, vertical: f32) -> Self {
        NoiseRange { lateral, vertical }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.lateral < 0.0 || self.vertical < 0.0 {
            return Err(Error::InvalidArgument("noise ranges must be non-negative"));
        }
        Ok(())
    }
}

/// Parameters for bounded generation between two fixed endpoints.
///
/// `path_noise` displaces the interior key points in the frame of the
/// overall `destination - origin` direction; `control_noise` displaces the
/// control handles in each sub-segment's own frame. With
/// `parallel_start_and_exit` the first and last handle are re-aimed along
/// the overall direction, keeping their randomized distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GenerateConfig {
    pub origin: Vec3,
    pub destination: Vec3,
    pub segments: usize,
    pub path_noise: NoiseRange,
    pub control_noise: NoiseRange,
    pub parallel_start_and_exit: bool,
}

/// Axes spanning the plane perpendicular to a travel direction, in which
/// noise offsets are expressed.
#[derive(Debug, Copy, Clone)]
struct NoiseFrame {
    lateral: Vec3,
    vertical: Vec3,
}

impl NoiseFrame {
    fn aligned_to(direction: Vec3) -> Result<Self, Error> {
        let forward = unit(direction, "zero-length travel direction")?;
        let lateral = unit(
            WORLD_UP.cross(forward),
            "travel direction parallel to the global up axis",
        )?;
        let vertical = forward.cross(lateral).normalize();
        Ok(NoiseFrame { lateral, vertical })
    }

    fn offset<R: Rng + ?Sized>(&self, range: NoiseRange, rng: &mut R) -> Vec3 {
        self.lateral * rng.gen_range(-range.lateral..=range.lateral)
            + self.vertical * rng.gen_range(-range.vertical..=range.vertical)
    }
}

/// Evenly subdivide `start → end` into `parts` spans, returning the
/// `parts + 1` boundary points (endpoints included).
fn subdivide(start: Vec3, end: Vec3, parts: usize) -> Vec<Vec3> {
    let step = (end - start) / parts as f32;
    (0..=parts).map(|i| start + step * i as f32).collect()
}

/// Displace every interior point of `points` by frame-local noise drawn
/// from `range`; the endpoints stay fixed. The frame is aligned to the
/// overall first-to-last direction of the points.
fn perturb_interior<R: Rng + ?Sized>(
    points: &mut [Vec3],
    range: NoiseRange,
    rng: &mut R,
) -> Result<(), Error> {
    let frame = NoiseFrame::aligned_to(points[points.len() - 1] - points[0])?;
    let last = points.len() - 1;
    for point in &mut points[1..last] {
        *point += frame.offset(range, rng);
    }
    Ok(())
}

/// Re-aim `control` to lie exactly opposite `opposite` through `joint`,
/// keeping `control`'s own distance from the joint. Forces the tangent
/// directions on both sides of the joint to be collinear and opposed.
fn mirror_through(joint: Vec3, opposite: Vec3, control: Vec3) -> Result<Vec3, Error> {
    let distance = joint.distance(control);
    let direction = unit(joint - opposite, "control handle coincides with the joint")?;
    Ok(joint + direction * distance)
}

/// Re-aim `control` so its direction from `anchor` points exactly at
/// `toward`, keeping its randomized distance from the anchor.
fn aim_from(anchor: Vec3, toward: Vec3, control: Vec3) -> Result<Vec3, Error> {
    let distance = anchor.distance(control);
    let direction = unit(toward - anchor, "zero-length travel direction")?;
    Ok(anchor + direction * distance)
}

/// Build a path of exactly `config.segments` cubic segments from
/// `config.origin` to `config.destination`.
///
/// The result is a pure function of `config` and the RNG state: the same
/// seed reproduces the same path, and nothing is cached between calls.
///
/// Fails with [`Error::InvalidArgument`] for a zero segment count or
/// negative noise ranges, and with [`Error::DegenerateGeometry`] when the
/// overall direction (or any perturbed sub-span) is zero-length or
/// parallel to the global up axis.
pub fn generate<R: Rng + ?Sized>(config: &GenerateConfig, rng: &mut R) -> Result<Path, Error> {
    if config.segments == 0 {
        return Err(Error::InvalidArgument("segment count must be at least 1"));
    }
    config.path_noise.validate()?;
    config.control_noise.validate()?;

    // Key points along the straight line, interior ones displaced in the
    // frame of the overall travel direction.
    let mut keys = subdivide(config.origin, config.destination, config.segments);
    perturb_interior(&mut keys, config.path_noise, rng)?;

    // Control skeleton per segment: the thirds of each key span, interior
    // points displaced in the span's own frame.
    let mut controls = Vec::with_capacity(config.segments);
    for i in 0..config.segments {
        let mut thirds = subdivide(keys[i], keys[i + 1], 3);
        perturb_interior(&mut thirds, config.control_noise, rng)?;
        controls.push(thirds);
    }

    // Tangential continuity at interior joints: the incoming handle is
    // re-aimed opposite the outgoing one.
    for i in 1..config.segments {
        let outgoing = controls[i - 1][2];
        let incoming = controls[i][1];
        controls[i][1] = mirror_through(keys[i], outgoing, incoming)?;
    }

    if config.parallel_start_and_exit {
        let last = config.segments - 1;
        let entry = controls[0][1];
        controls[0][1] = aim_from(config.origin, config.destination, entry)?;
        let exit = controls[last][2];
        controls[last][2] = aim_from(config.destination, config.origin, exit)?;
    }

    let mut segments = Vec::with_capacity(config.segments);
    for i in 0..config.segments {
        segments.push(Curve::new(
            keys[i],
            controls[i][1],
            keys[i + 1],
            controls[i][2],
        ));
    }

    debug!(
        "generated {} segment path from {} to {}",
        config.segments, config.origin, config.destination
    );
    Ok(Path::from_segments(segments))
}

/// Incremental generator: appends one cubic segment at a time along a fixed
/// travel direction, keeping tangent continuity against the previously
/// appended segment. There is no destination and no endpoint-parallelism
/// step; the path grows until the caller stops advancing.
#[derive(Debug, Clone)]
pub struct Wanderer {
    forward: Vec3,
    frame: NoiseFrame,
    step_length: f32,
    end_noise: NoiseRange,
    control_noise: NoiseRange,
    current_end: Vec3,
    last_end_control: Option<Vec3>,
}

impl Wanderer {
    /// `forward` is the net travel direction; each [`advance`](Self::advance)
    /// moves the path end `step_length` along it before applying `end_noise`
    /// in the direction's perpendicular frame.
    pub fn new(
        start: Vec3,
        forward: Vec3,
        step_length: f32,
        end_noise: NoiseRange,
        control_noise: NoiseRange,
    ) -> Result<Self, Error> {
        if step_length <= 0.0 {
            return Err(Error::InvalidArgument("step length must be positive"));
        }
        end_noise.validate()?;
        control_noise.validate()?;
        let forward = unit(forward, "zero-length travel direction")?;
        let frame = NoiseFrame::aligned_to(forward)?;

        Ok(Wanderer {
            forward,
            frame,
            step_length,
            end_noise,
            control_noise,
            current_end: start,
            last_end_control: None,
        })
    }

    /// Current end of the path, the anchor the next segment grows from.
    pub fn position(&self) -> Vec3 {
        self.current_end
    }

    /// Synthesize the next segment and advance the end point.
    ///
    /// Fails with [`Error::DegenerateGeometry`] when the noisy step span
    /// collapses or turns parallel to the global up axis; the generator
    /// state is left unchanged in that case.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Curve, Error> {
        let start = self.current_end;
        let end =
            start + self.forward * self.step_length + self.frame.offset(self.end_noise, rng);

        let mut thirds = subdivide(start, end, 3);
        perturb_interior(&mut thirds, self.control_noise, rng)?;
        let mut start_control = thirds[1];
        let end_control = thirds[2];

        // same continuity rule as the bounded generator's joint pass
        if let Some(previous) = self.last_end_control {
            start_control = mirror_through(start, previous, start_control)?;
        }

        self.current_end = end;
        self.last_end_control = Some(end_control);
        trace!("advanced path end to {}", end);

        Ok(Curve::new(start, start_control, end, end_control))
    }
}
