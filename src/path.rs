use core::slice;

use crate::curve::Curve;
use crate::error::Error;
use crate::frame::Frame;

/// An ordered sequence of cubic segments forming a positionally continuous
/// path: each segment's `end` equals the next segment's `start`.
///
/// Continuity of tangent *direction* across joints is a constructed property
/// of the generator, not something this type enforces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Curve>,
}

impl Path {
    pub fn new() -> Self {
        Path {
            segments: Vec::new(),
        }
    }

    pub fn from_segments(segments: Vec<Curve>) -> Self {
        Path { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> slice::Iter<'_, Curve> {
        self.segments.iter()
    }

    pub fn push(&mut self, segment: Curve) {
        self.segments.push(segment);
    }

    /// Sample every segment at `resolution_per_segment`, eliding the
    /// duplicated frame at interior joints: each segment but the last
    /// contributes its first `resolution_per_segment` frames (its `t = 1`
    /// frame equals the next segment's `t = 0` frame), the last segment
    /// contributes all of its frames. The result holds exactly
    /// `resolution_per_segment * len() + 1` frames, or none for an empty
    /// path.
    pub fn sample(&self, resolution_per_segment: usize) -> Result<Vec<Frame>, Error> {
        if resolution_per_segment < 2 {
            return Err(Error::InvalidArgument(
                "sampling resolution must be at least 2",
            ));
        }

        let count = self.segments.len();
        let mut frames = Vec::with_capacity(resolution_per_segment * count + 1);
        for (i, segment) in self.segments.iter().enumerate() {
            let samples = segment.sample(resolution_per_segment)?;
            let take = if i == count - 1 {
                resolution_per_segment + 1
            } else {
                resolution_per_segment
            };
            frames.extend(samples.into_iter().take(take));
        }

        Ok(frames)
    }

    /// Approximate total arc length by flattening each segment into
    /// `nsteps_per_segment` chords.
    pub fn arclen(&self, nsteps_per_segment: usize) -> f32 {
        self.segments
            .iter()
            .map(|segment| segment.arclen(nsteps_per_segment))
            .sum()
    }
}
