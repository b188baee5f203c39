//! Synthesis of smooth 3D paths from sparse control data.
//!
//! The crate evaluates cubic Bézier segments into positions with full
//! orthonormal local frames ([`Curve`], [`Frame`]), samples segments and
//! multi-segment paths into polylines of frames ([`Path`]), and procedurally
//! generates random paths between two endpoints or along an open-ended travel
//! direction ([`generate`], [`Wanderer`]) while keeping tangent directions
//! continuous across every interior joint.
//!
//! Generation is a pure function of its configuration and the supplied RNG,
//! so callers that want "recompute only when inputs changed" semantics can
//! compare configurations at the call site and re-run with a fresh or seeded
//! RNG. For open-ended paths that grow over time, [`stream::PathTask`] wraps
//! a [`Wanderer`] in a cancellable periodic task that publishes complete
//! path snapshots.
//!
//! ```
//! use glam::Vec3;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use meander::{generate, GenerateConfig, NoiseRange};
//!
//! let config = GenerateConfig {
//!     origin: Vec3::ZERO,
//!     destination: Vec3::new(0.0, 0.0, 50.0),
//!     segments: 5,
//!     path_noise: NoiseRange::new(2.0, 4.0),
//!     control_noise: NoiseRange::new(1.0, 1.0),
//!     parallel_start_and_exit: true,
//! };
//! let mut rng = StdRng::seed_from_u64(42);
//! let path = generate(&config, &mut rng).unwrap();
//! let frames = path.sample(8).unwrap();
//! assert_eq!(frames.len(), 8 * 5 + 1);
//! ```

pub mod curve;
pub mod error;
pub mod frame;
pub mod generator;
pub mod path;
pub mod stream;

pub use curve::Curve;
pub use error::Error;
pub use frame::Frame;
pub use generator::{generate, GenerateConfig, NoiseRange, Wanderer};
pub use path::Path;
pub use stream::PathTask;

/// Tolerance used for squared-length and approximate-equality checks.
pub const EPSILON: f32 = 1e-5;

/// Global up axis that frames and noise planes are referenced against.
pub const WORLD_UP: glam::Vec3 = glam::Vec3::Y;
