//! Angle math behind the dial: sampling, bounding, accumulation, mapping.

pub mod accumulator;
pub mod arc;
pub mod mapping;
pub mod sampler;

pub use accumulator::{RotationAccumulator, normalize_turn, shortest_delta};
pub use arc::WorkingArc;
pub use mapping::ValueRange;
pub use sampler::sample_angle;
