//! Noise kernels and threshold matrices.
//!
//! All randomness comes from [`crate::hash::stable_hash`], so two patterns built
//! with the same options produce identical output on every platform.
pub mod blue_noise;
pub mod hash_noise;
pub mod perlin;
pub mod threshold;
pub mod worley;

pub use blue_noise::{blue_noise, cached_blue_noise_masks};
pub use hash_noise::HashNoise;
pub use perlin::{NoiseBasis, PerlinNoise};
pub use threshold::ThresholdMatrix;
pub use worley::{WorleyMetric, WorleyNoise, WorleyOutput};
