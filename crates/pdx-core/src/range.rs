//! Validated `[min, max]` sampling ranges.
//!
//! Config files express delays, percentages, and cycle counts as
//! two-element arrays. Both range types validate `min <= max` at
//! deserialization time and draw uniformly when sampled.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// Uniform `[min, max]` range over `f64` (seconds or percentage points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub fn new(min: f64, max: f64) -> Result<Self, CoreError> {
        if min > max || !min.is_finite() || !max.is_finite() {
            return Err(CoreError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Draw a uniform sample from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    /// Draw a uniform duration, treating the range as seconds.
    pub fn sample_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_secs_f64(self.sample(rng).max(0.0))
    }
}

impl TryFrom<[f64; 2]> for UniformRange {
    type Error = CoreError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<UniformRange> for [f64; 2] {
    fn from(r: UniformRange) -> Self {
        [r.min, r.max]
    }
}

/// Uniform inclusive `[min, max]` range over integers (cycle counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct CycleRange {
    pub min: u32,
    pub max: u32,
}

impl CycleRange {
    pub fn new(min: u32, max: u32) -> Result<Self, CoreError> {
        if min > max {
            return Err(CoreError::InvalidRange {
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(Self { min, max })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}

impl TryFrom<[u32; 2]> for CycleRange {
    type Error = CoreError;

    fn try_from(value: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<CycleRange> for [u32; 2] {
    fn from(r: CycleRange) -> Self {
        [r.min, r.max]
    }
}
