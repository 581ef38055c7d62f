//! Synthetic sample generation: random walks, phase profiles and derived loudness.
//!
//! All randomness flows through one [`StochasticFeed`] owned by the engine so a
//! seeded run is fully reproducible.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

/// Two-phase profile keyed to a fixed peak tick.
///
/// Before `peak_tick` the value ramps linearly from `start` to `ramp_end`;
/// at and after `peak_tick` it holds at `target`. Each phase adds its own
/// independent Gaussian noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseProfile {
    pub start: f64,
    pub ramp_end: f64,
    pub target: f64,
    pub peak_tick: u64,
    pub sigma_before: f64,
    pub sigma_after: f64,
}

impl PhaseProfile {
    /// Noise-free value of the profile at `tick`.
    pub fn nominal(&self, tick: u64) -> f64 {
        if tick < self.peak_tick {
            let frac = tick as f64 / self.peak_tick as f64;
            self.start + (self.ramp_end - self.start) * frac
        } else {
            self.target
        }
    }

    pub fn sigma(&self, tick: u64) -> f64 {
        if tick < self.peak_tick {
            self.sigma_before
        } else {
            self.sigma_after
        }
    }
}

/// How a channel obtains its next value each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedPolicy {
    /// `next = current + N(0, sigma)`.
    RandomWalk { sigma: f64 },
    /// Value follows a [`PhaseProfile`] plus noise; the current value is ignored.
    Phase(PhaseProfile),
}

/// Power-law perceived-loudness model, `coefficient * M^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoudnessModel {
    pub coefficient: f64,
    pub exponent: f64,
    pub sigma: f64,
}

/// Loudness derivation from Mach number, shared by the baseline and optimum curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoudnessConfig {
    /// Mach number above which the power law applies.
    pub threshold: f64,
    /// Constant reported at or below `threshold`.
    pub floor: f64,
    pub baseline: LoudnessModel,
    pub optimum: LoudnessModel,
}

impl Default for LoudnessConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            floor: 0.1,
            baseline: LoudnessModel {
                coefficient: 83.0,
                exponent: 0.5,
                sigma: 0.5,
            },
            optimum: LoudnessModel {
                coefficient: 80.0,
                exponent: 0.4,
                sigma: 0.5,
            },
        }
    }
}

impl LoudnessConfig {
    /// Noise-free loudness for `mach`. The subsonic branch never evaluates the
    /// power law.
    pub fn nominal(&self, model: &LoudnessModel, mach: f64) -> f64 {
        if mach > self.threshold {
            model.coefficient * mach.powf(model.exponent)
        } else {
            self.floor
        }
    }
}

/// Random source for every synthetic channel.
pub struct StochasticFeed {
    rng: StdRng,
}

impl StochasticFeed {
    /// Seeded feed for reproducible runs, or entropy-seeded when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// One draw from N(0, sigma). A non-positive sigma yields exactly zero.
    pub fn noise(&mut self, sigma: f64) -> f64 {
        if !(sigma > 0.0) {
            return 0.0;
        }
        match Normal::new(0.0, sigma) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }

    /// Next value for a channel currently at `current`, on tick `tick`.
    pub fn next_value(&mut self, policy: &FeedPolicy, current: f64, tick: u64) -> f64 {
        match policy {
            FeedPolicy::RandomWalk { sigma } => current + self.noise(*sigma),
            FeedPolicy::Phase(profile) => profile.nominal(tick) + self.noise(profile.sigma(tick)),
        }
    }

    /// Random-walk every element of `values` in place.
    pub fn walk(&mut self, values: &mut [f64], sigma: f64) {
        for v in values.iter_mut() {
            *v += self.noise(sigma);
        }
    }

    /// Derived loudness from the source channel's current Mach value.
    ///
    /// Noise is only added on the supersonic branch; the floor is exact.
    pub fn derive_loudness(&mut self, cfg: &LoudnessConfig, model: &LoudnessModel, mach: f64) -> f64 {
        if mach > cfg.threshold {
            cfg.nominal(model, mach) + self.noise(model.sigma)
        } else {
            cfg.floor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_is_silent() {
        let mut feed = StochasticFeed::new(Some(7));
        assert_eq!(feed.noise(0.0), 0.0);
        assert_eq!(feed.noise(-1.0), 0.0);
    }
}
