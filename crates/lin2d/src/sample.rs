//! Random canonical transforms (seeded, replayable).
//!
//! Model
//! - Scales are log-uniform in `[scale_min, scale_max]`.
//! - Angle and shear are uniform in `[-π, π)`; shears within `shear_margin`
//!   of `±π/2` are redrawn so samples stay well conditioned.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::{FRAC_PI_2, PI};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::NEAR_EPS;
use crate::lin2::Lin2;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    pub scale_min: f64,
    pub scale_max: f64,
    /// Minimum distance of the shear from `±π/2`. Clamped to `[2·NEAR_EPS, π/4]`.
    pub shear_margin: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            scale_min: 0.2,
            scale_max: 5.0,
            shear_margin: 1e-2,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn log_uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = (lo.max(1e-12), hi.max(1e-12));
    let (a, b) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if a == b {
        return a;
    }
    rng.gen_range(a.ln()..=b.ln()).exp().clamp(a, b)
}

/// Draw one valid `Lin2`.
pub fn draw_lin2(cfg: SampleCfg, tok: ReplayToken) -> Lin2 {
    let mut rng = tok.to_std_rng();
    // never closer than the validation tolerance
    let margin = cfg.shear_margin.clamp(2.0 * NEAR_EPS, PI / 4.0);
    let sx = log_uniform(&mut rng, cfg.scale_min, cfg.scale_max);
    let sy = log_uniform(&mut rng, cfg.scale_min, cfg.scale_max);
    let r = rng.gen_range(-PI..PI);
    let h = loop {
        let h: f64 = rng.gen_range(-PI..PI);
        if (h.abs() - FRAC_PI_2).abs() >= margin {
            break h;
        }
    };
    Lin2::from_parts_unchecked(sx, sy, r, h)
}

/// `n` draws with indices `0..n` under one seed.
pub fn draw_lin2_batch(cfg: SampleCfg, seed: u64, n: usize) -> Vec<Lin2> {
    (0..n as u64)
        .map(|index| draw_lin2(cfg, ReplayToken { seed, index }))
        .collect()
}
