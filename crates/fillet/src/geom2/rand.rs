//! Random corners in 2D (two lines leaving a common point).
//!
//! Purpose
//! - Deterministic sampler of line pairs for property tests and benchmarks.
//!
//! Model
//! - Pick a corner in a box, a first direction uniformly, and a second direction
//!   at an angle in `[angle_min, π - angle_min]` on a random side.
//! - Each line starts `gap ∈ [0, gap_max]` away from the corner (0 = drawn touching)
//!   and runs `arm ∈ [arm_min, arm_max]`; point order is flipped at random.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::PI;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Point, Polyline};

/// Corner sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CornerCfg {
    /// Half-size of the square box the corner is drawn from (centered at origin).
    pub extent: f64,
    /// Smallest angle between the lines, in radians. Clamped to (0, π/2].
    pub angle_min: f64,
    pub arm_min: f64,
    pub arm_max: f64,
    /// Largest distance between a line's near end and the corner.
    pub gap_max: f64,
}

impl Default for CornerCfg {
    fn default() -> Self {
        Self {
            extent: 100.0,
            angle_min: 0.1,
            arm_min: 1.0,
            arm_max: 50.0,
            gap_max: 5.0,
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
        // SplitMix64-style mixing.
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

/// A sampled corner: both lines plus the exact corner point they extend to.
#[derive(Clone, Debug)]
pub struct Corner {
    pub line1: Polyline,
    pub line2: Polyline,
    pub corner: Point,
    /// Angle between the two lines at the corner, in (0, π).
    pub angle: f64,
}

fn draw_line<R: Rng>(rng: &mut R, corner: Point, dir: Vector2<f64>, cfg: &CornerCfg) -> Polyline {
    let gap = rng.gen::<f64>() * cfg.gap_max.max(0.0);
    let lo = cfg.arm_min.max(1e-6);
    let hi = cfg.arm_max.max(lo);
    let arm = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    let near = corner + dir * gap;
    let far = corner + dir * (gap + arm);
    let pts = if rng.gen_bool(0.5) {
        vec![near, far]
    } else {
        vec![far, near]
    };
    Polyline::from_points_unchecked(pts)
}

/// Draw a random corner.
pub fn draw_corner(cfg: CornerCfg, tok: ReplayToken) -> Corner {
    let mut rng = tok.to_std_rng();
    let ext = cfg.extent.abs();
    let corner = Vector2::new(
        (rng.gen::<f64>() * 2.0 - 1.0) * ext,
        (rng.gen::<f64>() * 2.0 - 1.0) * ext,
    );
    let amin = cfg.angle_min.clamp(1e-6, 0.5 * PI);
    let phi = rng.gen::<f64>() * 2.0 * PI;
    let angle = amin + rng.gen::<f64>() * (PI - 2.0 * amin);
    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let d1 = Vector2::new(phi.cos(), phi.sin());
    let d2 = Vector2::new((phi + side * angle).cos(), (phi + side * angle).sin());
    let line1 = draw_line(&mut rng, corner, d1, &cfg);
    let line2 = draw_line(&mut rng, corner, d2, &cfg);
    Corner {
        line1,
        line2,
        corner,
        angle,
    }
}
