//! Systemic geometry reconstruction.
//!
//! Maps two scalars, `variability` and `collapse_factor` (`1 - stateSpaceVolume`),
//! onto a distorted `GRID_SIZE × GRID_SIZE` point field. Every point is pulled
//! toward the grid centre by a force proportional to the collapse factor and
//! shaken by jitter proportional to the variability.
//!
//! ```text
//! force = (1 - dist / (center * 1.5)) * collapse_factor * 40
//! px    = x - cos(angle) * force + (u - 0.5) * variability * 5
//! py    = y - sin(angle) * force + (u - 0.5) * variability * 5
//! ```
//!
//! The jitter source is a caller-supplied [`Rng`]; pass a seeded generator for
//! reproducible output. Results are cheap and must be recomputed whenever
//! either input changes.

use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Points per grid side.
pub const GRID_SIZE: usize = 10;
/// Distance between neighbouring base positions.
pub const SPACING: f64 = 20.0;
/// Coordinate of the grid centre on both axes.
#[allow(clippy::cast_precision_loss)]
pub const CENTER: f64 = GRID_SIZE as f64 * SPACING / 2.0;
/// Peak inward displacement at full collapse.
pub const PULL_STRENGTH: f64 = 40.0;
/// Jitter spans `[-JITTER_SCALE/2, JITTER_SCALE/2) * variability`.
pub const JITTER_SCALE: f64 = 5.0;
/// Collapse factor above which the grid is drawn as collapsing.
pub const COLLAPSE_ALERT_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Output of one reconstruction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Reconstruction {
    /// `GRID_SIZE²` points. Index `i * GRID_SIZE + j` holds column `i`, row `j`.
    pub points: Vec<Point>,
    /// `1 - collapse_factor`, rounded to 3 decimals.
    pub entropy: f64,
    /// `collapse_factor`, rounded to 3 decimals.
    pub tension: f64,
    #[serde(skip)]
    collapse_factor: f64,
}

impl Reconstruction {
    /// True when the collapse factor exceeds [`COLLAPSE_ALERT_THRESHOLD`].
    #[must_use]
    pub fn is_collapsing(&self) -> bool {
        self.collapse_factor > COLLAPSE_ALERT_THRESHOLD
    }

    /// Index pairs of neighbouring points along each line of the grid.
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.points.len())
            .filter(|k| k % GRID_SIZE < GRID_SIZE - 1)
            .map(|k| (k, k + 1))
    }
}

/// Undistorted position of grid cell `(i, j)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn base_position(i: usize, j: usize) -> Point {
    Point {
        x: i as f64 * SPACING,
        y: j as f64 * SPACING,
    }
}

/// Inward pull applied to a point at `base`, before jitter.
///
/// The returned vector is subtracted from the base position. At the exact
/// centre `atan2(0, 0)` is `0`, so the centre point is pushed along `-x`.
#[must_use]
pub fn pull(base: Point, collapse_factor: f64) -> Point {
    let dx = base.x - CENTER;
    let dy = base.y - CENTER;
    let dist = dx.hypot(dy);
    let force = (1.0 - dist / (CENTER * 1.5)) * collapse_factor * PULL_STRENGTH;
    let angle = dy.atan2(dx);
    Point {
        x: angle.cos() * force,
        y: angle.sin() * force,
    }
}

/// Build the distorted grid.
///
/// Consumes exactly two draws from `rng` per point (x jitter, then y jitter)
/// in point order. Never panics: negative or non-finite inputs simply
/// propagate through the arithmetic.
pub fn reconstruct<R: Rng + ?Sized>(
    variability: f64,
    collapse_factor: f64,
    rng: &mut R,
) -> Reconstruction {
    let mut points = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let base = base_position(i, j);
            let inward = pull(base, collapse_factor);
            let jitter_x = (rng.r#gen::<f64>() - 0.5) * variability * JITTER_SCALE;
            let jitter_y = (rng.r#gen::<f64>() - 0.5) * variability * JITTER_SCALE;
            points.push(Point {
                x: base.x - inward.x + jitter_x,
                y: base.y - inward.y + jitter_y,
            });
        }
    }

    Reconstruction {
        points,
        entropy: round3(1.0 - collapse_factor),
        tension: round3(collapse_factor),
        collapse_factor,
    }
}

/// Round to three decimal places for display.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
