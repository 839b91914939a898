//! Local heat redistribution between orthogonal neighbours.
//!
//! Which neighbours may receive heat is decided on the committed grid; how
//! much they receive is computed on the in-flight staging grid. Collapsing the
//! two into one buffer changes the numbers.

use rand::Rng;
use smallvec::SmallVec;

use crate::config::HeatMapConfig;

/// Neighbour indices a single cell may shed heat into this tick.
pub type Candidates = SmallVec<[usize; 4]>;

/// Transfer coefficients taken from the engine configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spread {
    /// Fraction of `|Δ| / divisor` moved per transfer.
    pub factor: f64,
    pub divisor: f64,
}

impl Spread {
    pub fn new(heat_spread: f64, spread_scale: f64, transfer_divisor: f64) -> Self {
        Spread {
            factor: heat_spread / spread_scale,
            divisor: transfer_divisor,
        }
    }

    pub fn from_config(cfg: &HeatMapConfig) -> Self {
        Spread::new(
            cfg.heat_spread,
            cfg.tuning.spread_scale,
            cfg.tuning.transfer_divisor,
        )
    }

    pub fn amount(&self, source: i32, target: i32) -> i32 {
        let diff = (source - target).abs() as f64;
        ((diff / self.divisor) * self.factor).ceil() as i32
    }
}

/// Orthogonal in-bounds neighbours strictly cooler than `(x, y)` in `current`.
pub fn candidates(current: &[i32], width: usize, height: usize, x: usize, y: usize) -> Candidates {
    let i = y * width + x;
    let here = current[i];
    let mut out = Candidates::new();

    if x + 1 < width && current[i + 1] < here {
        out.push(i + 1);
    }
    if x > 0 && current[i - 1] < here {
        out.push(i - 1);
    }
    if y + 1 < height && current[i + width] < here {
        out.push(i + width);
    }
    if y > 0 && current[i - width] < here {
        out.push(i - width);
    }
    out
}

/// Run the dissipation pass for one cell. Returns the heat moved out of it.
pub fn dissipate_cell<R: Rng + ?Sized>(
    current: &[i32],
    staging: &mut [i32],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    spread: &Spread,
    rng: &mut R,
) -> i64 {
    let src = y * width + x;
    if current[src] <= 0 {
        return 0;
    }

    let mut open = candidates(current, width, height, x, y);
    if open.is_empty() {
        return 0;
    }

    let sum: i64 = open.iter().map(|&n| current[n] as i64).sum();
    let average = (sum as f64 / open.len() as f64).round() as i32;

    let mut moved = 0i64;
    while !open.is_empty() && staging[src] > average {
        // uniform pick so no direction is favoured when heat runs out early
        let pick = rng.gen_range(0..open.len());
        let target = open.swap_remove(pick);

        let amount = spread.amount(staging[src], staging[target]);
        staging[target] += amount;
        staging[src] -= amount;
        moved += amount as i64;
    }
    moved
}

/// Dissipate every hot cell of the grid into `staging`.
pub fn dissipate<R: Rng + ?Sized>(
    current: &[i32],
    staging: &mut [i32],
    width: usize,
    height: usize,
    spread: &Spread,
    rng: &mut R,
) -> i64 {
    let mut moved = 0;
    for y in 0..height {
        for x in 0..width {
            moved += dissipate_cell(current, staging, width, height, x, y, spread, rng);
        }
    }
    moved
}
