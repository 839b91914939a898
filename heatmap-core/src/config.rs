//! Engine configuration and its validation.
//!
//! A [`HeatMapConfig`] is plain serde data. Nothing is clamped silently: an
//! out-of-range field makes [`HeatMapConfig::validate`] fail and the engine
//! refuses to start.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Heat value every committed cell is clamped to.
pub const DEFAULT_SATURATION_CAP: i32 = 240;
/// Divides a temperature difference before it becomes a transfer amount.
pub const DEFAULT_TRANSFER_DIVISOR: f64 = 5.0;
/// `heat_spread` is expressed on this scale (100 = full spread).
pub const DEFAULT_SPREAD_SCALE: f64 = 100.0;
/// Heat every cell loses per tick before dissipation.
pub const DEFAULT_DECAY_PER_TICK: i32 = 1;

/// How events reach the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// Events are pushed while the engine runs and consumed oldest first.
    #[default]
    Streaming,
    /// A fixed event list supplied at construction, consumed in list order.
    Replay,
}

impl DriveMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriveMode::Streaming => "streaming",
            DriveMode::Replay => "replay",
        }
    }
}

/// Numeric constants of the simulation that presets may override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub saturation_cap: i32,
    pub transfer_divisor: f64,
    pub spread_scale: f64,
    pub decay_per_tick: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            saturation_cap: DEFAULT_SATURATION_CAP,
            transfer_divisor: DEFAULT_TRANSFER_DIVISOR,
            spread_scale: DEFAULT_SPREAD_SCALE,
            decay_per_tick: DEFAULT_DECAY_PER_TICK,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.saturation_cap <= 0 {
            return Err(ConfigError::InvalidTuning {
                reason: format!("saturation_cap must be > 0 (got {})", self.saturation_cap),
            });
        }
        if !(self.transfer_divisor.is_finite() && self.transfer_divisor > 0.0) {
            return Err(ConfigError::InvalidTuning {
                reason: format!("transfer_divisor must be > 0 (got {})", self.transfer_divisor),
            });
        }
        if !(self.spread_scale.is_finite() && self.spread_scale > 0.0) {
            return Err(ConfigError::InvalidTuning {
                reason: format!("spread_scale must be > 0 (got {})", self.spread_scale),
            });
        }
        if self.decay_per_tick < 0 {
            return Err(ConfigError::InvalidTuning {
                reason: format!("decay_per_tick must be >= 0 (got {})", self.decay_per_tick),
            });
        }
        Ok(())
    }
}

/// Everything an engine needs to know before its first tick.
///
/// Distances (`cell_spacing`, origin, event coordinates) are in canvas units;
/// `brush_radius` is in cells and is scaled by `cell_spacing`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatMapConfig {
    /// Diffusion aggressiveness on the `tuning.spread_scale` scale.
    pub heat_spread: f64,
    pub brush_radius: f64,
    /// Heat injected at the centre of a brush stroke.
    pub brush_intensity: f64,
    /// Drawn cell size. Only renderers use it, but it must still be valid.
    pub cell_size: f64,
    pub cell_spacing: f64,
    pub grid_width: usize,
    pub grid_height: usize,
    /// Canvas extent; required in streaming mode only.
    #[serde(default)]
    pub canvas_width: f64,
    #[serde(default)]
    pub canvas_height: f64,
    /// Canvas position of cell (0, 0).
    #[serde(default)]
    pub origin_x: f64,
    #[serde(default)]
    pub origin_y: f64,
    #[serde(default)]
    pub mode: DriveMode,
    #[serde(default)]
    pub tuning: Tuning,
}

impl Default for HeatMapConfig {
    fn default() -> Self {
        HeatMapConfig {
            heat_spread: 12.0,
            brush_radius: 18.0,
            brush_intensity: 10.0,
            cell_size: 2.0,
            cell_spacing: 2.0,
            grid_width: 90,
            grid_height: 90,
            canvas_width: 900.0,
            canvas_height: 900.0,
            origin_x: 0.0,
            origin_y: 0.0,
            mode: DriveMode::Streaming,
            tuning: Tuning::default(),
        }
    }
}

impl HeatMapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("heat_spread", self.heat_spread),
            ("brush_intensity", self.brush_intensity),
            ("brush_radius", self.brush_radius),
            ("cell_size", self.cell_size),
            ("cell_spacing", self.cell_spacing),
        ] {
            require_positive(field, value)?;
        }
        validate_grid(self.grid_width, self.grid_height)?;

        if self.mode == DriveMode::Streaming {
            require_positive("canvas_width", self.canvas_width)?;
            require_positive("canvas_height", self.canvas_height)?;
        }
        for (field, value) in [("origin_x", self.origin_x), ("origin_y", self.origin_y)] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        self.tuning.validate()?;
        // factor above 1 would move more than the temperature difference
        if self.heat_spread > self.tuning.spread_scale {
            return Err(ConfigError::OutOfRange {
                field: "heat_spread",
                value: self.heat_spread,
                max: self.tuning.spread_scale,
            });
        }
        Ok(())
    }

    /// Canvas distance at which the brush contribution reaches zero.
    pub fn brush_reach(&self) -> f64 {
        self.brush_radius * self.cell_spacing
    }
}

pub(crate) fn validate_grid(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyGrid { width, height });
    }
    // both buffers must stay addressable as i32 slices
    let fits = width
        .checked_mul(height)
        .and_then(|cells| cells.checked_mul(std::mem::size_of::<i32>()))
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        return Err(ConfigError::GridTooLarge { width, height });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_infinite() {
        return Err(ConfigError::NotFinite { field });
    }
    // NaN fails this comparison too
    if !(value > 0.0) {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}
