use serde::{Deserialize, Serialize};

use crate::config::HeatMapConfig;

/// A point heat source in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeatEvent {
    pub x: i32,
    pub y: i32,
    /// Carried through for collaborators; the falloff does not use it.
    #[serde(default)]
    pub heat: f64,
}

impl HeatEvent {
    pub fn new(x: i32, y: i32, heat: f64) -> Self {
        HeatEvent { x, y, heat }
    }
}

/// Radial brush with linear falloff from `intensity` at the centre to zero at
/// `reach`. A single stroke never adds more than `cap`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    pub intensity: f64,
    pub reach: f64,
    pub cap: i32,
    pub spacing: f64,
    pub origin: (f64, f64),
}

impl Brush {
    pub fn from_config(cfg: &HeatMapConfig) -> Self {
        Brush {
            intensity: cfg.brush_intensity,
            reach: cfg.brush_reach(),
            cap: cfg.tuning.saturation_cap,
            spacing: cfg.cell_spacing,
            origin: (cfg.origin_x, cfg.origin_y),
        }
    }

    /// Canvas position of the centre of cell `(cx, cy)`.
    pub fn cell_position(&self, cx: usize, cy: usize) -> (f64, f64) {
        (
            cx as f64 * self.spacing + self.origin.0,
            cy as f64 * self.spacing + self.origin.1,
        )
    }

    /// Heat `event` adds to cell `(cx, cy)`.
    pub fn contribution(&self, event: &HeatEvent, cx: usize, cy: usize) -> i32 {
        let (px, py) = self.cell_position(cx, cy);
        let distance = (event.x as f64 - px).hypot(event.y as f64 - py);
        if distance >= self.reach {
            return 0;
        }
        let heat = map_range(distance, 0.0, self.reach, self.intensity, 0.0).round();
        heat.min(self.cap as f64) as i32
    }

    /// Add the brush stroke for `event` to every cell of a row-major buffer.
    pub fn apply(&self, event: &HeatEvent, staging: &mut [i32], width: usize) -> i64 {
        let mut added = 0i64;
        for (i, cell) in staging.iter_mut().enumerate() {
            let heat = self.contribution(event, i % width, i / width);
            *cell = cell.saturating_add(heat);
            added += heat as i64;
        }
        added
    }
}

/// Linear re-mapping of `value` from one range onto another.
pub fn map_range(value: f64, from_start: f64, from_end: f64, to_start: f64, to_end: f64) -> f64 {
    to_start + (value - from_start) * (to_end - to_start) / (from_end - from_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brush(intensity: f64, radius: f64, spacing: f64) -> Brush {
        Brush {
            intensity,
            reach: radius * spacing,
            cap: 240,
            spacing,
            origin: (0.0, 0.0),
        }
    }

    #[test]
    fn map_range_is_linear() {
        assert_eq!(map_range(0.0, 0.0, 1.0, 10.0, 0.0), 10.0);
        assert_eq!(map_range(0.5, 0.0, 1.0, 10.0, 0.0), 5.0);
        assert_eq!(map_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
    }

    #[test]
    fn centre_gets_full_intensity() {
        let b = brush(10.0, 1.0, 1.0);
        assert_eq!(b.contribution(&HeatEvent::new(1, 1, 0.0), 1, 1), 10);
    }

    #[test]
    fn boundary_and_beyond_get_nothing() {
        let b = brush(10.0, 1.0, 1.0);
        let e = HeatEvent::new(1, 1, 0.0);
        // orthogonal neighbours sit exactly on the radius
        assert_eq!(b.contribution(&e, 2, 1), 0);
        assert_eq!(b.contribution(&e, 0, 0), 0);
    }

    #[test]
    fn falloff_scales_with_spacing() {
        // radius 3 cells of 25 units: reach 75, one cell away is 25 -> 100 * 2/3
        let b = brush(100.0, 3.0, 25.0);
        let e = HeatEvent::new(50, 50, 2.0);
        assert_eq!(b.contribution(&e, 2, 2), 100);
        assert_eq!(b.contribution(&e, 3, 2), 67);
        assert_eq!(b.contribution(&e, 4, 2), 33);
        assert_eq!(b.contribution(&e, 5, 2), 0);
    }

    #[test]
    fn origin_shifts_cell_positions() {
        let b = Brush {
            origin: (10.0, 20.0),
            ..brush(10.0, 2.0, 5.0)
        };
        assert_eq!(b.cell_position(1, 1), (15.0, 25.0));
        assert_eq!(b.contribution(&HeatEvent::new(15, 25, 0.0), 1, 1), 10);
        // (10, 20) is ~7.07 away from the event
        assert_eq!(b.contribution(&HeatEvent::new(15, 25, 0.0), 0, 0), 3);
        assert_eq!(b.contribution(&HeatEvent::new(15, 25, 0.0), 3, 3), 0);
    }

    #[test]
    fn huge_intensity_is_capped_per_stroke() {
        let b = brush(1e10, 2.0, 1.0);
        let e = HeatEvent::new(1, 1, 0.0);
        assert_eq!(b.contribution(&e, 1, 1), 240);

        let mut staging = vec![i32::MAX - 5, 0, 0];
        b.apply(&e, &mut staging, 3);
        assert_eq!(staging[0], i32::MAX);
    }

    #[test]
    fn apply_touches_only_cells_in_reach() {
        let b = brush(10.0, 1.0, 1.0);
        let mut staging = vec![0; 9];
        let added = b.apply(&HeatEvent::new(1, 1, 0.0), &mut staging, 3);
        assert_eq!(added, 10);
        assert_eq!(staging, vec![0, 0, 0, 0, 10, 0, 0, 0, 0]);
    }

    #[test]
    fn event_heat_is_optional_in_json() {
        let e: HeatEvent = serde_json::from_str(r#"{"x": 4, "y": 7}"#).unwrap();
        assert_eq!(e, HeatEvent::new(4, 7, 0.0));
    }
}
