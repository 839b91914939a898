use heatmap_core::{HeatEvent, HeatMapConfig};
use rand::Rng;

/// Shapes of synthetic event streams for headless runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum EventPattern {
    /// Independent points spread over the whole grid.
    Scatter,
    /// A pointer dragged across the grid in small steps.
    Trail,
    /// A handful of clusters, each hit repeatedly.
    Burst,
}

impl EventPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPattern::Scatter => "scatter",
            EventPattern::Trail => "trail",
            EventPattern::Burst => "burst",
        }
    }
}

pub fn sample_pattern<R: Rng>(rng: &mut R) -> EventPattern {
    match rng.gen_range(0..3) {
        0 => EventPattern::Scatter,
        1 => EventPattern::Trail,
        _ => EventPattern::Burst,
    }
}

/// Canvas rectangle covered by the grid's cell centres.
#[derive(Clone, Copy, Debug)]
struct Extent {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Extent {
    fn of(cfg: &HeatMapConfig) -> Self {
        Extent {
            x0: cfg.origin_x,
            y0: cfg.origin_y,
            x1: cfg.origin_x + (cfg.grid_width.saturating_sub(1)) as f64 * cfg.cell_spacing,
            y1: cfg.origin_y + (cfg.grid_height.saturating_sub(1)) as f64 * cfg.cell_spacing,
        }
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> (f64, f64) {
        let tx: f64 = rng.gen_range(0.0..=1.0);
        let ty: f64 = rng.gen_range(0.0..=1.0);
        (lerp(self.x0, self.x1, tx), lerp(self.y0, self.y1, ty))
    }

    fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.x0, self.x1), y.clamp(self.y0, self.y1))
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn event_at(x: f64, y: f64, heat: f64) -> HeatEvent {
    HeatEvent::new(x.round() as i32, y.round() as i32, heat)
}

/// Generate `count` events in canvas coordinates for `cfg`'s grid.
pub fn generate_events<R: Rng>(
    rng: &mut R,
    cfg: &HeatMapConfig,
    pattern: EventPattern,
    count: usize,
) -> Vec<HeatEvent> {
    let extent = Extent::of(cfg);
    let mut out = Vec::with_capacity(count);

    match pattern {
        EventPattern::Scatter => {
            for _ in 0..count {
                let (x, y) = extent.sample(rng);
                out.push(event_at(x, y, rng.gen_range(1.0..5.0)));
            }
        }

        EventPattern::Trail => {
            // pointer moves a couple of cells per event and turns gradually
            let (mut x, mut y) = extent.sample(rng);
            let mut heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let step = 2.0 * cfg.cell_spacing;
            for _ in 0..count {
                out.push(event_at(x, y, 2.0));
                heading += rng.gen_range(-0.6f64..0.6);
                let (tx, ty) = (x + step * heading.cos(), y + step * heading.sin());
                let (nx, ny) = extent.clamp(tx, ty);
                if (nx, ny) != (tx, ty) {
                    // bounce off the edge
                    heading += std::f64::consts::PI;
                }
                x = nx;
                y = ny;
            }
        }

        EventPattern::Burst => {
            let clusters = rng.gen_range(1..=4usize).min(count.max(1));
            let centres: Vec<(f64, f64)> = (0..clusters).map(|_| extent.sample(rng)).collect();
            let jitter = cfg.brush_reach() * 0.5;
            for i in 0..count {
                let (cx, cy) = centres[i % clusters];
                let dx = if jitter > 0.0 { rng.gen_range(-jitter..=jitter) } else { 0.0 };
                let dy = if jitter > 0.0 { rng.gen_range(-jitter..=jitter) } else { 0.0 };
                let (x, y) = extent.clamp(cx + dx, cy + dy);
                out.push(event_at(x, y, rng.gen_range(1.0..5.0)));
            }
        }
    }

    out
}
