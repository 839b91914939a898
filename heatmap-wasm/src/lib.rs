use heatmap_core::{DriveMode, HeatEvent, HeatMapConfig, HeatMapEngine};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct HeatMap {
    inner: HeatMapEngine,
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl HeatMap {
    /// Streaming engine with the default tuning; the grid starts at canvas (0, 0).
    #[wasm_bindgen(constructor)]
    pub fn new(
        grid_width: usize,
        grid_height: usize,
        cell_spacing: f64,
        brush_radius: f64,
        brush_intensity: f64,
        heat_spread: f64,
        seed: u64,
    ) -> Result<HeatMap, JsValue> {
        let config = HeatMapConfig {
            heat_spread,
            brush_radius,
            brush_intensity,
            cell_size: cell_spacing,
            cell_spacing,
            grid_width,
            grid_height,
            canvas_width: grid_width as f64 * cell_spacing,
            canvas_height: grid_height as f64 * cell_spacing,
            ..HeatMapConfig::default()
        };
        let inner = HeatMapEngine::with_seed(config, [], seed).map_err(to_js)?;
        Ok(HeatMap { inner })
    }

    /// Engine from a JSON `HeatMapConfig`. In replay mode the list is empty;
    /// use [`HeatMap::replay`] to supply one.
    pub fn from_config_json(json: &str, seed: u64) -> Result<HeatMap, JsValue> {
        let config: HeatMapConfig = serde_json::from_str(json).map_err(to_js)?;
        let inner = HeatMapEngine::with_seed(config, [], seed).map_err(to_js)?;
        Ok(HeatMap { inner })
    }

    /// Replay engine over parallel coordinate / heat arrays.
    pub fn replay(
        json: &str,
        xs: Vec<i32>,
        ys: Vec<i32>,
        heats: Vec<f64>,
        seed: u64,
    ) -> Result<HeatMap, JsValue> {
        if xs.len() != ys.len() || xs.len() != heats.len() {
            return Err(JsValue::from_str("xs, ys and heats must have the same length"));
        }
        let mut config: HeatMapConfig = serde_json::from_str(json).map_err(to_js)?;
        config.mode = DriveMode::Replay;

        let events = xs
            .into_iter()
            .zip(ys)
            .zip(heats)
            .map(|((x, y), heat)| HeatEvent::new(x, y, heat));
        let inner = HeatMapEngine::with_seed(config, events, seed).map_err(to_js)?;
        Ok(HeatMap { inner })
    }

    // Inputs
    pub fn push_event(&mut self, x: i32, y: i32, heat: f64) -> bool {
        self.inner.push_event(HeatEvent::new(x, y, heat))
    }

    pub fn set_grid_dimensions(&mut self, width: usize, height: usize) -> Result<(), JsValue> {
        self.inner.set_grid_dimensions(width, height).map_err(to_js)
    }

    // Read side for renderers
    pub fn width(&self) -> usize { self.inner.dimensions().0 }
    pub fn height(&self) -> usize { self.inner.dimensions().1 }
    pub fn pending_events(&self) -> usize { self.inner.pending_events() }

    pub fn cell_value(&self, x: usize, y: usize) -> u32 {
        self.inner.cell_value(x, y).unwrap_or(0)
    }

    // Copy-based JS access (reliable)
    pub fn get_field(&self) -> Vec<u32> {
        self.inner.field().iter().map(|&v| v as u32).collect()
    }

    // Tick + timing (WASM-only)
    pub fn tick(&mut self) -> TickInfo {
        let t0 = now_ms();
        let report = self.inner.tick();
        let t1 = now_ms();
        TickInfo {
            applied: report.event.is_some(),
            resized: report.resized,
            compute_ms: t1 - t0,
        }
    }
}

#[wasm_bindgen]
pub struct TickInfo {
    applied: bool,
    resized: bool,
    compute_ms: f64,
}

#[wasm_bindgen]
impl TickInfo {
    pub fn applied(&self) -> bool { self.applied }
    pub fn resized(&self) -> bool { self.resized }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}


fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
