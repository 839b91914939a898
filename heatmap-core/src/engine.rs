//! Tick driver tying the grid, solver, brush and event source together.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::brush::{Brush, HeatEvent};
use crate::config::{DriveMode, HeatMapConfig, validate_grid};
use crate::dissipation::{Spread, dissipate};
use crate::error::ConfigError;
use crate::grid::GridBuffer;
use crate::source::EventSource;

/// What one call to [`HeatMapEngine::tick`] did.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// 1-based index of the tick that just committed.
    pub tick: u64,
    pub event: Option<HeatEvent>,
    /// The grid was reallocated before decay.
    pub resized: bool,
    /// Heat moved between neighbours during dissipation.
    pub heat_moved: i64,
}

/// Stateful heat diffusion simulation.
///
/// Each [`tick`](Self::tick) runs decay, dissipation, injection of at most one
/// event, clamping and a buffer flip, in that order. Readers only ever see the
/// committed grid.
pub struct HeatMapEngine<R = ChaCha8Rng> {
    config: HeatMapConfig,
    grid: GridBuffer,
    source: EventSource,
    brush: Brush,
    spread: Spread,
    rng: R,
    ticks: u64,
}

impl HeatMapEngine<ChaCha8Rng> {
    pub fn new(
        config: HeatMapConfig,
        events: impl IntoIterator<Item = HeatEvent>,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, events, ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(
        config: HeatMapConfig,
        events: impl IntoIterator<Item = HeatEvent>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(config, events, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> HeatMapEngine<R> {
    /// Build an engine drawing dissipation tie-breaks from `rng`.
    ///
    /// `events` seeds the streaming queue or becomes the replay list,
    /// depending on `config.mode`.
    pub fn with_rng(
        config: HeatMapConfig,
        events: impl IntoIterator<Item = HeatEvent>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = GridBuffer::new(config.grid_width, config.grid_height);
        let source = EventSource::new(config.mode, events);
        debug!(
            width = config.grid_width,
            height = config.grid_height,
            mode = config.mode.as_str(),
            pending = source.pending(),
            "heat map engine created"
        );

        Ok(HeatMapEngine {
            brush: Brush::from_config(&config),
            spread: Spread::from_config(&config),
            config,
            grid,
            source,
            rng,
            ticks: 0,
        })
    }

    // ---- Inputs ----

    /// Queue an event for a later tick. Returns `false` (and drops the event)
    /// in replay mode.
    pub fn push_event(&mut self, event: HeatEvent) -> bool {
        let accepted = self.source.push(event);
        if !accepted {
            trace!(x = event.x, y = event.y, "replay engine ignored pushed event");
        }
        accepted
    }

    /// Change the grid size. The grid is reallocated, and all heat lost, at
    /// the start of the next tick.
    pub fn set_grid_dimensions(&mut self, width: usize, height: usize) -> Result<(), ConfigError> {
        validate_grid(width, height)?;
        self.config.grid_width = width;
        self.config.grid_height = height;
        Ok(())
    }

    // ---- Accessors ----

    pub fn config(&self) -> &HeatMapConfig {
        &self.config
    }

    pub fn mode(&self) -> DriveMode {
        self.source.mode()
    }

    /// Dimensions of the committed grid.
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    pub fn cell_value(&self, x: usize, y: usize) -> Option<u32> {
        self.grid.get(x, y).map(|v| v as u32)
    }

    /// Committed grid, row-major.
    pub fn field(&self) -> &[i32] {
        self.grid.current()
    }

    pub fn total_heat(&self) -> i64 {
        self.grid.current().iter().map(|&v| v as i64).sum()
    }

    pub fn max_heat(&self) -> u32 {
        self.grid.current().iter().copied().max().unwrap_or(0) as u32
    }

    pub fn pending_events(&self) -> usize {
        self.source.pending()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ---- Core ----

    pub fn tick(&mut self) -> TickReport {
        let resized = self.reconcile_dimensions();
        let (width, height) = self.grid.dimensions();
        let decay = self.config.tuning.decay_per_tick;
        let cap = self.config.tuning.saturation_cap;

        self.grid.begin_tick();
        let (current, staging) = self.grid.split_mut();

        for cell in staging.iter_mut() {
            *cell -= decay;
        }

        let heat_moved = dissipate(current, staging, width, height, &self.spread, &mut self.rng);

        let event = self.source.next_event();
        if let Some(e) = &event {
            self.brush.apply(e, staging, width);
        }

        for cell in staging.iter_mut() {
            *cell = (*cell).clamp(0, cap);
        }

        self.grid.commit();
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            applied = event.is_some(),
            heat_moved,
            pending = self.source.pending(),
            "tick committed"
        );

        TickReport {
            tick: self.ticks,
            event,
            resized,
            heat_moved,
        }
    }

    /// Run `n` ticks, returning how many of them injected an event.
    pub fn run(&mut self, n: usize) -> usize {
        (0..n).filter(|_| self.tick().event.is_some()).count()
    }

    fn reconcile_dimensions(&mut self) -> bool {
        let wanted = (self.config.grid_width, self.config.grid_height);
        if self.grid.dimensions() == wanted {
            return false;
        }
        debug!(
            from = ?self.grid.dimensions(),
            to = ?wanted,
            pending = self.source.pending(),
            "grid dimensions changed, resetting heat"
        );
        self.grid.resize(wanted.0, wanted.1);
        true
    }
}
