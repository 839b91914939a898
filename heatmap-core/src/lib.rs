//! Heat diffusion grid engine.
//!
//! Point heat events are brushed onto a fixed-size integer grid that decays
//! and diffuses every tick. Renderers read the committed grid through
//! [`HeatMapEngine::field`] or [`HeatMapEngine::cell_value`].

pub mod brush;
pub mod config;
pub mod dissipation;
pub mod engine;
pub mod error;
pub mod grid;
pub mod source;

pub use brush::{Brush, HeatEvent};
pub use config::{DriveMode, HeatMapConfig, Tuning};
pub use engine::{HeatMapEngine, TickReport};
pub use error::ConfigError;
pub use grid::GridBuffer;
pub use source::EventSource;
