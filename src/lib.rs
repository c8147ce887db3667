//! Fireworks for the terminal.
//!
//! [`SimulationEngine`] owns every firework and particle and advances them one
//! tick at a time; [`Canvas`] rasterises the engine's draw calls into
//! true-colour half-block output.

pub mod canvas;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod firework;
pub mod input;
pub mod particle;
pub mod random;
pub mod surface;
pub mod trail;

pub use canvas::Canvas;
pub use config::Config;
pub use engine::{Launch, SimulationEngine, TickSummary, Trigger};
pub use error::{Error, Result};
pub use firework::{Firework, Flight};
pub use particle::{Life, Particle};
pub use surface::{DrawCommand, Stroke, Surface};
