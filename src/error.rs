//! Error types for the fireworks simulation.

use thiserror::Error;

/// Errors raised at the boundary of the simulation.
///
/// The engine's per-tick operations never fail; these only come from input
/// capture and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A coordinate that is non-finite or outside the drawing surface
    #[error("invalid coordinate ({x}, {y})")]
    InvalidCoordinate { x: f32, y: f32 },

    /// A configuration value outside its allowed range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
