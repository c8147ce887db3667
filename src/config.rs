//! Tunable constants for the display.
//!
//! The defaults are sized for a canvas of roughly 720 pixels tall; terminal
//! surfaces are much smaller, so the binary shrinks the distance-per-tick
//! values with [`Config::scaled`].

use crate::error::{Error, Result};

/// Surface height the default speeds and gravity were tuned for.
pub const REFERENCE_HEIGHT: f32 = 720.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Speed multiplier applied every tick. 1.0 keeps a constant speed.
    pub firework_acceleration: f32,
    pub firework_brightness_min: f32,
    pub firework_brightness_max: f32,
    /// Launch speed in pixels per tick.
    pub firework_speed: f32,
    pub firework_trail_length: usize,
    /// Draw a pulsing ring at each firework's target.
    pub firework_target_indicator: bool,

    pub particle_brightness_min: f32,
    pub particle_brightness_max: f32,
    /// Particles per burst.
    pub particle_count: usize,
    pub particle_decay_min: f32,
    pub particle_decay_max: f32,
    /// Velocity multiplier applied every tick on both axes.
    pub particle_friction: f32,
    /// Added to vertical velocity every tick.
    pub particle_gravity: f32,
    /// Maximum hue offset from the burst hue, in degrees.
    pub particle_hue_variance: f32,
    /// Starting alpha.
    pub particle_transparency: f32,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_trail_length: usize,

    /// Alpha of the fade pass composited over the surface each frame.
    /// Lower values keep trails around longer.
    pub canvas_cleanup_alpha: f32,
    /// Hue rotation per tick, in degrees.
    pub hue_step_increase: f32,

    /// Minimum ticks between manual launches while the pointer is held.
    pub ticks_per_firework_min: u32,
    pub ticks_per_firework_automated_min: u32,
    pub ticks_per_firework_automated_max: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            firework_acceleration: 1.05,
            firework_brightness_min: 50.0,
            firework_brightness_max: 70.0,
            firework_speed: 5.0,
            firework_trail_length: 3,
            firework_target_indicator: true,

            particle_brightness_min: 50.0,
            particle_brightness_max: 80.0,
            particle_count: 80,
            particle_decay_min: 0.015,
            particle_decay_max: 0.03,
            particle_friction: 0.95,
            particle_gravity: 0.7,
            particle_hue_variance: 20.0,
            particle_transparency: 1.0,
            particle_speed_min: 1.0,
            particle_speed_max: 10.0,
            particle_trail_length: 5,

            canvas_cleanup_alpha: 0.3,
            hue_step_increase: 0.5,

            ticks_per_firework_min: 5,
            ticks_per_firework_automated_min: 20,
            ticks_per_firework_automated_max: 80,
        }
    }
}

impl Config {
    /// Scale factor that maps the defaults onto a surface `height` pixels tall.
    pub fn scale_for_height(height: usize) -> f32 {
        (height as f32 / REFERENCE_HEIGHT).clamp(0.05, 1.0)
    }

    /// Returns a copy with every distance-per-tick value multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            firework_speed: self.firework_speed * factor,
            particle_speed_min: self.particle_speed_min * factor,
            particle_speed_max: self.particle_speed_max * factor,
            particle_gravity: self.particle_gravity * factor,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range(
            "firework brightness",
            self.firework_brightness_min,
            self.firework_brightness_max,
        )?;
        check_range(
            "particle brightness",
            self.particle_brightness_min,
            self.particle_brightness_max,
        )?;
        check_range("particle decay", self.particle_decay_min, self.particle_decay_max)?;
        check_range("particle speed", self.particle_speed_min, self.particle_speed_max)?;

        if self.particle_decay_min <= 0.0 {
            return Err(invalid("particle decay must be positive"));
        }
        if !(self.particle_friction > 0.0 && self.particle_friction <= 1.0) {
            return Err(invalid(format!(
                "particle friction {} must be in (0, 1]",
                self.particle_friction
            )));
        }
        if !(self.firework_acceleration >= 1.0) {
            return Err(invalid(format!(
                "firework acceleration {} must be at least 1",
                self.firework_acceleration
            )));
        }
        if !(self.firework_speed > 0.0) {
            return Err(invalid("firework speed must be positive"));
        }
        if !(0.0..=1.0).contains(&self.canvas_cleanup_alpha) {
            return Err(invalid(format!(
                "canvas cleanup alpha {} must be in [0, 1]",
                self.canvas_cleanup_alpha
            )));
        }
        if !(self.particle_transparency > 0.0 && self.particle_transparency <= 1.0) {
            return Err(invalid("particle transparency must be in (0, 1]"));
        }
        if self.firework_trail_length == 0 || self.particle_trail_length == 0 {
            return Err(invalid("trail lengths must be at least 1"));
        }
        if self.ticks_per_firework_automated_min > self.ticks_per_firework_automated_max {
            return Err(invalid(format!(
                "automatic launch interval {}..{} is empty",
                self.ticks_per_firework_automated_min, self.ticks_per_firework_automated_max
            )));
        }
        if !self.hue_step_increase.is_finite() || !self.particle_gravity.is_finite() {
            return Err(invalid("hue step and gravity must be finite"));
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}

fn check_range(name: &str, min: f32, max: f32) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(invalid(format!("{name} range {min}..{max} is invalid")));
    }
    Ok(())
}
