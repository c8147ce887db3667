use crate::config::Config;
use crate::random::random;
use crate::surface::{Stroke, Surface};
use crate::trail::Trail;
use std::f32::consts::TAU;

/// Particles at or below this alpha are considered fully faded.
pub const ALPHA_EPSILON: f32 = 1e-4;

/// Outcome of one particle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Life {
    Alive,
    Expired,
}

/// One spark of a burst.
#[derive(Debug, Clone)]
pub struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    friction: f32,
    gravity: f32,
    alpha: f32,
    decay: f32,
    brightness: f32,
    hue: f32,
    trail: Trail,
}

impl Particle {
    pub fn new(origin: (f32, f32), hue: f32, config: &Config, rng: &mut fastrand::Rng) -> Self {
        let (x, y) = origin;
        let angle = random(rng, 0.0, TAU);
        let speed = random(rng, config.particle_speed_min, config.particle_speed_max);

        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            friction: config.particle_friction,
            gravity: config.particle_gravity,
            alpha: config.particle_transparency,
            decay: random(rng, config.particle_decay_min, config.particle_decay_max),
            brightness: random(
                rng,
                config.particle_brightness_min,
                config.particle_brightness_max,
            ),
            hue: random(
                rng,
                hue - config.particle_hue_variance,
                hue + config.particle_hue_variance,
            ),
            trail: Trail::new(config.particle_trail_length, x, y),
        }
    }

    pub fn advance(&mut self) -> Life {
        self.trail.push(self.x, self.y);

        self.vx *= self.friction;
        self.vy *= self.friction;
        self.vy += self.gravity;

        self.x += self.vx;
        self.y += self.vy;

        self.alpha -= self.decay;

        if self.is_expired() {
            Life::Expired
        } else {
            Life::Alive
        }
    }

    pub fn render(&self, surface: &mut impl Surface) {
        if self.is_expired() {
            return;
        }
        surface.line(
            self.trail.oldest(),
            (self.x, self.y),
            Stroke::hsla(self.hue, self.brightness, self.alpha),
        );
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= ALPHA_EPSILON
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}
