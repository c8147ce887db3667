use crate::config::Config;
use crate::random::{distance, random};
use crate::surface::{Stroke, Surface};
use crate::trail::Trail;

const TARGET_RADIUS_MIN: f32 = 1.0;
const TARGET_RADIUS_MAX: f32 = 8.0;
const TARGET_RADIUS_STEP: f32 = 0.3;

/// Outcome of one firework tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Airborne,
    /// The firework reached its target and must be replaced by a burst.
    Arrived,
}

/// A projectile flying in a straight line from its launch point to its target.
#[derive(Debug, Clone)]
pub struct Firework {
    x: f32,
    y: f32,
    start_x: f32,
    start_y: f32,
    target_x: f32,
    target_y: f32,
    distance_to_target: f32,
    distance_traveled: f32,
    angle: f32,
    speed: f32,
    acceleration: f32,
    brightness: f32,
    trail: Trail,
    target_radius: f32,
}

impl Firework {
    /// Coordinates must be finite; the engine checks this before calling.
    pub fn new(
        start: (f32, f32),
        target: (f32, f32),
        config: &Config,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let (start_x, start_y) = start;
        let (target_x, target_y) = target;
        debug_assert!(
            start_x.is_finite() && start_y.is_finite(),
            "non-finite launch point"
        );
        debug_assert!(
            target_x.is_finite() && target_y.is_finite(),
            "non-finite target"
        );

        let dx = target_x - start_x;
        let dy = target_y - start_y;
        // A zero-length launch has no direction; fly "east" and arrive on the first tick.
        let angle = if dx == 0.0 && dy == 0.0 {
            0.0
        } else {
            dy.atan2(dx)
        };

        Self {
            x: start_x,
            y: start_y,
            start_x,
            start_y,
            target_x,
            target_y,
            distance_to_target: distance(start_x, start_y, target_x, target_y),
            distance_traveled: 0.0,
            angle,
            speed: config.firework_speed,
            acceleration: config.firework_acceleration,
            brightness: random(
                rng,
                config.firework_brightness_min,
                config.firework_brightness_max,
            ),
            trail: Trail::new(config.firework_trail_length, start_x, start_y),
            target_radius: TARGET_RADIUS_MIN,
        }
    }

    /// Advances one tick.
    ///
    /// Arrival is decided on the position the firework *would* reach this
    /// tick, so it is flagged one tick before its drawn position gets there.
    /// The last drawn position can therefore fall short of the target by up to
    /// one tick's displacement. The burst hides this because it is placed on
    /// the target itself, not on the firework.
    pub fn advance(&mut self) -> Flight {
        self.trail.push(self.x, self.y);

        if self.target_radius < TARGET_RADIUS_MAX {
            self.target_radius += TARGET_RADIUS_STEP;
        } else {
            self.target_radius = TARGET_RADIUS_MIN;
        }

        self.speed *= self.acceleration;

        let vx = self.angle.cos() * self.speed;
        let vy = self.angle.sin() * self.speed;

        let traveled = distance(self.start_x, self.start_y, self.x + vx, self.y + vy);
        self.distance_traveled = self.distance_traveled.max(traveled);

        if self.distance_traveled >= self.distance_to_target {
            return Flight::Arrived;
        }

        self.x += vx;
        self.y += vy;
        Flight::Airborne
    }

    pub fn render(&self, hue: f32, target_indicator: bool, surface: &mut impl Surface) {
        let stroke = Stroke::hsl(hue, self.brightness);
        surface.line(self.trail.oldest(), (self.x, self.y), stroke);

        if target_indicator {
            surface.ring(self.target(), self.target_radius, stroke);
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn start(&self) -> (f32, f32) {
        (self.start_x, self.start_y)
    }

    pub fn target(&self) -> (f32, f32) {
        (self.target_x, self.target_y)
    }

    pub fn distance_to_target(&self) -> f32 {
        self.distance_to_target
    }

    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn target_radius(&self) -> f32 {
        self.target_radius
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}
