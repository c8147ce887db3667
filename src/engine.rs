//! The simulation loop: owns every live firework and particle and advances
//! them one tick at a time.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::firework::{Firework, Flight};
use crate::particle::{Life, Particle};
use crate::random::random;
use crate::surface::Surface;
use log::{debug, trace};

/// What caused a firework to be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Pointer held down.
    Manual,
    /// Random-interval timer.
    Automatic,
}

/// A firework launched during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Launch {
    pub trigger: Trigger,
    pub start: (f32, f32),
    pub target: (f32, f32),
}

/// Summary of one call to [`SimulationEngine::advance`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    pub tick: u64,
    pub launches: Vec<Launch>,
    pub bursts: usize,
    pub particles_expired: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Pointer {
    down: bool,
    x: f32,
    y: f32,
}

pub struct SimulationEngine {
    config: Config,
    width: usize,
    height: usize,
    rng: fastrand::Rng,
    fireworks: Vec<Firework>,
    particles: Vec<Particle>,
    hue: f32,
    tick: u64,
    manual_ticks: u32,
    automatic_ticks: u32,
    automatic_threshold: u32,
    pointer: Pointer,
}

impl SimulationEngine {
    /// Creates an engine seeded from system entropy.
    ///
    /// Fails with [`Error::InvalidConfig`] if `config` does not validate.
    pub fn new(config: Config, width: usize, height: usize) -> Result<Self> {
        Self::with_rng(config, width, height, fastrand::Rng::new())
    }

    /// Creates an engine whose every random choice is determined by `seed`.
    pub fn with_seed(config: Config, width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::with_rng(config, width, height, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(
        config: Config,
        width: usize,
        height: usize,
        mut rng: fastrand::Rng,
    ) -> Result<Self> {
        config.validate()?;
        let hue = random(&mut rng, 0.0, 360.0);
        let automatic_threshold = Self::draw_threshold(&config, &mut rng);
        Ok(Self {
            config,
            width,
            height,
            rng,
            fireworks: Vec::new(),
            particles: Vec::new(),
            hue,
            tick: 0,
            manual_ticks: 0,
            automatic_ticks: 0,
            automatic_threshold,
            pointer: Pointer::default(),
        })
    }

    fn draw_threshold(config: &Config, rng: &mut fastrand::Rng) -> u32 {
        rng.u32(config.ticks_per_firework_automated_min..=config.ticks_per_firework_automated_max)
    }

    /// Advances the whole display by one tick.
    ///
    /// Particles from bursts spawned this tick are not advanced until the
    /// next one, and fireworks launched this tick likewise start moving next
    /// tick.
    pub fn advance(&mut self) -> TickSummary {
        self.tick += 1;
        self.manual_ticks = self.manual_ticks.saturating_add(1);
        self.automatic_ticks = self.automatic_ticks.saturating_add(1);

        let mut summary = TickSummary {
            tick: self.tick,
            ..TickSummary::default()
        };

        let mut burst_origins = Vec::new();
        self.fireworks.retain_mut(|firework| match firework.advance() {
            Flight::Airborne => true,
            Flight::Arrived => {
                burst_origins.push(firework.target());
                false
            }
        });

        let before = self.particles.len();
        self.particles
            .retain_mut(|particle| particle.advance() == Life::Alive);
        summary.particles_expired = before - self.particles.len();

        for origin in burst_origins {
            self.burst(origin);
            summary.bursts += 1;
        }

        if self.pointer.down && self.manual_ticks > self.config.ticks_per_firework_min {
            let start = self.launch_point();
            let target = (self.pointer.x, self.pointer.y);
            self.spawn(Trigger::Manual, start, target, &mut summary);
            self.manual_ticks = 0;
        }

        if self.automatic_ticks > self.automatic_threshold {
            let width = self.width as f32;
            let height = self.height as f32;
            let start = (random(&mut self.rng, 0.0, width), height);
            let target = (
                random(&mut self.rng, 0.0, width),
                random(&mut self.rng, 0.0, height / 2.0),
            );
            self.spawn(Trigger::Automatic, start, target, &mut summary);
            self.automatic_ticks = 0;
            self.automatic_threshold = Self::draw_threshold(&self.config, &mut self.rng);
        }

        self.hue = (self.hue + self.config.hue_step_increase).rem_euclid(360.0);

        trace!(
            "tick {}: {} fireworks, {} particles, {} expired",
            self.tick,
            self.fireworks.len(),
            self.particles.len(),
            summary.particles_expired
        );
        summary
    }

    /// Issues the draw calls for the current state, fade pass first.
    pub fn render(&self, surface: &mut impl Surface) {
        surface.fade(self.config.canvas_cleanup_alpha);
        for firework in &self.fireworks {
            firework.render(self.hue, self.config.firework_target_indicator, surface);
        }
        for particle in &self.particles {
            particle.render(surface);
        }
    }

    /// Launches a firework from outside the trigger policy.
    pub fn launch(&mut self, start: (f32, f32), target: (f32, f32)) -> Result<()> {
        self.check_finite(start)?;
        self.check_finite(target)?;
        debug!("launch requested {:?} -> {:?}", start, target);
        self.fireworks
            .push(Firework::new(start, target, &self.config, &mut self.rng));
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<()> {
        self.pointer_moved(x, y)?;
        self.pointer.down = true;
        Ok(())
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Result<()> {
        self.check_on_surface(x, y)?;
        self.pointer.x = x;
        self.pointer.y = y;
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        self.pointer.down = false;
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer.down
    }

    /// Changes the surface bounds. Live entities keep flying.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        if !self.pointer_in_bounds() {
            self.pointer = Pointer::default();
        }
    }

    /// Where manual launches start: bottom centre of the surface.
    pub fn launch_point(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32)
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn spawn(
        &mut self,
        trigger: Trigger,
        start: (f32, f32),
        target: (f32, f32),
        summary: &mut TickSummary,
    ) {
        debug!(
            "tick {}: {:?} launch ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            self.tick, trigger, start.0, start.1, target.0, target.1
        );
        self.fireworks
            .push(Firework::new(start, target, &self.config, &mut self.rng));
        summary.launches.push(Launch {
            trigger,
            start,
            target,
        });
    }

    fn burst(&mut self, origin: (f32, f32)) {
        debug!(
            "tick {}: burst of {} at ({:.1}, {:.1}), hue {:.1}",
            self.tick, self.config.particle_count, origin.0, origin.1, self.hue
        );
        self.particles.reserve(self.config.particle_count);
        for _ in 0..self.config.particle_count {
            self.particles
                .push(Particle::new(origin, self.hue, &self.config, &mut self.rng));
        }
    }

    fn check_finite(&self, (x, y): (f32, f32)) -> Result<()> {
        if x.is_finite() && y.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate { x, y })
        }
    }

    fn check_on_surface(&self, x: f32, y: f32) -> Result<()> {
        self.check_finite((x, y))?;
        if x < 0.0 || y < 0.0 || x > self.width as f32 || y > self.height as f32 {
            return Err(Error::InvalidCoordinate { x, y });
        }
        Ok(())
    }

    fn pointer_in_bounds(&self) -> bool {
        self.check_on_surface(self.pointer.x, self.pointer.y).is_ok()
    }
}
