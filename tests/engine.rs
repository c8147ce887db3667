use pretty_assertions::assert_eq;
use proptest::prelude::*;
use termfireworks::{
    Config, DrawCommand, Firework, Flight, Launch, Life, Particle, SimulationEngine,
};

/// Default constants with the automatic trigger pushed out of reach.
fn manual_only() -> Config {
    Config {
        ticks_per_firework_automated_min: u32::MAX - 1,
        ticks_per_firework_automated_max: u32::MAX - 1,
        ..Config::default()
    }
}

#[test]
fn test_vertical_launch_scenario() {
    let config = Config {
        particle_hue_variance: 0.0,
        ..manual_only()
    };
    let mut engine = SimulationEngine::with_seed(config, 200, 900, 42).unwrap();
    engine.launch((100.0, 800.0), (100.0, 200.0)).unwrap();

    let summary = engine.advance();
    assert_eq!(summary.bursts, 0);
    let firework = &engine.fireworks()[0];
    assert!((firework.speed() - 5.25).abs() < 1e-5);
    let (x, y) = firework.position();
    assert!((x - 100.0).abs() < 1e-3);
    assert!(y < 800.0 && y > 200.0);

    let mut traveled = firework.distance_traveled();
    let mut ticks = 1;
    loop {
        let hue_at_burst = engine.hue();
        let summary = engine.advance();
        ticks += 1;
        assert!(ticks < 200, "firework never arrived");

        if summary.bursts == 1 {
            assert!(engine.fireworks().is_empty());
            assert_eq!(engine.particles().len(), 80);
            assert!(
                engine
                    .particles()
                    .iter()
                    .all(|p| p.position() == (100.0, 200.0) && p.hue() == hue_at_burst)
            );
            break;
        }

        let firework = &engine.fireworks()[0];
        assert!(firework.distance_traveled() > traveled);
        assert!(firework.distance_traveled() < 600.0);
        traveled = firework.distance_traveled();
    }

    // The firework is gone for good: no second burst.
    for _ in 0..200 {
        assert_eq!(engine.advance().bursts, 0);
    }
    assert!(engine.particles().is_empty());
}

#[test]
fn test_particle_with_fixed_decay_lives_fifty_ticks() {
    let config = Config {
        particle_decay_min: 0.02,
        particle_decay_max: 0.02,
        ..Config::default()
    };
    let mut rng = fastrand::Rng::with_seed(8);
    let mut particle = Particle::new((0.0, 0.0), 120.0, &config, &mut rng);

    let mut ticks = 0;
    while particle.advance() == Life::Alive {
        ticks += 1;
        assert!(ticks < 100);
    }
    assert_eq!(ticks + 1, 50);
}

#[test]
fn test_burst_size_and_shared_origin() {
    let config = Config {
        particle_count: 37,
        ..manual_only()
    };
    let mut engine = SimulationEngine::with_seed(config, 100, 100, 3).unwrap();
    engine.launch((50.0, 100.0), (50.0, 97.0)).unwrap();
    engine.advance();

    let particles = engine.particles();
    assert_eq!(particles.len(), 37);
    assert!(particles.iter().all(|p| p.position() == (50.0, 97.0)));
}

#[test]
fn test_same_seed_same_show() {
    fn launches(seed: u64) -> Vec<(u64, Launch)> {
        let mut engine = SimulationEngine::with_seed(Config::default(), 640, 480, seed).unwrap();
        let mut out = Vec::new();
        for _ in 0..3000 {
            let summary = engine.advance();
            for launch in summary.launches {
                out.push((summary.tick, launch));
            }
        }
        out
    }

    let a = launches(1234);
    let b = launches(1234);
    assert!(!a.is_empty());
    assert_eq!(a, b);
    assert_ne!(a, launches(4321));
}

#[test]
fn test_render_is_idempotent() {
    let mut engine = SimulationEngine::with_seed(Config::default(), 640, 480, 77).unwrap();
    engine.pointer_down(320.0, 100.0).unwrap();
    for _ in 0..120 {
        engine.advance();
    }
    assert!(!engine.particles().is_empty() || !engine.fireworks().is_empty());

    let mut first: Vec<DrawCommand> = Vec::new();
    let mut second: Vec<DrawCommand> = Vec::new();
    engine.render(&mut first);
    engine.render(&mut second);
    assert_eq!(first, second);

    engine.advance();
    let mut third: Vec<DrawCommand> = Vec::new();
    engine.render(&mut third);
    assert_ne!(first, third);
}

#[test]
fn test_long_run_stays_bounded() {
    let mut engine = SimulationEngine::with_seed(Config::default(), 640, 480, 5).unwrap();
    let mut peak = 0;
    for _ in 0..10_000 {
        engine.advance();
        peak = peak.max(engine.particles().len());
    }
    // Launches are at least 21 ticks apart, flights last well under 50 ticks
    // and particles at most 67, so only a handful of bursts can overlap.
    assert!(peak <= 80 * 7, "peak {peak}");
}

proptest! {
    #[test]
    fn prop_particle_alpha_never_increases(
        decay in 0.015f32..0.03,
        seed in any::<u64>(),
    ) {
        let config = Config {
            particle_decay_min: decay,
            particle_decay_max: decay,
            ..Config::default()
        };
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut particle = Particle::new((0.0, 0.0), 0.0, &config, &mut rng);

        let mut ticks = 0u32;
        let mut alpha = particle.alpha();
        loop {
            let life = particle.advance();
            ticks += 1;
            prop_assert!(particle.alpha() <= alpha);
            alpha = particle.alpha();
            if life == Life::Expired {
                break;
            }
            prop_assert!(ticks < 200);
        }

        let expected = 1.0 / decay;
        prop_assert!((ticks as f32 - expected).abs() <= 1.0,
            "lived {} ticks, expected about {}", ticks, expected);
    }

    #[test]
    fn prop_firework_distance_never_decreases(
        sx in 0.0f32..1000.0,
        sy in 0.0f32..1000.0,
        tx in 0.0f32..1000.0,
        ty in 0.0f32..1000.0,
    ) {
        let mut rng = fastrand::Rng::with_seed(0);
        let mut firework = Firework::new((sx, sy), (tx, ty), &Config::default(), &mut rng);

        let mut traveled = firework.distance_traveled();
        let mut arrived = false;
        for _ in 0..200 {
            let flight = firework.advance();
            prop_assert!(firework.distance_traveled() >= traveled);
            traveled = firework.distance_traveled();
            if flight == Flight::Arrived {
                arrived = true;
                break;
            }
        }
        prop_assert!(arrived);
    }
}
