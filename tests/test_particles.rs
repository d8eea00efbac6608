use galaxy_invaders::entities::{ExplosionKind, Particle, Rgba};
use galaxy_invaders::particles::*;

use approx::assert_abs_diff_eq;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn spark(lifetime: f32, velocity: Vec2) -> Particle {
    Particle {
        pos: Vec2::new(100.0, 100.0),
        velocity,
        lifetime,
        radius: 2.0,
        color: Rgba { r: 255, g: 120, b: 0, a: 220 },
    }
}

// ── Bursts ────────────────────────────────────────────────────────────────────

#[test]
fn player_burst_shape() {
    let mut particles = Vec::new();
    let origin = Vec2::new(400.0, 566.0);
    spawn_explosion(&mut particles, ExplosionKind::Player, origin, &mut seeded_rng());

    assert_eq!(particles.len(), 40);
    for p in &particles {
        assert_eq!(p.pos, origin);
        assert!(p.velocity.x.abs() <= 90.0 && p.velocity.y.abs() <= 90.0);
        assert!((0.4..=1.2).contains(&p.lifetime));
        assert!((1.0..=3.0).contains(&p.radius));
        assert!(p.color.r >= 100);
        assert!((50..=127).contains(&p.color.g));
        assert_eq!(p.color.b, 0);
        assert_eq!(p.color.a, 220);
    }
}

#[test]
fn enemy_burst_shape() {
    let mut particles = Vec::new();
    let origin = Vec2::new(148.0, 80.0);
    spawn_explosion(&mut particles, ExplosionKind::Enemy, origin, &mut seeded_rng());

    assert_eq!(particles.len(), 25);
    for p in &particles {
        assert_eq!(p.pos, origin);
        assert!(p.velocity.x.abs() <= 60.0 && p.velocity.y.abs() <= 60.0);
        assert!((0.3..=0.8).contains(&p.lifetime));
        assert!((1.0..=2.0).contains(&p.radius));
        assert!((25..=75).contains(&p.color.r));
        assert!((50..=150).contains(&p.color.g));
        assert!((25..=75).contains(&p.color.b));
        assert_eq!(p.color.a, 200);
    }
}

#[test]
fn bursts_append() {
    let mut rng = seeded_rng();
    let mut particles = Vec::new();
    spawn_explosion(&mut particles, ExplosionKind::Enemy, Vec2::ZERO, &mut rng);
    spawn_explosion(&mut particles, ExplosionKind::Player, Vec2::ONE, &mut rng);
    assert_eq!(particles.len(), 65);
}

#[test]
fn bursts_vary_their_velocities() {
    let mut particles = Vec::new();
    spawn_explosion(&mut particles, ExplosionKind::Player, Vec2::ZERO, &mut seeded_rng());
    let first = particles[0].velocity;
    assert!(particles.iter().any(|p| p.velocity != first));
}

// ── Fading ────────────────────────────────────────────────────────────────────

#[test]
fn fade_alpha_is_proportional_to_lifetime() {
    assert_eq!(fade_alpha(ALPHA_LIFETIME_NORM), 200);
    assert_eq!(fade_alpha(0.6), 100);
    assert_eq!(fade_alpha(0.0), 0);
}

#[test]
fn fade_alpha_never_negative() {
    assert_eq!(fade_alpha(-1.0), 0);
    assert_eq!(fade_alpha(f32::MIN), 0);
}

// ── Ageing ────────────────────────────────────────────────────────────────────

#[test]
fn update_moves_and_fades_survivors() {
    let mut particles = vec![spark(1.0, Vec2::new(10.0, -20.0))];
    update_particles(&mut particles, 0.5);
    assert_eq!(particles.len(), 1);
    let p = &particles[0];
    assert_abs_diff_eq!(p.lifetime, 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(p.pos.x, 105.0, epsilon = 1e-4);
    assert_abs_diff_eq!(p.pos.y, 90.0, epsilon = 1e-4);
    assert_eq!(p.color.a, fade_alpha(p.lifetime));
    // colour channels other than alpha are untouched
    assert_eq!((p.color.r, p.color.g, p.color.b), (255, 120, 0));
}

#[test]
fn update_removes_expired() {
    let mut particles = vec![
        spark(0.05, Vec2::ZERO),
        spark(0.1, Vec2::ZERO),
        spark(0.8, Vec2::ZERO),
    ];
    update_particles(&mut particles, 0.1);
    assert_eq!(particles.len(), 1);
    assert!(particles.iter().all(|p| p.lifetime > 0.0));
}

#[test]
fn expired_particle_does_not_move() {
    let mut particles = vec![spark(0.05, Vec2::new(1000.0, 1000.0))];
    update_particles(&mut particles, 0.1);
    assert!(particles.is_empty());
}

#[test]
fn zero_dt_keeps_everything() {
    let mut particles = vec![spark(0.3, Vec2::new(5.0, 5.0))];
    update_particles(&mut particles, 0.0);
    assert_eq!(particles.len(), 1);
    assert_abs_diff_eq!(particles[0].lifetime, 0.3);
    assert_eq!(particles[0].pos, Vec2::new(100.0, 100.0));
}

#[test]
fn lifetimes_only_go_down_until_removed() {
    let mut particles = Vec::new();
    spawn_explosion(&mut particles, ExplosionKind::Player, Vec2::ZERO, &mut seeded_rng());

    for _ in 0..100 {
        let before: Vec<f32> = particles.iter().map(|p| p.lifetime).collect();
        update_particles(&mut particles, 1.0 / 60.0);
        assert!(particles.iter().all(|p| p.lifetime > 0.0));
        // survivors keep their relative order, so each one can be matched
        // against a strictly larger earlier lifetime
        let mut earlier = before.iter();
        for p in &particles {
            assert!(earlier.any(|&old| p.lifetime < old));
        }
    }
    // every burst lives at most 1.2 s
    assert!(particles.is_empty());
}
