/// Explosion bursts and particle ageing.
///
/// Particles never influence gameplay; they are updated every frame in every
/// game state so an explosion keeps fading behind the game-over screen.

use glam::Vec2;
use rand::Rng;

use crate::entities::{ExplosionKind, Particle, Rgba};

/// Lifetime that maps to the full base alpha.
pub const ALPHA_LIFETIME_NORM: f32 = 1.2;
/// Alpha of a particle whose remaining lifetime equals `ALPHA_LIFETIME_NORM`.
pub const BASE_ALPHA: f32 = 200.0;

/// Shape of one burst: how many sparks, how fast, how long, how large.
#[derive(Clone, Copy, Debug)]
pub struct BurstProfile {
    pub count: usize,
    /// Each velocity component is drawn from `-max_speed..=max_speed`.
    pub max_speed: f32,
    pub lifetime: (f32, f32),
    pub max_radius: u32,
    pub spawn_alpha: u8,
}

pub fn burst_profile(kind: ExplosionKind) -> BurstProfile {
    match kind {
        ExplosionKind::Player => BurstProfile {
            count: 40,
            max_speed: 90.0,
            lifetime: (0.4, 1.2),
            max_radius: 3,
            spawn_alpha: 220,
        },
        ExplosionKind::Enemy => BurstProfile {
            count: 25,
            max_speed: 60.0,
            lifetime: (0.3, 0.8),
            max_radius: 2,
            spawn_alpha: 200,
        },
    }
}

fn burst_color(kind: ExplosionKind, rng: &mut impl Rng, alpha: u8) -> Rgba {
    match kind {
        // Orange through yellow.
        ExplosionKind::Player => Rgba {
            r: rng.gen_range(100..=255),
            g: rng.gen_range(100..=255u8) / 2,
            b: 0,
            a: alpha,
        },
        // Murky greens and greys.
        ExplosionKind::Enemy => Rgba {
            r: rng.gen_range(50..=150u8) / 2,
            g: rng.gen_range(50..=150),
            b: rng.gen_range(50..=150u8) / 2,
            a: alpha,
        },
    }
}

/// Append one burst of `kind` centred on `origin`.
pub fn spawn_explosion(
    particles: &mut Vec<Particle>,
    kind: ExplosionKind,
    origin: Vec2,
    rng: &mut impl Rng,
) {
    let profile = burst_profile(kind);
    particles.reserve(profile.count);
    for _ in 0..profile.count {
        let velocity = Vec2::new(
            rng.gen_range(-profile.max_speed..=profile.max_speed),
            rng.gen_range(-profile.max_speed..=profile.max_speed),
        );
        let lifetime = rng.gen_range(profile.lifetime.0..=profile.lifetime.1);
        let radius = rng.gen_range(1..=profile.max_radius) as f32;
        let color = burst_color(kind, rng, profile.spawn_alpha);
        particles.push(Particle {
            pos: origin,
            velocity,
            lifetime,
            radius,
            color,
        });
    }
}

/// Alpha for a particle with `lifetime` seconds left.
pub fn fade_alpha(lifetime: f32) -> u8 {
    let ratio = (lifetime / ALPHA_LIFETIME_NORM).max(0.0);
    (BASE_ALPHA * ratio).clamp(0.0, 255.0) as u8
}

/// Age every particle by `dt`, dropping the expired ones and drifting the rest.
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    particles.retain_mut(|p| {
        p.lifetime -= dt;
        if p.lifetime <= 0.0 {
            return false;
        }
        p.pos += p.velocity * dt;
        p.color.a = fade_alpha(p.lifetime);
        true
    });
}
