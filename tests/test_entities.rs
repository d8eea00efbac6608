use galaxy_invaders::compute::{init_state, reset};
use galaxy_invaders::config::Tuning;
use galaxy_invaders::entities::*;

use approx::assert_abs_diff_eq;
use glam::Vec2;

fn rect(left: f32, top: f32, width: f32, height: f32) -> Rect {
    Rect::new(Vec2::new(left, top), Vec2::new(width, height))
}

#[test]
fn rect_edges_and_center() {
    let r = rect(10.0, 20.0, 40.0, 30.0);
    assert_abs_diff_eq!(r.right(), 50.0);
    assert_abs_diff_eq!(r.bottom(), 50.0);
    assert_eq!(r.center(), Vec2::new(30.0, 35.0));
}

#[test]
fn rect_overlap_is_strict() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&rect(5.0, 5.0, 10.0, 10.0)));
    assert!(a.intersects(&rect(2.0, 2.0, 2.0, 2.0))); // contained
    // sharing an edge or a corner is not an overlap
    assert!(!a.intersects(&rect(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.intersects(&rect(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.intersects(&rect(10.0, 10.0, 5.0, 5.0)));
    assert!(!a.intersects(&rect(30.0, 30.0, 5.0, 5.0)));
}

#[test]
fn rect_overlap_is_symmetric() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(9.0, -5.0, 3.0, 6.0);
    assert_eq!(a.intersects(&b), b.intersects(&a));
}

#[test]
fn player_bounds_are_centred_on_position() {
    let tuning = Tuning::default();
    let p = Player::spawn(&tuning);
    let b = p.bounds();
    assert_abs_diff_eq!(b.left, 400.0 - 24.0);
    assert_abs_diff_eq!(b.top, 566.0 - 24.0);
    assert_abs_diff_eq!(b.bottom(), 590.0);
    assert!(p.visible);
}

#[test]
fn enemy_and_bullet_bounds_use_top_left() {
    let e = Enemy {
        pos: Vec2::new(100.0, 60.0),
        size: Vec2::new(40.0, 40.0),
    };
    assert_eq!(e.bounds(), rect(100.0, 60.0, 40.0, 40.0));

    let b = Bullet {
        pos: Vec2::new(3.0, 4.0),
        size: Vec2::new(6.0, 16.0),
        owner: BulletOwner::Player,
    };
    assert_eq!(b.bounds(), rect(3.0, 4.0, 6.0, 16.0));
}

#[test]
fn bullet_heading_by_owner() {
    let mut b = Bullet {
        pos: Vec2::ZERO,
        size: Vec2::ONE,
        owner: BulletOwner::Player,
    };
    assert_eq!(b.heading(), -1.0);
    b.owner = BulletOwner::Enemy;
    assert_eq!(b.heading(), 1.0);
}

#[test]
fn enum_equality() {
    assert_eq!(GameStatus::MainMenu, GameStatus::MainMenu);
    assert_ne!(GameStatus::GameOver, GameStatus::LevelWon);
    assert_ne!(BulletOwner::Player, BulletOwner::Enemy);
    assert_ne!(ExplosionKind::Player, ExplosionKind::Enemy);
    assert_ne!(EndReason::ShotByEnemy, EndReason::RammedByEnemy);
}

#[test]
fn game_world_clone_is_independent() {
    let original = reset(&init_state(Tuning::default()));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.pos.x = 99.0;
    cloned.score = 999;
    cloned.enemies.clear();
    cloned.clocks.animation = 5.0;

    assert_abs_diff_eq!(original.player.pos.x, 400.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.enemies.len(), 40);
    assert_eq!(original.clocks.animation, 0.0);
}
