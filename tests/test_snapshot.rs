use galaxy_invaders::compute::{advance_frame, init_state, reset, FrameInput};
use galaxy_invaders::config::Tuning;
use galaxy_invaders::entities::GameStatus;
use galaxy_invaders::snapshot::{SCORE_TEXT_SIZE, SCORE_TEXT_SIZE_HIGHLIGHT};

use approx::assert_abs_diff_eq;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn menu_snapshot_pulses_and_hides_score() {
    let mut s = init_state(Tuning::default());
    s.clocks.animation = 0.3;
    let snap = s.snapshot();
    assert_eq!(snap.status, GameStatus::MainMenu);
    assert_eq!(snap.final_score, None);
    assert_abs_diff_eq!(snap.pulse, 1.0 + 0.05 * (1.2f32).sin(), epsilon = 1e-6);
    assert_eq!(snap.screen, Vec2::new(800.0, 600.0));
}

#[test]
fn playing_snapshot_mirrors_world() {
    let s = reset(&init_state(Tuning::default()));
    let snap = s.snapshot();
    assert_eq!(snap.status, GameStatus::Playing);
    assert_eq!(snap.enemies.len(), 40);
    assert_eq!(snap.enemies[0], s.enemies[0].bounds());
    assert!(snap.player.visible);
    assert_eq!(snap.player.center, s.player.pos);
    assert!(snap.player_bullets.is_empty());
    assert!(snap.enemy_bullets.is_empty());
    assert_eq!(snap.score, 0);
    assert!(!snap.score_highlighted);
    assert_eq!(snap.score_text_size, SCORE_TEXT_SIZE);
    assert_eq!(snap.pulse, 1.0);
    assert_eq!(snap.final_score, None);
}

#[test]
fn highlighted_score_uses_large_text() {
    let mut s = reset(&init_state(Tuning::default()));
    s.score = 20;
    s.clocks.score_highlight = Some(0.05);
    let snap = s.snapshot();
    assert!(snap.score_highlighted);
    assert_eq!(snap.score_text_size, SCORE_TEXT_SIZE_HIGHLIGHT);
}

#[test]
fn end_screens_report_final_score() {
    for status in [GameStatus::GameOver, GameStatus::LevelWon] {
        let mut s = reset(&init_state(Tuning::default()));
        s.status = status;
        s.score = 130;
        assert_eq!(s.snapshot().final_score, Some(130));
    }
}

#[test]
fn particle_views_carry_fading_colour() {
    let mut s = reset(&init_state(Tuning::default()));
    s.enemies[0].pos.y = 520.0; // past the bottom threshold
    let mut rng = StdRng::seed_from_u64(3);
    let (over, _) = advance_frame(&s, &FrameInput::default(), 0.1, &mut rng);
    let snap = over.snapshot();
    assert_eq!(snap.status, GameStatus::GameOver);
    assert!(!snap.player.visible);
    assert_eq!(snap.particles.len(), over.particles.len());
    for (view, p) in snap.particles.iter().zip(&over.particles) {
        assert_eq!(view.pos, p.pos);
        assert_eq!(view.color, p.color);
        assert!(view.color.a < 220);
    }
}
