/// Read-only view of a `GameWorld` for the drawing layer.
///
/// The front end never touches the world directly; it gets one of these per
/// frame and translates it into terminal output.

use glam::Vec2;

use crate::entities::{GameStatus, GameWorld, Rect, Rgba};

/// Point size of the score text normally and while highlighted.
pub const SCORE_TEXT_SIZE: u32 = 24;
pub const SCORE_TEXT_SIZE_HIGHLIGHT: u32 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub center: Vec2,
    pub size: Vec2,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub status: GameStatus,
    pub screen: Vec2,
    pub player: PlayerView,
    pub enemies: Vec<Rect>,
    pub player_bullets: Vec<Rect>,
    pub enemy_bullets: Vec<Rect>,
    pub particles: Vec<ParticleView>,
    pub score: u32,
    pub score_highlighted: bool,
    pub score_text_size: u32,
    /// Shown on the game-over and level-won screens.
    pub final_score: Option<u32>,
    /// Scale factor for the pulsing headline text.
    pub pulse: f32,
}

impl GameWorld {
    pub fn snapshot(&self) -> FrameSnapshot {
        let score_highlighted = self.clocks.score_highlight.is_some();
        let t = self.clocks.animation;
        let (pulse, final_score) = match self.status {
            GameStatus::MainMenu => (1.0 + 0.05 * (t * 4.0).sin(), None),
            GameStatus::Playing => (1.0, None),
            GameStatus::GameOver | GameStatus::LevelWon => {
                (1.0 + 0.05 * (t * 5.0).sin(), Some(self.score))
            }
        };

        FrameSnapshot {
            status: self.status,
            screen: Vec2::new(self.tuning.screen_width, self.tuning.screen_height),
            player: PlayerView {
                center: self.player.pos,
                size: self.player.size,
                visible: self.player.visible,
            },
            enemies: self.enemies.iter().map(|e| e.bounds()).collect(),
            player_bullets: self.player_bullets.iter().map(|b| b.bounds()).collect(),
            enemy_bullets: self.enemy_bullets.iter().map(|b| b.bounds()).collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    radius: p.radius,
                    color: p.color,
                })
                .collect(),
            score: self.score,
            score_highlighted,
            score_text_size: if score_highlighted {
                SCORE_TEXT_SIZE_HIGHLIGHT
            } else {
                SCORE_TEXT_SIZE
            },
            final_score,
            pulse,
        }
    }
}
