/// Tuning constants for the simulation.
///
/// Every number the frame engine depends on lives here so a run can be
/// re-tuned from a JSON file without touching the logic.  Missing fields fall
/// back to the defaults below.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Upper bound on either formation dimension.
pub const MAX_FORMATION_SIDE: u32 = 64;
/// Upper bound on the points awarded per enemy.
pub const MAX_SCORE_PER_ENEMY: u32 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,

    // ── Speeds (pixels / second) ─────────────────────────────────────────────
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,
    /// Vertical step applied to the whole formation on the frame it bounces.
    pub enemy_drop: f32,

    // ── Cooldowns (seconds) ──────────────────────────────────────────────────
    pub player_shoot_interval: f32,
    pub enemy_shoot_interval: f32,
    pub score_highlight_duration: f32,

    // ── Bounds ───────────────────────────────────────────────────────────────
    /// Distance from the left/right screen edge at which the formation turns.
    pub edge_margin: f32,
    /// An enemy whose bottom edge reaches `screen_height - bottom_margin` ends the game.
    pub bottom_margin: f32,
    /// Gap between the player's bottom edge and the bottom of the screen.
    pub player_bottom_gap: f32,

    // ── Formation ────────────────────────────────────────────────────────────
    pub enemies_per_row: u32,
    pub enemy_rows: u32,
    /// Grid pitch as a multiple of the enemy size.
    pub enemy_spacing_factor: f32,
    pub formation_top: f32,

    // ── Sizes ────────────────────────────────────────────────────────────────
    pub player_size: Vec2,
    pub enemy_size: Vec2,
    pub player_bullet_size: Vec2,
    pub enemy_bullet_size: Vec2,

    pub score_per_enemy: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            player_speed: 250.0,
            bullet_speed: 500.0,
            enemy_speed: 35.0,
            enemy_bullet_speed: 250.0,
            enemy_drop: 1.0,
            player_shoot_interval: 0.4,
            enemy_shoot_interval: 1.5,
            score_highlight_duration: 0.2,
            edge_margin: 5.0,
            bottom_margin: 50.0,
            player_bottom_gap: 10.0,
            enemies_per_row: 10,
            enemy_rows: 4,
            enemy_spacing_factor: 1.4,
            formation_top: 60.0,
            player_size: Vec2::new(48.0, 48.0),
            enemy_size: Vec2::new(40.0, 40.0),
            player_bullet_size: Vec2::new(6.0, 16.0),
            enemy_bullet_size: Vec2::new(6.0, 12.0),
            score_per_enemy: 10,
        }
    }
}

impl Tuning {
    /// Read a JSON tuning file and validate it.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            GameError::ConfigParse { source, .. } => GameError::ConfigParse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, GameError> {
        let tuning: Tuning =
            serde_json::from_str(text).map_err(|source| GameError::ConfigParse {
                path: "<inline>".to_string(),
                source,
            })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the frame engine cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("enemy_spacing_factor", self.enemy_spacing_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let sizes = [
            ("player_size", self.player_size),
            ("enemy_size", self.enemy_size),
            ("player_bullet_size", self.player_bullet_size),
            ("enemy_bullet_size", self.enemy_bullet_size),
        ];
        for (name, size) in sizes {
            if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must have positive dimensions, got {size}"
                )));
            }
        }

        if self.enemies_per_row == 0 || self.enemy_rows == 0 {
            return Err(GameError::InvalidTuning(
                "formation needs at least one row and one column".to_string(),
            ));
        }
        if self.enemies_per_row > MAX_FORMATION_SIDE || self.enemy_rows > MAX_FORMATION_SIDE {
            return Err(GameError::InvalidTuning(format!(
                "formation of {}x{} exceeds {MAX_FORMATION_SIDE} per side",
                self.enemies_per_row, self.enemy_rows
            )));
        }
        if self.score_per_enemy > MAX_SCORE_PER_ENEMY {
            return Err(GameError::InvalidTuning(format!(
                "score_per_enemy {} exceeds {MAX_SCORE_PER_ENEMY}",
                self.score_per_enemy
            )));
        }
        if self.edge_margin < 0.0 || self.edge_margin * 2.0 >= self.screen_width {
            return Err(GameError::InvalidTuning(format!(
                "edge_margin {} does not fit a {}px wide screen",
                self.edge_margin, self.screen_width
            )));
        }
        if self.bottom_margin < 0.0 || self.bottom_margin >= self.screen_height {
            return Err(GameError::InvalidTuning(format!(
                "bottom_margin {} does not fit a {}px tall screen",
                self.bottom_margin, self.screen_height
            )));
        }
        if self.player_size.x > self.screen_width {
            return Err(GameError::InvalidTuning(
                "player is wider than the screen".to_string(),
            ));
        }
        Ok(())
    }

    /// Grid pitch between neighbouring enemies.
    pub fn enemy_spacing(&self) -> Vec2 {
        self.enemy_size * self.enemy_spacing_factor
    }

    pub fn formation_len(&self) -> usize {
        self.enemies_per_row as usize * self.enemy_rows as usize
    }
}
