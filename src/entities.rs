/// All game entity types: plain data plus small geometric helpers.

use glam::Vec2;

use crate::config::Tuning;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    MainMenu,
    Playing,
    GameOver,
    LevelWon,
}

/// Why a round ended in `GameStatus::GameOver`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    EnemyReachedBottom,
    ShotByEnemy,
    RammedByEnemy,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in screen pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self {
            left: top_left.x,
            top: top_left.y,
            width: size.x,
            height: size.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        left < right && top < bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// The player's ship.  `pos` is the sprite centre, unlike every other entity.
#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared when the ship explodes; the sprite is drawn fully transparent.
    pub visible: bool,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos - self.size / 2.0, self.size)
    }

    /// Start-of-round placement: horizontally centred, resting just above the bottom.
    pub fn spawn(tuning: &Tuning) -> Self {
        let size = tuning.player_size;
        Player {
            pos: Vec2::new(
                tuning.screen_width / 2.0,
                tuning.screen_height - size.y / 2.0 - tuning.player_bottom_gap,
            ),
            size,
            visible: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Top-left corner.
    pub pos: Vec2,
    pub size: Vec2,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    /// Top-left corner.
    pub pos: Vec2,
    pub size: Vec2,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Unit direction of travel: player shots climb, enemy shots fall.
    pub fn heading(&self) -> f32 {
        match self.owner {
            BulletOwner::Player => -1.0,
            BulletOwner::Enemy => 1.0,
        }
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    /// Big warm burst when the player's ship is destroyed.
    Player,
    /// Small cool burst when an enemy is shot down.
    Enemy,
}

/// A purely decorative spark.  Nothing collides with particles.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Seconds left before the particle is removed.
    pub lifetime: f32,
    pub radius: f32,
    pub color: Rgba,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Frame-to-frame clocks, in seconds.  All of them run every frame and are
/// restarted together on reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clocks {
    pub since_player_shot: f32,
    pub since_enemy_shot: f32,
    /// Age of the current score highlight, if one is showing.
    pub score_highlight: Option<f32>,
    /// Drives the pulsing headline text.
    pub animation: f32,
}

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub status: GameStatus,
    pub player: Player,
    /// Row-major formation; order is the collision scan order.
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// +1 while the formation marches right, -1 while it marches left.
    pub direction: f32,
    pub clocks: Clocks,
    /// Set when the last round ended in `GameOver`.
    pub end_reason: Option<EndReason>,
    pub tuning: Tuning,
}
