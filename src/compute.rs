/// Game-logic functions.
///
/// The public entry points (`init_state`, `reset`, `handle_press`,
/// `advance_frame`) take an immutable reference to the current `GameWorld`
/// and return a brand-new one.  The per-frame systems they are built from work
/// on a `&mut GameWorld` owned by the caller.  Side effects are limited to the
/// injected RNG and `tracing` events.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    Bullet, BulletOwner, Clocks, Enemy, EndReason, ExplosionKind, GameStatus, GameWorld, Player,
};
use crate::particles::{spawn_explosion, update_particles};

// ── Frame input / output ─────────────────────────────────────────────────────

/// An edge-triggered key press: one action per physical press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    /// Starts a game from the menu; shoots while playing.
    Fire,
    /// Starts a new round from the game-over or level-won screen.
    Restart,
    /// Leaves the application from the menu.
    Quit,
}

/// Everything the front end collected since the previous frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub presses: Vec<Press>,
    /// Level-triggered: held this frame.
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Result of a check that can end the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    EndGame(EndReason),
}

/// What the formation should do this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormationScan {
    /// Keep marching in `direction`; `drop` is set on the frame it bounced.
    March { direction: f32, drop: bool },
    /// An enemy got too close to the bottom of the screen.
    ReachedBottom,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the world shown on the main menu: no enemies, nothing moving.
pub fn init_state(tuning: Tuning) -> GameWorld {
    GameWorld {
        status: GameStatus::MainMenu,
        player: Player::spawn(&tuning),
        enemies: Vec::new(),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        particles: Vec::new(),
        score: 0,
        direction: 1.0,
        clocks: Clocks::default(),
        end_reason: None,
        tuning,
    }
}

/// Lay out a fresh formation: `enemy_rows` × `enemies_per_row`, centred
/// horizontally, row-major order.
pub fn build_formation(tuning: &Tuning) -> Vec<Enemy> {
    let size = tuning.enemy_size;
    let spacing = tuning.enemy_spacing();
    let cols = tuning.enemies_per_row;
    let start_x = (tuning.screen_width - (cols as f32 - 1.0) * spacing.x - size.x) / 2.0;
    let start_y = tuning.formation_top;

    let mut enemies = Vec::with_capacity(tuning.formation_len());
    for row in 0..tuning.enemy_rows {
        for col in 0..cols {
            enemies.push(Enemy {
                pos: Vec2::new(
                    start_x + col as f32 * spacing.x,
                    start_y + row as f32 * spacing.y,
                ),
                size,
            });
        }
    }
    enemies
}

/// Start a new round from any state.
pub fn reset(state: &GameWorld) -> GameWorld {
    let mut next = state.clone();
    reset_round(&mut next);
    next
}

fn reset_round(world: &mut GameWorld) {
    world.player_bullets.clear();
    world.enemy_bullets.clear();
    world.enemies.clear();
    world.particles.clear();

    world.status = GameStatus::Playing;
    world.score = 0;
    world.player = Player::spawn(&world.tuning);
    world.enemies = build_formation(&world.tuning);
    world.direction = 1.0;
    world.end_reason = None;
    world.clocks = Clocks::default();

    tracing::info!(enemies = world.enemies.len(), "round reset");
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Horizontal move for one frame, clamped so the ship stays on screen.
pub fn move_player(player: &Player, left: bool, right: bool, dt: f32, tuning: &Tuning) -> Player {
    let mut dx = 0.0;
    if left {
        dx -= tuning.player_speed * dt;
    }
    if right {
        dx += tuning.player_speed * dt;
    }

    let mut pos = player.pos + Vec2::new(dx, 0.0);
    let half_width = player.size.x / 2.0;
    if pos.x - half_width < 0.0 {
        pos.x = half_width;
    }
    if pos.x + half_width > tuning.screen_width {
        pos.x = tuning.screen_width - half_width;
    }

    Player {
        pos,
        ..player.clone()
    }
}

/// Fire from the ship's nose if the cooldown has run out.
pub fn player_shoot(state: &GameWorld) -> GameWorld {
    if state.clocks.since_player_shot < state.tuning.player_shoot_interval {
        return state.clone();
    }

    let size = state.tuning.player_bullet_size;
    let nose = state.player.bounds();
    let bullet = Bullet {
        pos: Vec2::new(state.player.pos.x - size.x / 2.0, nose.top - size.y),
        size,
        owner: BulletOwner::Player,
    };

    let mut next = state.clone();
    next.player_bullets.push(bullet);
    next.clocks.since_player_shot = 0.0;
    next
}

/// Route one key press through the state machine.
pub fn handle_press(state: &GameWorld, press: Press) -> (GameWorld, LoopControl) {
    match (state.status, press) {
        (GameStatus::MainMenu, Press::Fire) => (reset(state), LoopControl::Continue),
        (GameStatus::MainMenu, Press::Quit) => {
            tracing::info!("quit from main menu");
            (state.clone(), LoopControl::Quit)
        }
        (GameStatus::Playing, Press::Fire) => (player_shoot(state), LoopControl::Continue),
        (GameStatus::GameOver | GameStatus::LevelWon, Press::Restart) => {
            (reset(state), LoopControl::Continue)
        }
        _ => (state.clone(), LoopControl::Continue),
    }
}

// ── Per-frame systems ────────────────────────────────────────────────────────

/// Climb every player bullet and drop the ones that left through the top.
pub fn move_player_bullets(bullets: &mut Vec<Bullet>, dt: f32, tuning: &Tuning) {
    bullets.retain_mut(|b| {
        b.pos.y += b.heading() * tuning.bullet_speed * dt;
        b.bounds().bottom() >= 0.0
    });
}

/// Look for a bounce and for an enemy that reached the bottom.
///
/// At most one bounce per frame, however many enemies touch the edge.
pub fn scan_formation(enemies: &[Enemy], direction: f32, tuning: &Tuning) -> FormationScan {
    let floor = tuning.screen_height - tuning.bottom_margin;
    if enemies.iter().any(|e| e.bounds().bottom() >= floor) {
        return FormationScan::ReachedBottom;
    }

    let right_wall = tuning.screen_width - tuning.edge_margin;
    let at_edge = enemies.iter().any(|e| {
        let r = e.bounds();
        (direction > 0.0 && r.right() >= right_wall)
            || (direction < 0.0 && r.left <= tuning.edge_margin)
    });

    if at_edge {
        FormationScan::March {
            direction: -direction,
            drop: true,
        }
    } else {
        FormationScan::March {
            direction,
            drop: false,
        }
    }
}

/// Move the whole formation as one block.
pub fn march_formation(
    enemies: &mut [Enemy],
    direction: f32,
    drop: bool,
    dt: f32,
    tuning: &Tuning,
) {
    let step = Vec2::new(
        tuning.enemy_speed * direction * dt,
        if drop { tuning.enemy_drop } else { 0.0 },
    );
    for enemy in enemies.iter_mut() {
        enemy.pos += step;
    }
}

/// Let a random enemy shoot once the fire interval has elapsed.
/// Returns whether a bullet was spawned.
pub fn enemy_fire(world: &mut GameWorld, rng: &mut impl Rng) -> bool {
    if world.clocks.since_enemy_shot < world.tuning.enemy_shoot_interval {
        return false;
    }
    let Some(shooter) = world.enemies.choose(rng) else {
        return false;
    };

    let size = world.tuning.enemy_bullet_size;
    let muzzle = shooter.bounds();
    let bullet = Bullet {
        pos: Vec2::new(muzzle.center().x - size.x / 2.0, muzzle.bottom()),
        size,
        owner: BulletOwner::Enemy,
    };
    tracing::debug!(x = bullet.pos.x, y = bullet.pos.y, "enemy fired");
    world.enemy_bullets.push(bullet);
    world.clocks.since_enemy_shot = 0.0;
    true
}

/// Drop every enemy bullet; one that reaches the ship ends the round.
pub fn move_enemy_bullets(world: &mut GameWorld, dt: f32) -> Outcome {
    let speed = world.tuning.enemy_bullet_speed;
    let floor = world.tuning.screen_height;
    let ship = world.player.bounds();

    let mut spent: Vec<usize> = Vec::new();
    let mut outcome = Outcome::Continue;
    for (i, bullet) in world.enemy_bullets.iter_mut().enumerate() {
        bullet.pos.y += bullet.heading() * speed * dt;
        if bullet.pos.y > floor {
            spent.push(i);
        } else if bullet.bounds().intersects(&ship) {
            spent.push(i);
            outcome = Outcome::EndGame(EndReason::ShotByEnemy);
            break;
        }
    }

    remove_indices(&mut world.enemy_bullets, &spent);
    outcome
}

/// Match player bullets against enemies.  Each bullet destroys at most the
/// first enemy it overlaps, in formation order.  Returns the number of kills.
pub fn resolve_bullet_hits(world: &mut GameWorld, rng: &mut impl Rng) -> u32 {
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in world.player_bullets.iter().enumerate() {
        let shot = bullet.bounds();
        let hit = world
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, e)| !killed_enemies.contains(ei) && shot.intersects(&e.bounds()));
        if let Some((ei, enemy)) = hit {
            spawn_explosion(
                &mut world.particles,
                ExplosionKind::Enemy,
                enemy.bounds().center(),
                rng,
            );
            killed_enemies.push(ei);
            used_bullets.push(bi);
        }
    }

    let kills = killed_enemies.len() as u32;
    if kills > 0 {
        let points = kills.saturating_mul(world.tuning.score_per_enemy);
        world.score = world.score.saturating_add(points);
        world.clocks.score_highlight = Some(0.0);
        tracing::debug!(kills, score = world.score, "enemies destroyed");
    }

    remove_indices(&mut world.enemies, &killed_enemies);
    remove_indices(&mut world.player_bullets, &used_bullets);
    kills
}

/// An enemy touching the ship ends the round.
pub fn check_player_contact(world: &GameWorld) -> Outcome {
    let ship = world.player.bounds();
    if world.enemies.iter().any(|e| e.bounds().intersects(&ship)) {
        Outcome::EndGame(EndReason::RammedByEnemy)
    } else {
        Outcome::Continue
    }
}

/// Switch to `GameOver`: blow up the ship and hide it.
fn end_game(world: &mut GameWorld, reason: EndReason, rng: &mut impl Rng) {
    world.status = GameStatus::GameOver;
    world.end_reason = Some(reason);
    spawn_explosion(
        &mut world.particles,
        ExplosionKind::Player,
        world.player.pos,
        rng,
    );
    world.player.visible = false;
    tracing::info!(?reason, score = world.score, "game over");
}

/// The Playing-state pipeline.  Runs the systems in their fixed order and
/// stops at the first one that ends the round.
pub fn run_playing_systems(
    world: &mut GameWorld,
    input: &FrameInput,
    dt: f32,
    rng: &mut impl Rng,
) -> Outcome {
    let tuning = world.tuning;

    world.player = move_player(&world.player, input.left, input.right, dt, &tuning);
    move_player_bullets(&mut world.player_bullets, dt, &tuning);

    match scan_formation(&world.enemies, world.direction, &tuning) {
        FormationScan::ReachedBottom => {
            return end_round(world, EndReason::EnemyReachedBottom, rng);
        }
        FormationScan::March { direction, drop } => {
            world.direction = direction;
            march_formation(&mut world.enemies, direction, drop, dt, &tuning);
        }
    }

    enemy_fire(world, rng);

    if let Outcome::EndGame(reason) = move_enemy_bullets(world, dt) {
        return end_round(world, reason, rng);
    }

    resolve_bullet_hits(world, rng);

    if let Outcome::EndGame(reason) = check_player_contact(world) {
        return end_round(world, reason, rng);
    }

    if world.enemies.is_empty() {
        world.status = GameStatus::LevelWon;
        tracing::info!(score = world.score, "level cleared");
    }

    if let Some(age) = world.clocks.score_highlight {
        if age >= tuning.score_highlight_duration {
            world.clocks.score_highlight = None;
        }
    }

    Outcome::Continue
}

fn end_round(world: &mut GameWorld, reason: EndReason, rng: &mut impl Rng) -> Outcome {
    end_game(world, reason, rng);
    Outcome::EndGame(reason)
}

// ── Frame orchestrator ───────────────────────────────────────────────────────

/// Advance the simulation by one rendered frame of `dt` seconds.
///
/// Order: clocks → key presses → Playing systems (if playing) → particles.
/// All randomness comes through `rng` so callers control determinism.
pub fn advance_frame(
    state: &GameWorld,
    input: &FrameInput,
    dt: f32,
    rng: &mut impl Rng,
) -> (GameWorld, LoopControl) {
    let dt = if dt < 0.0 {
        tracing::warn!(dt, "negative frame time clamped to zero");
        0.0
    } else {
        dt
    };

    let mut world = state.clone();
    tick_clocks(&mut world.clocks, dt);

    for &press in &input.presses {
        let (next, control) = handle_press(&world, press);
        world = next;
        if control == LoopControl::Quit {
            return (world, LoopControl::Quit);
        }
    }

    if world.status == GameStatus::Playing {
        run_playing_systems(&mut world, input, dt, rng);
    }

    update_particles(&mut world.particles, dt);
    (world, LoopControl::Continue)
}

fn tick_clocks(clocks: &mut Clocks, dt: f32) {
    clocks.since_player_shot += dt;
    clocks.since_enemy_shot += dt;
    clocks.animation += dt;
    if let Some(age) = clocks.score_highlight.as_mut() {
        *age += dt;
    }
}

/// Mark-and-compact removal.  `indices` may be in any order.
fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut i = 0;
    items.retain(|_| {
        let keep = !indices.contains(&i);
        i += 1;
        keep
    });
}
