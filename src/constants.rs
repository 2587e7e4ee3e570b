//! Fixed gameplay numbers.  Coordinates are viewport units, origin top-left.

// ── Viewport ──────────────────────────────────────────────────────────────────

pub const VIEWPORT_WIDTH: f32 = 1400.0;
pub const VIEWPORT_HEIGHT: f32 = 1000.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 150.0;
pub const PLAYER_HEIGHT: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 10.0;
/// Gap between the ship's spawn point and the bottom edge.
pub const PLAYER_BOTTOM_MARGIN: f32 = 50.0;
pub const PLAYER_MAX_HP: u32 = 100;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: f32 = 100.0;
pub const ENEMY_HEIGHT: f32 = 70.0;
pub const ENEMY_MIN_SPEED: f32 = 2.0;
pub const ENEMY_MAX_SPEED: f32 = 5.0;
pub const ENEMY_MIN_SHOT_DELAY_MS: f32 = 1000.0;
pub const ENEMY_MAX_SHOT_DELAY_MS: f32 = 3000.0;
/// Chance that an enemy whose cooldown elapsed actually fires.
pub const ENEMY_FIRE_PROBABILITY: f64 = 0.3;
/// A wave holds `WAVE_BASE_SIZE + level` enemies.
pub const WAVE_BASE_SIZE: u32 = 5;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_SIZE: f32 = 20.0;
/// Negative: player bullets travel up.
pub const PLAYER_BULLET_SPEED: f32 = -15.0;
pub const ENEMY_BULLET_SPEED: f32 = 10.0;
pub const HIT_DAMAGE: u32 = 10;

// ── Explosions ────────────────────────────────────────────────────────────────

pub const EXPLOSION_SIZE: f32 = 50.0;
pub const EXPLOSION_LIFETIME: u32 = 30;
