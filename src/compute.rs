/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle and the current time) and
/// returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG.

use rand::Rng;

use crate::constants::{HIT_DAMAGE, WAVE_BASE_SIZE};
use crate::entities::{
    Enemy, Explosion, FrameEvent, GameState, GameStatus, InputState, Player, Projectile,
};

/// Numbers handed to the renderer alongside the entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub kills: u32,
    pub level: u32,
    /// `current_hp / max_hp`, in `[0, 1]`.
    pub health_ratio: f32,
}

// ── Waves ─────────────────────────────────────────────────────────────────────

pub fn wave_size(level: u32) -> usize {
    (WAVE_BASE_SIZE + level) as usize
}

fn spawn_wave(level: u32, now_ms: u64, rng: &mut impl Rng) -> Vec<Enemy> {
    (0..wave_size(level)).map(|_| Enemy::spawn(now_ms, rng)).collect()
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: a fresh ship and the first wave.
pub fn init_state(now_ms: u64, rng: &mut impl Rng) -> GameState {
    let level = 1;
    let enemies = spawn_wave(level, now_ms, rng);
    let events = vec![FrameEvent::WaveStarted {
        level,
        enemies: enemies.len(),
    }];
    GameState {
        player: Player::new(),
        enemies,
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        explosions: Vec::new(),
        level,
        status: GameStatus::Running,
        frame: 0,
        events,
    }
}

/// Throw away the session and start over from wave 1.
pub fn restart(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    tracing::info!(
        kills = state.player.kills,
        level = state.level,
        frame = state.frame,
        "restarting game"
    );
    init_state(now_ms, rng)
}

pub fn hud(state: &GameState) -> Hud {
    Hud {
        kills: state.player.kills,
        level: state.level,
        health_ratio: state.player.health_ratio(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Fire one bullet from the ship's nose.  Ignored after game over.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut player_bullets = state.player_bullets.clone();
    player_bullets.push(Projectile::from_player(&state.player));
    GameState {
        player_bullets,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG and time are injected) ────────────────

fn advance_projectiles(bullets: Vec<Projectile>) -> Vec<Projectile> {
    bullets
        .into_iter()
        .filter_map(|mut b| if b.update() { None } else { Some(b) })
        .collect()
}

/// Advance the simulation by one frame.  A finished game is left untouched
/// apart from clearing the previous frame's events.
pub fn tick(
    state: &GameState,
    input: &InputState,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    if state.status == GameStatus::GameOver {
        return GameState {
            events: Vec::new(),
            ..state.clone()
        };
    }

    let frame = state.frame + 1;
    let mut events = Vec::new();

    // ── 1. Move the player ───────────────────────────────────────────────────
    let mut player = state.player.clone();
    player.move_by(input);

    // ── 2. Move enemies; drop those that escaped through the bottom ─────────
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .cloned()
        .filter_map(|mut e| if e.update() { None } else { Some(e) })
        .collect();

    // ── 3. Enemies roll to fire ──────────────────────────────────────────────
    let mut enemy_bullets = state.enemy_bullets.clone();
    for enemy in enemies.iter_mut() {
        if enemy.can_shoot(now_ms, rng) {
            enemy_bullets.push(Projectile::from_enemy(enemy));
        }
    }

    // ── 4. Move bullets; drop those outside the vertical bounds ──────────────
    let player_bullets = advance_projectiles(state.player_bullets.clone());
    let enemy_bullets = advance_projectiles(enemy_bullets);

    // ── 5a. Player bullets ↔ enemies ─────────────────────────────────────────
    // A bullet is not consumed by a hit, so one bullet can take out every
    // enemy it overlaps.
    let mut explosions = state.explosions.clone();
    enemies.retain(|enemy| {
        let hit = player_bullets
            .iter()
            .any(|bullet| bullet.body.overlaps(&enemy.body));
        if hit {
            let (x, y) = enemy.body.center();
            explosions.push(Explosion::new(x, y));
            player.kills += 1;
            events.push(FrameEvent::EnemyDestroyed { x, y });
        }
        !hit
    });

    // ── 5b. Enemy bullets ↔ player ───────────────────────────────────────────
    // Every overlapping bullet deals damage; there is no invulnerability window.
    let mut died = false;
    for bullet in &enemy_bullets {
        if bullet.body.overlaps(&player.body) {
            let (x, y) = player.body.center();
            explosions.push(Explosion::new(x, y));
            if player.take_damage(HIT_DAMAGE) {
                died = true;
            }
            tracing::debug!(hp = player.current_hp, "player hit");
            events.push(FrameEvent::PlayerHit {
                hp_left: player.current_hp,
            });
        }
    }

    // ── 6. Game over ─────────────────────────────────────────────────────────
    let status = if died {
        tracing::info!(kills = player.kills, level = state.level, frame, "game over");
        events.push(FrameEvent::GameOver {
            kills: player.kills,
            level: state.level,
        });
        GameStatus::GameOver
    } else {
        GameStatus::Running
    };

    // ── 7. Next wave once the field is clear ─────────────────────────────────
    let mut level = state.level;
    if enemies.is_empty() {
        level += 1;
        enemies = spawn_wave(level, now_ms, rng);
        tracing::info!(level, enemies = enemies.len(), "wave started");
        events.push(FrameEvent::WaveStarted {
            level,
            enemies: enemies.len(),
        });
    }

    // ── 8. Burn down explosions ──────────────────────────────────────────────
    explosions.retain_mut(|e| !e.update());

    GameState {
        player,
        enemies,
        player_bullets,
        enemy_bullets,
        explosions,
        level,
        status,
        frame,
        events,
    }
}
