/// Game entity types and their per-entity behaviour.
///
/// Every movable object is composed around a [`Body`]; the simulation loop
/// in `compute` owns the collections and decides what lives or dies.

use rand::Rng;

use crate::constants::{
    BULLET_SIZE, ENEMY_BULLET_SPEED, ENEMY_FIRE_PROBABILITY, ENEMY_HEIGHT, ENEMY_MAX_SHOT_DELAY_MS,
    ENEMY_MAX_SPEED, ENEMY_MIN_SHOT_DELAY_MS, ENEMY_MIN_SPEED, ENEMY_WIDTH, EXPLOSION_LIFETIME,
    EXPLOSION_SIZE, PLAYER_BOTTOM_MARGIN, PLAYER_BULLET_SPEED, PLAYER_HEIGHT, PLAYER_MAX_HP,
    PLAYER_SPEED, PLAYER_WIDTH, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Directional keys currently held.  No diagonal normalisation is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Something that happened during a single frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// A player bullet destroyed an enemy; coordinates are the blast centre.
    EnemyDestroyed { x: f32, y: f32 },
    PlayerHit { hp_left: u32 },
    WaveStarted { level: u32, enemies: usize },
    GameOver { kills: u32, level: u32 },
}

impl FrameEvent {
    /// Collisions are the events that trigger the explosion sound.
    pub fn is_collision(&self) -> bool {
        matches!(self, FrameEvent::EnemyDestroyed { .. } | FrameEvent::PlayerHit { .. })
    }
}

// ── Shared geometry ───────────────────────────────────────────────────────────

/// Position, size and signed speed shared by every movable entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Sign encodes direction along the axis the entity travels on.
    pub speed: f32,
}

impl Body {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Axis-aligned overlap with strict inequalities: touching edges miss.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub kills: u32,
    pub current_hp: u32,
    pub max_hp: u32,
}

impl Player {
    /// A fresh ship centred horizontally near the bottom of the viewport.
    pub fn new() -> Self {
        Player {
            body: Body {
                x: VIEWPORT_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                y: VIEWPORT_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
                speed: PLAYER_SPEED,
            },
            kills: 0,
            current_hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
        }
    }

    /// Step once per held direction, clamping each step to the viewport.
    pub fn move_by(&mut self, input: &InputState) {
        let b = &mut self.body;
        let max_x = VIEWPORT_WIDTH - b.width;
        let max_y = VIEWPORT_HEIGHT - b.height;
        if input.left {
            b.x = (b.x - b.speed).max(0.0);
        }
        if input.right {
            b.x = (b.x + b.speed).min(max_x);
        }
        if input.up {
            b.y = (b.y - b.speed).max(0.0);
        }
        if input.down {
            b.y = (b.y + b.speed).min(max_y);
        }
    }

    /// Returns `true` once HP has reached zero.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.current_hp == 0
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.max_hp as f32
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
    /// Timestamp (ms) of the last elapsed cooldown.
    pub last_shot_ms: u64,
    pub shot_delay_ms: f32,
}

impl Enemy {
    /// Spawn just above the top edge at a random column.
    pub fn spawn(now_ms: u64, rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0.0..(VIEWPORT_WIDTH - ENEMY_WIDTH));
        let speed = rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
        Enemy {
            body: Body {
                x,
                y: -ENEMY_HEIGHT,
                width: ENEMY_WIDTH,
                height: ENEMY_HEIGHT,
                speed,
            },
            last_shot_ms: now_ms,
            shot_delay_ms: random_shot_delay(rng),
        }
    }

    /// Descend; returns `true` when the enemy has left through the bottom.
    pub fn update(&mut self) -> bool {
        self.body.y += self.body.speed;
        self.body.y > VIEWPORT_HEIGHT
    }

    /// Once the cooldown has elapsed the timer always resets and a new delay
    /// is drawn; only then is the fire roll made.
    pub fn can_shoot(&mut self, now_ms: u64, rng: &mut impl Rng) -> bool {
        let elapsed = now_ms.saturating_sub(self.last_shot_ms) as f32;
        if elapsed > self.shot_delay_ms {
            self.last_shot_ms = now_ms;
            self.shot_delay_ms = random_shot_delay(rng);
            return rng.gen_bool(ENEMY_FIRE_PROBABILITY);
        }
        false
    }
}

fn random_shot_delay(rng: &mut impl Rng) -> f32 {
    rng.gen_range(ENEMY_MIN_SHOT_DELAY_MS..ENEMY_MAX_SHOT_DELAY_MS)
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
}

impl Projectile {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Projectile {
            body: Body {
                x,
                y,
                width: BULLET_SIZE,
                height: BULLET_SIZE,
                speed,
            },
        }
    }

    /// Launched upward from the top-centre of the ship.
    pub fn from_player(player: &Player) -> Self {
        let b = &player.body;
        Projectile::new(b.x + b.width / 2.0 - BULLET_SIZE / 2.0, b.y, PLAYER_BULLET_SPEED)
    }

    /// Dropped downward from the bottom-centre of the enemy.
    pub fn from_enemy(enemy: &Enemy) -> Self {
        let b = &enemy.body;
        Projectile::new(b.x + b.width / 2.0 - BULLET_SIZE / 2.0, b.bottom(), ENEMY_BULLET_SPEED)
    }

    /// Returns `true` once `y` leaves `[-height, VIEWPORT_HEIGHT]`.
    pub fn update(&mut self) -> bool {
        self.body.y += self.body.speed;
        self.body.y < -self.body.height || self.body.y > VIEWPORT_HEIGHT
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

/// A short-lived blast.  `x`/`y` is the centre, not the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Frames left to display.
    pub lifetime: u32,
}

impl Explosion {
    pub fn new(x: f32, y: f32) -> Self {
        Explosion {
            x,
            y,
            width: EXPLOSION_SIZE,
            height: EXPLOSION_SIZE,
            lifetime: EXPLOSION_LIFETIME,
        }
    }

    pub fn top_left(&self) -> (f32, f32) {
        (self.x - self.width / 2.0, self.y - self.height / 2.0)
    }

    /// Returns `true` when the blast has burnt out.
    pub fn update(&mut self) -> bool {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime == 0
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Projectile>,
    pub enemy_bullets: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Wave number, starting at 1.
    pub level: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Events produced by the most recent `tick`.
    pub events: Vec<FrameEvent>,
}
