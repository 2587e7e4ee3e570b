use arcade_shooter::constants::*;
use arcade_shooter::entities::*;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn body(x: f32, y: f32, width: f32, height: f32) -> Body {
    Body { x, y, width, height, speed: 0.0 }
}

fn idle_enemy(last_shot_ms: u64, shot_delay_ms: f32) -> Enemy {
    Enemy {
        body: body(100.0, 100.0, ENEMY_WIDTH, ENEMY_HEIGHT),
        last_shot_ms,
        shot_delay_ms,
    }
}

/// Every draw is zero: ranges yield their low bound and every roll succeeds.
fn zero_rng() -> StepRng {
    StepRng::new(0, 0)
}

// ── Body::overlaps ────────────────────────────────────────────────────────────

#[test]
fn overlapping_boxes_collide() {
    let a = body(0.0, 0.0, 50.0, 50.0);
    let b = body(25.0, 25.0, 50.0, 50.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = body(0.0, 0.0, 50.0, 50.0);
    let right = body(50.0, 0.0, 50.0, 50.0);
    let below = body(0.0, 50.0, 50.0, 50.0);
    assert!(!a.overlaps(&right));
    assert!(!right.overlaps(&a));
    assert!(!a.overlaps(&below));
    assert!(!below.overlaps(&a));
}

#[test]
fn contained_box_collides() {
    let outer = body(0.0, 0.0, 100.0, 100.0);
    let inner = body(40.0, 40.0, 10.0, 10.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn body_center() {
    assert_eq!(body(10.0, 20.0, 100.0, 70.0).center(), (60.0, 55.0));
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn new_player_spawn_point_and_health() {
    let p = Player::new();
    assert_eq!(p.body.x, 625.0); // 1400/2 - 150/2
    assert_eq!(p.body.y, 850.0); // 1000 - 100 - 50
    assert_eq!(p.current_hp, 100);
    assert_eq!(p.max_hp, 100);
    assert_eq!(p.kills, 0);
}

#[test]
fn move_each_direction_by_speed() {
    let mut p = Player::new();
    p.move_by(&InputState { left: true, ..Default::default() });
    assert_eq!(p.body.x, 615.0);
    p.move_by(&InputState { up: true, ..Default::default() });
    assert_eq!(p.body.y, 840.0);
    p.move_by(&InputState { right: true, down: true, ..Default::default() });
    assert_eq!((p.body.x, p.body.y), (625.0, 850.0));
}

#[test]
fn diagonal_move_is_not_normalized() {
    let mut p = Player::new();
    p.move_by(&InputState { up: true, right: true, ..Default::default() });
    assert_eq!(p.body.x, 635.0);
    assert_eq!(p.body.y, 840.0);
}

#[test]
fn move_clamps_to_viewport() {
    let mut p = Player::new();
    p.body.x = 4.0;
    p.body.y = 3.0;
    p.move_by(&InputState { left: true, up: true, ..Default::default() });
    assert_eq!((p.body.x, p.body.y), (0.0, 0.0));

    p.body.x = VIEWPORT_WIDTH - PLAYER_WIDTH - 1.0;
    p.body.y = VIEWPORT_HEIGHT - PLAYER_HEIGHT - 1.0;
    p.move_by(&InputState { right: true, down: true, ..Default::default() });
    assert_eq!(p.body.x, VIEWPORT_WIDTH - PLAYER_WIDTH);
    assert_eq!(p.body.y, VIEWPORT_HEIGHT - PLAYER_HEIGHT);
}

#[test]
fn no_input_no_movement() {
    let mut p = Player::new();
    p.move_by(&InputState::default());
    assert_eq!(p.body, Player::new().body);
}

#[test]
fn take_damage_three_hits() {
    let mut p = Player::new();
    for _ in 0..3 {
        assert!(!p.take_damage(HIT_DAMAGE));
    }
    assert_eq!(p.current_hp, 70);
}

#[test]
fn take_damage_reports_death_on_crossing_hit() {
    let mut p = Player::new();
    for hit in 1..=10 {
        let dead = p.take_damage(10);
        assert_eq!(dead, hit == 10, "hit {hit}");
    }
    assert_eq!(p.current_hp, 0);
}

#[test]
fn take_damage_never_goes_negative() {
    let mut p = Player::new();
    p.current_hp = 15;
    assert!(p.take_damage(40));
    assert_eq!(p.current_hp, 0);
    assert!(p.take_damage(10));
    assert_eq!(p.current_hp, 0);
}

#[test]
fn health_ratio() {
    let mut p = Player::new();
    assert_eq!(p.health_ratio(), 1.0);
    p.current_hp = 25;
    assert_eq!(p.health_ratio(), 0.25);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_spawn_ranges() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let e = Enemy::spawn(1234, &mut rng);
        assert!(e.body.x >= 0.0 && e.body.x < VIEWPORT_WIDTH - ENEMY_WIDTH);
        assert_eq!(e.body.y, -ENEMY_HEIGHT);
        assert!(e.body.speed >= 2.0 && e.body.speed < 5.0);
        assert!(e.shot_delay_ms >= 1000.0 && e.shot_delay_ms < 3000.0);
        assert_eq!(e.last_shot_ms, 1234);
        assert_eq!((e.body.width, e.body.height), (ENEMY_WIDTH, ENEMY_HEIGHT));
    }
}

#[test]
fn enemy_spawn_low_bounds_with_zero_rng() {
    let e = Enemy::spawn(0, &mut zero_rng());
    assert_eq!(e.body.x, 0.0);
    assert_eq!(e.body.speed, ENEMY_MIN_SPEED);
    assert_eq!(e.shot_delay_ms, ENEMY_MIN_SHOT_DELAY_MS);
}

#[test]
fn enemy_update_descends_and_flags_exit() {
    let mut e = idle_enemy(0, 1000.0);
    e.body.speed = 4.0;
    e.body.y = 996.0;
    assert!(!e.update()); // y == 1000 is still inside
    assert_eq!(e.body.y, 1000.0);
    assert!(e.update()); // 1004 > 1000
}

#[test]
fn can_shoot_waits_for_delay() {
    let mut e = idle_enemy(0, 1000.0);
    let mut rng = zero_rng();
    assert!(!e.can_shoot(500, &mut rng));
    assert!(!e.can_shoot(1000, &mut rng)); // elapsed must exceed the delay
    assert_eq!(e.last_shot_ms, 0);
    assert_eq!(e.shot_delay_ms, 1000.0);
}

#[test]
fn can_shoot_fires_and_resets_when_roll_succeeds() {
    let mut e = idle_enemy(0, 1500.0);
    assert!(e.can_shoot(1501, &mut zero_rng()));
    assert_eq!(e.last_shot_ms, 1501);
    assert_eq!(e.shot_delay_ms, ENEMY_MIN_SHOT_DELAY_MS);
    // Freshly reset: not eligible again straight away
    assert!(!e.can_shoot(1600, &mut zero_rng()));
}

#[test]
fn can_shoot_always_resets_timer_once_eligible() {
    let mut fired = 0;
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut e = idle_enemy(0, 1000.0);
        if e.can_shoot(5000, &mut rng) {
            fired += 1;
        }
        assert_eq!(e.last_shot_ms, 5000);
        assert!(e.shot_delay_ms >= 1000.0 && e.shot_delay_ms < 3000.0);
    }
    // Roughly 30% of eligible enemies fire
    assert!(fired > 20 && fired < 100, "fired {fired} of 200");
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_from_player_is_centred_on_nose() {
    let p = Player::new();
    let b = Projectile::from_player(&p);
    assert_eq!(b.body.x, 690.0); // 625 + 75 - 10
    assert_eq!(b.body.y, 850.0);
    assert_eq!(b.body.speed, PLAYER_BULLET_SPEED);
    assert_eq!((b.body.width, b.body.height), (BULLET_SIZE, BULLET_SIZE));
}

#[test]
fn projectile_from_enemy_drops_from_bottom_centre() {
    let e = idle_enemy(0, 1000.0);
    let b = Projectile::from_enemy(&e);
    assert_eq!(b.body.x, 140.0); // 100 + 50 - 10
    assert_eq!(b.body.y, 170.0); // 100 + 70
    assert_eq!(b.body.speed, ENEMY_BULLET_SPEED);
}

#[test]
fn projectile_top_boundary_is_inclusive() {
    let mut at_edge = Projectile::new(0.0, -5.0, -15.0);
    assert!(!at_edge.update());
    assert_eq!(at_edge.body.y, -20.0);

    let mut past_edge = Projectile::new(0.0, -6.0, -15.0);
    assert!(past_edge.update());
}

#[test]
fn projectile_bottom_boundary_is_inclusive() {
    let mut at_edge = Projectile::new(0.0, 990.0, 10.0);
    assert!(!at_edge.update());
    assert_eq!(at_edge.body.y, VIEWPORT_HEIGHT);

    let mut past_edge = Projectile::new(0.0, 991.0, 10.0);
    assert!(past_edge.update());
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[test]
fn explosion_lives_thirty_frames() {
    let mut e = Explosion::new(100.0, 100.0);
    assert_eq!((e.width, e.height), (50.0, 50.0));
    for _ in 0..29 {
        assert!(!e.update());
    }
    assert!(e.update());
    assert_eq!(e.lifetime, 0);
}

#[test]
fn explosion_is_centred() {
    let e = Explosion::new(100.0, 200.0);
    assert_eq!(e.top_left(), (75.0, 175.0));
}

// ── FrameEvent ────────────────────────────────────────────────────────────────

#[test]
fn collision_events() {
    assert!(FrameEvent::EnemyDestroyed { x: 0.0, y: 0.0 }.is_collision());
    assert!(FrameEvent::PlayerHit { hp_left: 90 }.is_collision());
    assert!(!FrameEvent::WaveStarted { level: 2, enemies: 7 }.is_collision());
    assert!(!FrameEvent::GameOver { kills: 3, level: 1 }.is_collision());
}
