use glam::Vec2;
use maze_chase::config::GameConfig;
use maze_chase::entities::*;
use maze_chase::geometry::Rect;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A patrolling monster occupying 30..70 on both axes.
fn make_monster(velocity: Vec2) -> Monster {
    Monster {
        rect: Rect::from_center(Vec2::new(50.0, 50.0), 40.0, 40.0),
        velocity,
        health: 2,
        attack_delay: 10_000,
        key_dropped: false,
        state: MonsterState::Patrol,
    }
}

#[test]
fn new_monster_patrols_at_configured_speed() {
    let config = GameConfig::default();
    let m = Monster::new(Vec2::new(150.0, 50.0), &config, &mut seeded_rng());
    assert_eq!(m.health, 2);
    assert_eq!(m.state, MonsterState::Patrol);
    assert!(ATTACK_DELAY_RANGE.contains(&m.attack_delay));
    assert!((m.velocity.length() - config.monster_speed).abs() < 1e-4);
    assert_eq!(m.center(), Vec2::new(150.0, 50.0));
}

// ── Patrol ────────────────────────────────────────────────────────────────────

#[test]
fn patrol_bounces_off_walls_per_axis() {
    let config = GameConfig::default();
    let wall = Rect::new(71.0, 0.0, 10.0, 100.0);
    let mut m = make_monster(Vec2::new(2.0, 1.0));

    m.update(&[wall], &config, &mut seeded_rng());
    assert_eq!(m.rect.x, 30.0);
    assert_eq!(m.rect.y, 31.0);
    assert_eq!(m.velocity, Vec2::new(-2.0, 1.0));
}

#[test]
fn attack_delay_expiry_starts_a_stationary_wind_up() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut m = make_monster(Vec2::new(2.0, 0.0));
    m.attack_delay = 1;

    m.update(&[], &config, &mut rng);
    assert!(m.is_attacking());
    assert_eq!(m.velocity, Vec2::ZERO);
    let x = m.rect.x;

    for _ in 0..MONSTER_ATTACK.total_ticks() - 1 {
        m.update(&[], &config, &mut rng);
    }
    assert!(m.is_attacking());
    assert_eq!(m.rect.x, x);

    m.update(&[], &config, &mut rng);
    assert_eq!(m.state, MonsterState::Patrol);
    assert!(ATTACK_DELAY_RANGE.contains(&m.attack_delay));
    assert!(m.velocity.length() > 0.0);
}

// ── Hits ──────────────────────────────────────────────────────────────────────

#[test]
fn first_hit_knocks_back_second_hit_kills() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut m = make_monster(Vec2::ZERO);

    m.hit(Vec2::new(8.0, 0.0), &config, &mut rng);
    assert_eq!(m.health, 1);
    assert_eq!(
        m.state,
        MonsterState::Knockback {
            frames_left: config.monster_knockback_frames,
            velocity: Vec2::new(8.0, 0.0)
        }
    );

    m.hit(Vec2::new(0.0, 8.0), &config, &mut rng);
    assert_eq!(m.health, 0);
    assert!(m.is_dying());
}

#[test]
fn hitting_a_dying_monster_does_nothing() {
    let config = GameConfig::default();
    let mut m = make_monster(Vec2::ZERO);
    m.health = 0;
    m.state = MonsterState::Dying {
        ticks: 7,
        velocity: Vec2::ZERO,
    };
    m.hit(Vec2::new(8.0, 0.0), &config, &mut seeded_rng());
    assert_eq!(m.health, 0);
    assert_eq!(
        m.state,
        MonsterState::Dying {
            ticks: 7,
            velocity: Vec2::ZERO
        }
    );
}

#[test]
fn hit_cancels_an_attack_wind_up() {
    let config = GameConfig::default();
    let mut m = make_monster(Vec2::ZERO);
    m.state = MonsterState::AttackWindup { ticks: 30 };
    m.hit(Vec2::new(-8.0, 0.0), &config, &mut seeded_rng());
    assert!(m.is_knocked_back());
    assert!(!m.is_attacking());
    assert!(ATTACK_DELAY_RANGE.contains(&m.attack_delay));
}

#[test]
fn knockback_drifts_then_resumes_patrol() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut m = make_monster(Vec2::ZERO);
    m.hit(Vec2::new(8.0, 0.0), &config, &mut rng);

    for _ in 0..config.monster_knockback_frames {
        m.update(&[], &config, &mut rng);
    }
    assert_eq!(m.rect.x, 30.0 + 8.0 * config.monster_knockback_frames as f32);
    assert_eq!(m.state, MonsterState::Patrol);
}

#[test]
fn death_animation_finishes_after_forty_ticks() {
    let config = GameConfig::default();
    let mut rng = seeded_rng();
    let mut m = make_monster(Vec2::ZERO);
    m.health = 0;
    m.state = MonsterState::Dying {
        ticks: 0,
        velocity: Vec2::ZERO,
    };

    for _ in 0..MONSTER_DEATH.total_ticks() - 1 {
        m.update(&[], &config, &mut rng);
    }
    assert!(!m.is_finished());
    m.update(&[], &config, &mut rng);
    assert!(m.is_finished());

    // Further updates stay finished.
    m.update(&[], &config, &mut rng);
    assert!(m.is_finished());
}

#[test]
fn animation_clock_arithmetic() {
    assert_eq!(PLAYER_ATTACK.total_ticks(), 45);
    assert_eq!(PLAYER_ATTACK.frame_at(35), ARROW_RELEASE_FRAME);
    assert_eq!(PLAYER_ATTACK.frame_at(34), 6);
    assert_eq!(MONSTER_ATTACK.total_ticks(), 70);
    assert_eq!(MONSTER_DEATH.total_ticks(), 40);
    assert!(MONSTER_DEATH.is_complete(40));
    assert!(!MONSTER_DEATH.is_complete(39));
}
