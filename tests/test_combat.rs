use glam::Vec2;
use maze_chase::combat::*;
use maze_chase::compute::*;
use maze_chase::config::GameConfig;
use maze_chase::entities::*;
use maze_chase::geometry::Rect;
use maze_chase::input::InputSnapshot;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Open world, player at (50, 50) facing right, nothing else in it.
fn make_world() -> World {
    let config = GameConfig {
        initial_monsters: 0,
        ..GameConfig::default()
    };
    let mut world = init_state_with_walls(config, Vec::new(), &mut seeded_rng());
    world.entities.clear();
    world
}

/// A stationary monster that will not attack during a test.
fn monster_at(x: f32, y: f32) -> Monster {
    Monster {
        rect: Rect::from_center(Vec2::new(x, y), 40.0, 40.0),
        velocity: Vec2::ZERO,
        health: 2,
        attack_delay: 10_000,
        key_dropped: false,
        state: MonsterState::Patrol,
    }
}

fn add_monster(world: &mut World, x: f32, y: f32) -> EntityId {
    world.entities.spawn(Entity::Monster(monster_at(x, y)))
}

fn add_arrow(world: &mut World, x: f32, y: f32) {
    let arrow = Projectile::arrow(Vec2::new(x, y), Vec2::X, &world.config);
    world.entities.spawn(Entity::Projectile(arrow));
}

fn run(world: World, ticks: usize, rng: &mut StdRng) -> World {
    (0..ticks).fold(world, |w, _| tick(&w, &InputSnapshot::default(), rng))
}

fn attack() -> InputSnapshot {
    InputSnapshot {
        action: true,
        ..InputSnapshot::default()
    }
}

fn monster(world: &World, id: EntityId) -> &Monster {
    match world.entities.get(id) {
        Some(Entity::Monster(m)) => m,
        other => panic!("expected a live monster, got {other:?}"),
    }
}

// ── Arrows ────────────────────────────────────────────────────────────────────

#[test]
fn arrow_hit_staggers_a_fresh_monster() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    let id = add_monster(&mut world, 200.0, 50.0);
    add_arrow(&mut world, 150.0, 50.0);

    let world = run(world, 2, &mut rng);
    let m = monster(&world, id);
    assert_eq!(m.health, 1);
    assert_eq!(
        m.state,
        MonsterState::Knockback {
            frames_left: world.config.monster_knockback_frames,
            velocity: Vec2::new(world.config.knockback_speed, 0.0)
        }
    );
    assert_eq!(world.entities.projectiles().count(), 0);
}

#[test]
fn arrow_stopped_by_wall_never_reaches_monster() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.walls = vec![Rect::new(200.0, 0.0, 10.0, 700.0)];
    let id = add_monster(&mut world, 260.0, 50.0);
    add_arrow(&mut world, 150.0, 50.0);

    let world = run(world, 2, &mut rng);
    assert_eq!(world.entities.projectiles().count(), 1);

    let world = run(world, 1, &mut rng);
    assert_eq!(world.entities.projectiles().count(), 0);
    assert_eq!(monster(&world, id).health, 2);
}

#[test]
fn only_the_first_overlapping_monster_absorbs_an_arrow() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    let first = add_monster(&mut world, 200.0, 50.0);
    let second = add_monster(&mut world, 200.0, 50.0);
    add_arrow(&mut world, 150.0, 50.0);

    let world = run(world, 2, &mut rng);
    assert_eq!(monster(&world, first).health, 1);
    assert_eq!(monster(&world, second).health, 2);
}

#[test]
fn first_monster_hit_follows_store_order() {
    let mut world = make_world();
    let a = add_monster(&mut world, 200.0, 50.0);
    add_monster(&mut world, 200.0, 50.0);
    let probe = Rect::from_center(Vec2::new(200.0, 50.0), 10.0, 10.0);
    assert_eq!(first_monster_hit(&world.entities, &probe), Some(a));

    let miss = Rect::from_center(Vec2::new(500.0, 50.0), 10.0, 10.0);
    assert_eq!(first_monster_hit(&world.entities, &miss), None);
}

// ── Fists ─────────────────────────────────────────────────────────────────────

#[test]
fn fist_passes_through_walls() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.walls = vec![Rect::new(76.0, 0.0, 2.0, 700.0)];
    let id = add_monster(&mut world, 100.0, 50.0);

    let world = tick(&world, &attack(), &mut rng);
    assert_eq!(world.entities.projectiles().count(), 1);

    let world = run(world, 1, &mut rng);
    let m = monster(&world, id);
    assert_eq!(m.health, 1);
    assert!(m.is_knocked_back());
    assert_eq!(world.entities.projectiles().count(), 0);
}

#[test]
fn fist_expires_after_its_lifetime() {
    let mut rng = seeded_rng();
    let world = make_world();
    let world = tick(&world, &attack(), &mut rng);
    let world = run(world, 3, &mut rng);
    assert_eq!(world.entities.projectiles().count(), 1);
    let world = run(world, 1, &mut rng);
    assert_eq!(world.entities.projectiles().count(), 0);
}

#[test]
fn fist_hitbox_follows_facing_and_boost() {
    let world = make_world();
    let fist = Projectile::fist(&world.player, &world.config);
    assert_eq!((fist.rect.w, fist.rect.h), (20.0, 30.0));

    let mut player = world.player.clone();
    player.direction = Vec2::Y;
    player.attack_range_boost = 20.0;
    let fist = Projectile::fist(&player, &world.config);
    assert_eq!((fist.rect.w, fist.rect.h), (50.0, 40.0));
    assert_eq!(fist.kind, ProjectileKind::Fist { age: 0, lifetime: 25 });
}

#[test]
fn rapid_fire_volley_spreads_three_arrows() {
    let world = make_world();
    let mut player = world.player.clone();
    assert_eq!(Projectile::arrow_volley(&player, &world.config).len(), 1);

    player.rapid_fire = true;
    let volley = Projectile::arrow_volley(&player, &world.config);
    assert_eq!(volley.len(), 3);
    assert!(volley[0].direction.y < 0.0);
    assert!(volley[1].direction.y.abs() < 1e-6);
    assert!(volley[2].direction.y > 0.0);
    for arrow in &volley {
        assert!((arrow.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(arrow.speed, world.config.fist_speed * 2.5);
    }
}

#[test]
fn attack_press_during_knockback_keeps_the_knockback() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.player.has_bow = true;
    world.player.start_knockback(Vec2::new(8.0, 0.0), 10);

    let world = tick(&world, &attack(), &mut rng);
    assert!(world.player.is_knocked_back());
    assert!(!world.player.is_attacking());
    assert_eq!(world.player.rect.x, 38.0);
}

#[test]
fn fist_press_during_knockback_throws_nothing() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.player.start_knockback(Vec2::new(8.0, 0.0), 10);

    let world = tick(&world, &attack(), &mut rng);
    assert_eq!(world.entities.projectiles().count(), 0);
    assert!(world.player.is_knocked_back());
}

#[test]
fn huge_range_boost_saturates_fist_lifetime() {
    let world = make_world();
    let mut player = world.player.clone();
    player.attack_range_boost = f32::MAX;
    let fist = Projectile::fist(&player, &world.config);
    assert_eq!(
        fist.kind,
        ProjectileKind::Fist {
            age: 0,
            lifetime: u32::MAX
        }
    );
}

// ── Loot ──────────────────────────────────────────────────────────────────────

#[test]
fn killing_blow_drops_a_key_once() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.config.key_drop_probability = 1.0;
    let id = add_monster(&mut world, 200.0, 50.0);
    if let Some(m) = world.entities.monster_mut(id) {
        m.health = 1;
    }
    add_arrow(&mut world, 150.0, 50.0);

    let world = run(world, 2, &mut rng);
    let m = monster(&world, id);
    assert!(m.is_dying());
    assert!(m.key_dropped);
    assert_eq!(world.entities.pickups_of(PickupKind::Key).count(), 1);
}

#[test]
fn key_roll_is_one_shot() {
    let config = GameConfig {
        key_drop_probability: 1.0,
        ..GameConfig::default()
    };
    let mut rng = seeded_rng();
    let mut m = monster_at(200.0, 50.0);
    m.state = MonsterState::Dying {
        ticks: 0,
        velocity: Vec2::ZERO,
    };

    assert!(roll_key_drop(&mut m, false, &config, &mut rng).is_some());
    assert!(roll_key_drop(&mut m, false, &config, &mut rng).is_none());
}

#[test]
fn no_key_drops_while_player_holds_one() {
    let config = GameConfig {
        key_drop_probability: 1.0,
        ..GameConfig::default()
    };
    let mut m = monster_at(200.0, 50.0);
    m.state = MonsterState::Dying {
        ticks: 0,
        velocity: Vec2::ZERO,
    };
    assert!(roll_key_drop(&mut m, true, &config, &mut seeded_rng()).is_none());
    assert!(m.key_dropped);
}

#[test]
fn living_monster_is_never_rolled() {
    let config = GameConfig {
        key_drop_probability: 1.0,
        ..GameConfig::default()
    };
    let mut m = monster_at(200.0, 50.0);
    assert!(roll_key_drop(&mut m, false, &config, &mut seeded_rng()).is_none());
    assert!(!m.key_dropped);
}

// ── Contact damage ────────────────────────────────────────────────────────────

#[test]
fn contact_costs_a_life_and_pushes_both_apart() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    let id = add_monster(&mut world, 60.0, 50.0);
    let lives = world.player.lives;

    let world = tick(&world, &InputSnapshot::default(), &mut rng);
    assert_eq!(world.player.lives, lives - 1);
    assert_eq!(world.player.invuln_timer, world.config.invuln_frames);
    assert_eq!(
        world.player.knockback_velocity(),
        Vec2::new(-world.config.knockback_speed, 0.0)
    );
    let m = monster(&world, id);
    assert!(m.is_knocked_back());
    assert_eq!(m.health, 1);
}

#[test]
fn contact_with_last_life_ends_the_game() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.player.lives = 1;
    add_monster(&mut world, 60.0, 50.0);

    let world = tick(&world, &InputSnapshot::default(), &mut rng);
    assert!(world.is_game_over());
    assert_eq!(world.player.lives, 0);
    assert_ne!(world.player.knockback_velocity(), Vec2::ZERO);
}

#[test]
fn invulnerable_player_takes_no_damage() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.player.invuln_timer = 10;
    add_monster(&mut world, 60.0, 50.0);
    let lives = world.player.lives;

    let world = tick(&world, &InputSnapshot::default(), &mut rng);
    assert_eq!(world.player.lives, lives);
}

#[test]
fn dying_monster_does_no_contact_damage() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    let id = add_monster(&mut world, 60.0, 50.0);
    if let Some(m) = world.entities.monster_mut(id) {
        m.health = 0;
        m.state = MonsterState::Dying {
            ticks: 0,
            velocity: Vec2::ZERO,
        };
    }
    let lives = world.player.lives;

    let world = tick(&world, &InputSnapshot::default(), &mut rng);
    assert_eq!(world.player.lives, lives);
    assert!(!world.player.is_invulnerable());
}

#[test]
fn contact_cancels_a_bow_wind_up() {
    let mut rng = seeded_rng();
    let mut world = make_world();
    world.player.has_bow = true;
    world.player.start_arrow_attack();
    add_monster(&mut world, 60.0, 50.0);

    let world = tick(&world, &InputSnapshot::default(), &mut rng);
    assert!(!world.player.is_attacking());
    assert!(world.player.is_knocked_back());
}
