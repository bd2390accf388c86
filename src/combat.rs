//! Cross-entity collision rules.
//!
//! Each function is one step of the per-tick resolution order driven by
//! `compute::tick`; the order is part of the game's observable behaviour
//! (for example, which of two overlapping monsters absorbs an arrow).

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Entity, EntityId, GameStatus, Monster, Pickup, PickupKind, Projectile, World,
    NEED_KEY_MESSAGE,
};
use crate::geometry::{intersects, Rect};
use crate::input::InputSnapshot;
use crate::pickup;
use crate::store::EntityStore;

/// Primary action: draw the bow if the player has one, otherwise throw a fist.
/// Ignored while the player is being knocked back.
pub fn handle_action(world: &mut World, input: &InputSnapshot) {
    if !input.action || !world.is_playing() || world.player.is_knocked_back() {
        return;
    }
    if world.player.has_bow {
        world.player.start_arrow_attack();
    } else {
        let fist = Projectile::fist(&world.player, &world.config);
        world.entities.spawn(Entity::Projectile(fist));
    }
}

/// First monster in store order overlapping `rect`. Dying monsters count:
/// a corpse still absorbs a projectile.
pub fn first_monster_hit(entities: &EntityStore, rect: &Rect) -> Option<EntityId> {
    entities
        .monsters()
        .find(|(_, m)| intersects(rect, &m.rect))
        .map(|(id, _)| id)
}

/// One-shot loot roll, run after every hit. Fires at most once per monster:
/// the first time it is seen dying. Returns the key to place, if any.
pub fn roll_key_drop(
    monster: &mut Monster,
    player_has_key: bool,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<Pickup> {
    if !monster.is_dying() || monster.key_dropped {
        return None;
    }
    monster.key_dropped = true;
    let roll: f64 = rng.gen();
    if roll < config.key_drop_probability && !player_has_key {
        debug!("monster dropped a key at {}", monster.center());
        Some(Pickup::new(PickupKind::Key, monster.center()))
    } else {
        None
    }
}

/// Hit `target` with `knockback` and place any loot it drops.
fn strike(world: &mut World, target: EntityId, knockback: Vec2, rng: &mut impl Rng) {
    let has_key = world.player.has_key;
    let Some(monster) = world.entities.monster_mut(target) else {
        return;
    };
    monster.hit(knockback, &world.config, rng);
    if let Some(key) = roll_key_drop(monster, has_key, &world.config, rng) {
        world.entities.spawn(Entity::Pickup(key));
    }
}

/// Ids of live projectiles of one kind, in store order.
fn projectile_ids(world: &World, arrows: bool) -> Vec<EntityId> {
    world
        .entities
        .projectiles()
        .filter(|(_, p)| p.is_arrow() == arrows)
        .map(|(id, _)| id)
        .collect()
}

/// Advance every arrow; an arrow touching a wall is removed before it can
/// reach a monster, otherwise the first monster it overlaps absorbs it.
pub fn resolve_arrows(world: &mut World, rng: &mut impl Rng) {
    for id in projectile_ids(world, true) {
        let Some(arrow) = world.entities.projectile_mut(id) else {
            continue;
        };
        arrow.update();
        let arrow = arrow.clone();

        if arrow.hits_wall(&world.walls) {
            world.entities.kill(id);
            continue;
        }

        if let Some(target) = first_monster_hit(&world.entities, &arrow.rect) {
            let knockback = arrow.knockback_direction(&world.player) * world.config.knockback_speed;
            world.entities.kill(id);
            strike(world, target, knockback, rng);
        }
    }
}

/// Advance every fist; expired fists vanish, the rest strike the first
/// monster they overlap, pushing it along the player's facing.
pub fn resolve_fists(world: &mut World, rng: &mut impl Rng) {
    for id in projectile_ids(world, false) {
        let Some(fist) = world.entities.projectile_mut(id) else {
            continue;
        };
        if !fist.update() {
            world.entities.kill(id);
            continue;
        }
        let fist = fist.clone();

        if let Some(target) = first_monster_hit(&world.entities, &fist.rect) {
            let knockback = fist.knockback_direction(&world.player) * world.config.knockback_speed;
            world.entities.kill(id);
            strike(world, target, knockback, rng);
        }
    }
}

/// Monster contact damage. Both sides are knocked apart along the line
/// between their centers.
pub fn resolve_player_contacts(world: &mut World, rng: &mut impl Rng) {
    let player_rect = world.player.rect;
    let touching: Vec<EntityId> = world
        .entities
        .monsters()
        .filter(|(_, m)| intersects(&player_rect, &m.rect))
        .map(|(id, _)| id)
        .collect();

    for id in touching {
        let Some(monster) = world.entities.monster_mut(id) else {
            continue;
        };
        if monster.is_dying() || world.player.is_invulnerable() {
            continue;
        }
        let monster_center = monster.center();

        let player = &mut world.player;
        player.cancel_attack();
        player.lives = player.lives.saturating_sub(1);
        player.invuln_timer = world.config.invuln_frames;

        // Coincident centers have no direction; fall back to the facing.
        let push = (player.center() - monster_center)
            .try_normalize()
            .unwrap_or(player.direction);
        let speed = world.config.knockback_speed;
        player.start_knockback(push * speed, world.config.knockback_frames);
        debug!("player hit, {} lives left", player.lives);

        strike(world, id, -push * speed, rng);

        if world.player.lives == 0 {
            world.status = GameStatus::GameOver;
            info!("game over on frame {}", world.frame);
        }
    }
}

/// Win when standing on the endpoint with the key; nag without it.
pub fn resolve_endpoint(world: &mut World) {
    if !world.is_playing() {
        return;
    }
    if intersects(&world.player.rect, &world.endpoint.rect) {
        if world.player.has_key {
            world.status = GameStatus::Won;
            world.message = None;
            info!("player reached the endpoint on frame {}", world.frame);
        } else {
            world.message = Some(NEED_KEY_MESSAGE);
        }
    } else {
        world.message = None;
    }
}

/// Collect the first overlapping pickup whose kind passes `filter`.
fn collect_first(world: &mut World, filter: impl Fn(PickupKind) -> bool) {
    let player_rect = world.player.rect;
    let hit = world
        .entities
        .pickups()
        .find(|(_, p)| filter(p.kind) && intersects(&player_rect, &p.rect))
        .map(|(id, p)| (id, p.kind));

    if let Some((id, kind)) = hit {
        world.player = pickup::apply(kind, &world.player, &world.config);
        world.entities.kill(id);
        debug!("picked up {kind:?}");
    }
}

pub fn collect_key(world: &mut World) {
    collect_first(world, |kind| kind == PickupKind::Key);
}

/// Bow or attack range power-up.
pub fn collect_powerup(world: &mut World) {
    collect_first(world, |kind| kind != PickupKind::Key);
}

/// Release the arrow volley once the bow wind-up reaches its release frame.
pub fn release_arrows(world: &mut World) {
    if !world.player.wants_arrow_release() {
        return;
    }
    for arrow in Projectile::arrow_volley(&world.player, &world.config) {
        world.entities.spawn(Entity::Projectile(arrow));
    }
    world.player.mark_arrow_released();
}
