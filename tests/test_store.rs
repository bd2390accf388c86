use glam::Vec2;
use maze_chase::entities::*;
use maze_chase::store::EntityStore;

fn key_at(x: f32) -> Entity {
    Entity::Pickup(Pickup::new(PickupKind::Key, Vec2::new(x, 0.0)))
}

fn bow_at(x: f32) -> Entity {
    Entity::Pickup(Pickup::new(PickupKind::Bow, Vec2::new(x, 0.0)))
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut store = EntityStore::new();
    let a = store.spawn(key_at(0.0));
    let b = store.spawn(key_at(1.0));
    assert!(a < b);
    assert_eq!(store.len(), 2);
}

#[test]
fn killed_entities_vanish_from_every_view_at_once() {
    let mut store = EntityStore::new();
    let a = store.spawn(key_at(0.0));
    let b = store.spawn(bow_at(1.0));

    store.kill(a);
    assert!(!store.is_alive(a));
    assert!(store.get(a).is_none());
    assert_eq!(store.pickups().count(), 1);
    assert_eq!(store.pickups_of(PickupKind::Key).count(), 0);
    assert_eq!(store.len(), 1);
    assert!(store.is_alive(b));
}

#[test]
fn kill_is_idempotent_and_ids_are_not_reused() {
    let mut store = EntityStore::new();
    let a = store.spawn(key_at(0.0));
    store.kill(a);
    store.kill(a);
    store.sweep();
    assert!(store.is_empty());

    let b = store.spawn(key_at(0.0));
    assert_ne!(a, b);
    assert!(!store.is_alive(a));
}

#[test]
fn views_preserve_insertion_order() {
    let mut store = EntityStore::new();
    store.spawn(key_at(3.0));
    store.spawn(bow_at(1.0));
    store.spawn(key_at(2.0));

    let xs: Vec<f32> = store
        .pickups_of(PickupKind::Key)
        .map(|(_, p)| p.rect.center().x)
        .collect();
    assert_eq!(xs, vec![3.0, 2.0]);
    assert_eq!(store.monsters().count(), 0);
    assert_eq!(store.projectiles().count(), 0);
}

#[test]
fn clone_is_independent() {
    let mut store = EntityStore::new();
    let a = store.spawn(key_at(0.0));
    let mut copy = store.clone();
    copy.kill(a);
    assert!(store.is_alive(a));
}
