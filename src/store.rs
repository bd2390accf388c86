//! The single authoritative entity store.
//!
//! Monsters, projectiles and pickups live in one insertion-ordered list.
//! Typed views are derived on demand, so there are no parallel membership
//! lists to fall out of sync. Killing an entity hides it from every view
//! immediately; the slot is reclaimed by `sweep`.

use crate::entities::{Entity, EntityId, Monster, Pickup, PickupKind, Projectile};

#[derive(Clone, Debug)]
struct Slot {
    id: EntityId,
    alive: bool,
    entity: Entity,
}

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    next_id: u32,
    slots: Vec<Slot>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            alive: true,
            entity,
        });
        id
    }

    /// Remove an entity. Killing a dead or unknown id does nothing.
    pub fn kill(&mut self, id: EntityId) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.alive = false;
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots.iter().any(|s| s.id == id && s.alive)
    }

    /// Drop the slots of killed entities.
    pub fn sweep(&mut self) {
        self.slots.retain(|s| s.alive);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| (s.id, &s.entity))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .iter()
            .find(|s| s.id == id && s.alive)
            .map(|s| &s.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id && s.alive)
            .map(|s| &mut s.entity)
    }

    // ── Typed views ───────────────────────────────────────────────────────────

    pub fn monsters(&self) -> impl Iterator<Item = (EntityId, &Monster)> {
        self.iter().filter_map(|(id, e)| match e {
            Entity::Monster(m) => Some((id, m)),
            _ => None,
        })
    }

    pub fn monsters_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Monster)> {
        self.slots
            .iter_mut()
            .filter(|s| s.alive)
            .filter_map(|s| match &mut s.entity {
                Entity::Monster(m) => Some((s.id, m)),
                _ => None,
            })
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        match self.get_mut(id) {
            Some(Entity::Monster(m)) => Some(m),
            _ => None,
        }
    }

    pub fn projectiles(&self) -> impl Iterator<Item = (EntityId, &Projectile)> {
        self.iter().filter_map(|(id, e)| match e {
            Entity::Projectile(p) => Some((id, p)),
            _ => None,
        })
    }

    pub fn projectile_mut(&mut self, id: EntityId) -> Option<&mut Projectile> {
        match self.get_mut(id) {
            Some(Entity::Projectile(p)) => Some(p),
            _ => None,
        }
    }

    pub fn pickups(&self) -> impl Iterator<Item = (EntityId, &Pickup)> {
        self.iter().filter_map(|(id, e)| match e {
            Entity::Pickup(p) => Some((id, p)),
            _ => None,
        })
    }

    pub fn pickups_of(&self, kind: PickupKind) -> impl Iterator<Item = (EntityId, &Pickup)> {
        self.pickups().filter(move |(_, p)| p.kind == kind)
    }
}
