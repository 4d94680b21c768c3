//! Entity manager: owns all entities and their secondary indices.

use invaders_core::enums::Group;
use invaders_core::render::RenderBackend;
use invaders_core::types::Rect;

use super::component::{Component, ComponentKind};
use super::components::{Collider, Transform};
use super::entity::{Entity, EntityAllocator, EntityId};

/// Primary entity store plus per-group and collider indices.
///
/// Entities live in slots addressed by `EntityId::index`, so removing one
/// never moves another. `order` records creation order and drives
/// `update`/`draw`; group and collider lists are secondary indices over the
/// same ids, patched by [`Manager::refresh`].
#[derive(Debug, Default)]
pub struct Manager {
    allocator: EntityAllocator,
    slots: Vec<Option<Entity>>,
    order: Vec<EntityId>,
    groups: [Vec<EntityId>; Group::COUNT],
    colliders: Vec<EntityId>,
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    /// New entity with no components, alive and ungrouped.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        let idx = id.index as usize;
        if self.slots.len() <= idx {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx] = Some(Entity::new(id));
        self.order.push(id);
        id
    }

    /// The entity behind `id`, alive or awaiting removal. `None` once
    /// refresh has removed it.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots
            .get(id.index as usize)
            .and_then(Option::as_ref)
            .filter(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots
            .get_mut(id.index as usize)
            .and_then(Option::as_mut)
            .filter(|e| e.id() == id)
    }

    /// Like [`Manager::get`]; a stale handle is a contract violation.
    pub fn entity(&self, id: EntityId) -> &Entity {
        match self.get(id) {
            Some(entity) => entity,
            None => panic!("{id}: stale entity handle"),
        }
    }

    pub fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        match self.get_mut(id) {
            Some(entity) => entity,
            None => panic!("{id}: stale entity handle"),
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(Entity::is_alive)
    }

    /// Mark `id` for removal at the next refresh. Stale handles are ignored.
    pub fn destroy(&mut self, id: EntityId) {
        if let Some(entity) = self.get_mut(id) {
            entity.destroy();
        }
    }

    /// Attach a component and run its `init` hook. Colliders are also
    /// registered in the collider index.
    pub fn add_component<T: ComponentKind>(&mut self, id: EntityId, component: T) -> &mut T {
        let component: Component = component.into();
        if matches!(component, Component::Collider(_)) && !self.colliders.contains(&id) {
            self.colliders.push(id);
        }
        let entity = self.entity_mut(id);
        let at = entity.push(component);
        entity.slot_mut::<T>(at)
    }

    /// Put `id` into `group`, leaving any group it was in before.
    pub fn add_to_group(&mut self, id: EntityId, group: Group) {
        let entity = self.entity_mut(id);
        let previous = entity.group();
        if previous == Some(group) {
            return;
        }
        entity.set_group(group);
        if let Some(previous) = previous {
            self.groups[previous.index()].retain(|&other| other != id);
        }
        self.groups[group.index()].push(id);
    }

    /// Ids indexed under `group`, in insertion order. Includes entities
    /// destroyed since the last refresh.
    pub fn group(&self, group: Group) -> &[EntityId] {
        &self.groups[group.index()]
    }

    /// Live entities indexed under `group`.
    pub fn group_size(&self, group: Group) -> usize {
        self.group(group)
            .iter()
            .filter(|&&id| self.is_alive(id))
            .count()
    }

    /// Ids of entities carrying a collider, in registration order.
    pub fn colliders(&self) -> &[EntityId] {
        &self.colliders
    }

    /// Current hit box of `id`, if it has a collider.
    pub fn collider_bounds(&self, id: EntityId) -> Option<Rect> {
        let entity = self.get(id)?;
        let collider = entity.try_get::<Collider>()?;
        let transform = collider
            .transform_slot()
            .and_then(|at| entity.components().get(at))
            .and_then(Transform::from_component)?;
        Some(collider.bounds(transform))
    }

    /// Physically present entities in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.order.iter().filter_map(move |&id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Run `update` on every live entity in creation order.
    pub fn update(&mut self) {
        for &id in &self.order {
            if let Some(entity) = self.slots[id.index as usize].as_mut() {
                if entity.is_alive() {
                    entity.update();
                }
            }
        }
    }

    /// Draw every entity in creation order.
    pub fn draw(&self, out: &mut dyn RenderBackend) {
        for entity in self.iter() {
            entity.draw(out);
        }
    }

    /// Draw the entities of one group in group order.
    pub fn draw_group(&self, group: Group, out: &mut dyn RenderBackend) {
        for &id in self.group(group) {
            if let Some(entity) = self.get(id) {
                entity.draw(out);
            }
        }
    }

    /// Remove every destroyed entity from the store and all indices.
    /// Relative order of the survivors is kept. Returns how many went.
    pub fn refresh(&mut self) -> usize {
        let slots = &self.slots;
        let live = |id: &EntityId| {
            slots[id.index as usize]
                .as_ref()
                .is_some_and(Entity::is_alive)
        };

        for group in &mut self.groups {
            group.retain(live);
        }
        self.colliders.retain(live);

        let before = self.order.len();
        let (kept, dead): (Vec<EntityId>, Vec<EntityId>) =
            self.order.iter().copied().partition(live);
        self.order = kept;

        for id in dead {
            self.slots[id.index as usize] = None;
            self.allocator.deallocate(id);
        }

        let removed = before - self.order.len();
        if removed > 0 {
            log::trace!(
                "refresh removed {removed} entities, {} remain",
                self.allocator.live_count()
            );
        }
        removed
    }
}
