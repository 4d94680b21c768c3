use serde::{Deserialize, Serialize};

use invaders_core::enums::Group;
use invaders_core::render::RenderBackend;

use super::component::{Component, ComponentKind, Siblings};

/// Generational handle to an entity owned by the [`super::Manager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}g{}", self.index, self.generation)
    }
}

/// Hands out entity ids and recycles the indices of removed entities.
/// A recycled index comes back with a bumped generation, so handles to the
/// removed entity stop resolving.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    generations: Vec<u32>,
    free: Vec<u32>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> EntityId {
        match self.free.pop() {
            Some(index) => EntityId::new(index, self.generations[index as usize]),
            None => {
                let index = self.generations.len() as u32;
                self.generations.push(0);
                EntityId::new(index, 0)
            }
        }
    }

    /// Retire `id`. Retiring a stale id is a no-op.
    pub fn deallocate(&mut self, id: EntityId) {
        if !self.is_alive(id) {
            return;
        }
        self.generations[id.index as usize] += 1;
        self.free.push(id.index);
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.generations.get(id.index as usize) == Some(&id.generation)
    }

    /// Number of ids currently handed out.
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free.len()
    }
}

/// An identity owning an ordered sequence of components.
///
/// `destroy` only flips the alive flag; the entity stays readable until the
/// manager's next refresh removes it.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    components: Vec<Component>,
    alive: bool,
    group: Option<Group>,
}

impl Entity {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            components: Vec::new(),
            alive: true,
            group: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark for removal at the next refresh. Idempotent.
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn group(&self) -> Option<Group> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: Group) {
        self.group = Some(group);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Append a component and run its `init` hook. Returns its slot.
    pub(crate) fn push(&mut self, component: Component) -> usize {
        self.components.push(component);
        let at = self.components.len() - 1;
        self.run_hook(at, |component, siblings| component.init(siblings));
        at
    }

    /// Append a typed component and return it after `init` ran. Bypasses the
    /// manager's collider index, so only for standalone entities in tests.
    #[cfg(test)]
    pub(crate) fn add<T: ComponentKind>(&mut self, component: T) -> &mut T {
        let at = self.push(component.into());
        self.slot_mut::<T>(at)
    }

    pub(crate) fn slot_mut<T: ComponentKind>(&mut self, at: usize) -> &mut T {
        let id = self.id;
        match self.components.get_mut(at).and_then(T::from_component_mut) {
            Some(component) => component,
            None => panic!("{id}: slot {at} does not hold a {}", T::NAME),
        }
    }

    pub fn has<T: ComponentKind>(&self) -> bool {
        self.try_get::<T>().is_some()
    }

    pub fn try_get<T: ComponentKind>(&self) -> Option<&T> {
        self.components.iter().find_map(T::from_component)
    }

    pub fn try_get_mut<T: ComponentKind>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::from_component_mut)
    }

    /// Typed component access. A missing component is a construction-order
    /// bug, so this panics instead of returning `None`.
    pub fn get<T: ComponentKind>(&self) -> &T {
        match self.try_get::<T>() {
            Some(component) => component,
            None => panic!("{}: no {} component attached", self.id, T::NAME),
        }
    }

    pub fn get_mut<T: ComponentKind>(&mut self) -> &mut T {
        let id = self.id;
        match self.try_get_mut::<T>() {
            Some(component) => component,
            None => panic!("{id}: no {} component attached", T::NAME),
        }
    }

    pub(crate) fn update(&mut self) {
        for at in 0..self.components.len() {
            self.run_hook(at, |component, siblings| component.update(siblings));
        }
    }

    pub fn draw(&self, out: &mut dyn RenderBackend) {
        for component in &self.components {
            component.draw(&self.components, out);
        }
    }

    /// Run `hook` on slot `at` with mutable access to every other slot.
    fn run_hook(&mut self, at: usize, hook: impl FnOnce(&mut Component, &mut Siblings<'_>)) {
        let (before, rest) = self.components.split_at_mut(at);
        if let Some((current, after)) = rest.split_first_mut() {
            let mut siblings = Siblings::new(self.id, before, after, &mut self.alive);
            hook(current, &mut siblings);
        }
    }
}
