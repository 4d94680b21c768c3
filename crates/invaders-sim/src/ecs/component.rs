//! Component dispatch.
//!
//! Components are a closed set of variants. Each variant implements some of
//! the `init`, `update` and `draw` hooks; the rest are no-ops. Hooks reach
//! sibling components through [`Siblings`], addressed by slot index.

use invaders_core::render::RenderBackend;

use super::components::{Collider, KeyboardController, Label, Projectile, Sprite, Transform};
use super::entity::EntityId;

#[derive(Debug, Clone)]
pub enum Component {
    Transform(Transform),
    Collider(Collider),
    Projectile(Projectile),
    Sprite(Sprite),
    Label(Label),
    Keyboard(KeyboardController),
}

impl Component {
    pub(crate) fn init(&mut self, siblings: &mut Siblings<'_>) {
        match self {
            Component::Collider(c) => c.init(siblings),
            Component::Projectile(p) => p.init(siblings),
            Component::Sprite(s) => s.init(siblings),
            Component::Keyboard(k) => k.init(siblings),
            Component::Transform(_) | Component::Label(_) => {}
        }
    }

    pub(crate) fn update(&mut self, siblings: &mut Siblings<'_>) {
        match self {
            Component::Transform(t) => t.update(),
            Component::Projectile(p) => p.update(siblings),
            Component::Keyboard(k) => k.update(siblings),
            Component::Collider(_) | Component::Sprite(_) | Component::Label(_) => {}
        }
    }

    /// `components` is the owning entity's full component list.
    pub(crate) fn draw(&self, components: &[Component], out: &mut dyn RenderBackend) {
        match self {
            Component::Sprite(s) => s.draw(components, out),
            Component::Label(l) => l.draw(out),
            _ => {}
        }
    }
}

/// Maps a component struct to its [`Component`] variant.
pub trait ComponentKind: Sized + Into<Component> {
    const NAME: &'static str;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_kind {
    ($ty:ident, $variant:ident) => {
        impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::$variant(value)
            }
        }

        impl ComponentKind for $ty {
            const NAME: &'static str = stringify!($ty);

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(c) => Some(c),
                    _ => None,
                }
            }
        }
    };
}

component_kind!(Transform, Transform);
component_kind!(Collider, Collider);
component_kind!(Projectile, Projectile);
component_kind!(Sprite, Sprite);
component_kind!(Label, Label);
component_kind!(KeyboardController, Keyboard);

/// The other components of an entity while one of its components runs a
/// hook, plus the entity's alive flag.
pub struct Siblings<'a> {
    id: EntityId,
    before: &'a mut [Component],
    after: &'a mut [Component],
    alive: &'a mut bool,
}

impl<'a> Siblings<'a> {
    pub(crate) fn new(
        id: EntityId,
        before: &'a mut [Component],
        after: &'a mut [Component],
        alive: &'a mut bool,
    ) -> Self {
        Self {
            id,
            before,
            after,
            alive,
        }
    }

    /// Slot index of the running component.
    fn own_slot(&self) -> usize {
        self.before.len()
    }

    fn slot(&self, at: usize) -> Option<&Component> {
        let own = self.own_slot();
        if at < own {
            self.before.get(at)
        } else if at > own {
            self.after.get(at - own - 1)
        } else {
            None
        }
    }

    fn slot_mut(&mut self, at: usize) -> Option<&mut Component> {
        let own = self.own_slot();
        if at < own {
            self.before.get_mut(at)
        } else if at > own {
            self.after.get_mut(at - own - 1)
        } else {
            None
        }
    }

    /// Slot of the first sibling of kind `T`.
    pub fn find<T: ComponentKind>(&self) -> Option<usize> {
        self.before
            .iter()
            .position(|c| T::from_component(c).is_some())
            .or_else(|| {
                self.after
                    .iter()
                    .position(|c| T::from_component(c).is_some())
                    .map(|i| i + self.own_slot() + 1)
            })
    }

    /// Like [`Siblings::find`], but a missing sibling is a construction-order
    /// bug: `owner` needs `T` attached before it.
    pub fn require<T: ComponentKind>(&self, owner: &str) -> usize {
        match self.find::<T>() {
            Some(at) => at,
            None => panic!(
                "{}: {owner} requires a {} attached before it",
                self.id,
                T::NAME
            ),
        }
    }

    pub fn get<T: ComponentKind>(&self, at: usize) -> Option<&T> {
        self.slot(at).and_then(T::from_component)
    }

    pub fn get_mut<T: ComponentKind>(&mut self, at: usize) -> Option<&mut T> {
        self.slot_mut(at).and_then(T::from_component_mut)
    }

    pub fn is_alive(&self) -> bool {
        *self.alive
    }

    /// Mark the owning entity for removal.
    pub fn destroy(&mut self) {
        *self.alive = false;
    }
}
