//! Entity-component runtime.
//!
//! Entities own an ordered list of [`Component`] variants. The [`Manager`]
//! owns every entity, keeps group and collider indices over them, and
//! removes destroyed entities in one place: [`Manager::refresh`].

pub mod component;
pub mod components;
pub mod entity;
pub mod manager;

pub use component::{Component, ComponentKind, Siblings};
pub use components::{Collider, KeyboardController, Label, Projectile, Sprite, Transform};
pub use entity::{Entity, EntityAllocator, EntityId};
pub use manager::Manager;
