//! Core types for the inventory engine

mod component;
mod container;
mod drawer;
mod grid;
mod item;
mod position;
mod snapshot;
pub mod tags;

// Re-export all types
pub use component::{Component, ComponentSpec};
pub use container::{Container, Eviction, Relocation, ResizeOutcome, ResizePlan};
pub use drawer::{Drawer, DrawerSpec};
pub use grid::{Slot, SlotGrid};
pub use item::{ItemKind, Tagged};
pub use position::{Location, Position};
pub use snapshot::{ComponentRecord, ContainerRecord, DrawerRecord};
pub use tags::Tags;
