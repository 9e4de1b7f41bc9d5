//! Personal inventory engine with file-backed storage
//!
//! Parts live in a three-level hierarchy: a container is a grid of drawer
//! cells (rows by columns), each drawer has a fixed number of compartments,
//! and each compartment holds at most one component. Every item carries a
//! tag mapping that search and sort work on.
//!
//! ## Overview
//!
//! - **File-per-container** - each container and everything in it is one JSON file
//! - **Placeholder slots** - free cells and compartments are explicit, so
//!   positions never shift when something is removed
//! - **Derived tags** - name, position, counts and free space are kept in the
//!   tags so they are searchable
//! - **Confirmed resizes** - shrinking a container computes a plan first and
//!   only applies it once the caller agrees
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use partbin::{
//!     component::AddComponent, container::CreateContainer, drawer::AddDrawer,
//!     find::FindItems, Execute, InventoryConfig, InventoryContext, ItemKind,
//! };
//!
//! # fn example() -> partbin::Result<()> {
//! let mut ctx = InventoryContext::open(InventoryConfig::load()?)?;
//! CreateContainer::new("cabinet", 4, 6).execute(&mut ctx)?;
//! AddDrawer::new("cabinet", "resistors").execute(&mut ctx)?;
//! AddComponent::new("cabinet", "resistors", "10k", "resistor", 100).execute(&mut ctx)?;
//!
//! let found = FindItems::new(ItemKind::Component)
//!     .with_term("count>=50")
//!     .execute(&mut ctx)?;
//! println!("{} matches", found["count"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! <data_dir>/
//! ├── cabinet.json     # container record with its drawers and components
//! └── shelf_a.json     # "shelf/a": unsafe characters become '_'
//! ```

pub mod config;
mod context;
mod error;
pub mod operation;
pub mod search;
pub mod sort;
pub mod store;
pub mod types;

// Command modules
pub mod component;
pub mod container;
pub mod drawer;
pub mod find;

pub use config::{ConfigLoader, InventoryConfig};
pub use context::{auto_confirm, ConfirmHook, InventoryContext};
pub use error::{InventoryError, Result};
pub use operation::{process, Execute, Operation};
pub use search::{SearchMode, SearchQuery, SearchResult};
pub use store::{ContainerStore, JsonContainerStore};

// Re-export commonly used types
pub use types::{
    Component, ComponentSpec, Container, ContainerRecord, Drawer, DrawerSpec, ItemKind,
    Location, Position, ResizeOutcome, ResizePlan, Tagged, Tags,
};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::component::AddComponent;
    use crate::config::InventoryConfig;
    use crate::container::CreateContainer;
    use crate::context::InventoryContext;
    use crate::drawer::AddDrawer;
    use crate::operation::Execute;
    use tempfile::TempDir;

    /// Empty inventory in a temporary data directory
    pub fn setup() -> (TempDir, InventoryContext) {
        let temp = TempDir::new().unwrap();
        let config = InventoryConfig::default().with_data_dir(temp.path().join("containers"));
        let ctx = InventoryContext::open(config).unwrap();
        (temp, ctx)
    }

    /// "cabinet": 2x2 cells, 3 compartments, with "top" at [0,0] holding R1
    /// and "bottom" at [1,0] holding C1.
    pub fn cabinet(ctx: &mut InventoryContext) {
        CreateContainer::new("cabinet", 2, 2)
            .with_compartments(3)
            .execute(ctx)
            .unwrap();
        AddDrawer::new("cabinet", "top").at(0, 0).execute(ctx).unwrap();
        AddDrawer::new("cabinet", "bottom").at(1, 0).execute(ctx).unwrap();
        AddComponent::new("cabinet", "top", "R1", "resistor", 10)
            .execute(ctx)
            .unwrap();
        AddComponent::new("cabinet", "bottom", "C1", "capacitor", 4)
            .execute(ctx)
            .unwrap();
    }
}
