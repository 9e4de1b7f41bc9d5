//! Container commands

mod clear;
mod create;
mod delete;
mod get;
mod list;
mod update;

pub use clear::ClearContainer;
pub use create::CreateContainer;
pub use delete::DeleteContainer;
pub use get::GetContainer;
pub use list::ListContainers;
pub use update::UpdateContainer;

use crate::types::Container;
use serde_json::{json, Value};

/// One-line view of a container, used by listings
pub(crate) fn summary(container: &Container) -> Value {
    json!({
        "name": container.name(),
        "rows": container.total_rows(),
        "columns": container.max_drawers_per_row(),
        "compartments": container.compartments_per_drawer(),
        "drawers": container.drawer_count(),
        "components": container.get_all_components().len(),
        "has_free_space": container.has_free_space(),
    })
}
