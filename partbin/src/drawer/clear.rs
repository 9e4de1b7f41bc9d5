//! ClearDrawer command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Discard every component in a drawer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClearDrawer {
    pub container: String,
    pub name: String,
}

impl ClearDrawer {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
        }
    }
}

impl Operation for ClearDrawer {
    fn verb(&self) -> &'static str {
        "clear"
    }

    fn noun(&self) -> &'static str {
        "drawer"
    }
}

impl Execute for ClearDrawer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let mut container = ctx.get_container(&self.container)?.clone();
        let removed = container.get_drawer_by_name_mut(&self.name)?.clear_drawer();
        container.refresh_tags();
        ctx.replace(&self.container, container)?;
        Ok(json!({
            "cleared": true,
            "container": self.container,
            "name": self.name,
            "removed_components": removed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::test_support::{cabinet, setup};

    #[test]
    fn test_clear_drawer() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = ClearDrawer::new("cabinet", "top").execute(&mut ctx).unwrap();
        assert_eq!(result["removed_components"], 1);

        let container = ctx.get_container("cabinet").unwrap();
        let drawer = container.get_drawer_by_name("top").unwrap();
        assert!(drawer.is_empty());
        assert_eq!(drawer.compartment_count(), 3);
        assert_eq!(drawer.tags()["children"], 0);
    }

    #[test]
    fn test_clear_missing_drawer() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);
        assert!(matches!(
            ClearDrawer::new("cabinet", "nope").execute(&mut ctx),
            Err(InventoryError::ItemNotFound { .. })
        ));
    }
}
