//! DeleteDrawer command

use super::DrawerSelector;
use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a drawer.
///
/// By name, a drawer holding components needs `force`. By position the
/// drawer in the cell is removed whatever it holds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteDrawer {
    pub container: String,
    pub name: Option<String>,
    pub row: Option<usize>,
    pub column: Option<usize>,
    #[serde(default)]
    pub force: bool,
}

impl DeleteDrawer {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: Some(name.into()),
            row: None,
            column: None,
            force: false,
        }
    }

    pub fn at(container: impl Into<String>, row: usize, column: usize) -> Self {
        Self {
            container: container.into(),
            name: None,
            row: Some(row),
            column: Some(column),
            force: false,
        }
    }

    pub fn forced(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl Operation for DeleteDrawer {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "drawer"
    }
}

impl Execute for DeleteDrawer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let selector = DrawerSelector::from_parts(self.name.as_deref(), self.row, self.column)?;
        let mut container = ctx.get_container(&self.container)?.clone();
        let removed = match &selector {
            DrawerSelector::Name(name) => container.remove_drawer_by_name(name, self.force)?,
            DrawerSelector::Position(p) => container.remove_drawer_at_pos(p.row, p.column)?,
        };
        ctx.replace(&self.container, container)?;
        Ok(json!({
            "deleted": true,
            "container": self.container,
            "name": removed.name(),
            "row": removed.row(),
            "column": removed.column(),
            "components": removed.component_count(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawer::AddDrawer;
    use crate::error::InventoryError;
    use crate::test_support::{cabinet, setup};

    #[test]
    fn test_delete_empty_drawer_by_name() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);
        AddDrawer::new("cabinet", "spare").execute(&mut ctx).unwrap();

        let result = DeleteDrawer::new("cabinet", "spare").execute(&mut ctx).unwrap();
        assert_eq!(result["deleted"], true);
        assert_eq!(result["components"], 0);
        assert!(!ctx.get_container("cabinet").unwrap().contains_drawer("spare"));
    }

    #[test]
    fn test_delete_non_empty_by_name_requires_force() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        assert!(matches!(
            DeleteDrawer::new("cabinet", "top").execute(&mut ctx),
            Err(InventoryError::ItemIsNotEmpty { count: 1, .. })
        ));
        let result = DeleteDrawer::new("cabinet", "top")
            .forced(true)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["components"], 1);
    }

    #[test]
    fn test_delete_by_position_ignores_contents() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = DeleteDrawer::at("cabinet", 1, 0).execute(&mut ctx).unwrap();
        assert_eq!(result["name"], "bottom");
        assert_eq!(result["components"], 1);
        let stored = ctx.store().load("cabinet").unwrap();
        assert_eq!(stored.drawers.len(), 1);

        assert!(matches!(
            DeleteDrawer::at("cabinet", 1, 0).execute(&mut ctx),
            Err(InventoryError::ItemNotFoundAtPosition { .. })
        ));
    }
}
