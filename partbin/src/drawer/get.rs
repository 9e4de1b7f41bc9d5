//! GetDrawer command

use super::DrawerSelector;
use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of one drawer, looked up by name or by cell
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetDrawer {
    pub container: String,
    pub name: Option<String>,
    pub row: Option<usize>,
    pub column: Option<usize>,
}

impl GetDrawer {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: Some(name.into()),
            row: None,
            column: None,
        }
    }

    pub fn at(container: impl Into<String>, row: usize, column: usize) -> Self {
        Self {
            container: container.into(),
            name: None,
            row: Some(row),
            column: Some(column),
        }
    }
}

impl Operation for GetDrawer {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn noun(&self) -> &'static str {
        "drawer"
    }

    fn is_mutation(&self) -> bool {
        false
    }
}

impl Execute for GetDrawer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let selector = DrawerSelector::from_parts(self.name.as_deref(), self.row, self.column)?;
        let container = ctx.get_container(&self.container)?;
        let drawer = selector.resolve(container)?;
        Ok(serde_json::to_value(drawer.to_snapshot())?)
    }
}
