//! DeleteContainer command

use crate::context::InventoryContext;
use crate::error::{InventoryError, Result};
use crate::operation::{Execute, Operation};
use crate::types::ItemKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a container (fails if it holds drawers, unless forced)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteContainer {
    pub name: String,
    #[serde(default)]
    pub force: bool,
}

impl DeleteContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force: false,
        }
    }

    pub fn forced(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl Operation for DeleteContainer {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "container"
    }
}

impl Execute for DeleteContainer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let container = ctx.get_container(&self.name)?;
        let drawers = container.drawer_count();
        if drawers > 0 && !self.force {
            return Err(InventoryError::ItemIsNotEmpty {
                kind: ItemKind::Container,
                name: self.name.clone(),
                count: drawers,
            });
        }

        let removed = ctx.remove(&self.name)?;
        Ok(json!({
            "deleted": true,
            "name": removed.name(),
            "drawers": drawers,
            "components": removed.get_all_components().len(),
        }))
    }
}
