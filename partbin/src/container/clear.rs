//! ClearContainer command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete every drawer in a container, keeping its dimensions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClearContainer {
    pub name: String,
}

impl ClearContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Operation for ClearContainer {
    fn verb(&self) -> &'static str {
        "clear"
    }

    fn noun(&self) -> &'static str {
        "container"
    }
}

impl Execute for ClearContainer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let mut container = ctx.get_container(&self.name)?.clone();
        let removed = container.clear_container();
        ctx.replace(&self.name, container)?;
        Ok(json!({
            "cleared": true,
            "name": self.name,
            "removed_drawers": removed,
        }))
    }
}
