//! ListContainers command

use super::summary;
use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Summaries of every container, sorted by name
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListContainers;

impl ListContainers {
    pub fn new() -> Self {
        Self
    }
}

impl Operation for ListContainers {
    fn verb(&self) -> &'static str {
        "list"
    }

    fn noun(&self) -> &'static str {
        "containers"
    }

    fn is_mutation(&self) -> bool {
        false
    }
}

impl Execute for ListContainers {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let containers: Vec<Value> = ctx.containers().iter().map(summary).collect();
        Ok(json!({
            "count": containers.len(),
            "containers": containers,
        }))
    }
}
