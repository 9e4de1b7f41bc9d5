//! CreateContainer command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{require_name, Execute, Operation};
use crate::types::{Container, Tags};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create a new, empty container
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateContainer {
    /// Container name, unique across the inventory
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Compartments per drawer; the configured default when absent
    pub compartments: Option<usize>,
    #[serde(default)]
    pub tags: Tags,
}

impl CreateContainer {
    pub fn new(name: impl Into<String>, rows: usize, columns: usize) -> Self {
        Self {
            name: name.into(),
            rows,
            columns,
            compartments: None,
            tags: Tags::new(),
        }
    }

    pub fn with_compartments(mut self, compartments: usize) -> Self {
        self.compartments = Some(compartments);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

impl Operation for CreateContainer {
    fn verb(&self) -> &'static str {
        "create"
    }

    fn noun(&self) -> &'static str {
        "container"
    }
}

impl Execute for CreateContainer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let name = require_name("name", &self.name)?;
        let compartments = self
            .compartments
            .unwrap_or(ctx.config().default_compartments);

        let mut container = Container::new(name, self.rows, self.columns, compartments)?;
        for (key, value) in &self.tags {
            container.set_tag(key.clone(), value.clone());
        }

        let container = ctx.insert(container)?;
        Ok(serde_json::to_value(container.to_snapshot())?)
    }
}
