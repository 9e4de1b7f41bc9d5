//! AddDrawer command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{require_name, Execute, Operation};
use crate::types::{ComponentSpec, DrawerSpec, Tags};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Add a drawer to a container, at an explicit cell or the first free one
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddDrawer {
    pub container: String,
    pub name: String,
    pub row: Option<usize>,
    pub column: Option<usize>,
    #[serde(default)]
    pub tags: Tags,
    /// Components to place in the new drawer
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl AddDrawer {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            row: None,
            column: None,
            tags: Tags::new(),
            components: Vec::new(),
        }
    }

    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    pub fn with_position(mut self, row: Option<usize>, column: Option<usize>) -> Self {
        self.row = row;
        self.column = column;
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_component(mut self, component: ComponentSpec) -> Self {
        self.components.push(component);
        self
    }
}

impl Operation for AddDrawer {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "drawer"
    }
}

impl Execute for AddDrawer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let mut spec = DrawerSpec::new(require_name("name", &self.name)?).with_tags(self.tags.clone());
        spec.row = self.row;
        spec.column = self.column;
        for component in &self.components {
            let mut component = component.clone();
            component.name = require_name("component name", &component.name)?;
            component.kind = ctx.config().check_component_type(&component.kind)?;
            spec.components.push(component);
        }

        let mut container = ctx.get_container(&self.container)?.clone();
        let name = container.add_drawer(spec)?.name().to_string();
        let container = ctx.replace(&self.container, container)?;
        let drawer = container.get_drawer_by_name(&name)?;
        Ok(serde_json::to_value(drawer.to_snapshot())?)
    }
}
