//! UpdateComponent command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{require_name, Execute, Operation};
use crate::types::Tags;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Change a component in place: name, count, type, compartment or tags.
///
/// Moving onto an occupied compartment needs `force`, and the component
/// already there is deleted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateComponent {
    pub container: String,
    pub drawer: String,
    pub name: String,
    pub rename: Option<String>,
    pub count: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub compartment: Option<usize>,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub set_tags: Tags,
    #[serde(default)]
    pub remove_tags: Vec<String>,
}

impl UpdateComponent {
    pub fn new(
        container: impl Into<String>,
        drawer: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            drawer: drawer.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn move_to(mut self, compartment: usize) -> Self {
        self.compartment = Some(compartment);
        self
    }

    pub fn forced(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set_tags.insert(key.into(), value);
        self
    }

    pub fn without_tag(mut self, key: impl Into<String>) -> Self {
        self.remove_tags.push(key.into());
        self
    }
}

impl Operation for UpdateComponent {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "component"
    }
}

impl Execute for UpdateComponent {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let kind = self
            .kind
            .as_deref()
            .map(|kind| ctx.config().check_component_type(kind))
            .transpose()?;

        let mut container = ctx.get_container(&self.container)?.clone();
        let drawer = container.get_drawer_by_name_mut(&self.drawer)?;
        let mut name = self.name.clone();

        if let Some(new_name) = &self.rename {
            let new_name = require_name("rename", new_name)?;
            drawer.rename_component(&name, &new_name)?;
            name = new_name;
        }

        let displaced = match self.compartment {
            Some(compartment) => drawer.move_component_to(&name, compartment, self.force)?,
            None => None,
        };
        if let Some(lost) = &displaced {
            info!(drawer = %self.drawer, component = %lost.name(), "component deleted by forced move");
        }

        let component = drawer.get_component_by_name_mut(&name)?;
        if let Some(count) = self.count {
            component.set_count(count);
        }
        if let Some(kind) = kind {
            component.set_kind(kind);
        }
        for key in &self.remove_tags {
            component.remove_tag(key);
        }
        for (key, value) in &self.set_tags {
            component.set_tag(key.clone(), value.clone());
        }
        drawer.refresh_tags();
        container.refresh_tags();

        let container = ctx.replace(&self.container, container)?;
        let component = container
            .get_drawer_by_name(&self.drawer)?
            .get_component_by_name(&name)?;
        Ok(json!({
            "component": component.to_snapshot(),
            "displaced": displaced.map(|c| c.to_snapshot()),
        }))
    }
}
