//! DeleteComponent command

use super::ComponentSelector;
use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Remove a component from its drawer, by name or by compartment
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteComponent {
    pub container: String,
    pub drawer: String,
    pub name: Option<String>,
    pub compartment: Option<usize>,
}

impl DeleteComponent {
    pub fn new(
        container: impl Into<String>,
        drawer: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            drawer: drawer.into(),
            name: Some(name.into()),
            compartment: None,
        }
    }

    pub fn at(container: impl Into<String>, drawer: impl Into<String>, compartment: usize) -> Self {
        Self {
            container: container.into(),
            drawer: drawer.into(),
            name: None,
            compartment: Some(compartment),
        }
    }
}

impl Operation for DeleteComponent {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "component"
    }
}

impl Execute for DeleteComponent {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let selector = ComponentSelector::from_parts(self.name.as_deref(), self.compartment)?;
        let mut container = ctx.get_container(&self.container)?.clone();
        let drawer = container.get_drawer_by_name_mut(&self.drawer)?;
        let removed = match &selector {
            ComponentSelector::Name(name) => drawer.remove_component_by_name(name)?,
            ComponentSelector::Compartment(index) => drawer.remove_component_by_index(*index)?,
        };
        container.refresh_tags();
        ctx.replace(&self.container, container)?;
        Ok(json!({
            "deleted": true,
            "container": self.container,
            "drawer": self.drawer,
            "name": removed.name(),
            "compartment": removed.compartment(),
            "count": removed.count(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::test_support::{cabinet, setup};

    #[test]
    fn test_delete_component_by_name() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = DeleteComponent::new("cabinet", "top", "R1")
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["name"], "R1");
        assert_eq!(result["count"], 10);

        let stored = ctx.store().load("cabinet").unwrap();
        assert!(stored.drawers[0].components.is_empty());
    }

    #[test]
    fn test_delete_component_by_compartment() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = DeleteComponent::at("cabinet", "bottom", 0)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["name"], "C1");

        assert!(matches!(
            DeleteComponent::at("cabinet", "bottom", 0).execute(&mut ctx),
            Err(InventoryError::ItemNotFoundAtPosition { .. })
        ));
        assert!(matches!(
            DeleteComponent::at("cabinet", "bottom", 99).execute(&mut ctx),
            Err(InventoryError::ItemNotFoundAtPosition { .. })
        ));
    }
}
