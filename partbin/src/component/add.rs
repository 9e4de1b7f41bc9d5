//! AddComponent command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{require_name, Execute, Operation};
use crate::types::{ComponentSpec, Tags};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Add a component to a drawer.
///
/// The type must be one of the configured component types; it is stored
/// with the configured spelling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddComponent {
    pub container: String,
    pub drawer: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub compartment: Option<usize>,
    #[serde(default)]
    pub tags: Tags,
}

impl AddComponent {
    pub fn new(
        container: impl Into<String>,
        drawer: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            container: container.into(),
            drawer: drawer.into(),
            name: name.into(),
            kind: kind.into(),
            count,
            compartment: None,
            tags: Tags::new(),
        }
    }

    pub fn with_compartment(mut self, compartment: usize) -> Self {
        self.compartment = Some(compartment);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

impl Operation for AddComponent {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "component"
    }
}

impl Execute for AddComponent {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let kind = ctx.config().check_component_type(&self.kind)?;
        let mut spec = ComponentSpec::new(require_name("name", &self.name)?, kind)
            .with_count(self.count)
            .with_tags(self.tags.clone());
        spec.compartment = self.compartment;

        let mut container = ctx.get_container(&self.container)?.clone();
        let name = container
            .get_drawer_by_name_mut(&self.drawer)?
            .add_component(spec)?
            .name()
            .to_string();
        container.refresh_tags();

        let container = ctx.replace(&self.container, container)?;
        let component = container
            .get_drawer_by_name(&self.drawer)?
            .get_component_by_name(&name)?;
        Ok(serde_json::to_value(component.to_snapshot())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::test_support::{cabinet, setup};

    #[test]
    fn test_add_component_lowest_free_compartment() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = AddComponent::new("cabinet", "top", "R2", "RESISTOR", 25)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["compartment"], 1);
        assert_eq!(result["type"], "resistor");
        assert_eq!(result["count"], 25);
        assert_eq!(result["tags"]["count"], 25);

        let stored = ctx.store().load("cabinet").unwrap();
        assert_eq!(stored.drawers[0].components.len(), 2);
    }

    #[test]
    fn test_add_component_explicit_compartment() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = AddComponent::new("cabinet", "top", "R2", "resistor", 1)
            .with_compartment(2)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["compartment"], 2);

        assert!(matches!(
            AddComponent::new("cabinet", "top", "R3", "resistor", 1)
                .with_compartment(0)
                .execute(&mut ctx),
            Err(InventoryError::SpaceOccupied { .. })
        ));
    }

    #[test]
    fn test_add_component_errors() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        assert!(matches!(
            AddComponent::new("cabinet", "top", "R1", "resistor", 1).execute(&mut ctx),
            Err(InventoryError::DuplicateName { .. })
        ));
        assert!(matches!(
            AddComponent::new("cabinet", "top", "Z1", "gizmo", 1).execute(&mut ctx),
            Err(InventoryError::InvalidComponentType { .. })
        ));
        assert!(matches!(
            AddComponent::new("cabinet", "nope", "Z1", "ic", 1).execute(&mut ctx),
            Err(InventoryError::ItemNotFound { .. })
        ));
        assert!(matches!(
            AddComponent::new("garage", "top", "Z1", "ic", 1).execute(&mut ctx),
            Err(InventoryError::ContainerNotFound { .. })
        ));
    }

    #[test]
    fn test_add_component_full_drawer() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);
        for name in ["R2", "R3"] {
            AddComponent::new("cabinet", "top", name, "resistor", 1)
                .execute(&mut ctx)
                .unwrap();
        }
        assert!(matches!(
            AddComponent::new("cabinet", "top", "R4", "resistor", 1).execute(&mut ctx),
            Err(InventoryError::NoFreeSpaces { .. })
        ));
    }
}
