//! GetComponent command

use super::ComponentSelector;
use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Snapshot of one component, looked up by name or compartment
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetComponent {
    pub container: String,
    pub drawer: String,
    pub name: Option<String>,
    pub compartment: Option<usize>,
}

impl GetComponent {
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

impl Operation for GetComponent {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn noun(&self) -> &'static str {
        "component"
    }

    fn is_mutation(&self) -> bool {
        false
    }
}

impl Execute for GetComponent {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let selector = ComponentSelector::from_parts(self.name.as_deref(), self.compartment)?;
        let drawer = ctx
            .get_container(&self.container)?
            .get_drawer_by_name(&self.drawer)?;
        let component = selector.resolve(drawer)?;
        Ok(serde_json::to_value(component.to_snapshot())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::test_support::{cabinet, setup};

    #[test]
    fn test_get_component() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let by_name = GetComponent::new("cabinet", "top", "R1")
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(by_name["type"], "resistor");
        assert_eq!(by_name["count"], 10);

        let by_index = GetComponent::at("cabinet", "top", 0)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(by_index, by_name);
    }

    #[test]
    fn test_get_component_missing() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        assert!(matches!(
            GetComponent::new("cabinet", "top", "C1").execute(&mut ctx),
            Err(InventoryError::ItemNotFound { .. })
        ));
        assert!(matches!(
            GetComponent::at("cabinet", "top", 2).execute(&mut ctx),
            Err(InventoryError::ItemNotFoundAtPosition { .. })
        ));
    }
}
