//! GetContainer command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Full snapshot of one container
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetContainer {
    pub name: String,
}

impl GetContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Operation for GetContainer {
    fn verb(&self) -> &'static str {
        "get"
    }

    fn noun(&self) -> &'static str {
        "container"
    }

    fn is_mutation(&self) -> bool {
        false
    }
}

impl Execute for GetContainer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let container = ctx.get_container(&self.name)?;
        Ok(serde_json::to_value(container.to_snapshot())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;
    use crate::test_support::{cabinet, setup};

    #[test]
    fn test_get_container() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = GetContainer::new("cabinet").execute(&mut ctx).unwrap();
        assert_eq!(result["name"], "cabinet");
        assert_eq!(result["drawers"].as_array().unwrap().len(), 2);
        assert_eq!(result["drawers"][0]["components"][0]["type"], "resistor");
    }

    #[test]
    fn test_get_missing_container() {
        let (_temp, mut ctx) = setup();
        let result = GetContainer::new("nope").execute(&mut ctx);
        assert!(matches!(result, Err(InventoryError::ContainerNotFound { .. })));
    }
}
