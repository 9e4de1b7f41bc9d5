//! Component commands

mod add;
mod delete;
mod get;
mod update;

pub use add::AddComponent;
pub use delete::DeleteComponent;
pub use get::GetComponent;
pub use update::UpdateComponent;

use crate::error::{InventoryError, Result};
use crate::types::{Component, Drawer};

/// How a command picks out a component inside its drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentSelector {
    Name(String),
    Compartment(usize),
}

impl ComponentSelector {
    /// A name wins over a compartment when both are given
    pub fn from_parts(name: Option<&str>, compartment: Option<usize>) -> Result<Self> {
        match (name, compartment) {
            (Some(name), _) => Ok(Self::Name(name.to_string())),
            (None, Some(index)) => Ok(Self::Compartment(index)),
            (None, None) => Err(InventoryError::missing_field("component name or compartment")),
        }
    }

    pub(crate) fn resolve<'a>(&self, drawer: &'a Drawer) -> Result<&'a Component> {
        match self {
            Self::Name(name) => drawer.get_component_by_name(name),
            Self::Compartment(index) => drawer.get_component_at(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_from_parts() {
        assert_eq!(
            ComponentSelector::from_parts(Some("R1"), Some(2)).unwrap(),
            ComponentSelector::Name("R1".into())
        );
        assert_eq!(
            ComponentSelector::from_parts(None, Some(2)).unwrap(),
            ComponentSelector::Compartment(2)
        );
        assert!(matches!(
            ComponentSelector::from_parts(None, None),
            Err(InventoryError::MissingField { .. })
        ));
    }
}
