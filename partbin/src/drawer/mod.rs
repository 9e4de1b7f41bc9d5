//! Drawer commands

mod add;
mod clear;
mod delete;
mod get;
mod update;

pub use add::AddDrawer;
pub use clear::ClearDrawer;
pub use delete::DeleteDrawer;
pub use get::GetDrawer;
pub use update::UpdateDrawer;

use crate::error::{InventoryError, Result};
use crate::types::{Container, Drawer, Position};

/// How a command picks out a drawer inside its container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerSelector {
    Name(String),
    Position(Position),
}

impl DrawerSelector {
    /// Build a selector from optional command arguments. A name wins when
    /// given; otherwise both coordinates are required.
    pub fn from_parts(
        name: Option<&str>,
        row: Option<usize>,
        column: Option<usize>,
    ) -> Result<Self> {
        match (name, row, column) {
            (Some(name), _, _) => Ok(Self::Name(name.to_string())),
            (None, Some(row), Some(column)) => Ok(Self::Position(Position::new(row, column))),
            (None, None, None) => Err(InventoryError::missing_field("drawer name or position")),
            (None, _, _) => Err(InventoryError::InvalidPosition {
                message: "both row and column are required to select a drawer".into(),
            }),
        }
    }

    pub(crate) fn resolve<'a>(&self, container: &'a Container) -> Result<&'a Drawer> {
        match self {
            Self::Name(name) => container.get_drawer_by_name(name),
            Self::Position(p) => container.get_drawer_at_pos(p.row, p.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_from_parts() {
        assert_eq!(
            DrawerSelector::from_parts(Some("top"), Some(1), None).unwrap(),
            DrawerSelector::Name("top".into())
        );
        assert_eq!(
            DrawerSelector::from_parts(None, Some(1), Some(2)).unwrap(),
            DrawerSelector::Position(Position::new(1, 2))
        );
        assert!(matches!(
            DrawerSelector::from_parts(None, None, None),
            Err(InventoryError::MissingField { .. })
        ));
        assert!(matches!(
            DrawerSelector::from_parts(None, None, Some(2)),
            Err(InventoryError::InvalidPosition { .. })
        ));
    }
}
