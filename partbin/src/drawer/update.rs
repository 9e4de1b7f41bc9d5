//! UpdateDrawer command

use crate::context::InventoryContext;
use crate::error::{InventoryError, Result};
use crate::operation::{require_name, Execute, Operation};
use crate::types::Tags;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Rename, move or retag a drawer.
///
/// A move goes to an explicit cell (`row` and `column`) or to the first free
/// cell (`free_spot`). Moving onto an occupied cell needs `force`, and the
/// drawer already there is deleted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateDrawer {
    pub container: String,
    pub name: String,
    pub rename: Option<String>,
    pub row: Option<usize>,
    pub column: Option<usize>,
    #[serde(default)]
    pub free_spot: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub set_tags: Tags,
    #[serde(default)]
    pub remove_tags: Vec<String>,
}

impl UpdateDrawer {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    pub fn move_to(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    pub fn move_to_free_spot(mut self) -> Self {
        self.free_spot = true;
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

impl Operation for UpdateDrawer {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "drawer"
    }
}

impl Execute for UpdateDrawer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let mut container = ctx.get_container(&self.container)?.clone();
        let mut name = self.name.clone();

        if let Some(new_name) = &self.rename {
            let new_name = require_name("rename", new_name)?;
            container.rename_drawer(&name, &new_name)?;
            name = new_name;
        }

        let displaced = match (self.free_spot, self.row, self.column) {
            (true, None, None) => {
                container.move_drawer_to_a_free_spot(&name)?;
                None
            }
            (true, _, _) => {
                return Err(InventoryError::InvalidPosition {
                    message: "an explicit position and the free spot option are mutually exclusive"
                        .into(),
                })
            }
            (false, Some(row), Some(column)) => {
                container.move_drawer_to(&name, row, column, self.force)?
            }
            (false, None, None) => None,
            (false, _, _) => {
                return Err(InventoryError::InvalidPosition {
                    message: "both row and column are required to move a drawer".into(),
                })
            }
        };
        if let Some(lost) = &displaced {
            info!(container = %self.container, drawer = %lost.name(), "drawer deleted by forced move");
        }

        {
            let drawer = container.get_drawer_by_name_mut(&name)?;
            for key in &self.remove_tags {
                drawer.remove_tag(key);
            }
            for (key, value) in &self.set_tags {
                drawer.set_tag(key.clone(), value.clone());
            }
        }
        container.refresh_tags();

        let container = ctx.replace(&self.container, container)?;
        let drawer = container.get_drawer_by_name(&name)?;
        Ok(json!({
            "drawer": drawer.to_snapshot(),
            "displaced": displaced.map(|d| d.to_snapshot()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cabinet, setup};
    use serde_json::json;

    #[test]
    fn test_rename_and_tag_drawer() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = UpdateDrawer::new("cabinet", "top")
            .with_rename("upper")
            .with_tag("label", json!("resistors"))
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["drawer"]["name"], "upper");
        assert_eq!(result["drawer"]["tags"]["label"], "resistors");
        assert!(result["displaced"].is_null());

        let container = ctx.get_container("cabinet").unwrap();
        assert!(container.contains_drawer("upper"));
        assert!(!container.contains_drawer("top"));
    }

    #[test]
    fn test_rename_to_sibling_fails() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);
        let result = UpdateDrawer::new("cabinet", "top")
            .with_rename("bottom")
            .execute(&mut ctx);
        assert!(matches!(result, Err(InventoryError::DuplicateName { .. })));
    }

    #[test]
    fn test_move_drawer() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = UpdateDrawer::new("cabinet", "top")
            .move_to(1, 1)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["drawer"]["row"], 1);
        assert_eq!(result["drawer"]["column"], 1);
        assert_eq!(result["drawer"]["tags"]["row"], 1);

        let stored = ctx.store().load("cabinet").unwrap();
        let top = stored.drawers.iter().find(|d| d.name == "top").unwrap();
        assert_eq!((top.row, top.column), (1, 1));
    }

    #[test]
    fn test_move_onto_occupied_cell() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        assert!(matches!(
            UpdateDrawer::new("cabinet", "top").move_to(1, 0).execute(&mut ctx),
            Err(InventoryError::SpaceOccupied { .. })
        ));

        let result = UpdateDrawer::new("cabinet", "top")
            .move_to(1, 0)
            .forced(true)
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["displaced"]["name"], "bottom");
        let container = ctx.get_container("cabinet").unwrap();
        assert_eq!(container.drawer_count(), 1);
        assert!(!container.contains_drawer("bottom"));
    }

    #[test]
    fn test_move_to_free_spot() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);

        let result = UpdateDrawer::new("cabinet", "bottom")
            .move_to_free_spot()
            .execute(&mut ctx)
            .unwrap();
        assert_eq!(result["drawer"]["row"], 0);
        assert_eq!(result["drawer"]["column"], 1);
    }

    #[test]
    fn test_move_out_of_range() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);
        assert!(matches!(
            UpdateDrawer::new("cabinet", "top").move_to(5, 0).execute(&mut ctx),
            Err(InventoryError::NoFreeSpaces { .. })
        ));
    }

    #[test]
    fn test_conflicting_move_options() {
        let (_temp, mut ctx) = setup();
        cabinet(&mut ctx);
        let mut update = UpdateDrawer::new("cabinet", "top").move_to_free_spot();
        update.row = Some(1);
        assert!(matches!(
            update.execute(&mut ctx),
            Err(InventoryError::InvalidPosition { .. })
        ));
    }
}
