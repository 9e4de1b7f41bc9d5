//! UpdateContainer command

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{require_name, Execute, Operation};
use crate::types::{ResizeOutcome, ResizePlan, Tags};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Rename, resize or retag a container.
///
/// Changes are made on a copy and stored together. A resize that would move
/// or delete drawers asks the context's confirmation hook first; declining
/// aborts the whole update.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateContainer {
    pub name: String,
    pub rename: Option<String>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub compartments: Option<usize>,
    #[serde(default)]
    pub set_tags: Tags,
    #[serde(default)]
    pub remove_tags: Vec<String>,
}

impl UpdateContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_compartments(mut self, compartments: usize) -> Self {
        self.compartments = Some(compartments);
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

impl Operation for UpdateContainer {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "container"
    }
}

impl Execute for UpdateContainer {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let mut container = ctx.get_container(&self.name)?.clone();
        let mut resizes: Vec<ResizePlan> = Vec::new();

        let steps = [
            (self.rows, Axis::Rows),
            (self.columns, Axis::Columns),
        ];
        for (target, axis) in steps {
            let Some(target) = target else {
                continue;
            };
            let confirm = |plan: &ResizePlan| ctx.confirm_resize(plan);
            let outcome = match axis {
                Axis::Rows => container.resize_rows(target, confirm)?,
                Axis::Columns => container.resize_columns(target, confirm)?,
            };
            if let ResizeOutcome::Aborted(plan) = outcome {
                info!(container = %self.name, "update aborted at resize confirmation");
                return Ok(json!({
                    "name": self.name,
                    "aborted": true,
                    "resize": plan,
                }));
            }
            resizes.push(outcome.into_plan());
        }

        if let Some(compartments) = self.compartments {
            container.resize_compartments(compartments)?;
        }
        for key in &self.remove_tags {
            container.remove_tag(key);
        }
        for (key, value) in &self.set_tags {
            container.set_tag(key.clone(), value.clone());
        }
        if let Some(new_name) = &self.rename {
            container.set_name(require_name("rename", new_name)?);
        }

        let container = ctx.replace(&self.name, container)?;
        Ok(json!({
            "aborted": false,
            "container": container.to_snapshot(),
            "resizes": resizes,
        }))
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}
