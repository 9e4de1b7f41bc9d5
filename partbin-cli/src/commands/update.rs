use partbin::component::UpdateComponent;
use partbin::container::UpdateContainer;
use partbin::drawer::UpdateDrawer;
use partbin::{InventoryContext, ItemKind};
use serde_json::Value;

use super::{execute, parse_tags};
use crate::cli::{TagArgs, UpdateItem};
use crate::display::Output;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_FAILURE;
use crate::messages::updated;

pub fn handle(item: &UpdateItem, ctx: &mut InventoryContext, output: &Output) -> CliResult<()> {
    match item {
        UpdateItem::Container {
            name,
            rename,
            rows,
            columns,
            compartments,
            tags,
        } => {
            let mut op = UpdateContainer::new(name);
            op.rename = rename.clone();
            op.rows = *rows;
            op.columns = *columns;
            op.compartments = *compartments;
            let (set, remove) = tag_changes(tags)?;
            for (key, value) in set {
                op = op.with_tag(key, value);
            }
            for key in remove {
                op = op.without_tag(key);
            }

            let value = execute(&op, ctx)?;
            if value["aborted"].as_bool().unwrap_or(false) {
                return Err(CliError::new(
                    format!("resize of '{name}' was not confirmed; nothing changed (use --yes to apply)"),
                    EXIT_FAILURE,
                ));
            }
            let current = rename.as_deref().unwrap_or(name);
            output.done(&updated(ItemKind::Container, current, "inventory"), &value)?;
        }
        UpdateItem::Drawer {
            container,
            name,
            rename,
            position,
            free_spot,
            force,
            tags,
        } => {
            let mut op = UpdateDrawer::new(container, name).forced(*force);
            if let Some(rename) = rename {
                op = op.with_rename(rename);
            }
            if let (Some(row), Some(column)) = (position.row, position.column) {
                op = op.move_to(row, column);
            }
            if *free_spot {
                op = op.move_to_free_spot();
            }
            let (set, remove) = tag_changes(tags)?;
            for (key, value) in set {
                op = op.with_tag(key, value);
            }
            for key in remove {
                op = op.without_tag(key);
            }

            let value = execute(&op, ctx)?;
            report_displaced(output, &value["displaced"], ItemKind::Drawer);
            let current = value["drawer"]["name"].as_str().unwrap_or(name);
            output.done(&updated(ItemKind::Drawer, current, container), &value)?;
        }
        UpdateItem::Component {
            container,
            drawer,
            name,
            rename,
            count,
            kind,
            compartment,
            force,
            tags,
        } => {
            let mut op = UpdateComponent::new(container, drawer, name).forced(*force);
            if let Some(rename) = rename {
                op = op.with_rename(rename);
            }
            if let Some(count) = count {
                op = op.with_count(*count);
            }
            if let Some(kind) = kind {
                op = op.with_kind(kind);
            }
            if let Some(compartment) = compartment {
                op = op.move_to(*compartment);
            }
            let (set, remove) = tag_changes(tags)?;
            for (key, value) in set {
                op = op.with_tag(key, value);
            }
            for key in remove {
                op = op.without_tag(key);
            }

            let value = execute(&op, ctx)?;
            report_displaced(output, &value["displaced"], ItemKind::Component);
            let current = value["component"]["name"].as_str().unwrap_or(name);
            output.done(&updated(ItemKind::Component, current, drawer), &value)?;
        }
    }
    Ok(())
}

fn tag_changes(tags: &TagArgs) -> CliResult<(partbin::Tags, Vec<String>)> {
    Ok((parse_tags(&tags.set)?, tags.remove.clone()))
}

fn report_displaced(output: &Output, displaced: &Value, kind: ItemKind) {
    if let Some(name) = displaced.get("name").and_then(Value::as_str) {
        output.notice(&format!("'{name}' {kind} was replaced and deleted"));
    }
}
