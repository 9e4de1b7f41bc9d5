use partbin::component::AddComponent;
use partbin::container::CreateContainer;
use partbin::drawer::AddDrawer;
use partbin::{InventoryContext, ItemKind};

use super::{execute, parse_tags};
use crate::cli::CreateItem;
use crate::display::Output;
use crate::error::CliResult;
use crate::messages::added;

pub fn handle(item: &CreateItem, ctx: &mut InventoryContext, output: &Output) -> CliResult<()> {
    match item {
        CreateItem::Container {
            name,
            rows,
            columns,
            compartments,
            tags,
        } => {
            let mut op = CreateContainer::new(name, *rows, *columns).with_tags(parse_tags(tags)?);
            if let Some(compartments) = compartments {
                op = op.with_compartments(*compartments);
            }
            let value = execute(&op, ctx)?;
            let message = added(
                output.verbosity(),
                ItemKind::Container,
                name,
                "inventory",
                format!("{rows} x {columns}"),
            );
            output.done(&message, &value)?;
        }
        CreateItem::Drawer {
            name,
            container,
            position,
            tags,
        } => {
            let op = AddDrawer::new(container, name)
                .with_position(position.row, position.column)
                .with_tags(parse_tags(tags)?);
            let value = execute(&op, ctx)?;
            let message = added(
                output.verbosity(),
                ItemKind::Drawer,
                name,
                container,
                format!("[{},{}]", value["row"], value["column"]),
            );
            output.done(&message, &value)?;
        }
        CreateItem::Component {
            name,
            count,
            kind,
            container,
            drawer,
            compartment,
            tags,
        } => {
            let mut op = AddComponent::new(container, drawer, name, kind, *count)
                .with_tags(parse_tags(tags)?);
            if let Some(compartment) = compartment {
                op = op.with_compartment(*compartment);
            }
            let value = execute(&op, ctx)?;
            let message = added(
                output.verbosity(),
                ItemKind::Component,
                name,
                drawer,
                format!("compartment {}", value["compartment"]),
            );
            output.done(&message, &value)?;
        }
    }
    Ok(())
}
