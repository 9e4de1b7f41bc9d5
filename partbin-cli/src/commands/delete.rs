use partbin::component::DeleteComponent;
use partbin::container::DeleteContainer;
use partbin::drawer::DeleteDrawer;
use partbin::{InventoryContext, ItemKind};

use super::execute;
use crate::cli::DeleteItem;
use crate::display::Output;
use crate::error::CliResult;
use crate::messages::removed;

pub fn handle(item: &DeleteItem, ctx: &mut InventoryContext, output: &Output) -> CliResult<()> {
    let (value, message) = match item {
        DeleteItem::Container { name, force } => {
            let value = execute(&DeleteContainer::new(name).forced(*force), ctx)?;
            (value, removed(ItemKind::Container, name, "inventory"))
        }
        DeleteItem::Drawer {
            container,
            name,
            position,
            force,
        } => {
            let op = DeleteDrawer {
                container: container.clone(),
                name: name.clone(),
                row: position.row,
                column: position.column,
                force: *force,
            };
            let value = execute(&op, ctx)?;
            let drawer = value["name"].as_str().unwrap_or_default().to_string();
            (value, removed(ItemKind::Drawer, &drawer, container))
        }
        DeleteItem::Component {
            container,
            drawer,
            name,
            compartment,
        } => {
            let op = DeleteComponent {
                container: container.clone(),
                drawer: drawer.clone(),
                name: name.clone(),
                compartment: *compartment,
            };
            let value = execute(&op, ctx)?;
            let component = value["name"].as_str().unwrap_or_default().to_string();
            (value, removed(ItemKind::Component, &component, drawer))
        }
    };
    output.done(&message, &value)?;
    Ok(())
}
