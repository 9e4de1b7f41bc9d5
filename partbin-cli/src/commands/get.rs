use partbin::component::GetComponent;
use partbin::container::{GetContainer, ListContainers};
use partbin::drawer::GetDrawer;
use partbin::InventoryContext;

use super::execute;
use crate::cli::GetItem;
use crate::display::{Output, View};
use crate::error::CliResult;

pub fn handle(item: &GetItem, ctx: &mut InventoryContext, output: &Output) -> CliResult<()> {
    let (view, value) = match item {
        GetItem::Container { name: None } => {
            (View::ContainerList, execute(&ListContainers::new(), ctx)?)
        }
        GetItem::Container { name: Some(name) } => {
            (View::Container, execute(&GetContainer::new(name), ctx)?)
        }
        GetItem::Drawer {
            container,
            name,
            position,
        } => {
            let op = GetDrawer {
                container: container.clone(),
                name: name.clone(),
                row: position.row,
                column: position.column,
            };
            (View::Drawer, execute(&op, ctx)?)
        }
        GetItem::Component {
            container,
            drawer,
            name,
            compartment,
        } => {
            let op = GetComponent {
                container: container.clone(),
                drawer: drawer.clone(),
                name: name.clone(),
                compartment: *compartment,
            };
            (View::Component, execute(&op, ctx)?)
        }
    };
    output.show(view, &value)?;
    Ok(())
}
