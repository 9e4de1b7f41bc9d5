use partbin::container::ClearContainer;
use partbin::drawer::ClearDrawer;
use partbin::{InventoryContext, ItemKind};

use super::execute;
use crate::cli::ClearItem;
use crate::display::Output;
use crate::error::CliResult;
use crate::messages::cleared;

pub fn handle(item: &ClearItem, ctx: &mut InventoryContext, output: &Output) -> CliResult<()> {
    let (value, message) = match item {
        ClearItem::Container { name } => {
            let value = execute(&ClearContainer::new(name), ctx)?;
            let count = value["removed_drawers"].as_u64().unwrap_or_default();
            (value, cleared(ItemKind::Container, name, count))
        }
        ClearItem::Drawer { container, name } => {
            let value = execute(&ClearDrawer::new(container, name), ctx)?;
            let count = value["removed_components"].as_u64().unwrap_or_default();
            (value, cleared(ItemKind::Drawer, name, count))
        }
    };
    output.done(&message, &value)?;
    Ok(())
}
