use partbin::find::FindItems;
use partbin::InventoryContext;

use super::execute;
use crate::cli::FindArgs;
use crate::display::{Output, View};
use crate::error::CliResult;

pub fn handle(args: &FindArgs, ctx: &mut InventoryContext, output: &Output) -> CliResult<()> {
    let mut op = FindItems::new(args.scope.into()).with_mode(args.mode.into());
    op.terms = args.terms.clone();
    if let Some(container) = &args.container {
        op = op.in_container(container);
    }
    if let Some(key) = &args.sort {
        op = op.sorted_by(key, args.reverse);
    }

    let value = execute(&op, ctx)?;
    tracing::info!(count = %value["count"], "search finished");
    output.show(View::FindResults, &value)?;
    Ok(())
}
