//! Command handlers. Each maps parsed arguments onto library operations and
//! renders what they return.

pub mod clear;
pub mod create;
pub mod delete;
pub mod find;
pub mod get;
pub mod update;

use is_terminal::IsTerminal;
use partbin::types::tags::parse_assignment;
use partbin::{
    auto_confirm, process, ConfirmHook, Execute, InventoryConfig, InventoryContext, ResizePlan,
    Tags,
};
use serde_json::Value;

use crate::cli::{Cli, Commands};
use crate::display::Output;
use crate::error::CliResult;
use crate::messages::{describe_plan, Verbosity};

/// Run the parsed command line to completion
pub fn run(cli: &Cli) -> CliResult<()> {
    let output = Output::new(cli.format, Verbosity::from_flags(cli.verbose, cli.quiet));
    let mut ctx = open_context(cli)?;

    match &cli.command {
        Commands::Create { item } => create::handle(item, &mut ctx, &output),
        Commands::Get { item } => get::handle(item, &mut ctx, &output),
        Commands::Find(args) => find::handle(args, &mut ctx, &output),
        Commands::Delete { item } => delete::handle(item, &mut ctx, &output),
        Commands::Clear { item } => clear::handle(item, &mut ctx, &output),
        Commands::Update { item } => update::handle(item, &mut ctx, &output),
    }
}

fn open_context(cli: &Cli) -> CliResult<InventoryContext> {
    let mut config = InventoryConfig::load()?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "opening inventory");
    let ctx = InventoryContext::open(config)?;
    Ok(ctx.with_confirmation(confirmation_hook(
        cli.yes,
        std::io::stdin().is_terminal(),
    )))
}

/// How resizes that move or delete drawers get approved.
///
/// `--yes` approves everything without a word. Without a terminal to ask on,
/// the plan is printed to stderr and applied. Otherwise the user is asked.
pub fn confirmation_hook(assume_yes: bool, interactive: bool) -> ConfirmHook {
    if assume_yes {
        return Box::new(auto_confirm);
    }
    if !interactive {
        return Box::new(|plan: &ResizePlan| {
            for line in describe_plan(plan) {
                eprintln!("{line}");
            }
            true
        });
    }
    Box::new(|plan: &ResizePlan| {
        for line in describe_plan(plan) {
            eprintln!("{line}");
        }
        dialoguer::Confirm::new()
            .with_prompt("Apply this resize?")
            .default(false)
            .interact()
            .unwrap_or(false)
    })
}

/// Run one library operation
pub(crate) fn execute<O: Execute>(op: &O, ctx: &mut InventoryContext) -> CliResult<Value> {
    Ok(process(op, ctx)?)
}

/// Parse repeated `key=value` arguments
pub(crate) fn parse_tags(raw: &[String]) -> CliResult<Tags> {
    let mut tags = Tags::new();
    for assignment in raw {
        let (key, value) = parse_assignment(assignment)?;
        tags.insert(key, value);
    }
    Ok(tags)
}
