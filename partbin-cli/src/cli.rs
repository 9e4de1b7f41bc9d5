use clap::{Args, Parser, Subcommand, ValueEnum};
use partbin::{ItemKind, SearchMode};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Item level used by `find`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum Scope {
    Container,
    Drawer,
    Component,
}

impl From<Scope> for ItemKind {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Container => ItemKind::Container,
            Scope::Drawer => ItemKind::Drawer,
            Scope::Component => ItemKind::Component,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum ModeArg {
    #[default]
    Any,
    All,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Any => SearchMode::Any,
            ModeArg::All => SearchMode::All,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "partbin")]
#[command(version)]
#[command(about = "Inventory of component cabinets: containers, drawers and compartments")]
#[command(long_about = "
partbin keeps track of parts stored in cabinets. A container is a grid of
drawer cells, each drawer has numbered compartments, and each compartment
holds one component. Every item carries tags that can be searched and sorted.

Global arguments can be used with any command:
  --verbose     Show more detail in messages and logs
  --debug       Enable debug logging
  --quiet       Print errors only
  --format      Output format (table, json, yaml)
  --data-dir    Directory holding the container files
  --yes         Apply resizes that move or delete drawers without asking

Example usage:
  partbin create container cabinet 4 6
  partbin create drawer resistors cabinet --row 0 --column 0
  partbin create component 10k 100 resistor cabinet resistors --tag tolerance=1%
  partbin find component resistor count>=50 --sort count --reverse
  partbin update container cabinet --rows 3
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Directory holding the container files (overrides configuration)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Confirm resizes that relocate or delete drawers
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a container, drawer or component
    Create {
        #[command(subcommand)]
        item: CreateItem,
    },
    /// Show a container, drawer or component; without a name, list containers
    Get {
        #[command(subcommand)]
        item: GetItem,
    },
    /// Search items by tags
    #[command(long_about = "
Search one level of the hierarchy by tags. Terms are:

  text            matches any tag key or value equal to text
  key=value       exact tag value (digit strings compare as numbers)
  key=low-high    inclusive integer range
  key<v key<=v key>v key>=v
                  comparison, numeric when both sides are numbers

With --mode any an item matches when any term matches. With --mode all the
terms are grouped into text, key=value and comparison categories; a category
is satisfied when all its terms match, and an item matches when more than
half of the categories given are satisfied.

Without terms every item at that level is listed.
")]
    Find(FindArgs),
    /// Delete a container, drawer or component
    Delete {
        #[command(subcommand)]
        item: DeleteItem,
    },
    /// Empty a container or drawer, keeping its dimensions
    Clear {
        #[command(subcommand)]
        item: ClearItem,
    },
    /// Change a container, drawer or component
    Update {
        #[command(subcommand)]
        item: UpdateItem,
    },
}

#[derive(Subcommand, Debug)]
pub enum CreateItem {
    /// Create an empty container
    Container {
        name: String,
        rows: usize,
        columns: usize,
        /// Compartments per drawer (configured default when omitted)
        #[arg(long)]
        compartments: Option<usize>,
        /// Tag as key=value, repeatable
        #[arg(long = "tag", value_name = "KEY=VALUE")]
        tags: Vec<String>,
    },
    /// Add a drawer to a container
    Drawer {
        name: String,
        container: String,
        #[command(flatten)]
        position: PositionArgs,
        #[arg(long = "tag", value_name = "KEY=VALUE")]
        tags: Vec<String>,
    },
    /// Add a component to a drawer
    Component {
        name: String,
        count: u32,
        #[arg(value_name = "TYPE")]
        kind: String,
        container: String,
        drawer: String,
        /// Compartment index (lowest free one when omitted)
        #[arg(long)]
        compartment: Option<usize>,
        #[arg(long = "tag", value_name = "KEY=VALUE")]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GetItem {
    /// Show one container, or list all of them
    Container { name: Option<String> },
    /// Show a drawer by name or position
    Drawer {
        container: String,
        name: Option<String>,
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Show a component by name or compartment
    Component {
        container: String,
        drawer: String,
        name: Option<String>,
        #[arg(long)]
        compartment: Option<usize>,
    },
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Level of the hierarchy to search
    #[arg(value_enum)]
    pub scope: Scope,

    /// Search terms
    pub terms: Vec<String>,

    /// How terms combine
    #[arg(long, value_enum, default_value = "any")]
    pub mode: ModeArg,

    /// Tag to sort by, or `accuracy` for the number of matched terms
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub reverse: bool,

    /// Only search inside this container
    #[arg(long)]
    pub container: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DeleteItem {
    /// Delete a container
    Container {
        name: String,
        /// Delete even if it still holds drawers
        #[arg(long)]
        force: bool,
    },
    /// Delete a drawer by name, or whatever drawer sits at a position
    Drawer {
        container: String,
        name: Option<String>,
        #[command(flatten)]
        position: PositionArgs,
        /// Delete a named drawer even if it still holds components
        #[arg(long)]
        force: bool,
    },
    /// Delete a component by name or compartment
    Component {
        container: String,
        drawer: String,
        name: Option<String>,
        #[arg(long)]
        compartment: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClearItem {
    /// Delete every drawer in a container
    Container { name: String },
    /// Delete every component in a drawer
    Drawer { container: String, name: String },
}

#[derive(Subcommand, Debug)]
pub enum UpdateItem {
    /// Rename, resize or retag a container
    Container {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        rows: Option<usize>,
        #[arg(long)]
        columns: Option<usize>,
        #[arg(long)]
        compartments: Option<usize>,
        #[command(flatten)]
        tags: TagArgs,
    },
    /// Rename, move or retag a drawer
    Drawer {
        container: String,
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[command(flatten)]
        position: PositionArgs,
        /// Move to the first free cell
        #[arg(long, conflicts_with_all = ["row", "column"])]
        free_spot: bool,
        /// Replace a drawer already at the target cell
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        tags: TagArgs,
    },
    /// Change a component
    Component {
        container: String,
        drawer: String,
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        count: Option<u32>,
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Move to another compartment
        #[arg(long)]
        compartment: Option<usize>,
        /// Replace a component already in the target compartment
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        tags: TagArgs,
    },
}

/// Explicit drawer cell; both or neither
#[derive(Args, Debug, Default)]
pub struct PositionArgs {
    #[arg(long, requires = "column")]
    pub row: Option<usize>,
    #[arg(long, requires = "row")]
    pub column: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct TagArgs {
    /// Set a tag as key=value, repeatable
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
    /// Remove a tag, repeatable
    #[arg(long = "untag", value_name = "KEY")]
    pub remove: Vec<String>,
}
