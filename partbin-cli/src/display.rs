//! Rendering command results in the selected output format.
//!
//! Every command produces a JSON value. JSON and YAML print that value as is;
//! table output picks a layout per view.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use partbin::types::tags::{display_value, keys};
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::messages::Verbosity;

/// Which table layout a result gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ContainerList,
    Container,
    Drawer,
    Component,
    FindResults,
}

/// Where command output and messages go, per the global flags
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    verbosity: Verbosity,
}

impl Output {
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self { format, verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Result of a mutation: a message in table mode, the data otherwise
    pub fn done(&self, message: &str, value: &Value) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                if self.verbosity != Verbosity::Quiet {
                    println!("{message}");
                }
                Ok(())
            }
            _ => print_data(self.format, value),
        }
    }

    /// Result of a query; always printed, even when quiet
    pub fn show(&self, view: View, value: &Value) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                println!("{}", render_table(view, value));
                Ok(())
            }
            _ => print_data(self.format, value),
        }
    }

    /// Notice on stderr, unless quiet
    pub fn notice(&self, text: &str) {
        if self.verbosity != Verbosity::Quiet {
            eprintln!("{text}");
        }
    }
}

fn print_data(format: OutputFormat, value: &Value) -> Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(value)?),
        _ => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Tags that are not recomputed by the engine
const DERIVED: &[&str] = &[
    keys::NAME,
    keys::TYPE,
    keys::COUNT,
    keys::COMPARTMENT,
    keys::ROW,
    keys::COLUMN,
    keys::ROWS,
    keys::COLUMNS,
    keys::COMPARTMENTS,
    keys::CHILDREN,
    keys::HAS_FREE_SPACE,
    keys::UPDATED_AT,
];

fn user_tags(value: &Value) -> String {
    let Some(tags) = value.get("tags").and_then(Value::as_object) else {
        return String::new();
    };
    tags.iter()
        .filter(|(key, _)| !DERIVED.contains(&key.as_str()))
        .map(|(key, value)| format!("{key}={}", display_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(v) => display_value(v),
    }
}

fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Table text for one view of a command result
pub fn render_table(view: View, value: &Value) -> String {
    match view {
        View::ContainerList => container_list(value),
        View::Container => container(value),
        View::Drawer => drawer(value),
        View::Component => component(value),
        View::FindResults => find_results(value),
    }
}

fn container_list(value: &Value) -> String {
    let containers = list(value, "containers");
    if containers.is_empty() {
        return "No containers".to_string();
    }
    let mut table = new_table(vec![
        "Name",
        "Rows",
        "Columns",
        "Compartments",
        "Drawers",
        "Components",
        "Free space",
    ]);
    for c in containers {
        table.add_row(vec![
            text(c, "name"),
            text(c, "rows"),
            text(c, "columns"),
            text(c, "compartments"),
            text(c, "drawers"),
            text(c, "components"),
            text(c, "has_free_space"),
        ]);
    }
    format!("Containers: {}\n{table}", containers.len())
}

fn container(value: &Value) -> String {
    let heading = format!(
        "{} ({} x {}, {} compartments per drawer)",
        text(value, "name"),
        text(value, "total_rows"),
        text(value, "max_drawers_per_row"),
        text(value, "compartments_per_drawer"),
    );
    let drawers = list(value, "drawers");
    if drawers.is_empty() {
        return format!("{heading}\nNo drawers");
    }
    let mut table = new_table(vec!["Position", "Drawer", "Components", "Tags"]);
    for d in drawers {
        table.add_row(vec![
            format!("[{},{}]", text(d, "row"), text(d, "column")),
            text(d, "name"),
            list(d, "components").len().to_string(),
            user_tags(d),
        ]);
    }
    format!("{heading}\n{table}")
}

fn drawer(value: &Value) -> String {
    let heading = format!(
        "{} at [{},{}]",
        text(value, "name"),
        text(value, "row"),
        text(value, "column")
    );
    let components = list(value, "components");
    if components.is_empty() {
        return format!("{heading}\nNo components");
    }
    let mut table = new_table(vec!["Compartment", "Name", "Type", "Count", "Tags"]);
    for c in components {
        table.add_row(vec![
            text(c, "compartment"),
            text(c, "name"),
            text(c, "type"),
            text(c, "count"),
            user_tags(c),
        ]);
    }
    format!("{heading}\n{table}")
}

fn component(value: &Value) -> String {
    let mut table = new_table(vec!["Tag", "Value"]);
    let empty = Map::new();
    let tags = value
        .get("tags")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    for (key, tag) in tags {
        table.add_row(vec![key.clone(), display_value(tag)]);
    }
    format!(
        "{} ({} x{}, compartment {})\n{table}",
        text(value, "name"),
        text(value, "type"),
        text(value, "count"),
        text(value, "compartment"),
    )
}

fn find_results(value: &Value) -> String {
    let results = list(value, "results");
    if results.is_empty() {
        return "No matches".to_string();
    }
    let scored = results.iter().any(|r| r.get("match_count").is_some());
    let mut header = vec!["Path", "Details", "Tags"];
    if scored {
        header.push("Matched");
    }
    let mut table = new_table(header);
    for r in results {
        let mut row = vec![text(r, "path"), details(r), user_tags(r)];
        if scored {
            row.push(text(r, "match_count"));
        }
        table.add_row(row);
    }
    format!("Matches: {}\n{table}", results.len())
}

/// Short summary of an item from its derived tags
fn details(result: &Value) -> String {
    let tags = result.get("tags").cloned().unwrap_or(Value::Null);
    match result.get("kind").and_then(Value::as_str) {
        Some("component") => format!(
            "{} x{}, compartment {}",
            text(&tags, keys::TYPE),
            text(&tags, keys::COUNT),
            text(&tags, keys::COMPARTMENT)
        ),
        Some("drawer") => format!(
            "[{},{}], {} components",
            text(&tags, keys::ROW),
            text(&tags, keys::COLUMN),
            text(&tags, keys::CHILDREN)
        ),
        _ => format!(
            "{} x {}, {} drawers",
            text(&tags, keys::ROWS),
            text(&tags, keys::COLUMNS),
            text(&tags, keys::CHILDREN)
        ),
    }
}
