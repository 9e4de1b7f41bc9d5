//! Console messages for completed commands.
//!
//! How much is said depends on an explicit [`Verbosity`] passed in by the
//! caller rather than on any global switch.

use partbin::{ItemKind, ResizePlan};
use std::fmt::Display;

/// How chatty success messages are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    #[default]
    Normal,
    /// Include positions and other detail
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// "'R1' component was added to 'top'", with the position when verbose
pub fn added(
    verbosity: Verbosity,
    kind: ItemKind,
    name: &str,
    relation: &str,
    position: impl Display,
) -> String {
    match verbosity {
        Verbosity::Verbose => {
            format!("'{name}' {kind} was added to '{relation}' at position {position}")
        }
        _ => format!("'{name}' {kind} was added to '{relation}'"),
    }
}

pub fn removed(kind: ItemKind, name: &str, relation: &str) -> String {
    format!("'{name}' {kind} was removed from '{relation}'")
}

pub fn updated(kind: ItemKind, name: &str, relation: &str) -> String {
    format!("'{name}' {kind} was updated in '{relation}'")
}

pub fn cleared(kind: ItemKind, name: &str, removed: u64) -> String {
    let children = match kind {
        ItemKind::Container => "drawers",
        _ => "components",
    };
    format!("'{name}' {kind} was cleared ({removed} {children} removed)")
}

/// Lines describing what a resize will do to existing drawers
pub fn describe_plan(plan: &ResizePlan) -> Vec<String> {
    let mut lines = vec![format!(
        "Resizing to {} rows x {} columns:",
        plan.rows, plan.columns
    )];
    for relocation in &plan.relocations {
        lines.push(format!(
            "  '{}' drawer moves from {} to {}",
            relocation.drawer, relocation.from, relocation.to
        ));
    }
    for eviction in &plan.evictions {
        lines.push(format!(
            "  '{}' drawer at {} will be deleted with {} components",
            eviction.drawer, eviction.from, eviction.components
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use partbin::{Container, DrawerSpec};

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn test_added_message() {
        assert_eq!(
            added(Verbosity::Normal, ItemKind::Drawer, "top", "cabinet", "[0,1]"),
            "'top' drawer was added to 'cabinet'"
        );
        assert_eq!(
            added(Verbosity::Verbose, ItemKind::Drawer, "top", "cabinet", "[0,1]"),
            "'top' drawer was added to 'cabinet' at position [0,1]"
        );
    }

    #[test]
    fn test_describe_plan() {
        let mut container = Container::new("cab", 2, 2, 1).unwrap();
        for name in ["A", "B", "C"] {
            container.add_drawer(DrawerSpec::new(name)).unwrap();
        }
        let plan = container.plan_resize_rows(1).unwrap();
        let lines = describe_plan(&plan);
        assert_eq!(lines[0], "Resizing to 1 rows x 2 columns:");
        assert_eq!(
            lines[1],
            "  'C' drawer at [1,0] will be deleted with 0 components"
        );
    }
}
