//! The three levels of the hierarchy and the tag view shared by all of them.

use super::tags::Tags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Container,
    Drawer,
    Component,
}

impl ItemKind {
    /// Lowercase noun used in messages and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Container => "container",
            ItemKind::Drawer => "drawer",
            ItemKind::Component => "component",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "container" => Ok(ItemKind::Container),
            "drawer" => Ok(ItemKind::Drawer),
            "component" => Ok(ItemKind::Component),
            other => Err(format!("unknown item kind: {other}")),
        }
    }
}

/// Anything search and sort can look at.
pub trait Tagged {
    /// Which level of the hierarchy this item lives on
    fn kind(&self) -> ItemKind;

    /// Item name, unique among its siblings
    fn item_name(&self) -> &str;

    /// Full tag mapping, derived keys included
    fn tags(&self) -> &Tags;
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn kind(&self) -> ItemKind {
        (**self).kind()
    }

    fn item_name(&self) -> &str {
        (**self).item_name()
    }

    fn tags(&self) -> &Tags {
        (**self).tags()
    }
}
