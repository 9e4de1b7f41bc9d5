//! FindItems command: tag search across the whole inventory.

use crate::context::InventoryContext;
use crate::error::Result;
use crate::operation::{Execute, Operation};
use crate::search::{SearchMode, SearchQuery, SearchResult};
use crate::sort::{sort_items, sort_results};
use crate::types::{Container, ItemKind, Tagged, Tags};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// An item together with where it lives
#[derive(Clone, Copy)]
pub struct Located<'a> {
    pub container: &'a str,
    pub drawer: Option<&'a str>,
    pub item: &'a dyn Tagged,
}

impl Located<'_> {
    /// Slash-separated path from the container down to the item
    pub fn path(&self) -> String {
        match (self.item.kind(), self.drawer) {
            (ItemKind::Container, _) => self.container.to_string(),
            (ItemKind::Drawer, _) | (ItemKind::Component, None) => {
                format!("{}/{}", self.container, self.item.item_name())
            }
            (ItemKind::Component, Some(drawer)) => {
                format!("{}/{}/{}", self.container, drawer, self.item.item_name())
            }
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "kind": self.item.kind(),
            "name": self.item.item_name(),
            "container": self.container,
            "drawer": self.drawer,
            "path": self.path(),
            "tags": self.item.tags(),
        })
    }
}

impl Tagged for Located<'_> {
    fn kind(&self) -> ItemKind {
        self.item.kind()
    }

    fn item_name(&self) -> &str {
        self.item.item_name()
    }

    fn tags(&self) -> &Tags {
        self.item.tags()
    }
}

/// Every item of `scope` inside `containers`, in storage order
pub fn collect_items<'a, I>(containers: I, scope: ItemKind) -> Vec<Located<'a>>
where
    I: IntoIterator<Item = &'a Container>,
{
    let mut items = Vec::new();
    for container in containers {
        match scope {
            ItemKind::Container => items.push(Located {
                container: container.name(),
                drawer: None,
                item: container,
            }),
            ItemKind::Drawer => items.extend(container.drawers().map(|drawer| Located {
                container: container.name(),
                drawer: None,
                item: drawer,
            })),
            ItemKind::Component => {
                for drawer in container.drawers() {
                    items.extend(drawer.components().map(|component| Located {
                        container: container.name(),
                        drawer: Some(drawer.name()),
                        item: component,
                    }));
                }
            }
        }
    }
    items
}

/// Search one level of the hierarchy by tags.
///
/// With no terms every item in scope is listed, optionally sorted by a tag.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FindItems {
    pub scope: ItemKind,
    /// Only look inside this container
    pub container: Option<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub mode: SearchMode,
    /// Tag key, or `accuracy` for the number of matched terms
    pub sort: Option<String>,
    #[serde(default)]
    pub reverse: bool,
}

impl FindItems {
    pub fn new(scope: ItemKind) -> Self {
        Self {
            scope,
            container: None,
            terms: Vec::new(),
            mode: SearchMode::Any,
            sort: None,
            reverse: false,
        }
    }

    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.terms.push(term.into());
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn sorted_by(mut self, key: impl Into<String>, reverse: bool) -> Self {
        self.sort = Some(key.into());
        self.reverse = reverse;
        self
    }
}

impl Operation for FindItems {
    fn verb(&self) -> &'static str {
        "find"
    }

    fn noun(&self) -> &'static str {
        self.scope.as_str()
    }

    fn is_mutation(&self) -> bool {
        false
    }
}

impl Execute for FindItems {
    fn execute(&self, ctx: &mut InventoryContext) -> Result<Value> {
        let query = SearchQuery::parse(self.mode, &self.terms)?;
        let containers: Vec<&Container> = match &self.container {
            Some(name) => vec![ctx.get_container(name)?],
            None => ctx.containers().iter().collect(),
        };
        let mut items = collect_items(containers, self.scope);

        let results: Vec<Value> = if query.is_empty() {
            if let Some(key) = &self.sort {
                sort_items(&mut items, key, self.reverse);
            }
            items.iter().map(Located::to_json).collect()
        } else {
            let mut found = query.search(&items);
            if let Some(key) = &self.sort {
                sort_results(&mut found, key, self.reverse);
            }
            found.iter().map(result_json).collect()
        };

        Ok(json!({
            "scope": self.scope,
            "mode": self.mode,
            "terms": self.terms,
            "count": results.len(),
            "results": results,
        }))
    }
}

fn result_json(result: &SearchResult<'_, Located<'_>>) -> Value {
    let mut value = result.item.to_json();
    value["matched"] = json!({
        "positionals": result.matched_positionals,
        "keywords": result.matched_keywords,
        "comparisons": result.matched_comparisons,
    });
    value["match_count"] = json!(result.match_count());
    value
}
