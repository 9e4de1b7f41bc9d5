//! Ordering of search results and raw items.

use crate::search::SearchResult;
use crate::types::tags::{display_value, numeric_value};
use crate::types::{Tagged, Tags};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort key that orders by match count instead of a tag
pub const ACCURACY: &str = "accuracy";

/// Sort strategy selected by a single key string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sorter {
    /// Number of matched predicates
    Accuracy,
    /// Value of the named tag
    Tag(String),
}

impl Sorter {
    pub fn from_key(key: &str) -> Self {
        if key == ACCURACY {
            Sorter::Accuracy
        } else {
            Sorter::Tag(key.to_string())
        }
    }
}

/// Comparable reading of a tag value.
///
/// Variant order is the sort order: numbers, then text, then items that
/// lack the tag.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

impl SortKey {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => SortKey::Missing,
            Some(value) => match numeric_value(value) {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(display_value(value)),
            },
        }
    }

    pub fn of(tags: &Tags, key: &str) -> Self {
        Self::from_value(tags.get(key))
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Text(_) => 1,
            SortKey::Missing => 2,
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sort search results in place. Stable: equal keys keep input order.
pub fn sort_results<T: Tagged>(results: &mut [SearchResult<'_, T>], key: &str, reverse: bool) {
    match Sorter::from_key(key) {
        Sorter::Accuracy => results.sort_by(|a, b| {
            directed(a.match_count().cmp(&b.match_count()), reverse)
        }),
        Sorter::Tag(tag) => results.sort_by(|a, b| {
            directed(
                SortKey::of(a.item.tags(), &tag).cmp(&SortKey::of(b.item.tags(), &tag)),
                reverse,
            )
        }),
    }
}

/// Sort raw items in place. Accuracy has nothing to measure here, so it
/// keeps the input order.
pub fn sort_items<T: Tagged>(items: &mut [T], key: &str, reverse: bool) {
    if let Sorter::Tag(tag) = Sorter::from_key(key) {
        items.sort_by(|a, b| {
            directed(
                SortKey::of(a.tags(), &tag).cmp(&SortKey::of(b.tags(), &tag)),
                reverse,
            )
        });
    }
}

fn directed(ordering: Ordering, reverse: bool) -> Ordering {
    if reverse {
        ordering.reverse()
    } else {
        ordering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchMode, SearchQuery};
    use crate::types::{Component, ComponentSpec, Drawer, Position};
    use serde_json::json;

    fn drawer(specs: Vec<ComponentSpec>) -> Drawer {
        let mut drawer = Drawer::new("bin", Position::new(0, 0), specs.len());
        for spec in specs {
            drawer.add_component(spec).unwrap();
        }
        drawer
    }

    fn names(items: &[&Component]) -> Vec<String> {
        items.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_sort_key_order() {
        let mut keys = vec![
            SortKey::Missing,
            SortKey::Text("b".into()),
            SortKey::Number(10.0),
            SortKey::Text("a".into()),
            SortKey::Number(2.0),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SortKey::Number(2.0),
                SortKey::Number(10.0),
                SortKey::Text("a".into()),
                SortKey::Text("b".into()),
                SortKey::Missing,
            ]
        );
    }

    #[test]
    fn test_digit_strings_sort_numerically() {
        assert!(SortKey::from_value(Some(&json!("9"))) < SortKey::from_value(Some(&json!("10"))));
        assert_eq!(SortKey::from_value(Some(&json!(null))), SortKey::Missing);
    }

    #[test]
    fn test_sort_items_by_tag() {
        let drawer = drawer(vec![
            ComponentSpec::new("a", "other").with_tag("ohms", "4700"),
            ComponentSpec::new("b", "other"),
            ComponentSpec::new("c", "other").with_tag("ohms", 100),
            ComponentSpec::new("d", "other").with_tag("ohms", "n/a"),
        ]);
        let mut items: Vec<&Component> = drawer.components().collect();

        sort_items(&mut items, "ohms", false);
        assert_eq!(names(&items), vec!["c", "a", "d", "b"]);

        sort_items(&mut items, "ohms", true);
        assert_eq!(names(&items), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_name_is_idempotent() {
        let drawer = drawer(vec![
            ComponentSpec::new("delta", "other"),
            ComponentSpec::new("alpha", "other"),
            ComponentSpec::new("charlie", "other"),
        ]);
        let mut items: Vec<&Component> = drawer.components().collect();
        sort_items(&mut items, "name", false);
        let once = names(&items);
        sort_items(&mut items, "name", false);
        assert_eq!(names(&items), once);
        assert_eq!(once, vec!["alpha", "charlie", "delta"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let drawer = drawer(vec![
            ComponentSpec::new("first", "resistor"),
            ComponentSpec::new("second", "capacitor"),
            ComponentSpec::new("third", "resistor"),
        ]);
        let mut items: Vec<&Component> = drawer.components().collect();
        sort_items(&mut items, "type", false);
        assert_eq!(names(&items), vec!["second", "first", "third"]);
    }

    #[test]
    fn test_accuracy_key_is_exact() {
        assert!(matches!(Sorter::from_key("accuracy"), Sorter::Accuracy));
        assert!(matches!(Sorter::from_key("Accuracy"), Sorter::Tag(key) if key == "Accuracy"));

        let drawer = drawer(vec![
            ComponentSpec::new("low", "other").with_tag("Accuracy", 5),
            ComponentSpec::new("high", "other").with_tag("Accuracy", 1),
        ]);
        let mut items: Vec<&Component> = drawer.components().collect();
        sort_items(&mut items, "Accuracy", false);
        assert_eq!(names(&items), vec!["high", "low"]);
    }

    #[test]
    fn test_accuracy_on_items_keeps_order() {
        let drawer = drawer(vec![
            ComponentSpec::new("z", "other"),
            ComponentSpec::new("a", "other"),
        ]);
        let mut items: Vec<&Component> = drawer.components().collect();
        sort_items(&mut items, "accuracy", true);
        assert_eq!(names(&items), vec!["z", "a"]);
    }

    #[test]
    fn test_sort_results_by_accuracy() {
        let drawer = drawer(vec![
            ComponentSpec::new("R1", "resistor"),
            ComponentSpec::new("R2", "resistor").with_tag("smd", true),
        ]);
        let query = SearchQuery::parse(SearchMode::Any, ["resistor", "smd"]).unwrap();
        let mut results = query.search(drawer.components());

        sort_results(&mut results, ACCURACY, false);
        let order: Vec<_> = results.iter().map(|r| r.item.name()).collect();
        assert_eq!(order, vec!["R1", "R2"]);

        sort_results(&mut results, ACCURACY, true);
        let order: Vec<_> = results.iter().map(|r| r.item.name()).collect();
        assert_eq!(order, vec!["R2", "R1"]);
    }
}
