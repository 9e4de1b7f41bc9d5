//! Tag search over any [`Tagged`] item.
//!
//! A query holds three kinds of predicates:
//!
//! - positional: a bare string matching any tag key or displayed tag value
//! - keyword: `key=value`, an exact pair (digit strings compare as integers)
//! - comparison: `key<v`, `key>v`, `key<=v`, `key>=v`, or the inclusive
//!   integer range `key=a-b`
//!
//! In [`SearchMode::Any`] an item matches when any predicate matches. In
//! [`SearchMode::All`] only the categories the query supplies are counted;
//! a category is satisfied when every predicate in it matched, and the item
//! matches when more than half of the supplied categories are satisfied.

use crate::error::{InventoryError, Result};
use crate::types::tags::{display_value, normalize_value, numeric_value, values_match};
use crate::types::{Tagged, Tags};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How predicate matches combine into an item match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Any,
    All,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Any => f.write_str("any"),
            SearchMode::All => f.write_str("all"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(SearchMode::Any),
            "all" => Ok(SearchMode::All),
            other => Err(InventoryError::invalid_value(
                "mode",
                format!("'{other}' (expected any or all)"),
            )),
        }
    }
}

/// Test applied to one tag value
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Less(Value),
    LessOrEqual(Value),
    Greater(Value),
    GreaterOrEqual(Value),
    /// Inclusive integer range
    Between { low: i64, high: i64 },
}

/// A comparison predicate such as `count>=10` or `count=1-5`
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub key: String,
    pub condition: Condition,
    expression: String,
}

impl Comparison {
    /// Parse a comparison expression. Plain `key=value` is a keyword, not a
    /// comparison, and is rejected here.
    pub fn parse(expression: &str) -> Result<Self> {
        match Term::parse(expression)? {
            Term::Comparison(comparison) => Ok(comparison),
            _ => Err(InventoryError::invalid_tag(
                expression,
                "not a comparison (expected <, >, <=, >= or a range a-b)",
            )),
        }
    }

    /// The expression as written
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// True if `tags` has the key and its value satisfies the condition
    pub fn matches(&self, tags: &Tags) -> bool {
        let Some(actual) = tags.get(&self.key) else {
            return false;
        };
        match &self.condition {
            Condition::Between { low, high } => numeric_value(actual)
                .is_some_and(|n| n >= *low as f64 && n <= *high as f64),
            Condition::Less(expected) => {
                compare(actual, expected).is_some_and(|o| o == Ordering::Less)
            }
            Condition::LessOrEqual(expected) => {
                compare(actual, expected).is_some_and(|o| o != Ordering::Greater)
            }
            Condition::Greater(expected) => {
                compare(actual, expected).is_some_and(|o| o == Ordering::Greater)
            }
            Condition::GreaterOrEqual(expected) => {
                compare(actual, expected).is_some_and(|o| o != Ordering::Less)
            }
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Numeric when both sides are numbers, textual when neither is.
/// Mixed values do not compare.
fn compare(actual: &Value, expected: &Value) -> Option<Ordering> {
    match (numeric_value(actual), numeric_value(expected)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        (None, None) => Some(display_value(actual).cmp(&display_value(expected))),
        _ => None,
    }
}

/// One parsed query term
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Positional(String),
    Keyword(String, Value),
    Comparison(Comparison),
}

const OPERATORS: [&str; 5] = ["<=", ">=", "<", ">", "="];

impl Term {
    /// Classify a raw query string by its first operator.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let Some(index) = raw.find(['<', '>', '=']) else {
            return Ok(Term::Positional(raw.to_string()));
        };

        let rest = &raw[index..];
        let operator = OPERATORS
            .into_iter()
            .find(|op| rest.starts_with(op))
            .unwrap_or("=");
        let key = raw[..index].trim();
        let value = rest[operator.len()..].trim();
        if key.is_empty() {
            return Err(InventoryError::invalid_tag(raw, "missing tag key"));
        }
        if value.is_empty() {
            return Err(InventoryError::invalid_tag(raw, "missing tag value"));
        }

        let condition = match operator {
            "=" => match parse_range(raw, value)? {
                Some((low, high)) => Condition::Between { low, high },
                None => return Ok(Term::Keyword(key.to_string(), normalize_value(value))),
            },
            "<" => Condition::Less(normalize_value(value)),
            "<=" => Condition::LessOrEqual(normalize_value(value)),
            ">" => Condition::Greater(normalize_value(value)),
            _ => Condition::GreaterOrEqual(normalize_value(value)),
        };
        Ok(Term::Comparison(Comparison {
            key: key.to_string(),
            condition,
            expression: raw.to_string(),
        }))
    }
}

/// `a-b` with integer bounds, either of which may be negative; anything else
/// is not a range.
fn parse_range(raw: &str, value: &str) -> Result<Option<(i64, i64)>> {
    // the separator is the first '-' that is not a leading sign
    let Some((split, _)) = value.char_indices().skip(1).find(|&(_, c)| c == '-') else {
        return Ok(None);
    };
    let (low, high) = (&value[..split], &value[split + 1..]);
    let (Ok(low), Ok(high)) = (low.trim().parse::<i64>(), high.trim().parse::<i64>()) else {
        return Ok(None);
    };
    if low > high {
        return Err(InventoryError::invalid_tag(
            raw,
            format!("range start {low} is greater than end {high}"),
        ));
    }
    Ok(Some((low, high)))
}

/// A parsed search query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub positionals: Vec<String>,
    pub keywords: BTreeMap<String, Value>,
    pub comparisons: Vec<Comparison>,
}

impl SearchQuery {
    /// Create an empty query
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Build a query from raw terms as typed on the command line
    pub fn parse<I, S>(mode: SearchMode, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut query = Self::new(mode);
        for term in terms {
            query.push(Term::parse(term.as_ref())?);
        }
        Ok(query)
    }

    /// Add a parsed term. Repeated positionals are kept once.
    pub fn push(&mut self, term: Term) {
        match term {
            Term::Positional(text) => {
                if !self.positionals.contains(&text) {
                    self.positionals.push(text);
                }
            }
            Term::Keyword(key, value) => {
                self.keywords.insert(key, value);
            }
            Term::Comparison(comparison) => self.comparisons.push(comparison),
        }
    }

    pub fn with_positional(mut self, text: impl Into<String>) -> Self {
        self.push(Term::Positional(text.into()));
        self
    }

    /// Add a keyword pair; string values go through the same digit
    /// normalization as parsed terms.
    pub fn with_keyword(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = match value.into() {
            Value::String(s) => normalize_value(&s),
            other => other,
        };
        self.push(Term::Keyword(key.into(), value));
        self
    }

    pub fn with_comparison(mut self, expression: &str) -> Result<Self> {
        self.push(Term::Comparison(Comparison::parse(expression)?));
        Ok(self)
    }

    /// Total number of predicates
    pub fn term_count(&self) -> usize {
        self.positionals.len() + self.keywords.len() + self.comparisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }

    /// Evaluate one item; `None` if it does not match
    pub fn evaluate<'a, T: Tagged>(&self, item: &'a T) -> Option<SearchResult<'a, T>> {
        let tags = item.tags();

        let matched_positionals: Vec<String> = self
            .positionals
            .iter()
            .filter(|text| {
                tags.iter()
                    .any(|(key, value)| key == *text || display_value(value) == **text)
            })
            .cloned()
            .collect();

        let matched_keywords: BTreeMap<String, Value> = self
            .keywords
            .iter()
            .filter(|(key, expected)| {
                tags.get(*key)
                    .is_some_and(|actual| values_match(actual, expected))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let matched_comparisons: Vec<String> = self
            .comparisons
            .iter()
            .filter(|comparison| comparison.matches(tags))
            .map(|comparison| comparison.expression().to_string())
            .collect();

        let result = SearchResult {
            item,
            matched_positionals,
            matched_keywords,
            matched_comparisons,
        };
        self.accepts(&result).then_some(result)
    }

    /// Matching items, in input order
    pub fn search<'a, T, I>(&self, items: I) -> Vec<SearchResult<'a, T>>
    where
        T: Tagged + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .filter_map(|item| self.evaluate(item))
            .collect()
    }

    fn accepts<T>(&self, result: &SearchResult<'_, T>) -> bool {
        match self.mode {
            SearchMode::Any => result.match_count() > 0,
            SearchMode::All => {
                let categories = [
                    (self.positionals.len(), result.matched_positionals.len()),
                    (self.keywords.len(), result.matched_keywords.len()),
                    (self.comparisons.len(), result.matched_comparisons.len()),
                ];
                let supplied = categories.iter().filter(|(n, _)| *n > 0).count();
                let satisfied = categories
                    .iter()
                    .filter(|(n, matched)| *n > 0 && n == matched)
                    .count();
                supplied > 0 && satisfied * 2 > supplied
            }
        }
    }
}

/// One matching item and the predicates it satisfied
#[derive(Debug)]
pub struct SearchResult<'a, T> {
    pub item: &'a T,
    pub matched_positionals: Vec<String>,
    pub matched_keywords: BTreeMap<String, Value>,
    pub matched_comparisons: Vec<String>,
}

impl<T> SearchResult<'_, T> {
    /// Number of predicates matched, used for accuracy sorting
    pub fn match_count(&self) -> usize {
        self.matched_positionals.len()
            + self.matched_keywords.len()
            + self.matched_comparisons.len()
    }
}

impl<T> Clone for SearchResult<'_, T> {
    fn clone(&self) -> Self {
        Self {
            item: self.item,
            matched_positionals: self.matched_positionals.clone(),
            matched_keywords: self.matched_keywords.clone(),
            matched_comparisons: self.matched_comparisons.clone(),
        }
    }
}
