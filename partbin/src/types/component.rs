//! Leaf inventory items.

use super::item::{ItemKind, Tagged};
use super::snapshot::ComponentRecord;
use super::tags::{keys, timestamp, Tags};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named, typed, countable item living in one drawer compartment.
///
/// The compartment is owned by the drawer: only [`Drawer`](super::Drawer)
/// moves a component, so the stored index always matches its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    count: u32,
    kind: String,
    compartment: usize,
    tags: Tags,
}

/// Everything needed to create a component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub count: u32,
    /// Explicit compartment; the lowest free one when absent
    #[serde(default)]
    pub compartment: Option<usize>,
    #[serde(default)]
    pub tags: Tags,
}

impl ComponentSpec {
    /// Create a spec with a zero count and automatic placement
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Set the count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Request a specific compartment
    pub fn with_compartment(mut self, compartment: usize) -> Self {
        self.compartment = Some(compartment);
        self
    }

    /// Add a user tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Replace the user tags
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

impl Component {
    pub(crate) fn from_spec(spec: ComponentSpec, compartment: usize) -> Self {
        let mut component = Self {
            name: spec.name,
            count: spec.count,
            kind: spec.kind,
            compartment,
            tags: spec.tags,
        };
        component.refresh_tags();
        component
    }

    /// Rebuild from a stored record, keeping its tags verbatim
    pub(crate) fn from_record(record: ComponentRecord) -> Self {
        Self {
            name: record.name,
            count: record.count,
            kind: record.kind,
            compartment: record.compartment,
            tags: record.tags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Component type, e.g. `resistor`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn compartment(&self) -> usize {
        self.compartment
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count;
        self.refresh_tags();
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
        self.refresh_tags();
    }

    /// Set a user tag. Derived keys are recomputed right after, so setting
    /// one of them has no lasting effect.
    pub fn set_tag(&mut self, key: impl Into<String>, value: Value) {
        self.tags.insert(key.into(), value);
        self.refresh_tags();
    }

    /// Remove a user tag, returning its value
    pub fn remove_tag(&mut self, key: &str) -> Option<Value> {
        let removed = self.tags.remove(key);
        self.refresh_tags();
        removed
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.refresh_tags();
    }

    pub(crate) fn set_compartment(&mut self, compartment: usize) {
        self.compartment = compartment;
        self.refresh_tags();
    }

    /// Recompute derived tags
    pub fn refresh_tags(&mut self) {
        self.tags
            .insert(keys::NAME.into(), Value::String(self.name.clone()));
        self.tags
            .insert(keys::TYPE.into(), Value::String(self.kind.clone()));
        self.tags.insert(keys::COUNT.into(), Value::from(self.count));
        self.tags
            .insert(keys::COMPARTMENT.into(), Value::from(self.compartment));
        self.tags.insert(keys::UPDATED_AT.into(), timestamp());
    }

    /// Persisted form
    pub fn to_snapshot(&self) -> ComponentRecord {
        ComponentRecord {
            name: self.name.clone(),
            count: self.count,
            kind: self.kind.clone(),
            compartment: self.compartment,
            tags: self.tags.clone(),
        }
    }
}

impl Tagged for Component {
    fn kind(&self) -> ItemKind {
        ItemKind::Component
    }

    fn item_name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}
