//! Persisted shape of a container and everything inside it.
//!
//! Records are plain data. Structural validation happens when a record is
//! turned back into a [`Container`](super::Container).

use super::tags::Tags;
use serde::{Deserialize, Serialize};

/// One container file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub name: String,
    pub total_rows: usize,
    pub max_drawers_per_row: usize,
    pub compartments_per_drawer: usize,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub drawers: Vec<DrawerRecord>,
}

/// A drawer inside a container record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerRecord {
    pub name: String,
    pub row: usize,
    pub column: usize,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

/// A component inside a drawer record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    #[serde(default)]
    pub count: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub compartment: usize,
    #[serde(default)]
    pub tags: Tags,
}

impl ContainerRecord {
    /// Total number of components across all drawers
    pub fn component_count(&self) -> usize {
        self.drawers.iter().map(|d| d.components.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_type_field_name() {
        let record = ComponentRecord {
            name: "R1".into(),
            count: 10,
            kind: "resistor".into(),
            compartment: 0,
            tags: Tags::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], json!("resistor"));
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let record: ContainerRecord = serde_json::from_value(json!({
            "name": "cab",
            "total_rows": 2,
            "max_drawers_per_row": 3,
            "compartments_per_drawer": 4,
            "drawers": [{"name": "d", "row": 0, "column": 1}]
        }))
        .unwrap();
        assert!(record.tags.is_empty());
        assert_eq!(record.drawers[0].components.len(), 0);
        assert_eq!(record.component_count(), 0);
    }
}
