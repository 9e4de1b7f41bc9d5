//! Drawers: a named grid cell holding components in numbered compartments.

use super::component::{Component, ComponentSpec};
use super::grid::SlotGrid;
use super::item::{ItemKind, Tagged};
use super::position::{Location, Position};
use super::snapshot::{ComponentRecord, DrawerRecord};
use super::tags::{keys, timestamp, Tags};
use crate::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A drawer and its compartments.
///
/// The stored position is written only by the owning container, which keeps
/// it equal to the drawer's cell in the container grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawer {
    name: String,
    position: Position,
    tags: Tags,
    compartments: SlotGrid<Component>,
}

/// Everything needed to create a drawer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawerSpec {
    pub name: String,
    #[serde(default)]
    pub row: Option<usize>,
    #[serde(default)]
    pub column: Option<usize>,
    #[serde(default)]
    pub tags: Tags,
    /// Components placed into the drawer before it joins the container
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
}

impl DrawerSpec {
    /// Create a spec with automatic placement
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Request an explicit cell
    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_component(mut self, component: ComponentSpec) -> Self {
        self.components.push(component);
        self
    }
}

impl Drawer {
    /// Create an empty drawer at `position`
    pub fn new(name: impl Into<String>, position: Position, compartments: usize) -> Self {
        Self::with_tags(name, position, compartments, Tags::new())
    }

    pub(crate) fn with_tags(
        name: impl Into<String>,
        position: Position,
        compartments: usize,
        tags: Tags,
    ) -> Self {
        let mut drawer = Self {
            name: name.into(),
            position,
            tags,
            compartments: SlotGrid::new(compartments),
        };
        drawer.refresh_tags();
        drawer
    }

    /// Rebuild from a stored record, keeping every tag verbatim
    pub(crate) fn from_record(record: DrawerRecord, compartments: usize) -> Result<Self> {
        let mut drawer = Self {
            name: record.name,
            position: Position::new(record.row, record.column),
            tags: record.tags,
            compartments: SlotGrid::new(compartments),
        };
        for component in record.components {
            drawer.restore_component(component)?;
        }
        Ok(drawer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Number of compartments, free or not
    pub fn compartment_count(&self) -> usize {
        self.compartments.capacity()
    }

    /// Live components in compartment order
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.compartments.live_items()
    }

    pub fn component_count(&self) -> usize {
        self.compartments.occupied_count()
    }

    pub fn has_free_space(&self) -> bool {
        self.compartments.has_free_slot()
    }

    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }

    /// Free compartment indices, ascending
    pub fn free_compartments(&self) -> impl Iterator<Item = usize> + '_ {
        self.compartments.free_indices()
    }

    pub fn contains_component(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Add a component, either to the requested compartment or to the
    /// lowest free one.
    pub fn add_component(&mut self, spec: ComponentSpec) -> Result<&Component> {
        if self.contains_component(&spec.name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Component,
                spec.name,
                &self.name,
            ));
        }

        let compartment = self.resolve_compartment(spec.compartment)?;
        debug!(drawer = %self.name, component = %spec.name, compartment, "adding component");
        self.compartments
            .place(compartment, Component::from_spec(spec, compartment))?;
        self.refresh_tags();
        self.get_component_at(compartment)
    }

    pub fn get_component_by_name(&self, name: &str) -> Result<&Component> {
        self.components()
            .find(|c| c.name() == name)
            .ok_or_else(|| InventoryError::not_found(ItemKind::Component, name, &self.name))
    }

    /// Mutable lookup. Callers changing the count, type or tags go through
    /// [`Component`]'s setters, which refresh its derived tags.
    pub fn get_component_by_name_mut(&mut self, name: &str) -> Result<&mut Component> {
        let index = self.require_index(name)?;
        let drawer = self.name.clone();
        self.compartments
            .get_mut(index)?
            .ok_or_else(|| {
                InventoryError::not_found_at(ItemKind::Component, drawer, Location::Compartment(index))
            })
    }

    pub fn get_component_at(&self, compartment: usize) -> Result<&Component> {
        self.compartments
            .get(compartment)
            .ok()
            .flatten()
            .ok_or_else(|| {
                InventoryError::not_found_at(
                    ItemKind::Component,
                    &self.name,
                    Location::Compartment(compartment),
                )
            })
    }

    pub fn remove_component_by_name(&mut self, name: &str) -> Result<Component> {
        let index = self.require_index(name)?;
        self.remove_component_by_index(index)
    }

    /// Remove whatever lives in `compartment`. A free or out-of-range
    /// compartment is reported as nothing found there.
    pub fn remove_component_by_index(&mut self, compartment: usize) -> Result<Component> {
        let removed = self.compartments.pop(compartment).ok().flatten();
        let component = removed.ok_or_else(|| {
            InventoryError::not_found_at(
                ItemKind::Component,
                &self.name,
                Location::Compartment(compartment),
            )
        })?;
        debug!(drawer = %self.name, component = %component.name(), compartment, "removed component");
        self.refresh_tags();
        Ok(component)
    }

    /// Move a component to another compartment. With `forced`, a live
    /// occupant is displaced and returned; it no longer belongs to the drawer.
    pub fn move_component_to(
        &mut self,
        name: &str,
        compartment: usize,
        forced: bool,
    ) -> Result<Option<Component>> {
        let from = self.require_index(name)?;
        if compartment >= self.compartments.capacity() {
            return Err(InventoryError::no_free_spaces(
                ItemKind::Component,
                &self.name,
            ));
        }
        if from == compartment {
            return Ok(None);
        }
        if !forced && !self.compartments.is_free(compartment)? {
            return Err(InventoryError::space_occupied(
                ItemKind::Component,
                &self.name,
                Location::Compartment(compartment),
            ));
        }

        let mut component = self.remove_component_by_index(from)?;
        component.set_compartment(compartment);
        let displaced = self.compartments.place(compartment, component)?;
        if let Some(lost) = &displaced {
            debug!(drawer = %self.name, component = %lost.name(), "displaced component");
        }
        self.refresh_tags();
        Ok(displaced)
    }

    /// Rename a component, keeping names unique inside the drawer
    pub fn rename_component(&mut self, name: &str, new_name: &str) -> Result<()> {
        if name == new_name {
            self.require_index(name)?;
            return Ok(());
        }
        if self.contains_component(new_name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Component,
                new_name,
                &self.name,
            ));
        }
        self.get_component_by_name_mut(name)?.set_name(new_name);
        self.refresh_tags();
        Ok(())
    }

    /// Discard every component. Not reversible.
    pub fn clear_drawer(&mut self) -> usize {
        let removed = self.component_count();
        self.compartments.clear();
        self.refresh_tags();
        removed
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: Value) {
        self.tags.insert(key.into(), value);
        self.refresh_tags();
    }

    pub fn remove_tag(&mut self, key: &str) -> Option<Value> {
        let removed = self.tags.remove(key);
        self.refresh_tags();
        removed
    }

    /// Recompute derived tags
    pub fn refresh_tags(&mut self) {
        let children = self.component_count();
        let has_free_space = self.has_free_space();
        self.tags
            .insert(keys::NAME.into(), Value::String(self.name.clone()));
        self.tags.insert(keys::ROW.into(), Value::from(self.position.row));
        self.tags
            .insert(keys::COLUMN.into(), Value::from(self.position.column));
        self.tags.insert(keys::CHILDREN.into(), Value::from(children));
        self.tags
            .insert(keys::HAS_FREE_SPACE.into(), Value::Bool(has_free_space));
        self.tags.insert(keys::UPDATED_AT.into(), timestamp());
    }

    /// Persisted form, components in compartment order
    pub fn to_snapshot(&self) -> DrawerRecord {
        DrawerRecord {
            name: self.name.clone(),
            row: self.position.row,
            column: self.position.column,
            tags: self.tags.clone(),
            components: self.components().map(Component::to_snapshot).collect(),
        }
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.refresh_tags();
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
        self.refresh_tags();
    }

    pub(crate) fn resize_compartments(&mut self, compartments: usize) {
        self.compartments.resize(compartments);
        self.refresh_tags();
    }

    fn restore_component(&mut self, record: ComponentRecord) -> Result<()> {
        if self.contains_component(&record.name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Component,
                record.name,
                &self.name,
            ));
        }
        let compartment = record.compartment;
        if compartment >= self.compartments.capacity() {
            return Err(InventoryError::no_free_spaces(
                ItemKind::Component,
                &self.name,
            ));
        }
        if !self.compartments.is_free(compartment)? {
            return Err(InventoryError::space_occupied(
                ItemKind::Component,
                &self.name,
                Location::Compartment(compartment),
            ));
        }
        self.compartments
            .place(compartment, Component::from_record(record))?;
        Ok(())
    }

    fn resolve_compartment(&self, requested: Option<usize>) -> Result<usize> {
        match requested {
            Some(index) if index >= self.compartments.capacity() => Err(
                InventoryError::no_free_spaces(ItemKind::Component, &self.name),
            ),
            Some(index) => {
                if self.compartments.is_free(index)? {
                    Ok(index)
                } else {
                    Err(InventoryError::space_occupied(
                        ItemKind::Component,
                        &self.name,
                        Location::Compartment(index),
                    ))
                }
            }
            None => self
                .compartments
                .free_indices()
                .next()
                .ok_or_else(|| InventoryError::no_free_spaces(ItemKind::Component, &self.name)),
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.compartments.position(|c| c.name() == name)
    }

    fn require_index(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| InventoryError::not_found(ItemKind::Component, name, &self.name))
    }
}

impl Tagged for Drawer {
    fn kind(&self) -> ItemKind {
        ItemKind::Drawer
    }

    fn item_name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}
