//! Containers: the root of the hierarchy, a rows × columns grid of drawers.

use super::component::Component;
use super::drawer::{Drawer, DrawerSpec};
use super::grid::SlotGrid;
use super::item::{ItemKind, Tagged};
use super::position::{Location, Position};
use super::snapshot::ContainerRecord;
use super::tags::{keys, timestamp, Tags};
use crate::error::{InventoryError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// A named storage unit holding a grid of drawers.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    name: String,
    max_drawers_per_row: usize,
    compartments_per_drawer: usize,
    tags: Tags,
    rows: Vec<SlotGrid<Drawer>>,
}

/// A drawer that keeps its contents but changes cell during a shrink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub drawer: String,
    pub from: Position,
    pub to: Position,
}

/// A drawer that has no cell left after a shrink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Eviction {
    pub drawer: String,
    pub from: Position,
    /// Components lost with the drawer
    pub components: usize,
}

/// What a resize would do, computed without touching the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResizePlan {
    pub rows: usize,
    pub columns: usize,
    pub relocations: Vec<Relocation>,
    pub evictions: Vec<Eviction>,
}

impl ResizePlan {
    /// True when applying the plan moves or deletes nothing
    pub fn is_trivial(&self) -> bool {
        self.relocations.is_empty() && self.evictions.is_empty()
    }

    /// True when no drawer is lost
    pub fn is_lossless(&self) -> bool {
        self.evictions.is_empty()
    }
}

/// Result of a resize request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResizeOutcome {
    Applied(ResizePlan),
    /// The confirmation hook declined; nothing changed
    Aborted(ResizePlan),
}

impl ResizeOutcome {
    pub fn plan(&self) -> &ResizePlan {
        match self {
            ResizeOutcome::Applied(plan) | ResizeOutcome::Aborted(plan) => plan,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ResizeOutcome::Applied(_))
    }

    pub fn into_plan(self) -> ResizePlan {
        match self {
            ResizeOutcome::Applied(plan) | ResizeOutcome::Aborted(plan) => plan,
        }
    }
}

impl Container {
    /// Create an empty container. Every dimension must be at least 1.
    pub fn new(
        name: impl Into<String>,
        total_rows: usize,
        max_drawers_per_row: usize,
        compartments_per_drawer: usize,
    ) -> Result<Self> {
        check_dimension("rows", total_rows)?;
        check_dimension("columns", max_drawers_per_row)?;
        check_dimension("compartments", compartments_per_drawer)?;

        let mut container = Self {
            name: name.into(),
            max_drawers_per_row,
            compartments_per_drawer,
            tags: Tags::new(),
            rows: (0..total_rows)
                .map(|_| SlotGrid::new(max_drawers_per_row))
                .collect(),
        };
        container.refresh_tags();
        Ok(container)
    }

    /// Rebuild from a stored record.
    ///
    /// Tags at every level are kept as stored. Duplicate names and clashing
    /// or out-of-range positions are rejected the same way live additions are.
    pub fn from_snapshot(record: ContainerRecord) -> Result<Self> {
        let mut container = Self::new(
            record.name,
            record.total_rows,
            record.max_drawers_per_row,
            record.compartments_per_drawer,
        )?;
        for drawer_record in record.drawers {
            if container.contains_drawer(&drawer_record.name) {
                return Err(InventoryError::duplicate_name(
                    ItemKind::Drawer,
                    drawer_record.name,
                    &container.name,
                ));
            }
            let position = Position::new(drawer_record.row, drawer_record.column);
            container.check_target(position)?;
            let drawer = Drawer::from_record(drawer_record, container.compartments_per_drawer)?;
            container.rows[position.row].place(position.column, drawer)?;
        }
        container.tags = record.tags;
        Ok(container)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn max_drawers_per_row(&self) -> usize {
        self.max_drawers_per_row
    }

    pub fn compartments_per_drawer(&self) -> usize {
        self.compartments_per_drawer
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Total number of drawer cells
    pub fn capacity(&self) -> usize {
        self.total_rows() * self.max_drawers_per_row
    }

    /// Live drawers in row-major order
    pub fn drawers(&self) -> impl Iterator<Item = &Drawer> + '_ {
        self.rows.iter().flat_map(SlotGrid::live_items)
    }

    pub fn drawer_count(&self) -> usize {
        self.rows.iter().map(SlotGrid::occupied_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.drawer_count() == 0
    }

    pub fn has_free_space(&self) -> bool {
        self.rows.iter().any(SlotGrid::has_free_slot)
    }

    pub fn contains_drawer(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }

    /// Free cells in row-major order
    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, grid)| {
            grid.free_indices()
                .map(move |column| Position::new(row, column))
        })
    }

    /// Every component in drawer order, then compartment order
    pub fn get_all_components(&self) -> Vec<&Component> {
        self.drawers().flat_map(Drawer::components).collect()
    }

    /// Add a drawer.
    ///
    /// Both `row` and `column` select an explicit cell; neither picks the
    /// first free cell in row-major order. Components listed in the spec are
    /// placed into the drawer before it joins the grid, so a failing
    /// component leaves the container untouched.
    pub fn add_drawer(&mut self, spec: DrawerSpec) -> Result<&Drawer> {
        if self.contains_drawer(&spec.name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Drawer,
                spec.name,
                &self.name,
            ));
        }

        let position = match (spec.row, spec.column) {
            (Some(row), Some(column)) => {
                let position = Position::new(row, column);
                self.check_target(position)?;
                position
            }
            (None, None) => self.get_next_free_row_and_column(None)?,
            (row, column) => {
                return Err(InventoryError::InvalidPosition {
                    message: format!(
                        "both row and column are required for an explicit position (row: {}, column: {})",
                        describe(row),
                        describe(column)
                    ),
                })
            }
        };

        let mut drawer =
            Drawer::with_tags(spec.name, position, self.compartments_per_drawer, spec.tags);
        for component in spec.components {
            drawer.add_component(component)?;
        }

        debug!(container = %self.name, drawer = %drawer.name(), %position, "adding drawer");
        self.rows[position.row].place(position.column, drawer)?;
        self.refresh_tags();
        self.get_drawer_at_pos(position.row, position.column)
    }

    pub fn get_drawer_by_name(&self, name: &str) -> Result<&Drawer> {
        self.drawers()
            .find(|d| d.name() == name)
            .ok_or_else(|| InventoryError::not_found(ItemKind::Drawer, name, &self.name))
    }

    /// Mutable lookup, for changes inside the drawer. Structural changes
    /// to the drawer itself go through the container.
    pub fn get_drawer_by_name_mut(&mut self, name: &str) -> Result<&mut Drawer> {
        let position = self.require_position(name)?;
        self.get_drawer_at_pos_mut(position.row, position.column)
    }

    pub fn get_drawer_at_pos(&self, row: usize, column: usize) -> Result<&Drawer> {
        self.rows
            .get(row)
            .and_then(|grid| grid.get(column).ok().flatten())
            .ok_or_else(|| {
                InventoryError::not_found_at(
                    ItemKind::Drawer,
                    &self.name,
                    Location::Cell(Position::new(row, column)),
                )
            })
    }

    pub fn get_drawer_at_pos_mut(&mut self, row: usize, column: usize) -> Result<&mut Drawer> {
        let not_found = InventoryError::not_found_at(
            ItemKind::Drawer,
            &self.name,
            Location::Cell(Position::new(row, column)),
        );
        self.rows
            .get_mut(row)
            .and_then(|grid| grid.get_mut(column).ok().flatten())
            .ok_or(not_found)
    }

    /// Remove a drawer by name. A drawer still holding components is only
    /// removed when `forced`.
    pub fn remove_drawer_by_name(&mut self, name: &str, forced: bool) -> Result<Drawer> {
        let drawer = self.get_drawer_by_name(name)?;
        let count = drawer.component_count();
        if count > 0 && !forced {
            return Err(InventoryError::ItemIsNotEmpty {
                kind: ItemKind::Drawer,
                name: name.to_string(),
                count,
            });
        }
        let position = drawer.position();
        self.take_drawer(position)
    }

    /// Remove whatever drawer sits at the cell, with no emptiness check.
    pub fn remove_drawer_at_pos(&mut self, row: usize, column: usize) -> Result<Drawer> {
        self.take_drawer(Position::new(row, column))
    }

    /// Move a drawer to an explicit cell. With `forced`, a live occupant is
    /// displaced and returned; it no longer belongs to the container.
    pub fn move_drawer_to(
        &mut self,
        name: &str,
        row: usize,
        column: usize,
        forced: bool,
    ) -> Result<Option<Drawer>> {
        let from = self.require_position(name)?;
        let to = Position::new(row, column);
        if !self.in_bounds(to) {
            return Err(InventoryError::no_free_spaces(ItemKind::Drawer, &self.name));
        }
        if from == to {
            return Ok(None);
        }
        if !forced && !self.rows[to.row].is_free(to.column)? {
            return Err(InventoryError::space_occupied(
                ItemKind::Drawer,
                &self.name,
                Location::Cell(to),
            ));
        }

        let displaced = self.relocate(from, to)?;
        if let Some(lost) = &displaced {
            debug!(container = %self.name, drawer = %lost.name(), "displaced drawer");
        }
        self.refresh_tags();
        Ok(displaced)
    }

    /// Move a drawer to the first free cell in row-major order
    pub fn move_drawer_to_a_free_spot(&mut self, name: &str) -> Result<Position> {
        let from = self.require_position(name)?;
        let to = self.get_next_free_row_and_column(None)?;
        self.relocate(from, to)?;
        self.refresh_tags();
        Ok(to)
    }

    /// First free cell, optionally limited to one row
    pub fn get_next_free_row_and_column(&self, row: Option<usize>) -> Result<Position> {
        let found = match row {
            Some(row) => self.rows.get(row).and_then(|grid| {
                grid.free_indices()
                    .next()
                    .map(|column| Position::new(row, column))
            }),
            None => self.free_positions().next(),
        };
        found.ok_or_else(|| InventoryError::no_free_spaces(ItemKind::Drawer, &self.name))
    }

    pub fn rename_drawer(&mut self, name: &str, new_name: &str) -> Result<()> {
        if name == new_name {
            self.require_position(name)?;
            return Ok(());
        }
        if self.contains_drawer(new_name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Drawer,
                new_name,
                &self.name,
            ));
        }
        self.get_drawer_by_name_mut(name)?.set_name(new_name);
        self.refresh_tags();
        Ok(())
    }

    /// Delete every drawer, keeping the dimensions. Returns how many were removed.
    pub fn clear_container(&mut self) -> usize {
        let removed = self.drawer_count();
        for grid in &mut self.rows {
            grid.clear();
        }
        self.refresh_tags();
        removed
    }

    /// Plan a change of row count
    pub fn plan_resize_rows(&self, rows: usize) -> Result<ResizePlan> {
        check_dimension("rows", rows)?;
        Ok(self.plan_resize(rows, self.max_drawers_per_row))
    }

    /// Plan a change of column count
    pub fn plan_resize_columns(&self, columns: usize) -> Result<ResizePlan> {
        check_dimension("columns", columns)?;
        Ok(self.plan_resize(self.total_rows(), columns))
    }

    /// Change the row count. When the plan relocates or evicts drawers,
    /// `confirm` decides whether to go ahead; declining changes nothing.
    pub fn resize_rows<F>(&mut self, rows: usize, confirm: F) -> Result<ResizeOutcome>
    where
        F: FnOnce(&ResizePlan) -> bool,
    {
        let plan = self.plan_resize_rows(rows)?;
        self.resize_with(plan, confirm)
    }

    /// Change the column count, with the same confirmation rule as
    /// [`resize_rows`](Self::resize_rows).
    pub fn resize_columns<F>(&mut self, columns: usize, confirm: F) -> Result<ResizeOutcome>
    where
        F: FnOnce(&ResizePlan) -> bool,
    {
        let plan = self.plan_resize_columns(columns)?;
        self.resize_with(plan, confirm)
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
        let children = self.drawer_count();
        let has_free_space = self.has_free_space();
        self.tags
            .insert(keys::NAME.into(), Value::String(self.name.clone()));
        self.tags
            .insert(keys::ROWS.into(), Value::from(self.total_rows()));
        self.tags
            .insert(keys::COLUMNS.into(), Value::from(self.max_drawers_per_row));
        self.tags.insert(
            keys::COMPARTMENTS.into(),
            Value::from(self.compartments_per_drawer),
        );
        self.tags.insert(keys::CHILDREN.into(), Value::from(children));
        self.tags
            .insert(keys::HAS_FREE_SPACE.into(), Value::Bool(has_free_space));
        self.tags.insert(keys::UPDATED_AT.into(), timestamp());
    }

    /// Persisted form, drawers in row-major order
    pub fn to_snapshot(&self) -> ContainerRecord {
        ContainerRecord {
            name: self.name.clone(),
            total_rows: self.total_rows(),
            max_drawers_per_row: self.max_drawers_per_row,
            compartments_per_drawer: self.compartments_per_drawer,
            tags: self.tags.clone(),
            drawers: self.drawers().map(Drawer::to_snapshot).collect(),
        }
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.refresh_tags();
    }

    /// Change compartments per drawer. Shrinking is refused while any
    /// drawer holds a component in a compartment that would disappear.
    pub fn resize_compartments(&mut self, compartments: usize) -> Result<()> {
        check_dimension("compartments", compartments)?;
        if let Some(drawer) = self.drawers().find(|d| {
            d.components()
                .any(|c| c.compartment() >= compartments)
        }) {
            return Err(InventoryError::ItemIsNotEmpty {
                kind: ItemKind::Drawer,
                name: drawer.name().to_string(),
                count: drawer.component_count(),
            });
        }
        for drawer in self.rows.iter_mut().flat_map(SlotGrid::live_items_mut) {
            drawer.resize_compartments(compartments);
        }
        self.compartments_per_drawer = compartments;
        self.refresh_tags();
        Ok(())
    }

    fn plan_resize(&self, rows: usize, columns: usize) -> ResizePlan {
        let fits = |p: &Position| p.row < rows && p.column < columns;
        let mut targets = self.free_positions().filter(|p| fits(p));

        let mut relocations = Vec::new();
        let mut evictions = Vec::new();
        for drawer in self.drawers().filter(|d| !fits(&d.position())) {
            match targets.next() {
                Some(to) => relocations.push(Relocation {
                    drawer: drawer.name().to_string(),
                    from: drawer.position(),
                    to,
                }),
                None => evictions.push(Eviction {
                    drawer: drawer.name().to_string(),
                    from: drawer.position(),
                    components: drawer.component_count(),
                }),
            }
        }

        ResizePlan {
            rows,
            columns,
            relocations,
            evictions,
        }
    }

    fn resize_with<F>(&mut self, plan: ResizePlan, confirm: F) -> Result<ResizeOutcome>
    where
        F: FnOnce(&ResizePlan) -> bool,
    {
        if !plan.is_trivial() && !confirm(&plan) {
            info!(container = %self.name, "resize declined");
            return Ok(ResizeOutcome::Aborted(plan));
        }
        self.apply_resize(&plan)?;
        info!(
            container = %self.name,
            rows = plan.rows,
            columns = plan.columns,
            relocated = plan.relocations.len(),
            evicted = plan.evictions.len(),
            "resized container"
        );
        Ok(ResizeOutcome::Applied(plan))
    }

    fn apply_resize(&mut self, plan: &ResizePlan) -> Result<()> {
        for relocation in &plan.relocations {
            self.relocate(relocation.from, relocation.to)?;
        }
        for eviction in &plan.evictions {
            self.take_drawer(eviction.from)?;
        }

        let columns = plan.columns;
        self.rows
            .resize_with(plan.rows, || SlotGrid::new(columns));
        for grid in &mut self.rows {
            grid.resize(columns);
        }
        self.max_drawers_per_row = columns;
        self.refresh_tags();
        Ok(())
    }

    /// Pop-then-place; returns whatever occupied the target
    fn relocate(&mut self, from: Position, to: Position) -> Result<Option<Drawer>> {
        let mut drawer = self.take_drawer(from)?;
        drawer.set_position(to);
        self.rows[to.row].place(to.column, drawer)
    }

    fn take_drawer(&mut self, position: Position) -> Result<Drawer> {
        let removed = self
            .rows
            .get_mut(position.row)
            .and_then(|grid| grid.pop(position.column).ok().flatten());
        let drawer = removed.ok_or_else(|| {
            InventoryError::not_found_at(ItemKind::Drawer, &self.name, Location::Cell(position))
        })?;
        debug!(container = %self.name, drawer = %drawer.name(), %position, "removed drawer");
        self.refresh_tags();
        Ok(drawer)
    }

    /// Validate an explicit target cell: in range and free
    fn check_target(&self, position: Position) -> Result<()> {
        if !self.in_bounds(position) {
            return Err(InventoryError::no_free_spaces(ItemKind::Drawer, &self.name));
        }
        if !self.rows[position.row].is_free(position.column)? {
            return Err(InventoryError::space_occupied(
                ItemKind::Drawer,
                &self.name,
                Location::Cell(position),
            ));
        }
        Ok(())
    }

    fn in_bounds(&self, position: Position) -> bool {
        position.row < self.total_rows() && position.column < self.max_drawers_per_row
    }

    fn locate(&self, name: &str) -> Option<Position> {
        self.drawers()
            .find(|d| d.name() == name)
            .map(Drawer::position)
    }

    fn require_position(&self, name: &str) -> Result<Position> {
        self.locate(name)
            .ok_or_else(|| InventoryError::not_found(ItemKind::Drawer, name, &self.name))
    }
}

impl Tagged for Container {
    fn kind(&self) -> ItemKind {
        ItemKind::Container
    }

    fn item_name(&self) -> &str {
        &self.name
    }

    fn tags(&self) -> &Tags {
        &self.tags
    }
}

fn check_dimension(field: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(InventoryError::InvalidDimension {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn describe(coordinate: Option<usize>) -> String {
    coordinate.map_or_else(|| "missing".to_string(), |c| c.to_string())
}
