//! Fixed-capacity slot rows shared by container rows and drawer compartments.
//!
//! A grid only knows about indices. Owners validate names and freeness before
//! calling [`SlotGrid::place`], which overwrites unconditionally.

use crate::error::{InventoryError, Result};

/// One cell of a grid
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Occupied(T),
    Empty,
}

impl<T> Slot<T> {
    /// True when the slot holds the placeholder
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Borrow the live item, if any
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Slot::Occupied(item) => Some(item),
            Slot::Empty => None,
        }
    }

    /// Mutably borrow the live item, if any
    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied(item) => Some(item),
            Slot::Empty => None,
        }
    }

    /// Swap the slot back to a placeholder, returning what it held
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Slot::Empty) {
            Slot::Occupied(item) => Some(item),
            Slot::Empty => None,
        }
    }
}

/// Index-addressable row of slots whose length only changes through
/// [`fill`](SlotGrid::fill) and [`resize`](SlotGrid::resize).
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid<T> {
    slots: Vec<Slot<T>>,
}

impl<T> SlotGrid<T> {
    /// Create a grid of `capacity` placeholders
    pub fn new(capacity: usize) -> Self {
        let mut grid = Self { slots: Vec::new() };
        grid.fill(capacity);
        grid
    }

    /// Reset to `capacity` placeholders, discarding prior contents
    pub fn fill(&mut self, capacity: usize) {
        self.slots.clear();
        self.slots.resize_with(capacity, || Slot::Empty);
    }

    /// Number of slots, live or not
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True if the slot at `index` holds a placeholder
    pub fn is_free(&self, index: usize) -> Result<bool> {
        Ok(self.slot(index)?.is_empty())
    }

    /// Count of live items
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    /// True if at least one placeholder remains
    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(Slot::is_empty)
    }

    /// Borrow the item at `index`; `None` when the slot is free
    pub fn get(&self, index: usize) -> Result<Option<&T>> {
        Ok(self.slot(index)?.as_ref())
    }

    /// Mutably borrow the item at `index`; `None` when the slot is free
    pub fn get_mut(&mut self, index: usize) -> Result<Option<&mut T>> {
        self.check_bounds(index)?;
        Ok(self.slots[index].as_mut())
    }

    /// Remove the item at `index`, leaving a placeholder behind
    pub fn pop(&mut self, index: usize) -> Result<Option<T>> {
        self.check_bounds(index)?;
        Ok(self.slots[index].take())
    }

    /// Overwrite the slot at `index`, returning whatever it displaced
    pub fn place(&mut self, index: usize, item: T) -> Result<Option<T>> {
        self.check_bounds(index)?;
        Ok(std::mem::replace(&mut self.slots[index], Slot::Occupied(item)).take())
    }

    /// Indices of free slots, ascending
    pub fn free_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_empty())
            .map(|(index, _)| index)
    }

    /// Live items in slot order
    pub fn live_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Slot::as_ref)
    }

    /// Live items in slot order, mutably
    pub fn live_items_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(Slot::as_mut)
    }

    /// Live items with their slot index
    pub fn iter_occupied(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (index, item)))
    }

    /// Index of the first live item matching `predicate`
    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        self.iter_occupied()
            .find(|(_, item)| predicate(item))
            .map(|(index, _)| index)
    }

    /// Truncate or extend with placeholders. Truncation drops trailing slots
    /// silently; owners relocate anything they want to keep first.
    pub fn resize(&mut self, capacity: usize) {
        self.slots.resize_with(capacity, || Slot::Empty);
    }

    /// Discard every item, keeping the capacity
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        self.fill(capacity);
    }

    fn slot(&self, index: usize) -> Result<&Slot<T>> {
        self.check_bounds(index)?;
        Ok(&self.slots[index])
    }

    fn check_bounds(&self, index: usize) -> Result<()> {
        if index >= self.slots.len() {
            return Err(InventoryError::IndexOutOfBounds {
                index,
                capacity: self.slots.len(),
            });
        }
        Ok(())
    }
}

impl<T> Default for SlotGrid<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}
