//! Error types for the inventory engine

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{ItemKind, Location};

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Errors that can occur in inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// An item with the same name already lives next to the new one
    #[error("'{name}' {kind} could not be added to '{parent}' as item of the same name already exists")]
    DuplicateName {
        kind: ItemKind,
        name: String,
        parent: String,
    },

    /// No placeholder slot is available in the requested scope
    #[error("new {kind} could not be added to '{parent}' as there are no more free spots")]
    NoFreeSpaces { kind: ItemKind, parent: String },

    /// An explicit position was requested but is already live
    #[error("new {kind} could not be added to '{parent}' at {location} as the space is occupied by another")]
    SpaceOccupied {
        kind: ItemKind,
        parent: String,
        location: Location,
    },

    /// Lookup by name failed
    #[error("'{name}' {kind} was not found inside '{parent}'")]
    ItemNotFound {
        kind: ItemKind,
        name: String,
        parent: String,
    },

    /// Lookup by coordinate or compartment failed
    #[error("{kind} was not found inside '{parent}' at position {location}")]
    ItemNotFoundAtPosition {
        kind: ItemKind,
        parent: String,
        location: Location,
    },

    /// Delete blocked because children exist
    #[error("'{name}' {kind} could not be removed as it still holds {count} items")]
    ItemIsNotEmpty {
        kind: ItemKind,
        name: String,
        count: usize,
    },

    /// Container name lookup failed
    #[error("'{name}' container was not found")]
    ContainerNotFound { name: String },

    /// Raw slot index outside a grid
    #[error("index {index} is out of bounds for a grid of {capacity} slots")]
    IndexOutOfBounds { index: usize, capacity: usize },

    /// Position given with only one coordinate, or otherwise unusable
    #[error("invalid position: {message}")]
    InvalidPosition { message: String },

    /// Container dimensions must be at least one
    #[error("invalid {field}: {value} (must be at least 1)")]
    InvalidDimension { field: String, value: usize },

    /// Malformed tag or search expression
    #[error("invalid tag '{tag}': {message}")]
    InvalidTag { tag: String, message: String },

    /// Component type not in the configured list
    #[error("unknown component type '{kind}' (expected one of: {allowed})")]
    InvalidComponentType { kind: String, allowed: String },

    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A stored record could not be read back
    #[error("corrupt container file {path}: {message}")]
    CorruptRecord { path: PathBuf, message: String },

    /// Configuration could not be loaded
    #[error("configuration error: {source}")]
    Config {
        #[source]
        source: Box<figment::Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for InventoryError {
    fn from(source: figment::Error) -> Self {
        Self::Config {
            source: Box::new(source),
        }
    }
}

impl InventoryError {
    /// Create a duplicate name error
    pub fn duplicate_name(
        kind: ItemKind,
        name: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Create a no free spaces error
    pub fn no_free_spaces(kind: ItemKind, parent: impl Into<String>) -> Self {
        Self::NoFreeSpaces {
            kind,
            parent: parent.into(),
        }
    }

    /// Create a space occupied error
    pub fn space_occupied(kind: ItemKind, parent: impl Into<String>, location: Location) -> Self {
        Self::SpaceOccupied {
            kind,
            parent: parent.into(),
            location,
        }
    }

    /// Create an item not found error
    pub fn not_found(kind: ItemKind, name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::ItemNotFound {
            kind,
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Create an item not found at position error
    pub fn not_found_at(kind: ItemKind, parent: impl Into<String>, location: Location) -> Self {
        Self::ItemNotFoundAtPosition {
            kind,
            parent: parent.into(),
            location,
        }
    }

    /// Create an invalid tag error
    pub fn invalid_tag(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for failures caused by the request itself rather than the
    /// environment (disk, parse, configuration).
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            Self::Io(_) | Self::Json(_) | Self::Config { .. } | Self::CorruptRecord { .. }
        )
    }
}
