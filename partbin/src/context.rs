//! InventoryContext - storage access and in-memory containers
//!
//! The context provides access to storage and the loaded containers. No
//! business logic, just access primitives; commands do the work.

use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::store::{ContainerStore, JsonContainerStore};
use crate::types::{Container, ItemKind, ResizePlan};
use std::path::Path;
use tracing::{debug, info, warn};

/// Decides whether a resize that relocates or deletes drawers goes ahead
pub type ConfirmHook = Box<dyn Fn(&ResizePlan) -> bool>;

/// Confirmation hook for non-interactive use: always go ahead
pub fn auto_confirm(_plan: &ResizePlan) -> bool {
    true
}

/// Context passed to every command
pub struct InventoryContext {
    config: InventoryConfig,
    store: Box<dyn ContainerStore>,
    containers: Vec<Container>,
    confirm: ConfirmHook,
}

impl InventoryContext {
    /// Create an empty context over `store`. Nothing is loaded yet.
    pub fn new(config: InventoryConfig, store: impl ContainerStore + 'static) -> Self {
        Self {
            config,
            store: Box::new(store),
            containers: Vec::new(),
            confirm: Box::new(auto_confirm),
        }
    }

    /// Open the JSON store in the configured data directory and load every
    /// container in it.
    pub fn open(config: InventoryConfig) -> Result<Self> {
        let store = JsonContainerStore::new(config.data_dir.clone());
        let mut ctx = Self::new(config, store);
        ctx.reload_all()?;
        Ok(ctx)
    }

    /// Replace the resize confirmation hook
    pub fn with_confirmation<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ResizePlan) -> bool + 'static,
    {
        self.confirm = Box::new(hook);
        self
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ContainerStore {
        self.store.as_ref()
    }

    /// Ask the hook whether a resize plan may be applied
    pub fn confirm_resize(&self, plan: &ResizePlan) -> bool {
        (self.confirm)(plan)
    }

    /// Reload every container from the store. Records that fail structural
    /// validation are skipped with a warning.
    pub fn reload_all(&mut self) -> Result<()> {
        let records = self.store.load_all()?;
        let mut containers = Vec::with_capacity(records.len());
        for record in records {
            let name = record.name.clone();
            match Container::from_snapshot(record) {
                Ok(container) => containers.push(container),
                Err(e) => warn!("Failed to restore container '{}': {}", name, e),
            }
        }
        debug!(count = containers.len(), "loaded containers");
        self.containers = containers;
        Ok(())
    }

    /// Loaded containers, sorted by name
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn get_container(&self, name: &str) -> Result<&Container> {
        let index = self.require_index(name)?;
        Ok(&self.containers[index])
    }

    pub fn get_container_mut(&mut self, name: &str) -> Result<&mut Container> {
        let index = self.require_index(name)?;
        Ok(&mut self.containers[index])
    }

    /// Add a new container and persist it
    pub fn insert(&mut self, container: Container) -> Result<&Container> {
        let name = container.name().to_string();
        if self.contains(&name) || self.store.exists(&name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Container,
                name,
                "inventory",
            ));
        }
        let path = self.store.save(&container.to_snapshot())?;
        self.containers.push(container);
        self.containers.sort_by(|a, b| a.name().cmp(b.name()));
        self.reload(&name, &path)
    }

    /// Swap in a modified copy of a container and persist it. A changed name
    /// moves the file. Memory is only updated once the store accepted it.
    pub fn replace(&mut self, name: &str, container: Container) -> Result<&Container> {
        let index = self.require_index(name)?;
        let new_name = container.name().to_string();
        let renamed = new_name != name;
        if renamed && self.contains(&new_name) {
            return Err(InventoryError::duplicate_name(
                ItemKind::Container,
                new_name,
                "inventory",
            ));
        }

        let path = self.store.save(&container.to_snapshot())?;
        if renamed {
            self.store.delete(name)?;
            info!(from = %name, to = %new_name, "renamed container");
        }
        self.containers[index] = container;
        if renamed {
            self.containers.sort_by(|a, b| a.name().cmp(b.name()));
        }
        self.reload(&new_name, &path)
    }

    /// Save a container, then reload it from the store so memory matches
    /// what is on disk.
    pub fn commit(&mut self, name: &str) -> Result<&Container> {
        let index = self.require_index(name)?;
        let path = self.store.save(&self.containers[index].to_snapshot())?;
        self.reload(name, &path)
    }

    /// Replace the in-memory copy of a just-saved container with what the
    /// store reads back
    fn reload(&mut self, name: &str, path: &Path) -> Result<&Container> {
        let index = self.require_index(name)?;
        let reloaded = Container::from_snapshot(self.store.load(name)?)?;
        self.containers[index] = reloaded;
        info!(container = %name, path = %path.display(), "committed container");
        Ok(&self.containers[index])
    }

    /// Remove a container from memory and storage
    pub fn remove(&mut self, name: &str) -> Result<Container> {
        let index = self.require_index(name)?;
        self.store.delete(name)?;
        let container = self.containers.remove(index);
        info!(container = %name, "removed container");
        Ok(container)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.containers.iter().position(|c| c.name() == name)
    }

    fn require_index(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| InventoryError::ContainerNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContainerRecord, DrawerSpec};
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, InventoryContext) {
        let temp = TempDir::new().unwrap();
        let config = InventoryConfig::default().with_data_dir(temp.path().join("data"));
        let ctx = InventoryContext::open(config).unwrap();
        (temp, ctx)
    }

    #[test]
    fn test_open_empty() {
        let (_temp, ctx) = setup();
        assert!(ctx.containers().is_empty());
        assert!(matches!(
            ctx.get_container("nope"),
            Err(InventoryError::ContainerNotFound { .. })
        ));
    }

    #[test]
    fn test_insert_commits_to_disk() {
        let (temp, mut ctx) = setup();
        ctx.insert(Container::new("cab", 1, 1, 1).unwrap()).unwrap();
        assert!(temp.path().join("data/cab.json").is_file());

        assert!(matches!(
            ctx.insert(Container::new("cab", 2, 2, 2).unwrap()),
            Err(InventoryError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_commit_reloads_from_disk() {
        let (temp, mut ctx) = setup();
        ctx.insert(Container::new("cab", 1, 2, 1).unwrap()).unwrap();
        ctx.get_container_mut("cab")
            .unwrap()
            .add_drawer(DrawerSpec::new("top"))
            .unwrap();
        let committed = ctx.commit("cab").unwrap().clone();

        let config = InventoryConfig::default().with_data_dir(temp.path().join("data"));
        let reopened = InventoryContext::open(config).unwrap();
        assert_eq!(reopened.get_container("cab").unwrap(), &committed);
    }

    #[test]
    fn test_replace_with_rename_moves_file() {
        let (temp, mut ctx) = setup();
        ctx.insert(Container::new("old", 1, 1, 1).unwrap()).unwrap();
        let mut copy = ctx.get_container("old").unwrap().clone();
        copy.set_name("new");
        ctx.replace("old", copy).unwrap();

        assert!(!temp.path().join("data/old.json").exists());
        assert!(temp.path().join("data/new.json").is_file());
        assert!(ctx.get_container("new").is_ok());
        assert!(ctx.get_container("old").is_err());
    }

    /// JSON store that counts writes
    struct CountingStore {
        inner: JsonContainerStore,
        saves: Rc<Cell<usize>>,
    }

    impl ContainerStore for CountingStore {
        fn load_all(&self) -> Result<Vec<ContainerRecord>> {
            self.inner.load_all()
        }

        fn load(&self, name: &str) -> Result<ContainerRecord> {
            self.inner.load(name)
        }

        fn save(&self, record: &ContainerRecord) -> Result<PathBuf> {
            self.saves.set(self.saves.get() + 1);
            self.inner.save(record)
        }

        fn delete(&self, name: &str) -> Result<bool> {
            self.inner.delete(name)
        }

        fn exists(&self, name: &str) -> bool {
            self.inner.exists(name)
        }
    }

    #[test]
    fn test_each_change_writes_once() {
        let temp = TempDir::new().unwrap();
        let saves = Rc::new(Cell::new(0));
        let store = CountingStore {
            inner: JsonContainerStore::new(temp.path().join("data")),
            saves: Rc::clone(&saves),
        };
        let mut ctx = InventoryContext::new(InventoryConfig::default(), store);

        ctx.insert(Container::new("cab", 1, 2, 1).unwrap()).unwrap();
        assert_eq!(saves.get(), 1);

        let mut copy = ctx.get_container("cab").unwrap().clone();
        copy.add_drawer(DrawerSpec::new("top")).unwrap();
        ctx.replace("cab", copy).unwrap();
        assert_eq!(saves.get(), 2);

        let mut renamed = ctx.get_container("cab").unwrap().clone();
        renamed.set_name("shelf");
        ctx.replace("cab", renamed).unwrap();
        assert_eq!(saves.get(), 3);
        assert_eq!(ctx.get_container("shelf").unwrap().drawer_count(), 1);

        ctx.commit("shelf").unwrap();
        assert_eq!(saves.get(), 4);
    }

    #[test]
    fn test_remove() {
        let (temp, mut ctx) = setup();
        ctx.insert(Container::new("cab", 1, 1, 1).unwrap()).unwrap();
        ctx.remove("cab").unwrap();
        assert!(!temp.path().join("data/cab.json").exists());
        assert!(ctx.containers().is_empty());
    }

    #[test]
    fn test_confirmation_hook() {
        let (_temp, ctx) = setup();
        let plan = Container::new("c", 1, 1, 1)
            .unwrap()
            .plan_resize_rows(2)
            .unwrap();
        assert!(ctx.confirm_resize(&plan));
        let ctx = ctx.with_confirmation(|_| false);
        assert!(!ctx.confirm_resize(&plan));
    }
}
