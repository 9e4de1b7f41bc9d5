//! Integration tests for on-disk storage and the command layer

use partbin::component::{AddComponent, UpdateComponent};
use partbin::container::{CreateContainer, DeleteContainer, UpdateContainer};
use partbin::drawer::AddDrawer;
use partbin::find::FindItems;
use partbin::{
    process, ComponentSpec, Container, ContainerStore, DrawerSpec, Execute, InventoryConfig,
    InventoryContext, InventoryError, ItemKind, JsonContainerStore,
};
use serde_json::json;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn open(temp: &TempDir) -> InventoryContext {
    let config = InventoryConfig::default().with_data_dir(temp.path().join("containers"));
    InventoryContext::open(config).unwrap()
}

type Layout = BTreeSet<(String, usize, usize, BTreeSet<String>)>;

fn layout(container: &Container) -> Layout {
    container
        .drawers()
        .map(|d| {
            (
                d.name().to_string(),
                d.row(),
                d.column(),
                d.components().map(|c| c.name().to_string()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_snapshot_round_trip_through_store() {
    let temp = TempDir::new().unwrap();
    let store = JsonContainerStore::new(temp.path());

    let mut container = Container::new("shelf/a", 2, 3, 4).unwrap();
    container.set_tag("room", json!("lab"));
    container
        .add_drawer(
            DrawerSpec::new("resistors")
                .at(1, 2)
                .with_component(ComponentSpec::new("10k", "resistor").with_count(100))
                .with_component(
                    ComponentSpec::new("4k7", "resistor")
                        .with_compartment(3)
                        .with_tag("tolerance", "1%"),
                ),
        )
        .unwrap();
    container.add_drawer(DrawerSpec::new("spare")).unwrap();

    let path = store.save(&container.to_snapshot()).unwrap();
    assert_eq!(path, temp.path().join("shelf_a.json"));

    let restored = Container::from_snapshot(store.load("shelf/a").unwrap()).unwrap();
    assert_eq!(restored.name(), container.name());
    assert_eq!(restored.total_rows(), 2);
    assert_eq!(restored.max_drawers_per_row(), 3);
    assert_eq!(restored.compartments_per_drawer(), 4);
    assert_eq!(restored.tags(), container.tags());
    assert_eq!(layout(&restored), layout(&container));
    assert_eq!(restored, container);
}

#[test]
fn test_state_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let mut ctx = open(&temp);
        CreateContainer::new("cabinet", 2, 2).execute(&mut ctx).unwrap();
        AddDrawer::new("cabinet", "top").execute(&mut ctx).unwrap();
        AddComponent::new("cabinet", "top", "NE555", "ic", 3)
            .execute(&mut ctx)
            .unwrap();
        UpdateComponent::new("cabinet", "top", "NE555")
            .with_count(2)
            .execute(&mut ctx)
            .unwrap();
    }

    let ctx = open(&temp);
    let container = ctx.get_container("cabinet").unwrap();
    let component = container
        .get_drawer_by_name("top")
        .unwrap()
        .get_component_by_name("NE555")
        .unwrap();
    assert_eq!(component.count(), 2);
    assert_eq!(component.kind(), "ic");
}

#[test]
fn test_unreadable_files_are_skipped() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("containers");
    {
        let mut ctx = open(&temp);
        CreateContainer::new("good", 1, 1).execute(&mut ctx).unwrap();
    }
    fs::write(data.join("broken.json"), "{ not json").unwrap();
    fs::write(data.join("notes.txt"), "not a container").unwrap();

    let ctx = open(&temp);
    let names: Vec<&str> = ctx.containers().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["good"]);
}

#[test]
fn test_delete_container_refuses_non_empty() {
    let temp = TempDir::new().unwrap();
    let mut ctx = open(&temp);
    CreateContainer::new("cabinet", 1, 2).execute(&mut ctx).unwrap();
    AddDrawer::new("cabinet", "top").execute(&mut ctx).unwrap();

    let result = process(&DeleteContainer::new("cabinet"), &mut ctx);
    assert!(matches!(result, Err(InventoryError::ItemIsNotEmpty { .. })));
    assert!(temp.path().join("containers/cabinet.json").is_file());

    process(&DeleteContainer::new("cabinet").forced(true), &mut ctx).unwrap();
    assert!(!temp.path().join("containers/cabinet.json").exists());
}

#[test]
fn test_declined_resize_keeps_file_untouched() {
    let temp = TempDir::new().unwrap();
    let mut ctx = open(&temp).with_confirmation(|_| false);
    CreateContainer::new("cabinet", 2, 1).execute(&mut ctx).unwrap();
    AddDrawer::new("cabinet", "a").execute(&mut ctx).unwrap();
    AddDrawer::new("cabinet", "b").execute(&mut ctx).unwrap();
    let path = temp.path().join("containers/cabinet.json");
    let before = fs::read_to_string(&path).unwrap();

    let result = UpdateContainer::new("cabinet")
        .with_rows(1)
        .execute(&mut ctx)
        .unwrap();
    assert_eq!(result["aborted"], true);
    assert_eq!(result["resize"]["evictions"][0]["drawer"], "b");
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_find_across_containers() {
    let temp = TempDir::new().unwrap();
    let mut ctx = open(&temp);
    for (container, part, kind, count) in [
        ("bench", "LM317", "ic", 4),
        ("cabinet", "1N4148", "diode", 100),
        ("cabinet", "BC547", "transistor", 25),
    ] {
        if !ctx.contains(container) {
            CreateContainer::new(container, 1, 1).execute(&mut ctx).unwrap();
            AddDrawer::new(container, "bin").execute(&mut ctx).unwrap();
        }
        AddComponent::new(container, "bin", part, kind, count)
            .execute(&mut ctx)
            .unwrap();
    }

    let result = FindItems::new(ItemKind::Component)
        .with_term("count=1-50")
        .sorted_by("count", false)
        .execute(&mut ctx)
        .unwrap();
    assert_eq!(result["count"], 2);
    assert_eq!(result["results"][0]["path"], "bench/bin/LM317");
    assert_eq!(result["results"][1]["path"], "cabinet/bin/BC547");
}
