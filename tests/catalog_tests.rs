use budget_allocator::{
    AllocatorConfig, Catalog, CatalogError, Offering, OfferingSource, load_catalog_from_csv,
    load_catalog_from_json, load_config_from_json, save_catalog_to_csv, save_catalog_to_json,
    config::save_config_to_json,
};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn build_sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .upsert(
            Offering::new("v1", "Venue", "Kandy", 1_200.0)
                .with_name("Lakeside Hall")
                .with_attribute("capacity", json!(250)),
        )
        .unwrap();
    catalog
        .upsert(Offering::new("p1", "Photography", "Kandy", 350.5).with_name("Studio One"))
        .unwrap();
    catalog
        .upsert(Offering::new("b1", "Bridal Service", "Galle", 180.0))
        .unwrap();
    catalog
}

#[test]
fn json_round_trip_preserves_catalog() {
    let catalog = build_sample_catalog();
    let file = NamedTempFile::new().unwrap();

    save_catalog_to_json(&catalog, file.path()).unwrap();
    let loaded = load_catalog_from_json(file.path()).unwrap();

    assert_eq!(loaded, catalog);
    assert_eq!(
        loaded.find("v1").unwrap().attributes.get("capacity"),
        Some(&json!(250))
    );
}

#[test]
fn csv_round_trip_preserves_catalog() {
    let catalog = build_sample_catalog();
    let file = NamedTempFile::new().unwrap();

    save_catalog_to_csv(&catalog, file.path()).unwrap();
    let loaded = load_catalog_from_csv(file.path()).unwrap();

    assert_eq!(loaded, catalog);
}

#[test]
fn json_loader_accepts_bare_arrays_and_mongo_ids() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"_id": "64f0c1", "category": "Cake", "location": "Galle", "price": 75, "description": "Three tiers"}},
            {{"id": "64f0c2", "name": "Sweet Co", "category": "Cake", "location": "Galle", "price": 90}}
        ]"#
    )
    .unwrap();

    let loaded = load_catalog_from_json(file.path()).unwrap();
    assert_eq!(loaded.len(), 2);
    let first = loaded.find("64f0c1").unwrap();
    assert_eq!(first.price, 75.0);
    assert_eq!(first.attributes.get("description"), Some(&json!("Three tiers")));
    assert_eq!(loaded.find("64f0c2").unwrap().name.as_deref(), Some("Sweet Co"));
}

#[test]
fn negative_price_is_rejected_on_load() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"offerings": [{{"id": "x", "category": "Cake", "location": "Galle", "price": -10}}]}}"#
    )
    .unwrap();

    let err = load_catalog_from_json(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));
}

#[test]
fn duplicate_ids_are_rejected() {
    let offerings = vec![
        Offering::new("dup", "Cake", "Galle", 10.0),
        Offering::new("dup", "Venue", "Galle", 20.0),
    ];
    let err = Catalog::from_offerings(offerings).unwrap_err();
    assert!(err.to_string().contains("duplicate offering id dup"));
}

#[test]
fn upsert_replaces_and_remove_deletes() {
    let mut catalog = build_sample_catalog();
    catalog
        .upsert(Offering::new("p1", "Photography", "Kandy", 400.0))
        .unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.find("p1").unwrap().price, 400.0);

    assert!(catalog.remove("p1"));
    assert!(!catalog.remove("p1"));
    assert_eq!(catalog.len(), 2);

    let err = catalog
        .upsert(Offering::new("bad", "Cake", "Kandy", f64::NAN))
        .unwrap_err();
    assert!(err.to_string().contains("non-finite price"));
}

#[test]
fn offering_source_filters_by_location_and_category() {
    let catalog = build_sample_catalog();
    let found = catalog
        .offerings_for("Kandy", &["Venue".to_string(), "Bridal Service".to_string()])
        .unwrap();
    let ids: Vec<&str> = found.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["v1"]);
}

#[test]
fn config_round_trip_and_lookup() {
    let config = AllocatorConfig::new(["Venue", "Cake"], ["Kandy"]);
    let file = NamedTempFile::new().unwrap();
    save_config_to_json(&config, file.path()).unwrap();
    let loaded = load_config_from_json(file.path()).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.allows_category("Cake"));
    assert!(!loaded.allows_category("Music"));
    assert!(!loaded.allows_location("Galle"));

    let open = AllocatorConfig::default();
    assert!(open.allows_category("anything"));
    assert!(open.allows_location("anywhere"));
    assert!(AllocatorConfig::wedding().allows_category("Bridal Service"));
}

#[test]
fn offerings_outside_config_are_rejected() {
    let wedding = AllocatorConfig::wedding();
    assert!(build_sample_catalog().validate_against(&wedding).is_ok());

    let fireworks = Catalog::from_offerings(vec![Offering::new(
        "f1",
        "Fireworks",
        "Kandy",
        10.0,
    )])
    .unwrap();
    match fireworks.validate_against(&wedding) {
        Err(CatalogError::InvalidData(message)) => {
            assert!(message.contains("unknown category 'Fireworks'"))
        }
        other => panic!("expected invalid data, got {other:?}"),
    }

    let atlantis =
        Catalog::from_offerings(vec![Offering::new("v9", "Venue", "Atlantis", 10.0)]).unwrap();
    match atlantis.validate_against(&wedding) {
        Err(CatalogError::InvalidData(message)) => {
            assert!(message.contains("unknown location 'Atlantis'"))
        }
        other => panic!("expected invalid data, got {other:?}"),
    }

    assert!(fireworks.validate_against(&AllocatorConfig::default()).is_ok());
    assert!(atlantis.validate_against(&AllocatorConfig::default()).is_ok());
}

#[test]
fn upsert_within_keeps_catalog_unchanged_on_rejection() {
    let wedding = AllocatorConfig::wedding();
    let mut catalog = build_sample_catalog();
    let before = catalog.clone();

    let err = catalog
        .upsert_within(Offering::new("f1", "Fireworks", "Atlantis", 10.0), &wedding)
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));
    assert_eq!(catalog, before);

    catalog
        .upsert_within(Offering::new("c1", "Cake", "Galle", 40.0), &wedding)
        .unwrap();
    assert!(catalog.find("c1").is_some());
}
