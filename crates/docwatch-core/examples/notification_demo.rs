//! End-to-end demo of the change-notification hook.
//!
//! Walks a user entity through an insert and an update, showing which
//! writes fire notifications and what the assembled payload carries.
//!
//! Run with `cargo run --example notification_demo`.

use chrono::Utc;
use docwatch_core::logging_facility::{init, Profile};
use docwatch_core::{
    ArrayIdentityMap, CrudOperation, EntityMetadata, HookConfiguration, HookDoc, NotificationEntity,
    NotificationHook, NotificationSubmitter, Path, SubmissionReport,
};
use serde_json::json;
use std::sync::Arc;

struct PrintingSubmitter;

impl NotificationSubmitter for PrintingSubmitter {
    fn submit(&self, entity: &NotificationEntity) -> SubmissionReport {
        println!(
            "submitting notification for {} v{} ({:?})",
            entity.entity_name, entity.entity_version, entity.operation
        );
        SubmissionReport::accepted()
    }
}

fn print_entity(entity: &NotificationEntity) {
    println!("  operation:    {:?}", entity.operation);
    println!("  updatedPaths: {:?}", entity.updated_paths);
    println!("  removedPaths: {:?}", entity.removed_paths);
    for pair in &entity.entity_data {
        println!("  entityData:   {} = {:?}", pair.path, pair.value);
    }
    for pair in &entity.removed_entity_data {
        println!("  removed:      {} = {:?}", pair.path, pair.value);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let mut array_identities = ArrayIdentityMap::new();
    array_identities.insert(Path::parse("sites")?, vec![Path::parse("_id")?]);
    let metadata = EntityMetadata::new("user", "1")
        .with_identity_paths(vec![Path::parse("_id")?, Path::parse("iduid")?])
        .with_array_identities(array_identities);

    let configuration: HookConfiguration = serde_json::from_value(json!({
        "hook": "notification",
        "watchProjection": [
            {"field": "personalInfo", "include": true, "recursive": true},
            {"field": "sites", "include": true, "recursive": true}
        ],
        "includeProjection": [
            {"field": "login", "include": true, "recursive": false},
            {"field": "sites.*.siteType", "include": true, "recursive": false}
        ]
    }))?;

    let hook = NotificationHook::new("notification", Arc::new(PrintingSubmitter));

    let inserted = json!({
        "_id": "123",
        "iduid": "345",
        "login": "bserdar",
        "personalInfo": {"firstName": "Burak", "company": "Initrode"},
        "sites": [
            {"_id": "s1", "siteType": "shipping", "city": "Hartford"},
            {"_id": "s2", "siteType": "billing", "city": "Boston"}
        ]
    });

    println!("-- insert --");
    let produced = hook.process(
        &metadata,
        Some(&configuration),
        &[HookDoc::new(
            None,
            Some(inserted.clone()),
            CrudOperation::Insert,
            "jdoe",
            Utc::now(),
        )],
    )?;
    for entity in &produced {
        print_entity(entity);
    }

    let mut updated = inserted.clone();
    updated["personalInfo"]["company"] = json!("Globex");
    updated["sites"][0]["siteType"] = json!("billing");

    println!("-- update: company and siteType changed --");
    let produced = hook.process(
        &metadata,
        Some(&configuration),
        &[HookDoc::new(
            Some(inserted.clone()),
            Some(updated),
            CrudOperation::Update,
            "jdoe",
            Utc::now(),
        )],
    )?;
    for entity in &produced {
        print_entity(entity);
    }

    let mut unwatched = inserted.clone();
    unwatched["login"] = json!("bserdar2");

    println!("-- update: unwatched field changed --");
    let produced = hook.process(
        &metadata,
        Some(&configuration),
        &[HookDoc::new(
            Some(inserted),
            Some(unwatched),
            CrudOperation::Update,
            "jdoe",
            Utc::now(),
        )],
    )?;
    println!("  notifications produced: {}", produced.len());

    Ok(())
}
