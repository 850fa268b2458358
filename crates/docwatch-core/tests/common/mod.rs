use chrono::{DateTime, TimeZone, Utc};
use docwatch_core::hook::{CrudOperation, HookDoc, NotificationSubmitter, SubmissionReport};
use docwatch_core::notification::NotificationEntity;
use docwatch_core::{ArrayIdentityMap, EntityMetadata, Path};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Metadata for the sample `user` entity: two identity fields and
/// identity-matched `sites` array elements
#[allow(dead_code)]
pub fn user_metadata() -> EntityMetadata {
    let mut ids = ArrayIdentityMap::new();
    ids.insert(
        Path::parse("sites").unwrap(),
        vec![Path::parse("_id").unwrap()],
    );
    EntityMetadata::new("user", "1")
        .with_identity_paths(vec![
            Path::parse("_id").unwrap(),
            Path::parse("iduid").unwrap(),
        ])
        .with_array_identities(ids)
}

/// A representative user document with scalars, a nested object, and an
/// identity-carrying array
#[allow(dead_code)]
pub fn user_doc() -> Value {
    json!({
        "_id": "123",
        "iduid": "345",
        "login": "bserdar",
        "personalInfo": {
            "firstName": "Burak",
            "company": "Red Hat"
        },
        "sites": [
            {"_id": "s1", "siteType": "shipping", "city": "Hartford"},
            {"_id": "s2", "siteType": "billing", "city": "Boston"}
        ]
    })
}

/// Fixed request date so assertions stay deterministic
#[allow(dead_code)]
pub fn request_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn insert_doc(post: Value) -> HookDoc {
    HookDoc::new(None, Some(post), CrudOperation::Insert, "jdoe", request_date())
}

#[allow(dead_code)]
pub fn update_doc(pre: Value, post: Value) -> HookDoc {
    HookDoc::new(
        Some(pre),
        Some(post),
        CrudOperation::Update,
        "jdoe",
        request_date(),
    )
}

/// Submitter that records everything it is handed and answers with a
/// preconfigured report
pub struct RecordingSubmitter {
    submitted: Mutex<Vec<NotificationEntity>>,
    report: SubmissionReport,
}

impl RecordingSubmitter {
    #[allow(dead_code)]
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            submitted: Mutex::new(Vec::new()),
            report: SubmissionReport::accepted(),
        })
    }

    #[allow(dead_code)]
    pub fn rejecting(errors: Vec<String>, data_errors: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            submitted: Mutex::new(Vec::new()),
            report: SubmissionReport {
                errors,
                data_errors,
            },
        })
    }

    #[allow(dead_code)]
    pub fn submitted(&self) -> Vec<NotificationEntity> {
        self.submitted.lock().unwrap().clone()
    }
}

impl NotificationSubmitter for RecordingSubmitter {
    fn submit(&self, entity: &NotificationEntity) -> SubmissionReport {
        self.submitted.lock().unwrap().push(entity.clone());
        self.report.clone()
    }
}
