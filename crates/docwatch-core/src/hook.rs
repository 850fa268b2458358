//! The change-notification hook: batch entry point and submission seam.
//!
//! [`NotificationHook::process`] takes the metadata, the stored hook
//! configuration, and the batch of write events, and produces one
//! notification per document whose watched fields changed. Each produced
//! notification is handed to the injected [`NotificationSubmitter`]
//! before processing continues.

use crate::assemble::build_if_changed;
use crate::config::{HookConfiguration, NotificationHookConfiguration};
use crate::errors::{DocWatchError, Result};
use crate::metadata::EntityMetadata;
use crate::notification::NotificationEntity;
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{DateTime, Utc};
use docwatch_core_types::{RunId, Sensitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// The write kind reported alongside a document pair
///
/// Finds never notify; they reach the hook because the surrounding store
/// invokes all hooks uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudOperation {
    Find,
    Insert,
    Update,
}

/// One write event handed to the hook
#[derive(Debug, Clone)]
pub struct HookDoc {
    /// Document before the write, absent on insert
    pub pre: Option<Value>,
    /// Document after the write, absent only on unsupported deletes
    pub post: Option<Value>,
    pub operation: CrudOperation,
    /// Principal that performed the write
    pub who: Sensitive<String>,
    /// When the write happened
    pub when: DateTime<Utc>,
}

impl HookDoc {
    pub fn new(
        pre: Option<Value>,
        post: Option<Value>,
        operation: CrudOperation,
        who: impl Into<String>,
        when: DateTime<Utc>,
    ) -> Self {
        Self {
            pre,
            post,
            operation,
            who: Sensitive::new(who.into()),
            when,
        }
    }
}

/// Outcome reported by the submission collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub errors: Vec<String>,
    pub data_errors: Vec<String>,
}

impl SubmissionReport {
    /// An accepting report
    pub fn accepted() -> Self {
        Self::default()
    }

    pub fn is_rejected(&self) -> bool {
        !self.errors.is_empty() || !self.data_errors.is_empty()
    }
}

/// Accepts assembled notifications for persistence
///
/// Implementations are injected at hook construction, so the hook itself
/// stays a pure function of its inputs plus this seam.
pub trait NotificationSubmitter: Send + Sync {
    fn submit(&self, entity: &NotificationEntity) -> SubmissionReport;
}

/// The notification hook
pub struct NotificationHook {
    name: String,
    submitter: Arc<dyn NotificationSubmitter>,
}

impl NotificationHook {
    pub fn new(name: impl Into<String>, submitter: Arc<dyn NotificationSubmitter>) -> Self {
        Self {
            name: name.into(),
            submitter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process a batch of write events against one entity type
    ///
    /// A missing configuration watches everything and includes nothing
    /// beyond identity fields. Comparison failures are logged and skip the
    /// affected document only; the rest of the batch still runs.
    ///
    /// # Errors
    ///
    /// - `DocWatchError::WrongConfigurationKind` if the stored
    ///   configuration belongs to some other hook
    /// - `DocWatchError::SubmissionRejected` if the submitter rejects a
    ///   notification, carrying the rejected entity and the reported errors
    pub fn process(
        &self,
        metadata: &EntityMetadata,
        configuration: Option<&HookConfiguration>,
        docs: &[HookDoc],
    ) -> Result<Vec<NotificationEntity>> {
        let default_config;
        let config = match configuration {
            None => {
                tracing::warn!(
                    hook = %self.name,
                    entity_name = %metadata.entity_name,
                    "no hook configuration provided, watching all fields and including only ids"
                );
                default_config = NotificationHookConfiguration::default();
                &default_config
            }
            Some(HookConfiguration::Notification(config)) => config,
            Some(HookConfiguration::Unrecognized { hook }) => {
                return Err(DocWatchError::WrongConfigurationKind {
                    hook: self.name.clone(),
                    found: hook.clone(),
                });
            }
        };

        let run_id = RunId::new();
        let started = Instant::now();
        log_op_start!(
            "process_hook",
            run_id = %run_id,
            hook = %self.name,
            entity_name = %metadata.entity_name,
            entity_version = %metadata.entity_version,
            doc_count = docs.len()
        );

        let mut produced = Vec::new();
        for (doc_index, doc) in docs.iter().enumerate() {
            let post = match (&doc.operation, &doc.post) {
                (CrudOperation::Find, _) | (_, None) => {
                    tracing::debug!(
                        run_id = %run_id,
                        doc_index,
                        operation = ?doc.operation,
                        "skipping document without a comparable post image"
                    );
                    continue;
                }
                (_, Some(post)) => post,
            };

            let doc_started = Instant::now();
            let entity = match build_if_changed(
                metadata,
                config,
                doc.pre.as_ref(),
                post,
                doc.who.expose(),
                doc.when,
            ) {
                Ok(Some(entity)) => entity,
                Ok(None) => {
                    tracing::debug!(run_id = %run_id, doc_index, "no watched change");
                    continue;
                }
                Err(err) => {
                    log_op_error!(
                        "compare_docs",
                        err,
                        duration_ms = doc_started.elapsed().as_millis() as u64,
                        run_id = %run_id,
                        doc_index
                    );
                    continue;
                }
            };

            let report = self.submitter.submit(&entity);
            if report.is_rejected() {
                return Err(DocWatchError::SubmissionRejected {
                    entity: Box::new(entity),
                    errors: report.errors,
                    data_errors: report.data_errors,
                });
            }
            produced.push(entity);
        }

        log_op_end!(
            "process_hook",
            duration_ms = started.elapsed().as_millis() as u64,
            run_id = %run_id,
            notification_count = produced.len()
        );
        Ok(produced)
    }
}
