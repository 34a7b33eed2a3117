//! Load/edit/update/delete workflow for a single record.
//!
//! Network work is split into a `begin_*` step that updates the session and
//! hands back an owned pending operation, and a `complete_*` step that applies
//! the outcome. Every pending operation carries the generation it was issued
//! under; a completion whose generation no longer matches is dropped, which is
//! what keeps a slow response for an old identifier from overwriting newer
//! state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use blogdesk_api_types::EntityId;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::application::gateway::{Gateway, GatewayError, decode, encode};
use crate::domain::entities::Entity;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Loading,
    Ready,
    Saving,
    Deleted,
    Error,
}

/// Reasons an editor action was refused. A refused action leaves the session
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("another request is still in flight")]
    Busy,
    #[error("the record has been deleted")]
    Deleted,
    #[error("the record has not been loaded")]
    NotLoaded,
    #[error("field `{0}` cannot be edited")]
    ImmutableField(String),
    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Mutation currently awaiting its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    Save,
    Delete,
}

/// Editing state bound to one record identifier.
pub struct EditorSession<E: Entity> {
    gateway: Arc<dyn Gateway>,
    entity_id: EntityId,
    generation: u64,
    in_flight: Option<InFlight>,
    entity: Option<E>,
    status: EditorStatus,
    error: Option<&'static str>,
    saved: bool,
}

impl<E: Entity> EditorSession<E> {
    /// Create a session in `loading` status; call [`Self::begin_load`] or
    /// [`Self::load`] to fetch the record.
    pub fn new(gateway: Arc<dyn Gateway>, entity_id: EntityId) -> Self {
        Self {
            gateway,
            entity_id,
            generation: next_generation(),
            in_flight: None,
            entity: None,
            status: EditorStatus::Loading,
            error: None,
            saved: false,
        }
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    /// Whether the last update or delete succeeded.
    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, EditorStatus::Loading | EditorStatus::Saving)
    }

    /// Start (or restart) fetching the record. Any draft is discarded.
    pub fn begin_load(&mut self) -> Result<PendingLoad<E>, EditorError> {
        match self.status {
            EditorStatus::Deleted => return Err(EditorError::Deleted),
            EditorStatus::Saving => return Err(EditorError::Busy),
            EditorStatus::Loading | EditorStatus::Ready | EditorStatus::Error => {}
        }

        self.generation = next_generation();
        self.in_flight = None;
        self.entity = None;
        self.status = EditorStatus::Loading;
        self.error = None;
        self.saved = false;
        debug!(kind = E::KIND, id = %self.entity_id, "loading record");

        Ok(PendingLoad {
            gateway: Arc::clone(&self.gateway),
            entity_id: self.entity_id.clone(),
            generation: self.generation,
            _entity: std::marker::PhantomData,
        })
    }

    /// Apply a finished load. Returns `false` when the outcome was stale and
    /// ignored.
    pub fn complete_load(&mut self, outcome: LoadOutcome<E>) -> bool {
        if !self.is_current(&outcome.entity_id, outcome.generation) {
            debug!(kind = E::KIND, id = %outcome.entity_id, "discarding stale load");
            return false;
        }

        match outcome.result {
            Ok(entity) if entity.id().same_as(&self.entity_id) => {
                self.entity = Some(entity);
                self.status = EditorStatus::Ready;
                self.error = None;
            }
            Ok(entity) => {
                debug!(
                    kind = E::KIND,
                    expected = %self.entity_id,
                    received = %entity.id(),
                    "load returned a different record"
                );
                self.fail_load();
            }
            Err(_) => self.fail_load(),
        }
        true
    }

    /// Merge one field into the local draft. No request is made.
    pub fn edit_field(&mut self, field: &str, value: Value) -> Result<(), EditorError> {
        self.ensure_editable()?;
        if field == "id" {
            return Err(EditorError::ImmutableField(field.to_string()));
        }
        let Some(current) = self.entity.as_ref() else {
            return Err(EditorError::NotLoaded);
        };

        let invalid = |reason: String| EditorError::InvalidField {
            field: field.to_string(),
            reason,
        };
        let mut draft = serde_json::to_value(current).map_err(|err| invalid(err.to_string()))?;
        let Some(object) = draft.as_object_mut() else {
            return Err(invalid("record is not a JSON object".to_string()));
        };
        object.insert(field.to_string(), value);
        let updated: E = serde_json::from_value(draft).map_err(|err| invalid(err.to_string()))?;

        self.entity = Some(updated);
        Ok(())
    }

    /// Send the current draft as an update.
    pub fn begin_submit(&mut self) -> Result<PendingSave<E>, EditorError> {
        self.ensure_editable()?;
        let Some(draft) = self.entity.clone() else {
            return Err(EditorError::NotLoaded);
        };

        self.generation = next_generation();
        self.in_flight = Some(InFlight::Save);
        self.status = EditorStatus::Saving;
        self.error = None;
        self.saved = false;
        debug!(kind = E::KIND, id = %self.entity_id, "submitting update");

        Ok(PendingSave {
            gateway: Arc::clone(&self.gateway),
            entity_id: self.entity_id.clone(),
            generation: self.generation,
            draft,
        })
    }

    pub fn complete_save(&mut self, outcome: SaveOutcome) -> bool {
        if !self.is_current(&outcome.entity_id, outcome.generation) {
            debug!(kind = E::KIND, id = %outcome.entity_id, "discarding stale update");
            return false;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(()) => {
                self.status = EditorStatus::Ready;
                self.saved = true;
            }
            Err(_) => {
                self.status = EditorStatus::Error;
                self.error = Some(E::MESSAGES.update_failed);
            }
        }
        true
    }

    /// Request deletion. Allowed while an update is in flight, whose outcome
    /// is then ignored; refused while another delete is pending.
    pub fn begin_delete(&mut self) -> Result<PendingDelete, EditorError> {
        if self.in_flight == Some(InFlight::Delete) {
            return Err(EditorError::Busy);
        }
        match self.status {
            EditorStatus::Deleted => return Err(EditorError::Deleted),
            EditorStatus::Loading => return Err(EditorError::NotLoaded),
            EditorStatus::Ready | EditorStatus::Saving | EditorStatus::Error => {}
        }
        if self.entity.is_none() {
            return Err(EditorError::NotLoaded);
        }

        self.generation = next_generation();
        self.in_flight = Some(InFlight::Delete);
        self.status = EditorStatus::Saving;
        self.error = None;
        self.saved = false;
        debug!(kind = E::KIND, id = %self.entity_id, "deleting record");

        Ok(PendingDelete {
            gateway: Arc::clone(&self.gateway),
            path: E::delete_path(&self.entity_id),
            entity_id: self.entity_id.clone(),
            generation: self.generation,
        })
    }

    pub fn complete_delete(&mut self, outcome: DeleteOutcome) -> bool {
        if !self.is_current(&outcome.entity_id, outcome.generation) {
            debug!(kind = E::KIND, id = %outcome.entity_id, "discarding stale delete");
            return false;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(()) => {
                self.entity = None;
                self.status = EditorStatus::Deleted;
                self.saved = true;
            }
            Err(_) => {
                self.status = EditorStatus::Error;
                self.error = Some(E::MESSAGES.delete_failed);
            }
        }
        true
    }

    pub async fn load(&mut self) -> Result<(), EditorError> {
        let pending = self.begin_load()?;
        let outcome = pending.run().await;
        self.complete_load(outcome);
        Ok(())
    }

    pub async fn submit(&mut self) -> Result<(), EditorError> {
        let pending = self.begin_submit()?;
        let outcome = pending.run().await;
        self.complete_save(outcome);
        Ok(())
    }

    pub async fn delete(&mut self) -> Result<(), EditorError> {
        let pending = self.begin_delete()?;
        let outcome = pending.run().await;
        self.complete_delete(outcome);
        Ok(())
    }

    fn is_current(&self, entity_id: &EntityId, generation: u64) -> bool {
        generation == self.generation && *entity_id == self.entity_id
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        match self.status {
            EditorStatus::Deleted => Err(EditorError::Deleted),
            EditorStatus::Saving => Err(EditorError::Busy),
            EditorStatus::Loading => Err(EditorError::NotLoaded),
            EditorStatus::Ready | EditorStatus::Error => Ok(()),
        }
    }

    fn fail_load(&mut self) {
        self.entity = None;
        self.status = EditorStatus::Error;
        self.error = Some(E::MESSAGES.load_failed);
    }
}

pub struct PendingLoad<E: Entity> {
    gateway: Arc<dyn Gateway>,
    entity_id: EntityId,
    generation: u64,
    _entity: std::marker::PhantomData<fn() -> E>,
}

pub struct LoadOutcome<E> {
    entity_id: EntityId,
    generation: u64,
    result: Result<E, GatewayError>,
}

impl<E: Entity> PendingLoad<E> {
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub async fn run(self) -> LoadOutcome<E> {
        let path = E::get_path(&self.entity_id);
        let result = match self.gateway.request(Method::GET, &path, None).await {
            Ok(value) => decode::<E>(value),
            Err(err) => Err(err),
        };
        LoadOutcome {
            entity_id: self.entity_id,
            generation: self.generation,
            result,
        }
    }
}

pub struct PendingSave<E: Entity> {
    gateway: Arc<dyn Gateway>,
    entity_id: EntityId,
    generation: u64,
    draft: E,
}

pub struct SaveOutcome {
    entity_id: EntityId,
    generation: u64,
    result: Result<(), GatewayError>,
}

impl<E: Entity> PendingSave<E> {
    pub async fn run(self) -> SaveOutcome {
        let path = E::update_path(&self.entity_id);
        let result = match encode(&self.draft) {
            Ok(body) => self
                .gateway
                .request(Method::PUT, &path, Some(body))
                .await
                .map(|_| ()),
            Err(err) => Err(err),
        };
        SaveOutcome {
            entity_id: self.entity_id,
            generation: self.generation,
            result,
        }
    }
}

pub struct PendingDelete {
    gateway: Arc<dyn Gateway>,
    path: String,
    entity_id: EntityId,
    generation: u64,
}

pub struct DeleteOutcome {
    entity_id: EntityId,
    generation: u64,
    result: Result<(), GatewayError>,
}

impl PendingDelete {
    pub async fn run(self) -> DeleteOutcome {
        let result = self
            .gateway
            .request(Method::DELETE, &self.path, None)
            .await
            .map(|_| ());
        DeleteOutcome {
            entity_id: self.entity_id,
            generation: self.generation,
            result,
        }
    }
}

/// Owns at most one editor session, keyed by a caller-supplied identifier.
///
/// A blank identifier tears the session down; a new identifier replaces it.
pub struct EditorHost<E: Entity> {
    gateway: Arc<dyn Gateway>,
    session: Option<EditorSession<E>>,
}

impl<E: Entity> EditorHost<E> {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&EditorSession<E>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut EditorSession<E>> {
        self.session.as_mut()
    }

    /// Point the host at `raw`. Returns the load to run when a new session
    /// was started.
    pub fn set_identifier(&mut self, raw: &str) -> Option<PendingLoad<E>> {
        let entity_id = EntityId::from(raw);
        if entity_id.is_blank() {
            self.clear();
            return None;
        }
        if self
            .session
            .as_ref()
            .is_some_and(|session| *session.entity_id() == entity_id)
        {
            return None;
        }

        let mut session = EditorSession::new(Arc::clone(&self.gateway), entity_id);
        let pending = session.begin_load().ok();
        self.session = Some(session);
        pending
    }

    pub fn clear(&mut self) {
        self.session = None;
    }

    /// Route a load outcome to the current session, if it still wants it.
    pub fn complete_load(&mut self, outcome: LoadOutcome<E>) -> bool {
        match self.session.as_mut() {
            Some(session) => session.complete_load(outcome),
            None => false,
        }
    }

    pub async fn select(&mut self, raw: &str) {
        if let Some(pending) = self.set_identifier(raw) {
            let outcome = pending.run().await;
            self.complete_load(outcome);
        }
    }
}
