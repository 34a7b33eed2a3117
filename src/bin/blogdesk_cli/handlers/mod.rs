#![deny(clippy::all, clippy::pedantic)]

pub mod analytics;
pub mod auth;
pub mod categories;
pub mod posts;
pub mod uploads;

use blogdesk::api_types::EntityId;
use blogdesk::application::editor::{EditorSession, EditorStatus};
use blogdesk::domain::entities::Entity;

use crate::client::{CliError, Ctx};

/// Open an editor session for `id` and wait for the record to load.
pub(crate) async fn open_editor<E: Entity>(
    ctx: &Ctx,
    id: &str,
) -> Result<EditorSession<E>, CliError> {
    let entity_id = EntityId::from(id);
    if entity_id.is_blank() {
        return Err(CliError::InvalidInput("id must not be empty".into()));
    }
    let mut session = EditorSession::new(ctx.gateway.clone(), entity_id);
    session.load().await?;
    ensure_ok(&session)?;
    Ok(session)
}

/// Surface the session's fixed error message, if it is in the error state.
pub(crate) fn ensure_ok<E: Entity>(session: &EditorSession<E>) -> Result<(), CliError> {
    match (session.status(), session.error_message()) {
        (EditorStatus::Error, Some(message)) => Err(CliError::Failed(message)),
        _ => Ok(()),
    }
}
