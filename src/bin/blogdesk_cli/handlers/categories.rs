#![deny(clippy::all, clippy::pedantic)]

use blogdesk::api_types::Category;
use blogdesk::application::browser::fetch_category_names;
use blogdesk::application::forms::add_category_form;
use serde_json::Value;

use super::{ensure_ok, open_editor};
use crate::args::CategoriesCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_json;

const LIST_FAILED: &str = "Failed to load data";

pub async fn handle(ctx: &Ctx, cmd: CategoriesCmd) -> Result<(), CliError> {
    match cmd {
        CategoriesCmd::List => list(ctx).await,
        CategoriesCmd::Get { id } => get(ctx, &id).await,
        CategoriesCmd::Create { name } => create(ctx, name).await,
        CategoriesCmd::Update { id, name } => update(ctx, &id, name).await,
        CategoriesCmd::Delete { id } => delete(ctx, &id).await,
    }
}

async fn list(ctx: &Ctx) -> Result<(), CliError> {
    let names = fetch_category_names(ctx.gateway.as_ref())
        .await
        .map_err(|_| CliError::Failed(LIST_FAILED))?;
    print_json(&names)
}

async fn get(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let session = open_editor::<Category>(ctx, id).await?;
    print_json(&session.entity())
}

async fn create(ctx: &Ctx, name: String) -> Result<(), CliError> {
    let mut form = add_category_form(ctx.gateway.clone());
    form.draft_mut().name = name;
    form.submit().await?;
    if let Some(message) = form.error_message() {
        return Err(CliError::Failed(message));
    }
    print_json(&form.response())
}

async fn update(ctx: &Ctx, id: &str, name: String) -> Result<(), CliError> {
    let mut session = open_editor::<Category>(ctx, id).await?;
    session.edit_field("name", Value::String(name))?;
    session.submit().await?;
    ensure_ok(&session)?;
    print_json(&session.entity())
}

async fn delete(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let mut session = open_editor::<Category>(ctx, id).await?;
    session.delete().await?;
    ensure_ok(&session)?;
    println!("deleted");
    Ok(())
}
