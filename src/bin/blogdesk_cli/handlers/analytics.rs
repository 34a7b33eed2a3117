#![deny(clippy::all, clippy::pedantic)]

use blogdesk::application::browser::fetch_analytics;

use crate::client::{CliError, Ctx};
use crate::print::print_json;

const LOAD_FAILED: &str = "Failed to load data";

pub async fn handle(ctx: &Ctx) -> Result<(), CliError> {
    let analytics = fetch_analytics(ctx.gateway.as_ref())
        .await
        .map_err(|_| CliError::Failed(LOAD_FAILED))?;
    print_json(&analytics)
}
