#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;

use blogdesk::application::uploads::{UPLOAD_FAILED, upload_image};

use crate::args::UploadsCmd;
use crate::client::{CliError, Ctx};
use crate::io::read_upload;

pub async fn handle(ctx: &Ctx, cmd: UploadsCmd) -> Result<(), CliError> {
    match cmd {
        UploadsCmd::Image { file } => image(ctx, &file).await,
    }
}

async fn image(ctx: &Ctx, path: &Path) -> Result<(), CliError> {
    let (file_name, bytes) = read_upload(path).await?;

    let url = upload_image(ctx.gateway.as_ref(), &file_name, bytes)
        .await
        .map_err(|_| CliError::Failed(UPLOAD_FAILED))?;
    println!("{url}");
    Ok(())
}
