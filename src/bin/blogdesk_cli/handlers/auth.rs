#![deny(clippy::all, clippy::pedantic)]

use blogdesk::api_types::Credentials;
use blogdesk::application::forms::{SubmitForm, sign_in_form, sign_up_form};

use crate::args::{AuthCmd, CredentialArgs};
use crate::client::{CliError, Ctx};
use crate::io::read_file;
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: AuthCmd) -> Result<(), CliError> {
    match cmd {
        AuthCmd::SignIn(args) => {
            let form = sign_in_form(ctx.gateway.clone());
            submit(form, args).await
        }
        AuthCmd::SignUp(args) => {
            let form = sign_up_form(ctx.gateway.clone());
            submit(form, args).await
        }
    }
}

pub(crate) fn credentials(args: CredentialArgs) -> Result<Credentials, CliError> {
    let password = if let Some(path) = &args.password_file {
        read_file(path)?.trim_end_matches(['\r', '\n']).to_string()
    } else {
        args.password_env.ok_or_else(|| {
            CliError::InvalidInput(
                "password is required (use --password-file or BLOGDESK_PASSWORD)".into(),
            )
        })?
    };
    Ok(Credentials {
        username: args.username,
        password,
    })
}

async fn submit(
    mut form: SubmitForm<Credentials>,
    args: CredentialArgs,
) -> Result<(), CliError> {
    form.set_draft(credentials(args)?);
    form.submit().await?;
    if let Some(message) = form.error_message() {
        return Err(CliError::Failed(message));
    }
    print_json(&form.response())
}
