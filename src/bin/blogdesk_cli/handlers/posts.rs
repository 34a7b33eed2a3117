#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use blogdesk::api_types::Post;
use blogdesk::application::browser::{CategoryFilter, CollectionBrowser};
use blogdesk::application::editor::{EditorError, EditorSession};
use blogdesk::application::forms::AddPostForm;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::{ensure_ok, open_editor};
use crate::args::PostsCmd;
use crate::client::{CliError, Ctx};
use crate::io::{Assignment, parse_assignment, read_opt_value, read_upload, read_value};
use crate::print::print_json;

const EMPTY_LIST: &str = "No posts available";

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List {
            search,
            category,
            page,
        } => list(ctx, search.as_deref(), category.as_deref(), page).await,
        PostsCmd::Get { id } => get(ctx, &id).await,
        PostsCmd::Create {
            title,
            description,
            description_file,
            category,
            image,
        } => {
            let input = PostCreateInput {
                title,
                description,
                description_file,
                category,
                image,
            };
            create(ctx, input).await
        }
        PostsCmd::Update {
            id,
            title,
            description,
            description_file,
            category,
            set,
        } => {
            let input = PostUpdateInput {
                title,
                description,
                description_file,
                category,
                set,
            };
            update(ctx, &id, input).await
        }
        PostsCmd::Delete { id } => delete(ctx, &id).await,
    }
}

struct PostCreateInput {
    title: String,
    description: Option<String>,
    description_file: Option<PathBuf>,
    category: String,
    image: Option<PathBuf>,
}

struct PostUpdateInput {
    title: Option<String>,
    description: Option<String>,
    description_file: Option<PathBuf>,
    category: Option<String>,
    set: Vec<String>,
}

impl PostUpdateInput {
    fn into_edits(self) -> Result<Vec<Assignment>, CliError> {
        let mut edits = Vec::new();
        if let Some(title) = self.title {
            edits.push(Assignment::text("title", title));
        }
        if let Some(description) = read_opt_value(self.description, self.description_file)? {
            edits.push(Assignment::text("description", description));
        }
        if let Some(category) = self.category {
            edits.push(Assignment::text("category", category));
        }
        for raw in &self.set {
            edits.push(parse_assignment(raw)?);
        }
        Ok(edits)
    }
}

#[derive(Serialize)]
struct PostListView<'a> {
    items: Vec<&'a Post>,
    page: usize,
    page_count: usize,
    page_size: usize,
    filtered: usize,
    total: Option<u64>,
    query: &'a str,
    category: &'a CategoryFilter,
    categories: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

async fn list(
    ctx: &Ctx,
    search: Option<&str>,
    category: Option<&str>,
    page: usize,
) -> Result<(), CliError> {
    let mut browser: CollectionBrowser<Post> =
        CollectionBrowser::new(ctx.gateway.clone(), ctx.browser.page_size);
    browser.load().await;
    if let Some(message) = browser.error_message() {
        return Err(CliError::Failed(message));
    }

    if let Some(query) = search {
        browser.set_query(query);
    }
    if let Some(category) = category {
        browser.set_category_filter(category);
    }
    browser.set_page(page);

    let items = browser.visible();
    let message = items.is_empty().then_some(EMPTY_LIST);
    let view = PostListView {
        items,
        page: browser.page(),
        page_count: browser.page_count(),
        page_size: browser.page_size().get(),
        filtered: browser.filtered_len(),
        total: browser.total(),
        query: browser.query(),
        category: browser.category_filter(),
        categories: browser.categories(),
        message,
    };
    print_json(&view)
}

async fn get(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let session = open_editor::<Post>(ctx, id).await?;
    print_json(&session.entity())
}

async fn create(ctx: &Ctx, input: PostCreateInput) -> Result<(), CliError> {
    let PostCreateInput {
        title,
        description,
        description_file,
        category,
        image,
    } = input;
    let description = read_value(description, description_file)?;

    let mut add = AddPostForm::new(ctx.gateway.clone());
    if let Some(path) = image.as_deref() {
        let (file_name, bytes) = read_upload(path).await?;
        add.attach_image(&file_name, bytes);
    }
    add.load_categories().await;
    if !add.categories().is_empty() && !add.categories().contains(&category) {
        warn!(category = %category, "category is not among the known options");
    }

    let draft = add.form.draft_mut();
    draft.title = title;
    draft.description = description;
    draft.category = category;
    add.submit().await?;

    if let Some(message) = add.form.error_message() {
        return Err(CliError::Failed(message));
    }
    print_json(&add.form.response())
}

async fn update(ctx: &Ctx, id: &str, input: PostUpdateInput) -> Result<(), CliError> {
    let edits = input.into_edits()?;
    if edits.is_empty() {
        return Err(CliError::InvalidInput("no fields to update".into()));
    }

    let mut session = open_editor::<Post>(ctx, id).await?;
    for edit in edits {
        apply_edit(&mut session, edit)?;
    }
    session.submit().await?;
    ensure_ok(&session)?;

    print_json(&session.entity())
}

/// Apply one edit. A typed value the record rejects is retried as text.
fn apply_edit(session: &mut EditorSession<Post>, edit: Assignment) -> Result<(), CliError> {
    let Assignment { field, value, raw } = edit;
    if value.is_string() {
        return Ok(session.edit_field(&field, value)?);
    }
    match session.edit_field(&field, value) {
        Err(EditorError::InvalidField { .. }) => session.edit_field(&field, Value::String(raw))?,
        other => other?,
    }
    Ok(())
}

async fn delete(ctx: &Ctx, id: &str) -> Result<(), CliError> {
    let mut session = open_editor::<Post>(ctx, id).await?;
    session.delete().await?;
    ensure_ok(&session)?;
    println!("deleted");
    Ok(())
}
