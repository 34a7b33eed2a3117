//! Command-line surface for `blogdesk-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use blogdesk::config::ConfigArgs;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blogdesk-cli", version, about = "Blogdesk admin console", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in or register
    Auth(AuthArgs),
    /// Post management (list/get/create/update/delete)
    Posts(PostsArgs),
    /// Category management
    Categories(CategoriesArgs),
    /// Aggregate post counters
    Analytics,
    /// Image uploads for post bodies
    Uploads(UploadsArgs),
}

#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthCmd,
}

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
    /// Sign in with an existing account
    SignIn(CredentialArgs),
    /// Register a new account
    SignUp(CredentialArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CredentialArgs {
    #[arg(long)]
    pub username: String,

    /// Path to a file containing the password (takes precedence over env)
    #[arg(long)]
    pub password_file: Option<PathBuf>,

    /// Password from env (CLI flag intentionally disabled to avoid shell history leaks)
    #[arg(hide = true, env = "BLOGDESK_PASSWORD")]
    pub password_env: Option<String>,
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// Show one page of posts, optionally searched and filtered
    List {
        /// Case-insensitive match on title or description
        #[arg(long)]
        search: Option<String>,
        /// Exact category name, or "All"
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Get a post by id
    Get { id: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        #[arg(long)]
        category: String,
        /// Cover image; switches the request to a multipart form
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },
    /// Load a post, apply field edits, and save it
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        description_file: Option<PathBuf>,
        #[arg(long)]
        category: Option<String>,
        /// Arbitrary field edit. The value is parsed as JSON when possible and
        /// sent as text when the field only takes strings (`title=123`)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Delete a post
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: CategoriesCmd,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCmd {
    /// List category names
    List,
    /// Get a category by id
    Get { id: String },
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
    },
    /// Rename a category
    Update {
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a category
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct UploadsArgs {
    #[command(subcommand)]
    pub action: UploadsCmd,
}

#[derive(Subcommand, Debug)]
pub enum UploadsCmd {
    /// Upload an image and print the URL to embed
    Image { file: PathBuf },
}
