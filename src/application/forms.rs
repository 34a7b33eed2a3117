//! Single-request forms: sign in, sign up, add post, add category.

use std::sync::Arc;

use blogdesk_api_types::{CategoryDraft, Credentials, PostDraft};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::browser::fetch_category_names;
use crate::application::gateway::{FilePart, Gateway, GatewayError, MultipartBody, encode};

/// Endpoint and fixed failure message of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRoute {
    pub path: &'static str,
    pub failure: &'static str,
}

pub const SIGN_IN: FormRoute = FormRoute {
    path: "auth/log",
    failure: "Failed to Login.",
};

pub const SIGN_UP: FormRoute = FormRoute {
    path: "auth/register",
    failure: "Failed to Register User.",
};

pub const ADD_POST: FormRoute = FormRoute {
    path: "posts/addpost",
    failure: "Failed to submit data. Please try again.",
};

pub const ADD_CATEGORY: FormRoute = FormRoute {
    path: "category/addcategory",
    failure: "Failed to fetch the Post Category.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a submission is already in flight")]
    Busy,
}

/// Draft plus feedback for a form that POSTs its draft once.
pub struct SubmitForm<D> {
    gateway: Arc<dyn Gateway>,
    route: FormRoute,
    draft: D,
    busy: bool,
    error: Option<&'static str>,
    success: bool,
    response: Option<Value>,
}

impl<D: Serialize + Default> SubmitForm<D> {
    pub fn new(gateway: Arc<dyn Gateway>, route: FormRoute) -> Self {
        Self {
            gateway,
            route,
            draft: D::default(),
            busy: false,
            error: None,
            success: false,
            response: None,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: D) {
        self.draft = draft;
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    pub fn succeeded(&self) -> bool {
        self.success
    }

    /// Body of the last successful response.
    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    /// Send the draft. On success the draft is reset; on failure it is kept
    /// and the route's fixed message is shown.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        self.start()?;
        let result = match encode(&self.draft) {
            Ok(body) => {
                self.gateway
                    .request(Method::POST, self.route.path, Some(body))
                    .await
            }
            Err(err) => Err(err),
        };
        self.finish(result);
        Ok(())
    }

    fn start(&mut self) -> Result<(), FormError> {
        if self.busy {
            return Err(FormError::Busy);
        }
        self.busy = true;
        self.error = None;
        self.success = false;
        self.response = None;
        debug!(path = self.route.path, "submitting form");
        Ok(())
    }

    fn finish(&mut self, result: Result<Value, GatewayError>) {
        self.busy = false;
        match result {
            Ok(value) => {
                self.success = true;
                self.response = Some(value);
                self.draft = D::default();
            }
            Err(_) => self.error = Some(self.route.failure),
        }
    }
}

pub fn sign_in_form(gateway: Arc<dyn Gateway>) -> SubmitForm<Credentials> {
    SubmitForm::new(gateway, SIGN_IN)
}

pub fn sign_up_form(gateway: Arc<dyn Gateway>) -> SubmitForm<Credentials> {
    SubmitForm::new(gateway, SIGN_UP)
}

pub fn add_category_form(gateway: Arc<dyn Gateway>) -> SubmitForm<CategoryDraft> {
    SubmitForm::new(gateway, ADD_CATEGORY)
}

const POST_IMAGE_FIELD: &str = "image";

/// Add-post form together with the category options it offers and an
/// optional cover image.
pub struct AddPostForm {
    pub form: SubmitForm<PostDraft>,
    categories: Vec<String>,
    image: Option<FilePart>,
}

impl AddPostForm {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            form: SubmitForm::new(gateway, ADD_POST),
            categories: Vec::new(),
            image: None,
        }
    }

    pub fn attach_image(&mut self, file_name: &str, bytes: Vec<u8>) {
        self.image = Some(FilePart {
            field: POST_IMAGE_FIELD,
            file_name: file_name.to_string(),
            bytes,
        });
    }

    pub fn image_name(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.file_name.as_str())
    }

    /// Send the post: as JSON, or as a multipart form when an image is
    /// attached. Success clears the draft and the image.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        let Some(image) = self.image.clone() else {
            return self.form.submit().await;
        };

        self.form.start()?;
        let draft = &self.form.draft;
        let body = MultipartBody {
            fields: Vec::new(),
            file: Some(image),
        }
        .text("title", draft.title.as_str())
        .text("description", draft.description.as_str())
        .text("category", draft.category.as_str());
        let result = self.form.gateway.upload(ADD_POST.path, body).await;

        if result.is_ok() {
            self.image = None;
        }
        self.form.finish(result);
        Ok(())
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Populate category options. A failure is logged and leaves the options
    /// empty; the form stays usable.
    pub async fn load_categories(&mut self) {
        let gateway = Arc::clone(&self.form.gateway);
        match fetch_category_names(gateway.as_ref()).await {
            Ok(names) => self.categories = names,
            Err(_) => {
                warn!("category options unavailable");
                self.categories.clear();
            }
        }
    }
}
