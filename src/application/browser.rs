//! Fetch-once, filter-and-paginate view over the post list.

use std::num::NonZeroUsize;
use std::sync::Arc;

use blogdesk_api_types::{Analytics, CategoryOption, Post};
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::gateway::{Gateway, GatewayError, decode, decode_list};
use crate::application::pagination::{self, DEFAULT_PAGE_SIZE};
use crate::domain::entities::Browsable;

pub const LIST_POSTS_PATH: &str = "posts/getAll";
pub const LIST_CATEGORIES_PATH: &str = "category/getAll";
pub const ANALYTICS_PATH: &str = "analysis/analytics";

pub const LOAD_FAILED: &str = "Error fetching posts";

/// Label of the catch-all category option.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "name")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// `"All"` (or blank) selects every category; anything else is an exact
    /// name match.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    fn accepts(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// Searchable, paginated view over records fetched once.
pub struct CollectionBrowser<T = Post> {
    gateway: Arc<dyn Gateway>,
    page_size: NonZeroUsize,
    items: Vec<T>,
    total: Option<u64>,
    categories: Vec<String>,
    query: String,
    category_filter: CategoryFilter,
    page: usize,
    error: Option<&'static str>,
    loaded: bool,
}

impl<T: Browsable> CollectionBrowser<T> {
    pub fn new(gateway: Arc<dyn Gateway>, page_size: NonZeroUsize) -> Self {
        Self {
            gateway,
            page_size,
            items: Vec::new(),
            total: None,
            categories: Vec::new(),
            query: String::new(),
            category_filter: CategoryFilter::All,
            page: 1,
            error: None,
            loaded: false,
        }
    }

    pub fn with_default_page_size(gateway: Arc<dyn Gateway>) -> Self {
        Self::new(gateway, DEFAULT_PAGE_SIZE)
    }

    /// Replace the fetched set directly.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.error = None;
        self.loaded = true;
        self.page = self.clamped(self.page);
    }

    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.page = 1;
    }

    pub fn set_category_filter(&mut self, raw: &str) {
        self.category_filter = CategoryFilter::parse(raw);
        self.page = 1;
    }

    /// Move to page `n`, clamped into the valid range.
    pub fn set_page(&mut self, n: usize) {
        self.page = self.clamped(n);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.filtered_len(), self.page_size)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category_filter
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Items passing both filters, in fetch order.
    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches_query(&needle))
            .filter(|item| self.category_filter.accepts(item.category()))
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// The current page of the filtered set.
    pub fn visible(&self) -> Vec<&T> {
        let filtered = self.filtered();
        let range = pagination::page_bounds(self.page, filtered.len(), self.page_size);
        filtered[range].to_vec()
    }

    fn clamped(&self, requested: usize) -> usize {
        pagination::clamp_page(requested, self.filtered_len(), self.page_size)
    }
}

impl CollectionBrowser<Post> {
    /// Fetch posts, the aggregate count, and the category options.
    ///
    /// Only a failed post list puts the view in an error state; the count and
    /// category options are optional decorations.
    pub async fn load(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        let (posts, analytics, categories) = tokio::join!(
            fetch_posts(gateway.as_ref()),
            fetch_analytics(gateway.as_ref()),
            fetch_category_names(gateway.as_ref()),
        );

        match posts {
            Ok(posts) => {
                debug!(count = posts.len(), "loaded posts");
                self.set_items(posts);
            }
            Err(_) => {
                self.items.clear();
                self.loaded = false;
                self.error = Some(LOAD_FAILED);
                self.page = 1;
            }
        }

        self.total = match analytics {
            Ok(analytics) => Some(analytics.total),
            Err(_) => {
                warn!("analytics unavailable");
                None
            }
        };

        self.categories = match categories {
            Ok(names) => names,
            Err(_) => {
                warn!("category options unavailable");
                Vec::new()
            }
        };
    }
}

pub async fn fetch_posts(gateway: &dyn Gateway) -> Result<Vec<Post>, GatewayError> {
    let value = gateway.request(Method::GET, LIST_POSTS_PATH, None).await?;
    decode_list(value)
}

pub async fn fetch_analytics(gateway: &dyn Gateway) -> Result<Analytics, GatewayError> {
    let value = gateway.request(Method::GET, ANALYTICS_PATH, None).await?;
    decode(value)
}

/// Names offered as category options by the post screens.
pub async fn fetch_category_names(gateway: &dyn Gateway) -> Result<Vec<String>, GatewayError> {
    let value = gateway
        .request(Method::GET, LIST_CATEGORIES_PATH, None)
        .await?;
    let options: Vec<CategoryOption> = decode_list(value)?;
    Ok(options.into_iter().map(|option| option.name).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::testing::StubGateway;

    fn post(id: u64, title: &str, description: &str, category: &str) -> Post {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "description": description,
            "category": category,
        }))
        .expect("post")
    }

    fn browser_with(items: Vec<Post>, page_size: usize) -> CollectionBrowser<Post> {
        let mut browser = CollectionBrowser::new(
            Arc::new(StubGateway::default()),
            NonZeroUsize::new(page_size).expect("page size"),
        );
        browser.set_items(items);
        browser
    }

    fn ids(items: &[&Post]) -> Vec<String> {
        items.iter().map(|post| post.id.to_string()).collect()
    }

    #[test]
    fn query_and_category_compose() {
        let mut browser = browser_with(
            vec![post(1, "Go", "lang", "tech"), post(2, "Tea", "drink", "food")],
            6,
        );

        browser.set_query("go");
        assert_eq!(ids(&browser.visible()), ["1"]);

        browser.set_query("");
        browser.set_category_filter("food");
        assert_eq!(ids(&browser.visible()), ["2"]);

        browser.set_query("a");
        assert_eq!(ids(&browser.visible()), ["2"]);

        browser.set_category_filter(ALL_CATEGORIES);
        assert_eq!(ids(&browser.visible()), ["1", "2"]);
    }

    #[test]
    fn query_matches_description_case_insensitively() {
        let mut browser = browser_with(
            vec![post(1, "Intro", "About RUST", "tech"), post(2, "Other", "", "x")],
            6,
        );
        browser.set_query("rust");
        assert_eq!(ids(&browser.visible()), ["1"]);
    }

    #[test]
    fn whitespace_query_is_a_literal_match() {
        let mut browser = browser_with(
            vec![post(1, "a b", "", "x"), post(2, "ab", "", "x")],
            6,
        );
        browser.set_query(" ");
        assert_eq!(ids(&browser.visible()), ["1"]);
    }

    #[test]
    fn category_match_is_exact() {
        let mut browser = browser_with(vec![post(1, "a", "", "Tech")], 6);
        browser.set_category_filter("tech");
        assert!(browser.visible().is_empty());
        assert_eq!(browser.page_count(), 1);
    }

    #[test]
    fn pages_slice_the_filtered_list() {
        let items: Vec<Post> = (1..=14)
            .map(|n| post(n, &format!("post {n}"), "", if n % 2 == 0 { "even" } else { "odd" }))
            .collect();
        let mut browser = browser_with(items, 6);

        assert_eq!(browser.page_count(), 3);
        browser.set_page(3);
        assert_eq!(ids(&browser.visible()), ["13", "14"]);

        browser.set_page(99);
        assert_eq!(browser.page(), 3);
        browser.set_page(0);
        assert_eq!(browser.page(), 1);

        browser.set_category_filter("even");
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.page_count(), 2);
        browser.set_page(2);
        assert_eq!(ids(&browser.visible()), ["14"]);
    }

    #[tokio::test]
    async fn load_normalizes_envelope_and_collects_options() {
        let stub = Arc::new(StubGateway::default());
        stub.reply(
            Method::GET,
            LIST_POSTS_PATH,
            Ok(json!({"data": [{"id": 1, "title": "a", "description": "", "category": "c"}]})),
        );
        stub.reply(Method::GET, ANALYTICS_PATH, Ok(json!({"total": 41})));
        stub.reply(
            Method::GET,
            LIST_CATEGORIES_PATH,
            Ok(json!({"data": [{"name": "c"}, {"name": "d"}]})),
        );

        let mut browser: CollectionBrowser = CollectionBrowser::with_default_page_size(stub.clone());
        browser.load().await;

        assert!(browser.is_loaded());
        assert_eq!(browser.items().len(), 1);
        assert_eq!(browser.total(), Some(41));
        assert_eq!(browser.categories(), ["c", "d"]);
        assert_eq!(browser.error_message(), None);
    }

    #[tokio::test]
    async fn null_text_fields_do_not_fail_the_list() {
        let stub = Arc::new(StubGateway::default());
        stub.reply(
            Method::GET,
            LIST_POSTS_PATH,
            Ok(json!([
                {"id": 1, "title": "a", "description": "d", "category": "c"},
                {"id": 2, "title": "b", "description": null, "category": "c"}
            ])),
        );

        let mut browser: CollectionBrowser = CollectionBrowser::with_default_page_size(stub.clone());
        browser.load().await;

        assert_eq!(browser.error_message(), None);
        assert_eq!(ids(&browser.visible()), ["1", "2"]);
    }

    #[tokio::test]
    async fn failed_list_sets_view_error() {
        let stub = Arc::new(StubGateway::default());
        stub.reply(
            Method::GET,
            LIST_CATEGORIES_PATH,
            Ok(json!({"data": [{"name": "c"}]})),
        );

        let mut browser: CollectionBrowser = CollectionBrowser::with_default_page_size(stub.clone());
        browser.load().await;

        assert_eq!(browser.error_message(), Some(LOAD_FAILED));
        assert!(browser.visible().is_empty());
        assert_eq!(browser.total(), None);
        assert_eq!(browser.categories(), ["c"]);
    }

    #[tokio::test]
    async fn unexpected_list_shape_is_a_failure() {
        let stub = Arc::new(StubGateway::default());
        stub.reply(Method::GET, LIST_POSTS_PATH, Ok(json!({"posts": []})));

        let mut browser: CollectionBrowser = CollectionBrowser::with_default_page_size(stub.clone());
        browser.load().await;
        assert_eq!(browser.error_message(), Some(LOAD_FAILED));
    }
}
