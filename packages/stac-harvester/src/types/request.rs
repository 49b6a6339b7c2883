//! Crawl requests handed to the external fetch engine.

use serde::{Deserialize, Serialize};
use url::Url;

/// Which handler the fetch engine should route a fetched document to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestLabel {
    /// A catalog (or single-collection) document walked during traversal.
    Catalog,
    /// A paginated listing of collections (API page or static batch file).
    Collections,
}

/// Traversal context carried alongside a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUserData {
    /// Hops from the root document. Incremented once per child expansion.
    pub depth: u32,

    /// Display identifier of the document this request targets
    /// (child link title, or the resolved URL when the link is untitled).
    pub catalog_id: String,

    /// `catalog_id` of the document that linked here.
    pub parent_id: Option<String>,

    /// Slug of the source being harvested, stamped onto every record.
    pub catalog_slug: String,

    /// Identifier of the API this listing belongs to, when known.
    pub api_id: Option<String>,

    /// Whether documents reached through this request were discovered via a
    /// paginated API listing. `None` means the caller left the default
    /// (`false`) in force.
    pub is_api: Option<bool>,
}

impl RequestUserData {
    /// Context for a traversal root.
    pub fn root(catalog_id: impl Into<String>, catalog_slug: impl Into<String>) -> Self {
        Self {
            depth: 0,
            catalog_id: catalog_id.into(),
            parent_id: None,
            catalog_slug: catalog_slug.into(),
            api_id: None,
            is_api: None,
        }
    }

    /// Context one hop below this one.
    pub fn child(&self, catalog_id: impl Into<String>) -> Self {
        Self {
            depth: self.depth + 1,
            catalog_id: catalog_id.into(),
            parent_id: Some(self.catalog_id.clone()),
            catalog_slug: self.catalog_slug.clone(),
            api_id: self.api_id.clone(),
            is_api: self.is_api,
        }
    }

    /// Set the API identifier.
    pub fn with_api_id(mut self, api_id: impl Into<String>) -> Self {
        self.api_id = Some(api_id.into());
        self
    }

    /// Set the `is_api` flag explicitly.
    pub fn with_is_api(mut self, is_api: bool) -> Self {
        self.is_api = Some(is_api);
        self
    }
}

/// A unit of work for the external fetch engine. Immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub url: Url,
    pub label: RequestLabel,
    pub user_data: RequestUserData,
}

impl CrawlRequest {
    /// Request a catalog document.
    pub fn catalog(url: Url, user_data: RequestUserData) -> Self {
        Self {
            url,
            label: RequestLabel::Catalog,
            user_data,
        }
    }

    /// Request a collections listing.
    pub fn collections(url: Url, user_data: RequestUserData) -> Self {
        Self {
            url,
            label: RequestLabel::Collections,
            user_data,
        }
    }
}
