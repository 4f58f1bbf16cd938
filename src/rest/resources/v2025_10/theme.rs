//! Theme resource implementation.
//!
//! The theme listing is not paginated: `themes.json` returns every theme in
//! one response and rejects `limit` and `page_info`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// A theme installed in a Shopify store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Theme {
    pub id: Option<u64>,
    pub name: Option<String>,

    /// `main`, `unpublished`, `demo` or `development`.
    pub role: Option<String>,
    pub theme_store_id: Option<u64>,
    pub previewable: Option<bool>,
    pub processing: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_graphql_api_id: Option<String>,
}

impl RestResource for Theme {
    type Id = u64;
    type AllParams = ThemeListParams;

    const NAME: &'static str = "Theme";
    const KEY: &'static str = "theme";
    const PLURAL: &'static str = "themes";
    const PAGINATED: bool = false;

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "themes/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "themes"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Parameters for the theme listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThemeListParams {
    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
