//! Shop resource implementation.
//!
//! The shop is a singleton: there is exactly one per access token, served
//! from `shop.json` with no id and no listing. It is therefore not a
//! [`RestResource`](crate::rest::RestResource); use [`Shop::current`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::RestClient;
use crate::rest::{ResourceError, ResourceResponse};

/// The shop the access token belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Shop {
    pub id: Option<u64>,

    /// The display name of the shop.
    pub name: Option<String>,
    pub email: Option<String>,
    pub domain: Option<String>,
    pub myshopify_domain: Option<String>,
    pub shop_owner: Option<String>,
    pub plan_name: Option<String>,
    pub country_code: Option<String>,
    pub currency: Option<String>,
    pub iana_timezone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shop {
    const NAME: &'static str = "Shop";

    /// Fetches the current shop.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the body has no
    /// `shop` object.
    pub async fn current(client: &RestClient) -> Result<ResourceResponse<Self>, ResourceError> {
        let response = client
            .get("shop", std::collections::BTreeMap::new())
            .await
            .map_err(|e| ResourceError::from_rest(e, Self::NAME, None))?;

        ResourceResponse::from_http_response(response, Self::NAME, "shop")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_deserialization() {
        let json = r#"{
            "id": 690933842,
            "name": "John Smith Test Store",
            "email": "j.smith@example.com",
            "domain": "shop.apple.com",
            "myshopify_domain": "jsmith.myshopify.com",
            "currency": "USD",
            "created_at": "2007-12-31T19:00:00-05:00"
        }"#;

        let shop: Shop = serde_json::from_str(json).unwrap();

        assert_eq!(shop.id, Some(690_933_842));
        assert_eq!(shop.name.as_deref(), Some("John Smith Test Store"));
        assert_eq!(shop.myshopify_domain.as_deref(), Some("jsmith.myshopify.com"));
    }
}
