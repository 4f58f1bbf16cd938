//! Customer resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{ResourceOperation, ResourcePath, RestResource};

/// The state of a customer's account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomerState {
    Disabled,
    Invited,
    Enabled,
    Declined,
}

/// A customer of a Shopify store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Customer {
    pub id: Option<u64>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<CustomerState>,
    pub note: Option<String>,
    pub tags: Option<String>,
    pub verified_email: Option<bool>,
    pub multipass_identifier: Option<String>,
    pub tax_exempt: Option<bool>,
    pub tax_exemptions: Option<Vec<String>>,
    pub orders_count: Option<u64>,

    /// Lifetime spend as a decimal string.
    pub total_spent: Option<String>,
    pub last_order_id: Option<u64>,
    pub last_order_name: Option<String>,
    pub accepts_marketing: Option<bool>,
    pub currency: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub admin_graphql_api_id: Option<String>,
    pub default_address: Option<Value>,
    pub addresses: Option<Value>,
    pub email_marketing_consent: Option<Value>,
    pub sms_marketing_consent: Option<Value>,
}

impl RestResource for Customer {
    type Id = u64;
    type AllParams = CustomerListParams;

    const NAME: &'static str = "Customer";
    const KEY: &'static str = "customer";
    const PLURAL: &'static str = "customers";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(ResourceOperation::Find, &["id"], "customers/{id}"),
        ResourcePath::new(ResourceOperation::All, &[], "customers"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

/// Filters for the first page of a customer listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at_min: Option<DateTime<Utc>>,

    /// Comma-separated list of fields to include in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
