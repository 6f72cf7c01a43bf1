//! CRM object records
//!
//! Contacts, companies and deals share one record shape: an id, a bag of
//! string properties, and timestamps.

use crate::pagination::{ListResponse, Paging, SingleResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A CRM object as returned by `/crm/v3/objects/{type}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    /// Object id
    pub id: String,
    /// Requested properties; unset properties come back as `null`
    #[serde(default)]
    pub properties: BTreeMap<String, Option<String>>,
    /// Value history, when requested with `propertiesWithHistory`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties_with_history: Option<BTreeMap<String, Vec<PropertyHistory>>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    /// Associated object ids keyed by object type, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<BTreeMap<String, AssociationPage>>,
}

impl CrmObject {
    /// Get a property value, treating `null` as missing
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|v| v.as_deref())
    }
}

/// One historical value of a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyHistory {
    pub value: String,
    pub timestamp: DateTime<Utc>,
    pub source_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<u64>,
}

/// Associations to one object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationPage {
    pub results: Vec<Association>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

/// A single association edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub type Contact = CrmObject;
pub type Contacts = ListResponse<Contact>;
pub type ContactResponse = SingleResponse<Contact>;

pub type Company = CrmObject;
pub type Companies = ListResponse<Company>;
pub type CompanyResponse = SingleResponse<Company>;

pub type Deal = CrmObject;
pub type Deals = ListResponse<Deal>;
pub type DealResponse = SingleResponse<Deal>;
